use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::{config::AmbiguityPolicy, criteria::YearMonth, error::ExtractError};

/// File name template of the monthly GDAS pressure-level files.
pub const DEFAULT_FILE_PATTERN: &str = "A*-{year}{month}.pgb.f00";

/// Directory conventions of the input archive: one directory per year
/// under the root, one file per month inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveLayout {
    root: PathBuf,
    file_pattern: String,
}

impl ArchiveLayout {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            file_pattern: DEFAULT_FILE_PATTERN.to_owned(),
        }
    }

    /// Replaces the file name template.
    ///
    /// `{year}` expands to 4 digits and `{month}` to 2 digits; the rest is a
    /// glob pattern.
    pub fn with_file_pattern<S: Into<String>>(mut self, pattern: S) -> Self {
        self.file_pattern = pattern.into();
        self
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[inline]
    pub fn file_pattern(&self) -> &str {
        &self.file_pattern
    }

    pub fn year_dir(&self, year: i32) -> PathBuf {
        self.root.join(format!("{year:04}"))
    }

    /// Returns the glob pattern matching the file of `month`.
    pub fn month_pattern(&self, month: YearMonth) -> Result<String, ExtractError> {
        let dir = self.year_dir(month.year);
        let dir = dir.to_str().ok_or_else(|| {
            ExtractError::InvalidPattern(format!("non UTF-8 path: {}", dir.display()))
        })?;
        let name = self
            .file_pattern
            .replace("{year}", &format!("{:04}", month.year))
            .replace("{month}", &format!("{:02}", month.month));
        let pattern = format!("{}/{name}", Pattern::escape(dir));
        Pattern::new(&pattern)?;
        Ok(pattern)
    }

    /// Finds the single archive file of `month`.
    pub fn resolve(
        &self,
        month: YearMonth,
        policy: AmbiguityPolicy,
    ) -> Result<PathBuf, ExtractError> {
        let pattern = self.month_pattern(month)?;
        let mut candidates = glob::glob(&pattern)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ExtractError::ReadError(e.to_string()))?;
        candidates.sort();

        match (candidates.len(), policy) {
            (0, _) => Err(ExtractError::ArchiveFileNotFound(pattern)),
            (1, _) => Ok(candidates.remove(0)),
            (_, AmbiguityPolicy::Reject) => Err(ExtractError::AmbiguousArchiveFile {
                pattern,
                candidates,
            }),
            (n, AmbiguityPolicy::FirstMatch) => {
                let chosen = candidates.remove(0);
                log::warn!(
                    "{n} files match '{pattern}'; taking {}",
                    chosen.display()
                );
                Ok(chosen)
            }
        }
    }
}
