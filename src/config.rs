use std::{
    fmt::{self, Display, Formatter},
    path::PathBuf,
    str::FromStr,
};

use crate::{criteria::SelectionCriteria, layout::ArchiveLayout, writer::OutputLayout};

/// What to do with a matching record whose spatial window selects no cell.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EmptySelectionPolicy {
    #[default]
    Abort,
    Skip,
}

impl FromStr for EmptySelectionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            _ => Err(format!("unknown policy '{s}' (expected 'abort' or 'skip')")),
        }
    }
}

impl Display for EmptySelectionPolicy {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Abort => write!(f, "abort"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

/// What to do when more than one archive file matches a month's pattern.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AmbiguityPolicy {
    /// Takes the lexicographically first match and logs a warning.
    #[default]
    FirstMatch,
    Reject,
}

/// Static configuration of one extraction run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub criteria: SelectionCriteria,
    pub archive: ArchiveLayout,
    pub output: OutputLayout,
    pub empty_selection: EmptySelectionPolicy,
    pub ambiguity: AmbiguityPolicy,
    /// Number of years processed concurrently.
    pub jobs: usize,
}

impl RunConfig {
    pub fn new<I, O>(criteria: SelectionCriteria, input_root: I, output_dir: O) -> Self
    where
        I: Into<PathBuf>,
        O: Into<PathBuf>,
    {
        Self {
            criteria,
            archive: ArchiveLayout::new(input_root),
            output: OutputLayout::new(output_dir),
            empty_selection: EmptySelectionPolicy::default(),
            ambiguity: AmbiguityPolicy::default(),
            jobs: 1,
        }
    }
}
