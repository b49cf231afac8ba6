use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    io,
    path::PathBuf,
};

use chrono::NaiveDateTime;

use crate::criteria::{Level, YearMonth};

#[derive(Debug, Clone, PartialEq)]
pub enum ExtractError {
    InvalidCriteria(CriteriaError),
    InvalidPattern(String),
    ArchiveFileNotFound(String),
    AmbiguousArchiveFile {
        pattern: String,
        candidates: Vec<PathBuf>,
    },
    ReadError(String),
    GridShapeMismatch {
        shape: (usize, usize),
        lats: usize,
        lons: usize,
        values: usize,
    },
    ReductionError(ReductionError),
    InvalidBucket(Level, YearMonth),
    OutputWriteError(String),
    WorkerPoolError(String),
}

impl Error for ExtractError {
    fn description(&self) -> &str {
        "extraction error"
    }
}

impl From<CriteriaError> for ExtractError {
    fn from(e: CriteriaError) -> Self {
        Self::InvalidCriteria(e)
    }
}

impl From<ReductionError> for ExtractError {
    fn from(e: ReductionError) -> Self {
        Self::ReductionError(e)
    }
}

impl From<io::Error> for ExtractError {
    fn from(e: io::Error) -> Self {
        Self::ReadError(e.to_string())
    }
}

impl From<grib::GribError> for ExtractError {
    fn from(e: grib::GribError) -> Self {
        Self::ReadError(e.to_string())
    }
}

impl From<glob::PatternError> for ExtractError {
    fn from(e: glob::PatternError) -> Self {
        Self::InvalidPattern(e.to_string())
    }
}

impl Display for ExtractError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::InvalidCriteria(e) => write!(f, "invalid selection criteria: {e}"),
            Self::InvalidPattern(s) => write!(f, "invalid archive file pattern: {s}"),
            Self::ArchiveFileNotFound(pattern) => {
                write!(f, "no archive file matches '{pattern}'")
            }
            Self::AmbiguousArchiveFile {
                pattern,
                candidates,
            } => write!(
                f,
                "{} archive files match '{pattern}' where exactly one is expected",
                candidates.len()
            ),
            Self::ReadError(s) => write!(f, "read error: {s}"),
            Self::GridShapeMismatch {
                shape,
                lats,
                lons,
                values,
            } => write!(
                f,
                "grids are not congruent with shape {}x{}: {lats} latitudes, {lons} longitudes, {values} values",
                shape.0, shape.1
            ),
            Self::ReductionError(e) => write!(f, "{e}"),
            Self::InvalidBucket(level, month) => {
                write!(f, "no series provisioned for level {level} in {month}")
            }
            Self::OutputWriteError(s) => write!(f, "failed to write output container: {s}"),
            Self::WorkerPoolError(s) => write!(f, "failed to start workers: {s}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReductionError {
    EmptySelection {
        variable: String,
        level: Level,
        timestamp: NaiveDateTime,
    },
}

impl Error for ReductionError {
    fn description(&self) -> &str {
        "reduction error"
    }
}

impl Display for ReductionError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::EmptySelection {
                variable,
                level,
                timestamp,
            } => write!(
                f,
                "spatial window selects no grid cell for '{variable}' at {level} ({timestamp})"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CriteriaError {
    NonPositiveWidth(f64, f64),
    EmptyLevelSet,
    EmptyVariableSet,
    ReversedYearRange(i32, i32),
    UnrepresentableYear(i32),
}

impl Error for CriteriaError {
    fn description(&self) -> &str {
        "selection criteria error"
    }
}

impl Display for CriteriaError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::NonPositiveWidth(dlon, dlat) => {
                write!(f, "window widths must be positive: {dlon}, {dlat}")
            }
            Self::EmptyLevelSet => write!(f, "no vertical level selected"),
            Self::EmptyVariableSet => write!(f, "no variable selected"),
            Self::ReversedYearRange(start, end) => {
                write!(f, "year range is reversed: {start}-{end}")
            }
            Self::UnrepresentableYear(year) => {
                write!(f, "year {year} is out of the supported calendar range")
            }
        }
    }
}
