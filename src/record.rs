use std::path::Path;

use chrono::NaiveDateTime;

use crate::{criteria::Level, error::ExtractError};

/// Identifying fields of a record, available without decoding its grids.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordHeader {
    pub short_name: String,
    /// `None` for records not located on an isobaric surface.
    pub level: Option<Level>,
    pub timestamp: NaiveDateTime,
}

impl RecordHeader {
    pub fn new<S: Into<String>>(
        short_name: S,
        level: Option<Level>,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            short_name: short_name.into(),
            level,
            timestamp,
        }
    }
}

/// One observation: a 2-D field together with its coordinate grids.
///
/// The three grids are stored flat in the same point order and are
/// congruent with `shape`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRecord {
    header: RecordHeader,
    shape: (usize, usize),
    lats: Vec<f64>,
    lons: Vec<f64>,
    values: Vec<f64>,
}

impl GridRecord {
    pub fn new(
        header: RecordHeader,
        shape: (usize, usize),
        lats: Vec<f64>,
        lons: Vec<f64>,
        values: Vec<f64>,
    ) -> Result<Self, ExtractError> {
        let num_points = shape.0 * shape.1;
        if lats.len() != num_points || lons.len() != num_points || values.len() != num_points {
            return Err(ExtractError::GridShapeMismatch {
                shape,
                lats: lats.len(),
                lons: lons.len(),
                values: values.len(),
            });
        }
        Ok(Self {
            header,
            shape,
            lats,
            lons,
            values,
        })
    }

    #[inline]
    pub fn header(&self) -> &RecordHeader {
        &self.header
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    #[inline]
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    #[inline]
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

pub type RecordIter<'a> = Box<dyn Iterator<Item = Result<GridRecord, ExtractError>> + 'a>;

/// An opened archive file.
pub trait RecordFile {
    /// Returns the records of the file in file order.
    ///
    /// Grids are decoded only for records whose header is accepted by
    /// `select`; the others are not yielded at all.
    fn records<'a>(&'a self, select: &'a dyn Fn(&RecordHeader) -> bool) -> RecordIter<'a>;
}

/// A reader that can open archive files by path.
pub trait GridArchive: Sync {
    type File: RecordFile;

    fn open(&self, path: &Path) -> Result<Self::File, ExtractError>;
}
