use std::collections::BTreeSet;

use crate::{
    criteria::{Level, SelectionCriteria},
    record::{GridRecord, RecordHeader},
};

/// Boolean grid marking the cells inside the geographic window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpatialMask {
    shape: (usize, usize),
    cells: Vec<bool>,
}

impl SpatialMask {
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    #[inline]
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Returns the number of selected cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&inside| inside).count()
    }
}

/// Decides which records are of interest and where the window lies on their
/// grids.
#[derive(Debug, Clone)]
pub struct WindowFilter {
    lon_range: (f64, f64),
    lat_range: (f64, f64),
    levels: BTreeSet<Level>,
    variables: BTreeSet<String>,
}

impl WindowFilter {
    pub fn new(criteria: &SelectionCriteria) -> Self {
        let (center_lon, center_lat) = criteria.center();
        let (half_lon, half_lat) = criteria.half_width();
        Self {
            lon_range: (center_lon - half_lon, center_lon + half_lon),
            lat_range: (center_lat - half_lat, center_lat + half_lat),
            levels: criteria.levels().clone(),
            variables: criteria.variables().clone(),
        }
    }

    pub fn is_selected(&self, variable: &str, level: Level) -> bool {
        self.variables.contains(variable) && self.levels.contains(&level)
    }

    /// Same as [`is_selected`](Self::is_selected) for a record header;
    /// records off isobaric surfaces are never selected.
    pub fn accepts(&self, header: &RecordHeader) -> bool {
        header
            .level
            .is_some_and(|level| self.is_selected(&header.short_name, level))
    }

    /// Computes the mask of cells strictly inside the window. Points exactly
    /// on the boundary are outside.
    pub fn spatial_mask(&self, record: &GridRecord) -> SpatialMask {
        let (lon_min, lon_max) = self.lon_range;
        let (lat_min, lat_max) = self.lat_range;
        let cells = record
            .lats()
            .iter()
            .zip(record.lons())
            .map(|(&lat, &lon)| lat < lat_max && lat > lat_min && lon < lon_max && lon > lon_min)
            .collect();
        SpatialMask {
            shape: record.shape(),
            cells,
        }
    }
}
