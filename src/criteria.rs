use std::{
    collections::BTreeSet,
    fmt::{self, Display, Formatter},
    ops::RangeInclusive,
};

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::CriteriaError;

/// Isobaric level in hPa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Level(pub u32);

impl Level {
    #[inline]
    pub fn hpa(&self) -> u32 {
        self.0
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} hPa", self.0)
    }
}

impl From<u32> for Level {
    fn from(hpa: u32) -> Self {
        Self(hpa)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Returns the twelve months of `year` in calendar order.
    pub fn months_of(year: i32) -> impl Iterator<Item = Self> + Clone {
        (1..=12).map(move |month| Self::new(year, month))
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Geographic window, vertical levels, variables and years of interest.
///
/// The window is given by its center and its full widths; a grid point is
/// inside when it lies strictly within `center ± width / 2` on both axes.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionCriteria {
    center_lon: f64,
    center_lat: f64,
    width_lon: f64,
    width_lat: f64,
    levels: BTreeSet<Level>,
    variables: BTreeSet<String>,
    years: RangeInclusive<i32>,
    epoch: NaiveDateTime,
}

impl SelectionCriteria {
    /// Builds validated criteria whose epoch defaults to January 1 of the
    /// first year.
    pub fn new<L, V, S>(
        center: (f64, f64),
        width: (f64, f64),
        levels: L,
        variables: V,
        years: RangeInclusive<i32>,
    ) -> Result<Self, CriteriaError>
    where
        L: IntoIterator<Item = u32>,
        V: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (center_lon, center_lat) = center;
        let (width_lon, width_lat) = width;
        if width_lon.is_nan() || width_lat.is_nan() || width_lon <= 0.0 || width_lat <= 0.0 {
            return Err(CriteriaError::NonPositiveWidth(width_lon, width_lat));
        }

        let levels = levels.into_iter().map(Level).collect::<BTreeSet<_>>();
        if levels.is_empty() {
            return Err(CriteriaError::EmptyLevelSet);
        }

        let variables = variables
            .into_iter()
            .map(Into::into)
            .collect::<BTreeSet<String>>();
        if variables.is_empty() {
            return Err(CriteriaError::EmptyVariableSet);
        }

        let (start, end) = (*years.start(), *years.end());
        if start > end {
            return Err(CriteriaError::ReversedYearRange(start, end));
        }

        let epoch = NaiveDate::from_ymd_opt(start, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .ok_or(CriteriaError::UnrepresentableYear(start))?;

        Ok(Self {
            center_lon,
            center_lat,
            width_lon,
            width_lat,
            levels,
            variables,
            years,
            epoch,
        })
    }

    /// Replaces the reference time that relative times are measured from.
    pub fn with_epoch(mut self, epoch: NaiveDateTime) -> Self {
        self.epoch = epoch;
        self
    }

    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (self.center_lon, self.center_lat)
    }

    #[inline]
    pub fn width(&self) -> (f64, f64) {
        (self.width_lon, self.width_lat)
    }

    #[inline]
    pub fn half_width(&self) -> (f64, f64) {
        (self.width_lon / 2., self.width_lat / 2.)
    }

    #[inline]
    pub fn levels(&self) -> &BTreeSet<Level> {
        &self.levels
    }

    #[inline]
    pub fn variables(&self) -> &BTreeSet<String> {
        &self.variables
    }

    #[inline]
    pub fn years(&self) -> RangeInclusive<i32> {
        self.years.clone()
    }

    #[inline]
    pub fn epoch(&self) -> NaiveDateTime {
        self.epoch
    }
}
