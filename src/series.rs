use std::collections::BTreeMap;

use crate::{
    criteria::{Level, YearMonth},
    error::ExtractError,
};

/// Parallel sequences of relative times and reduced values, in the order
/// records were encountered.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Series {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl Series {
    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, time: f64, value: f64) {
        self.times.push(time);
        self.values.push(value);
    }
}

/// Series of one year, indexed by level and then by month.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DrainedSeries(BTreeMap<Level, BTreeMap<YearMonth, Series>>);

impl DrainedSeries {
    pub fn get(&self, level: Level, month: YearMonth) -> Option<&Series> {
        self.0.get(&level)?.get(&month)
    }

    /// Iterates over all buckets in level order, then month order.
    pub fn iter(&self) -> impl Iterator<Item = (Level, YearMonth, &Series)> {
        self.0.iter().flat_map(|(level, months)| {
            months
                .iter()
                .map(move |(month, series)| (*level, *month, series))
        })
    }

    /// Returns the number of buckets.
    pub fn len(&self) -> usize {
        self.0.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of records over all buckets.
    pub fn num_records(&self) -> usize {
        self.iter().map(|(_, _, series)| series.len()).sum()
    }
}

/// Grows per-(level, month) series for the year being processed.
#[derive(Debug, Default)]
pub struct SeriesAccumulator {
    buckets: BTreeMap<Level, BTreeMap<YearMonth, Series>>,
}

impl SeriesAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards all buckets and provisions an empty one for every pair of
    /// `levels` and `months`.
    pub fn begin_year<L, M>(&mut self, levels: L, months: M)
    where
        L: IntoIterator<Item = Level>,
        M: IntoIterator<Item = YearMonth>,
        M::IntoIter: Clone,
    {
        let months = months.into_iter();
        self.buckets = levels
            .into_iter()
            .map(|level| {
                let buckets = months.clone().map(|month| (month, Series::default()));
                (level, buckets.collect())
            })
            .collect();
    }

    pub fn append(
        &mut self,
        level: Level,
        month: YearMonth,
        relative_time: f64,
        value: f64,
    ) -> Result<(), ExtractError> {
        let series = self
            .buckets
            .get_mut(&level)
            .and_then(|months| months.get_mut(&month))
            .ok_or(ExtractError::InvalidBucket(level, month))?;
        series.push(relative_time, value);
        Ok(())
    }

    /// Returns a copy of all buckets; later appends do not affect it.
    pub fn drain(&self) -> DrainedSeries {
        DrainedSeries(self.buckets.clone())
    }

    /// Hands all buckets over without copying.
    pub fn into_drained(self) -> DrainedSeries {
        DrainedSeries(self.buckets)
    }
}
