use chrono::NaiveDateTime;

use crate::{
    criteria::Level,
    error::{ExtractError, ReductionError},
    record::GridRecord,
    window::SpatialMask,
};

const MILLISECONDS_PER_DAY: f64 = 86_400_000.;
const DAYS_PER_YEAR: f64 = 365.;

/// Scalar summary of one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reduction {
    /// Years since the epoch.
    pub relative_time: f64,
    pub value: f64,
}

/// Returns the time elapsed from `epoch` to `timestamp` in years of exactly
/// 365 days. Leap days are not special-cased.
pub fn relative_time(timestamp: NaiveDateTime, epoch: NaiveDateTime) -> f64 {
    let elapsed = timestamp - epoch;
    elapsed.num_milliseconds() as f64 / MILLISECONDS_PER_DAY / DAYS_PER_YEAR
}

/// Averages the values of `record` inside `mask`.
///
/// Cells holding NaN are missing values and do not contribute. A mask that
/// leaves no valid cell is an [`EmptySelection`](ReductionError::EmptySelection).
///
/// The record must have passed
/// [`WindowFilter::is_selected`](crate::WindowFilter::is_selected); a record
/// without a level is reported as an empty selection at level 0.
pub fn reduce(
    record: &GridRecord,
    mask: &SpatialMask,
    epoch: NaiveDateTime,
) -> Result<Reduction, ExtractError> {
    if mask.shape() != record.shape() || mask.cells().len() != record.values().len() {
        let (lats, lons) = (record.lats().len(), record.lons().len());
        return Err(ExtractError::GridShapeMismatch {
            shape: mask.shape(),
            lats,
            lons,
            values: record.values().len(),
        });
    }

    let (sum, count) = record
        .values()
        .iter()
        .zip(mask.cells())
        .filter(|&(value, &inside)| inside && !value.is_nan())
        .fold((0_f64, 0_usize), |(sum, count), (value, _)| {
            (sum + value, count + 1)
        });

    let header = record.header();
    if count == 0 {
        let error = ReductionError::EmptySelection {
            variable: header.short_name.clone(),
            level: header.level.unwrap_or(Level(0)),
            timestamp: header.timestamp,
        };
        return Err(error.into());
    }

    Ok(Reduction {
        relative_time: relative_time(header.timestamp, epoch),
        value: sum / count as f64,
    })
}
