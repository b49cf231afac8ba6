use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::{
    config::{EmptySelectionPolicy, RunConfig},
    criteria::YearMonth,
    error::ExtractError,
    reducer::reduce,
    record::{GridArchive, RecordFile, RecordHeader},
    series::{DrainedSeries, SeriesAccumulator},
    window::WindowFilter,
    writer::{ContainerBackend, SeriesWriter},
};

/// Outcome of one processed year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearReport {
    pub year: i32,
    pub output: PathBuf,
    /// Number of reduced records written.
    pub records: usize,
    /// Number of records dropped for selecting no cell.
    pub skipped: usize,
}

/// Drives the extraction over years, months and records.
pub struct ArchiveWalker<'c, A, B> {
    config: &'c RunConfig,
    archive: A,
    writer: SeriesWriter<B>,
    filter: WindowFilter,
}

impl<'c, A, B> ArchiveWalker<'c, A, B>
where
    A: GridArchive,
    B: ContainerBackend,
{
    pub fn new(config: &'c RunConfig, archive: A, backend: B) -> Self {
        Self {
            config,
            archive,
            writer: SeriesWriter::new(backend, config.output.clone()),
            filter: WindowFilter::new(&config.criteria),
        }
    }

    /// Processes every configured year and writes one container per year.
    ///
    /// Years run on a thread pool when more than one job is configured.
    /// Reports are returned in year order; the first failure aborts the run.
    pub fn run(&self) -> Result<Vec<YearReport>, ExtractError> {
        let years = self.config.criteria.years();
        if self.config.jobs <= 1 {
            return years.map(|year| self.run_year(year)).collect();
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.jobs)
            .build()
            .map_err(|e| ExtractError::WorkerPoolError(e.to_string()))?;
        let results: Vec<_> = pool.install(|| {
            years
                .into_par_iter()
                .map(|year| self.run_year(year))
                .collect()
        });
        results.into_iter().collect()
    }

    /// Extracts and writes a single year.
    pub fn run_year(&self, year: i32) -> Result<YearReport, ExtractError> {
        let (series, skipped) = self.extract_year(year)?;
        let output = self.writer.write(year, &series)?;
        let records = series.num_records();
        log::info!("{year:04}: wrote {records} records to {}", output.display());
        Ok(YearReport {
            year,
            output,
            records,
            skipped,
        })
    }

    /// Reduces all matching records of `year` without writing them.
    ///
    /// Also returns the number of records skipped for selecting no cell.
    pub fn extract_year(&self, year: i32) -> Result<(DrainedSeries, usize), ExtractError> {
        let criteria = &self.config.criteria;
        let mut acc = SeriesAccumulator::new();
        acc.begin_year(criteria.levels().iter().copied(), YearMonth::months_of(year));

        let mut skipped = 0;
        for month in YearMonth::months_of(year) {
            let path = self.config.archive.resolve(month, self.config.ambiguity)?;
            log::info!("{month}: reading {}", path.display());
            skipped += self.extract_month(&mut acc, month, &path)?;
        }
        Ok((acc.into_drained(), skipped))
    }

    fn extract_month(
        &self,
        acc: &mut SeriesAccumulator,
        month: YearMonth,
        path: &Path,
    ) -> Result<usize, ExtractError> {
        let epoch = self.config.criteria.epoch();
        let file = self.archive.open(path)?;
        let select = |header: &RecordHeader| self.filter.accepts(header);

        let mut skipped = 0;
        for record in file.records(&select) {
            let record = record?;
            let header = record.header();
            let Some(level) = header.level.filter(|_| self.filter.accepts(header)) else {
                continue;
            };

            let mask = self.filter.spatial_mask(&record);
            let reduction = match reduce(&record, &mask, epoch) {
                Ok(reduction) => reduction,
                Err(ExtractError::ReductionError(e))
                    if self.config.empty_selection == EmptySelectionPolicy::Skip =>
                {
                    log::warn!("skipping record in {}: {e}", path.display());
                    skipped += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };
            log::debug!(
                "{month}: {} at {level}, t = {:.4}, mean = {}",
                header.short_name,
                reduction.relative_time,
                reduction.value
            );
            acc.append(level, month, reduction.relative_time, reduction.value)?;
        }
        Ok(skipped)
    }
}
