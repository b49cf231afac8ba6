//! Reduction of a gridded re-analysis archive to regional time series.
//!
//! Monthly GRIB2 files are scanned for the variables and isobaric levels of
//! interest; each matching record is averaged over a fixed geographic window
//! and the resulting values are collected per level and month, then written
//! to one hierarchical container per year under
//! `level_<LEVEL>/<YYYY>-<MM>/{t,h}`.
//!
//! # Examples
//!
//! ```no_run
//! use gribseries::{ArchiveWalker, GribArchive, Hdf5Backend, RunConfig, SelectionCriteria};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let criteria = SelectionCriteria::new(
//!         (290.7, -35.3),
//!         (5.1, 5.1),
//!         [50, 100, 200, 300, 700, 850],
//!         ["gh"],
//!         2006..=2013,
//!     )?;
//!     let config = RunConfig::new(criteria, "/media/Elements/data_gdas", ".");
//!     let walker = ArchiveWalker::new(&config, GribArchive, Hdf5Backend);
//!     for report in walker.run()? {
//!         println!("{}: {} records", report.output.display(), report.records);
//!     }
//!     Ok(())
//! }
//! ```

mod config;
mod criteria;
mod error;
#[cfg(feature = "hdf5-output")]
mod h5;
mod layout;
mod record;
mod reducer;
mod series;
mod source;
mod walker;
mod window;
mod writer;

#[cfg(feature = "hdf5-output")]
pub use crate::h5::*;
pub use crate::{
    config::*, criteria::*, error::*, layout::*, record::*, reducer::*, series::*, source::*,
    walker::*, window::*, writer::*,
};
