use std::{
    collections::HashMap,
    fs::{self, File},
    io,
    path::{Path, PathBuf},
};

use chrono::{NaiveDate, NaiveDateTime};
use gribseries::{
    ExtractError, GridArchive, GridRecord, Level, RecordFile, RecordHeader, RecordIter,
};
use tempfile::TempDir;

pub(crate) fn date_time(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .unwrap()
}

/// 3x3 grid centered on (lon, lat) = (290, -35) with a spacing of 1 degree.
pub(crate) fn record(
    name: &str,
    level: u32,
    timestamp: NaiveDateTime,
    values: [f64; 9],
) -> GridRecord {
    let lats = [-34., -34., -34., -35., -35., -35., -36., -36., -36.];
    let lons = [289., 290., 291., 289., 290., 291., 289., 290., 291.];
    let header = RecordHeader::new(name, Some(Level(level)), timestamp);
    GridRecord::new(header, (3, 3), lats.to_vec(), lons.to_vec(), values.to_vec()).unwrap()
}

pub(crate) struct VecFile(Vec<GridRecord>);

impl RecordFile for VecFile {
    fn records<'a>(&'a self, select: &'a dyn Fn(&RecordHeader) -> bool) -> RecordIter<'a> {
        Box::new(
            self.0
                .iter()
                .filter(move |record| select(record.header()))
                .cloned()
                .map(Ok::<_, ExtractError>),
        )
    }
}

/// Archive laid out on disk with empty placeholder files whose records are
/// held in memory.
pub(crate) struct TestArchive {
    dir: TempDir,
    records: HashMap<PathBuf, Vec<GridRecord>>,
}

impl TestArchive {
    pub(crate) fn new() -> Result<Self, io::Error> {
        Ok(Self {
            dir: TempDir::new()?,
            records: HashMap::new(),
        })
    }

    pub(crate) fn root(&self) -> &Path {
        self.dir.path()
    }

    pub(crate) fn output_dir(&self) -> PathBuf {
        self.dir.path().join("out")
    }

    pub(crate) fn file_path(&self, year: i32, month: u32) -> PathBuf {
        self.dir
            .path()
            .join(format!("{year:04}"))
            .join(format!("A1-{year:04}{month:02}.pgb.f00"))
    }

    /// Creates the files of all twelve months of `year`, without records.
    pub(crate) fn add_year(&mut self, year: i32) -> Result<(), io::Error> {
        for month in 1..=12 {
            self.add_file(year, month)?;
        }
        Ok(())
    }

    pub(crate) fn add_file(&mut self, year: i32, month: u32) -> Result<(), io::Error> {
        let path = self.file_path(year, month);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        File::create(&path)?;
        self.records.entry(path).or_default();
        Ok(())
    }

    pub(crate) fn remove_file(&mut self, year: i32, month: u32) -> Result<(), io::Error> {
        let path = self.file_path(year, month);
        fs::remove_file(&path)?;
        self.records.remove(&path);
        Ok(())
    }

    pub(crate) fn push(&mut self, year: i32, month: u32, record: GridRecord) {
        let path = self.file_path(year, month);
        self.records.entry(path).or_default().push(record);
    }
}

impl GridArchive for TestArchive {
    type File = VecFile;

    fn open(&self, path: &Path) -> Result<Self::File, ExtractError> {
        self.records
            .get(path)
            .cloned()
            .map(VecFile)
            .ok_or_else(|| ExtractError::ReadError(format!("{}: not found", path.display())))
    }
}

impl GridArchive for &TestArchive {
    type File = VecFile;

    fn open(&self, path: &Path) -> Result<Self::File, ExtractError> {
        <TestArchive as GridArchive>::open(self, path)
    }
}
