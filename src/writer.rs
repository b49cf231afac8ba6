use std::{
    collections::BTreeMap,
    fmt::{self, Display, Formatter},
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use crate::{
    criteria::{Level, YearMonth},
    error::ExtractError,
    series::DrainedSeries,
};

/// Naming of the yearly output containers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    dir: PathBuf,
    prefix: String,
}

impl OutputLayout {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            dir: dir.into(),
            prefix: "test".to_owned(),
        }
    }

    pub fn with_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[inline]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, year: i32, extension: &str) -> PathBuf {
        self.dir
            .join(format!("{}_{year:04}.{extension}", self.prefix))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeriesField {
    /// Relative times in years.
    Time,
    /// Spatial means.
    Value,
}

impl SeriesField {
    fn name(&self) -> &'static str {
        match self {
            Self::Time => "t",
            Self::Value => "h",
        }
    }
}

/// Location of one array inside an output container, formatted as
/// `level_<LEVEL>/<YYYY>-<MM>/<t|h>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DatasetPath {
    pub level: Level,
    pub month: YearMonth,
    pub field: SeriesField,
}

impl DatasetPath {
    pub fn new(level: Level, month: YearMonth, field: SeriesField) -> Self {
        Self {
            level,
            month,
            field,
        }
    }

    /// Returns the group names from the root down to the dataset's parent.
    pub fn groups(&self) -> [String; 2] {
        [
            format!("level_{:04}", self.level.hpa()),
            self.month.to_string(),
        ]
    }

    pub fn name(&self) -> &'static str {
        self.field.name()
    }
}

impl Display for DatasetPath {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let [level, month] = self.groups();
        write!(f, "{level}/{month}/{}", self.name())
    }
}

/// An open hierarchical container.
pub trait Container {
    fn write_dataset(&mut self, path: &DatasetPath, values: &[f64]) -> Result<(), ExtractError>;

    /// Flushes and releases the container.
    fn close(self) -> Result<(), ExtractError>;
}

/// A kind of output container.
pub trait ContainerBackend: Sync {
    type Container: Container;

    fn extension(&self) -> &str;

    /// Creates a container at `path`, truncating any existing one.
    fn create(&self, path: &Path) -> Result<Self::Container, ExtractError>;

    /// Removes a container left incomplete by a failed write.
    fn discard(&self, path: &Path);
}

/// Writes each year's series into its own container.
#[derive(Debug, Clone)]
pub struct SeriesWriter<B> {
    backend: B,
    layout: OutputLayout,
}

impl<B: ContainerBackend> SeriesWriter<B> {
    pub fn new(backend: B, layout: OutputLayout) -> Self {
        Self { backend, layout }
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Writes every bucket of `series`, empty ones included, and returns the
    /// path of the container.
    ///
    /// On failure the partial container is released and discarded.
    pub fn write(&self, year: i32, series: &DrainedSeries) -> Result<PathBuf, ExtractError> {
        let path = self.layout.path_for(year, self.backend.extension());
        let mut container = self.backend.create(&path)?;
        let result = fill(&mut container, series).and_then(|()| container.close());
        if let Err(e) = result {
            self.backend.discard(&path);
            return Err(e);
        }
        Ok(path)
    }
}

fn fill<C: Container>(container: &mut C, series: &DrainedSeries) -> Result<(), ExtractError> {
    for (level, month, series) in series.iter() {
        let time_path = DatasetPath::new(level, month, SeriesField::Time);
        container.write_dataset(&time_path, series.times())?;
        let value_path = DatasetPath::new(level, month, SeriesField::Value);
        container.write_dataset(&value_path, series.values())?;
    }
    Ok(())
}

type Datasets = BTreeMap<String, Vec<f64>>;

/// Backend keeping containers in memory, keyed by their would-be paths.
///
/// Clones share the same storage.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    containers: Arc<Mutex<BTreeMap<PathBuf, Datasets>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the datasets of a closed container, keyed by dataset path.
    pub fn container(&self, path: &Path) -> Option<Datasets> {
        self.lock().get(path).cloned()
    }

    /// Returns the paths of all closed containers.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.lock().keys().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<PathBuf, Datasets>> {
        self.containers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl ContainerBackend for MemoryBackend {
    type Container = MemoryContainer;

    fn extension(&self) -> &str {
        "mem"
    }

    fn create(&self, path: &Path) -> Result<Self::Container, ExtractError> {
        self.lock().remove(path);
        Ok(MemoryContainer {
            path: path.to_owned(),
            datasets: Datasets::new(),
            backend: self.clone(),
        })
    }

    fn discard(&self, path: &Path) {
        self.lock().remove(path);
    }
}

#[derive(Debug)]
pub struct MemoryContainer {
    path: PathBuf,
    datasets: Datasets,
    backend: MemoryBackend,
}

impl Container for MemoryContainer {
    fn write_dataset(&mut self, path: &DatasetPath, values: &[f64]) -> Result<(), ExtractError> {
        let key = path.to_string();
        if self.datasets.contains_key(&key) {
            return Err(ExtractError::OutputWriteError(format!(
                "dataset already exists: {key}"
            )));
        }
        self.datasets.insert(key, values.to_vec());
        Ok(())
    }

    fn close(self) -> Result<(), ExtractError> {
        let Self {
            path,
            datasets,
            backend,
        } = self;
        backend.lock().insert(path, datasets);
        Ok(())
    }
}
