use std::path::Path;

use hdf5::{File, Group};

use crate::{
    error::ExtractError,
    writer::{Container, ContainerBackend, DatasetPath},
};

impl From<hdf5::Error> for ExtractError {
    fn from(e: hdf5::Error) -> Self {
        Self::OutputWriteError(e.to_string())
    }
}

/// Writes containers as HDF5 files.
#[derive(Debug, Default, Clone, Copy)]
pub struct Hdf5Backend;

impl ContainerBackend for Hdf5Backend {
    type Container = Hdf5Container;

    fn extension(&self) -> &str {
        "h5"
    }

    fn create(&self, path: &Path) -> Result<Self::Container, ExtractError> {
        let file = File::create(path)?;
        Ok(Hdf5Container { file })
    }

    fn discard(&self, path: &Path) {
        if let Err(e) = std::fs::remove_file(path) {
            log::warn!("failed to remove {}: {e}", path.display());
        }
    }
}

pub struct Hdf5Container {
    file: File,
}

impl Hdf5Container {
    fn parent(&self, path: &DatasetPath) -> Result<Group, ExtractError> {
        let [level, month] = path.groups();
        let level = open_or_create_group(&self.file, &level)?;
        open_or_create_group(&level, &month)
    }
}

fn open_or_create_group(parent: &Group, name: &str) -> Result<Group, ExtractError> {
    let group = if parent.link_exists(name) {
        parent.group(name)?
    } else {
        parent.create_group(name)?
    };
    Ok(group)
}

impl Container for Hdf5Container {
    fn write_dataset(&mut self, path: &DatasetPath, values: &[f64]) -> Result<(), ExtractError> {
        let group = self.parent(path)?;
        let dataset = group
            .new_dataset::<f64>()
            .shape(values.len())
            .create(path.name())?;
        // zero-length datasets are created but never written
        if !values.is_empty() {
            dataset.write(values)?;
        }
        Ok(())
    }

    fn close(self) -> Result<(), ExtractError> {
        self.file.flush()?;
        self.file.close()?;
        Ok(())
    }
}
