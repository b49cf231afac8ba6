use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

/// Creates `<root>/<YYYY>/A1-<YYYY><MM>.pgb.f00` holding `content`.
pub(crate) fn put_archive_file(
    root: &Path,
    year: i32,
    month: u32,
    content: &[u8],
) -> Result<PathBuf, io::Error> {
    let dir = root.join(format!("{year:04}"));
    fs::create_dir_all(&dir)?;
    let path = dir.join(format!("A1-{year:04}{month:02}.pgb.f00"));
    let mut f = File::create(&path)?;
    f.write_all(content)?;
    Ok(path)
}

pub(crate) fn non_grib_file() -> Result<NamedTempFile, io::Error> {
    let mut f = NamedTempFile::new()?;
    f.write_all(b"this is not a GRIB2 message\n")?;
    Ok(f)
}
