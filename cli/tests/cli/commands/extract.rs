use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::{utils, CMD_NAME};

#[test]
fn missing_archive_file() -> Result<(), Box<dyn std::error::Error>> {
    let input = TempDir::new()?;
    let output = TempDir::new()?;
    utils::put_archive_file(input.path(), 2007, 1, b"")?;

    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.arg("extract")
        .arg("--input-root")
        .arg(input.path())
        .arg("--output-dir")
        .arg(output.path())
        .args(["--years", "2006"]);
    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(
            predicate::str::contains("error: no archive file matches '")
                .and(predicate::str::contains("2006/A*-200601.pgb.f00")),
        );
    assert!(!output.path().join("test_2006.h5").exists());

    Ok(())
}

#[test]
fn unreadable_archive_file() -> Result<(), Box<dyn std::error::Error>> {
    let input = TempDir::new()?;
    let output = TempDir::new()?;
    let path = utils::put_archive_file(input.path(), 2006, 1, b"not a GRIB2 message")?;

    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.arg("extract")
        .arg("--input-root")
        .arg(input.path())
        .arg("--output-dir")
        .arg(output.path())
        .args(["--years", "2006"]);
    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(
            predicate::str::contains("error: read error: ")
                .and(predicate::str::contains(format!("{}", path.display()))),
        );
    assert!(!output.path().join("test_2006.h5").exists());

    Ok(())
}

#[test]
fn empty_archive_file() -> Result<(), Box<dyn std::error::Error>> {
    let input = TempDir::new()?;
    let output = TempDir::new()?;
    let path = utils::put_archive_file(input.path(), 2006, 1, b"")?;

    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.arg("extract")
        .arg("--input-root")
        .arg(input.path())
        .arg("--output-dir")
        .arg(output.path())
        .args(["--years", "2006"]);
    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(
            predicate::str::contains("error: read error: ")
                .and(predicate::str::contains(format!("{}", path.display())))
                .and(predicate::str::contains("no GRIB2 message found")),
        );
    assert!(!output.path().join("test_2006.h5").exists());

    Ok(())
}

macro_rules! test_invalid_options {
    ($(($name:ident, $args:expr, $stderr:expr),)*) => ($(
        #[test]
        fn $name() -> Result<(), Box<dyn std::error::Error>> {
            let input = TempDir::new()?;
            let output = TempDir::new()?;
            let output_dir = output.path().join("out");

            let mut cmd = Command::cargo_bin(CMD_NAME)?;
            cmd.arg("extract")
                .arg("--input-root")
                .arg(input.path())
                .arg("--output-dir")
                .arg(&output_dir)
                .args($args);
            cmd.assert()
                .failure()
                .stdout(predicate::str::is_empty())
                .stderr(predicate::str::contains($stderr));
            assert!(!output_dir.exists());

            Ok(())
        }
    )*);
}

test_invalid_options! {
    (
        extract_with_zero_width,
        ["--width", "0,5.1"],
        "error: invalid selection criteria: window widths must be positive"
    ),
    (
        extract_with_negative_width,
        ["--width", "-1,5.1"],
        "error: invalid selection criteria: window widths must be positive"
    ),
    (
        extract_with_reversed_years,
        ["--years", "2013-2006"],
        "error: invalid selection criteria: year range is reversed: 2013-2006"
    ),
    (
        extract_with_malformed_center,
        ["--center", "290.7"],
        "error: pair must be specified as 'X,Y'"
    ),
    (
        extract_with_malformed_years,
        ["--years", "06-13"],
        "error: years must be specified as 'YYYY' or 'YYYY-YYYY'"
    ),
    (
        extract_with_malformed_epoch,
        ["--epoch", "yesterday"],
        "error: date must be specified as"
    ),
    (
        extract_with_unknown_policy,
        ["--on-empty-selection", "ignore"],
        "invalid value 'ignore'"
    ),
    (
        extract_with_zero_jobs,
        ["--jobs", "0"],
        "invalid value '0'"
    ),
    (
        extract_with_non_numeric_level,
        ["--levels", "850,high"],
        "invalid value 'high'"
    ),
}
