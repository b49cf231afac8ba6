use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::{utils, CMD_NAME};

macro_rules! test_subcommands_without_args {
    ($(($name:ident, $str:expr),)*) => ($(
        #[test]
        fn $name() -> Result<(), Box<dyn std::error::Error>> {
            let mut cmd = Command::cargo_bin(CMD_NAME)?;
            cmd.arg($str);
            cmd.assert()
                .failure()
                .stdout(predicate::str::is_empty())
                .stderr(
                    predicate::str::starts_with(
                        "error: the following required arguments were not provided:",
                    )
                        .and(predicate::str::contains("Usage:"))
                        .and(predicate::str::contains("Commands:").not()),
                );

            Ok(())
        }
    )*);
}

test_subcommands_without_args! {
    (completions_without_args, "completions"),
    (extract_without_args, "extract"),
    (list_without_args, "list"),
}

#[test]
fn list_with_nonexisting_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let file_path = dir.path().join("nosuchfile");

    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.arg("list").arg(&file_path);
    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with("error: read error: "));

    Ok(())
}

#[test]
fn list_with_non_grib_file() -> Result<(), Box<dyn std::error::Error>> {
    let input = utils::non_grib_file()?;

    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.arg("list").arg(input.path());
    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(
            predicate::str::starts_with("error: read error: ")
                .and(predicate::str::contains(format!("{}", input.path().display()))),
        );

    Ok(())
}

#[test]
fn completions_for_bash() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.arg("completions").arg("bash");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("_gribseries()").and(predicate::str::contains("extract")))
        .stderr(predicate::str::is_empty());

    Ok(())
}
