use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::CMD_NAME;

#[test]
fn list_help_names_the_target_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin(CMD_NAME)?;
    cmd.arg("list").arg("--help");
    cmd.assert()
        .success()
        .stdout(
            predicate::str::contains("List record headers contained in a GRIB2 file")
                .and(predicate::str::contains("<FILE>")),
        )
        .stderr(predicate::str::is_empty());

    Ok(())
}
