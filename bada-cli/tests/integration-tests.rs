use std::process::Command;

use assert_cmd::prelude::{CommandCargoExt, OutputAssertExt};
use predicates::prelude::predicate;

#[test]
fn test_that_cli_app_produces_result() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("bada-cli")?;
    cmd.args([
        "--icao", "A320", "--alt-ft", "35000", "--tas-kts", "460", "--mass-kg", "62000",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"configuration\":\"Clean\""))
        .stdout(predicate::str::contains("\"max_speed_kts\":350.0"));

    Ok(())
}

#[test]
fn test_that_cli_app_reads_coefficient_dir() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("bada-cli")?;
    let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../bada-core/resources");
    cmd.args([
        "--icao",
        "P28B",
        "--alt-ft",
        "5000",
        "--tas-kts",
        "110",
        "--vertical-mode",
        "Climb",
        "--speed-mode",
        "ConstantCas",
        "--flight-phase",
        "Climb",
        "--coefficient-dir",
        dir,
        "--res-fmt",
        "yaml",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("icao: P28B"))
        .stdout(predicate::str::contains("max_mach: 0.24"));

    Ok(())
}

#[test]
fn test_that_unknown_type_fails() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("bada-cli")?;
    cmd.args(["--icao", "ZZZZ", "--alt-ft", "1000", "--tas-kts", "100"]);
    cmd.assert().failure();

    let mut cmd = Command::cargo_bin("bada-cli")?;
    cmd.args([
        "--icao", "A320", "--alt-ft", "1000", "--tas-kts", "100", "--speed-mode", "Hover",
    ]);
    cmd.assert().failure();

    let mut cmd = Command::cargo_bin("bada-cli")?;
    cmd.args([
        "--icao", "A320", "--alt-ft", "1000", "--tas-kts", "100", "--res-fmt", "csv",
    ]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported format"));

    Ok(())
}
