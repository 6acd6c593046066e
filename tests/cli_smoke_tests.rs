mod common;

use assert_cmd::Command;
use assert_fs::{prelude::*, TempDir};
use predicates::prelude::*;
use std::error::Error;

fn cli(home: &TempDir) -> Result<Command, Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("spendgrid_cli")?;
    cmd.env("SPENDGRID_HOME", home.path()).env_remove("RUST_LOG");
    Ok(cmd)
}

#[test]
fn overview_prints_remaining_slice() -> Result<(), Box<dyn Error>> {
    let (dir, path) = common::fixture("transactions.json", common::DASHBOARD_JSON);
    cli(&dir)?
        .arg("overview")
        .arg(&path)
        .arg("--plain")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Remaining")
                .and(predicate::str::contains("$150.00"))
                .and(predicate::str::contains("Rent")),
        );
    Ok(())
}

#[test]
fn heatmap_json_reads_stdin() -> Result<(), Box<dyn Error>> {
    let home = TempDir::new()?;
    cli(&home)?
        .args(["heatmap", "-", "--json"])
        .write_stdin(r#"[{"date": "2023-10-27", "amount": 40, "type": "expense"}]"#)
        .assert()
        .success()
        .stdout(
            predicate::str::contains(r#""kind": "day""#)
                .and(predicate::str::contains(r#""date": "2023-10-27""#))
                .and(predicate::str::contains(r#""level": "critical""#))
                .and(predicate::str::contains(r#""kind": "pad""#).not()),
        );
    Ok(())
}

#[test]
fn config_file_overrides_labels() -> Result<(), Box<dyn Error>> {
    let (dir, path) = common::fixture("transactions.json", common::DASHBOARD_JSON);
    let config = dir.child("chart.json");
    config.write_str(r#"{"labels": {"overspend": "Over budget"}, "currency": "EUR"}"#)?;
    cli(&dir)?
        .arg("overview")
        .arg(&path)
        .args(["--remaining", "-75", "--config"])
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Over budget").and(predicate::str::contains("€75.00")));
    Ok(())
}

#[test]
fn config_locale_changes_number_separators() -> Result<(), Box<dyn Error>> {
    let (dir, path) = common::fixture("transactions.json", common::DASHBOARD_JSON);
    let config = dir.child("chart.json");
    config.write_str(r#"{"locale": "de-DE"}"#)?;
    cli(&dir)?
        .arg("overview")
        .arg(&path)
        .args(["--plain", "--config"])
        .arg(config.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("$1.200,00")
                .and(predicate::str::contains("$150,00"))
                .and(predicate::str::contains("$1,200.00").not()),
        );
    Ok(())
}

#[test]
fn flow_groups_by_month() -> Result<(), Box<dyn Error>> {
    let (dir, path) = common::fixture("transactions.json", common::DASHBOARD_JSON);
    cli(&dir)?
        .arg("flow")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Oct 2023").and(predicate::str::contains("$1,430.00")));
    Ok(())
}

#[test]
fn empty_palette_in_config_fails() -> Result<(), Box<dyn Error>> {
    let (dir, path) = common::fixture("transactions.json", common::DASHBOARD_JSON);
    dir.child("config").create_dir_all()?;
    dir.child("config/config.json")
        .write_str(r#"{"palette": []}"#)?;
    cli(&dir)?
        .arg("pie")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Chart error"));
    Ok(())
}

#[test]
fn unknown_command_fails() -> Result<(), Box<dyn Error>> {
    let home = TempDir::new()?;
    cli(&home)?
        .arg("chart")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Invalid input: unknown command `chart`"));
    Ok(())
}

#[test]
fn version_reports_package_version() -> Result<(), Box<dyn Error>> {
    let home = TempDir::new()?;
    cli(&home)?
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "spendgrid_cli {}",
            env!("CARGO_PKG_VERSION")
        )));
    Ok(())
}
