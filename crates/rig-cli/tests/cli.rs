//! End-to-end tests for the `rigwatch` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const HEADER: &str = "YYYY/MM/DD,HH:MM:SS,Rate Of Penetration (ft_per_hr),\
PLC ROP (ft_per_hr),Hook Load (klbs),Standpipe Pressure (psi),Pump 1 strokes/min (SPM),\
Pump 2 strokes/min (SPM),DAS Vibe Lateral Max (g_force),DAS Vibe Axial Max (g_force),\
AutoDriller Limiting (unitless),DAS Vibe WOB Reduce (percent),DAS Vibe RPM Reduce (percent)";

const SCENARIO: &str = "01/15/2024,10:00:00,10,10,30,2600,5,5,10,1.5,0,0,0\n\
01/15/2024,10:01:00,0.5,0.5,65,2600,0,0,10,1.5,0,0,0\n\
01/15/2024,10:02:00,0.5,0.5,65,2600,0,0,30,1.5,0,0,0\n";

fn rigwatch(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rigwatch").expect("binary built");
    cmd.current_dir(dir)
        .env_remove("RIGWATCH_FORMAT")
        .env_remove("RIGWATCH_OUTPUT");
    cmd
}

fn write_input(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("well.csv");
    fs::write(&path, format!("{HEADER}\n{body}")).expect("write input");
    path
}

#[test]
fn analyze_writes_processed_data() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(&dir, SCENARIO);

    rigwatch(dir.path())
        .arg("analyze")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Possible stuck pipe."))
        .stdout(predicate::str::contains("Excessive lateral vibration detected (>25g)."))
        .stdout(predicate::str::contains("processed_data.csv"));

    let export = fs::read_to_string(dir.path().join("processed_data.csv")).expect("export");
    let mut lines = export.lines();
    let header = lines.next().expect("header row");
    assert!(header.starts_with("Timestamp,"));
    assert!(header.ends_with(",ROP_change"));
    assert_eq!(lines.next().map(|l| l.starts_with("2024-01-15 10:00:00,")), Some(true));
    assert_eq!(export.lines().count(), 4);
}

#[test]
fn output_flag_and_env_choose_destination() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(&dir, SCENARIO);

    rigwatch(dir.path())
        .arg("analyze")
        .arg(&input)
        .args(["--output", "flag.csv"])
        .assert()
        .success();
    assert!(dir.path().join("flag.csv").exists());

    rigwatch(dir.path())
        .env("RIGWATCH_OUTPUT", "env.csv")
        .arg("analyze")
        .arg(&input)
        .assert()
        .success();
    assert!(dir.path().join("env.csv").exists());
    assert!(!dir.path().join("processed_data.csv").exists());
}

#[test]
fn no_export_leaves_no_file() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(&dir, SCENARIO);

    rigwatch(dir.path())
        .arg("analyze")
        .arg(&input)
        .arg("--no-export")
        .assert()
        .success();
    assert!(!dir.path().join("processed_data.csv").exists());
}

#[test]
fn missing_column_fails_and_names_it() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("broken.csv");
    let header = HEADER.replace(",Hook Load (klbs)", "");
    fs::write(&path, format!("{header}\n01/15/2024,10:00:00,10,10,2600,5,5,10,1.5,0,0,0\n"))
        .expect("write input");

    rigwatch(dir.path())
        .arg("analyze")
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: missing required column(s): Hook Load (klbs)"));
    assert!(!dir.path().join("processed_data.csv").exists());
}

#[test]
fn bad_timestamp_fails() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(&dir, "2024-01-15,10:00:00,10,10,30,2600,5,5,10,1.5,0,0,0\n");

    rigwatch(dir.path())
        .arg("analyze")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot parse timestamp"));
}

#[test]
fn nan_reading_is_rejected_without_export() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(&dir, "01/15/2024,10:00:00,10,10,NaN,2600,5,5,10,1.5,0,0,0\n");

    rigwatch(dir.path())
        .arg("analyze")
        .arg(&input)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("missing value for column 'Hook Load (klbs)'"));
    assert!(!dir.path().join("processed_data.csv").exists());
}

#[test]
fn oversized_input_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(&dir, SCENARIO);

    rigwatch(dir.path())
        .arg("analyze")
        .arg(&input)
        .args(["--max-input-bytes", "64"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("byte limit"));
}

#[test]
fn json_output_parses() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(&dir, SCENARIO);

    let output = rigwatch(dir.path())
        .args(["--format", "json", "analyze"])
        .arg(&input)
        .arg("--no-export")
        .output()
        .expect("run");
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(report["rows"], 3);
    let rules: Vec<&str> = report["alerts"]["records"]
        .as_array()
        .expect("records")
        .iter()
        .filter_map(|r| r["rule"].as_str())
        .collect();
    assert_eq!(rules, vec!["stuck_pipe", "lateral_vibration"]);
    assert_eq!(report["alerts"]["records"][0]["first_triggered_at"], "2024-01-15T10:01:00");
}

#[test]
fn header_only_input_reports_no_data() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(&dir, "");

    rigwatch(dir.path())
        .arg("analyze")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("No data"));
}

#[test]
fn overlay_adds_panel_and_columns() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(&dir, SCENARIO);

    rigwatch(dir.path())
        .arg("analyze")
        .arg(&input)
        .arg("--overlay")
        .assert()
        .success()
        .stdout(predicate::str::contains("Shaker Overlay"));

    let export = fs::read_to_string(dir.path().join("processed_data.csv")).expect("export");
    let header = export.lines().next().expect("header row");
    assert!(header.ends_with("Overload Risk (percent)"));
}

#[test]
fn rules_lists_all_rules() {
    let dir = TempDir::new().expect("tempdir");

    rigwatch(dir.path())
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("rop_volatility"))
        .stdout(predicate::str::contains("vibration_mitigation"));
}
