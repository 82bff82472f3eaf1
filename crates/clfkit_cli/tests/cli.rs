//! End-to-end tests for the `clfkit` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

const REPORT_OK: &str = r#"{
    "cat": {"precision": 1.0, "recall": 1.0, "f1-score": 1.0, "support": 2},
    "dog": {"precision": 0.5, "recall": 0.5, "f1-score": 0.5, "support": 2},
    "accuracy": 0.75,
    "macro avg": {"precision": 0.75, "recall": 0.75, "f1-score": 0.75, "support": 4},
    "weighted avg": {"precision": 0.75, "recall": 0.75, "f1-score": 0.75, "support": 4}
}"#;

fn write_report(dir: &Path, name: &str, body: &str) {
    fs::write(dir.join(name), body).unwrap();
}

fn clfkit() -> Command {
    Command::cargo_bin("clfkit").unwrap()
}

#[test]
fn converts_a_directory_of_reports_alongside_inputs() {
    let dir = tempfile::tempdir().unwrap();
    write_report(dir.path(), "run_a.json", REPORT_OK);

    clfkit()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[XLSX]"))
        .stdout(predicate::str::contains("converted=1"));

    assert!(dir.path().join("run_a.xlsx").is_file());
}

#[test]
fn writes_per_report_workbooks_into_the_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    let dir_out = dir.path().join("out");
    write_report(dir.path(), "run_a.json", REPORT_OK);

    clfkit()
        .arg(dir.path())
        .arg("--out-dir")
        .arg(&dir_out)
        .assert()
        .success();

    assert!(dir_out.join("run_a.xlsx").is_file());
    assert!(!dir.path().join("run_a.xlsx").exists());
}

#[test]
fn merged_mode_writes_a_single_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let path_merged = dir.path().join("merged.xlsx");
    write_report(dir.path(), "run_a.json", REPORT_OK);
    write_report(dir.path(), "run_b.json", REPORT_OK);

    clfkit()
        .arg(dir.path())
        .arg("--merged")
        .arg(&path_merged)
        .assert()
        .success()
        .stdout(predicate::str::contains("converted=2"));

    assert!(path_merged.is_file());
    assert!(!dir.path().join("run_a.xlsx").exists());
}

#[test]
fn malformed_report_sets_a_nonzero_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    write_report(dir.path(), "bad.json", r#"{"cat": {"precision": 1.0}}"#);

    clfkit()
        .arg(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("errors=1"));
}

#[test]
fn keep_going_converts_remaining_files_after_a_failure() {
    let dir = tempfile::tempdir().unwrap();
    write_report(dir.path(), "a_bad.json", "{ not json");
    write_report(dir.path(), "b_good.json", REPORT_OK);

    clfkit()
        .arg(dir.path())
        .arg("--keep-going")
        .assert()
        .failure()
        .stdout(predicate::str::contains("converted=1"));

    assert!(dir.path().join("b_good.xlsx").is_file());
}

#[test]
fn missing_report_directory_is_a_setup_error() {
    let dir = tempfile::tempdir().unwrap();

    clfkit()
        .arg(dir.path().join("absent"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Report directory not found"));
}

#[test]
fn quiet_mode_suppresses_the_run_summary() {
    let dir = tempfile::tempdir().unwrap();
    write_report(dir.path(), "run_a.json", REPORT_OK);

    clfkit()
        .arg(dir.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
