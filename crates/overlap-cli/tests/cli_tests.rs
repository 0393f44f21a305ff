//! Integration tests for the `overlap` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the common, group
//! and participants subcommands through the actual binary, including
//! stdin/stdout piping, file I/O, output formats and error handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// Helper: path to the availability.json fixture.
fn fixture_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/availability.json")
}

fn overlap() -> Command {
    let mut cmd = Command::cargo_bin("overlap").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout must be valid JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// common
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn common_from_file_reports_slots_and_rejections() {
    let report = stdout_json(overlap().args(["common", "-i", fixture_path()]));

    let slots: Vec<String> = report["slots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| {
            format!(
                "{} {}-{} {}",
                s["date"].as_str().unwrap(),
                s["start_time"].as_str().unwrap(),
                s["end_time"].as_str().unwrap(),
                s["participants"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|p| p.as_str().unwrap())
                    .collect::<Vec<_>>()
                    .join(",")
            )
        })
        .collect();
    assert_eq!(
        slots,
        vec![
            "2025-06-01 09:00-10:00 Alice,Bob",
            "2025-06-01 10:00-11:00 Alice,Carol",
            "2025-06-02 14:00-14:30 Alice,Dave",
            "2025-06-02 14:30-15:00 Alice,Bob,Dave",
        ]
    );

    assert_eq!(report["rejected"].as_array().unwrap().len(), 1);
    assert_eq!(report["rejected"][0]["id"], "x1");
    assert_eq!(
        report["participants"],
        serde_json::json!(["Alice", "Bob", "Carol", "Dave"])
    );
}

#[test]
fn common_from_stdin() {
    let input = r#"[
        {"participantName": "Alice", "date": "2025-06-01", "startTime": "09:00", "endTime": "10:00"},
        {"participantName": "Bob", "date": "2025-06-01", "startTime": "09:30", "endTime": "10:30"}
    ]"#;

    let report = stdout_json(overlap().arg("common").write_stdin(input));

    assert_eq!(report["slots"][0]["start_time"], "09:30");
    assert_eq!(report["slots"][0]["end_time"], "10:00");
    assert_eq!(report["slots"][0]["duration_minutes"], 30);
}

#[test]
fn common_accepts_wrapped_meeting_payload() {
    let input = r#"{"meeting": {"id": "m1", "title": "Standup"}, "availability": [
        {"participant_name": "Alice", "available_date": "2025-06-01", "start_time": "09:00", "end_time": "10:00"},
        {"participant_name": "Bob", "available_date": "2025-06-01", "start_time": "09:00", "end_time": "10:00"}
    ]}"#;

    let report = stdout_json(overlap().arg("common").write_stdin(input));

    assert_eq!(report["slots"].as_array().unwrap().len(), 1);
}

#[test]
fn common_min_participants_filters_slots() {
    let report = stdout_json(overlap().args([
        "common",
        "-i",
        fixture_path(),
        "--min-participants",
        "3",
    ]));

    let slots = report["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0]["start_time"], "14:30");
}

#[test]
fn common_min_duration_filters_slots() {
    let report = stdout_json(overlap().args(["common", "-i", fixture_path(), "--min-duration", "45"]));

    assert_eq!(report["slots"].as_array().unwrap().len(), 2);
}

#[test]
fn common_top_keeps_best_slot() {
    let report = stdout_json(overlap().args(["common", "-i", fixture_path(), "--top", "1"]));

    let slots = report["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0]["participants"], serde_json::json!(["Alice", "Bob", "Dave"]));
}

#[test]
fn common_text_format() {
    overlap()
        .args(["common", "-i", fixture_path(), "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "2025-06-01  9:00 AM - 10:00 AM  (60 min)  Alice, Bob",
        ))
        .stdout(predicate::str::contains(
            "2025-06-02  2:30 PM - 3:00 PM  (30 min)  Alice, Bob, Dave",
        ));
}

#[test]
fn common_text_format_with_no_overlap() {
    overlap()
        .args(["common", "--format", "text"])
        .write_stdin("[]")
        .assert()
        .success()
        .stdout("No common availability found.\n");
}

#[test]
fn common_warns_about_malformed_records_on_stderr() {
    overlap()
        .args(["common", "-i", fixture_path()])
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping malformed availability record"));
}

#[test]
fn common_writes_output_file() {
    let output_path = std::env::temp_dir().join("overlap-test-common-output.json");
    let _ = std::fs::remove_file(&output_path);

    overlap()
        .args(["common", "-i", fixture_path(), "-o"])
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    let report: Value = serde_json::from_str(&content).unwrap();
    assert_eq!(report["slots"].as_array().unwrap().len(), 4);

    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn common_pretty_output_is_indented() {
    overlap()
        .args(["common", "-i", fixture_path(), "--pretty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\n  \"slots\": ["));
}

// ─────────────────────────────────────────────────────────────────────────────
// group
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn group_json_orders_dates_and_start_times() {
    let groups = stdout_json(overlap().args(["group", "-i", fixture_path()]));

    let dates: Vec<&String> = groups.as_object().unwrap().keys().collect();
    assert_eq!(dates, vec!["2025-06-01", "2025-06-02"]);

    let ids: Vec<&str> = groups["2025-06-02"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["d1", "a2", "b2", "x1"]);
}

#[test]
fn group_text_format() {
    overlap()
        .args(["group", "-i", fixture_path(), "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("2025-06-01\n  9:00 AM - 10:00 AM  Bob\n"))
        .stdout(predicate::str::contains("  1:00 PM - 4:00 PM  Dave"));
}

// ─────────────────────────────────────────────────────────────────────────────
// participants
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn participants_lists_distinct_names() {
    overlap()
        .args(["participants", "-i", fixture_path()])
        .assert()
        .success()
        .stdout("Alice\nBob\nCarol\nDave\nErin\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn invalid_json_fails() {
    overlap()
        .arg("common")
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse availability records"));
}

#[test]
fn missing_input_file_fails() {
    overlap()
        .args(["common", "-i", "/nonexistent/availability.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn unknown_format_is_rejected() {
    overlap()
        .args(["common", "--format", "yaml"])
        .write_stdin("[]")
        .assert()
        .failure();
}

#[test]
fn no_subcommand_is_an_error() {
    overlap().assert().failure();
}
