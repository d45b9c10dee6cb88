//! Integration tests for the gravida binary.
//!
//! These tests verify end-to-end behavior including:
//! - Profile editing and dashboard rendering
//! - Weight and meal logging workflows
//! - Chart export
//! - Data persistence, reset and recovery

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("gravida"))
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Pregnancy weight and calorie tracker",
        ));
}

#[test]
fn test_default_command_renders_dashboard() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("PREGNANCY DASHBOARD"))
        .stdout(predicate::str::contains("Daily target"));
}

#[test]
fn test_profile_set_and_show() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["profile", "set", "--height", "165", "--start-weight", "64"])
        .args(["--lmp", "2025-09-13"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile updated"));

    cli()
        .args(["profile", "show"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("LMP date:     2025-09-13"))
        .stdout(predicate::str::contains("Due date:     2026-06-20"));
}

#[test]
fn test_due_date_derives_lmp() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["profile", "set", "--due-date", "2026-06-20"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    cli()
        .args(["profile", "show"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("LMP date:     2025-09-13"));
}

#[test]
fn test_weight_add_shows_on_dashboard() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["weight", "add", "--value", "70.1", "--date", "2026-01-27"])
        .args(["--note", "morning, fasted"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Weight entry saved"))
        .stdout(predicate::str::contains("Current weight: 70.1 kg"))
        .stdout(predicate::str::contains("Total gain:     +6.1 kg"));

    // The persisted blob uses the fixed document layout
    let blob = fs::read_to_string(temp_dir.path().join("tracker.json")).unwrap();
    assert!(blob.contains("\"startWeight\""));
    assert!(blob.contains("\"type\":\"home\""));
}

#[test]
fn test_weight_list_newest_first_with_week_labels() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["profile", "set", "--lmp", "2025-09-13"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    for (value, date) in [("67.5", "2026-01-05"), ("70.1", "2026-01-27")] {
        cli()
            .args(["weight", "add", "--value", value, "--date", date])
            .arg("--data-dir")
            .arg(temp_dir.path())
            .assert()
            .success();
    }

    let output = cli()
        .args(["weight", "list"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("week 19"))
        .get_output()
        .stdout
        .clone();

    // Newest entry is printed first
    let text = String::from_utf8(output).unwrap();
    let first = text.find("2026-01-27").unwrap();
    let second = text.find("2026-01-05").unwrap();
    assert!(first < second);
}

#[test]
fn test_weight_rm_is_idempotent() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["weight", "add", "--value", "70.1", "--date", "2026-01-27"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    // Removing an id that was never allocated changes nothing
    cli()
        .args(["weight", "rm", "42"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No weight entry with id 42"));

    cli()
        .args(["weight", "list"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("70.1"));
}

#[test]
fn test_meal_add_and_daily_total() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["meal", "add", "--slot", "lunch", "--name", "beef noodles"])
        .args(["--calories", "550", "--date", "2026-01-27"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("550 kcal on 2026-01-27"));

    cli()
        .args(["meal", "add", "--slot", "snack", "--name", "yogurt"])
        .args(["--calories", "120", "--date", "2026-01-27"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    cli()
        .args(["meal", "list", "--date", "2026-01-27"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("beef noodles"))
        .stdout(predicate::str::contains("Total: 670 kcal"));

    // A different day has its own total
    cli()
        .args(["meal", "list", "--date", "2026-01-26"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 0 kcal"));
}

#[test]
fn test_invalid_date_is_rejected() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["weight", "add", "--value", "70.1", "--date", "not-a-date"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn test_chart_export_json() {
    let temp_dir = setup_test_dir();
    let out_path = temp_dir.path().join("chart.json");

    cli()
        .args(["profile", "set", "--lmp", "2025-09-13"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    cli()
        .args(["weight", "add", "--value", "70.1", "--date", "2026-01-27"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    cli()
        .args(["chart", "--format", "json", "--out"])
        .arg(&out_path)
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(json["max_guideline"]["points"].as_array().unwrap().len(), 41);
    assert_eq!(json["home"]["points"][0]["weight"], 70.1);
    assert_eq!(json["home"]["points"][0]["week"], 19);
}

#[test]
fn test_chart_export_csv_without_lmp_omits_guidelines() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["weight", "add", "--value", "70.1", "--date", "2026-01-27"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    cli()
        .args(["chart", "--format", "csv"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("series,date,week,weight"))
        .stdout(predicate::str::contains("Home,2026-01-27"))
        .stdout(predicate::str::contains("Recommended max").not());
}

#[test]
fn test_reset_requires_confirmation() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["weight", "add", "--value", "70.1", "--date", "2026-01-27"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    cli()
        .arg("reset")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("--yes"));

    // Entry survives the unconfirmed reset
    cli()
        .args(["weight", "list"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("70.1"));

    cli()
        .args(["reset", "--yes"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("All local data cleared"));

    cli()
        .args(["weight", "list"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No weight entries yet"));
}

#[test]
fn test_corrupt_state_file_recovers_to_defaults() {
    let temp_dir = setup_test_dir();
    fs::write(temp_dir.path().join("tracker.json"), "{ not json at all").unwrap();

    cli()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("PREGNANCY DASHBOARD"));
}

#[test]
fn test_sync_without_endpoint_fails_with_notice() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["sync", "--user", "u1"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No sync endpoint configured"));
}

#[test]
fn test_sync_unreachable_endpoint_leaves_local_data() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["weight", "add", "--value", "70.1", "--date", "2026-01-27"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    // Port 9 is discard/refused; the sync must fail softly
    cli()
        .args(["sync", "--user", "u1", "--endpoint", "http://127.0.0.1:9"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Local data is unchanged"));

    cli()
        .args(["weight", "list"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("70.1"));
}
