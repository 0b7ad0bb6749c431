//! End-to-end runs of the `printdesk` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const SCHEMA: &str = r#"{
    "student_name": [{"kind": "required"}, {"kind": "maxLength", "max": 60}],
    "student_email": [{"kind": "required"}, {"kind": "email"}]
}"#;

// Nothing listens on the discard port, so connecting fails immediately.
const DEAD_WEBDRIVER: &str = "http://127.0.0.1:9";

fn printdesk(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("printdesk").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn workspace(data: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("schema.json"), SCHEMA).unwrap();
    fs::write(dir.path().join("data.json"), data).unwrap();
    dir
}

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    printdesk(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("validate")
                .and(predicate::str::contains("theme"))
                .and(predicate::str::contains("health"))
                .and(predicate::str::contains("responsive")),
        );
}

#[test]
fn valid_form_exits_zero() {
    let dir = workspace(r#"{"student_name": "Ann", "student_email": "ann@example.edu"}"#);

    printdesk(dir.path())
        .args(["validate", "--schema", "schema.json", "--data", "data.json"])
        .assert()
        .success()
        .stdout("valid\n");
}

#[test]
fn invalid_form_lists_errors_and_exits_one() {
    let dir = workspace(r#"{"student_name": "", "student_email": "nope"}"#);

    printdesk(dir.path())
        .args(["validate", "--schema", "schema.json", "--data", "data.json"])
        .assert()
        .code(1)
        .stdout(
            predicate::str::contains("student_name: This field is required").and(
                predicate::str::contains("student_email: Please enter a valid email address"),
            ),
        );
}

#[test]
fn json_report() {
    let dir = workspace(r#"{"student_name": "Ann"}"#);

    let output = printdesk(dir.path())
        .args(["validate", "--schema", "schema.json", "--data", "data.json", "--json"])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["valid"], serde_json::json!(false));
    assert_eq!(
        report["errors"]["student_email"],
        serde_json::json!("This field is required")
    );
}

#[test]
fn unreadable_schema_is_an_error() {
    let dir = workspace("{}");

    printdesk(dir.path())
        .args(["validate", "--schema", "schema.yaml", "--data", "data.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("loading schema schema.yaml"));
}

#[test]
fn theme_prints_root_block() {
    let dir = TempDir::new().unwrap();

    printdesk(dir.path())
        .arg("theme")
        .assert()
        .success()
        .stdout(
            predicate::str::starts_with(":root {")
                .and(predicate::str::contains("--color-primary: #007AFF;"))
                .and(predicate::str::contains("--spacing-md: 16px;"))
                .and(predicate::str::contains("--radius-md: 12px;")),
        );
}

#[test]
fn theme_applies_overrides_and_writes_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("tokens.toml"),
        "[colors]\nsystem-blue = \"#0A84FF\"\n",
    )
    .unwrap();

    printdesk(dir.path())
        .args(["theme", "--tokens", "tokens.toml", "--out", "variables.css"])
        .assert()
        .success()
        .stdout("");

    let css = fs::read_to_string(dir.path().join("variables.css")).unwrap();
    assert!(css.contains("--color-primary: #0A84FF;"));
}

#[test]
fn theme_rejects_bad_color() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("tokens.json"), r#"{"colors": {"brand": "blue-ish"}}"#).unwrap();

    printdesk(dir.path())
        .args(["theme", "--tokens", "tokens.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("blue-ish"));
}

#[test]
fn health_without_browser_writes_failed_report() {
    let dir = TempDir::new().unwrap();

    printdesk(dir.path())
        .args(["health", "--webdriver", DEAD_WEBDRIVER])
        .assert()
        .code(1);

    let raw = fs::read_to_string(dir.path().join("health-report.json")).unwrap();
    let report: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(report["error"].is_string());
    assert_eq!(report["summary"]["overallHealthy"], serde_json::json!(false));
}

#[test]
fn responsive_without_browser_fails() {
    let dir = TempDir::new().unwrap();

    printdesk(dir.path())
        .args(["responsive", "--webdriver", DEAD_WEBDRIVER])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot start browser session"));

    assert!(!dir.path().join("test-results.json").exists());
}

#[test]
fn webdriver_url_from_config_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("printdesk.toml"),
        format!("webdriver_url = \"{DEAD_WEBDRIVER}\"\n"),
    )
    .unwrap();

    printdesk(dir.path())
        .arg("responsive")
        .assert()
        .failure()
        .stderr(predicate::str::contains(DEAD_WEBDRIVER));
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = TempDir::new().unwrap();

    printdesk(dir.path())
        .args(["--config", "nope.toml", "health"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}
