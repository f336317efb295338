//! Tests for error handling, exit codes and suggestions.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn liftoff(temp: &TempDir) -> Command {
    let home = temp.path().join("home");
    fs::create_dir_all(&home).unwrap();

    let mut cmd = Command::cargo_bin("liftoff").unwrap();
    cmd.current_dir(temp.path())
        .env("HOME", &home)
        .env("NO_COLOR", "1")
        .env_remove("LIFTOFF_TEMPLATES_DIR");
    cmd
}

#[test]
fn test_error_invalid_project_name() {
    let temp = TempDir::new().unwrap();
    liftoff(&temp)
        .args(["new", ".hidden", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid project name"))
        .stderr(predicate::str::contains("Suggestions:"));
}

#[test]
fn test_error_missing_project_name() {
    let temp = TempDir::new().unwrap();
    liftoff(&temp)
        .args(["new", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("project_name"));
}

#[test]
fn test_error_unknown_argument() {
    let temp = TempDir::new().unwrap();
    liftoff(&temp)
        .args(["new", "Weather", "--lang", "rust"])
        .assert()
        .code(2);
}

#[test]
fn test_error_missing_config_file() {
    let temp = TempDir::new().unwrap();
    liftoff(&temp)
        .args(["--config", "absent.yml", "config", "show"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("absent.yml"));
}

#[test]
fn test_error_malformed_settings() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(".liftoffrc"), "directories: 42\n").unwrap();

    liftoff(&temp)
        .args(["new", "Weather", "--yes"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Invalid settings"));
}

#[test]
fn test_error_unknown_template_names_node() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".liftoffrc"),
        "directories:\n  - Sources:\n      - Widget.swift\n",
    )
    .unwrap();

    liftoff(&temp)
        .args(["new", "Weather", "--yes"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Template not found: Widget.swift"))
        .stderr(predicate::str::contains("Sources/Widget.swift"));

    // Work done before the failure stays; the descriptor is never written.
    assert!(temp.path().join("Sources/.gitkeep").is_file());
    assert!(!temp.path().join("Weather.xcodeproj").exists());
}

#[test]
fn test_error_undefined_binding_in_directory_name() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".liftoffrc"),
        "directories:\n  - \"<%= flavour %>\":\n",
    )
    .unwrap();

    liftoff(&temp)
        .args(["new", "Weather", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to render"));
}

#[test]
fn test_error_quiet_still_reports() {
    let temp = TempDir::new().unwrap();
    liftoff(&temp)
        .args(["-q", "new", ".hidden"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error:"));
}
