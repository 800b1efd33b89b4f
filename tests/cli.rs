use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::path::PathBuf;

/// Helper to get a temporary home directory
fn temp_home_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Helper to get config file path in the temp dir
fn config_file_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join(".propdeck").join("config.json")
}

const BINARY_NAME: &str = "propdeck";

fn propdeck(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.env("HOME", home.path()) // simulate different $HOME
        .env_remove("PROPDECK_ENVIRONMENT");
    cmd
}

#[test]
/// Help command should display usage information.
fn cli_help_displays_usage() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(contains("Usage"))
        .stdout(contains("set-property"));
}

#[test]
fn properties_lists_every_property() {
    let tmp = temp_home_dir();
    propdeck(&tmp)
        .arg("properties")
        .assert()
        .success()
        .stdout(contains("Harbor House"))
        .stdout(contains("Northstar Hub"));
}

#[test]
/// set-property stores the canonical name and properties marks it.
fn set_property_writes_config_file() {
    let tmp = temp_home_dir();
    let config_path = config_file_path(&tmp);
    assert!(!config_path.exists());

    propdeck(&tmp)
        .args(["set-property", "cedar loft"])
        .assert()
        .success()
        .stdout(contains("Default property saved"));

    let saved = fs::read_to_string(&config_path).unwrap();
    assert!(saved.contains("Cedar Loft"));

    propdeck(&tmp)
        .arg("properties")
        .assert()
        .success()
        .stdout(contains("Cedar Loft (default)"));
}

#[test]
fn set_property_rejects_unknown_name() {
    let tmp = temp_home_dir();
    propdeck(&tmp)
        .args(["set-property", "Atlantis"])
        .assert()
        .failure()
        .stderr(contains("Unknown property"));
    assert!(!config_file_path(&tmp).exists());
}

#[test]
/// reset-config should delete an existing config file.
fn reset_config_deletes_config_file() {
    let tmp = temp_home_dir();
    let config_path = config_file_path(&tmp);
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(&config_path, "{}").unwrap();

    // Ensure the file exists
    assert!(config_path.exists());

    propdeck(&tmp)
        .arg("reset-config")
        .assert()
        .success()
        .stdout(contains("Clearing configuration file"));

    // Confirm the file was deleted
    assert!(!config_path.exists());
}

#[test]
fn reset_config_without_file_succeeds() {
    let tmp = temp_home_dir();
    propdeck(&tmp).arg("reset-config").assert().success();
}

#[test]
/// Headless login against the simulator: a bad number, then a good one.
fn headless_login_reports_errors_then_signs_in() {
    let tmp = temp_home_dir();
    propdeck(&tmp)
        .args(["login", "--latency-ms", "0"])
        .write_stdin("123\n9876543210\n123456\n")
        .assert()
        .success()
        .stdout(contains("Please enter a valid 10-digit phone number"))
        .stdout(contains("OTP sent to ******3210"))
        .stdout(contains("Signed in via propdeck-simulator"));
}

#[test]
fn headless_login_rejects_incomplete_code() {
    let tmp = temp_home_dir();
    propdeck(&tmp)
        .args(["login", "--latency-ms", "0"])
        .write_stdin("9876543210\n123\n123456\n")
        .assert()
        .success()
        .stdout(contains("Please enter the complete 6-digit OTP"))
        .stdout(contains("Signed in"));
}

#[test]
fn headless_login_fails_when_input_ends() {
    let tmp = temp_home_dir();
    propdeck(&tmp)
        .args(["login", "--latency-ms", "0"])
        .write_stdin("9876543210\n")
        .assert()
        .failure()
        .stderr(contains("stdin closed"));
}

#[test]
fn unknown_environment_is_rejected() {
    let tmp = temp_home_dir();
    propdeck(&tmp)
        .args(["login", "--environment", "moon"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(contains("Unknown environment"));
}
