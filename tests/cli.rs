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
    dir.path().join(".listings-dashboard").join("config.json")
}

const BINARY_NAME: &str = "listings-dashboard";

/// Nothing listens on the discard port, so requests fail fast.
const DEAD_BACKEND: &str = "http://127.0.0.1:9";

fn command(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.env("HOME", home.path()) // simulate different $HOME
        .env_remove("LISTINGS_BACKEND_URL");
    cmd
}

#[test]
/// Help command should list the subcommands.
fn cli_help_displays_usage() {
    let home = temp_home_dir();
    command(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("dashboard"))
        .stdout(contains("reprocess"))
        .stdout(contains("--backend-url"));
}

#[test]
/// Health never fails; an unreachable backend is reported as such.
fn health_reports_unreachable_backend() {
    let home = temp_home_dir();
    command(&home)
        .args(["--backend-url", DEAD_BACKEND, "health"])
        .assert()
        .success()
        .stdout(contains("Unreachable"));
}

#[test]
/// The backend URL can come from the environment.
fn backend_url_from_environment_variable() {
    let home = temp_home_dir();
    command(&home)
        .env("LISTINGS_BACKEND_URL", DEAD_BACKEND)
        .arg("health")
        .assert()
        .success()
        .stdout(contains("Unreachable"));
}

#[test]
/// Other one-shot commands fail against an unreachable backend.
fn stats_fails_against_unreachable_backend() {
    let home = temp_home_dir();
    command(&home)
        .args(["--backend-url", DEAD_BACKEND, "stats"])
        .assert()
        .failure()
        .stderr(contains("Could not load statistics"));
}

#[test]
/// set-backend writes the config file and reset-backend deletes it.
fn set_and_reset_backend() {
    let home = temp_home_dir();
    let config_path = config_file_path(&home);
    assert!(!config_path.exists());

    command(&home)
        .args(["set-backend", "http://10.0.0.5:5000/"])
        .assert()
        .success()
        .stdout(contains("Backend saved"));

    let saved = fs::read_to_string(&config_path).unwrap();
    assert!(saved.contains("\"backend_url\": \"http://10.0.0.5:5000\""));

    command(&home)
        .arg("reset-backend")
        .assert()
        .success()
        .stdout(contains("Backend reset"));

    assert!(!config_path.exists());
}

#[test]
/// A malformed URL is rejected and nothing is written.
fn set_backend_rejects_malformed_url() {
    let home = temp_home_dir();
    command(&home)
        .args(["set-backend", "not-a-url"])
        .assert()
        .failure();
    assert!(!config_file_path(&home).exists());
}

#[test]
/// The saved backend is used when no URL is given on the command line.
fn saved_backend_is_used() {
    let home = temp_home_dir();
    let config_path = config_file_path(&home);
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(&config_path, format!("{{\"backend_url\": \"{}\"}}", DEAD_BACKEND)).unwrap();

    command(&home)
        .arg("health")
        .assert()
        .success()
        .stdout(contains("Unreachable"));
}
