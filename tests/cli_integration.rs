//! Integration tests for the gitsync binary.

use std::process::{Command, Output};

use tempfile::TempDir;

/// Run gitsync from `dir` with verbose logging enabled.
fn run_gitsync(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gitsync"))
        .current_dir(dir.path())
        .env("RUST_LOG", "debug")
        .args(args)
        .output()
        .expect("Failed to execute gitsync command")
}

#[test]
fn test_infrastructure_error_reported_once() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("absent");

    let output = run_gitsync(&tmp, &["--repo", missing.to_str().unwrap(), "status"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert_eq!(
        stderr.matches("Repository discovery failed").count(),
        1,
        "stderr: {stderr}"
    );
}

#[test]
fn test_missing_config_file_exits_with_error() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("absent.toml");

    let output = run_gitsync(&tmp, &["--config", missing.to_str().unwrap(), "status"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stderr.matches("Configuration error").count(), 1, "stderr: {stderr}");
}

#[test]
fn test_status_in_fresh_repository() {
    let tmp = TempDir::new().unwrap();
    git2::Repository::init(tmp.path()).unwrap();

    let output = run_gitsync(&tmp, &["--json", "status"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        r#"{"merge_in_progress":false,"rebase_in_progress":false}"#
    );
}
