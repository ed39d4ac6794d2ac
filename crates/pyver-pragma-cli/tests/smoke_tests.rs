//! Smoke tests for the pyver-pragma CLI
//!
//! Every test pins the environment with flags so no interpreter is needed.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command for the pyver-pragma binary
fn pyver_pragma() -> Command {
    let mut cmd = Command::cargo_bin("pyver-pragma").expect("pyver-pragma binary should exist");
    for var in [
        "PYVER_PRAGMA_PYTHON",
        "PYVER_PRAGMA_PLATFORM",
        "PYVER_PRAGMA_IMPLEMENTATION",
        "PYVER_PRAGMA_MAX_MINOR",
        "PYVER_PRAGMA_CONFIG",
        "PYVER_PRAGMA_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

const LINUX_36: [&str; 6] = [
    "--python",
    "3.6",
    "--platform",
    "Linux",
    "--implementation",
    "CPython",
];

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    pyver_pragma()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_help_flag() {
    pyver_pragma()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("classify"))
        .stdout(predicate::str::contains("detect"));
}

#[test]
fn test_no_args_shows_help() {
    pyver_pragma().assert().failure();
}

// ============================================================================
// Generate
// ============================================================================

#[test]
fn test_generate_text() {
    pyver_pragma()
        .arg("generate")
        .args(LINUX_36)
        .args(["--max-minor", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r"(?=\s*<py3(?:7|8|9)\b)"))
        .stdout(predicate::str::contains(r"(?!.*!Linux)(?!.*!CPython)"))
        .stdout(predicate::str::ends_with("cover$\n"));
}

#[test]
fn test_generate_coveragerc() {
    pyver_pragma()
        .arg("generate")
        .args(LINUX_36)
        .args(["--format", "coveragerc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[report]\nexclude_lines =\n    (?i)#"));
}

#[test]
fn test_generate_json_non_match_only() {
    let output = pyver_pragma()
        .arg("generate")
        .args(LINUX_36)
        .args(["--set", "non-match", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(value.get("match").is_none());
    assert_eq!(value["non_match"].as_array().unwrap().len(), 2);
}

#[test]
fn test_generate_from_env_vars() {
    pyver_pragma()
        .arg("generate")
        .env("PYVER_PRAGMA_PYTHON", "3.9")
        .env("PYVER_PRAGMA_PLATFORM", "Windows")
        .env("PYVER_PRAGMA_IMPLEMENTATION", "PyPy")
        .assert()
        .success()
        .stdout(predicate::str::contains(r"(?!.*!Windows)(?!.*!PyPy)"));
}

#[test]
fn test_generate_from_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pyver-pragma.yaml");
    fs::write(&path, "python: \"3.10\"\nplatform: Darwin\nimplementation: CPython\n").unwrap();

    pyver_pragma()
        .arg("generate")
        .arg("--config")
        .arg(&path)
        .args(["--set", "match"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r"(?=\s*py3(?:10)\b)"))
        .stdout(predicate::str::contains("!Darwin"));
}

#[test]
fn test_generate_unsupported_version_fails() {
    pyver_pragma()
        .arg("generate")
        .args(["--python", "2.7", "--platform", "Linux", "--implementation", "CPython"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_generate_huge_minor_fails() {
    pyver_pragma()
        .arg("generate")
        .args(["--python", "3.2000000", "--platform", "Linux", "--implementation", "CPython"])
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid version"));
}

#[test]
fn test_generate_huge_max_minor_fails() {
    pyver_pragma()
        .arg("generate")
        .args(LINUX_36)
        .args(["--max-minor", "500"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_minor"));
}

#[test]
fn test_generate_bad_version_fails() {
    pyver_pragma()
        .args(["generate", "--python", "three"])
        .assert()
        .failure();
}

// ============================================================================
// Classify
// ============================================================================

#[test]
fn test_classify_lines() {
    pyver_pragma()
        .arg("classify")
        .args(LINUX_36)
        .args(["--color", "never"])
        .args([
            "x  # pragma: no cover (<py38)",
            "y  # pragma: no cover (<py34)",
            "z  # pragma: no cover",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("EXCLUDED"))
        .stdout(predicate::str::contains("MEASURED"))
        .stdout(predicate::str::contains("BASELINE"));
}

#[test]
fn test_classify_file_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("compat.py");
    fs::write(
        &path,
        "import sys\n\
         if sys.platform == 'win32':  # pragma: no cover (!Linux)\n\
         \x20   pass\n\
         if sys.version_info >= (3, 6):  # pragma: no cover (py36+)\n\
         \x20   pass\n",
    )
    .unwrap();

    let output = pyver_pragma()
        .arg("classify")
        .args(LINUX_36)
        .args(["--format", "json", "--file"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[0]["line"], 2);
    assert_eq!(value[0]["verdict"]["verdict"], "does_not_apply");
    assert_eq!(value[1]["line"], 4);
    assert_eq!(value[1]["verdict"]["category"], "plus");
}

#[test]
fn test_classify_stdin() {
    pyver_pragma()
        .arg("classify")
        .args(LINUX_36)
        .args(["--color", "never"])
        .write_stdin("a = 1\nb = 2  # pragma: no cover (>=py37)\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("MEASURED"))
        .stdout(predicate::str::contains("b = 2"));
}

// ============================================================================
// Detect
// ============================================================================

#[test]
fn test_detect_missing_interpreter_fails() {
    pyver_pragma()
        .args(["detect", "--interpreter", "pyver-pragma-no-such-python"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not detect environment"));
}
