//! Integration tests for the diagnose command.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Create a fake uv binary under the given bin directory.
fn create_fake_uv(bin_dir: &Path, body: &str) {
    fs::create_dir_all(bin_dir).unwrap();
    let path = bin_dir.join("uv");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }
}

/// Command with a hermetic environment: fake home, pinned PATH, no
/// environment-manager markers leaking in from the test host.
fn doctor_cmd(home: &Path, path: &str) -> Command {
    let mut cmd = Command::new(cargo_bin("uv-doctor"));
    cmd.env("HOME", home);
    cmd.env("PATH", path);
    cmd.env("SHELL", "/bin/zsh");
    for var in [
        "UV_CACHE_DIR",
        "UV_INSTALL_DIR",
        "UV_PYTHON_INSTALL_DIR",
        "RYE_HOME",
        "POETRY_HOME",
        "VIRTUAL_ENV",
        "CONDA_PREFIX",
        "PYENV_ROOT",
        "NO_COLOR",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// True when the test host has a real uv in a system-wide directory the
/// hermetic environment still exposes, which would contaminate
/// not-installed scenarios.
fn host_has_system_uv() -> bool {
    ["/usr/local/bin/uv", "/opt/homebrew/bin/uv", "/usr/bin/uv", "/bin/uv"]
        .iter()
        .any(|p| Path::new(p).exists())
}

#[test]
fn cli_shows_help() {
    let mut cmd = Command::new(cargo_bin("uv-doctor"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Diagnose and repair uv installation"));
}

#[test]
fn cli_shows_version() {
    let mut cmd = Command::new(cargo_bin("uv-doctor"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_flag_prints_usage_and_fails() {
    let mut cmd = Command::new(cargo_bin("uv-doctor"));
    cmd.arg("--definitely-not-a-flag");
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn diagnose_always_exits_zero() {
    let home = TempDir::new().unwrap();
    doctor_cmd(home.path(), "/usr/bin:/bin")
        .arg("diagnose")
        .assert()
        .success()
        .stdout(predicate::str::contains("== System =="))
        .stdout(predicate::str::contains("== PATH =="))
        .stdout(predicate::str::contains("== Recommendations =="));
}

#[test]
fn bare_invocation_defaults_to_diagnose() {
    let home = TempDir::new().unwrap();
    doctor_cmd(home.path(), "/usr/bin:/bin")
        .assert()
        .success()
        .stdout(predicate::str::contains("== Recommendations =="));
}

#[test]
fn diagnose_flags_missing_path_entries() {
    let home = TempDir::new().unwrap();
    doctor_cmd(home.path(), "/usr/bin:/nonexistent-uv-doctor-dir")
        .arg("diagnose")
        .assert()
        .success()
        .stdout(predicate::str::contains("/nonexistent-uv-doctor-dir [MISSING]"));
}

#[test]
fn diagnose_reports_not_installed_without_path_suggestion() {
    if host_has_system_uv() {
        return;
    }
    let home = TempDir::new().unwrap();
    doctor_cmd(home.path(), "/usr/bin:/bin")
        .arg("diagnose")
        .assert()
        .success()
        .stdout(predicate::str::contains("uv is not installed"))
        .stdout(predicate::str::contains("not on your PATH").not());
}

#[test]
fn diagnose_reports_off_path_install_with_single_path_recommendation() {
    if host_has_system_uv() {
        return;
    }
    let home = TempDir::new().unwrap();
    create_fake_uv(&home.path().join(".local/bin"), "echo uv 1.2.3");

    // PATH has only existing system dirs: no [MISSING] entries, and the fake
    // install is visible to the scanner but not to resolution.
    doctor_cmd(home.path(), "/usr/bin")
        .arg("diagnose")
        .assert()
        .success()
        .stdout(predicate::str::contains("[MISSING]").not())
        .stdout(predicate::str::contains("(1.2.3)"))
        .stdout(predicate::str::contains("does not resolve"))
        .stdout(predicate::str::contains("but that directory is not on your PATH"))
        .stdout(predicate::str::contains("uv is not installed").not())
        .stdout(predicate::str::contains("  1. "))
        .stdout(predicate::str::contains("  2. ").not())
        .stdout(predicate::str::contains("Quick fix:"));
}

#[test]
fn scan_prints_bare_version_without_build_metadata() {
    let home = TempDir::new().unwrap();
    create_fake_uv(
        &home.path().join(".local/bin"),
        "echo 'uv 9.9.9 (abc1234 2025-06-01)'",
    );

    doctor_cmd(home.path(), "/usr/bin")
        .arg("diagnose")
        .assert()
        .success()
        .stdout(predicate::str::contains("(9.9.9)"))
        .stdout(predicate::str::contains("abc1234").not());
}

#[test]
fn diagnose_surfaces_broken_binary_output_verbatim() {
    let home = TempDir::new().unwrap();
    create_fake_uv(
        &home.path().join(".local/bin"),
        "echo dyld: missing library >&2; exit 127",
    );

    doctor_cmd(home.path(), "/usr/bin")
        .arg("diagnose")
        .assert()
        .success()
        .stdout(predicate::str::contains("dyld: missing library"));
}

#[test]
fn diagnose_notes_active_environment_managers() {
    let home = TempDir::new().unwrap();
    doctor_cmd(home.path(), "/usr/bin:/bin")
        .arg("diagnose")
        .env("CONDA_PREFIX", "/opt/conda")
        .assert()
        .success()
        .stdout(predicate::str::contains("CONDA_PREFIX"))
        .stdout(predicate::str::contains("/opt/conda"));
}

#[test]
fn diagnose_takes_no_operation_flags() {
    let home = TempDir::new().unwrap();
    doctor_cmd(home.path(), "/usr/bin")
        .args(["diagnose", "--force"])
        .assert()
        .code(1);
}
