//! Post-install functional verification.
//!
//! Three independent checks, none of which aborts the run: a direct
//! absolute-path version query, a PATH-resolution version query, and a
//! disposable end-to-end project exercise (init + sync in a temporary
//! directory). The temporary directory is owned by a `TempDir` guard, so it
//! is removed on every exit path, including failures mid-exercise.

use std::path::Path;
use std::time::Duration;

use crate::environment::path::current_dirs;
use crate::scan::{resolve_on_path, TOOL_NAME};
use crate::shell::command::{run, run_default, CommandOptions};

/// Sync can resolve and download packages; give it more room than a
/// version query. Overrun is recorded as a failed check, nothing more.
const EXERCISE_TIMEOUT: Duration = Duration::from_secs(120);

/// One verification check's result.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub name: String,
    pub passed: bool,
    pub message: String,
}

impl CheckOutcome {
    fn pass(name: &str, message: String) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message,
        }
    }

    fn fail(name: &str, message: String) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            message,
        }
    }
}

/// Run all verification checks against the installed binary.
pub fn verify_install(binary: &Path) -> Vec<CheckOutcome> {
    let mut outcomes = vec![check_direct(binary), check_resolution()];
    outcomes.extend(exercise_project(binary));
    outcomes
}

/// Check 1: the binary answers a version query when invoked by absolute path.
pub fn check_direct(binary: &Path) -> CheckOutcome {
    let result = run_default(binary, &["--version"]);
    if result.success {
        CheckOutcome::pass("direct invocation", result.stdout.trim().to_string())
    } else {
        CheckOutcome::fail("direct invocation", result.combined_output())
    }
}

/// Check 2: the bare name resolves through the current process PATH (which
/// the install flow has already extended in-session) and answers a version
/// query.
pub fn check_resolution() -> CheckOutcome {
    match resolve_on_path(TOOL_NAME, &current_dirs()) {
        Some(resolved) => {
            let result = run_default(&resolved, &["--version"]);
            if result.success {
                CheckOutcome::pass(
                    "PATH resolution",
                    format!("{} ({})", result.stdout.trim(), resolved.display()),
                )
            } else {
                CheckOutcome::fail("PATH resolution", result.combined_output())
            }
        }
        None => CheckOutcome::fail(
            "PATH resolution",
            "'uv' does not resolve on the current PATH".to_string(),
        ),
    }
}

/// Check 3: disposable end-to-end exercise. Creates a temporary project,
/// runs `uv init` then `uv sync`, records pass/fail per sub-action.
pub fn exercise_project(binary: &Path) -> Vec<CheckOutcome> {
    let workdir = match tempfile::TempDir::new() {
        Ok(dir) => dir,
        Err(e) => {
            return vec![CheckOutcome::fail(
                "project exercise",
                format!("could not create temporary directory: {}", e),
            )]
        }
    };

    let outcomes = exercise_in(binary, workdir.path());
    // workdir dropped here; removal is unconditional
    outcomes
}

fn exercise_in(binary: &Path, dir: &Path) -> Vec<CheckOutcome> {
    let options = CommandOptions {
        cwd: Some(dir.to_path_buf()),
        timeout: EXERCISE_TIMEOUT,
        ..Default::default()
    };

    let init = run(binary, &["init"], &options);
    let mut outcomes = vec![if init.success {
        CheckOutcome::pass("project init", "uv init succeeded".to_string())
    } else {
        CheckOutcome::fail("project init", init.combined_output())
    }];

    let sync = run(binary, &["sync"], &options);
    outcomes.push(if sync.success {
        CheckOutcome::pass("dependency sync", "uv sync succeeded".to_string())
    } else {
        CheckOutcome::fail("dependency sync", sync.combined_output())
    });

    outcomes
}
