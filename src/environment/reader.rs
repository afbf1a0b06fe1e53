//! Read-only collection of system facts and named environment variables.
//!
//! Everything here is observation. A variable that is unset reports the
//! `(not set)` sentinel so the output distinguishes "absent" from "set to
//! empty string"; a missing OS-version utility degrades to `Unknown` and
//! never fails the run.

use crate::shell::command::capture_line;

/// Sentinel reported for environment variables that are not set.
pub const NOT_SET: &str = "(not set)";

/// Environment variables the report tracks, in display order.
///
/// Cache and install overrides, the Python install root, competing
/// toolchain homes (rye, poetry), and active environment markers
/// (virtualenv, conda, pyenv).
pub const TRACKED_VARS: &[&str] = &[
    "UV_CACHE_DIR",
    "UV_INSTALL_DIR",
    "UV_PYTHON_INSTALL_DIR",
    "RYE_HOME",
    "POETRY_HOME",
    "VIRTUAL_ENV",
    "CONDA_PREFIX",
    "PYENV_ROOT",
];

/// Static facts about the host system.
#[derive(Debug, Clone)]
pub struct SystemInfo {
    /// macOS product version, or kernel release elsewhere, or `Unknown`.
    pub os_version: String,
    /// Machine architecture from `uname -m` (`arm64`, `x86_64`, ...).
    pub arch: String,
    /// Kernel identifier from `uname -sr`.
    pub kernel: String,
    /// The user's configured shell (`$SHELL`).
    pub shell: String,
    /// Terminal host identifier (`$TERM_PROGRAM`).
    pub terminal: String,
}

/// Full read-only environment report.
#[derive(Debug, Clone)]
pub struct EnvReport {
    pub system: SystemInfo,
    /// Tracked variables as ordered (name, value) pairs; unset values carry
    /// the [`NOT_SET`] sentinel.
    pub vars: Vec<(String, String)>,
}

impl EnvReport {
    /// Collect from the live process environment.
    pub fn collect() -> Self {
        Self::collect_with_env(|key| std::env::var(key))
    }

    /// Collect with a custom env lookup function (testable without mutating
    /// process environment).
    pub fn collect_with_env<F>(env_fn: F) -> Self
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        let vars = TRACKED_VARS
            .iter()
            .map(|&name| {
                let value = env_fn(name).unwrap_or_else(|_| NOT_SET.to_string());
                (name.to_string(), value)
            })
            .collect();

        Self {
            system: SystemInfo {
                os_version: detect_os_version(),
                arch: capture_line("uname", &["-m"]).unwrap_or_else(|| "Unknown".to_string()),
                kernel: capture_line("uname", &["-sr"]).unwrap_or_else(|| "Unknown".to_string()),
                shell: env_fn("SHELL").unwrap_or_else(|_| NOT_SET.to_string()),
                terminal: env_fn("TERM_PROGRAM").unwrap_or_else(|_| NOT_SET.to_string()),
            },
            vars,
        }
    }

    /// Whether an active environment manager marker is set, by variable name.
    pub fn active_managers(&self) -> Vec<(&str, &str)> {
        self.vars
            .iter()
            .filter(|(name, value)| {
                matches!(name.as_str(), "VIRTUAL_ENV" | "CONDA_PREFIX" | "PYENV_ROOT")
                    && value != NOT_SET
            })
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect()
    }
}

/// macOS reports its marketing version via `sw_vers`; on other systems (or
/// when the utility is missing) fall back to the kernel release, then to a
/// placeholder.
fn detect_os_version() -> String {
    capture_line("sw_vers", &["-productVersion"])
        .or_else(|| capture_line("uname", &["-r"]))
        .unwrap_or_else(|| "Unknown".to_string())
}
