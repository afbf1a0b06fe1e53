//! Shell detection and profile-file mapping.

use std::path::{Path, PathBuf};

/// Known shell types with distinct profile conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    Zsh,
    Bash,
    Unknown,
}

impl ShellType {
    /// Parse shell type from an executable path or name.
    pub fn from_executable(exe: &str) -> Self {
        let name = Path::new(exe)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();

        match name.as_str() {
            "zsh" => ShellType::Zsh,
            "bash" => ShellType::Bash,
            _ => ShellType::Unknown,
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            ShellType::Zsh => "zsh",
            ShellType::Bash => "bash",
            ShellType::Unknown => "sh",
        }
    }
}

/// Information about the user's configured shell.
#[derive(Debug, Clone)]
pub struct ShellInfo {
    /// Shell executable path (from `$SHELL`, `/bin/sh` if unset).
    pub executable: PathBuf,

    /// Parsed shell type.
    pub kind: ShellType,
}

/// Detect the user's shell from the environment.
pub fn detect_shell() -> ShellInfo {
    detect_shell_with_env(|key| std::env::var(key))
}

/// Detect the shell with a custom env lookup (testable without mutating
/// process environment).
pub fn detect_shell_with_env<F>(env_fn: F) -> ShellInfo
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let executable = env_fn("SHELL")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/bin/sh"));
    let kind = ShellType::from_executable(&executable.to_string_lossy());

    ShellInfo { executable, kind }
}

/// Profile files that affect this shell, in the order Diagnose reports them.
pub fn profile_candidates(kind: ShellType, home: &Path) -> Vec<PathBuf> {
    match kind {
        ShellType::Zsh => vec![home.join(".zshrc"), home.join(".zprofile")],
        ShellType::Bash => vec![home.join(".bash_profile"), home.join(".bashrc")],
        ShellType::Unknown => vec![home.join(".profile")],
    }
}

/// The one profile file Install mutates for this shell.
///
/// zsh: `.zshrc`, unless it's absent while `.zprofile` already exists, in
/// which case the user's setup clearly lives in `.zprofile` and we follow.
/// bash: `.bash_profile` (macOS convention: login shells only source that).
/// Anything else: `.profile`.
pub fn canonical_profile(kind: ShellType, home: &Path) -> PathBuf {
    match kind {
        ShellType::Zsh => {
            let zshrc = home.join(".zshrc");
            let zprofile = home.join(".zprofile");
            if !zshrc.exists() && zprofile.exists() {
                zprofile
            } else {
                zshrc
            }
        }
        ShellType::Bash => home.join(".bash_profile"),
        ShellType::Unknown => home.join(".profile"),
    }
}

/// Command the user can run to pick up profile changes in the current
/// session. Printed in the install summary, never executed.
pub fn reload_hint(kind: ShellType, profile: &Path) -> String {
    match kind {
        ShellType::Zsh | ShellType::Bash => format!("source {}", profile.display()),
        ShellType::Unknown => format!(". {}", profile.display()),
    }
}
