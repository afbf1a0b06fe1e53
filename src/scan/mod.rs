//! Well-known-location scanning and PATH resolution for the uv binary.
//!
//! Two deliberately separate signals come out of this module: the static
//! candidate scan ([`scan_candidates`]) and live PATH resolution
//! ([`resolve_on_path`]). They can disagree, and that disagreement is
//! diagnostic gold: a binary found by the scan but not by resolution is
//! installed-but-not-on-PATH; a resolution hit that differs from the first
//! scan hit means something is shadowing the install.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::shell::command::run_default;

/// Name of the binary every scan looks for.
pub const TOOL_NAME: &str = "uv";

/// One candidate-directory hit from the scan.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Candidate directory that contained the binary.
    pub dir: PathBuf,
    /// Full path of the found binary.
    pub binary: PathBuf,
    /// Output of the version query. On a failed query this is the captured
    /// stdout+stderr, verbatim.
    pub version: String,
    /// Whether the version query exited zero.
    pub version_ok: bool,
}

/// The fixed, ordered list of well-known install locations.
pub fn candidate_dirs(home: &Path) -> Vec<PathBuf> {
    vec![
        home.join(".local/bin"),
        home.join(".cargo/bin"),
        PathBuf::from("/usr/local/bin"),
        PathBuf::from("/opt/homebrew/bin"),
        home.join("bin"),
    ]
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On non-Unix platforms executability is not carried in permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Scan the candidate directories for an executable `uv`, querying each hit
/// for its version. An empty result means a completed scan with no hits.
pub fn scan_candidates(dirs: &[PathBuf]) -> Vec<SearchResult> {
    let mut hits = Vec::new();
    for dir in dirs {
        let binary = dir.join(TOOL_NAME);
        if binary.is_file() && is_executable(&binary) {
            let (version, version_ok) = query_version(&binary);
            hits.push(SearchResult {
                dir: dir.clone(),
                binary,
                version,
                version_ok,
            });
        }
    }
    hits
}

/// Run `<binary> --version`, capturing output.
///
/// A nonzero exit does not fail the scan: the captured output is surfaced
/// verbatim as the version field so broken installs stay visible.
pub fn query_version(binary: &Path) -> (String, bool) {
    let result = run_default(binary, &["--version"]);
    if result.success {
        (result.stdout.trim().to_string(), true)
    } else {
        (result.combined_output(), false)
    }
}

/// Resolve a tool by iterating over PATH entries, first hit wins.
///
/// Equivalent to `command -v`, but done in-process: `which` behavior varies
/// across systems and is sometimes a shell builtin with inconsistent error
/// handling.
pub fn resolve_on_path(tool: &str, path_dirs: &[PathBuf]) -> Option<PathBuf> {
    for dir in path_dirs {
        let candidate = dir.join(tool);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Extract a bare version number from version-query output
/// (e.g. "uv 0.5.14 (abc123 2025-01-01)" yields "0.5.14").
pub fn extract_version(output: &str) -> Option<String> {
    static VERSION_RE: OnceLock<Regex> = OnceLock::new();
    let re = VERSION_RE.get_or_init(|| Regex::new(r"\d+\.\d+(?:\.\d+)?(?:[\w.+-]*)").unwrap());
    re.find(output).map(|m| m.as_str().to_string())
}
