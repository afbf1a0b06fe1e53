//! Findings accumulation and recommendation synthesis.
//!
//! Scan and profile analysis push typed findings; at the end of a run the
//! findings synthesize into at most [`MAX_RECOMMENDATIONS`] free-text
//! remediation steps. Nothing here persists: the whole report is recomputed
//! on every invocation.

use std::path::{Path, PathBuf};

use crate::shell::platform::ShellType;

/// Cap on the synthesized recommendation list.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Printed when no finding produced a recommendation.
pub const ALL_GOOD: &str = "Everything looks good: uv is installed and on your PATH.";

/// A typed diagnostic finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// Not in any candidate directory and not resolvable on PATH.
    NotInstalled,
    /// Present in a candidate directory but not resolvable on PATH.
    FoundOffPath { dir: PathBuf, profile: PathBuf },
    /// Resolution returned a different binary than the first candidate hit.
    Shadowed { resolved: PathBuf, candidate: PathBuf },
    /// PATH lists directories that do not exist.
    MissingPathDirs { dirs: Vec<PathBuf> },
    /// The version query of a found binary failed.
    BrokenBinary { binary: PathBuf, output: String },
    /// An environment manager marker is active and may interpose its own
    /// Python tooling.
    ActiveEnvManager { var: String, value: String },
}

impl Finding {
    fn recommendation(&self) -> String {
        match self {
            Finding::NotInstalled => {
                "uv is not installed. Run 'uv-doctor install', or: curl -LsSf \
                 https://astral.sh/uv/install.sh | sh"
                    .to_string()
            }
            Finding::FoundOffPath { dir, profile } => format!(
                "uv is installed in {} but that directory is not on your PATH. \
                 Add 'export PATH=\"{}:$PATH\"' to {}",
                dir.display(),
                dir.display(),
                profile.display()
            ),
            Finding::Shadowed { resolved, candidate } => format!(
                "'uv' resolves to {} which shadows the install at {}. \
                 Check your PATH ordering",
                resolved.display(),
                candidate.display()
            ),
            Finding::MissingPathDirs { dirs } => {
                let listed: Vec<String> = dirs.iter().map(|d| d.display().to_string()).collect();
                format!(
                    "PATH lists {} nonexistent director{}: {}. Remove or create them",
                    dirs.len(),
                    if dirs.len() == 1 { "y" } else { "ies" },
                    listed.join(", ")
                )
            }
            Finding::BrokenBinary { binary, output } => format!(
                "{} exists but failed its version check: {}",
                binary.display(),
                output
            ),
            Finding::ActiveEnvManager { var, value } => format!(
                "{} is active ({}); it may interpose its own Python tooling ahead of uv",
                var, value
            ),
        }
    }
}

/// Accumulator for findings across a run.
#[derive(Debug, Default)]
pub struct Findings {
    items: Vec<Finding>,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, finding: Finding) {
        self.items.push(finding);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Synthesize the remediation list, capped at [`MAX_RECOMMENDATIONS`].
    pub fn recommendations(&self) -> Vec<String> {
        self.items
            .iter()
            .map(Finding::recommendation)
            .take(MAX_RECOMMENDATIONS)
            .collect()
    }
}

/// The copy-pasteable one-liner Diagnose prints at the end. Computed, never
/// executed.
pub fn quick_fix_command(kind: ShellType, dir: &Path, profile: &Path) -> String {
    let source = match kind {
        ShellType::Zsh | ShellType::Bash => format!("source {}", profile.display()),
        ShellType::Unknown => format!(". {}", profile.display()),
    };
    format!(
        "echo 'export PATH=\"{}:$PATH\"' >> {} && {}",
        dir.display(),
        profile.display(),
        source
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn off_path_finding() -> Finding {
        Finding::FoundOffPath {
            dir: PathBuf::from("/home/u/.local/bin"),
            profile: PathBuf::from("/home/u/.zshrc"),
        }
    }

    #[test]
    fn empty_findings_produce_no_recommendations() {
        let findings = Findings::new();
        assert!(findings.is_empty());
        assert!(findings.recommendations().is_empty());
    }

    #[test]
    fn not_installed_suggestion_names_installer() {
        let mut findings = Findings::new();
        findings.push(Finding::NotInstalled);
        let recs = findings.recommendations();
        assert_eq!(recs.len(), 1);
        assert!(recs[0].contains("not installed"));
        assert!(!recs[0].contains("not on your PATH"));
    }

    #[test]
    fn off_path_suggestion_references_found_directory() {
        let mut findings = Findings::new();
        findings.push(off_path_finding());
        let recs = findings.recommendations();
        assert_eq!(recs.len(), 1);
        assert!(recs[0].contains("/home/u/.local/bin"));
        assert!(recs[0].contains(".zshrc"));
        assert!(!recs[0].contains("not installed."));
    }

    #[test]
    fn recommendations_are_capped() {
        let mut findings = Findings::new();
        for i in 0..10 {
            findings.push(Finding::ActiveEnvManager {
                var: format!("VAR{}", i),
                value: "x".to_string(),
            });
        }
        assert_eq!(findings.recommendations().len(), MAX_RECOMMENDATIONS);
    }

    #[test]
    fn shadowed_names_both_paths() {
        let mut findings = Findings::new();
        findings.push(Finding::Shadowed {
            resolved: PathBuf::from("/opt/other/uv"),
            candidate: PathBuf::from("/home/u/.local/bin/uv"),
        });
        let rec = &findings.recommendations()[0];
        assert!(rec.contains("/opt/other/uv"));
        assert!(rec.contains("/home/u/.local/bin/uv"));
    }

    #[test]
    fn missing_path_dirs_pluralizes() {
        let mut findings = Findings::new();
        findings.push(Finding::MissingPathDirs {
            dirs: vec![PathBuf::from("/gone")],
        });
        assert!(findings.recommendations()[0].contains("directory"));

        let mut findings = Findings::new();
        findings.push(Finding::MissingPathDirs {
            dirs: vec![PathBuf::from("/gone"), PathBuf::from("/also-gone")],
        });
        assert!(findings.recommendations()[0].contains("directories"));
    }

    #[test]
    fn quick_fix_is_a_single_shell_line() {
        let cmd = quick_fix_command(
            ShellType::Zsh,
            Path::new("/home/u/.local/bin"),
            Path::new("/home/u/.zshrc"),
        );
        assert!(cmd.starts_with("echo 'export PATH="));
        assert!(cmd.contains(">> /home/u/.zshrc"));
        assert!(cmd.ends_with("source /home/u/.zshrc"));
        assert!(!cmd.contains('\n'));
    }
}
