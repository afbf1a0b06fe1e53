//! The `install` command: idempotent installer and repairer.
//!
//! Runs a diagnostics subset, decides install-vs-skip, downloads and places
//! the binary when needed (bootstrap first, direct release fallback),
//! updates the shell profile, verifies, and installs the auto-activation
//! hook. Exits non-zero only on the fatal conditions; everything else is a
//! reported finding.

use std::path::{Path, PathBuf};

use crate::cli::args::InstallArgs;
use crate::cli::commands::dispatcher::{Command, CommandResult};
use crate::environment::{current_dirs, EnvReport};
use crate::error::Result;
use crate::install::{verify_install, Installer};
use crate::scan::{candidate_dirs, extract_version, resolve_on_path, scan_candidates, TOOL_NAME};
use crate::shell::platform::{canonical_profile, detect_shell, reload_hint};
use crate::shell::profile::{AppendOutcome, ProfileEditor};
use crate::ui::Printer;

pub struct InstallCommand {
    args: InstallArgs,
}

impl InstallCommand {
    pub fn new(args: InstallArgs) -> Self {
        Self { args }
    }

    fn install_dir(&self, home: &Path) -> PathBuf {
        self.args
            .install_dir
            .clone()
            .unwrap_or_else(|| home.join(".local/bin"))
    }
}

impl Command for InstallCommand {
    fn execute(&self, printer: &Printer) -> Result<CommandResult> {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"));
        let report = EnvReport::collect();

        // Diagnostics subset: where does uv stand right now?
        printer.header("Diagnostics");
        let hits = scan_candidates(&candidate_dirs(&home));
        let resolved = resolve_on_path(TOOL_NAME, &current_dirs());
        for hit in &hits {
            let version = extract_version(&hit.version).unwrap_or_else(|| hit.version.clone());
            printer.ok(&format!("Found {} ({})", hit.binary.display(), version));
        }
        match &resolved {
            Some(path) => printer.ok(&format!("'{}' resolves to {}", TOOL_NAME, path.display())),
            None => printer.info(&format!("'{}' does not resolve on PATH", TOOL_NAME)),
        }

        // Install-vs-skip: skip only when already found and not forced.
        let existing = hits
            .first()
            .map(|h| h.binary.clone())
            .or_else(|| resolved.clone());
        let binary = match existing {
            Some(existing) if !self.args.force => {
                printer.ok(&format!(
                    "uv already installed at {}; skipping download (use --force to reinstall)",
                    existing.display()
                ));
                existing
            }
            _ => {
                printer.header("Install");
                let installer = Installer::new(self.install_dir(&home));
                // Fatal paths (unsupported arch, install dir, no binary after
                // every method) propagate out of here.
                installer.install(&report.system.arch, printer)?
            }
        };

        // Make the rest of this run see the binary the way a fresh shell
        // will after the profile update.
        let bin_dir = binary
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.install_dir(&home));
        prepend_process_path(&bin_dir);

        // Profile update: at most two guarded appends, both idempotent.
        printer.header("Shell profile");
        let shell = detect_shell();
        let profile = canonical_profile(shell.kind, &home);
        let editor = ProfileEditor::new(profile.clone());
        match editor.append_path_export(&bin_dir) {
            Ok(AppendOutcome::Appended) => {
                printer.ok(&format!("Added {} to PATH in {}", bin_dir.display(), profile.display()))
            }
            Ok(AppendOutcome::AlreadyPresent) => {
                printer.info(&format!("{} already references {}", profile.display(), bin_dir.display()))
            }
            Err(e) => printer.warn(&format!("Could not update profile: {}", e)),
        }

        // Verification: three independent checks, all recorded, none fatal.
        printer.header("Verification");
        let outcomes = verify_install(&binary);
        for outcome in &outcomes {
            if outcome.passed {
                printer.ok(&format!("{}: {}", outcome.name, outcome.message));
            } else {
                printer.fail(&format!("{}: {}", outcome.name, outcome.message));
            }
        }

        // Auto-activation setup
        match editor.append_auto_activation() {
            Ok(AppendOutcome::Appended) => printer.ok("Installed auto-activation hook"),
            Ok(AppendOutcome::AlreadyPresent) => printer.info("Auto-activation hook already installed"),
            Err(e) => printer.warn(&format!("Could not install auto-activation hook: {}", e)),
        }

        // Summary
        printer.header("Summary");
        let passed = outcomes.iter().filter(|o| o.passed).count();
        printer.plain(&format!(
            "  {} of {} verification checks passed",
            passed,
            outcomes.len()
        ));
        printer.plain(&format!(
            "  Open a new terminal or run: {}",
            reload_hint(shell.kind, &profile)
        ));

        Ok(CommandResult::success())
    }
}

/// Prepend a directory to the current process PATH.
fn prepend_process_path(dir: &Path) {
    let current = std::env::var("PATH").unwrap_or_default();
    let already_first = current
        .split(':')
        .next()
        .is_some_and(|first| Path::new(first) == dir);
    if already_first {
        return;
    }
    let new_path = format!("{}:{}", dir.display(), current);
    // SAFETY: single-threaded during the install flow
    unsafe { std::env::set_var("PATH", new_path) };
}
