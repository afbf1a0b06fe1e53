//! The `diagnose` command: read-only inspection and reporting.
//!
//! Sequences system info, PATH analysis, candidate-location search, the
//! PATH-resolution test, the environment variable dump, profile analysis,
//! and recommendation synthesis. Purely observational: no file is written,
//! no installer runs, and the exit code is always 0.

use std::path::PathBuf;

use crate::cli::args::DiagnoseArgs;
use crate::cli::commands::dispatcher::{Command, CommandResult};
use crate::environment::{current_entries, EnvReport};
use crate::error::Result;
use crate::report::{quick_fix_command, Finding, Findings, ALL_GOOD};
use crate::scan::{
    candidate_dirs, extract_version, resolve_on_path, scan_candidates, SearchResult, TOOL_NAME,
};
use crate::shell::platform::{canonical_profile, detect_shell, profile_candidates};
use crate::shell::profile::inspect;
use crate::ui::Printer;

pub struct DiagnoseCommand {
    #[allow(dead_code)]
    args: DiagnoseArgs,
}

impl DiagnoseCommand {
    pub fn new(args: DiagnoseArgs) -> Self {
        Self { args }
    }
}

impl Command for DiagnoseCommand {
    fn execute(&self, printer: &Printer) -> Result<CommandResult> {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"));
        let mut findings = Findings::new();

        // System facts
        let report = EnvReport::collect();
        printer.header("System");
        printer.fact("OS version", &report.system.os_version);
        printer.fact("Architecture", &report.system.arch);
        printer.fact("Kernel", &report.system.kernel);
        printer.fact("Shell", &report.system.shell);
        printer.fact("Terminal", &report.system.terminal);

        // PATH analysis
        printer.header("PATH");
        let entries = current_entries();
        if entries.is_empty() {
            printer.warn("PATH is empty or unset");
        }
        for entry in &entries {
            if entry.exists {
                printer.ok(&entry.dir.display().to_string());
            } else {
                printer.warn(&format!("{} [MISSING]", entry.dir.display()));
            }
        }
        let missing: Vec<PathBuf> = entries
            .iter()
            .filter(|e| !e.exists)
            .map(|e| e.dir.clone())
            .collect();
        if !missing.is_empty() {
            findings.push(Finding::MissingPathDirs { dirs: missing });
        }

        // Candidate-location search
        printer.header("Install locations");
        let candidates = candidate_dirs(&home);
        let hits = scan_candidates(&candidates);
        print_scan(printer, &candidates, &hits);

        // Resolution test: an independent signal that may disagree with the
        // static scan.
        let path_dirs: Vec<PathBuf> = entries.iter().map(|e| e.dir.clone()).collect();
        let resolved = resolve_on_path(TOOL_NAME, &path_dirs);
        match &resolved {
            Some(path) => printer.ok(&format!("'{}' resolves to {}", TOOL_NAME, path.display())),
            None => printer.warn(&format!("'{}' does not resolve on the current PATH", TOOL_NAME)),
        }

        // Environment variable dump
        printer.header("Environment variables");
        for (name, value) in &report.vars {
            printer.fact(name, value);
        }
        for (var, value) in report.active_managers() {
            findings.push(Finding::ActiveEnvManager {
                var: var.to_string(),
                value: value.to_string(),
            });
        }

        // Profile analysis
        printer.header("Shell profile");
        let shell = detect_shell();
        let profile = canonical_profile(shell.kind, &home);
        let export_dir = hits
            .first()
            .map(|h| h.dir.clone())
            .unwrap_or_else(|| home.join(".local/bin"));
        for candidate in profile_candidates(shell.kind, &home) {
            let state = inspect(&candidate, &export_dir);
            let mut notes = Vec::new();
            if !state.exists {
                notes.push("missing");
            }
            if state.has_path_entry {
                notes.push("has PATH entry");
            }
            if state.has_activation_block {
                notes.push("has auto-activation");
            }
            let suffix = if notes.is_empty() {
                String::new()
            } else {
                format!(" ({})", notes.join(", "))
            };
            printer.info(&format!("{}{}", candidate.display(), suffix));
        }

        // Found/resolvable cross-signal findings
        let off_path = !hits.is_empty() && resolved.is_none();
        if hits.is_empty() && resolved.is_none() {
            findings.push(Finding::NotInstalled);
        } else if off_path {
            findings.push(Finding::FoundOffPath {
                dir: hits[0].dir.clone(),
                profile: profile.clone(),
            });
        } else if let (Some(resolved_path), Some(first)) = (&resolved, hits.first()) {
            if *resolved_path != first.binary {
                findings.push(Finding::Shadowed {
                    resolved: resolved_path.clone(),
                    candidate: first.binary.clone(),
                });
            }
        }
        for hit in hits.iter().filter(|h| !h.version_ok) {
            findings.push(Finding::BrokenBinary {
                binary: hit.binary.clone(),
                output: hit.version.clone(),
            });
        }

        // Recommendation synthesis
        printer.header("Recommendations");
        if findings.is_empty() {
            printer.ok(ALL_GOOD);
        } else {
            for (i, rec) in findings.recommendations().iter().enumerate() {
                printer.plain(&format!("  {}. {}", i + 1, rec));
            }
        }

        if off_path {
            printer.plain("\nQuick fix:");
            printer.plain(&format!(
                "  {}",
                quick_fix_command(shell.kind, &hits[0].dir, &profile)
            ));
        }

        // Diagnostic by nature: findings are output, not failures.
        Ok(CommandResult::success())
    }
}

fn print_scan(printer: &Printer, candidates: &[PathBuf], hits: &[SearchResult]) {
    for dir in candidates {
        match hits.iter().find(|h| &h.dir == dir) {
            Some(hit) if hit.version_ok => {
                // Show the bare version number; the raw query output carries
                // build metadata nobody needs here.
                let version = extract_version(&hit.version).unwrap_or_else(|| hit.version.clone());
                printer.ok(&format!("{} ({})", hit.binary.display(), version));
            }
            Some(hit) => {
                printer.warn(&format!(
                    "{} (version query failed: {})",
                    hit.binary.display(),
                    hit.version
                ));
            }
            None => printer.info(&format!("{} (not found)", dir.display())),
        }
    }
}
