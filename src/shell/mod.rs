//! Shell concerns: detection, profile editing, subprocess execution.

pub mod command;
pub mod platform;
pub mod profile;

pub use command::{run, run_default, CommandOptions, CommandResult, DEFAULT_TIMEOUT};
pub use platform::{canonical_profile, detect_shell, profile_candidates, ShellInfo, ShellType};
pub use profile::{AppendOutcome, ProfileEditor, ProfileFile};
