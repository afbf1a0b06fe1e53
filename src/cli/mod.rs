//! Command-line interface for uv-doctor.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations and dispatching

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, DiagnoseArgs, InstallArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
