//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands, DiagnoseArgs};
use crate::error::Result;
use crate::ui::Printer;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command, printing through the given printer.
    ///
    /// Expected soft failures end in a successful [`CommandResult`]; an `Err`
    /// is reserved for the fatal conditions.
    fn execute(&self, printer: &Printer) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
#[derive(Debug, Default)]
pub struct CommandDispatcher;

impl CommandDispatcher {
    pub fn new() -> Self {
        Self
    }

    /// Dispatch and execute a command. No subcommand means diagnose.
    pub fn dispatch(&self, cli: &Cli, printer: &Printer) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Diagnose(args)) => {
                super::diagnose::DiagnoseCommand::new(args.clone()).execute(printer)
            }
            Some(Commands::Install(args)) => {
                super::install::InstallCommand::new(args.clone()).execute(printer)
            }
            None => super::diagnose::DiagnoseCommand::new(DiagnoseArgs::default()).execute(printer),
        }
    }
}
