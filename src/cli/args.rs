//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// uv-doctor - Diagnose and repair uv installation and PATH configuration.
#[derive(Debug, Parser)]
#[command(name = "uv-doctor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Minimal output (warnings and failures only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Inspect the environment and report problems (default)
    Diagnose(DiagnoseArgs),

    /// Install uv and repair PATH/profile configuration
    Install(InstallArgs),
}

/// Arguments for the `diagnose` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DiagnoseArgs {}

/// Arguments for the `install` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstallArgs {
    /// Reinstall even if uv is already present
    #[arg(short, long)]
    pub force: bool,

    /// Target directory for the binary (default: ~/.local/bin)
    #[arg(long, value_name = "PATH", env = "UV_INSTALL_DIR")]
    pub install_dir: Option<PathBuf>,
}
