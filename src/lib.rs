//! uv-doctor - Diagnose and repair uv installation and PATH configuration.
//!
//! Two collaborating commands: `diagnose` inspects the environment and
//! reports findings without touching anything; `install` idempotently
//! bootstraps the uv binary, updates the shell profile, and verifies the
//! result.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and command orchestration
//! - [`environment`] - System facts, tracked variables, PATH analysis
//! - [`error`] - Error types and result aliases
//! - [`install`] - Two-tier download and post-install verification
//! - [`report`] - Findings accumulation and recommendation synthesis
//! - [`scan`] - Well-known-location scanning and PATH resolution
//! - [`shell`] - Shell detection, profile editing, subprocess execution
//! - [`ui`] - Status markers, theme, and the report printer

pub mod cli;
pub mod environment;
pub mod error;
pub mod install;
pub mod report;
pub mod scan;
pub mod shell;
pub mod ui;

pub use error::{DoctorError, Result};
