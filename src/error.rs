//! Error types for uv-doctor operations.
//!
//! This module defines [`DoctorError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Diagnostic findings (tool missing, PATH misconfigured) are never errors;
//!   they travel as status values and end up in the report
//! - `DoctorError` is reserved for the few genuinely fatal conditions
//! - Use `anyhow::Error` (via `DoctorError::Other`) at fetch boundaries

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for uv-doctor operations.
///
/// Only three variants are fatal to an install run: [`UnsupportedArch`],
/// [`InstallDirCreation`], and [`BinaryNotFound`]. Everything else is either
/// recoverable (download fallback) or reported as a finding.
///
/// [`UnsupportedArch`]: DoctorError::UnsupportedArch
/// [`InstallDirCreation`]: DoctorError::InstallDirCreation
/// [`BinaryNotFound`]: DoctorError::BinaryNotFound
#[derive(Debug, Error)]
pub enum DoctorError {
    /// CPU architecture has no published release artifact.
    #[error("Unsupported architecture '{arch}': no release artifact exists for this platform")]
    UnsupportedArch { arch: String },

    /// Could not create the target install directory.
    #[error("Failed to create install directory {path}: {message}")]
    InstallDirCreation { path: PathBuf, message: String },

    /// Binary still missing after every install method was tried.
    #[error("uv binary not found after installation: {message}")]
    BinaryNotFound { message: String },

    /// A download attempt failed (recoverable: triggers the fallback tier).
    #[error("Download failed for {url}: {message}")]
    DownloadFailed { url: String, message: String },

    /// Shell profile file could not be updated.
    #[error("Failed to update profile {path}: {message}")]
    ProfileWrite { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DoctorError {
    /// Whether this error must abort the run with a non-zero exit.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DoctorError::UnsupportedArch { .. }
                | DoctorError::InstallDirCreation { .. }
                | DoctorError::BinaryNotFound { .. }
        )
    }
}

/// Result type alias for uv-doctor operations.
pub type Result<T> = std::result::Result<T, DoctorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_arch_displays_architecture() {
        let err = DoctorError::UnsupportedArch {
            arch: "riscv64".into(),
        };
        assert!(err.to_string().contains("riscv64"));
    }

    #[test]
    fn install_dir_creation_displays_path_and_message() {
        let err = DoctorError::InstallDirCreation {
            path: PathBuf::from("/opt/uv"),
            message: "permission denied".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/opt/uv"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn download_failed_displays_url() {
        let err = DoctorError::DownloadFailed {
            url: "https://example.com/uv.tar.gz".into(),
            message: "timed out".into(),
        };
        assert!(err.to_string().contains("https://example.com/uv.tar.gz"));
    }

    #[test]
    fn fatal_classification() {
        assert!(DoctorError::UnsupportedArch {
            arch: "mips".into()
        }
        .is_fatal());
        assert!(DoctorError::BinaryNotFound {
            message: "tried everything".into()
        }
        .is_fatal());
        assert!(!DoctorError::DownloadFailed {
            url: "u".into(),
            message: "m".into()
        }
        .is_fatal());
        assert!(!DoctorError::ProfileWrite {
            path: PathBuf::from("/p"),
            message: "m".into()
        }
        .is_fatal());
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: DoctorError = io_err.into();
        assert!(matches!(err, DoctorError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(DoctorError::BinaryNotFound {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
