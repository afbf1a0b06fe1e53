//! Unified status vocabulary for consistent CLI output.
//!
//! `StatusKind` provides a single canonical set of status markers and
//! colors used by every report line: ok, fail, info, warn.

use super::theme::DoctorTheme;

/// Canonical status kinds prefixing every report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// Check passed or fact is healthy.
    Ok,
    /// Check failed.
    Fail,
    /// Neutral information.
    Info,
    /// Non-fatal problem worth attention.
    Warn,
}

impl StatusKind {
    /// Unicode icon for TTY output.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Ok => "✓",
            Self::Fail => "✗",
            Self::Info => "·",
            Self::Warn => "⚠",
        }
    }

    /// Bracketed text for non-TTY output.
    pub fn bracketed(self) -> &'static str {
        match self {
            Self::Ok => "[ok]",
            Self::Fail => "[FAIL]",
            Self::Info => "[info]",
            Self::Warn => "[warn]",
        }
    }

    /// Styled icon string using the given theme.
    pub fn styled(self, theme: &DoctorTheme) -> String {
        let icon = self.icon();
        match self {
            Self::Ok => theme.success.apply_to(icon).to_string(),
            Self::Fail => theme.error.apply_to(icon).to_string(),
            Self::Info => theme.dim.apply_to(icon).to_string(),
            Self::Warn => theme.warning.apply_to(icon).to_string(),
        }
    }

    /// Format a status line: styled icon + message.
    pub fn format(self, theme: &DoctorTheme, msg: &str) -> String {
        format!("{} {}", self.styled(theme), msg)
    }

    /// Format a status line for non-TTY: bracketed + message.
    pub fn format_plain(self, msg: &str) -> String {
        format!("{} {}", self.bracketed(), msg)
    }
}
