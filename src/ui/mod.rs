//! Terminal output: theme, status markers, and the report printer.

pub mod icons;
pub mod theme;

pub use icons::StatusKind;
pub use theme::DoctorTheme;

/// Report printer that prefixes every line with a status marker.
///
/// Falls back to bracketed markers (`[ok]`, `[FAIL]`, ...) when colors are
/// disabled (non-TTY or `NO_COLOR`). Quiet mode suppresses info lines only;
/// warnings and failures always print.
#[derive(Debug)]
pub struct Printer {
    theme: DoctorTheme,
    colors: bool,
    quiet: bool,
}

impl Printer {
    /// Create a printer, detecting color support from the terminal.
    pub fn new(quiet: bool) -> Self {
        Self {
            theme: DoctorTheme::new(),
            colors: console::colors_enabled(),
            quiet,
        }
    }

    /// Create a printer with explicit color control (used by tests).
    pub fn with_colors(quiet: bool, colors: bool) -> Self {
        Self {
            theme: DoctorTheme::new(),
            colors,
            quiet,
        }
    }

    /// Print a line with the given status marker.
    pub fn status(&self, kind: StatusKind, msg: &str) {
        if self.quiet && kind == StatusKind::Info {
            return;
        }
        if self.colors {
            println!("{}", kind.format(&self.theme, msg));
        } else {
            println!("{}", kind.format_plain(msg));
        }
    }

    /// Print a section header.
    pub fn header(&self, title: &str) {
        if self.quiet {
            return;
        }
        if self.colors {
            println!("\n{}", self.theme.header.apply_to(title));
        } else {
            println!("\n== {} ==", title);
        }
    }

    /// Print a key/value fact line.
    pub fn fact(&self, key: &str, value: &str) {
        if self.quiet {
            return;
        }
        if self.colors {
            println!(
                "  {}: {}",
                self.theme.key.apply_to(key),
                self.theme.value.apply_to(value)
            );
        } else {
            println!("  {}: {}", key, value);
        }
    }

    /// Print an unprefixed line (summary text, quick-fix commands).
    pub fn plain(&self, msg: &str) {
        println!("{}", msg);
    }

    pub fn ok(&self, msg: &str) {
        self.status(StatusKind::Ok, msg);
    }

    pub fn fail(&self, msg: &str) {
        self.status(StatusKind::Fail, msg);
    }

    pub fn info(&self, msg: &str) {
        self.status(StatusKind::Info, msg);
    }

    pub fn warn(&self, msg: &str) {
        self.status(StatusKind::Warn, msg);
    }
}
