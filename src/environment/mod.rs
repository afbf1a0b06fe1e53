//! Environment inspection: system facts, tracked variables, PATH entries.

pub mod path;
pub mod reader;

pub use path::{classify, current_dirs, current_entries, PathEntry};
pub use reader::{EnvReport, SystemInfo, NOT_SET, TRACKED_VARS};
