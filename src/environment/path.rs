//! PATH parsing and per-entry classification.

use std::ffi::OsStr;
use std::path::PathBuf;

/// One directory from the PATH variable, in search order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    pub dir: PathBuf,
    /// Whether the directory exists on disk. A pure function of filesystem
    /// state; position in the list does not affect it.
    pub exists: bool,
}

/// Split a PATH value on the platform separator and classify each entry.
/// Order is preserved.
pub fn classify(path_value: &OsStr) -> Vec<PathEntry> {
    std::env::split_paths(path_value)
        .map(|dir| {
            let exists = dir.is_dir();
            PathEntry { dir, exists }
        })
        .collect()
}

/// Classify the current process PATH. Unset PATH yields an empty list.
pub fn current_entries() -> Vec<PathEntry> {
    std::env::var_os("PATH")
        .map(|value| classify(&value))
        .unwrap_or_default()
}

/// The directories of the current PATH, existence ignored. This is the list
/// command resolution walks.
pub fn current_dirs() -> Vec<PathBuf> {
    current_entries().into_iter().map(|e| e.dir).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use tempfile::TempDir;

    #[test]
    fn classify_preserves_order() {
        let value = OsString::from("/usr/bin:/nonexistent-uv-doctor-test:/bin");
        let entries = classify(&value);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].dir, PathBuf::from("/usr/bin"));
        assert_eq!(entries[1].dir, PathBuf::from("/nonexistent-uv-doctor-test"));
        assert_eq!(entries[2].dir, PathBuf::from("/bin"));
    }

    #[test]
    fn classify_marks_existing_and_missing() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("gone");
        let value: OsString =
            std::env::join_paths([temp.path().to_path_buf(), missing.clone()]).unwrap();

        let entries = classify(&value);
        assert!(entries[0].exists);
        assert!(!entries[1].exists);
    }

    #[test]
    fn classification_independent_of_position() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("gone");

        let forward: OsString =
            std::env::join_paths([temp.path().to_path_buf(), missing.clone()]).unwrap();
        let backward: OsString =
            std::env::join_paths([missing.clone(), temp.path().to_path_buf()]).unwrap();

        let f = classify(&forward);
        let b = classify(&backward);
        assert_eq!(f[0].exists, b[1].exists);
        assert_eq!(f[1].exists, b[0].exists);
    }

    #[test]
    fn classify_empty_value() {
        let entries = classify(OsStr::new(""));
        assert!(entries.is_empty());
    }
}
