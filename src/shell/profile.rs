//! Idempotent shell-profile editing.
//!
//! The one durable side effect of an install run lives here: at most two
//! blocks appended to a single profile file. Each append is guarded by a
//! substring check against the current file contents and written as one
//! complete block in a single call, so repeated runs never duplicate lines
//! and a failed run never leaves a partial block behind.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{DoctorError, Result};

/// Comment line guarding the PATH export.
pub const EXPORT_GUARD: &str = "# Added by uv-doctor";

/// Opening marker of the auto-activation block. Its presence anywhere in the
/// file means the block was already installed.
pub const ACTIVATION_BEGIN: &str = "# >>> uv auto-activation >>>";

/// Closing marker of the auto-activation block.
pub const ACTIVATION_END: &str = "# <<< uv auto-activation <<<";

/// What a guarded append did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Block was written.
    Appended,
    /// Guard matched; file untouched.
    AlreadyPresent,
}

/// Diagnostic view of one candidate profile file.
#[derive(Debug, Clone)]
pub struct ProfileFile {
    pub path: PathBuf,
    pub exists: bool,
    /// The install directory already appears somewhere in the file.
    pub has_path_entry: bool,
    /// The auto-activation marker is present.
    pub has_activation_block: bool,
}

/// Inspect a profile file without touching it.
pub fn inspect(path: &Path, export_dir: &Path) -> ProfileFile {
    let contents = fs::read_to_string(path).unwrap_or_default();
    ProfileFile {
        path: path.to_path_buf(),
        exists: path.exists(),
        has_path_entry: contents.contains(&export_dir.display().to_string()),
        has_activation_block: contents.contains(ACTIVATION_BEGIN),
    }
}

/// Editor bound to one canonical profile file.
#[derive(Debug)]
pub struct ProfileEditor {
    path: PathBuf,
}

impl ProfileEditor {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the profile file (and parent directories) if absent.
    /// An empty profile is a valid profile.
    pub fn ensure_exists(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }
        fs::write(&self.path, "").map_err(|e| self.write_error(e))?;
        tracing::debug!("Created profile file {}", self.path.display());
        Ok(())
    }

    /// Append `export PATH="<dir>:$PATH"` unless the directory string already
    /// occurs anywhere in the file.
    pub fn append_path_export(&self, dir: &Path) -> Result<AppendOutcome> {
        self.ensure_exists()?;
        let contents = self.read()?;
        let dir_str = dir.display().to_string();
        if contents.contains(&dir_str) {
            tracing::debug!("PATH export for {} already present", dir_str);
            return Ok(AppendOutcome::AlreadyPresent);
        }

        let block = format!("\n{}\nexport PATH=\"{}:$PATH\"\n", EXPORT_GUARD, dir_str);
        self.append_block(&block)?;
        Ok(AppendOutcome::Appended)
    }

    /// Append the auto-activation block unless its marker is present.
    ///
    /// The block sources `.venv/bin/activate` on directory change: a chpwd
    /// hook under zsh, a PROMPT_COMMAND hook elsewhere.
    pub fn append_auto_activation(&self) -> Result<AppendOutcome> {
        self.ensure_exists()?;
        let contents = self.read()?;
        if contents.contains(ACTIVATION_BEGIN) {
            tracing::debug!("Auto-activation block already present");
            return Ok(AppendOutcome::AlreadyPresent);
        }

        self.append_block(&activation_block())?;
        Ok(AppendOutcome::Appended)
    }

    fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|e| self.write_error(e))
    }

    /// Append a complete block in a single write call. Existing content is
    /// never rewritten or reordered.
    fn append_block(&self, block: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| self.write_error(e))?;
        file.write_all(block.as_bytes())
            .map_err(|e| self.write_error(e))?;
        tracing::debug!("Appended {} bytes to {}", block.len(), self.path.display());
        Ok(())
    }

    fn write_error(&self, e: std::io::Error) -> DoctorError {
        DoctorError::ProfileWrite {
            path: self.path.clone(),
            message: e.to_string(),
        }
    }
}

/// The auto-activation snippet, delimited by unique markers.
fn activation_block() -> String {
    format!(
        r#"
{begin}
_uv_auto_activate() {{
  if [ -f .venv/bin/activate ] && [ -z "$VIRTUAL_ENV" ]; then
    . .venv/bin/activate
  fi
}}
if [ -n "$ZSH_VERSION" ]; then
  autoload -U add-zsh-hook
  add-zsh-hook chpwd _uv_auto_activate
else
  case "$PROMPT_COMMAND" in
    *_uv_auto_activate*) ;;
    *) PROMPT_COMMAND="_uv_auto_activate${{PROMPT_COMMAND:+;$PROMPT_COMMAND}}" ;;
  esac
fi
_uv_auto_activate
{end}
"#,
        begin = ACTIVATION_BEGIN,
        end = ACTIVATION_END
    )
}
