//! Two-tier uv installation: bootstrap script first, direct release
//! download on failure.
//!
//! The primary path fetches the official bootstrap script and runs it with
//! the install directory pinned. If that fails for any reason, the fallback
//! asks the release-metadata API for the latest tag and fetches the
//! architecture-specific tarball directly. Only the fallback can hit the
//! unsupported-architecture fatal error; the primary path is
//! architecture-agnostic.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context};
use serde::Deserialize;

use crate::error::{DoctorError, Result};
use crate::scan::TOOL_NAME;
use crate::shell::command::{run, CommandOptions};
use crate::ui::Printer;

/// Official bootstrap script.
pub const BOOTSTRAP_URL: &str = "https://astral.sh/uv/install.sh";

/// Release-metadata endpoint for the fallback tier.
pub const RELEASE_API_URL: &str = "https://api.github.com/repos/astral-sh/uv/releases/latest";

/// HTTP timeout for metadata and script fetches.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Ceiling for the bootstrap script run and the tarball download, which both
/// move real bytes. Overrun is a soft failure like any other.
const INSTALL_STEP_TIMEOUT: Duration = Duration::from_secs(120);

/// Map `uname -m` output to the release artifact's platform suffix.
///
/// Exactly two architectures have published artifacts; anything else is
/// fatal in the fallback path.
pub fn platform_token(arch: &str) -> Result<&'static str> {
    match arch {
        "arm64" | "aarch64" => Ok("aarch64-apple-darwin"),
        "x86_64" => Ok("x86_64-apple-darwin"),
        other => Err(DoctorError::UnsupportedArch {
            arch: other.to_string(),
        }),
    }
}

#[derive(Debug, Deserialize)]
struct ReleaseMetadata {
    tag_name: String,
}

/// Downloads and places the uv binary.
pub struct Installer {
    client: reqwest::blocking::Client,
    install_dir: PathBuf,
}

impl Installer {
    pub fn new(install_dir: PathBuf) -> Self {
        Self {
            client: reqwest::blocking::Client::builder()
                .timeout(FETCH_TIMEOUT)
                .user_agent(concat!("uv-doctor/", env!("CARGO_PKG_VERSION")))
                .build()
                .expect("Failed to create HTTP client"),
            install_dir,
        }
    }

    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    /// Install uv, returning the path of the placed binary.
    ///
    /// Fatal errors: the install directory cannot be created, the fallback
    /// hits an unsupported architecture, or no method leaves a binary behind.
    pub fn install(&self, arch: &str, printer: &Printer) -> Result<PathBuf> {
        fs::create_dir_all(&self.install_dir).map_err(|e| DoctorError::InstallDirCreation {
            path: self.install_dir.clone(),
            message: e.to_string(),
        })?;

        match self.run_bootstrap() {
            Ok(()) => {
                let binary = self.install_dir.join(TOOL_NAME);
                if binary.is_file() {
                    printer.ok("Bootstrap install completed");
                    return Ok(binary);
                }
                printer.warn("Bootstrap script ran but left no binary; trying direct download");
            }
            Err(e) => {
                printer.warn(&format!("Bootstrap install failed: {:#}", e));
                printer.info("Falling back to direct release download");
            }
        }

        self.direct_download(arch, printer)
    }

    /// Primary tier: fetch the bootstrap script and run it with the install
    /// directory pinned.
    fn run_bootstrap(&self) -> anyhow::Result<()> {
        tracing::debug!("Fetching bootstrap script from {}", BOOTSTRAP_URL);
        let script = self.fetch_text(BOOTSTRAP_URL)?;

        let staging = tempfile::TempDir::new().context("Failed to create staging directory")?;
        let script_path = staging.path().join("install.sh");
        fs::write(&script_path, script).context("Failed to write bootstrap script")?;

        let options = CommandOptions {
            env: HashMap::from([
                (
                    "UV_INSTALL_DIR".to_string(),
                    self.install_dir.display().to_string(),
                ),
                // The profile update is ours; the script must not race us.
                ("UV_NO_MODIFY_PATH".to_string(), "1".to_string()),
            ]),
            timeout: INSTALL_STEP_TIMEOUT,
            ..Default::default()
        };
        let script_arg = script_path.display().to_string();
        let result = run(Path::new("sh"), &[script_arg.as_str()], &options);

        if result.success {
            Ok(())
        } else {
            Err(anyhow!(
                "bootstrap script exited with {:?}: {}",
                result.exit_code,
                result.combined_output()
            ))
        }
    }

    /// Fallback tier: resolve the latest tag, fetch the architecture-specific
    /// tarball, extract, and place the binary.
    fn direct_download(&self, arch: &str, printer: &Printer) -> Result<PathBuf> {
        let token = platform_token(arch)?;
        let tag = self.latest_tag().map_err(|e| DoctorError::BinaryNotFound {
            message: format!("release metadata fetch failed: {:#}", e),
        })?;
        printer.info(&format!("Latest release: {}", tag));

        let url = format!(
            "https://github.com/astral-sh/uv/releases/download/{}/uv-{}.tar.gz",
            tag, token
        );

        let staging = tempfile::TempDir::new().map_err(DoctorError::Io)?;
        let tarball = staging.path().join("uv.tar.gz");
        self.fetch_binary(&url, &tarball)
            .map_err(|e| DoctorError::DownloadFailed {
                url: url.clone(),
                message: format!("{:#}", e),
            })?;

        self.extract_and_place(&tarball, staging.path(), token)
    }

    fn latest_tag(&self) -> anyhow::Result<String> {
        let body = self.fetch_text(RELEASE_API_URL)?;
        let release: ReleaseMetadata =
            serde_json::from_str(&body).context("Failed to parse release metadata")?;
        Ok(release.tag_name)
    }

    fn fetch_text(&self, url: &str) -> anyhow::Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to fetch {}", url))?;
        if !response.status().is_success() {
            return Err(anyhow!("HTTP {} fetching {}", response.status(), url));
        }
        response
            .text()
            .with_context(|| format!("Failed to read response from {}", url))
    }

    fn fetch_binary(&self, url: &str, dest: &Path) -> anyhow::Result<()> {
        tracing::debug!("Downloading {}", url);
        let response = self
            .client
            .get(url)
            .timeout(INSTALL_STEP_TIMEOUT)
            .send()
            .with_context(|| format!("Failed to fetch {}", url))?;
        if !response.status().is_success() {
            return Err(anyhow!("HTTP {} fetching {}", response.status(), url));
        }
        let bytes = response.bytes().context("Failed to read tarball body")?;
        fs::write(dest, &bytes).with_context(|| format!("Failed to write {}", dest.display()))?;
        Ok(())
    }

    /// Extract the tarball (macOS bundled tar) and move the binary into the
    /// install directory with executable permissions.
    fn extract_and_place(&self, tarball: &Path, staging: &Path, token: &str) -> Result<PathBuf> {
        let options = CommandOptions {
            cwd: Some(staging.to_path_buf()),
            ..Default::default()
        };
        let tarball_arg = tarball.display().to_string();
        let result = run(Path::new("tar"), &["-xzf", tarball_arg.as_str()], &options);
        if !result.success {
            return Err(DoctorError::BinaryNotFound {
                message: format!("tarball extraction failed: {}", result.combined_output()),
            });
        }

        // Release tarballs unpack to uv-<token>/uv.
        let extracted = staging.join(format!("uv-{}", token)).join(TOOL_NAME);
        let extracted = if extracted.is_file() {
            extracted
        } else {
            // Some releases ship the binary at the archive root.
            staging.join(TOOL_NAME)
        };
        if !extracted.is_file() {
            return Err(DoctorError::BinaryNotFound {
                message: "extracted archive contained no uv binary".to_string(),
            });
        }

        let target = self.install_dir.join(TOOL_NAME);
        fs::copy(&extracted, &target).map_err(DoctorError::Io)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&target, fs::Permissions::from_mode(0o755))
                .map_err(DoctorError::Io)?;
        }
        tracing::debug!("Placed binary at {}", target.display());
        Ok(target)
    }
}
