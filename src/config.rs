use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::state::ArtifactPaths;

// =============================================================================
// Defaults
// =============================================================================

/// Upstream page listing the stable release archives
pub const DEFAULT_UPSTREAM_URL: &str = "https://pkgs.tailscale.com/stable/";

/// Product prefix of the archive filenames in the listing
pub const DEFAULT_PRODUCT: &str = "tailscale";

/// Extension of the archive filenames in the listing
pub const DEFAULT_ARCHIVE_EXTENSION: &str = "tgz";

/// Directory holding the pinned artifacts, relative to the working directory
pub const DEFAULT_ADDON_DIR: &str = "tailscale";

pub const DEFAULT_MANIFEST_FILE: &str = "config.json";
pub const DEFAULT_BUILD_ARGS_FILE: &str = "build.json";
pub const DEFAULT_RECIPE_FILE: &str = "Dockerfile";

/// Build-args key and recipe `ARG` name holding the pinned version
pub const DEFAULT_VERSION_ARG: &str = "TAILSCALE_VERSION";

/// Timeout for the listing request in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Run configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdaterConfig {
    pub upstream_url: String,
    pub product: String,
    pub archive_extension: String,
    pub addon_dir: PathBuf,
    pub files: ArtifactFiles,
    pub version_arg: String,
    /// Listing request timeout in milliseconds
    pub fetch_timeout: u64,
    pub git_identity: Option<GitIdentity>,
    /// Decide but never write or commit
    pub dry_run: bool,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            product: DEFAULT_PRODUCT.to_string(),
            archive_extension: DEFAULT_ARCHIVE_EXTENSION.to_string(),
            addon_dir: PathBuf::from(DEFAULT_ADDON_DIR),
            files: ArtifactFiles::default(),
            version_arg: DEFAULT_VERSION_ARG.to_string(),
            fetch_timeout: FETCH_TIMEOUT_MS,
            git_identity: None,
            dry_run: false,
        }
    }
}

/// File names of the pinned artifacts inside the add-on directory
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ArtifactFiles {
    pub manifest: String,
    pub build_args: String,
    pub recipe: String,
}

impl Default for ArtifactFiles {
    fn default() -> Self {
        Self {
            manifest: DEFAULT_MANIFEST_FILE.to_string(),
            build_args: DEFAULT_BUILD_ARGS_FILE.to_string(),
            recipe: DEFAULT_RECIPE_FILE.to_string(),
        }
    }
}

/// Author identity written to the repository-local git config before committing
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GitIdentity {
    pub name: String,
    pub email: String,
}

impl UpdaterConfig {
    /// Loads the config from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            manifest: self.addon_dir.join(&self.files.manifest),
            build_args: self.addon_dir.join(&self.files.build_args),
            recipe: self.addon_dir.join(&self.files.recipe),
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout)
    }

    pub fn commit_message(&self, version: &str) -> String {
        format!("updated {} to {}", self.product, version)
    }
}
