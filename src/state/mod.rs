//! Pinned artifacts
//!
//! - [`manifest`]: Version manifest (`config.json`)
//! - [`build_args`]: Build-argument manifest (`build.json`)
//! - [`recipe`]: Container build recipe (`Dockerfile`)

pub mod build_args;
mod json;
pub mod manifest;
pub mod recipe;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::ArtifactError;
use crate::version::DottedVersion;

pub use build_args::BuildArgs;
pub use manifest::VersionManifest;
pub use recipe::BuildRecipe;

/// Locations of the three pinned artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub manifest: PathBuf,
    pub build_args: PathBuf,
    pub recipe: PathBuf,
}

impl ArtifactPaths {
    /// Paths in the order they are handed to `git add`
    pub fn staging_order(&self) -> [&Path; 3] {
        [&self.manifest, &self.recipe, &self.build_args]
    }
}

/// The locally pinned state loaded at the start of a run
#[derive(Debug, Clone)]
pub struct LocalState {
    pub manifest: VersionManifest,
    pub build_args: BuildArgs,
    pub recipe: BuildRecipe,
}

impl LocalState {
    /// Loads all three artifacts. `version_arg` names both the build-args key and the
    /// recipe `ARG` declaration.
    pub fn read(paths: &ArtifactPaths, version_arg: &str) -> Result<Self, ArtifactError> {
        let manifest = VersionManifest::parse(&paths.manifest, &read_text(&paths.manifest)?)?;
        let build_args =
            BuildArgs::parse(&paths.build_args, &read_text(&paths.build_args)?, version_arg)?;
        let recipe = BuildRecipe::parse(&paths.recipe, read_text(&paths.recipe)?, version_arg)?;

        let state = Self {
            manifest,
            build_args,
            recipe,
        };
        state.warn_on_drift(paths);
        Ok(state)
    }

    pub fn local_version(&self) -> &DottedVersion {
        self.manifest.version()
    }

    fn warn_on_drift(&self, paths: &ArtifactPaths) {
        let local = self.local_version();
        let pinned = [
            (&paths.build_args, self.build_args.pinned_version()),
            (&paths.recipe, self.recipe.pinned_version()),
        ];

        for (path, raw) in pinned {
            match raw.parse::<DottedVersion>() {
                Ok(version) if version == *local => {}
                Ok(version) => warn!(
                    "{:?} pins {} but the manifest records {}",
                    path, version, local
                ),
                Err(e) => warn!("{:?} pins an unreadable version {:?}: {}", path, raw, e),
            }
        }
    }
}

pub fn read_text(path: &Path) -> Result<String, ArtifactError> {
    debug!("Reading {:?}", path);
    fs::read_to_string(path).map_err(|e| ArtifactError::io(path, e))
}

/// Replaces each file's content through a temporary file in the same directory.
///
/// All temporary files are written before the first rename, so a failure while
/// writing leaves every artifact untouched.
pub fn write_atomically(files: &[(&Path, &str)]) -> Result<(), ArtifactError> {
    let mut staged = Vec::with_capacity(files.len());

    for (path, contents) in files {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| ArtifactError::io(*path, e))?;
        tmp.write_all(contents.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| ArtifactError::io(*path, e))?;
        staged.push((*path, tmp));
    }

    for (path, tmp) in staged {
        // NamedTempFile is created 0600; keep the original file's permissions
        if let Ok(metadata) = fs::metadata(path) {
            fs::set_permissions(tmp.path(), metadata.permissions())
                .map_err(|e| ArtifactError::io(path, e))?;
        }
        tmp.persist(path)
            .map_err(|e| ArtifactError::io(path, e.error))?;
        debug!("Wrote {:?}", path);
    }

    Ok(())
}
