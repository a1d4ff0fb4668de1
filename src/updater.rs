//! The update pipeline: read the pinned state, resolve the upstream version and, when
//! the upstream one is newer, rewrite and commit the artifacts.

use tracing::info;

use crate::config::UpdaterConfig;
use crate::error::UpdateError;
use crate::state::{ArtifactPaths, BuildArgs, BuildRecipe, LocalState, VersionManifest};
use crate::upstream::ListingSource;
use crate::vcs::{CommandRunner, Git};
use crate::version::{DottedVersion, ListingPattern};

/// Result of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The upstream version is not newer than the pinned one
    UpToDate { local: String, upstream: String },
    /// The artifacts were rewritten and committed
    Updated { previous: String, current: String },
    /// An update is available but the run was a dry run
    WouldUpdate { previous: String, current: String },
}

/// New artifact contents for an upgrade, computed without touching the filesystem
#[derive(Debug, Clone)]
pub struct UpdatePlan {
    pub previous: String,
    pub resolved: DottedVersion,
    pub padded: DottedVersion,
    pub manifest: VersionManifest,
    pub build_args: BuildArgs,
    pub recipe: BuildRecipe,
}

/// Decides whether `resolved` supersedes the pinned state.
///
/// Returns `None` when the resolved version is not newer than the local one.
pub fn plan_update(state: &LocalState, resolved: &DottedVersion) -> Option<UpdatePlan> {
    if resolved <= state.local_version() {
        return None;
    }

    let padded = resolved.padded();
    // Exactly as listed upstream; it ends up in the archive download URL
    let unpadded = resolved.as_str();

    let mut build_args = state.build_args.clone();
    build_args.set_pinned_version(unpadded);

    let mut manifest = state.manifest.clone();
    manifest.set_version(&padded);

    let recipe = state.recipe.with_version(unpadded);

    Some(UpdatePlan {
        previous: state.manifest.raw_version().to_string(),
        resolved: resolved.clone(),
        padded,
        manifest,
        build_args,
        recipe,
    })
}

pub struct Updater<L, R> {
    config: UpdaterConfig,
    pattern: ListingPattern,
    listing: L,
    git: Git<R>,
}

impl<L: ListingSource, R: CommandRunner> Updater<L, R> {
    pub fn new(config: UpdaterConfig, listing: L, runner: R) -> Result<Self, UpdateError> {
        let pattern = ListingPattern::new(&config.product, &config.archive_extension)
            .map_err(crate::error::ResolutionError::from)?;

        Ok(Self {
            config,
            pattern,
            listing,
            git: Git::new(runner),
        })
    }

    /// Performs one check and at most one update
    pub async fn run(&self) -> Result<UpdateOutcome, UpdateError> {
        let paths = self.config.artifact_paths();

        let state = LocalState::read(&paths, &self.config.version_arg)?;
        info!("Current repo version: {}", state.manifest.raw_version());

        info!(
            "Checking {} releases at {}",
            self.pattern.product(),
            self.listing.location()
        );
        let body = self.listing.fetch_listing().await?;
        let resolved = self.pattern.resolve(&body)?;
        info!("Current upstream version: {}", resolved);

        let Some(plan) = plan_update(&state, &resolved) else {
            info!("No upgrade required");
            return Ok(UpdateOutcome::UpToDate {
                local: state.manifest.raw_version().to_string(),
                upstream: resolved.to_string(),
            });
        };

        info!("Upgrade required, new version: {}", plan.padded);

        if self.config.dry_run {
            info!("Dry run, leaving artifacts untouched");
            return Ok(UpdateOutcome::WouldUpdate {
                previous: plan.previous,
                current: plan.padded.to_string(),
            });
        }

        self.apply(&paths, &plan).await?;

        Ok(UpdateOutcome::Updated {
            previous: plan.previous,
            current: plan.padded.to_string(),
        })
    }

    /// Writes the planned artifacts and commits them. Nothing is rolled back if a git
    /// command fails after the files were written.
    async fn apply(&self, paths: &ArtifactPaths, plan: &UpdatePlan) -> Result<(), UpdateError> {
        let build_args = plan.build_args.render(&paths.build_args)?;
        let manifest = plan.manifest.render(&paths.manifest)?;

        crate::state::write_atomically(&[
            (paths.build_args.as_path(), build_args.as_str()),
            (paths.manifest.as_path(), manifest.as_str()),
            (paths.recipe.as_path(), plan.recipe.text()),
        ])?;

        if let Some(identity) = &self.config.git_identity {
            self.git.configure_identity(identity).await?;
        }
        self.git.stage(&paths.staging_order()).await?;
        self.git
            .commit(&self.config.commit_message(&plan.padded.to_string()))
            .await?;

        Ok(())
    }
}
