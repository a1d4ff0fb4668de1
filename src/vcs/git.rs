//! Git operations used to record an update

use std::path::Path;

use tracing::info;

use crate::config::GitIdentity;
use crate::error::CommandError;
use crate::vcs::CommandRunner;

const GIT: &str = "git";

pub struct Git<R> {
    runner: R,
}

impl<R: CommandRunner> Git<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Sets the repository-local author identity used for the commit
    pub async fn configure_identity(&self, identity: &GitIdentity) -> Result<(), CommandError> {
        self.run_checked(&["config", "--local", "user.name", identity.name.as_str()])
            .await?;
        self.run_checked(&["config", "--local", "user.email", identity.email.as_str()])
            .await
    }

    pub async fn stage(&self, paths: &[&Path]) -> Result<(), CommandError> {
        let mut args = vec!["add".to_string()];
        args.extend(paths.iter().map(|p| p.to_string_lossy().into_owned()));
        self.run_argv(args).await
    }

    pub async fn commit(&self, message: &str) -> Result<(), CommandError> {
        self.run_checked(&["commit", "-m", message]).await?;
        info!("Committed: {}", message);
        Ok(())
    }

    async fn run_checked(&self, args: &[&str]) -> Result<(), CommandError> {
        self.run_argv(args.iter().map(|s| s.to_string()).collect())
            .await
    }

    async fn run_argv(&self, args: Vec<String>) -> Result<(), CommandError> {
        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(GIT.to_string());
        argv.extend(args);

        match self.runner.run(&argv).await? {
            Some(0) => Ok(()),
            code => Err(CommandError::NonZeroExit {
                command: argv.join(" "),
                code,
            }),
        }
    }
}
