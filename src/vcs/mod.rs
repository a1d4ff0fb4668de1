//! External command execution
//!
//! - [`CommandRunner`]: runs a command vector and reports its exit code
//! - [`git`]: the git operations a run needs, built on a [`CommandRunner`]

#[cfg(test)]
use mockall::automock;

use tokio::process::Command;
use tracing::debug;

use crate::error::CommandError;

pub mod git;

pub use git::Git;

/// Trait for running an external command to completion
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `argv[0]` with the remaining elements as arguments
    ///
    /// # Returns
    /// * `Ok(Some(code))` - The process exited with `code`
    /// * `Ok(None)` - The process was terminated by a signal
    /// * `Err(CommandError)` - The process could not be started
    async fn run(&self, argv: &[String]) -> Result<Option<i32>, CommandError>;
}

/// Runs commands as child processes that share this process's stdio and working
/// directory
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, argv: &[String]) -> Result<Option<i32>, CommandError> {
        let command_line = argv.join(" ");
        let Some((program, args)) = argv.split_first() else {
            return Err(CommandError::Spawn {
                command: command_line,
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command"),
            });
        };

        let mut command = Command::new(program);
        command.args(args);

        debug!("Running `{}`", command_line);
        let status = command.status().await.map_err(|source| CommandError::Spawn {
            command: command_line.clone(),
            source,
        })?;
        debug!("`{}` finished with {}", command_line, status);

        Ok(status.code())
    }
}
