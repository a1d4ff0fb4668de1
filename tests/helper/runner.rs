//! Command runner test utilities

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use tailscale_updater::error::CommandError;
use tailscale_updater::vcs::CommandRunner;

/// Records every command and answers with a configured exit code
#[derive(Clone, Default)]
pub struct RecordingRunner {
    calls: Arc<Mutex<Vec<Vec<String>>>>,
    exit_codes: HashMap<String, i32>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `git <subcommand>` exit with `code`; everything else exits 0
    pub fn with_exit_code(mut self, subcommand: &str, code: i32) -> Self {
        self.exit_codes.insert(subcommand.to_string(), code);
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, argv: &[String]) -> Result<Option<i32>, CommandError> {
        self.calls.lock().unwrap().push(argv.to_vec());
        let code = argv
            .get(1)
            .and_then(|subcommand| self.exit_codes.get(subcommand))
            .copied()
            .unwrap_or(0);
        Ok(Some(code))
    }
}
