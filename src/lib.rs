//! Upstream release checker for a pinned add-on version
//!
//! A run reads the locally pinned version, resolves the single version referenced by
//! the upstream release listing and, when the upstream one is newer, rewrites the
//! pinned artifacts and commits them.
//!
//! # Modules
//!
//! - [`config`]: Run configuration and defaults
//! - [`error`]: Error types for every stage of a run
//! - [`state`]: Reading and rendering of the pinned artifacts
//! - [`version`]: Dotted version parsing and listing extraction
//! - [`upstream`]: Fetching the upstream release listing
//! - [`vcs`]: External command execution and git operations
//! - [`updater`]: The read → resolve → apply pipeline

pub mod config;
pub mod error;
pub mod state;
pub mod updater;
pub mod upstream;
pub mod vcs;
pub mod version;
