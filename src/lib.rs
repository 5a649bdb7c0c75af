#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

//! # Reaper - Retention-Based File Deletion
//!
//! Reaper keeps a registry of files and directories together with a retention
//! period. A later invocation, typically from a periodic job runner, deletes
//! every tracked path that has not been modified for longer than its
//! retention. Expired directories need an explicit confirmation before they
//! are removed recursively, unless forced.
//!
//! ## Architecture
//!
//! - [`registry`]: the persisted path → retention mapping
//! - [`resolver`]: glob and tilde expansion into absolute paths
//! - [`engine`]: add, list, unlist and expire, plus the confirmation gate
//! - [`config`]: per-invocation settings and registry location
//! - [`cli`]: command-line definition
//! - [`output`]: operator-facing messages
//! - [`utils`]: formatting and path helpers
//!
//! ## Example Usage
//!
//! ```no_run
//! use reaper::ReaperContext;
//! use reaper::config::Settings;
//! use reaper::engine::{self, Mode, gate::StdinResponder};
//! use std::time::SystemTime;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut ctx = ReaperContext::open(None, Settings::default())?;
//!
//! let mode = Mode::Add {
//!     patterns: vec!["/tmp/*.log".to_string()],
//!     retention_secs: 7 * 24 * 60 * 60,
//! };
//! engine::run(&mut ctx, &mode, &mut StdinResponder::stdio(), SystemTime::now())?;
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions (argument parsing structures).
pub mod cli;

/// Per-invocation settings and registry location.
pub mod config;

/// Retention engine operations.
pub mod engine;

/// Operator-facing output.
pub mod output;

/// Persisted registry of tracked paths.
pub mod registry;

/// Pattern expansion into absolute paths.
pub mod resolver;

/// Utility functions and helpers.
pub mod utils;

#[cfg(test)]
mod test_utils;

use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;

use config::Settings;
use registry::Registry;

/// Current version of the reaper binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Registry directory name within the home directory.
pub const DEFAULT_REGISTRY_DIR: &str = ".file_watcher";

/// Registry file name within [`DEFAULT_REGISTRY_DIR`].
pub const REGISTRY_FILE: &str = "file_list.json";

/// Everything one invocation works on: where the registry lives, the registry
/// itself, and the settings to run with.
#[derive(Debug, Clone)]
pub struct ReaperContext {
    /// Path to the registry file.
    pub registry_path: PathBuf,

    /// Registry loaded at the start of the invocation.
    pub registry: Registry,

    /// Settings threaded through every operation.
    pub settings: Settings,
}

impl ReaperContext {
    /// Opens the registry at `registry_path` (or the default location),
    /// creating an empty one first if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be determined, or a
    /// [`registry::RegistryError`] if the registry cannot be created or read.
    pub fn open(registry_path: Option<PathBuf>, settings: Settings) -> Result<Self> {
        let registry_path = config::resolve_registry_path(registry_path)?;
        debug!(path = %registry_path.display(), "opening registry");

        Registry::bootstrap(&registry_path)?;
        let registry = Registry::load(&registry_path)?;

        Ok(Self {
            registry_path,
            registry,
            settings,
        })
    }

    /// Writes the in-memory registry back to [`Self::registry_path`].
    ///
    /// # Errors
    ///
    /// Returns a [`registry::RegistryError::WriteFailed`] on I/O failure.
    pub fn save(&self) -> Result<()> {
        self.registry.save(&self.registry_path)?;
        Ok(())
    }
}
