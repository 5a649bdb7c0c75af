//! Per-invocation settings and registry location.
//!
//! Settings are built once from the command line and passed by reference to
//! every engine operation. Nothing here is process-global.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::{DEFAULT_REGISTRY_DIR, REGISTRY_FILE};

/// Environment variable overriding the registry location.
pub const REGISTRY_ENV: &str = "REAPER_REGISTRY";

/// How chatty an invocation is, counted from repeated `-v` flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Verbosity(pub u8);

impl Verbosity {
    /// Level at which internal diagnostic tracing is switched on.
    pub const DEBUG: u8 = 3;

    /// Whether per-path confirmations ("Tracking file", "removed") are printed.
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        self.0 >= 1
    }

    /// Whether internal diagnostic tracing is switched on.
    #[must_use]
    pub const fn is_debug(self) -> bool {
        self.0 >= Self::DEBUG
    }

    /// `tracing-subscriber` filter directive for this level, used when
    /// `RUST_LOG` is not set.
    #[must_use]
    pub const fn filter_directive(self) -> &'static str {
        match self.0 {
            0..=2 => "warn",
            3 => "reaper=debug",
            _ => "reaper=trace",
        }
    }
}

/// Flags shared by every operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settings {
    /// Number of `-v` flags given
    pub verbosity: Verbosity,
    /// Allow zero-retention adds and skip the directory confirmation gate
    pub force: bool,
    /// Report what an expire pass would delete without touching anything
    pub dry_run: bool,
    /// Drop registry entries for paths an expire pass removed or found missing
    pub prune: bool,
}

impl Settings {
    /// User-facing printer at this verbosity.
    #[must_use]
    pub fn output(&self) -> crate::output::Output {
        crate::output::Output::new(self.verbosity)
    }
}

/// Default registry location: `~/.file_watcher/file_list.json`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_registry_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not find home directory")?;
    Ok(home.join(DEFAULT_REGISTRY_DIR).join(REGISTRY_FILE))
}

/// Picks the registry location: an explicit path wins, then the default.
///
/// The `REAPER_REGISTRY` variable is read by the CLI layer and arrives here as
/// the explicit path.
///
/// # Errors
///
/// Returns an error if no explicit path is given and the home directory
/// cannot be determined.
pub fn resolve_registry_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => crate::utils::paths::make_absolute(&path),
        None => default_registry_path(),
    }
}
