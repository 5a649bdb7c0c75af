//! Command-line interface definitions for reaper.
//!
//! The CLI definition is shared between the main binary and build tools (like
//! xtask) for man page generation.
//!
//! Note: Field-level documentation is provided via clap attributes, so we allow
//! missing_docs for this module to avoid redundant documentation.

#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use anyhow::{Result, anyhow};
use clap::{ArgAction, ArgGroup, Parser};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::{REGISTRY_ENV, Settings, Verbosity};
use crate::engine::Mode;

pub const SECS_PER_MINUTE: u64 = 60;
pub const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
pub const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;
pub const SECS_PER_WEEK: u64 = 7 * SECS_PER_DAY;
/// A "year" is 52 weeks.
pub const SECS_PER_YEAR: u64 = 52 * SECS_PER_WEEK;

/// Main CLI structure for reaper.
#[derive(Parser, Debug)]
#[command(
    name = "reap",
    version = crate::VERSION,
    about = "Delete files and directories once they outlive their retention",
    long_about = "Track paths with a retention period and delete them once they have not \
                  been modified for longer than that. Run with --delete from a periodic job.",
    after_help = "DEFAULT ACTION: add the given paths to the tracked list",
    group(ArgGroup::new("mode").args(["list", "unlist", "delete"]).multiple(false))
)]
pub struct Cli {
    /// Paths or glob patterns to track or untrack
    pub paths: Vec<String>,

    /// Retention in seconds
    #[arg(short = 'S', long, value_name = "N")]
    pub seconds: Option<u64>,

    /// Retention in minutes
    #[arg(short = 'M', long, value_name = "N")]
    pub minutes: Option<u64>,

    /// Retention in hours
    #[arg(short = 'H', long, value_name = "N")]
    pub hours: Option<u64>,

    /// Retention in days
    #[arg(short = 'D', long, value_name = "N")]
    pub days: Option<u64>,

    /// Retention in weeks
    #[arg(short = 'W', long, value_name = "N")]
    pub weeks: Option<u64>,

    /// Retention in years of 364 days
    #[arg(short = 'Y', long, value_name = "N")]
    pub years: Option<u64>,

    /// Be verbose (repeat up to -vvv for diagnostic tracing)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Allow zero retention and remove expired directories without asking
    #[arg(short, long)]
    pub force: bool,

    /// List tracked paths
    #[arg(short, long)]
    pub list: bool,

    /// Stop tracking the given paths
    #[arg(long)]
    pub unlist: bool,

    /// Delete tracked paths whose retention has passed
    #[arg(long)]
    pub delete: bool,

    /// With --delete: show what would be removed without removing anything
    #[arg(long, requires = "delete")]
    pub dry_run: bool,

    /// With --delete: also untrack paths that were removed or no longer exist
    #[arg(long, requires = "delete")]
    pub prune: bool,

    /// Registry file to use
    #[arg(long, value_name = "PATH", env = REGISTRY_ENV)]
    pub registry: Option<PathBuf>,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL", value_enum)]
    pub completions: Option<Shell>,
}

impl Cli {
    /// Total retention from all unit flags, in seconds.
    ///
    /// # Errors
    ///
    /// Returns an error if the total does not fit in 64 bits.
    pub fn retention_secs(&self) -> Result<u64> {
        let parts = [
            (self.seconds, 1),
            (self.minutes, SECS_PER_MINUTE),
            (self.hours, SECS_PER_HOUR),
            (self.days, SECS_PER_DAY),
            (self.weeks, SECS_PER_WEEK),
            (self.years, SECS_PER_YEAR),
        ];

        parts
            .into_iter()
            .filter_map(|(count, unit)| count.map(|count| count.checked_mul(unit)))
            .try_fold(0u64, |total, secs| {
                secs.and_then(|secs| total.checked_add(secs))
            })
            .ok_or_else(|| anyhow!("Retention period is too large"))
    }

    #[must_use]
    pub const fn settings(&self) -> Settings {
        Settings {
            verbosity: Verbosity(self.verbose),
            force: self.force,
            dry_run: self.dry_run,
            prune: self.prune,
        }
    }

    /// The operation selected by the mode flags; add when none is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the retention flags overflow.
    pub fn mode(&self) -> Result<Mode> {
        Ok(if self.list {
            Mode::List
        } else if self.unlist {
            Mode::Unlist {
                patterns: self.paths.clone(),
            }
        } else if self.delete {
            Mode::Expire
        } else {
            Mode::Add {
                patterns: self.paths.clone(),
                retention_secs: self.retention_secs()?,
            }
        })
    }
}
