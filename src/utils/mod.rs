//! Utility functions and helpers.
//!
//! - [`formatters`]: retention, age and timestamp formatting
//! - [`paths`]: tilde expansion, absolute paths, lexical normalization
//!
//! # Examples
//!
//! ```
//! use reaper::utils::formatters::format_retention;
//!
//! assert_eq!(format_retention(3600), "1h");
//! ```

/// Human-readable formatting of durations and timestamps
pub mod formatters;
/// Path manipulation and normalization utilities
pub mod paths;

use std::path::Path;
use walkdir::WalkDir;

/// Counts the entries below `dir` (files, directories and links), not
/// counting `dir` itself. Symlinks are not followed. Unreadable entries are
/// skipped.
#[must_use]
pub fn count_entries(dir: &Path) -> usize {
    WalkDir::new(dir)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .count()
}
