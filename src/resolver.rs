//! Expansion of command-line patterns into absolute, de-duplicated paths.
//!
//! Patterns containing glob metacharacters are matched against the filesystem.
//! Anything else is taken literally, whether or not it exists, so entries for
//! files that have since vanished can still be named.

use anyhow::Result;
use glob::{MatchOptions, Pattern, PatternError};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::output::Output;
use crate::utils::paths::{expand_tilde, make_absolute};

/// `*` and `?` do not match a leading dot, so hidden files need an explicit `.`.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Whether `pattern` contains glob metacharacters.
#[must_use]
pub fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Resolves `patterns` into absolute paths, in first-seen order without
/// duplicates.
///
/// Invalid glob patterns are reported through `out` and skipped. A glob that
/// matches nothing contributes nothing.
///
/// # Errors
///
/// Returns an error if the home or current directory is needed and cannot be
/// determined.
pub fn resolve(patterns: &[String], out: &Output) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut resolved = Vec::new();

    for pattern in patterns {
        let expanded = expand_tilde(pattern)?;

        let candidates = if is_glob(pattern) {
            match expand_glob(&expanded) {
                Ok(paths) => paths,
                Err(e) => {
                    out.warning(&format!("Invalid glob pattern: {pattern} ({})", e.msg));
                    continue;
                }
            }
        } else {
            vec![expanded]
        };

        trace!(pattern, matches = candidates.len(), "expanded pattern");

        for candidate in candidates {
            let absolute = make_absolute(&candidate)?;
            if seen.insert(absolute.clone()) {
                resolved.push(absolute);
            }
        }
    }

    Ok(resolved)
}

/// Matches a glob against the filesystem in sorted, depth-first order.
///
/// The walk starts at the longest literal prefix of `pattern`. Entries whose
/// names are not valid UTF-8 cannot match and are pruned.
fn expand_glob(pattern: &Path) -> Result<Vec<PathBuf>, PatternError> {
    let normalized: PathBuf = pattern.components().collect();
    let text = normalized.to_str().ok_or(PatternError {
        pos: 0,
        msg: "pattern is not valid UTF-8",
    })?;
    let matcher = Pattern::new(text)?;

    let mut base = PathBuf::new();
    let mut remaining = Vec::new();
    for component in normalized.components() {
        let part = component.as_os_str();
        if remaining.is_empty() && !part.to_str().is_some_and(is_glob) {
            base.push(part);
        } else {
            remaining.push(part);
        }
    }

    let relative = base.as_os_str().is_empty();
    let root = if relative { Path::new(".") } else { base.as_path() };
    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name();
    if !remaining.iter().any(|part| part.to_str() == Some("**")) {
        walker = walker.max_depth(remaining.len());
    }

    let matches = walker
        .into_iter()
        .filter_entry(|entry| {
            let valid = entry.file_name().to_str().is_some();
            if !valid {
                debug!(path = %entry.path().display(), "skipping non-UTF-8 name");
            }
            valid
        })
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.into_path()),
            Err(e) => {
                debug!(error = %e, "skipping unreadable glob match");
                None
            }
        })
        .map(|path| {
            if relative {
                path.strip_prefix(".").map(Path::to_path_buf).unwrap_or(path)
            } else {
                path
            }
        })
        .filter(|path| matcher.matches_path_with(path, MATCH_OPTIONS))
        .collect();

    Ok(matches)
}
