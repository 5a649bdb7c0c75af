//! The expire pass: delete every tracked path whose last modification is older
//! than its retention.
//!
//! Entries are handled one at a time in registry order and independently of
//! each other. A vanished path is skipped, a failed deletion is reported, and
//! neither stops the pass. Registry entries are kept after deletion unless
//! pruning was requested.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, trace};

use super::gate::{self, GateState, Responder};
use crate::config::Settings;
use crate::registry::Registry;
use crate::utils::count_entries;
use crate::utils::formatters::{format_age, format_timestamp};

/// What the pass did with one tracked path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpireOutcome {
    /// The path no longer exists
    Missing,
    /// Not older than its retention yet
    Fresh,
    /// Deleted (recursively, for directories)
    Removed,
    /// Dry run: would have been deleted
    WouldRemove,
    /// Expired directory whose removal was refused at the confirmation gate
    Declined,
    /// Not a regular file, directory or symlink (FIFO, socket, device node)
    Skipped,
    /// Deletion was attempted or required but failed
    Failed(String),
}

/// Per-entry results of one expire pass, in registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpireReport {
    /// Every tracked path with its outcome
    pub entries: Vec<(PathBuf, ExpireOutcome)>,
    /// Entries dropped from the registry (only with pruning enabled)
    pub pruned: Vec<PathBuf>,
}

impl ExpireReport {
    /// Outcome recorded for `path`.
    #[must_use]
    pub fn outcome(&self, path: &Path) -> Option<&ExpireOutcome> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, outcome)| outcome)
    }

    /// Number of paths deleted.
    #[must_use]
    pub fn removed(&self) -> usize {
        self.count(|o| matches!(o, ExpireOutcome::Removed))
    }

    /// Number of paths whose deletion failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, ExpireOutcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&ExpireOutcome) -> bool) -> usize {
        self.entries.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// Time elapsed between `modified` and `now`. A modification time in the
/// future counts as zero age.
#[must_use]
pub fn age_at(now: SystemTime, modified: SystemTime) -> Duration {
    now.duration_since(modified).unwrap_or(Duration::ZERO)
}

/// An entry expires only once its age strictly exceeds the retention.
#[must_use]
pub fn is_expired(age: Duration, retention_secs: u64) -> bool {
    age > Duration::from_secs(retention_secs)
}

/// Runs the expire pass over every registry entry as of `now`.
///
/// Expired directories go through the confirmation gate, answered by
/// `responder` unless `settings.force` is set. With `settings.dry_run` nothing
/// is prompted for or deleted.
pub fn execute(
    registry: &mut Registry,
    settings: &Settings,
    responder: &mut dyn Responder,
    now: SystemTime,
) -> ExpireReport {
    let out = settings.output();
    let tracked: Vec<(PathBuf, u64)> = registry
        .iter()
        .map(|(path, secs)| (path.to_path_buf(), secs))
        .collect();

    let mut report = ExpireReport::default();
    for (path, retention_secs) in tracked {
        debug!(path = %path.display(), retention_secs, "tracked file");
        let outcome = expire_one(&path, retention_secs, settings, responder, now);

        match &outcome {
            ExpireOutcome::Removed => out.action("removed", &path.display().to_string()),
            ExpireOutcome::WouldRemove => out.info(&format!("would remove {}", path.display())),
            ExpireOutcome::Failed(reason) => {
                out.warning(&format!("failed to remove {}: {reason}", path.display()));
            }
            ExpireOutcome::Declined => debug!(path = %path.display(), "removal declined"),
            ExpireOutcome::Skipped => out.action("skipped", &path.display().to_string()),
            ExpireOutcome::Missing => debug!(path = %path.display(), "path no longer exists"),
            ExpireOutcome::Fresh => trace!(path = %path.display(), "not expired"),
        }
        report.entries.push((path, outcome));
    }

    if settings.prune && !settings.dry_run {
        for (path, outcome) in &report.entries {
            if matches!(outcome, ExpireOutcome::Removed | ExpireOutcome::Missing)
                && registry.untrack(path).is_some()
            {
                out.action("Untracking file:", &path.display().to_string());
                report.pruned.push(path.clone());
            }
        }
    }

    report
}

fn expire_one(
    path: &Path,
    retention_secs: u64,
    settings: &Settings,
    responder: &mut dyn Responder,
    now: SystemTime,
) -> ExpireOutcome {
    let modified = match fs::metadata(path).and_then(|m| m.modified()) {
        Ok(modified) => modified,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return ExpireOutcome::Missing,
        Err(e) => return ExpireOutcome::Failed(format!("cannot read modification time: {e}")),
    };

    let age = age_at(now, modified);
    if !is_expired(age, retention_secs) {
        return ExpireOutcome::Fresh;
    }
    debug!(
        path = %path.display(),
        age = %format_age(age),
        modified = %format_timestamp(modified),
        "expired"
    );

    // Links are unlinked, never followed into their target
    let file_type = match fs::symlink_metadata(path) {
        Ok(meta) => meta.file_type(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return ExpireOutcome::Missing,
        Err(e) => return ExpireOutcome::Failed(e.to_string()),
    };

    if !(file_type.is_file() || file_type.is_dir() || file_type.is_symlink()) {
        debug!(path = %path.display(), "not a regular file, directory or symlink");
        return ExpireOutcome::Skipped;
    }

    if settings.dry_run {
        return ExpireOutcome::WouldRemove;
    }

    if !file_type.is_dir() {
        return match fs::remove_file(path) {
            Ok(()) => ExpireOutcome::Removed,
            Err(e) => ExpireOutcome::Failed(e.to_string()),
        };
    }

    let prompt = if settings.force {
        String::new()
    } else {
        gate::prompt_for(path, count_entries(path))
    };
    match gate::decide(settings.force, &prompt, responder) {
        Ok(GateState::Confirmed) => match fs::remove_dir_all(path) {
            Ok(()) => ExpireOutcome::Removed,
            Err(e) => ExpireOutcome::Failed(e.to_string()),
        },
        Ok(GateState::Declined | GateState::Prompting) => ExpireOutcome::Declined,
        Err(e) => ExpireOutcome::Failed(format!("no confirmation received: {e}")),
    }
}
