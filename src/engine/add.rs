use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::Settings;
use crate::registry::Registry;

/// What happened to one path handed to [`execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Newly tracked
    Tracked,
    /// Was already tracked; the retention was overwritten
    Updated {
        /// Retention before this add
        previous: u64,
    },
    /// Zero retention without `force`; the registry was left alone
    RefusedZeroRetention,
    /// The path does not exist
    Missing,
}

/// Tracks each of `paths` with `retention_secs`.
///
/// A zero retention would make the path eligible for deletion on the next
/// expire pass, so it is refused unless `settings.force` is set. Refusals are
/// reported, not returned as errors.
pub fn execute(
    registry: &mut Registry,
    paths: &[PathBuf],
    retention_secs: u64,
    settings: &Settings,
) -> Vec<(PathBuf, AddOutcome)> {
    let out = settings.output();
    debug!(count = paths.len(), retention_secs, "adding paths");

    let mut outcomes = Vec::with_capacity(paths.len());
    for path in paths {
        let outcome = add_one(registry, path, retention_secs, settings.force);
        match &outcome {
            AddOutcome::RefusedZeroRetention => out.warning(&format!(
                "cowardly refusing to track {} for deletion without a retention time, \
                 use -f to force add it with 0 retention",
                path.display()
            )),
            AddOutcome::Missing => {
                out.warning(&format!("path does not exist, not tracking: {}", path.display()));
            }
            AddOutcome::Tracked | AddOutcome::Updated { .. } => {
                out.action("Tracking file:", &path.display().to_string());
            }
        }
        outcomes.push((path.clone(), outcome));
    }
    outcomes
}

fn add_one(registry: &mut Registry, path: &Path, retention_secs: u64, force: bool) -> AddOutcome {
    if retention_secs == 0 && !force {
        return AddOutcome::RefusedZeroRetention;
    }
    if path.symlink_metadata().is_err() {
        return AddOutcome::Missing;
    }

    match registry.track(path.to_path_buf(), retention_secs) {
        Some(previous) => AddOutcome::Updated { previous },
        None => AddOutcome::Tracked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn settings(force: bool) -> Settings {
        Settings {
            force,
            ..Settings::default()
        }
    }

    #[test]
    fn test_add_tracks_existing_path() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let file = dir.path().join("a.txt");
        fs::write(&file, "x")?;

        let mut registry = Registry::new();
        let outcomes = execute(&mut registry, &[file.clone()], 60, &settings(false));

        assert_eq!(outcomes, vec![(file.clone(), AddOutcome::Tracked)]);
        assert_eq!(registry.retention(&file), Some(60));
        Ok(())
    }

    #[test]
    fn test_re_add_overwrites_retention() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let file = dir.path().join("a.txt");
        fs::write(&file, "x")?;

        let mut registry = Registry::new();
        execute(&mut registry, &[file.clone()], 60, &settings(false));
        let outcomes = execute(&mut registry, &[file.clone()], 3600, &settings(false));

        assert_eq!(outcomes[0].1, AddOutcome::Updated { previous: 60 });
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.retention(&file), Some(3600));
        Ok(())
    }

    #[test]
    fn test_zero_retention_refused_without_force() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let file = dir.path().join("a.txt");
        fs::write(&file, "x")?;

        let mut registry = Registry::new();
        let outcomes = execute(&mut registry, &[file.clone()], 0, &settings(false));

        assert_eq!(outcomes[0].1, AddOutcome::RefusedZeroRetention);
        assert!(registry.is_empty());
        Ok(())
    }

    #[test]
    fn test_zero_retention_refusal_keeps_existing_entry() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let file = dir.path().join("a.txt");
        fs::write(&file, "x")?;

        let mut registry = Registry::new();
        registry.track(file.clone(), 600);
        execute(&mut registry, &[file.clone()], 0, &settings(false));

        assert_eq!(registry.retention(&file), Some(600));
        Ok(())
    }

    #[test]
    fn test_zero_retention_with_force_is_tracked() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let file = dir.path().join("a.txt");
        fs::write(&file, "x")?;

        let mut registry = Registry::new();
        let outcomes = execute(&mut registry, &[file.clone()], 0, &settings(true));

        assert_eq!(outcomes[0].1, AddOutcome::Tracked);
        assert_eq!(registry.retention(&file), Some(0));
        Ok(())
    }

    #[test]
    fn test_missing_path_not_tracked_and_rest_continue() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let missing = dir.path().join("missing.txt");
        let file = dir.path().join("a.txt");
        fs::write(&file, "x")?;

        let mut registry = Registry::new();
        let outcomes = execute(
            &mut registry,
            &[missing.clone(), file.clone()],
            60,
            &settings(false),
        );

        assert_eq!(outcomes[0], (missing.clone(), AddOutcome::Missing));
        assert_eq!(outcomes[1], (file.clone(), AddOutcome::Tracked));
        assert!(!registry.contains(&missing));
        assert!(registry.contains(&file));
        Ok(())
    }

    #[test]
    fn test_directories_can_be_tracked() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let sub = dir.path().join("build");
        fs::create_dir(&sub)?;

        let mut registry = Registry::new();
        execute(&mut registry, &[sub.clone()], 86_400, &settings(false));
        assert_eq!(registry.retention(&sub), Some(86_400));
        Ok(())
    }
}
