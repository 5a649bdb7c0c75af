use std::path::PathBuf;
use tracing::debug;

use crate::config::Settings;
use crate::registry::Registry;

/// Stops tracking each of `paths`.
///
/// Paths that are not tracked produce a warning and are otherwise ignored.
/// Returns the paths that were actually removed.
pub fn execute(registry: &mut Registry, paths: &[PathBuf], settings: &Settings) -> Vec<PathBuf> {
    let out = settings.output();
    let mut removed = Vec::new();

    for path in paths {
        if registry.untrack(path).is_some() {
            out.action("Untracking file:", &path.display().to_string());
            removed.push(path.clone());
        } else {
            out.warning(&format!(
                "path not tracked, so it cannot be untracked: {}",
                path.display()
            ));
        }
    }

    debug!(requested = paths.len(), removed = removed.len(), "unlisted paths");
    removed
}
