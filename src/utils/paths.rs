use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};

/// Expands a leading `~` or `~/` to the home directory
///
/// # Errors
///
/// Returns an error if the path needs expanding and the home directory
/// cannot be determined
pub fn expand_tilde(path: &str) -> Result<PathBuf> {
    if path == "~" {
        return dirs::home_dir().context("Could not find home directory");
    }
    if let Some(rest) = path.strip_prefix("~/") {
        let home = dirs::home_dir().context("Could not find home directory")?;
        return Ok(home.join(rest));
    }
    Ok(PathBuf::from(path))
}

/// Makes a path absolute, resolving relative paths from the current directory,
/// and normalizes it lexically
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined
pub fn make_absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(normalize_lexically(path))
    } else {
        let current_dir = std::env::current_dir().context("Could not read current directory")?;
        Ok(normalize_lexically(&current_dir.join(path)))
    }
}

/// Removes `.` components and folds `..` into its parent without touching the
/// filesystem, so symlinks are not resolved.
#[must_use]
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `/..` stays `/`
                if !normalized.pop() && !path.has_root() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }
    normalized
}
