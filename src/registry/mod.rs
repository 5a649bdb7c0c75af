//! Persisted path → retention mapping.
//!
//! The registry is a single JSON object with one `files` field mapping absolute
//! paths to a retention period in whole seconds. It is loaded fully at the start
//! of every invocation and rewritten as a whole when an invocation mutates it.

mod error;

pub use error::RegistryError;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::utils::paths::normalize_lexically;

/// In-memory view of the registry file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    /// Tracked paths and their retention period in seconds.
    pub files: BTreeMap<PathBuf, u64>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracks `path` with the given retention, overwriting any previous value.
    ///
    /// Returns the retention that was replaced, if the path was already tracked.
    pub fn track(&mut self, path: PathBuf, retention_secs: u64) -> Option<u64> {
        self.files.insert(path, retention_secs)
    }

    /// Stops tracking `path`, returning its retention if it was tracked.
    pub fn untrack(&mut self, path: &Path) -> Option<u64> {
        self.files.remove(path)
    }

    /// Retention configured for `path`.
    #[must_use]
    pub fn retention(&self, path: &Path) -> Option<u64> {
        self.files.get(path).copied()
    }

    /// Whether `path` is tracked.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    /// Number of tracked paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterates entries in registry order (sorted by path).
    pub fn iter(&self) -> impl Iterator<Item = (&Path, u64)> {
        self.files.iter().map(|(path, secs)| (path.as_path(), *secs))
    }

    /// Entries ordered by ascending retention, ties broken by path.
    #[must_use]
    pub fn by_retention(&self) -> Vec<(&Path, u64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Creates the registry file with an empty mapping if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::WriteFailed`] if the parent directory or the
    /// file cannot be created.
    pub fn bootstrap(path: &Path) -> Result<(), RegistryError> {
        if path.exists() {
            return Ok(());
        }

        debug!(path = %path.display(), "creating empty registry");
        Self::new().save(path)
    }

    /// Loads the registry from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unreadable`] if the file cannot be read, is
    /// not a valid registry document, or tracks a path that is not absolute
    /// and normalized.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let data = std::fs::read(path).map_err(|e| RegistryError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let registry: Self =
            serde_json::from_slice(&data).map_err(|e| RegistryError::Unreadable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        if let Some(key) = registry
            .files
            .keys()
            .find(|key| !key.is_absolute() || normalize_lexically(key) != **key)
        {
            return Err(RegistryError::Unreadable {
                path: path.to_path_buf(),
                reason: format!("tracked path is not absolute and normalized: {}", key.display()),
            });
        }

        debug!(
            path = %path.display(),
            entries = registry.len(),
            "loaded registry"
        );
        Ok(registry)
    }

    /// Replaces the registry file at `path` with this registry.
    ///
    /// The document is written to a temporary file next to the target and
    /// renamed over it, so readers never observe a half-written registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::WriteFailed`] on any I/O or serialization failure.
    pub fn save(&self, path: &Path) -> Result<(), RegistryError> {
        let write_failed = |reason: String| RegistryError::WriteFailed {
            path: path.to_path_buf(),
            reason,
        };

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(|e| write_failed(e.to_string()))?;

        let data = serde_json::to_vec_pretty(self).map_err(|e| write_failed(e.to_string()))?;

        let mut tmp =
            tempfile::NamedTempFile::new_in(parent).map_err(|e| write_failed(e.to_string()))?;
        tmp.write_all(&data)
            .and_then(|()| tmp.write_all(b"\n"))
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| write_failed(e.to_string()))?;
        tmp.persist(path)
            .map_err(|e| write_failed(e.error.to_string()))?;

        debug!(path = %path.display(), entries = self.len(), "saved registry");
        Ok(())
    }
}
