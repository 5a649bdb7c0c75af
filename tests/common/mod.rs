#![allow(dead_code)]

use anyhow::Result;
use filetime::{FileTime, set_file_mtime};
use reaper::registry::Registry;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

/// Isolated home directory with a registry file under it.
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub registry_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let registry_path = temp_dir.path().join(".file_watcher/file_list.json");
        Ok(Self {
            temp_dir,
            registry_path,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn create_test_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn create_test_dir(&self, name: &str, files: &[&str]) -> Result<PathBuf> {
        let dir = self.path().join(name);
        fs::create_dir_all(&dir)?;
        for file in files {
            fs::write(dir.join(file), "content")?;
        }
        Ok(dir)
    }

    /// Backdates `path`'s modification time by `age_secs` from now.
    pub fn age(&self, path: &Path, age_secs: u64) -> Result<()> {
        let modified = SystemTime::now() - Duration::from_secs(age_secs);
        set_file_mtime(path, FileTime::from_system_time(modified))?;
        Ok(())
    }

    pub fn write_registry(&self, entries: &[(&Path, u64)]) -> Result<()> {
        let mut registry = Registry::new();
        for (path, secs) in entries {
            registry.track(path.to_path_buf(), *secs);
        }
        registry.save(&self.registry_path)?;
        Ok(())
    }

    pub fn registry(&self) -> Result<Registry> {
        Ok(Registry::load(&self.registry_path)?)
    }

    /// `reap` command pointed at this environment's home and registry.
    pub fn reap(&self) -> Result<assert_cmd::Command> {
        let mut cmd = assert_cmd::Command::cargo_bin("reap")?;
        cmd.env("HOME", self.path())
            .env("REAPER_REGISTRY", &self.registry_path)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .current_dir(self.path());
        Ok(cmd)
    }
}
