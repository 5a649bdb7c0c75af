#[cfg(test)]
pub mod fixtures {
    use crate::ReaperContext;
    use crate::config::Settings;
    use crate::registry::Registry;
    use anyhow::Result;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Scratch directory with its own registry file.
    pub struct TestRegistry {
        pub temp_dir: TempDir,
        pub registry_path: PathBuf,
    }

    impl TestRegistry {
        pub fn new() -> Result<Self> {
            let temp_dir = tempfile::tempdir()?;
            let registry_path = temp_dir.path().join(".file_watcher/file_list.json");
            Registry::bootstrap(&registry_path)?;

            Ok(Self {
                temp_dir,
                registry_path,
            })
        }

        pub fn context(&self) -> Result<ReaperContext> {
            self.context_with(Settings::default())
        }

        pub fn context_with(&self, settings: Settings) -> Result<ReaperContext> {
            ReaperContext::open(Some(self.registry_path.clone()), settings)
        }

        pub fn create_file(&self, name: &str, content: &str) -> Result<PathBuf> {
            let path = self.temp_dir.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, content)?;
            Ok(path)
        }

        pub fn track(&self, path: &Path, retention_secs: u64) -> Result<()> {
            let mut registry = self.load()?;
            registry.track(path.to_path_buf(), retention_secs);
            registry.save(&self.registry_path)?;
            Ok(())
        }

        pub fn load(&self) -> Result<Registry> {
            Ok(Registry::load(&self.registry_path)?)
        }
    }

    #[test]
    fn test_fixture_bootstraps_registry() -> Result<()> {
        let env = TestRegistry::new()?;
        assert!(env.registry_path.exists());
        assert!(env.context()?.registry.is_empty());
        Ok(())
    }
}
