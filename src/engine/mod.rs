//! Retention engine: the four operations over the registry.
//!
//! Exactly one [`Mode`] runs per invocation. Add and unlist take patterns that
//! are expanded by the [`resolver`](crate::resolver); the expire pass reads the
//! registry and acts on the filesystem directly.

/// Tracking paths with a retention period.
pub mod add;
pub mod expire;
pub mod gate;
/// Printing the registry.
pub mod list;
/// Untracking paths.
pub mod unlist;

use anyhow::Result;
use std::time::SystemTime;
use tracing::debug;

use crate::ReaperContext;
use crate::resolver;
use gate::Responder;

/// The single operation an invocation performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Track the resolved paths with a retention period (the default)
    Add {
        /// Paths or glob patterns to track
        patterns: Vec<String>,
        /// Retention applied to every resolved path
        retention_secs: u64,
    },
    /// Print the registry
    List,
    /// Stop tracking the resolved paths
    Unlist {
        /// Paths or glob patterns to untrack
        patterns: Vec<String>,
    },
    /// Delete expired entries
    Expire,
}

impl Mode {
    /// Whether the registry must be written back after this mode runs.
    #[must_use]
    pub const fn mutates(&self, prune: bool, dry_run: bool) -> bool {
        match self {
            Self::Add { .. } | Self::Unlist { .. } => true,
            Self::List => false,
            Self::Expire => prune && !dry_run,
        }
    }

    /// Short name used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::List => "list",
            Self::Unlist { .. } => "unlist",
            Self::Expire => "expire",
        }
    }
}

/// Runs `mode` against the context's registry and persists it if it changed.
///
/// `now` is the reference time for the expire pass; `responder` answers its
/// directory confirmations.
///
/// # Errors
///
/// Returns an error if path resolution fails or the registry cannot be saved.
pub fn run(
    ctx: &mut ReaperContext,
    mode: &Mode,
    responder: &mut dyn Responder,
    now: SystemTime,
) -> Result<()> {
    let settings = ctx.settings;
    let out = settings.output();
    debug!(mode = mode.name(), "running");

    match mode {
        Mode::Add {
            patterns,
            retention_secs,
        } => {
            let paths = resolver::resolve(patterns, &out)?;
            if paths.is_empty() {
                out.info("No matching paths; nothing to track");
            }
            add::execute(&mut ctx.registry, &paths, *retention_secs, &settings);
        }
        Mode::List => list::execute(&ctx.registry, &settings),
        Mode::Unlist { patterns } => {
            let paths = resolver::resolve(patterns, &out)?;
            unlist::execute(&mut ctx.registry, &paths, &settings);
        }
        Mode::Expire => {
            let report = expire::execute(&mut ctx.registry, &settings, responder, now);
            if out.is_verbose() && report.removed() > 0 {
                out.success(&format!("Removed {} expired path(s)", report.removed()));
            }
            if report.failed() > 0 {
                out.warning(&format!("Failed to remove {} path(s)", report.failed()));
            }
        }
    }

    if mode.mutates(settings.prune, settings.dry_run) {
        ctx.save()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::TestRegistry;
    use std::io;

    fn no_prompt() -> impl FnMut(&str) -> io::Result<String> {
        |_: &str| -> io::Result<String> { panic!("unexpected confirmation prompt") }
    }

    #[test]
    fn test_mutating_modes() {
        let add = Mode::Add {
            patterns: vec![],
            retention_secs: 1,
        };
        assert!(add.mutates(false, false));
        assert!(Mode::Unlist { patterns: vec![] }.mutates(false, false));
        assert!(!Mode::List.mutates(true, false));
        assert!(!Mode::Expire.mutates(false, false));
        assert!(Mode::Expire.mutates(true, false));
        assert!(!Mode::Expire.mutates(true, true));
    }

    #[test]
    fn test_add_persists_registry() -> Result<()> {
        let env = TestRegistry::new()?;
        let file = env.create_file("notes.txt", "x")?;
        let mut ctx = env.context()?;

        let mode = Mode::Add {
            patterns: vec![file.to_string_lossy().into_owned()],
            retention_secs: 60,
        };
        run(&mut ctx, &mode, &mut no_prompt(), SystemTime::now())?;

        assert_eq!(env.load()?.retention(&file), Some(60));
        Ok(())
    }

    #[test]
    fn test_unlist_persists_registry() -> Result<()> {
        let env = TestRegistry::new()?;
        let file = env.create_file("notes.txt", "x")?;
        env.track(&file, 60)?;
        let mut ctx = env.context()?;

        let mode = Mode::Unlist {
            patterns: vec![file.to_string_lossy().into_owned()],
        };
        run(&mut ctx, &mode, &mut no_prompt(), SystemTime::now())?;

        assert!(env.load()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_list_does_not_rewrite_registry() -> Result<()> {
        let env = TestRegistry::new()?;
        std::fs::write(&env.registry_path, r#"{"files":{}}"#)?;
        let mut ctx = env.context()?;

        run(&mut ctx, &Mode::List, &mut no_prompt(), SystemTime::now())?;

        assert_eq!(std::fs::read_to_string(&env.registry_path)?, r#"{"files":{}}"#);
        Ok(())
    }

    #[test]
    fn test_expire_without_prune_keeps_deleted_entries() -> Result<()> {
        let env = TestRegistry::new()?;
        let file = env.create_file("old.log", "x")?;
        env.track(&file, 0)?;
        let mut ctx = env.context()?;

        let later = SystemTime::now() + std::time::Duration::from_secs(5);
        run(&mut ctx, &Mode::Expire, &mut no_prompt(), later)?;

        assert!(!file.exists());
        assert!(env.load()?.contains(&file));
        Ok(())
    }
}
