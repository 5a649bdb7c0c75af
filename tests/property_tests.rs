use proptest::prelude::*;
use reaper::config::Settings;
use reaper::engine::{add, unlist};
use reaper::registry::Registry;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

prop_compose! {
    fn file_name()(name in "[a-z]{1,12}") -> String {
        format!("{name}.txt")
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Repeated adds of one path leave a single entry holding the last retention.
    #[test]
    fn prop_add_is_last_write_wins(
        name in file_name(),
        retentions in prop::collection::vec(1u64..10_000_000, 1..8),
    ) {
        let dir = tempdir().unwrap();
        let path = dir.path().join(&name);
        fs::write(&path, "x").unwrap();

        let mut registry = Registry::new();
        for secs in &retentions {
            add::execute(&mut registry, &[path.clone()], *secs, &Settings::default());
        }

        prop_assert_eq!(registry.len(), 1);
        prop_assert_eq!(registry.retention(&path), retentions.last().copied());
    }

    /// Unlisting behaves as set difference on the registry keys.
    #[test]
    fn prop_unlist_is_set_difference(
        tracked in prop::collection::btree_set("[a-e]{1,3}", 0..10),
        removed in prop::collection::vec("[a-e]{1,3}", 0..10),
    ) {
        let mut registry = Registry::new();
        for name in &tracked {
            registry.track(PathBuf::from("/srv").join(name), 60);
        }

        let to_remove: Vec<PathBuf> = removed.iter().map(|n| PathBuf::from("/srv").join(n)).collect();
        unlist::execute(&mut registry, &to_remove, &Settings::default());

        for name in &tracked {
            let path = PathBuf::from("/srv").join(name);
            prop_assert_eq!(registry.contains(&path), !removed.contains(name));
        }
        prop_assert!(registry.iter().all(|(p, _)| tracked.iter().any(|n| PathBuf::from("/srv").join(n) == p)));
    }

    /// Listing order never decreases in retention.
    #[test]
    fn prop_listing_sorted(entries in prop::collection::btree_map("[a-z]{1,6}", any::<u64>(), 0..20)) {
        let mut registry = Registry::new();
        for (name, secs) in &entries {
            registry.track(PathBuf::from("/data").join(name), *secs);
        }

        let ordered = registry.by_retention();
        prop_assert_eq!(ordered.len(), entries.len());
        prop_assert!(ordered.windows(2).all(|w| w[0].1 <= w[1].1));
    }
}
