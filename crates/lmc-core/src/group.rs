//! Moniker group resolution.
//!
//! Documents published under the same ordered moniker list share one group
//! identifier, so the manifest lists each distinct list once.
//!
//! The identifier is the first 12 hex characters of the SHA-256 digest of the
//! monikers joined by `,`. It is stable across runs and platforms and it is
//! order sensitive: `["1.0", "2.0"]` and `["2.0", "1.0"]` are different groups.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt::Write;
use std::sync::{Mutex, PoisonError};

use sha2::{Digest, Sha256};

use crate::manifest::ManifestGroup;
use crate::types::VersionSet;

/// Separator used when hashing a moniker list.
const MONIKER_SEPARATOR: &str = ",";

/// Compute the group identifier for an ordered moniker list.
///
/// Returns `None` for an empty list.
///
/// ```rust
/// use lmc_core::resolve_group;
///
/// let a = resolve_group(&["1.0".to_string(), "2.0".to_string()]);
/// let b = resolve_group(&["1.0".to_string(), "2.0".to_string()]);
/// assert_eq!(a, b);
/// assert_eq!(a.as_deref().map(str::len), Some(12));
///
/// assert!(resolve_group(&[]).is_none());
/// ```
#[must_use]
pub fn resolve_group(monikers: &[String]) -> Option<String> {
    if monikers.is_empty() {
        return None;
    }

    let mut hasher = Sha256::new();
    hasher.update(monikers.join(MONIKER_SEPARATOR).as_bytes());
    let digest = hasher.finalize();
    // First 6 bytes (12 hex chars)
    let id = digest.iter().take(6).fold(String::new(), |mut acc, b| {
        // write! to String is infallible
        let _ = write!(acc, "{b:02x}");
        acc
    });
    Some(id)
}

/// Group identifiers discovered during a conversion, keyed by id.
///
/// Safe to share across workers. Registration is idempotent: the first
/// moniker list stored under an id is kept and later ones are discarded,
/// which is sound because equal ids only come from equal lists.
#[derive(Debug, Default)]
pub struct GroupTable {
    groups: Mutex<BTreeMap<String, VersionSet>>,
}

impl GroupTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a group. Returns `true` if the id was not known yet.
    pub fn register(&self, id: String, monikers: VersionSet) -> bool {
        let mut groups = self.groups.lock().unwrap_or_else(PoisonError::into_inner);
        match groups.entry(id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(monikers);
                true
            },
        }
    }

    /// Number of distinct groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no group has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Manifest entries for every registered group, ordered by group id.
    #[must_use]
    pub fn to_groups(&self) -> Vec<ManifestGroup> {
        self.groups
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(group, monikers)| ManifestGroup {
                group: group.clone(),
                monikers: monikers.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::Arc;

    fn set(items: &[&str]) -> VersionSet {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_empty_set_has_no_group() {
        assert!(resolve_group(&[]).is_none());
    }

    #[test]
    fn test_group_is_sha256_prefix_of_joined_monikers() {
        // sha256("1.0,2.0")
        let mut hasher = Sha256::new();
        hasher.update(b"1.0,2.0");
        let expected: String = hasher
            .finalize()
            .iter()
            .take(6)
            .map(|b| format!("{b:02x}"))
            .collect();

        assert_eq!(resolve_group(&set(&["1.0", "2.0"])), Some(expected));
    }

    #[test]
    fn test_group_is_order_sensitive() {
        let forward = resolve_group(&set(&["1.0", "2.0"]));
        let reversed = resolve_group(&set(&["2.0", "1.0"]));
        assert_ne!(forward, reversed);
    }

    #[test]
    fn test_register_is_idempotent() {
        let table = GroupTable::new();
        let monikers = set(&["v1"]);
        let id = resolve_group(&monikers).expect("group id");

        assert!(table.register(id.clone(), monikers.clone()));
        assert!(!table.register(id, monikers));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_first_writer_wins() {
        let table = GroupTable::new();
        table.register("abc".to_string(), set(&["first"]));
        table.register("abc".to_string(), set(&["second"]));

        let groups = table.to_groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].monikers, set(&["first"]));
    }

    #[test]
    fn test_into_groups_sorted_by_id() {
        let table = GroupTable::new();
        table.register("zz".to_string(), set(&["b"]));
        table.register("aa".to_string(), set(&["a"]));

        let ids: Vec<_> = table.to_groups().into_iter().map(|g| g.group).collect();
        assert_eq!(ids, vec!["aa".to_string(), "zz".to_string()]);
    }

    #[test]
    fn test_concurrent_registration_keeps_one_entry() {
        let table = Arc::new(GroupTable::new());
        let monikers = set(&["1.0", "2.0"]);
        let id = resolve_group(&monikers).expect("group id");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let table = Arc::clone(&table);
                let id = id.clone();
                let monikers = monikers.clone();
                std::thread::spawn(move || table.register(id, monikers))
            })
            .collect();
        let inserted = handles
            .into_iter()
            .map(|h| h.join().expect("thread"))
            .filter(|inserted| *inserted)
            .count();

        assert_eq!(inserted, 1);
        assert_eq!(table.len(), 1);
    }

    proptest! {
        #[test]
        fn test_group_is_deterministic(monikers in prop::collection::vec("[a-z0-9.-]{1,12}", 1..6)) {
            prop_assert_eq!(resolve_group(&monikers), resolve_group(&monikers.clone()));
        }

        #[test]
        fn test_nonempty_sets_always_group(monikers in prop::collection::vec("[a-z0-9.-]{0,12}", 1..6)) {
            let id = resolve_group(&monikers);
            prop_assert!(id.is_some());
            prop_assert!(id.unwrap().chars().all(|c| c.is_ascii_hexdigit()));
        }

        #[test]
        fn test_distinct_sets_get_distinct_groups(
            a in prop::collection::vec("[a-z]{1,8}", 1..4),
            b in prop::collection::vec("[a-z]{1,8}", 1..4),
        ) {
            prop_assume!(a != b);
            prop_assert_ne!(resolve_group(&a), resolve_group(&b));
        }
    }
}
