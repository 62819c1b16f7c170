//! Schema diffing.
//!
//! Compares two snapshots by exact entity-key sets. There is no fuzzy
//! matching and no rename detection: a renamed entity is always observed
//! as one removal plus one addition.

use crate::schema::Snapshot;

/// The result of diffing two snapshots: three disjoint key sets whose
/// union is exactly the union of both snapshots' keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDiff {
    /// Keys present only in the new snapshot, in new-snapshot order.
    pub added: Vec<String>,
    /// Keys present only in the old snapshot, in old-snapshot order.
    pub removed: Vec<String>,
    /// Keys present in both, in old-snapshot order. Surviving entities
    /// are not structurally compared; the set is exposed so callers can
    /// see what was skipped.
    pub common: Vec<String>,
}

impl SchemaDiff {
    /// Diffs two snapshots.
    ///
    /// Both snapshots are assumed to satisfy the unique-key invariant
    /// ([`Snapshot::validate`]).
    #[must_use]
    pub fn between(old: &Snapshot, new: &Snapshot) -> Self {
        let added = new
            .keys()
            .filter(|key| !old.contains(key))
            .map(String::from)
            .collect();
        let removed = old
            .keys()
            .filter(|key| !new.contains(key))
            .map(String::from)
            .collect();
        let common = old
            .keys()
            .filter(|key| new.contains(key))
            .map(String::from)
            .collect();
        Self {
            added,
            removed,
            common,
        }
    }

    /// Returns true when the diff carries no additions or removals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::EntityDef;

    fn snapshot(keys: &[&str]) -> Snapshot {
        keys.iter()
            .fold(Snapshot::new(), |s, key| s.entity(EntityDef::new(*key)))
    }

    #[test]
    fn test_addition_only() {
        let diff = SchemaDiff::between(&snapshot(&[]), &snapshot(&["post"]));
        assert_eq!(diff.added, vec!["post"]);
        assert!(diff.removed.is_empty());
        assert!(diff.common.is_empty());
    }

    #[test]
    fn test_removal_only() {
        let diff = SchemaDiff::between(&snapshot(&["post"]), &snapshot(&[]));
        assert!(diff.added.is_empty());
        assert_eq!(diff.removed, vec!["post"]);
        assert!(diff.common.is_empty());
    }

    #[test]
    fn test_rename_is_removal_plus_addition() {
        let diff = SchemaDiff::between(&snapshot(&["user"]), &snapshot(&["account"]));
        assert_eq!(diff.added, vec!["account"]);
        assert_eq!(diff.removed, vec!["user"]);
        assert!(diff.common.is_empty());
    }

    #[test]
    fn test_partition_is_exact() {
        let old = snapshot(&["a", "b", "c"]);
        let new = snapshot(&["b", "c", "d", "e"]);
        let diff = SchemaDiff::between(&old, &new);

        assert_eq!(diff.added, vec!["d", "e"]);
        assert_eq!(diff.removed, vec!["a"]);
        assert_eq!(diff.common, vec!["b", "c"]);

        // Pairwise disjoint.
        for key in &diff.added {
            assert!(!diff.removed.contains(key));
            assert!(!diff.common.contains(key));
        }
        for key in &diff.removed {
            assert!(!diff.common.contains(key));
        }

        // Union of the three sets equals the union of both key sets.
        let mut union: Vec<&str> = diff
            .added
            .iter()
            .chain(&diff.removed)
            .chain(&diff.common)
            .map(String::as_str)
            .collect();
        union.sort_unstable();
        let mut expected: Vec<&str> = old.keys().chain(new.keys()).collect();
        expected.sort_unstable();
        expected.dedup();
        assert_eq!(union, expected);
    }

    #[test]
    fn test_symmetric_inverse() {
        let old = snapshot(&["a", "b", "c"]);
        let new = snapshot(&["b", "d"]);
        let forward = SchemaDiff::between(&old, &new);
        let backward = SchemaDiff::between(&new, &old);

        assert_eq!(forward.added, backward.removed);
        assert_eq!(forward.removed, backward.added);

        let mut forward_common = forward.common.clone();
        let mut backward_common = backward.common;
        forward_common.sort_unstable();
        backward_common.sort_unstable();
        assert_eq!(forward_common, backward_common);
    }

    #[test]
    fn test_identical_snapshots_yield_empty_diff() {
        let snapshot = snapshot(&["a", "b"]);
        let diff = SchemaDiff::between(&snapshot, &snapshot);
        assert!(diff.is_empty());
        assert_eq!(diff.common, vec!["a", "b"]);
    }
}
