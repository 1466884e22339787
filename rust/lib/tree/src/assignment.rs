//! Owner → checked-keys mapping, e.g. role → granted permissions.
//!
//! Entries are replaced wholesale on save. There is no merge and no
//! conflict detection: the last save wins.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Assignments {
    entries: BTreeMap<String, Vec<String>>,
}

impl Assignments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checked keys for `owner`; empty when the owner has no entry.
    pub fn get(&self, owner: &str) -> &[String] {
        self.entries.get(owner).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, owner: &str) -> bool {
        self.entries.contains_key(owner)
    }

    /// Replace the owner's entry. Duplicates are dropped, order is kept.
    pub fn save<I, S>(&mut self, owner: impl Into<String>, checked: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let owner = owner.into();
        let checked = dedup_keys(checked);
        info!(owner = %owner, count = checked.len(), "saved assignment");
        self.entries.insert(owner, checked);
    }

    /// Drop the owner's entry, returning it.
    pub fn remove(&mut self, owner: &str) -> Option<Vec<String>> {
        self.entries.remove(owner)
    }

    /// Remove `key` from every entry (e.g. after the key was deleted).
    pub fn revoke_everywhere(&mut self, key: &str) {
        for checked in self.entries.values_mut() {
            checked.retain(|k| k != key);
        }
    }

    /// Replace `old` with `new` in every entry, keeping each entry's order.
    pub fn rename_everywhere(&mut self, old: &str, new: &str) {
        for checked in self.entries.values_mut() {
            *checked = rename_key(checked, old, new);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `keys` with `old` replaced by `new`. A `new` that was already present
/// is not repeated.
pub fn rename_key(keys: &[String], old: &str, new: &str) -> Vec<String> {
    dedup_keys(keys.iter().map(|k| if k == old { new } else { k.as_str() }))
}

/// Drop repeated keys, keeping the first occurrence.
pub fn dedup_keys<I, S>(keys: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    keys.into_iter()
        .map(Into::into)
        .filter(|k: &String| seen.insert(k.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_owner_is_empty() {
        let assignments = Assignments::new();
        assert!(assignments.get("9").is_empty());
        assert!(!assignments.contains("9"));
    }

    #[test]
    fn test_save_replaces_wholesale() {
        let mut assignments = Assignments::new();
        assignments.save("1", ["user:view", "user:add"]);
        assignments.save("1", ["org:view"]);
        assert_eq!(assignments.get("1"), ["org:view"]);
    }

    #[test]
    fn test_save_is_idempotent() {
        let mut assignments = Assignments::new();
        assignments.save("2", ["a", "b"]);
        let once = assignments.clone();
        assignments.save("2", ["a", "b"]);
        assert_eq!(assignments, once);
    }

    #[test]
    fn test_save_dedups_in_order() {
        let mut assignments = Assignments::new();
        assignments.save("3", ["b", "a", "b"]);
        assert_eq!(assignments.get("3"), ["b", "a"]);
    }

    #[test]
    fn test_save_empty_keeps_entry() {
        let mut assignments = Assignments::new();
        assignments.save("4", Vec::<String>::new());
        assert!(assignments.contains("4"));
        assert!(assignments.get("4").is_empty());
    }

    #[test]
    fn test_remove_and_revoke() {
        let mut assignments = Assignments::new();
        assignments.save("1", ["a", "b"]);
        assignments.save("2", ["b"]);
        assignments.revoke_everywhere("b");
        assert_eq!(assignments.get("1"), ["a"]);
        assert!(assignments.get("2").is_empty());
        assert_eq!(assignments.remove("1"), Some(vec!["a".to_string()]));
        assert_eq!(assignments.len(), 1);
    }

    #[test]
    fn test_rename_everywhere() {
        let mut assignments = Assignments::new();
        assignments.save("1", ["a", "b", "c"]);
        assignments.save("2", ["b", "x"]);
        assignments.save("3", ["c"]);
        assignments.rename_everywhere("b", "x");
        assert_eq!(assignments.get("1"), ["a", "x", "c"]);
        assert_eq!(assignments.get("2"), ["x"]);
        assert_eq!(assignments.get("3"), ["c"]);
    }
}
