//! Key synthesis for new nodes.
//!
//! Keys look like `{parent}-{n}` (or just `{n}` at root level) where `n`
//! only ever grows. Candidates that are taken by the tree, or that were
//! retired by a delete, are skipped, so a key is never handed out twice.

use std::collections::HashSet;

use crate::Tree;

#[derive(Debug, Clone)]
pub struct KeyGenerator {
    next: u64,
    retired: HashSet<String>,
}

impl KeyGenerator {
    /// Counter starting at `start`.
    pub fn new(start: u64) -> Self {
        Self {
            next: start,
            retired: HashSet::new(),
        }
    }

    /// Counter seeded from the wall clock in milliseconds.
    pub fn from_clock() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        Self::new(u64::try_from(millis).unwrap_or(0))
    }

    /// Next free key under `parent` (or at root level).
    pub fn next_key(&mut self, tree: &Tree, parent: Option<&str>) -> String {
        loop {
            let n = self.next;
            self.next += 1;
            let key = match parent {
                Some(parent) => format!("{}-{}", parent, n),
                None => n.to_string(),
            };
            if !tree.contains_key(&key) && !self.retired.contains(&key) {
                return key;
            }
        }
    }

    /// Mark keys of deleted nodes so they are never generated again.
    pub fn retire<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.retired.extend(keys.into_iter().map(Into::into));
    }
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self::from_clock()
    }
}
