//! Which nodes are rendered expanded.
//!
//! Two sources feed the visible set: the manual state (what the user last
//! toggled) and the search-derived state (ancestors of matches). While
//! `auto_expand_parent` is on, the search set wins and every expanded key
//! also reveals its ancestors. A manual toggle turns it off and pins the
//! manual state until a new non-empty query arrives.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::Tree;
use crate::search::search_expansion;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpansionState {
    manual: BTreeSet<String>,
    searched: Option<BTreeSet<String>>,
    auto_expand_parent: bool,
}

impl ExpansionState {
    pub fn new<I, S>(initial: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            manual: initial.into_iter().map(Into::into).collect(),
            searched: None,
            auto_expand_parent: true,
        }
    }

    pub fn auto_expand_parent(&self) -> bool {
        self.auto_expand_parent
    }

    /// Whether a non-empty search currently drives expansion.
    pub fn is_searching(&self) -> bool {
        self.searched.is_some()
    }

    /// Last manual state, untouched by search.
    pub fn manual_keys(&self) -> &BTreeSet<String> {
        &self.manual
    }

    /// Feed a search query. An empty query drops the search set so the
    /// manual state shows again.
    pub fn apply_search(&mut self, tree: &Tree, query: &str) {
        if query.is_empty() {
            self.searched = None;
            return;
        }
        self.searched = Some(search_expansion(tree, query));
        self.auto_expand_parent = true;
    }

    /// Expand or collapse one node, starting from what is visible now.
    pub fn toggle(&mut self, tree: &Tree, key: &str, expanded: bool) {
        let mut visible = self.visible(tree);
        if expanded {
            visible.insert(key.to_string());
        } else {
            visible.remove(key);
        }
        self.set_manual(visible);
    }

    /// Replace the manual state with the full set a tree widget reported.
    pub fn set_manual<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.manual = keys.into_iter().map(Into::into).collect();
        self.searched = None;
        self.auto_expand_parent = false;
    }

    /// Drop keys that no longer exist in `tree`.
    pub fn prune(&mut self, tree: &Tree) {
        self.manual.retain(|k| tree.contains_key(k));
        if let Some(searched) = self.searched.as_mut() {
            searched.retain(|k| tree.contains_key(k));
        }
    }

    /// The set to render.
    pub fn visible(&self, tree: &Tree) -> BTreeSet<String> {
        let base = self.searched.as_ref().unwrap_or(&self.manual);
        let mut visible: BTreeSet<String> = base
            .iter()
            .filter(|k| tree.contains_key(k))
            .cloned()
            .collect();
        if self.auto_expand_parent {
            for key in base {
                if let Some(ancestors) = tree.ancestor_keys(key) {
                    visible.extend(ancestors.into_iter().map(String::from));
                }
            }
        }
        visible
    }
}
