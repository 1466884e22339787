use tracing::debug;

use openadmin_tree::highlight_tree;

use crate::model::{OrgDetail, OrgView};
use crate::service::{OrgError, OrgService};

impl OrgService {
    /// Select the unit with `key`. Single selection; replaces any previous one.
    pub fn select(&mut self, key: &str) -> Result<(), OrgError> {
        if !self.tree.contains_key(key) {
            return Err(OrgError::NotFound(format!("organization '{}'", key)));
        }
        self.selected = Some(key.to_string());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Set the search box. A non-empty query drives expansion to the
    /// ancestors of every match; an empty one restores the manual state.
    pub fn search(&mut self, query: &str) {
        self.query = query.to_string();
        self.expansion.apply_search(&self.tree, query);
        debug!(query, matches = self.tree.matching_keys(query).len(), "organization search");
    }

    /// Expand or collapse one unit by hand. Turns auto-expansion off.
    pub fn toggle(&mut self, key: &str, expanded: bool) -> Result<(), OrgError> {
        if !self.tree.contains_key(key) {
            return Err(OrgError::NotFound(format!("organization '{}'", key)));
        }
        self.expansion.toggle(&self.tree, key, expanded);
        Ok(())
    }

    /// Take the full expanded-key list a tree widget reported.
    pub fn set_expanded<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expansion.set_manual(keys);
        self.expansion.prune(&self.tree);
    }

    /// Render model for the organization panel.
    pub fn view(&self) -> OrgView {
        OrgView {
            nodes: highlight_tree(&self.tree, &self.query),
            expanded: self.expansion.visible(&self.tree).into_iter().collect(),
            auto_expand_parent: self.expansion.auto_expand_parent(),
            selected: self.selected.clone(),
            query: self.query.clone(),
            matches: self.tree.matching_keys(&self.query).len(),
        }
    }

    /// Details of one unit.
    pub fn detail(&self, key: &str) -> Result<OrgDetail, OrgError> {
        let node = self
            .tree
            .find_by_key(key)
            .ok_or_else(|| OrgError::NotFound(format!("organization '{}'", key)))?;
        let descendants = self.tree.subtree_keys(key).map_or(0, |keys| keys.len() - 1);

        Ok(OrgDetail {
            key: node.key.clone(),
            name: node.label.clone(),
            parent_key: self.tree.find_parent_key(key).map(String::from),
            depth: self.tree.depth_of(key).unwrap_or(0),
            children: node.children().len(),
            descendants,
        })
    }

    /// Re-derive the search expansion after the tree changed.
    pub(crate) fn refresh_search(&mut self) {
        if self.expansion.is_searching() {
            self.expansion.apply_search(&self.tree, &self.query);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openadmin_core::AlwaysConfirm;

    fn expanded(svc: &OrgService) -> Vec<String> {
        svc.view().expanded
    }

    #[test]
    fn test_initial_view() {
        let svc = OrgService::demo();
        let view = svc.view();
        assert_eq!(view.nodes.len(), 1);
        assert_eq!(view.expanded, vec!["0", "0-0", "0-1"]);
        assert!(view.auto_expand_parent);
        assert_eq!(view.matches, 0);
        assert!(view.selected.is_none());
    }

    #[test]
    fn test_select_unknown() {
        let mut svc = OrgService::demo();
        assert!(matches!(svc.select("nope"), Err(OrgError::NotFound(_))));
        svc.select("0-1").unwrap();
        svc.clear_selection();
        assert_eq!(svc.selected(), None);
    }

    #[test]
    fn test_search_expands_ancestors() {
        let mut svc = OrgService::demo();
        svc.toggle("0-1", false).unwrap();
        svc.search("策划");
        let view = svc.view();
        assert_eq!(view.expanded, vec!["0", "0-1"]);
        assert_eq!(view.matches, 1);
        assert!(view.auto_expand_parent);
    }

    #[test]
    fn test_empty_search_restores_manual_state() {
        let mut svc = OrgService::demo();
        svc.toggle("0-1", false).unwrap();
        let manual = expanded(&svc);
        assert_eq!(manual, vec!["0", "0-0"]);

        svc.search("前端");
        assert_eq!(svc.query(), "前端");
        assert_eq!(expanded(&svc), vec!["0", "0-0"]);
        svc.search("");
        assert_eq!(svc.query(), "");
        assert_eq!(expanded(&svc), manual);
    }

    #[test]
    fn test_manual_toggle_turns_off_auto_expand() {
        let mut svc = OrgService::demo();
        svc.search("组");
        svc.toggle("0-0", false).unwrap();
        let view = svc.view();
        assert!(!view.auto_expand_parent);
        assert_eq!(view.expanded, vec!["0", "0-1"]);
    }

    #[test]
    fn test_toggle_unknown() {
        let mut svc = OrgService::demo();
        assert!(matches!(svc.toggle("9", true), Err(OrgError::NotFound(_))));
    }

    #[test]
    fn test_set_expanded_drops_unknown_keys() {
        let mut svc = OrgService::demo();
        svc.set_expanded(["0", "ghost"]);
        assert_eq!(expanded(&svc), vec!["0"]);
        assert!(!svc.view().auto_expand_parent);
    }

    #[test]
    fn test_view_highlights_matches() {
        let mut svc = OrgService::demo();
        svc.search("研发");
        let view = svc.view();
        let dept = &view.nodes[0].children.as_ref().unwrap()[0];
        assert!(dept.title.is_match());
        assert_eq!(dept.title.text(), "研发部");
        assert!(!view.nodes[0].title.is_match());
    }

    #[test]
    fn test_detail() {
        let svc = OrgService::demo();
        let detail = svc.detail("0-0").unwrap();
        assert_eq!(detail.name, "研发部");
        assert_eq!(detail.parent_key.as_deref(), Some("0"));
        assert_eq!(detail.depth, 1);
        assert_eq!(detail.children, 3);
        assert_eq!(detail.descendants, 3);

        let root = svc.detail("0").unwrap();
        assert_eq!(root.parent_key, None);
        assert_eq!(root.descendants, 9);

        assert!(matches!(svc.detail("x"), Err(OrgError::NotFound(_))));
    }

    #[test]
    fn test_search_follows_edits() {
        let mut svc = OrgService::demo();
        svc.search("组");
        svc.delete("0-1", &AlwaysConfirm).unwrap();
        assert_eq!(expanded(&svc), vec!["0", "0-0"]);
        assert_eq!(svc.view().matches, 3);
    }
}
