use tracing::{info, warn};

use openadmin_core::{Confirmer, Prompt};
use openadmin_tree::TreeNode;

use crate::model::{CreateOrg, DeleteOutcome};
use crate::service::{OrgError, OrgService, validate_name};

impl OrgService {
    /// Create an organization unit under `parent_key` (or at root level).
    ///
    /// The key is synthesized from the parent key and the session's
    /// counter; it never collides with a live or deleted key.
    pub fn create(&mut self, input: CreateOrg) -> Result<TreeNode, OrgError> {
        let name = validate_name(&input.name)?;
        let parent = input.parent_key.as_deref();
        if let Some(parent) = parent {
            if !self.tree.contains_key(parent) {
                return Err(OrgError::NotFound(format!("organization '{}'", parent)));
            }
        }

        let key = self.keys.next_key(&self.tree, parent);
        let node = TreeNode::leaf(key, name);
        self.tree = self.tree.insert_child(parent, node.clone())?;
        self.refresh_search();
        info!(key = %node.key, parent = ?parent, name = %node.label, "organization created");
        Ok(node)
    }

    /// Create under the selected node, or at root level with no selection.
    pub fn add_to_selected(&mut self, name: &str) -> Result<TreeNode, OrgError> {
        self.create(CreateOrg {
            name: name.to_string(),
            parent_key: self.selected.clone(),
        })
    }

    /// Rename the unit with `key`.
    pub fn rename(&mut self, key: &str, name: &str) -> Result<(), OrgError> {
        let name = validate_name(name)?;
        self.tree = self.tree.rename_node(key, name.as_str())?;
        self.refresh_search();
        info!(key, name = %name, "organization renamed");
        Ok(())
    }

    /// Rename the selected unit.
    pub fn rename_selected(&mut self, name: &str) -> Result<(), OrgError> {
        let key = self.require_selection()?;
        self.rename(&key, name)
    }

    /// Delete the unit with `key` and everything under it, after asking
    /// `confirmer`. There is no undo.
    pub fn delete(
        &mut self,
        key: &str,
        confirmer: &dyn Confirmer,
    ) -> Result<DeleteOutcome, OrgError> {
        let removed: Vec<String> = self
            .tree
            .subtree_keys(key)
            .ok_or_else(|| OrgError::NotFound(format!("organization '{}'", key)))?
            .into_iter()
            .map(String::from)
            .collect();

        let label = self
            .tree
            .find_by_key(key)
            .map(|n| n.label.clone())
            .unwrap_or_default();
        let prompt = Prompt::new(
            format!("delete organization '{}'?", label),
            "this cannot be undone; all sub-organizations are deleted too",
        );
        if !confirmer.confirm(&prompt) {
            warn!(key, "organization delete cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }

        self.tree = self.tree.delete_subtree(key)?;
        if self
            .selected
            .as_ref()
            .is_some_and(|s| removed.iter().any(|k| k == s))
        {
            self.selected = None;
        }
        self.expansion.prune(&self.tree);
        self.refresh_search();
        self.keys.retire(removed.iter().cloned());
        info!(key, count = removed.len(), "organization deleted");
        Ok(DeleteOutcome::Deleted { removed })
    }

    /// Delete the selected unit.
    pub fn delete_selected(
        &mut self,
        confirmer: &dyn Confirmer,
    ) -> Result<DeleteOutcome, OrgError> {
        let key = self.require_selection()?;
        self.delete(&key, confirmer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openadmin_core::{AlwaysConfirm, NeverConfirm};
    use openadmin_tree::KeyGenerator;

    fn demo() -> OrgService {
        OrgService::demo().with_keys(KeyGenerator::new(100))
    }

    #[test]
    fn test_add_to_selected() {
        let mut svc = demo();
        svc.select("0-0").unwrap();
        let node = svc.add_to_selected("新组").unwrap();
        assert_eq!(node.key, "0-0-100");
        assert_eq!(svc.tree().find_parent_key(&node.key), Some("0-0"));
    }

    #[test]
    fn test_add_without_selection_goes_to_root_level() {
        let mut svc = demo();
        let node = svc.add_to_selected("分公司").unwrap();
        assert_eq!(node.key, "100");
        assert_eq!(svc.tree().roots().len(), 2);
    }

    #[test]
    fn test_create_requires_name() {
        let mut svc = demo();
        let before = svc.tree().clone();
        let err = svc
            .create(CreateOrg { name: " ".into(), parent_key: None })
            .unwrap_err();
        assert!(matches!(err, OrgError::Validation(_)));
        assert_eq!(svc.tree(), &before);
    }

    #[test]
    fn test_create_under_unknown_parent() {
        let mut svc = demo();
        let err = svc
            .create(CreateOrg { name: "x".into(), parent_key: Some("9-9".into()) })
            .unwrap_err();
        assert!(matches!(err, OrgError::NotFound(_)));
        assert_eq!(svc.tree().len(), 10);
    }

    #[test]
    fn test_rename_selected() {
        let mut svc = demo();
        assert!(matches!(svc.rename_selected("x"), Err(OrgError::Validation(_))));
        svc.select("0").unwrap();
        svc.rename_selected(" 集团 ").unwrap();
        assert_eq!(svc.tree().roots()[0].label, "集团");
    }

    #[test]
    fn test_rename_unknown() {
        let mut svc = demo();
        assert!(matches!(svc.rename("nope", "x"), Err(OrgError::NotFound(_))));
    }

    #[test]
    fn test_delete_clears_selection_of_descendant() {
        let mut svc = demo();
        svc.select("0-0-1").unwrap();
        let outcome = svc.delete("0-0", &AlwaysConfirm).unwrap();
        assert_eq!(
            outcome,
            DeleteOutcome::Deleted {
                removed: vec!["0-0".into(), "0-0-0".into(), "0-0-1".into(), "0-0-2".into()],
            }
        );
        assert_eq!(svc.selected(), None);
        assert!(svc.tree().find_by_key("0-0-1").is_none());
    }

    #[test]
    fn test_delete_keeps_unrelated_selection() {
        let mut svc = demo();
        svc.select("0-2").unwrap();
        svc.delete("0-1", &AlwaysConfirm).unwrap();
        assert_eq!(svc.selected(), Some("0-2"));
    }

    #[test]
    fn test_delete_cancelled_changes_nothing() {
        let mut svc = demo();
        svc.select("0-0").unwrap();
        let outcome = svc.delete_selected(&NeverConfirm).unwrap();
        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert_eq!(svc.selected(), Some("0-0"));
        assert_eq!(svc.tree().len(), 10);
    }

    #[test]
    fn test_delete_prompt_names_the_unit() {
        let mut svc = demo();
        let seen = std::cell::RefCell::new(String::new());
        let confirmer = |p: &Prompt| {
            *seen.borrow_mut() = p.title.clone();
            true
        };
        svc.delete("0-3", &confirmer).unwrap();
        assert_eq!(*seen.borrow(), "delete organization '人力资源部'?");
    }

    #[test]
    fn test_deleted_keys_are_not_reused() {
        let mut svc = OrgService::demo().with_keys(KeyGenerator::new(0));
        svc.delete("0-0-2", &AlwaysConfirm).unwrap();
        svc.select("0-0").unwrap();
        // 0-0-0 and 0-0-1 are live, 0-0-2 was deleted.
        let node = svc.add_to_selected("新组").unwrap();
        assert_eq!(node.key, "0-0-3");
    }

    #[test]
    fn test_delete_selected_requires_selection() {
        let mut svc = demo();
        assert!(matches!(
            svc.delete_selected(&AlwaysConfirm),
            Err(OrgError::Validation(_))
        ));
    }
}
