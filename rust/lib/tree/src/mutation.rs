//! Structural edits. Each operation leaves `self` untouched and returns
//! the edited copy.

use std::collections::HashSet;

use tracing::debug;

use crate::{Tree, TreeError, TreeNode};

impl Tree {
    /// Append `node` under `parent`, or at root level when `parent` is `None`.
    ///
    /// Fails with `NotFound` for an unknown parent and with `DuplicateKey`
    /// if any key in `node`'s subtree is already in use.
    pub fn insert_child(&self, parent: Option<&str>, node: TreeNode) -> Result<Tree, TreeError> {
        if let Some(dup) = self.first_duplicate(&node) {
            return Err(TreeError::DuplicateKey(dup.to_string()));
        }

        let mut next = self.clone();
        match parent {
            None => next.roots_mut().push(node),
            Some(parent_key) => {
                let target = find_mut(next.roots_mut(), parent_key)
                    .ok_or_else(|| TreeError::NotFound(parent_key.to_string()))?;
                target.children.get_or_insert_with(Vec::new).push(node);
            }
        }
        debug!(parent = ?parent, "inserted tree node");
        Ok(next)
    }

    /// Replace the label of the node with `key`, at any depth.
    pub fn rename_node(&self, key: &str, label: impl Into<String>) -> Result<Tree, TreeError> {
        let mut next = self.clone();
        let target = find_mut(next.roots_mut(), key)
            .ok_or_else(|| TreeError::NotFound(key.to_string()))?;
        target.label = label.into();
        debug!(key, "renamed tree node");
        Ok(next)
    }

    /// Remove the node with `key` and all of its descendants.
    ///
    /// A parent that loses its last child becomes a leaf again
    /// (`children: None`).
    pub fn delete_subtree(&self, key: &str) -> Result<Tree, TreeError> {
        let mut next = self.clone();
        let removed = remove_from(next.roots_mut(), key)
            .ok_or_else(|| TreeError::NotFound(key.to_string()))?;
        debug!(key, label = %removed.label, "deleted tree subtree");
        Ok(next)
    }
}

impl Tree {
    /// First key in `node`'s subtree that is already taken, either by
    /// this tree or earlier in the subtree itself.
    fn first_duplicate<'a>(&self, node: &'a TreeNode) -> Option<&'a str> {
        let mut seen = HashSet::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if !seen.insert(current.key.as_str()) || self.contains_key(&current.key) {
                return Some(current.key.as_str());
            }
            stack.extend(current.children().iter().rev());
        }
        None
    }
}

fn find_mut<'a>(nodes: &'a mut [TreeNode], key: &str) -> Option<&'a mut TreeNode> {
    for node in nodes.iter_mut() {
        if node.key == key {
            return Some(node);
        }
        if let Some(children) = node.children.as_mut() {
            if let Some(found) = find_mut(children, key) {
                return Some(found);
            }
        }
    }
    None
}

fn remove_from(nodes: &mut Vec<TreeNode>, key: &str) -> Option<TreeNode> {
    if let Some(pos) = nodes.iter().position(|n| n.key == key) {
        return Some(nodes.remove(pos));
    }
    for node in nodes.iter_mut() {
        let Some(children) = node.children.as_mut() else {
            continue;
        };
        if let Some(removed) = remove_from(children, key) {
            if children.is_empty() {
                node.children = None;
            }
            return Some(removed);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tree {
        Tree::from_roots(vec![
            TreeNode::leaf("0", "总公司")
                .child(
                    TreeNode::leaf("0-0", "研发部")
                        .child(TreeNode::leaf("0-0-0", "前端组"))
                        .child(TreeNode::leaf("0-0-1", "后端组")),
                )
                .child(TreeNode::leaf("0-1", "财务部")),
        ])
        .unwrap()
    }

    #[test]
    fn test_insert_under_parent() {
        let tree = sample();
        let next = tree.insert_child(Some("0-1"), TreeNode::leaf("0-1-7", "出纳组")).unwrap();
        assert_eq!(next.find_parent_key("0-1-7"), Some("0-1"));
        assert_eq!(next.find_by_key("0-1").unwrap().children().len(), 1);
        // The original value is untouched.
        assert!(tree.find_by_key("0-1-7").is_none());
        assert!(tree.find_by_key("0-1").unwrap().children.is_none());
    }

    #[test]
    fn test_insert_appends_after_existing_children() {
        let next = sample().insert_child(Some("0-0"), TreeNode::leaf("0-0-9", "新组")).unwrap();
        let labels: Vec<&str> = next
            .find_by_key("0-0")
            .unwrap()
            .children()
            .iter()
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(labels, vec!["前端组", "后端组", "新组"]);
    }

    #[test]
    fn test_insert_at_root_level() {
        let next = sample().insert_child(None, TreeNode::leaf("9", "分公司")).unwrap();
        assert_eq!(next.roots().len(), 2);
        assert_eq!(next.roots()[1].key, "9");
        assert_eq!(next.find_parent_key("9"), None);
    }

    #[test]
    fn test_insert_unknown_parent() {
        let err = sample().insert_child(Some("7-7"), TreeNode::leaf("7-7-1", "x")).unwrap_err();
        assert_eq!(err, TreeError::NotFound("7-7".into()));
    }

    #[test]
    fn test_insert_duplicate_key() {
        let err = sample().insert_child(Some("0"), TreeNode::leaf("0-0-1", "x")).unwrap_err();
        assert_eq!(err, TreeError::DuplicateKey("0-0-1".into()));
    }

    #[test]
    fn test_insert_subtree_with_duplicate_descendant() {
        let node = TreeNode::leaf("5", "x").child(TreeNode::leaf("0-1", "y"));
        let err = sample().insert_child(None, node).unwrap_err();
        assert_eq!(err, TreeError::DuplicateKey("0-1".into()));
    }

    #[test]
    fn test_rename_keeps_shape() {
        let tree = sample();
        let next = tree.rename_node("0-0-1", "服务端组").unwrap();
        let before = tree.flatten();
        let after = next.flatten();
        assert_eq!(before.len(), after.len());
        for (b, a) in before.iter().zip(after.iter()) {
            assert_eq!(b.key, a.key);
            if a.key == "0-0-1" {
                assert_eq!(a.label, "服务端组");
            } else {
                assert_eq!(a.label, b.label);
            }
        }
    }

    #[test]
    fn test_rename_root() {
        let next = sample().rename_node("0", "集团").unwrap();
        assert_eq!(next.roots()[0].label, "集团");
    }

    #[test]
    fn test_rename_unknown() {
        assert_eq!(
            sample().rename_node("x", "y").unwrap_err(),
            TreeError::NotFound("x".into())
        );
    }

    #[test]
    fn test_delete_subtree_removes_descendants() {
        let next = sample().delete_subtree("0-0").unwrap();
        assert!(next.find_by_key("0-0").is_none());
        assert!(next.find_by_key("0-0-0").is_none());
        assert!(next.find_by_key("0-0-1").is_none());
        assert_eq!(next.len(), 2);
    }

    #[test]
    fn test_delete_root_level() {
        let next = sample().delete_subtree("0").unwrap();
        assert!(next.is_empty());
    }

    #[test]
    fn test_delete_last_child_makes_leaf() {
        let next = sample()
            .delete_subtree("0-0-0")
            .and_then(|t| t.delete_subtree("0-0-1"))
            .unwrap();
        assert!(next.find_by_key("0-0").unwrap().children.is_none());
    }

    #[test]
    fn test_delete_unknown() {
        assert_eq!(
            sample().delete_subtree("x").unwrap_err(),
            TreeError::NotFound("x".into())
        );
    }
}
