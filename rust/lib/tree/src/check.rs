//! Checkable-tree semantics.
//!
//! [`toggle_check`] reproduces what a conducted checkable tree reports
//! after a click. The reported list is what gets stored; nothing here
//! re-derives a stored list.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::{Tree, TreeError, TreeNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckState {
    Checked,
    HalfChecked,
    Unchecked,
}

/// Check or uncheck `key` and return the new checked list in tree order.
///
/// Checking marks the node and its descendants, then any ancestor whose
/// children are now all checked. Unchecking clears the node, its
/// descendants and every ancestor. Keys not present in `tree` are dropped.
pub fn toggle_check(
    tree: &Tree,
    checked: &[String],
    key: &str,
    state: bool,
) -> Result<Vec<String>, TreeError> {
    let subtree = tree
        .subtree_keys(key)
        .ok_or_else(|| TreeError::NotFound(key.to_string()))?;
    let ancestors = tree.ancestor_keys(key).unwrap_or_default();

    let mut set: HashSet<&str> = checked.iter().map(String::as_str).collect();
    if state {
        set.extend(subtree);
        for ancestor in ancestors {
            let all_checked = tree
                .find_by_key(ancestor)
                .is_some_and(|n| n.children().iter().all(|c| set.contains(c.key.as_str())));
            if !all_checked {
                break;
            }
            set.insert(ancestor);
        }
    } else {
        for k in subtree.into_iter().chain(ancestors) {
            set.remove(k);
        }
    }

    Ok(tree
        .iter()
        .map(|v| v.node.key.as_str())
        .filter(|k| set.contains(k))
        .map(String::from)
        .collect())
}

/// Tri-state of every node for rendering: checked if listed, half-checked
/// if any descendant is listed, unchecked otherwise.
pub fn check_states(tree: &Tree, checked: &[String]) -> BTreeMap<String, CheckState> {
    let set: HashSet<&str> = checked.iter().map(String::as_str).collect();
    let mut states = BTreeMap::new();
    for root in tree.roots() {
        fill_states(root, &set, &mut states);
    }
    states
}

/// Returns whether `node` or any descendant is listed.
fn fill_states(
    node: &TreeNode,
    set: &HashSet<&str>,
    states: &mut BTreeMap<String, CheckState>,
) -> bool {
    let mut any_below = false;
    for child in node.children() {
        any_below |= fill_states(child, set, states);
    }
    let state = if set.contains(node.key.as_str()) {
        CheckState::Checked
    } else if any_below {
        CheckState::HalfChecked
    } else {
        CheckState::Unchecked
    };
    states.insert(node.key.clone(), state);
    state == CheckState::Checked || any_below
}

/// Listed keys that are leaves of `tree`, in list order.
pub fn checked_leaves<'a>(tree: &Tree, checked: &'a [String]) -> Vec<&'a str> {
    checked
        .iter()
        .filter(|k| tree.find_by_key(k).is_some_and(TreeNode::is_leaf))
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perms() -> Tree {
        Tree::from_roots(vec![
            TreeNode::leaf("system", "系统管理")
                .child(
                    TreeNode::leaf("user", "用户管理")
                        .child(TreeNode::leaf("user:view", "查看用户列表"))
                        .child(TreeNode::leaf("user:add", "添加用户")),
                )
                .child(
                    TreeNode::leaf("role", "角色管理")
                        .child(TreeNode::leaf("role:view", "查看角色列表")),
                ),
        ])
        .unwrap()
    }

    fn list(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_check_parent_checks_descendants() {
        let checked = toggle_check(&perms(), &[], "user", true).unwrap();
        assert_eq!(checked, list(&["user", "user:view", "user:add"]));
    }

    #[test]
    fn test_check_last_sibling_checks_parent_chain() {
        let tree = perms();
        let checked = toggle_check(&tree, &list(&["user:view"]), "user:add", true).unwrap();
        assert_eq!(checked, list(&["user", "user:view", "user:add"]));

        let checked = toggle_check(&tree, &checked, "role:view", true).unwrap();
        assert_eq!(
            checked,
            list(&["system", "user", "user:view", "user:add", "role", "role:view"])
        );
    }

    #[test]
    fn test_uncheck_clears_ancestors_and_descendants() {
        let tree = perms();
        let all = toggle_check(&tree, &[], "system", true).unwrap();
        assert_eq!(all.len(), 6);
        let checked = toggle_check(&tree, &all, "user:add", false).unwrap();
        assert_eq!(checked, list(&["user:view", "role", "role:view"]));
    }

    #[test]
    fn test_toggle_unknown_key() {
        assert_eq!(
            toggle_check(&perms(), &[], "nope", true).unwrap_err(),
            TreeError::NotFound("nope".into())
        );
    }

    #[test]
    fn test_check_states() {
        let states = check_states(&perms(), &list(&["user:view"]));
        assert_eq!(states["user:view"], CheckState::Checked);
        assert_eq!(states["user"], CheckState::HalfChecked);
        assert_eq!(states["system"], CheckState::HalfChecked);
        assert_eq!(states["user:add"], CheckState::Unchecked);
        assert_eq!(states["role"], CheckState::Unchecked);
    }

    #[test]
    fn test_checked_leaves() {
        let checked = list(&["user", "user:view", "user:add", "ghost"]);
        assert_eq!(checked_leaves(&perms(), &checked), vec!["user:view", "user:add"]);
    }
}
