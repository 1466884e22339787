//! Read-only lookups. All traversals are pre-order depth-first.

use serde::Serialize;

use crate::{Tree, TreeNode};

/// One node as seen by a pre-order walk.
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    pub node: &'a TreeNode,
    pub depth: usize,
}

/// Pre-order iterator over every node of a [`Tree`].
pub struct PreOrder<'a> {
    stack: Vec<(&'a TreeNode, usize)>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        // Reverse so the first child is popped next.
        for child in node.children().iter().rev() {
            self.stack.push((child, depth + 1));
        }
        Some(Visit { node, depth })
    }
}

/// `(key, label)` entry of the flattened search corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatNode {
    pub key: String,
    pub label: String,
    pub depth: usize,
}

impl Tree {
    /// Walk every node, parents before children, siblings in stored order.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder {
            stack: self.roots().iter().rev().map(|n| (n, 0)).collect(),
        }
    }

    /// First node with this key, if any.
    pub fn find_by_key(&self, key: &str) -> Option<&TreeNode> {
        self.iter().map(|v| v.node).find(|n| n.key == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find_by_key(key).is_some()
    }

    /// Key of the direct parent. `None` for root-level or unknown keys.
    pub fn find_parent_key(&self, key: &str) -> Option<&str> {
        self.iter()
            .map(|v| v.node)
            .find(|n| n.children().iter().any(|c| c.key == key))
            .map(|n| n.key.as_str())
    }

    /// Keys from the node up to its root-level ancestor, nearest first,
    /// excluding the node itself. `None` if the key is unknown.
    pub fn ancestor_keys(&self, key: &str) -> Option<Vec<&str>> {
        let mut path = Vec::new();
        if !path_to(self.roots(), key, &mut path) {
            return None;
        }
        path.pop();
        path.reverse();
        Some(path)
    }

    /// Depth of the node (root level is 0).
    pub fn depth_of(&self, key: &str) -> Option<usize> {
        self.iter().find(|v| v.node.key == key).map(|v| v.depth)
    }

    /// The node's key followed by all of its descendants' keys, pre-order.
    pub fn subtree_keys(&self, key: &str) -> Option<Vec<&str>> {
        let node = self.find_by_key(key)?;
        let mut keys = Vec::new();
        collect_keys(node, &mut keys);
        Some(keys)
    }

    /// The search corpus: every node once, in pre-order.
    pub fn flatten(&self) -> Vec<FlatNode> {
        self.iter()
            .map(|v| FlatNode {
                key: v.node.key.clone(),
                label: v.node.label.clone(),
                depth: v.depth,
            })
            .collect()
    }
}

fn path_to<'a>(nodes: &'a [TreeNode], key: &str, path: &mut Vec<&'a str>) -> bool {
    for node in nodes {
        path.push(node.key.as_str());
        if node.key == key || path_to(node.children(), key, path) {
            return true;
        }
        path.pop();
    }
    false
}

fn collect_keys<'a>(node: &'a TreeNode, keys: &mut Vec<&'a str>) {
    keys.push(node.key.as_str());
    for child in node.children() {
        collect_keys(child, keys);
    }
}
