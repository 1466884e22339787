use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::TreeError;

/// A labelled node with a globally unique key.
///
/// `children: None` means the node never had children. Mutations never
/// leave `Some(vec![])` behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub key: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    /// A node without children.
    pub fn leaf(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            children: None,
        }
    }

    /// Append a child (builder style).
    #[must_use]
    pub fn child(mut self, node: TreeNode) -> Self {
        self.children.get_or_insert_with(Vec::new).push(node);
        self
    }

    /// Children as a slice; empty for leaves.
    pub fn children(&self) -> &[TreeNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }
}

/// An ordered forest of [`TreeNode`]s.
///
/// Root-level nodes are siblings of each other. Every mutation returns a
/// new `Tree`; the receiver is never modified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tree {
    roots: Vec<TreeNode>,
}

impl Tree {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a tree, rejecting duplicated keys.
    pub fn from_roots(roots: Vec<TreeNode>) -> Result<Self, TreeError> {
        let tree = Self { roots };
        let mut seen = HashSet::new();
        for entry in tree.iter() {
            if !seen.insert(entry.node.key.as_str()) {
                return Err(TreeError::DuplicateKey(entry.node.key.clone()));
            }
        }
        Ok(tree)
    }

    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    pub(crate) fn roots_mut(&mut self) -> &mut Vec<TreeNode> {
        &mut self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes at every depth.
    pub fn len(&self) -> usize {
        self.iter().count()
    }
}
