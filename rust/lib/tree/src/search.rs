//! Label search and highlighting.
//!
//! Matching is a case-sensitive literal substring test. An empty query
//! matches nothing here; callers treat it as "search cleared".

use std::collections::BTreeSet;

use serde::Serialize;

use crate::{Tree, TreeNode};

/// Render shape of one label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Highlight {
    Plain {
        label: String,
    },
    /// `before + matched + after == label`; `start` is the byte offset of
    /// the first occurrence.
    Match {
        before: String,
        matched: String,
        after: String,
        start: usize,
    },
}

impl Highlight {
    pub fn is_match(&self) -> bool {
        matches!(self, Highlight::Match { .. })
    }

    /// The original label text.
    pub fn text(&self) -> String {
        match self {
            Highlight::Plain { label } => label.clone(),
            Highlight::Match { before, matched, after, .. } => {
                format!("{}{}{}", before, matched, after)
            }
        }
    }
}

/// A node of the render tree produced by [`highlight_tree`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightedNode {
    pub key: String,
    pub title: Highlight,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<HighlightedNode>>,
}

/// Split `label` around the first occurrence of `query`.
pub fn highlight_label(label: &str, query: &str) -> Highlight {
    match label.find(query) {
        Some(start) if !query.is_empty() => Highlight::Match {
            before: label[..start].to_string(),
            matched: query.to_string(),
            after: label[start + query.len()..].to_string(),
            start,
        },
        _ => Highlight::Plain {
            label: label.to_string(),
        },
    }
}

/// Mirror the tree with every label shaped by [`highlight_label`].
pub fn highlight_tree(tree: &Tree, query: &str) -> Vec<HighlightedNode> {
    tree.roots().iter().map(|n| highlight_node(n, query)).collect()
}

fn highlight_node(node: &TreeNode, query: &str) -> HighlightedNode {
    HighlightedNode {
        key: node.key.clone(),
        title: highlight_label(&node.label, query),
        children: node
            .children
            .as_ref()
            .map(|children| children.iter().map(|c| highlight_node(c, query)).collect()),
    }
}

impl Tree {
    /// Keys of nodes whose label contains `query`, pre-order.
    pub fn matching_keys(&self, query: &str) -> Vec<&str> {
        if query.is_empty() {
            return Vec::new();
        }
        self.iter()
            .filter(|v| v.node.label.contains(query))
            .map(|v| v.node.key.as_str())
            .collect()
    }
}

/// Union of the ancestor chains of every match. The matches themselves
/// are only included when they are an ancestor of another match.
pub fn search_expansion(tree: &Tree, query: &str) -> BTreeSet<String> {
    let mut expanded = BTreeSet::new();
    for key in tree.matching_keys(query) {
        if let Some(ancestors) = tree.ancestor_keys(key) {
            expanded.extend(ancestors.into_iter().map(String::from));
        }
    }
    expanded
}
