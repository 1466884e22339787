use serde::{Deserialize, Serialize};

use openadmin_tree::HighlightedNode;

/// Input for creating an organization unit.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrg {
    /// Display name. Required, surrounding whitespace is trimmed.
    pub name: String,

    /// Parent key (None = root level).
    #[serde(default)]
    pub parent_key: Option<String>,
}

/// Details panel for one organization unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrgDetail {
    pub key: String,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_key: Option<String>,

    /// Root level is 0.
    pub depth: usize,

    /// Direct children.
    pub children: usize,

    /// All nodes below this one.
    pub descendants: usize,
}

/// Everything needed to render the organization panel.
#[derive(Debug, Clone, Serialize)]
pub struct OrgView {
    pub nodes: Vec<HighlightedNode>,
    pub expanded: Vec<String>,
    pub auto_expand_parent: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub query: String,

    /// Number of labels matching `query`.
    pub matches: usize,
}

/// Result of a delete request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeleteOutcome {
    /// Keys removed, the target first, then its descendants in pre-order.
    Deleted { removed: Vec<String> },
    /// The confirmation was declined; nothing changed.
    Cancelled,
}
