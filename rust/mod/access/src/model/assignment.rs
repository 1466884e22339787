use std::collections::BTreeMap;

use serde::Serialize;

use openadmin_tree::CheckState;

/// The open assignment dialog for one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentDraft {
    pub role_key: String,
    pub role_name: String,

    /// Checked keys as last reported by the permission tree.
    pub checked: Vec<String>,
}

/// Render model for the assignment dialog.
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentView {
    pub title: String,
    pub role_key: String,
    pub checked: Vec<String>,

    /// Tri-state of every permission-tree node.
    pub states: BTreeMap<String, CheckState>,
}
