use serde::{Deserialize, Serialize};

/// A role users can be given.
///
/// `key` addresses the role everywhere (assignments included); `id` is
/// the display number shown in the role table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub key: String,

    /// Sequential display number, assigned as max + 1 on create.
    pub id: u32,

    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Number of users holding this role.
    #[serde(default)]
    pub users_count: u32,

    /// Creation date, `YYYY-MM-DD`.
    pub created_at: String,
}

/// Input for creating a new role.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRole {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}
