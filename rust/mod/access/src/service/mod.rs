pub mod assign;
pub mod permission;
pub mod role;

use std::cmp::Ordering;

use thiserror::Error;

use openadmin_core::{ConsoleConfig, ServiceError};
use openadmin_tree::{Assignments, Tree, TreeError};

use crate::model::{
    AssignmentDraft, Permission, Role, default_assignments, permission_tree, seed_permissions,
    seed_roles,
};

/// Access service error type.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("validation: {0}")]
    Validation(String),

    #[error("internal: {0}")]
    Internal(String),
}

impl From<TreeError> for AccessError {
    fn from(e: TreeError) -> Self {
        match e {
            TreeError::NotFound(key) => AccessError::NotFound(format!("permission node '{}'", key)),
            TreeError::DuplicateKey(key) => {
                AccessError::Internal(format!("permission node '{}' appears twice", key))
            }
        }
    }
}

impl From<AccessError> for ServiceError {
    fn from(e: AccessError) -> Self {
        match e {
            AccessError::NotFound(m) => ServiceError::NotFound(format!("{} not found", m)),
            AccessError::Conflict(m) => ServiceError::Conflict(m),
            AccessError::Validation(m) => ServiceError::Validation(m),
            AccessError::Internal(m) => ServiceError::Internal(m),
        }
    }
}

/// Roles, permissions and their assignment for one session.
pub struct AccessService {
    pub(crate) roles: Vec<Role>,
    pub(crate) permissions: Vec<Permission>,
    pub(crate) tree: Tree,
    pub(crate) assignments: Assignments,
    pub(crate) draft: Option<AssignmentDraft>,
}

impl AccessService {
    pub fn new(
        roles: Vec<Role>,
        permissions: Vec<Permission>,
        tree: Tree,
        assignments: Assignments,
    ) -> Self {
        Self {
            roles,
            permissions,
            tree,
            assignments,
            draft: None,
        }
    }

    /// Built-in roles, permissions and grants.
    pub fn demo() -> Self {
        Self::new(seed_roles(), seed_permissions(), permission_tree(), default_assignments())
    }

    /// Demo data, or empty catalogs over the permission tree when seeding
    /// is off.
    pub fn seeded(config: &ConsoleConfig) -> Self {
        if config.seed {
            Self::demo()
        } else {
            Self::new(Vec::new(), Vec::new(), permission_tree(), Assignments::new())
        }
    }

    /// The permission tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn assignments(&self) -> &Assignments {
        &self.assignments
    }
}

/// Required text field: trimmed, non-empty.
pub(crate) fn required(value: &str, field: &str) -> Result<String, AccessError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AccessError::Validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

/// Merge-patch bodies must be JSON objects.
pub(crate) fn require_object(patch: &serde_json::Value) -> Result<(), AccessError> {
    if !patch.is_object() {
        return Err(AccessError::Validation("patch must be a JSON object".into()));
    }
    Ok(())
}

/// Substring filter used by the role and permission tables.
pub(crate) fn matches_query(fields: &[&str], q: Option<&str>) -> bool {
    match q {
        Some(q) => fields.iter().any(|f| f.contains(q)),
        None => true,
    }
}

/// Apply a descending flag to an ascending comparison.
pub(crate) fn directed(ord: Ordering, desc: bool) -> Ordering {
    if desc { ord.reverse() } else { ord }
}
