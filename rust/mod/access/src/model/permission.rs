use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Whether a permission guards a menu entry or an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PermissionKind {
    #[serde(rename = "菜单", alias = "menu")]
    Menu,
    #[serde(rename = "操作", alias = "action")]
    Action,
}

impl PermissionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionKind::Menu => "菜单",
            PermissionKind::Action => "操作",
        }
    }
}

impl fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PermissionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "菜单" | "menu" => Ok(PermissionKind::Menu),
            "操作" | "action" => Ok(PermissionKind::Action),
            other => Err(format!("unknown permission type '{}' (expected 菜单 or 操作)", other)),
        }
    }
}

/// A permission code such as `user:view`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub key: String,
    pub id: u32,
    pub name: String,

    /// Unique across the catalog.
    pub code: String,

    #[serde(default)]
    pub description: String,

    #[serde(rename = "type")]
    pub kind: PermissionKind,

    /// Creation date, `YYYY-MM-DD`.
    pub created_at: String,
}

/// Input for creating a new permission. Name, code and type are required.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePermission {
    pub name: String,
    pub code: String,
    #[serde(default, rename = "type")]
    pub kind: Option<PermissionKind>,
    #[serde(default)]
    pub description: Option<String>,
}
