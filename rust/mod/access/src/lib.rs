//! Access module: roles, permissions and the role→permission assignment.
//!
//! # Catalogs
//!
//! - **Role**: a named bundle of permissions held by users
//! - **Permission**: a menu or action code such as `user:view`
//!
//! # Assignment
//!
//! Permissions are granted by checking nodes of the permission tree in a
//! per-role dialog. The dialog keeps a draft; the checked list the tree
//! reports is stored as-is when the dialog is saved, and dropped when it
//! is cancelled.

pub mod model;
pub mod service;

pub use model::{
    AssignmentDraft, AssignmentView, CreatePermission, CreateRole, Permission, PermissionKind,
    Role,
};
pub use service::{AccessError, AccessService};
