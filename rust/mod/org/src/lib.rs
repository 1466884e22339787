//! Organization module: the organization-tree editor session.
//!
//! # Operations
//!
//! - **select**: single selection, cleared when the node disappears
//! - **add / rename / delete**: structural edits on the organization tree
//! - **search**: case-sensitive label search with auto-expansion
//! - **view**: highlighted render tree plus the visible expansion set
//!
//! # Usage
//!
//! ```ignore
//! use org::OrgService;
//!
//! let mut orgs = OrgService::seeded(&ConsoleConfig::default());
//! orgs.select("0-0")?;
//! let created = orgs.add_to_selected("新组")?;
//! ```

pub mod model;
pub mod service;

pub use model::{CreateOrg, DeleteOutcome, OrgDetail, OrgView};
pub use service::{OrgError, OrgService};
