//! Hierarchical-entity editor.
//!
//! An ordered, keyed forest of labelled nodes plus everything a tree
//! editor derives from it:
//!
//! - **query**: find by key, parent lookup, pre-order flatten
//! - **mutation**: insert child, rename, delete subtree (each returns a new tree)
//! - **keygen**: collision-free key synthesis for new nodes
//! - **search**: case-sensitive label search, ancestor expansion, highlight spans
//! - **expansion**: manual vs. search-driven expansion state
//! - **check**: checkable-tree conduction and tri-state derivation
//! - **assignment**: owner → checked-keys mapping (role → permissions)
//!
//! Keys are unique across the whole tree, not just among siblings.

pub mod assignment;
pub mod check;
pub mod error;
pub mod expansion;
pub mod keygen;
pub mod mutation;
pub mod node;
pub mod query;
pub mod search;

pub use assignment::Assignments;
pub use check::{CheckState, check_states, checked_leaves, toggle_check};
pub use error::TreeError;
pub use expansion::ExpansionState;
pub use keygen::KeyGenerator;
pub use node::{Tree, TreeNode};
pub use query::{FlatNode, PreOrder, Visit};
pub use search::{Highlight, HighlightedNode, highlight_label, highlight_tree, search_expansion};
