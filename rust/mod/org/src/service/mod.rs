pub mod browse;
pub mod edit;

use thiserror::Error;

use openadmin_core::{ConsoleConfig, ServiceError};
use openadmin_tree::{ExpansionState, KeyGenerator, Tree, TreeError};

use crate::model::{DEMO_EXPANDED, demo_tree};

/// Organization service error type.
#[derive(Debug, Error)]
pub enum OrgError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation: {0}")]
    Validation(String),

    #[error("internal: {0}")]
    Internal(String),
}

impl From<TreeError> for OrgError {
    fn from(e: TreeError) -> Self {
        match e {
            TreeError::NotFound(key) => OrgError::NotFound(format!("organization '{}'", key)),
            TreeError::DuplicateKey(key) => {
                OrgError::Internal(format!("organization key '{}' is already in use", key))
            }
        }
    }
}

impl From<OrgError> for ServiceError {
    fn from(e: OrgError) -> Self {
        match e {
            OrgError::NotFound(m) => ServiceError::NotFound(format!("{} not found", m)),
            OrgError::Validation(m) => ServiceError::Validation(m),
            OrgError::Internal(m) => ServiceError::Internal(m),
        }
    }
}

/// One organization-editor session. Owns the tree and all UI state
/// derived from it; nothing is shared between sessions.
pub struct OrgService {
    pub(crate) tree: Tree,
    pub(crate) expansion: ExpansionState,
    pub(crate) selected: Option<String>,
    pub(crate) query: String,
    pub(crate) keys: KeyGenerator,
}

impl OrgService {
    /// Start a session on `tree` with the given keys expanded.
    pub fn new<I, S>(tree: Tree, expanded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tree,
            expansion: ExpansionState::new(expanded),
            selected: None,
            query: String::new(),
            keys: KeyGenerator::from_clock(),
        }
    }

    /// Start from the demo organization, or an empty tree when seeding is off.
    pub fn seeded(config: &ConsoleConfig) -> Self {
        if config.seed {
            Self::new(demo_tree(), config.initial_expanded.iter().cloned())
        } else {
            Self::new(Tree::empty(), Vec::<String>::new())
        }
    }

    /// Demo organization with the default expansion.
    pub fn demo() -> Self {
        Self::new(demo_tree(), DEMO_EXPANDED)
    }

    /// Replace the key source (deterministic keys in tests).
    #[must_use]
    pub fn with_keys(mut self, keys: KeyGenerator) -> Self {
        self.keys = keys;
        self
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// The selected key, or a validation error telling the user to pick one.
    pub(crate) fn require_selection(&self) -> Result<String, OrgError> {
        self.selected
            .clone()
            .ok_or_else(|| OrgError::Validation("select an organization first".into()))
    }
}

/// Trimmed, non-empty organization name.
pub(crate) fn validate_name(name: &str) -> Result<String, OrgError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(OrgError::Validation("organization name is required".into()));
    }
    Ok(name.to_string())
}
