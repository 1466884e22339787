use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// No node carries this key.
    #[error("node not found: {0}")]
    NotFound(String),

    /// A key would appear twice. Never user-recoverable.
    #[error("duplicate node key: {0}")]
    DuplicateKey(String),
}
