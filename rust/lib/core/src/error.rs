use thiserror::Error;

// ── Error codes ─────────────────────────────────────────────────────
//
// Stable, machine-readable identifiers. Callers match on these,
// never on the human-readable message string.

/// Stable error code constants.
pub mod error_code {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const ALREADY_EXISTS: &str = "ALREADY_EXISTS";
    pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
    pub const INTERNAL: &str = "INTERNAL";
}

// ── ServiceError ────────────────────────────────────────────────────

/// Unified error type shared by every console module.
///
/// Module errors (`OrgError`, `AccessError`) convert into this so the
/// presentation layer only has to know one shape:
///
/// ```text
/// {"code": "NOT_FOUND", "message": "organization '0-9' not found"}
/// ```
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Referenced key does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Unique field already taken.
    #[error("{0}")]
    Conflict(String),

    /// Form input is missing or malformed. Never mutates state.
    #[error("{0}")]
    Validation(String),

    /// Internal consistency violation (e.g. a duplicated node key).
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    /// Stable, machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => error_code::NOT_FOUND,
            ServiceError::Conflict(_) => error_code::ALREADY_EXISTS,
            ServiceError::Validation(_) => error_code::VALIDATION_FAILED,
            ServiceError::Internal(_) => error_code::INTERNAL,
        }
    }

    /// Whether the user can fix this by changing their input.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ServiceError::Internal(_))
    }

    /// JSON body used by the `-o json` output mode.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.error_code(),
            "message": self.to_string(),
        })
    }
}
