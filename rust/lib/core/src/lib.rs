pub mod config;
pub mod confirm;
pub mod error;
pub mod types;

pub use config::{ConsoleConfig, OutputFormat};
pub use confirm::{AlwaysConfirm, Confirmer, NeverConfirm, Prompt};
pub use error::ServiceError;
pub use types::{ListParams, ListResult, merge_patch, new_id, today};
