//! Console configuration.
//!
//! Reads `~/.openadmin/config.toml`. Every field has a default, so a
//! missing file or a partial file is fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ServiceError;

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(ServiceError::Validation(format!(
                "unknown output format '{}', expected 'table' or 'json'",
                other
            ))),
        }
    }
}

/// Session-wide settings for the console.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,

    /// Output format for command results.
    pub output: OutputFormat,

    /// Start sessions with the demo organization, roles and permissions.
    pub seed: bool,

    /// Organization keys expanded when a session starts.
    pub initial_expanded: Vec<String>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            log_filter: "warn".to_string(),
            output: OutputFormat::Table,
            seed: true,
            initial_expanded: vec!["0".into(), "0-0".into(), "0-1".into()],
        }
    }
}

impl ConsoleConfig {
    /// Default config file path: ~/.openadmin/config.toml.
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".openadmin").join("config.toml")
    }

    /// Load config from disk, or return defaults if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, ServiceError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| ServiceError::Internal(format!("read {}: {}", path.display(), e)))?;
        Self::parse(&content)
    }

    /// Parse a TOML document.
    pub fn parse(content: &str) -> Result<Self, ServiceError> {
        toml::from_str(content)
            .map_err(|e| ServiceError::Validation(format!("invalid config: {}", e)))
    }

    /// Override fields from command-line style arguments.
    ///
    /// Supported flags:
    /// - `--log=FILTER`
    /// - `--output=table|json`
    /// - `--seed=true|false`
    /// - `--expand=KEY,KEY,...`
    ///
    /// Unknown arguments are ignored.
    pub fn apply_args(&mut self, args: &[String]) -> Result<(), ServiceError> {
        for arg in args {
            if let Some(val) = arg.strip_prefix("--log=") {
                self.log_filter = val.to_string();
            } else if let Some(val) = arg.strip_prefix("--output=") {
                self.output = val.parse()?;
            } else if let Some(val) = arg.strip_prefix("--seed=") {
                self.seed = val.parse().map_err(|_| {
                    ServiceError::Validation(format!("--seed expects true or false, got '{}'", val))
                })?;
            } else if let Some(val) = arg.strip_prefix("--expand=") {
                self.initial_expanded = val
                    .split(',')
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .map(String::from)
                    .collect();
            }
        }
        Ok(())
    }
}
