pub mod assign;
pub mod org;
pub mod perm;
pub mod role;
pub mod shell;

use std::io::Write;

use openadmin_core::{Confirmer, ListParams, Prompt, ServiceError};

/// Asks on the terminal: `[y/N]` on stderr, answer from stdin.
pub struct StdinConfirmer;

impl Confirmer for StdinConfirmer {
    fn confirm(&self, prompt: &Prompt) -> bool {
        eprint!("{} {} [y/N]: ", prompt.title, prompt.description);
        let _ = std::io::stderr().flush();
        let mut answer = String::new();
        if std::io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        answer.trim().eq_ignore_ascii_case("y")
    }
}

/// Build list params from CLI flags.
pub(crate) fn list_params(
    q: Option<String>,
    sort: Option<String>,
    limit: Option<usize>,
    offset: Option<usize>,
) -> ListParams {
    let defaults = ListParams::default();
    ListParams {
        limit: limit.unwrap_or(defaults.limit),
        offset: offset.unwrap_or(defaults.offset),
        sort,
        q,
    }
}

/// Parse a `--json` merge-patch body.
pub(crate) fn parse_patch(body: &str) -> Result<serde_json::Value, ServiceError> {
    let patch: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| ServiceError::Validation(format!("invalid JSON: {}", e)))?;
    if !patch.is_object() {
        return Err(ServiceError::Validation("patch must be a JSON object".into()));
    }
    Ok(patch)
}
