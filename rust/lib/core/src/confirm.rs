//! Confirmation collaborator for destructive operations.
//!
//! Services never talk to a dialog directly. They build a [`Prompt`] and
//! ask whichever `Confirmer` the caller injected.

/// What the user is being asked to confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub title: String,
    pub description: String,
}

impl Prompt {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Yes/no decision before a destructive operation.
pub trait Confirmer {
    /// Returns `true` to proceed.
    fn confirm(&self, prompt: &Prompt) -> bool;
}

/// Confirms everything. Used for `--yes` and in tests.
pub struct AlwaysConfirm;

impl Confirmer for AlwaysConfirm {
    fn confirm(&self, _prompt: &Prompt) -> bool {
        true
    }
}

/// Declines everything. Used for testing.
pub struct NeverConfirm;

impl Confirmer for NeverConfirm {
    fn confirm(&self, _prompt: &Prompt) -> bool {
        false
    }
}

impl<F> Confirmer for F
where
    F: Fn(&Prompt) -> bool,
{
    fn confirm(&self, prompt: &Prompt) -> bool {
        self(prompt)
    }
}
