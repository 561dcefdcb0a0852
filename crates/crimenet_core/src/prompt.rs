//! Confirmation capability for irreversible actions.
//!
//! The store never talks to a UI directly; embedders inject an implementation
//! (a modal dialog, a terminal question, a scripted answer in tests).

/// Synchronous yes/no question asked before an irreversible action.
pub trait ConfirmPrompt {
    /// Returns `true` when the user agrees to proceed.
    fn confirm(&mut self, message: &str) -> bool;
}

/// Prompt that always gives the same answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedAnswer(pub bool);

impl ConfirmPrompt for FixedAnswer {
    fn confirm(&mut self, _message: &str) -> bool {
        self.0
    }
}

impl<F> ConfirmPrompt for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}
