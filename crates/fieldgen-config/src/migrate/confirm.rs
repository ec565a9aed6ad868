//! Operator confirmation seam

use fieldgen_core::error::FieldGenResult;

/// Yes/no confirmation asked before a migrated document is written back
pub trait Confirm {
    /// Present `prompt` and return the operator's answer
    fn confirm(&self, prompt: &str) -> FieldGenResult<bool>;
}

/// Answers every prompt with a fixed value without asking anyone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedAnswer(pub bool);

impl Confirm for FixedAnswer {
    fn confirm(&self, _prompt: &str) -> FieldGenResult<bool> {
        Ok(self.0)
    }
}
