//! Error types for rule table operations.

use thiserror::Error;

/// Errors returned by index-taking [`RuleTable`](super::RuleTable) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// The index does not refer to a rule (or insertion point).
    #[error("Index out of range: expected between 0 and {max}, got {index}.")]
    IndexOutOfRange { index: usize, max: usize },
}
