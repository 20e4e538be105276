//! Error types for rule editing commands.

use thiserror::Error;

use crate::rules::{RuleError, RuleSyntaxError};

/// Errors parsing or executing a rule editing command.
#[derive(Debug, Clone, Error)]
pub enum CommandError {
    /// No command exists at this path.
    #[error("{path}: command not found")]
    NotFound { path: String },

    /// The command got the wrong number of arguments.
    #[error("Expected exactly {expected} arguments, got {got}.")]
    ArgumentCount { expected: usize, got: usize },

    /// An index argument is not a non-negative integer.
    #[error("Invalid index: expected a non-negative integer, got \"{0}\".")]
    InvalidIndex(String),

    /// A rule argument could not be parsed.
    #[error(transparent)]
    InvalidRule(#[from] RuleSyntaxError),

    /// The rule table rejected the operation.
    #[error(transparent)]
    Rejected(#[from] RuleError),
}
