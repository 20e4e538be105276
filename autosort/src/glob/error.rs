//! Error types for glob pattern compilation.

use thiserror::Error;

/// Errors that can occur while compiling a glob pattern.
#[derive(Debug, Clone, Error)]
pub enum PatternError {
    /// A `[` opened a character class that was never closed.
    #[error("unmatched opening '[' in \"{pattern}\"")]
    UnclosedClass { pattern: String },

    /// The pattern ends with a lone `\`.
    #[error("unexpected trailing '\\' in \"{pattern}\"")]
    TrailingEscape { pattern: String },

    /// The translated expression exceeds the compiled size limit.
    #[error("failed to compile \"{pattern}\": {source}")]
    Compile {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl PatternError {
    /// The pattern text that failed to compile.
    pub fn pattern(&self) -> &str {
        match self {
            PatternError::UnclosedClass { pattern }
            | PatternError::TrailingEscape { pattern }
            | PatternError::Compile { pattern, .. } => pattern,
        }
    }
}
