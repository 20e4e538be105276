//! JSON encoding for rule tables.
//!
//! The stored form is a JSON array of `[pattern, score]` pairs in priority
//! order:
//!
//! ```text
//! [["core",0],["irc",2],["*",1],["irc.server",1],["irc.irc_raw",0]]
//! ```
//!
//! Decoding is tolerant. A blob that is not an array decodes to an empty
//! table, and individual bad entries are skipped while the rest are kept.
//! Every problem is reported as a [`DecodeError`] and logged.

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use super::{Rule, RuleTable};
use crate::glob::{GlobPattern, PatternError};

/// Problems found while decoding a stored rule table.
///
/// None of these are fatal: the offending entry (or the whole blob, for
/// [`DecodeError::Malformed`]) is dropped and decoding continues.
#[derive(Debug, Clone, Error)]
pub enum DecodeError {
    /// The blob is not a JSON array.
    #[error("Invalid rules: expected JSON encoded list of pairs, got \"{blob}\".")]
    Malformed { blob: String },

    /// An entry is not a `[pattern, score]` pair.
    #[error("Invalid rule #{index}: expected [pattern, score], got {got}. Rule ignored.")]
    WrongArity { index: usize, got: String },

    /// The pattern of an entry is not a string.
    #[error("Invalid pattern in rule #{index}: expected a string, got {got}. Rule ignored.")]
    PatternNotString { index: usize, got: String },

    /// The pattern of an entry failed to compile.
    #[error("Invalid pattern in rule #{index}: {source}. Rule ignored.")]
    InvalidPattern {
        index: usize,
        #[source]
        source: PatternError,
    },

    /// The score of an entry is not an integer or is above
    /// [`MAX_SCORE`](super::MAX_SCORE).
    #[error("Invalid score in rule #{index}: expected an integer, got {got}. Rule ignored.")]
    InvalidScore { index: usize, got: String },
}

impl RuleTable {
    /// Encode the rules for storage.
    pub fn encode(&self) -> String {
        // Rules serialize as `[pattern, score]`; strings and integers cannot fail.
        serde_json::to_string(&self.rules).unwrap_or_else(|_| String::from("[]"))
    }

    /// Decode stored rules, logging and skipping anything invalid.
    pub fn decode(blob: &str) -> RuleTable {
        let (table, issues) = Self::decode_with_issues(blob);
        for issue in &issues {
            warn!(%issue, "Skipping stored sort rule");
        }
        table
    }

    /// Decode stored rules, returning the problems instead of logging them.
    pub fn decode_with_issues(blob: &str) -> (RuleTable, Vec<DecodeError>) {
        // Well-formed blobs deserialize directly; anything else is walked
        // entry by entry to find what to keep.
        if let Ok(rules) = serde_json::from_str::<Vec<Rule>>(blob) {
            return (rules.into_iter().collect(), Vec::new());
        }

        let entries = match serde_json::from_str::<Value>(blob) {
            Ok(Value::Array(entries)) => entries,
            _ => {
                return (
                    RuleTable::new(),
                    vec![DecodeError::Malformed {
                        blob: blob.to_string(),
                    }],
                )
            }
        };

        let mut table = RuleTable::new();
        let mut issues = Vec::new();

        for (index, entry) in entries.iter().enumerate() {
            match decode_entry(index, entry) {
                Ok(rule) => table.push(rule),
                Err(issue) => issues.push(issue),
            }
        }

        (table, issues)
    }
}

fn decode_entry(index: usize, entry: &Value) -> Result<Rule, DecodeError> {
    let (pattern, score) = match entry.as_array().map(Vec::as_slice) {
        Some([pattern, score]) => (pattern, score),
        _ => {
            return Err(DecodeError::WrongArity {
                index,
                got: entry.to_string(),
            })
        }
    };

    let text = pattern
        .as_str()
        .ok_or_else(|| DecodeError::PatternNotString {
            index,
            got: pattern.to_string(),
        })?;
    let pattern =
        GlobPattern::compile(text).map_err(|source| DecodeError::InvalidPattern { index, source })?;

    let invalid_score = || DecodeError::InvalidScore {
        index,
        got: score.to_string(),
    };
    let value = decode_score(score).ok_or_else(invalid_score)?;

    Rule::new(pattern, value).map_err(|_| invalid_score())
}

/// Accept JSON integers and strings holding a decimal integer.
fn decode_score(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
