//! Glob patterns for matching buffer name prefixes.
//!
//! Patterns use a deliberately small syntax:
//!
//! - `*` matches any run of characters except the separator (`.`)
//! - `?` matches one character except the separator
//! - `[set]` matches one character in `set`, `[^set]` one character not in it
//! - `\x` matches `x` literally
//!
//! Inside a class every character is a literal member, including `-`, so
//! `[a-z]` is the three-member set `{a, -, z}` rather than a range.
//!
//! A compiled pattern always matches the whole input, never a substring.
//! Matching is case-sensitive; callers fold case on the input if they want
//! case-insensitive behaviour.
//!
//! # Example
//!
//! ```
//! use autosort::glob::GlobPattern;
//!
//! let pattern = GlobPattern::compile("irc.*").unwrap();
//! assert!(pattern.matches("irc.freenode"));
//! assert!(!pattern.matches("irc.server.freenode"));
//! ```

mod error;
mod translate;

pub use error::PatternError;

use std::fmt;
use std::str::FromStr;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Separator between the components of a hierarchical name.
pub const SEPARATOR: char = '.';

/// Upper bound on the compiled size of one pattern, in bytes.
pub const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// A compiled glob pattern.
///
/// Holds the original text alongside the compiled matcher. Equality and
/// hashing only consider the text.
#[derive(Clone)]
pub struct GlobPattern {
    text: String,
    regex: Regex,
}

impl GlobPattern {
    /// Compile a glob pattern.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::UnclosedClass`] for a `[` without a closing
    /// `]`, [`PatternError::TrailingEscape`] for a pattern ending in `\` and
    /// [`PatternError::Compile`] for a pattern that compiles to more than
    /// [`PATTERN_SIZE_LIMIT`] bytes.
    pub fn compile(text: &str) -> Result<Self, PatternError> {
        let expression = translate::translate(text)?;
        let regex = RegexBuilder::new(&expression)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build()
            .map_err(|source| PatternError::Compile {
                pattern: text.to_string(),
                source,
            })?;

        Ok(Self {
            text: text.to_string(),
            regex,
        })
    }

    /// Check whether the pattern matches the entire input.
    pub fn matches(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }

    /// The pattern text as written by the user.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Debug for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GlobPattern").field(&self.text).finish()
    }
}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl PartialEq for GlobPattern {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for GlobPattern {}

impl std::hash::Hash for GlobPattern {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl FromStr for GlobPattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

impl Serialize for GlobPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for GlobPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::compile(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glob(text: &str) -> GlobPattern {
        GlobPattern::compile(text).unwrap()
    }

    #[test]
    fn test_literal_matches_exactly() {
        let pattern = glob("core");
        assert!(pattern.matches("core"));
        assert!(!pattern.matches("cor"));
        assert!(!pattern.matches("xcore"));
        assert!(!pattern.matches("corex"));
        assert!(!pattern.matches("core.weechat"));
    }

    #[test]
    fn test_dot_is_literal() {
        let pattern = glob("irc.server");
        assert!(pattern.matches("irc.server"));
        assert!(!pattern.matches("ircxserver"));
    }

    #[test]
    fn test_star_stops_at_separator() {
        let pattern = glob("irc.*");
        assert!(pattern.matches("irc."));
        assert!(pattern.matches("irc.freenode"));
        assert!(!pattern.matches("irc.server.freenode"));
        assert!(glob("*").matches(""));
        assert!(!glob("*").matches("."));
    }

    #[test]
    fn test_question_mark_matches_one_non_separator() {
        let pattern = glob("a?c");
        assert!(pattern.matches("abc"));
        assert!(pattern.matches("a#c"));
        assert!(!pattern.matches("a.c"));
        assert!(!pattern.matches("ac"));
        assert!(!pattern.matches("abbc"));
    }

    #[test]
    fn test_class_members_are_literal() {
        let pattern = glob("[a-z]");
        assert!(pattern.matches("a"));
        assert!(pattern.matches("-"));
        assert!(pattern.matches("z"));
        assert!(!pattern.matches("b"));
        assert!(!pattern.matches("a-z"));
    }

    #[test]
    fn test_negated_class() {
        let pattern = glob("#[^#]*");
        assert!(pattern.matches("#chan"));
        assert!(pattern.matches("#"));
        assert!(!pattern.matches("##chan"));
    }

    #[test]
    fn test_caret_after_first_member_is_literal() {
        let pattern = glob("[a^]");
        assert!(pattern.matches("^"));
        assert!(pattern.matches("a"));
        assert!(!pattern.matches("b"));
    }

    #[test]
    fn test_closing_bracket_as_first_member() {
        let pattern = glob("[]]");
        assert!(pattern.matches("]"));

        let negated = glob("[^]]");
        assert!(negated.matches("x"));
        assert!(!negated.matches("]"));
    }

    #[test]
    fn test_escape_outside_and_inside_class() {
        assert!(glob(r"\*").matches("*"));
        assert!(!glob(r"\*").matches("abc"));
        assert!(glob(r"\[x").matches("[x"));
        assert!(glob(r"[\]x]").matches("]"));
        assert!(glob(r"[\]x]").matches("x"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        assert!(glob("a+").matches("a+"));
        assert!(!glob("a+").matches("aa"));
        assert!(glob("(x|y)").matches("(x|y)"));
        assert!(!glob("(x|y)").matches("x"));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let pattern = glob("irc");
        assert!(pattern.matches("irc"));
        assert!(!pattern.matches("IRC"));
    }

    #[test]
    fn test_unicode_components() {
        let pattern = glob("?");
        assert!(pattern.matches("é"));
        assert!(glob("[éè]").matches("è"));
    }

    #[test]
    fn test_compile_errors() {
        assert!(matches!(
            GlobPattern::compile("irc.[abc"),
            Err(PatternError::UnclosedClass { .. })
        ));
        assert!(matches!(
            GlobPattern::compile("irc\\"),
            Err(PatternError::TrailingEscape { .. })
        ));
        assert!(matches!(
            GlobPattern::compile("[]"),
            Err(PatternError::UnclosedClass { .. })
        ));
    }

    #[test]
    fn test_oversized_pattern_is_rejected() {
        let huge = "?".repeat(100_000);
        let err = GlobPattern::compile(&huge).unwrap_err();
        assert!(matches!(err, PatternError::Compile { .. }));
        assert_eq!(err.pattern().len(), huge.len());

        assert!(GlobPattern::compile(&"?".repeat(64)).is_ok());
    }

    #[test]
    fn test_display_and_equality_use_text() {
        let a = glob("irc.*");
        let b: GlobPattern = "irc.*".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "irc.*");
        assert_eq!(a.as_str(), "irc.*");
    }

    #[test]
    fn test_serde_as_string() {
        let pattern = glob("irc.[^#]*");
        let json = serde_json::to_string(&pattern).unwrap();
        assert_eq!(json, "\"irc.[^#]*\"");

        let back: GlobPattern = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pattern);

        let bad: Result<GlobPattern, _> = serde_json::from_str("\"[oops\"");
        assert!(bad.is_err());
    }

    // Property-based tests using proptest
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_literal_patterns_are_anchored(
                word in "[a-z#_]{1,8}",
                extra in "[a-z#_.]{1,4}"
            ) {
                let pattern = GlobPattern::compile(&word)?;
                prop_assert!(pattern.matches(&word));

                let suffixed = format!("{}{}", word, extra);
                prop_assert!(!pattern.matches(&suffixed));

                let prefixed = format!("{}{}", extra, word);
                prop_assert!(!pattern.matches(&prefixed));
            }

            #[test]
            fn test_star_never_crosses_separator(
                left in "[a-z]{0,6}",
                right in "[a-z]{0,6}"
            ) {
                let star = GlobPattern::compile("*")?;
                let name = format!("{}.{}", left, right);
                prop_assert!(!star.matches(&name));
                prop_assert!(star.matches(&left));
            }

            #[test]
            fn test_question_mark_never_matches_separator(c in any::<char>()) {
                let question = GlobPattern::compile("?")?;
                prop_assert_eq!(question.matches(&c.to_string()), c != SEPARATOR);
            }

            #[test]
            fn test_escaped_text_matches_itself(text in "\\PC{0,12}") {
                let escaped: String = text
                    .chars()
                    .flat_map(|c| ['\\', c])
                    .collect();
                let pattern = GlobPattern::compile(&escaped)?;
                prop_assert!(pattern.matches(&text));
            }
        }
    }
}
