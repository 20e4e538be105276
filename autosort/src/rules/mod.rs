//! Ordered sorting rules and score lookup.
//!
//! A [`RuleTable`] is an ordered list of `(pattern, score)` pairs. The first
//! rule whose pattern matches a name prefix decides its score; prefixes no
//! rule matches get the table's default score, which is always higher than
//! every explicit score so unmatched components sort last.
//!
//! # Example
//!
//! ```
//! use autosort::rules::{Rule, RuleTable};
//!
//! let mut table = RuleTable::new();
//! table.push(Rule::parse("core", 0).unwrap());
//! table.push(Rule::parse("*", 1).unwrap());
//!
//! assert_eq!(table.score("core"), 0);
//! assert_eq!(table.score("weechat"), 1);
//! assert_eq!(table.score("irc.freenode"), 2);
//! ```

mod codec;
mod error;

pub use codec::DecodeError;
pub use error::RuleError;

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::glob::{GlobPattern, PatternError};

/// The rule set installed when no rules have been configured.
///
/// Core first, IRC last, everything else in between. Within IRC the raw
/// buffer comes first and server buffers before channels.
pub const DEFAULT_RULES: &[(&str, i64)] = &[
    ("core", 0),
    ("irc", 2),
    ("*", 1),
    ("irc.server", 1),
    ("irc.irc_raw", 0),
];

/// Largest score a rule may carry.
///
/// One below `i64::MAX`, so the table's default score can always be
/// strictly greater than every rule.
pub const MAX_SCORE: i64 = i64::MAX - 1;

/// A single sorting rule: a pattern and the score it assigns.
///
/// Serializes as the two-element array `[pattern, score]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "(GlobPattern, i64)", into = "(GlobPattern, i64)")]
pub struct Rule {
    pattern: GlobPattern,
    score: i64,
}

impl Rule {
    /// Create a rule from an already compiled pattern.
    ///
    /// # Errors
    ///
    /// Returns [`RuleSyntaxError::ScoreOutOfRange`] if `score` exceeds
    /// [`MAX_SCORE`].
    pub fn new(pattern: GlobPattern, score: i64) -> Result<Self, RuleSyntaxError> {
        if score > MAX_SCORE {
            return Err(RuleSyntaxError::ScoreOutOfRange(score));
        }
        Ok(Self { pattern, score })
    }

    /// Compile `pattern` and create a rule from it.
    pub fn parse(pattern: &str, score: i64) -> Result<Self, RuleSyntaxError> {
        Self::new(GlobPattern::compile(pattern)?, score)
    }

    pub fn pattern(&self) -> &GlobPattern {
        &self.pattern
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    /// Check whether this rule applies to a name prefix.
    pub fn matches(&self, prefix: &str) -> bool {
        self.pattern.matches(prefix)
    }
}

impl TryFrom<(GlobPattern, i64)> for Rule {
    type Error = RuleSyntaxError;

    fn try_from((pattern, score): (GlobPattern, i64)) -> Result<Self, Self::Error> {
        Self::new(pattern, score)
    }
}

impl From<Rule> for (GlobPattern, i64) {
    fn from(rule: Rule) -> Self {
        (rule.pattern, rule.score)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.pattern, self.score)
    }
}

/// Error parsing a rule from `pattern = score` text.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RuleSyntaxError {
    /// The text is not of the form `pattern = score`.
    #[error("Invalid rule: expected \"pattern = score\", got \"{0}\".")]
    Shape(String),

    /// The score does not fit in a 64-bit integer.
    #[error("Invalid score: expected integer, got \"{0}\".")]
    Score(String),

    /// The score is above [`MAX_SCORE`].
    #[error("Invalid score: expected at most {max}, got {0}.", max = MAX_SCORE)]
    ScoreOutOfRange(i64),

    /// The pattern failed to compile.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] PatternError),
}

fn rule_text_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // (.*)          - pattern, everything up to the last '=' before the score
        // =\s*          - separator
        // ([+-]?\d+)    - signed decimal score
        Regex::new(r"^(.*)=\s*([+-]?\d+)$").expect("rule text regex is valid")
    })
}

impl FromStr for Rule {
    type Err = RuleSyntaxError;

    /// Parse `pattern = score`, as typed in rule editing commands.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s.trim();
        let captures = rule_text_pattern()
            .captures(stripped)
            .ok_or_else(|| RuleSyntaxError::Shape(stripped.to_string()))?;

        let pattern = captures.get(1).map_or("", |m| m.as_str()).trim();
        let score_text = captures.get(2).map_or("", |m| m.as_str());
        let score = score_text
            .parse::<i64>()
            .map_err(|_| RuleSyntaxError::Score(score_text.to_string()))?;

        Self::parse(pattern, score)
    }
}

/// Ordered rules with first-match-wins score lookup.
///
/// All index-taking operations are bounds-checked and leave the table
/// untouched when they fail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<Rule>,
    default_score: i64,
}

impl RuleTable {
    /// Create an empty table. Its default score is 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table holding [`DEFAULT_RULES`].
    pub fn with_default_rules() -> Self {
        DEFAULT_RULES
            .iter()
            .filter_map(|&(pattern, score)| Rule::parse(pattern, score).ok())
            .collect()
    }

    /// Score for a `.`-joined name prefix.
    ///
    /// Returns the score of the lowest-index rule matching `prefix`, or the
    /// default score when none does.
    pub fn score(&self, prefix: &str) -> i64 {
        self.rules
            .iter()
            .find(|rule| rule.matches(prefix))
            .map(Rule::score)
            .unwrap_or(self.default_score)
    }

    /// Score assigned to prefixes that no rule matches.
    ///
    /// Only ever raised: removing a rule or replacing it with a lower score
    /// keeps the current value.
    pub fn default_score(&self) -> i64 {
        self.default_score
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Append a rule with the lowest priority.
    pub fn push(&mut self, rule: Rule) {
        self.raise_default(rule.score);
        self.rules.push(rule);
    }

    /// Insert a rule at `index`, shifting later rules down.
    ///
    /// `index` may equal the table length to append.
    pub fn insert(&mut self, index: usize, rule: Rule) -> Result<(), RuleError> {
        if index > self.rules.len() {
            return Err(RuleError::IndexOutOfRange {
                index,
                max: self.rules.len(),
            });
        }
        self.raise_default(rule.score);
        self.rules.insert(index, rule);
        Ok(())
    }

    /// Replace the rule at `index`, returning the old one.
    pub fn replace(&mut self, index: usize, rule: Rule) -> Result<Rule, RuleError> {
        self.check_index(index)?;
        self.raise_default(rule.score);
        Ok(std::mem::replace(&mut self.rules[index], rule))
    }

    /// Remove and return the rule at `index`.
    pub fn remove(&mut self, index: usize) -> Result<Rule, RuleError> {
        self.check_index(index)?;
        Ok(self.rules.remove(index))
    }

    /// Move the rule at `from` so that it ends up at index `to`.
    pub fn move_rule(&mut self, from: usize, to: usize) -> Result<(), RuleError> {
        self.check_index(from)?;
        self.check_index(to)?;
        let rule = self.rules.remove(from);
        self.rules.insert(to, rule);
        Ok(())
    }

    /// Swap the rules at `a` and `b`.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), RuleError> {
        self.check_index(a)?;
        self.check_index(b)?;
        self.rules.swap(a, b);
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), RuleError> {
        if index < self.rules.len() {
            Ok(())
        } else {
            Err(RuleError::IndexOutOfRange {
                index,
                max: self.rules.len(),
            })
        }
    }

    /// `score` comes from a [`Rule`], so it is at most [`MAX_SCORE`].
    fn raise_default(&mut self, score: i64) {
        self.default_score = self.default_score.max(score + 1);
    }
}

impl FromIterator<Rule> for RuleTable {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        let mut table = RuleTable::new();
        for rule in iter {
            table.push(rule);
        }
        table
    }
}

impl<'a> IntoIterator for &'a RuleTable {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(pattern: &str, score: i64) -> Rule {
        Rule::parse(pattern, score).unwrap()
    }

    fn table(rules: &[(&str, i64)]) -> RuleTable {
        rules.iter().map(|&(p, s)| rule(p, s)).collect()
    }

    fn patterns(table: &RuleTable) -> Vec<&str> {
        table.iter().map(|r| r.pattern().as_str()).collect()
    }

    #[test]
    fn test_empty_table_default_score_is_zero() {
        let table = RuleTable::new();
        assert_eq!(table.default_score(), 0);
        assert_eq!(table.score("anything"), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_first_match_wins() {
        let table = table(&[("irc.*", 5), ("irc.freenode", 1)]);
        assert_eq!(table.score("irc.freenode"), 5);
    }

    #[test]
    fn test_unmatched_prefix_gets_default() {
        let table = table(&[("core", 0), ("irc", 7)]);
        assert_eq!(table.default_score(), 8);
        assert_eq!(table.score("weechat"), 8);
    }

    #[test]
    fn test_default_score_exceeds_all_scores() {
        let table = table(&[("a", -3), ("b", 10), ("c", 4)]);
        assert!(table.iter().all(|r| r.score() < table.default_score()));
        assert_eq!(table.default_score(), 11);
    }

    #[test]
    fn test_default_score_with_only_negative_scores() {
        let table = table(&[("a", -5)]);
        assert_eq!(table.default_score(), 0);
        assert_eq!(table.score("b"), 0);
    }

    #[test]
    fn test_default_score_never_lowered() {
        let mut table = table(&[("core", 0), ("irc", 9)]);
        assert_eq!(table.default_score(), 10);

        table.remove(1).unwrap();
        assert_eq!(table.default_score(), 10);

        table.push(rule("irc", 9));
        table.replace(1, rule("irc", 1)).unwrap();
        assert_eq!(table.default_score(), 10);
    }

    #[test]
    fn test_replace_raises_default() {
        let mut table = table(&[("core", 0)]);
        let old = table.replace(0, rule("core", 20)).unwrap();
        assert_eq!(old.score(), 0);
        assert_eq!(table.default_score(), 21);
        assert_eq!(table.score("core"), 20);
    }

    #[test]
    fn test_insert_positions() {
        let mut table = table(&[("a", 0), ("b", 0)]);
        table.insert(0, rule("first", 0)).unwrap();
        table.insert(3, rule("last", 0)).unwrap();
        table.insert(2, rule("middle", 3)).unwrap();
        assert_eq!(patterns(&table), vec!["first", "a", "middle", "b", "last"]);
        assert_eq!(table.default_score(), 4);
    }

    #[test]
    fn test_insert_out_of_range() {
        let mut table = table(&[("a", 0)]);
        let err = table.insert(2, rule("b", 50)).unwrap_err();
        assert_eq!(err, RuleError::IndexOutOfRange { index: 2, max: 1 });
        assert_eq!(table.len(), 1);
        assert_eq!(table.default_score(), 1);
    }

    #[test]
    fn test_remove_returns_rule() {
        let mut table = table(&[("a", 0), ("b", 1)]);
        let removed = table.remove(0).unwrap();
        assert_eq!(removed.pattern().as_str(), "a");
        assert_eq!(patterns(&table), vec!["b"]);
    }

    #[test]
    fn test_move_rule_forward_and_back() {
        let mut table = table(&[("a", 0), ("b", 0), ("c", 0), ("d", 0)]);
        table.move_rule(0, 2).unwrap();
        assert_eq!(patterns(&table), vec!["b", "c", "a", "d"]);

        table.move_rule(3, 0).unwrap();
        assert_eq!(patterns(&table), vec!["d", "b", "c", "a"]);
    }

    #[test]
    fn test_move_rule_rejects_without_losing_rules() {
        let mut table = table(&[("a", 0), ("b", 0)]);
        assert!(table.move_rule(0, 2).is_err());
        assert!(table.move_rule(2, 0).is_err());
        assert_eq!(patterns(&table), vec!["a", "b"]);
    }

    #[test]
    fn test_swap() {
        let mut table = table(&[("a", 0), ("b", 1), ("c", 2)]);
        table.swap(0, 2).unwrap();
        assert_eq!(patterns(&table), vec!["c", "b", "a"]);
        assert_eq!(table.score("c"), 2);

        table.swap(1, 1).unwrap();
        assert_eq!(patterns(&table), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_out_of_range_mutations_leave_table_unchanged() {
        let mut table = table(&[("a", 0), ("b", 1)]);
        let before = table.clone();

        assert!(table.replace(2, rule("x", 99)).is_err());
        assert!(table.remove(2).is_err());
        assert!(table.swap(0, 2).is_err());
        assert!(table.swap(5, 0).is_err());
        assert!(table.move_rule(1, 7).is_err());
        assert!(table.insert(3, rule("x", 99)).is_err());

        assert_eq!(table, before);
    }

    #[test]
    fn test_default_rules() {
        let table = RuleTable::with_default_rules();
        assert_eq!(table.len(), 5);
        assert_eq!(table.default_score(), 3);
        assert_eq!(table.score("core"), 0);
        assert_eq!(table.score("irc"), 2);
        assert_eq!(table.score("weechat"), 1);
        assert_eq!(table.score("irc.server"), 1);
        assert_eq!(table.score("irc.irc_raw"), 0);
        // "*" never matches a multi-component prefix
        assert_eq!(table.score("irc.server.freenode"), 3);
    }

    #[test]
    fn test_rule_from_str() {
        let rule: Rule = "irc.server.*.#* = 1".parse().unwrap();
        assert_eq!(rule.pattern().as_str(), "irc.server.*.#*");
        assert_eq!(rule.score(), 1);

        let rule: Rule = "  core=-2 ".parse().unwrap();
        assert_eq!(rule.pattern().as_str(), "core");
        assert_eq!(rule.score(), -2);

        let rule: Rule = "a=b = +3".parse().unwrap();
        assert_eq!(rule.pattern().as_str(), "a=b");
        assert_eq!(rule.score(), 3);
    }

    #[test]
    fn test_rule_from_str_errors() {
        assert!(matches!(
            "core".parse::<Rule>(),
            Err(RuleSyntaxError::Shape(_))
        ));
        assert!(matches!(
            "core = high".parse::<Rule>(),
            Err(RuleSyntaxError::Shape(_))
        ));
        assert!(matches!(
            "core = 99999999999999999999".parse::<Rule>(),
            Err(RuleSyntaxError::Score(_))
        ));
        assert!(matches!(
            "[core = 1".parse::<Rule>(),
            Err(RuleSyntaxError::Pattern(PatternError::UnclosedClass { .. }))
        ));
    }

    #[test]
    fn test_score_above_max_is_rejected() {
        assert!(matches!(
            Rule::parse("core", i64::MAX),
            Err(RuleSyntaxError::ScoreOutOfRange(i64::MAX))
        ));
        assert!(matches!(
            "core = 9223372036854775807".parse::<Rule>(),
            Err(RuleSyntaxError::ScoreOutOfRange(_))
        ));
        assert_eq!(
            RuleSyntaxError::ScoreOutOfRange(i64::MAX).to_string(),
            "Invalid score: expected at most 9223372036854775806, got 9223372036854775807."
        );
    }

    #[test]
    fn test_default_score_above_max_score_rule() {
        let table = table(&[("core", MAX_SCORE)]);
        assert_eq!(table.default_score(), i64::MAX);
        assert!(table.score("core") < table.score("aaa"));
    }

    #[test]
    fn test_serde_rejects_score_above_max() {
        let bad: Result<Rule, _> = serde_json::from_str(r#"["core", 9223372036854775807]"#);
        assert!(bad.is_err());

        let ok: Rule = serde_json::from_str(r#"["core", 9223372036854775806]"#).unwrap();
        assert_eq!(ok.score(), MAX_SCORE);
    }

    #[test]
    fn test_rule_display() {
        assert_eq!(rule("irc.*", -1).to_string(), "irc.* = -1");
    }
}
