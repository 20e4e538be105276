//! Sort key derivation for hierarchical names.
//!
//! A name such as `irc.freenode.#rust` is split into components, optionally
//! rewritten (see [`KeyOptions::group_irc`]) and case folded, and then every
//! cumulative prefix is scored against a [`RuleTable`]:
//!
//! ```text
//! irc.freenode.#rust
//!   -> [irc, server, freenode, #rust]          grouping
//!   -> prefixes: irc, irc.server, irc.server.freenode, irc.server.freenode.#rust
//!   -> [(2, irc), (1, server), (3, freenode), (3, #rust)]
//! ```
//!
//! Keys compare pair by pair, score before component text, and a key that
//! is a strict prefix of another sorts first. That is exactly the ordering
//! of `Vec<(i64, String)>`, which [`SortKey`] wraps.

mod grouping;

pub use grouping::{apply_grouping, GROUP_EXCEPTIONS, GROUP_PARENT, GROUP_ROOT};

use std::fmt;

use crate::glob::SEPARATOR;
use crate::rules::RuleTable;

/// Options that change how names are turned into keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyOptions {
    /// Compare components case-sensitively. Off by default.
    pub case_sensitive: bool,

    /// Pretend IRC channel and query buffers live under their server buffer
    /// (`irc.server.<network>.<channel>` instead of `irc.<network>.<channel>`)
    /// so they are grouped with it. On by default.
    pub group_irc: bool,
}

impl Default for KeyOptions {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            group_irc: true,
        }
    }
}

impl KeyOptions {
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn with_group_irc(mut self, group_irc: bool) -> Self {
        self.group_irc = group_irc;
        self
    }
}

/// A name's sort key: one `(score, component)` pair per component.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortKey(Vec<(i64, String)>);

impl SortKey {
    pub fn pairs(&self) -> &[(i64, String)] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Scores in root-to-leaf order.
    pub fn scores(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.iter().map(|(score, _)| *score)
    }

    /// The (possibly rewritten) components in root-to-leaf order.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(_, component)| component.as_str())
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, (score, component)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "({}, {})", score, component)?;
        }
        f.write_str("]")
    }
}

/// Split a name into its components.
pub fn split_name(name: &str) -> Vec<&str> {
    name.split(SEPARATOR).collect()
}

/// Produce the components that get scored for `name`.
///
/// Applies the grouping rewrite first and then case folding, so grouping
/// only recognises the root component in its canonical lower-case form.
pub fn preprocess(name: &str, options: &KeyOptions) -> Vec<String> {
    let mut components: Vec<String> = split_name(name).into_iter().map(String::from).collect();

    if options.group_irc {
        apply_grouping(&mut components);
    }

    if !options.case_sensitive {
        for component in &mut components {
            *component = component.to_lowercase();
        }
    }

    components
}

/// Build the sort key for `name`.
pub fn build_key(name: &str, options: &KeyOptions, table: &RuleTable) -> SortKey {
    let components = preprocess(name, options);
    let mut pairs = Vec::with_capacity(components.len());
    let mut prefix = String::with_capacity(name.len() + GROUP_PARENT.len() + 1);

    for component in components {
        if !prefix.is_empty() {
            prefix.push(SEPARATOR);
        }
        prefix.push_str(&component);
        pairs.push((table.score(&prefix), component));
    }

    SortKey(pairs)
}
