//! Autosort - rule-based ordering for hierarchical buffer names
//!
//! Names such as `irc.freenode.#rust` are split on `.` and every prefix is
//! scored by an ordered table of glob rules. Names sort by their
//! `(score, component)` pairs, which keeps related buffers together and lets
//! rules pull whole subtrees forward or back.
//!
//! ```
//! use autosort::app::Autosort;
//! use autosort::key::KeyOptions;
//! use autosort::rules::RuleTable;
//!
//! let app = Autosort::new(RuleTable::with_default_rules(), KeyOptions::default());
//! let sorted = app.sort(vec!["irc.freenode.#rust", "python.foo", "core.weechat"]);
//! assert_eq!(sorted, vec!["core.weechat", "python.foo", "irc.freenode.#rust"]);
//! ```

pub mod app;
pub mod commands;
pub mod config;
pub mod glob;
pub mod host;
pub mod key;
pub mod logging;
pub mod rules;
pub mod sort;

pub use app::Autosort;
pub use glob::GlobPattern;
pub use key::{KeyOptions, SortKey};
pub use rules::{Rule, RuleTable};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
