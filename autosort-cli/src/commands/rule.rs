//! Rule editing CLI commands.
//!
//! `autosort rule ...` mirrors the textual command language, with clap doing
//! the argument parsing. `autosort exec ...` accepts the textual form as-is.

use std::path::Path;

use autosort::commands::RuleCommand;
use autosort::rules::Rule;
use clap::Subcommand;

use super::common::{load_app, persist};
use crate::error::CliError;

/// Rule subcommands.
#[derive(Debug, Subcommand)]
pub enum RuleAction {
    /// Print the sorting rules
    List,

    /// Add a rule at the end of the list
    Add {
        /// Glob pattern matched against dot-joined name prefixes
        pattern: String,
        /// Score given to matching prefixes (lower sorts first)
        #[arg(allow_negative_numbers = true)]
        score: i64,
    },

    /// Insert a rule before the given index
    Insert {
        index: usize,
        pattern: String,
        #[arg(allow_negative_numbers = true)]
        score: i64,
    },

    /// Replace the rule at the given index
    Update {
        index: usize,
        pattern: String,
        #[arg(allow_negative_numbers = true)]
        score: i64,
    },

    /// Delete the rule at the given index
    Delete { index: usize },

    /// Move a rule to a new index
    Move { from: usize, to: usize },

    /// Swap two rules
    Swap { a: usize, b: usize },
}

impl RuleAction {
    /// Convert to the library command, compiling any pattern.
    pub fn into_command(self) -> Result<RuleCommand, CliError> {
        let command = match self {
            RuleAction::List => RuleCommand::List,
            RuleAction::Add { pattern, score } => RuleCommand::Add {
                rule: Rule::parse(&pattern, score)?,
            },
            RuleAction::Insert {
                index,
                pattern,
                score,
            } => RuleCommand::Insert {
                index,
                rule: Rule::parse(&pattern, score)?,
            },
            RuleAction::Update {
                index,
                pattern,
                score,
            } => RuleCommand::Update {
                index,
                rule: Rule::parse(&pattern, score)?,
            },
            RuleAction::Delete { index } => RuleCommand::Delete { index },
            RuleAction::Move { from, to } => RuleCommand::Move { from, to },
            RuleAction::Swap { a, b } => RuleCommand::Swap { a, b },
        };
        Ok(command)
    }
}

/// Run a rule subcommand.
pub fn run(config_path: &Path, action: RuleAction) -> Result<(), CliError> {
    println!("{}", apply(config_path, action)?);
    Ok(())
}

/// Run a textual command line, e.g. `rule move 3 0`.
pub fn run_exec(config_path: &Path, words: &[String]) -> Result<(), CliError> {
    println!("{}", exec(config_path, &words.join(" "))?);
    Ok(())
}

/// Apply a rule subcommand and return the resulting listing.
pub fn apply(config_path: &Path, action: RuleAction) -> Result<String, CliError> {
    let command = action.into_command()?;
    let (mut config, mut app) = load_app(config_path)?;

    let outcome = app.execute(&command)?;
    persist(&outcome, &app, &mut config, config_path)?;
    Ok(outcome.listing)
}

/// Apply a textual command line and return the resulting listing.
pub fn exec(config_path: &Path, line: &str) -> Result<String, CliError> {
    let (mut config, mut app) = load_app(config_path)?;

    let outcome = app.dispatch(line)?;
    persist(&outcome, &app, &mut config, config_path)?;
    Ok(outcome.listing)
}
