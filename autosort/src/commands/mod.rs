//! Rule editing commands.
//!
//! [`RuleCommand`] is the typed form of every rule edit. It can be built
//! directly (the CLI does this from its own argument parser) or parsed from
//! the textual command language with [`parse_command`].

mod error;
mod tree;

pub use error::CommandError;
pub use tree::{parse_arguments, parse_command, CommandNode, Operation, COMMANDS, ROOT_COMMAND};

use std::fmt::Write as _;

use crate::rules::{Rule, RuleError, RuleTable};

/// A single operation on a [`RuleTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleCommand {
    /// Show the table.
    List,
    /// Append a rule.
    Add { rule: Rule },
    /// Insert a rule before `index`. `index` may equal the table length.
    Insert { index: usize, rule: Rule },
    /// Replace the rule at `index`.
    Update { index: usize, rule: Rule },
    /// Remove the rule at `index`.
    Delete { index: usize },
    /// Move the rule at `from` so it ends up at `to`.
    Move { from: usize, to: usize },
    /// Exchange two rules.
    Swap { a: usize, b: usize },
}

/// Result of a successful [`RuleCommand::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// The table was modified and should be saved and re-applied.
    pub changed: bool,
    /// The table after the command, see [`render_rules`].
    pub listing: String,
}

impl RuleCommand {
    /// Whether the command modifies the table.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, RuleCommand::List)
    }

    /// Run the command against `table`.
    ///
    /// On error the table is left exactly as it was.
    pub fn apply(&self, table: &mut RuleTable) -> Result<CommandOutcome, RuleError> {
        match self {
            RuleCommand::List => {}
            RuleCommand::Add { rule } => table.push(rule.clone()),
            RuleCommand::Insert { index, rule } => table.insert(*index, rule.clone())?,
            RuleCommand::Update { index, rule } => {
                table.replace(*index, rule.clone())?;
            }
            RuleCommand::Delete { index } => {
                table.remove(*index)?;
            }
            RuleCommand::Move { from, to } => table.move_rule(*from, *to)?,
            RuleCommand::Swap { a, b } => table.swap(*a, *b)?,
        }

        Ok(CommandOutcome {
            changed: self.is_mutation(),
            listing: render_rules(table),
        })
    }
}

/// Human readable listing of `table`.
///
/// ```text
/// Sorting rules:
///     0: core = 0
///     1: irc = 2
/// ```
pub fn render_rules(table: &RuleTable) -> String {
    let mut out = String::from("Sorting rules:");
    if table.is_empty() {
        out.push_str("\n    No sorting rules configured.");
    }
    for (i, rule) in table.iter().enumerate() {
        let _ = write!(out, "\n    {}: {}", i, rule);
    }
    out
}
