//! Textual command dispatch.
//!
//! Commands form a tree of named nodes. Interior nodes group subcommands and
//! leaves name an [`Operation`]. A command line is resolved one word at a
//! time until a leaf is reached; the rest of the line is that operation's
//! argument text.
//!
//! ```text
//! autosort
//! └── rule
//!     ├── list
//!     ├── add     <pattern> = <score>
//!     ├── insert  <index> <pattern> = <score>
//!     ├── update  <index> <pattern> = <score>
//!     ├── delete  <index>
//!     ├── move    <index_from> <index_to>
//!     └── swap    <index_a> <index_b>
//! ```

use super::error::CommandError;
use super::RuleCommand;

/// Name of the root command, used in error messages.
pub const ROOT_COMMAND: &str = "autosort";

/// Operations reachable from the command tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    RuleList,
    RuleAdd,
    RuleInsert,
    RuleUpdate,
    RuleDelete,
    RuleMove,
    RuleSwap,
}

/// A node of the command tree.
#[derive(Debug)]
pub enum CommandNode {
    /// Named children.
    Group(&'static [(&'static str, CommandNode)]),
    /// A runnable operation.
    Leaf(Operation),
}

/// The `autosort` command tree.
pub static COMMANDS: CommandNode = CommandNode::Group(&[(
    "rule",
    CommandNode::Group(&[
        ("list", CommandNode::Leaf(Operation::RuleList)),
        ("add", CommandNode::Leaf(Operation::RuleAdd)),
        ("insert", CommandNode::Leaf(Operation::RuleInsert)),
        ("update", CommandNode::Leaf(Operation::RuleUpdate)),
        ("delete", CommandNode::Leaf(Operation::RuleDelete)),
        ("move", CommandNode::Leaf(Operation::RuleMove)),
        ("swap", CommandNode::Leaf(Operation::RuleSwap)),
    ]),
)]);

impl CommandNode {
    /// Names of the direct children of a group, empty for a leaf.
    pub fn children(&self) -> impl Iterator<Item = &'static str> + '_ {
        let entries: &'static [(&'static str, CommandNode)] = match self {
            CommandNode::Group(entries) => *entries,
            CommandNode::Leaf(_) => &[],
        };
        entries.iter().map(|(name, _)| *name)
    }

    /// Walk the tree along the words of `args`.
    ///
    /// Returns the operation found and its remaining argument text.
    pub fn resolve<'a>(&self, args: &'a str) -> Result<(Operation, &'a str), CommandError> {
        let mut path = vec![ROOT_COMMAND];
        let mut node = self;
        let mut rest = args;

        loop {
            let entries = match node {
                CommandNode::Leaf(operation) => return Ok((*operation, rest)),
                CommandNode::Group(entries) => *entries,
            };

            let (word, tail) = rest.split_once(' ').unwrap_or((rest, ""));
            if !word.is_empty() {
                path.push(word);
            }

            match entries.iter().find(|(name, _)| *name == word) {
                Some((_, child)) => {
                    node = child;
                    rest = tail;
                }
                None => {
                    return Err(CommandError::NotFound {
                        path: path.join(" "),
                    })
                }
            }
        }
    }
}

/// Parse a command line such as `rule insert 0 core = 0`.
pub fn parse_command(line: &str) -> Result<RuleCommand, CommandError> {
    let (operation, args) = COMMANDS.resolve(line.trim())?;
    parse_arguments(operation, args)
}

/// Parse the argument text of `operation`.
pub fn parse_arguments(operation: Operation, args: &str) -> Result<RuleCommand, CommandError> {
    let command = match operation {
        Operation::RuleList => RuleCommand::List,
        Operation::RuleAdd => RuleCommand::Add {
            rule: args.parse()?,
        },
        Operation::RuleInsert => {
            let [index, rule] = split_args(args)?;
            RuleCommand::Insert {
                index: parse_index(index)?,
                rule: rule.parse()?,
            }
        }
        Operation::RuleUpdate => {
            let [index, rule] = split_args(args)?;
            RuleCommand::Update {
                index: parse_index(index)?,
                rule: rule.parse()?,
            }
        }
        Operation::RuleDelete => RuleCommand::Delete {
            index: parse_index(args)?,
        },
        Operation::RuleMove => {
            let [from, to] = split_args(args)?;
            RuleCommand::Move {
                from: parse_index(from)?,
                to: parse_index(to)?,
            }
        }
        Operation::RuleSwap => {
            let [a, b] = split_args(args)?;
            RuleCommand::Swap {
                a: parse_index(a)?,
                b: parse_index(b)?,
            }
        }
    };
    Ok(command)
}

/// Split at the first space into exactly two arguments.
fn split_args(args: &str) -> Result<[&str; 2], CommandError> {
    let args = args.trim_start();
    match args.split_once(' ') {
        Some((first, rest)) => Ok([first, rest]),
        None => Err(CommandError::ArgumentCount {
            expected: 2,
            got: 1,
        }),
    }
}

fn parse_index(arg: &str) -> Result<usize, CommandError> {
    let stripped = arg.trim();
    stripped
        .parse()
        .map_err(|_| CommandError::InvalidIndex(stripped.to_string()))
}
