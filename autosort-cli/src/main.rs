//! Autosort CLI - Command-line interface
//!
//! Edits sorting rules, sorts lists of names and manages the settings file.

mod commands;
mod error;

use std::path::PathBuf;
use std::process;

use autosort::logging::{init_logging, LogConfig};
use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::rule::RuleAction;
use commands::sort::{KeyOverrides, SortArgs};
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "autosort", version, about, long_about = None)]
struct Cli {
    /// Settings file (defaults to $AUTOSORT_CONFIG or the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write log output to this file
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Manage sorting rules
    Rule {
        #[command(subcommand)]
        action: RuleAction,
    },

    /// Run a command line such as "rule insert 0 core = 0"
    Exec {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },

    /// Sort names given as arguments or read from stdin
    Sort(SortArgs),

    /// Print the sort key derived for a name
    Key {
        name: String,

        #[command(flatten)]
        overrides: KeyOverrides,
    },

    /// View and modify settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Create the settings file with default rules
    Init,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let _guard = init_logging(&LogConfig {
        verbose: cli.verbose,
        log_file: cli.log_file.clone(),
    })?;
    let config_path = commands::common::resolve_config_path(cli.config);
    tracing::debug!(path = %config_path.display(), "Using settings file");

    match cli.command {
        Commands::Rule { action } => commands::rule::run(&config_path, action),
        Commands::Exec { words } => commands::rule::run_exec(&config_path, &words),
        Commands::Sort(args) => commands::sort::run(&config_path, args),
        Commands::Key { name, overrides } => {
            commands::sort::run_key(&config_path, &name, &overrides)
        }
        Commands::Config { command } => commands::config::run(&config_path, command),
        Commands::Init => commands::init::run(&config_path),
    }
}
