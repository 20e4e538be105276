//! CLI error type.

use std::io;

use thiserror::Error;

use autosort::commands::CommandError;
use autosort::config::ConfigFileError;
use autosort::logging::LoggingError;
use autosort::rules::RuleSyntaxError;

/// Errors reported by CLI commands. Any of these exits with status 1.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    ConfigFile(#[from] ConfigFileError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Rule(#[from] RuleSyntaxError),

    #[error("Failed to read input: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Logging(#[from] LoggingError),
}
