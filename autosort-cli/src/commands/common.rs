//! Helpers shared across CLI commands.

use std::path::{Path, PathBuf};

use autosort::app::Autosort;
use autosort::commands::CommandOutcome;
use autosort::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Settings file chosen on the command line, or the default location.
pub fn resolve_config_path(cli_path: Option<PathBuf>) -> PathBuf {
    cli_path.unwrap_or_else(config_file_path)
}

/// Load settings and build a sorting context from them.
pub fn load_app(path: &Path) -> Result<(ConfigFile, Autosort), CliError> {
    let config = ConfigFile::load_from(path)?;
    let app = Autosort::from_settings(&config.sorting);
    Ok((config, app))
}

/// Save the settings if a command changed the rules.
pub fn persist(
    outcome: &CommandOutcome,
    app: &Autosort,
    config: &mut ConfigFile,
    path: &Path,
) -> Result<(), CliError> {
    if outcome.changed {
        app.store(&mut config.sorting);
        config.save_to(path)?;
    }
    Ok(())
}
