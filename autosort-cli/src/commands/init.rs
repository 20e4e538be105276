//! Init command - write a settings file with the default rules.

use std::path::Path;

use autosort::commands::render_rules;
use autosort::config::ConfigFile;

use crate::error::CliError;

/// Run the init command.
///
/// An existing file is loaded and rewritten, which fills in any missing
/// keys without touching the ones already set.
pub fn run(config_path: &Path) -> Result<(), CliError> {
    let existed = config_path.exists();
    let config = ConfigFile::load_from(config_path)?;
    config.save_to(config_path)?;

    if existed {
        println!("Updated configuration file: {}", config_path.display());
    } else {
        println!("Created configuration file: {}", config_path.display());
    }
    println!();
    println!("{}", render_rules(&config.sorting.rule_table()));
    println!();
    println!("Edit rules with 'autosort rule ...' or by editing the file directly.");
    Ok(())
}
