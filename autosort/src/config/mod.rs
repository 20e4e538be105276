//! Persistent settings.
//!
//! Settings live in an INI file, by default `<config dir>/autosort/config.ini`
//! (for example `~/.config/autosort/config.ini` on Linux). The location can be
//! overridden with the `AUTOSORT_CONFIG` environment variable.

mod file;
mod keys;

pub use file::{
    format_bool, parse_bool, ConfigFile, ConfigFileError, SortingSettings, SORTING_SECTION,
};
pub use keys::{ConfigKey, ConfigKeyError};

use std::path::PathBuf;

/// Environment variable that overrides the settings file location.
pub const CONFIG_PATH_ENV: &str = "AUTOSORT_CONFIG";

/// Settings file name inside [`config_directory`].
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Directory holding autosort's settings.
pub fn config_directory() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("autosort")
}

/// Path of the settings file.
pub fn config_file_path() -> PathBuf {
    match std::env::var_os(CONFIG_PATH_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => config_directory().join(CONFIG_FILE_NAME),
    }
}
