//! INI settings file.
//!
//! ```ini
//! [sorting]
//! case_sensitive = off
//! group_irc = on
//! rules = [["core",0],["irc",2],["*",1],["irc.server",1],["irc.irc_raw",0]]
//! ```
//!
//! Missing keys fall back to their defaults. Unreadable boolean values are
//! logged and replaced by the default as well, so a damaged file never
//! prevents sorting.

use std::io;
use std::path::{Path, PathBuf};

use ini::{Ini, ParseOption};
use thiserror::Error;
use tracing::{debug, warn};

use crate::key::KeyOptions;
use crate::rules::RuleTable;

/// Section holding all sorting settings.
pub const SORTING_SECTION: &str = "sorting";

/// Errors reading or writing the settings file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// The file exists but could not be read or written.
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not valid INI.
    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Settings in the `[sorting]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortingSettings {
    /// Sort case-sensitively.
    pub case_sensitive: bool,
    /// Group IRC channel buffers under their server buffer.
    pub group_irc: bool,
    /// Encoded rule table, see [`RuleTable::encode`].
    pub rules: String,
}

impl Default for SortingSettings {
    fn default() -> Self {
        let options = KeyOptions::default();
        Self {
            case_sensitive: options.case_sensitive,
            group_irc: options.group_irc,
            rules: RuleTable::with_default_rules().encode(),
        }
    }
}

impl SortingSettings {
    pub fn key_options(&self) -> KeyOptions {
        KeyOptions {
            case_sensitive: self.case_sensitive,
            group_irc: self.group_irc,
        }
    }

    /// Decode the stored rules. Invalid entries are logged and skipped.
    pub fn rule_table(&self) -> RuleTable {
        RuleTable::decode(&self.rules)
    }

    pub fn set_rules(&mut self, table: &RuleTable) {
        self.rules = table.encode();
    }
}

/// The whole settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub sorting: SortingSettings,
}

impl ConfigFile {
    /// Load from the default location, see [`config_file_path`](super::config_file_path).
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&super::config_file_path())
    }

    /// Load from `path`. A file that does not exist yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No settings file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigFileError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Self::parse(&text).map_err(|message| ConfigFileError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse settings from INI text.
    pub fn parse(text: &str) -> Result<Self, String> {
        let ini = Ini::load_from_str_opt(text, parse_option()).map_err(|e| e.to_string())?;
        Ok(Self::from_ini(&ini))
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), ConfigFileError> {
        self.save_to(&super::config_file_path())
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        let io_error = |source| ConfigFileError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        self.to_ini().write_to_file(path).map_err(io_error)?;

        debug!(path = %path.display(), "Saved settings");
        Ok(())
    }

    fn from_ini(ini: &Ini) -> Self {
        let defaults = SortingSettings::default();
        let section = ini.section(Some(SORTING_SECTION));
        let get = |key: &str| section.and_then(|s| s.get(key));

        let read_bool = |key: &str, default: bool| match get(key) {
            None => default,
            Some(value) => parse_bool(value).unwrap_or_else(|| {
                warn!(key, value, "Invalid boolean setting, using default");
                default
            }),
        };

        Self {
            sorting: SortingSettings {
                case_sensitive: read_bool("case_sensitive", defaults.case_sensitive),
                group_irc: read_bool("group_irc", defaults.group_irc),
                rules: get("rules")
                    .map(str::to_string)
                    .unwrap_or(defaults.rules),
            },
        }
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        ini.with_section(Some(SORTING_SECTION))
            .set("case_sensitive", format_bool(self.sorting.case_sensitive))
            .set("group_irc", format_bool(self.sorting.group_irc))
            .set("rules", self.sorting.rules.as_str());
        ini
    }
}

/// Rule blobs are JSON, so quotes must come through untouched.
fn parse_option() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        ..ParseOption::default()
    }
}

/// Parse an `on`/`off` style boolean.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Format a boolean the way the settings file stores it.
pub fn format_bool(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ConfigFile::default();
        assert!(!config.sorting.case_sensitive);
        assert!(config.sorting.group_irc);
        assert_eq!(config.sorting.rule_table(), RuleTable::with_default_rules());
    }

    #[test]
    fn test_parse_full_file() {
        let config = ConfigFile::parse(
            "[sorting]\n\
             case_sensitive = on\n\
             group_irc = off\n\
             rules = [[\"irc.server.*.#*\",1],[\"core\",0]]\n",
        )
        .unwrap();

        assert!(config.sorting.case_sensitive);
        assert!(!config.sorting.group_irc);
        let table = config.sorting.rule_table();
        assert_eq!(table.len(), 2);
        assert_eq!(table.score("irc.server.net.#chan"), 1);
    }

    #[test]
    fn test_parse_missing_keys_use_defaults() {
        let config = ConfigFile::parse("[sorting]\ncase_sensitive = yes\n").unwrap();
        assert!(config.sorting.case_sensitive);
        assert!(config.sorting.group_irc);
        assert_eq!(config.sorting.rules, SortingSettings::default().rules);

        let empty = ConfigFile::parse("").unwrap();
        assert_eq!(empty, ConfigFile::default());
    }

    #[test]
    fn test_parse_invalid_boolean_falls_back() {
        let config = ConfigFile::parse("[sorting]\ngroup_irc = maybe\n").unwrap();
        assert!(config.sorting.group_irc);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.sorting.case_sensitive = true;
        let mut table = RuleTable::with_default_rules();
        table.push(crate::rules::Rule::parse(r"weird\[name", -1).unwrap());
        config.sorting.set_rules(&table);

        config.save_to(&path).unwrap();
        let loaded = ConfigFile::load_from(&path).unwrap();

        assert_eq!(loaded, config);
        assert_eq!(loaded.sorting.rule_table(), table);
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let loaded = ConfigFile::load_from(&dir.path().join("absent.ini")).unwrap();
        assert_eq!(loaded, ConfigFile::default());
    }

    #[test]
    fn test_parse_bool_forms() {
        assert_eq!(parse_bool("on"), Some(true));
        assert_eq!(parse_bool(" OFF "), Some(false));
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("sometimes"), None);
        assert_eq!(format_bool(true), "on");
        assert_eq!(format_bool(false), "off");
    }
}
