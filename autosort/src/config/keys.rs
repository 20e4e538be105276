//! Addressable configuration keys for `config get` / `config set`.

use std::str::FromStr;

use thiserror::Error;

use super::file::{format_bool, parse_bool, ConfigFile};
use crate::rules::RuleTable;

/// Errors addressing or updating a configuration key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigKeyError {
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    #[error("Invalid value for {key}: expected on/off, got \"{value}\"")]
    InvalidBoolean { key: &'static str, value: String },

    #[error("Invalid value for {key}: {reason}")]
    InvalidRules { key: &'static str, reason: String },
}

/// A settable configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    SortingCaseSensitive,
    SortingGroupIrc,
    SortingRules,
}

impl ConfigKey {
    /// Every key, in display order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::SortingCaseSensitive,
            ConfigKey::SortingGroupIrc,
            ConfigKey::SortingRules,
        ]
    }

    /// Full name in `section.key` form.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::SortingCaseSensitive => "sorting.case_sensitive",
            ConfigKey::SortingGroupIrc => "sorting.group_irc",
            ConfigKey::SortingRules => "sorting.rules",
        }
    }

    pub fn section(&self) -> &'static str {
        self.name().split_once('.').map_or("", |(section, _)| section)
    }

    pub fn key_name(&self) -> &'static str {
        self.name().split_once('.').map_or("", |(_, key)| key)
    }

    pub fn description(&self) -> &'static str {
        match self {
            ConfigKey::SortingCaseSensitive => "If on, sorting is case sensitive.",
            ConfigKey::SortingGroupIrc => {
                "If on, IRC channel and private buffers are sorted as if they were named \
                 irc.server.<network>.<channel>, grouping them with their server buffer."
            }
            ConfigKey::SortingRules => "Ordered list of sorting rules encoded as JSON.",
        }
    }

    /// Current value as it would appear in the settings file.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::SortingCaseSensitive => format_bool(config.sorting.case_sensitive).into(),
            ConfigKey::SortingGroupIrc => format_bool(config.sorting.group_irc).into(),
            ConfigKey::SortingRules => config.sorting.rules.clone(),
        }
    }

    /// Validate `value` and store it. On error `config` is left unchanged.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigKeyError> {
        match self {
            ConfigKey::SortingCaseSensitive => {
                config.sorting.case_sensitive = self.parse_bool(value)?;
            }
            ConfigKey::SortingGroupIrc => {
                config.sorting.group_irc = self.parse_bool(value)?;
            }
            ConfigKey::SortingRules => {
                let (table, issues) = RuleTable::decode_with_issues(value);
                if let Some(issue) = issues.first() {
                    return Err(ConfigKeyError::InvalidRules {
                        key: self.name(),
                        reason: issue.to_string(),
                    });
                }
                // Store the canonical encoding rather than the user's spacing.
                config.sorting.set_rules(&table);
            }
        }
        Ok(())
    }

    fn parse_bool(&self, value: &str) -> Result<bool, ConfigKeyError> {
        parse_bool(value).ok_or_else(|| ConfigKeyError::InvalidBoolean {
            key: self.name(),
            value: value.to_string(),
        })
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| ConfigKeyError::UnknownKey(s.to_string()))
    }
}
