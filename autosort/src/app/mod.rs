//! The sorting context.
//!
//! [`Autosort`] owns the active rule table and key options. A host
//! integration keeps one instance around, reloads it when settings change,
//! and routes commands through it:
//!
//! ```text
//! settings ──from_settings/reload──► Autosort ──resort──► BufferHost
//!    ▲                                  │
//!    └─────────────store◄───── on_command (mutations)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use autosort::app::Autosort;
//! use autosort::config::ConfigFile;
//!
//! let mut config = ConfigFile::load()?;
//! let mut app = Autosort::from_settings(&config.sorting);
//!
//! let outcome = app.on_command("rule add python.* = 1", &mut config.sorting)?;
//! if outcome.changed {
//!     config.save()?;
//!     app.resort(&mut host)?;
//! }
//! ```

mod error;

pub use error::AppError;

use tracing::{debug, info, warn};

use crate::commands::{parse_command, CommandError, CommandOutcome, RuleCommand};
use crate::config::SortingSettings;
use crate::host::{collapse_merged, BufferHost};
use crate::key::{KeyOptions, SortKey};
use crate::rules::RuleTable;
use crate::sort::Sorter;

/// Active rule table and key options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Autosort {
    rules: RuleTable,
    options: KeyOptions,
}

impl Autosort {
    pub fn new(rules: RuleTable, options: KeyOptions) -> Self {
        Self { rules, options }
    }

    /// Build a context from stored settings.
    ///
    /// Invalid stored rules are logged and skipped.
    pub fn from_settings(settings: &SortingSettings) -> Self {
        Self::new(settings.rule_table(), settings.key_options())
    }

    /// Replace the table and options with freshly read settings.
    pub fn reload(&mut self, settings: &SortingSettings) {
        self.rules = settings.rule_table();
        self.options = settings.key_options();
        debug!(
            rules = self.rules.len(),
            case_sensitive = self.options.case_sensitive,
            group_irc = self.options.group_irc,
            "Reloaded sorting settings"
        );
    }

    /// Write the current rules back into `settings`.
    pub fn store(&self, settings: &mut SortingSettings) {
        settings.set_rules(&self.rules);
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn options(&self) -> KeyOptions {
        self.options
    }

    pub fn set_options(&mut self, options: KeyOptions) {
        self.options = options;
    }

    pub fn sorter(&self) -> Sorter<'_> {
        Sorter::new(&self.rules, self.options)
    }

    /// Sort key for a single name.
    pub fn key(&self, name: &str) -> SortKey {
        self.sorter().key(name)
    }

    /// Return `names` in sorted order.
    pub fn sort<S: AsRef<str>>(&self, names: Vec<S>) -> Vec<S> {
        self.sorter().sort(names)
    }

    /// Sort the host's buffers and apply the result.
    ///
    /// Merged buffers are collapsed first, so each slot is moved once.
    /// Returns the order that was applied.
    pub fn resort<H: BufferHost>(&self, host: &mut H) -> Result<Vec<String>, H::Error> {
        let entries = host.buffers()?;
        let names = collapse_merged(&entries);
        let ordered = self.sort(names);

        debug!(
            buffers = entries.len(),
            slots = ordered.len(),
            "Applying buffer order"
        );
        host.apply_order(&ordered)?;
        Ok(ordered)
    }

    /// Run a typed command against the rule table.
    pub fn execute(&mut self, command: &RuleCommand) -> Result<CommandOutcome, CommandError> {
        match command.apply(&mut self.rules) {
            Ok(outcome) => {
                if outcome.changed {
                    info!(?command, rules = self.rules.len(), "Applied rule edit");
                }
                Ok(outcome)
            }
            Err(e) => {
                warn!(?command, error = %e, "Rejected rule edit");
                Err(e.into())
            }
        }
    }

    /// Parse and run a textual command such as `rule swap 0 1`.
    pub fn dispatch(&mut self, line: &str) -> Result<CommandOutcome, CommandError> {
        let command = parse_command(line).map_err(|e| {
            warn!(line, error = %e, "Invalid command");
            e
        })?;
        self.execute(&command)
    }

    /// Run a textual command and store the rules into `settings` if they
    /// changed.
    pub fn on_command(
        &mut self,
        line: &str,
        settings: &mut SortingSettings,
    ) -> Result<CommandOutcome, CommandError> {
        let outcome = self.dispatch(line)?;
        if outcome.changed {
            self.store(settings);
        }
        Ok(outcome)
    }

    /// Run a textual command, store changed rules and re-sort the host.
    pub fn on_command_with_host<H: BufferHost>(
        &mut self,
        line: &str,
        settings: &mut SortingSettings,
        host: &mut H,
    ) -> Result<CommandOutcome, AppError<H::Error>> {
        let outcome = self.on_command(line, settings)?;
        if outcome.changed {
            self.resort(host).map_err(AppError::Host)?;
        }
        Ok(outcome)
    }
}
