//! Sort and key inspection commands.

use std::io::{self, BufRead};
use std::path::Path;

use autosort::app::Autosort;
use autosort::host::swap_plan;
use clap::Args;

use super::common::load_app;
use crate::error::CliError;

/// Options overriding the stored settings for a single run.
///
/// Each setting has a pair of flags; the last one given wins.
#[derive(Debug, Clone, Default, Args)]
pub struct KeyOverrides {
    /// Compare names case-sensitively
    #[arg(long, overrides_with = "case_insensitive")]
    pub case_sensitive: bool,

    /// Compare names case-insensitively
    #[arg(long, overrides_with = "case_sensitive")]
    pub case_insensitive: bool,

    /// Group IRC buffers under their server buffer
    #[arg(long, overrides_with = "no_group_irc")]
    pub group_irc: bool,

    /// Do not group IRC buffers under their server buffer
    #[arg(long, overrides_with = "group_irc")]
    pub no_group_irc: bool,
}

impl KeyOverrides {
    /// Requested case sensitivity, `None` to keep the stored setting.
    pub fn case_sensitive(&self) -> Option<bool> {
        flag_pair(self.case_sensitive, self.case_insensitive)
    }

    /// Requested IRC grouping, `None` to keep the stored setting.
    pub fn group_irc(&self) -> Option<bool> {
        flag_pair(self.group_irc, self.no_group_irc)
    }

    fn apply_to(&self, app: &mut Autosort) {
        let mut options = app.options();
        if let Some(case_sensitive) = self.case_sensitive() {
            options.case_sensitive = case_sensitive;
        }
        if let Some(group_irc) = self.group_irc() {
            options.group_irc = group_irc;
        }
        app.set_options(options);
    }
}

fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

/// Arguments for `autosort sort`.
#[derive(Debug, Clone, Default, Args)]
pub struct SortArgs {
    /// Names to sort. Read from stdin, one per line, when omitted
    pub names: Vec<String>,

    /// Print `/buffer swap` steps instead of the sorted names
    #[arg(long)]
    pub plan: bool,

    #[command(flatten)]
    pub overrides: KeyOverrides,
}

/// Run the sort command.
pub fn run(config_path: &Path, args: SortArgs) -> Result<(), CliError> {
    let names = if args.names.is_empty() {
        read_names(io::stdin().lock())?
    } else {
        args.names.clone()
    };

    for line in sort_lines(config_path, &args, names)? {
        println!("{}", line);
    }
    Ok(())
}

/// Sort `names` and render the output lines.
pub fn sort_lines(
    config_path: &Path,
    args: &SortArgs,
    names: Vec<String>,
) -> Result<Vec<String>, CliError> {
    let (_, mut app) = load_app(config_path)?;
    args.overrides.apply_to(&mut app);

    let sorted = app.sort(names);
    if args.plan {
        Ok(swap_plan(&sorted).iter().map(ToString::to_string).collect())
    } else {
        Ok(sorted)
    }
}

/// Run the key command.
pub fn run_key(config_path: &Path, name: &str, overrides: &KeyOverrides) -> Result<(), CliError> {
    let (_, mut app) = load_app(config_path)?;
    overrides.apply_to(&mut app);
    println!("{}: {}", name, app.key(name));
    Ok(())
}

fn read_names<R: BufRead>(reader: R) -> Result<Vec<String>, CliError> {
    let mut names = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let name = line.trim();
        if !name.is_empty() {
            names.push(name.to_string());
        }
    }
    Ok(names)
}
