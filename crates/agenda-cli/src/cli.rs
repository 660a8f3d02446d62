//! Command-line interface definition.

use std::path::PathBuf;

use agenda_core::TracingOutputFormat;
use clap::{Parser, Subcommand};

use crate::config::AgendaConfig;

/// agenda-ics - Mountain Network agenda as iCalendar files
#[derive(Debug, Parser)]
#[command(name = "agenda-ics")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "AGENDA_ICS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Log format: pretty, compact or json
    #[arg(long, default_value = "compact")]
    pub log_format: TracingOutputFormat,

    /// Directory to write calendar files to
    #[arg(long, short)]
    pub output_dir: Option<PathBuf>,

    /// Location to write a calendar for (can be repeated, replaces the configured list)
    #[arg(long = "location", action = clap::ArgAction::Append)]
    pub locations: Vec<String>,

    /// Print extracted events as JSON instead of writing calendars
    #[arg(long)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut AgendaConfig) {
        if let Some(ref dir) = self.output_dir {
            config.output.directory = dir.clone();
        }
        if !self.locations.is_empty() {
            config.locations = self.locations.clone();
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Dump,
    /// Check that the configuration is usable
    Validate,
    /// Print the default configuration file path
    Path,
}
