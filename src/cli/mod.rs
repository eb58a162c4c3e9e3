//! CLI module for school-api
//!
//! - Argument parsing with clap
//! - Configuration merging (CLI args + config files + environment)
//! - Command handlers for serve and migrate operations

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands, Environment, LogLevel};

use crate::config::{ConfigError, Settings};

/// Loads the configuration selected by `cli` and applies its overrides
pub fn load_and_merge_config(cli: &Cli) -> Result<Settings, ConfigError> {
    ConfigurationMerger::load(cli)?.merge_cli_args(cli)
}
