//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use super::validation::{
    validate_config_file_path, validate_host_address, validate_port, validate_rollback_steps,
};
use crate::build;

/// School management REST API
#[derive(Parser, Debug)]
#[command(name = "school-api")]
#[command(about = "School management REST API backed by PostgreSQL")]
#[command(long_about = "
school-api serves a REST API for schools and the students enrolled in them,
with OpenAPI documentation, health probes and embedded schema migrations.

EXAMPLES:
    # Start the server with the layered configuration in ./config
    school-api serve

    # Start on all interfaces, port 9000
    school-api serve --host 0.0.0.0 --port 9000

    # Use a single configuration file
    school-api --config /etc/school-api/config.toml serve

    # Check the configuration without starting the server
    school-api serve --dry-run

    # Apply, preview or roll back database migrations
    school-api migrate
    school-api migrate --dry-run
    school-api migrate --rollback 1
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load this TOML file instead of the layered configuration directory.
    /// SCHOOL_* environment variables still apply on top of it.
    #[arg(short, long, value_name = "FILE", value_parser = validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `{environment}.toml` layer is loaded, taking precedence
    /// over SCHOOL_APP_ENV.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the web server (default)
    ///
    /// Examples:
    ///   school-api serve                            # Start with defaults
    ///   school-api serve --host 0.0.0.0 --port 80   # Bind to all interfaces on port 80
    ///   school-api serve --dry-run                  # Validate config without starting
    Serve {
        /// Host address to bind to
        #[arg(long, value_name = "ADDRESS", value_parser = validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        #[arg(short, long, value_name = "PORT", value_parser = validate_port)]
        port: Option<u16>,

        /// Log level override, taking precedence over --verbose and --quiet
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        #[arg(long)]
        dry_run: bool,
    },

    /// Database migration operations
    ///
    /// Examples:
    ///   school-api migrate                 # Apply all pending migrations
    ///   school-api migrate --dry-run       # List pending migrations
    ///   school-api migrate --rollback 2    # Revert the last 2 migrations
    Migrate {
        /// List pending migrations without applying them
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Number of most recent migrations to revert (1-100)
        #[arg(long, value_name = "STEPS", value_parser = validate_rollback_steps)]
        rollback: Option<u32>,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Serve {
            host: None,
            port: None,
            log_level: None,
            dry_run: false,
        }
    }
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    #[value(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
}

impl Cli {
    /// The subcommand to run; `serve` when none was given
    pub fn resolved_command(&self) -> Commands {
        self.command.clone().unwrap_or_default()
    }
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}
