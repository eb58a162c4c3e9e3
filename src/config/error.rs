//! Errors raised while loading and validating [`Settings`](super::Settings)

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required layer is missing: `default.toml` in the config directory,
    /// or the single file named by `SCHOOL_CONFIG_FILE` / `--config`
    #[error("Required configuration file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The merged layers do not deserialize into `Settings`
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// A section rejected one of its values
    #[error("Invalid value for `{field}`: {message}")]
    ValidationError {
        /// Dotted key, e.g. `database.url`
        field: String,
        message: String,
    },

    /// `SCHOOL_APP_ENV` or `--env` names no known environment
    #[error("Unknown environment '{0}'. Valid values are: development, test, staging, production")]
    UnknownEnvironment(String),

    /// Two location overrides were set at once
    #[error("{first} and {second} cannot both be set")]
    ConflictingSources {
        first: &'static str,
        second: &'static str,
    },

    /// Reading or merging a layer failed inside the `config` crate
    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        ConfigError::FileNotFound { path: path.into() }
    }

    pub fn conflicting_sources(first: &'static str, second: &'static str) -> Self {
        ConfigError::ConflictingSources { first, second }
    }
}
