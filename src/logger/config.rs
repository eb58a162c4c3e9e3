//! Configuration types for the logger
//!
//! These types deserialize straight from the `[logger]` section of the
//! application settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::logger::error::LoggerError;

const VALID_LEVELS: &str = "trace, debug, info, warn, error";

fn default_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> PathBuf {
    PathBuf::from("logs/school-api.log")
}

fn default_max_size() -> u64 {
    10 * 1024 * 1024 // 10MB
}

fn default_max_files() -> usize {
    5
}

/// Main logger configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Level directive: "trace", "debug", "info", "warn" or "error"
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub console: ConsoleConfig,

    #[serde(default)]
    pub file: FileConfig,
}

impl LoggerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), LoggerError> {
        self.parse_level()?;
        self.file.validate()?;

        if !self.console.enabled && !self.file.enabled {
            return Err(LoggerError::config(
                "At least one output (console or file) must be enabled",
            ));
        }

        Ok(())
    }

    /// Parse the level string into a tracing::Level
    pub fn parse_level(&self) -> Result<Level, LoggerError> {
        match self.level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => Err(LoggerError::config(format!(
                "Invalid log level '{}'. Valid levels are: {}",
                self.level, VALID_LEVELS
            ))),
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            console: ConsoleConfig::default(),
            file: FileConfig::default(),
        }
    }
}

/// Console output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// ANSI colors, only applied when stdout is a terminal
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

/// File output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_log_path")]
    pub path: PathBuf,

    /// Append to an existing file instead of truncating it
    #[serde(default = "default_true")]
    pub append: bool,

    #[serde(default)]
    pub format: LogFormat,

    #[serde(default)]
    pub rotation: RotationConfig,
}

impl FileConfig {
    /// Validate file configuration
    ///
    /// Pure check; the writer creates missing directories.
    pub fn validate(&self) -> Result<(), LoggerError> {
        if !self.enabled {
            return Ok(());
        }
        if self.path.as_os_str().is_empty() {
            return Err(LoggerError::config(
                "File path cannot be empty when file output is enabled",
            ));
        }
        self.rotation.validate()
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: true,
            format: LogFormat::default(),
            rotation: RotationConfig::default(),
        }
    }
}

/// Log line format for file output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Full,
    Compact,
    #[default]
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(LoggerError::config(format!(
                "Invalid log format '{}'. Valid formats are: full, compact, json",
                s
            ))),
        }
    }
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Full => "full",
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        }
    }
}

/// Size-based rotation of the log file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationConfig {
    /// Size in bytes that triggers a rotation
    #[serde(default = "default_max_size")]
    pub max_size: u64,

    /// Number of rotated files kept next to the active one
    #[serde(default = "default_max_files")]
    pub max_files: usize,

    /// Gzip rotated files
    #[serde(default)]
    pub compress: bool,
}

impl RotationConfig {
    pub fn validate(&self) -> Result<(), LoggerError> {
        if self.max_size == 0 {
            return Err(LoggerError::config(
                "Maximum file size must be greater than 0",
            ));
        }
        if self.max_files == 0 {
            return Err(LoggerError::config(
                "Maximum number of files must be greater than 0",
            ));
        }
        Ok(())
    }
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_size(),
            max_files: default_max_files(),
            compress: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(LoggerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        let config = LoggerConfig {
            level: "verbose".to_string(),
            ..LoggerConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("verbose"));
    }

    #[test]
    fn test_level_is_case_insensitive() {
        let config = LoggerConfig {
            level: "WARN".to_string(),
            ..LoggerConfig::default()
        };
        assert_eq!(config.parse_level().unwrap(), Level::WARN);
    }

    #[test]
    fn test_all_outputs_disabled() {
        let mut config = LoggerConfig::default();
        config.console.enabled = false;
        config.file.enabled = false;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_disabled_file_skips_rotation_checks() {
        let mut config = FileConfig::default();
        config.rotation.max_files = 0;
        assert!(config.validate().is_ok());

        config.enabled = true;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_path_rejected_when_enabled() {
        let config = FileConfig {
            enabled: true,
            path: PathBuf::new(),
            ..FileConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("FULL".parse::<LogFormat>().unwrap(), LogFormat::Full);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert_eq!("Json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_deserialize_partial_section() {
        let config: LoggerConfig = toml::from_str(
            r#"
level = "debug"

[file]
enabled = true
format = "compact"

[file.rotation]
max_files = 3
"#,
        )
        .unwrap();

        assert_eq!(config.level, "debug");
        assert!(config.console.enabled);
        assert_eq!(config.file.format, LogFormat::Compact);
        assert_eq!(config.file.rotation.max_files, 3);
        assert_eq!(config.file.rotation.max_size, default_max_size());
        assert!(config.validate().is_ok());
    }
}
