//! Logging built on `tracing-subscriber`
//!
//! - Console output with color control
//! - File output in full, compact or JSON format
//! - Size-based rotation of the log file with optional gzip compression
//!
//! `RUST_LOG`, when set, takes precedence over the configured level.

pub mod compression;
pub mod config;
pub mod error;
pub mod rotation;
pub(crate) mod writer;

pub use config::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig, RotationConfig};
pub use error::LoggerError;

use std::io::IsTerminal;

use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};
use writer::RotatingFileWriter;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global subscriber described by `config`
pub fn init_logger(config: &LoggerConfig) -> Result<(), LoggerError> {
    config.validate()?;

    let mut layers: Vec<BoxedLayer> = Vec::new();

    // The file layer goes first so ANSI span formatting of the console
    // layer does not leak into the file.
    if config.file.enabled {
        layers.push(file_layer(&config.file)?);
    }
    if config.console.enabled {
        layers.push(console_layer(&config.console));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(build_filter(&config.level))
        .try_init()
        .map_err(|e| LoggerError::AlreadyInitialized {
            message: e.to_string(),
        })
}

/// `RUST_LOG` wins over the configured level
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn console_layer(config: &ConsoleConfig) -> BoxedLayer {
    let use_ansi = config.colored && std::io::stdout().is_terminal();

    fmt::layer()
        .with_ansi(use_ansi)
        .with_target(true)
        .with_level(true)
        .boxed()
}

fn file_layer(config: &FileConfig) -> Result<BoxedLayer, LoggerError> {
    let writer = RotatingFileWriter::new(config)?;
    let base = fmt::layer().with_ansi(false).with_writer(writer);

    let layer = match config.format {
        LogFormat::Full => base.with_target(true).boxed(),
        LogFormat::Compact => base.with_target(true).compact().boxed(),
        LogFormat::Json => base.json().with_current_span(true).boxed(),
    };
    Ok(layer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_invalid_config_is_rejected_before_install() {
        let config = LoggerConfig {
            level: "loud".to_string(),
            ..LoggerConfig::default()
        };
        assert!(matches!(
            init_logger(&config),
            Err(LoggerError::Config { .. })
        ));
    }

    #[test]
    fn test_file_layer_creates_log_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs/app.log");
        let config = FileConfig {
            enabled: true,
            path: path.clone(),
            ..FileConfig::default()
        };

        for format in [LogFormat::Full, LogFormat::Compact, LogFormat::Json] {
            let config = FileConfig {
                format,
                ..config.clone()
            };
            assert!(file_layer(&config).is_ok());
        }
        assert!(path.exists());
    }
}
