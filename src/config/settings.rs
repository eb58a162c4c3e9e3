//! Configuration settings structures for school-api
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use serde::{Deserialize, Serialize};

use crate::logger::LoggerConfig;

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "school-api".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_keep_alive_timeout() -> u64 {
    75
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout() -> u64 {
    30
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default = "default_app_name")]
    pub name: String,

    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

/// Axum HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Keep-alive timeout in seconds
    #[serde(default = "default_keep_alive_timeout")]
    pub keep_alive_timeout: u64,

    /// Origins allowed by CORS; no CORS layer is installed when empty
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    /// Get the full server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
            keep_alive_timeout: default_keep_alive_timeout(),
            cors_origins: Vec::new(),
        }
    }
}

// ============================================================================
// Database Configuration
// ============================================================================

/// Where schools and students are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// PostgreSQL through diesel-async
    #[default]
    Postgres,
    /// Process-local store; nothing survives a restart
    Memory,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Postgres => "postgres",
            StoreBackend::Memory => "memory",
        }
    }
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diesel database connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Database connection URL, required for the postgres backend
    #[serde(default)]
    pub url: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of idle connections kept in the pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,

    /// Whether to run pending migrations on startup
    #[serde(default)]
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout: default_connection_timeout(),
            auto_migrate: false,
        }
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete application settings
///
/// This structure represents the entire configuration that can be loaded
/// from TOML files and environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logger: LoggerConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::LogFormat;
    use proptest::prelude::*;

    fn arb_server_config() -> impl Strategy<Value = ServerConfig> {
        (
            "[a-z0-9.]{1,20}",
            1u16..=65535,
            1u64..3600,
            1u64..3600,
            prop::collection::vec("https?://[a-z]{1,10}\\.[a-z]{2,3}", 0..3),
        )
            .prop_map(
                |(host, port, request_timeout, keep_alive_timeout, cors_origins)| ServerConfig {
                    host,
                    port,
                    request_timeout,
                    keep_alive_timeout,
                    cors_origins,
                },
            )
    }

    fn arb_database_config() -> impl Strategy<Value = DatabaseConfig> {
        (
            prop_oneof![Just(StoreBackend::Postgres), Just(StoreBackend::Memory)],
            "postgres://[a-z]{1,10}/[a-z]{1,10}",
            1u32..100,
            any::<bool>(),
        )
            .prop_map(|(backend, url, max_connections, auto_migrate)| DatabaseConfig {
                backend,
                url,
                max_connections,
                min_connections: 1,
                connection_timeout: 30,
                auto_migrate,
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn settings_survive_toml_round_trip(
            server in arb_server_config(),
            database in arb_database_config(),
        ) {
            let settings = Settings {
                server,
                database,
                ..Settings::default()
            };
            let text = toml::to_string(&settings).unwrap();
            let parsed: Settings = toml::from_str(&text).unwrap();
            prop_assert_eq!(parsed, settings);
        }
    }

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.request_timeout, 30);
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_server_config_address() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 9000,
            ..Default::default()
        };
        assert_eq!(config.address(), "0.0.0.0:9000");
    }

    #[test]
    fn test_database_config_defaults() {
        let config = DatabaseConfig::default();
        assert_eq!(config.backend, StoreBackend::Postgres);
        assert!(config.url.is_empty());
        assert_eq!(config.max_connections, 10);
        assert!(!config.auto_migrate);
    }

    #[test]
    fn test_settings_deserialize_partial() {
        let settings: Settings = toml::from_str(
            r#"
[server]
port = 9090
cors_origins = ["http://localhost:3000"]

[database]
backend = "memory"
"#,
        )
        .unwrap();

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.cors_origins, vec!["http://localhost:3000"]);
        assert_eq!(settings.database.backend, StoreBackend::Memory);
        assert_eq!(settings.application.name, "school-api");
        assert_eq!(settings.logger, LoggerConfig::default());
    }

    #[test]
    fn test_settings_deserialize_logger_section() {
        let settings: Settings = toml::from_str(
            r#"
[logger]
level = "debug"

[logger.console]
colored = false

[logger.file]
enabled = true
path = "logs/test.log"
format = "full"

[logger.file.rotation]
max_size = 2048
compress = true
"#,
        )
        .unwrap();

        let logger = settings.logger;
        assert_eq!(logger.level, "debug");
        assert!(logger.console.enabled);
        assert!(!logger.console.colored);
        assert_eq!(logger.file.format, LogFormat::Full);
        assert_eq!(logger.file.rotation.max_size, 2048);
        assert!(logger.file.rotation.compress);
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let result = toml::from_str::<Settings>("[database]\nbackend = \"mongo\"\n");
        assert!(result.is_err());
    }
}
