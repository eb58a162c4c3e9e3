//! Configuration loader for school-api
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "SCHOOL_CONFIG_DIR";

/// Environment variable for a single configuration file
const CONFIG_FILE_ENV: &str = "SCHOOL_CONFIG_FILE";

const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "SCHOOL";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Keys whose environment value is a comma separated list
const LIST_KEYS: &[&str] = &["server.cors_origins"];

/// Configuration loader that handles layered configuration loading
///
/// Sources, lowest priority first:
/// 1. `default.toml` (required)
/// 2. `{environment}.toml` (optional)
/// 3. `local.toml` (optional)
/// 4. `SCHOOL_*` environment variables
///
/// A single configuration file replaces the first three layers.
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a loader from `SCHOOL_CONFIG_DIR`, `SCHOOL_CONFIG_FILE` and
    /// `SCHOOL_APP_ENV`.
    ///
    /// # Errors
    ///
    /// Returns an error if both `SCHOOL_CONFIG_DIR` and `SCHOOL_CONFIG_FILE`
    /// are set.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir_var = std::env::var(CONFIG_DIR_ENV).ok();
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_file.is_some() && config_dir_var.is_some() {
            return Err(ConfigError::conflicting_sources(CONFIG_DIR_ENV, CONFIG_FILE_ENV));
        }

        Ok(Self {
            config_dir: config_dir_var
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Load only `path` instead of the layered directory
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Select the `{environment}.toml` layer explicitly
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Load and validate configuration from all sources
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `default.toml` (or the single configuration file) is missing
    /// - Configuration parsing fails
    /// - Configuration validation fails
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let settings: Settings = self.build_config()?.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match self.config_file {
            Some(ref config_file) => Self::add_file_source(builder, config_file, true)?,
            None => self.build_layered_config(builder)?,
        };

        // SCHOOL_SERVER__PORT -> server.port
        Self::add_env_source(builder)
            .build()
            .map_err(ConfigError::from)
    }

    fn build_layered_config(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let default_path = self.config_dir.join("default.toml");
        let builder = Self::add_file_source(builder, &default_path, true)?;

        let env_path = self
            .config_dir
            .join(format!("{}.toml", self.environment.as_str()));
        let builder = Self::add_file_source(builder, &env_path, false)?;

        let local_path = self.config_dir.join("local.toml");
        Self::add_file_source(builder, &local_path, false)
    }

    fn add_file_source(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if required && !path.is_file() {
            return Err(ConfigError::file_not_found(path));
        }

        Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(required)))
    }

    fn add_env_source(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
        let env = LIST_KEYS.iter().fold(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .list_separator(",")
                .ignore_empty(true)
                .try_parsing(true),
            |env, key| env.with_list_parse_key(key),
        );
        builder.add_source(env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::StoreBackend;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Tests touching process environment variables run one at a time
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    const SCHOOL_VARS: &[&str] = &[
        CONFIG_DIR_ENV,
        CONFIG_FILE_ENV,
        AppEnvironment::ENV_VAR,
        "SCHOOL_SERVER__PORT",
        "SCHOOL_SERVER__CORS_ORIGINS",
        "SCHOOL_DATABASE__URL",
        "SCHOOL_DATABASE__BACKEND",
    ];

    const DEFAULT_TOML: &str = r#"
[application]
name = "school-api"

[server]
host = "127.0.0.1"
port = 8080
request_timeout = 30

[database]
backend = "postgres"
url = "postgres://localhost/school"
max_connections = 10

[logger]
level = "info"
"#;

    fn setup_config_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            fs::write(temp_dir.path().join(name), content).expect("Failed to write config file");
        }
        temp_dir
    }

    /// Sets environment variables for one test and restores them on drop
    struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        /// Starts from a clean slate of every `SCHOOL_*` variable the tests use
        fn clean() -> Self {
            let mut guard = Self {
                vars_to_restore: Vec::new(),
            };
            for key in SCHOOL_VARS {
                guard.remove(key);
            }
            guard
        }

        fn set(&mut self, key: &str, value: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        fn remove(&mut self, key: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, original_value) in self.vars_to_restore.iter().rev() {
                unsafe {
                    match original_value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    #[test]
    fn test_config_loader_new_default() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::clean();

        let loader = ConfigLoader::new().expect("Should create loader");
        assert_eq!(loader.config_dir, PathBuf::from("config"));
        assert!(loader.config_file.is_none());
        assert_eq!(loader.environment(), AppEnvironment::Development);
    }

    #[test]
    fn test_config_loader_conflicting_sources_error() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();
        env.set(CONFIG_DIR_ENV, "/custom/config");
        env.set(CONFIG_FILE_ENV, "/path/to/config.toml");

        match ConfigLoader::new() {
            Err(ConfigError::ConflictingSources { first, second }) => {
                assert_eq!(first, "SCHOOL_CONFIG_DIR");
                assert_eq!(second, "SCHOOL_CONFIG_FILE");
            }
            other => panic!("Expected ConflictingSources, got {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_default_toml() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());

        match ConfigLoader::new().unwrap().load() {
            Err(ConfigError::FileNotFound { path }) => assert!(path.ends_with("default.toml")),
            other => panic!("Expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_load_default_toml_only() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[("default.toml", DEFAULT_TOML)]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());

        let settings = ConfigLoader::new().unwrap().load().expect("Should load settings");
        assert_eq!(settings.application.name, "school-api");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.database.url, "postgres://localhost/school");
        assert_eq!(settings.database.backend, StoreBackend::Postgres);
    }

    #[test]
    fn test_layer_precedence() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[
            ("default.toml", DEFAULT_TOML),
            (
                "production.toml",
                "[server]\nhost = \"0.0.0.0\"\nport = 80\n\n[database]\nmax_connections = 50\n",
            ),
            ("local.toml", "[server]\nport = 9000\n"),
        ]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());
        env.set(AppEnvironment::ENV_VAR, "production");
        env.set("SCHOOL_DATABASE__URL", "postgres://db-from-env/school");

        let settings = ConfigLoader::new().unwrap().load().expect("Should load settings");

        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.database.max_connections, 50);
        assert_eq!(settings.database.url, "postgres://db-from-env/school");
        assert_eq!(settings.server.request_timeout, 30);
    }

    #[test]
    fn test_env_vars_parse_lists_and_enums() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[("default.toml", DEFAULT_TOML)]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());
        env.set(
            "SCHOOL_SERVER__CORS_ORIGINS",
            "http://localhost:3000,https://school.example.org",
        );
        env.set("SCHOOL_DATABASE__BACKEND", "memory");
        env.set("SCHOOL_SERVER__PORT", "7070");

        let settings = ConfigLoader::new().unwrap().load().expect("Should load settings");

        assert_eq!(
            settings.server.cors_origins,
            vec!["http://localhost:3000", "https://school.example.org"]
        );
        assert_eq!(settings.database.backend, StoreBackend::Memory);
        assert_eq!(settings.server.port, 7070);
    }

    #[test]
    fn test_single_file_mode_ignores_directory_layers() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[(
            "custom.toml",
            "[server]\nport = 4000\n\n[database]\nbackend = \"memory\"\n",
        )]);

        let settings = ConfigLoader::new()
            .unwrap()
            .with_config_file(temp_dir.path().join("custom.toml"))
            .load()
            .expect("Should load settings");

        assert_eq!(settings.server.port, 4000);
        assert_eq!(settings.database.backend, StoreBackend::Memory);
    }

    #[test]
    fn test_explicit_environment_overrides_env_var() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();
        env.set(AppEnvironment::ENV_VAR, "production");

        let loader = ConfigLoader::new()
            .unwrap()
            .with_environment(AppEnvironment::Test);
        assert_eq!(loader.environment(), AppEnvironment::Test);
    }

    #[test]
    fn test_invalid_settings_fail_validation() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[(
            "default.toml",
            "[database]\nbackend = \"postgres\"\nurl = \"\"\n",
        )]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());

        let err = ConfigLoader::new().unwrap().load().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { field, .. } if field == "database.url"));
    }
}
