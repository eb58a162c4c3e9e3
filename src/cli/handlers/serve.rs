//! Serve command handler
//!
//! Runs the HTTP server, or with `--dry-run` reports what it would do.

use crate::config::{Settings, StoreBackend};
use crate::server::Server;

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub async fn execute(self, dry_run: bool) -> anyhow::Result<()> {
        if dry_run {
            self.validate_only()?;
            return Ok(());
        }
        Server::new(self.config).run().await
    }

    /// Checks the configuration and prints the summary lines returned by
    /// [`Self::dry_run_report`].
    pub fn validate_only(&self) -> anyhow::Result<()> {
        self.config.validate()?;
        for line in self.dry_run_report() {
            println!("✓ {line}");
        }
        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }

    pub fn dry_run_report(&self) -> Vec<String> {
        let database = &self.config.database;
        let store = match database.backend {
            StoreBackend::Postgres => format!(
                "Store: postgres (pool {}..{} connections, auto-migrate {})",
                database.min_connections,
                database.max_connections,
                if database.auto_migrate { "on" } else { "off" }
            ),
            StoreBackend::Memory => "Store: in-memory (data is lost on restart)".to_string(),
        };
        let cors = if self.config.server.cors_origins.is_empty() {
            "CORS: disabled".to_string()
        } else {
            format!("CORS: {}", self.config.server.cors_origins.join(", "))
        };

        vec![
            "Configuration is valid".to_string(),
            format!("Server would bind to: {}", self.config.server.address()),
            store,
            cors,
            format!("Log level: {}", self.config.logger.level),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> Settings {
        let mut config = Settings::default();
        config.database.backend = StoreBackend::Memory;
        config
    }

    #[tokio::test]
    async fn test_dry_run_succeeds_for_valid_config() {
        let handler = ServeCommandHandler::new(memory_config());
        assert!(handler.execute(true).await.is_ok());
    }

    #[tokio::test]
    async fn test_dry_run_rejects_invalid_config() {
        let mut config = memory_config();
        config.server.port = 0;
        assert!(ServeCommandHandler::new(config).execute(true).await.is_err());
    }

    #[test]
    fn test_dry_run_report_describes_backend_and_cors() {
        let mut config = memory_config();
        config.server.cors_origins = vec!["http://localhost:3000".to_string()];
        let report = ServeCommandHandler::new(config).dry_run_report();

        assert!(report.iter().any(|l| l.contains("127.0.0.1:8080")));
        assert!(report.iter().any(|l| l.contains("in-memory")));
        assert!(report.iter().any(|l| l == "CORS: http://localhost:3000"));
    }
}
