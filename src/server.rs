//! Server module for managing HTTP server lifecycle
//!
//! This module handles server initialization, startup, and graceful shutdown.

use tokio::net::TcpListener;
use tokio::signal;

use crate::api::routes::create_router;
use crate::config::{Settings, StoreBackend};
use crate::db::{establish_async_connection_pool, run_pending_migrations};
use crate::state::AppState;

/// HTTP server manager
pub struct Server {
    settings: Settings,
}

impl Server {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Start the server and run until a shutdown signal arrives
    ///
    /// # Errors
    /// - Migration or connection pool failures (postgres backend)
    /// - Address binding errors
    /// - Server runtime errors
    pub async fn run(self) -> anyhow::Result<()> {
        let settings = &self.settings;

        tracing::info!(
            app_name = %settings.application.name,
            app_version = %settings.application.version,
            "Application starting"
        );

        tracing::info!(
            host = %settings.server.host,
            port = settings.server.port,
            request_timeout = settings.server.request_timeout,
            keep_alive_timeout = settings.server.keep_alive_timeout,
            cors_origins = settings.server.cors_origins.len(),
            "Server configuration loaded"
        );

        tracing::info!(
            level = %settings.logger.level,
            console_enabled = settings.logger.console.enabled,
            file_enabled = settings.logger.file.enabled,
            "Logger configuration loaded"
        );

        let state = self.build_state().await?;
        let router = create_router(state, &settings.server);

        let address = settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Builds the state for the configured store, migrating first when asked
    async fn build_state(&self) -> anyhow::Result<AppState> {
        let database = &self.settings.database;

        match database.backend {
            StoreBackend::Memory => {
                tracing::warn!("Using the in-memory store; data is lost on shutdown");
                Ok(AppState::in_memory())
            }
            StoreBackend::Postgres => {
                tracing::info!(
                    max_connections = database.max_connections,
                    min_connections = database.min_connections,
                    connection_timeout = database.connection_timeout,
                    auto_migrate = database.auto_migrate,
                    "Database configuration loaded"
                );

                if database.auto_migrate {
                    let applied = run_pending_migrations(&database.url).await?;
                    tracing::info!(count = applied.len(), migrations = ?applied, "Migrations applied");
                }

                tracing::info!("Initializing database connection pool...");
                let pool = establish_async_connection_pool(database).await?;
                tracing::info!("Database connection pool initialized");

                Ok(AppState::new(pool))
            }
        }
    }
}

/// Waits for Ctrl+C or SIGTERM.
///
/// A handler that cannot be installed is logged and never fires; the
/// other signal still triggers shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
