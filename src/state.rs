//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::sync::Arc;

use crate::db::AsyncDbPool;
use crate::domain::TracingEventPublisher;
use crate::repositories::Repositories;
use crate::services::Services;

/// Application state containing all shared services and resources.
///
/// Cloning is cheap since both Services and AsyncDbPool use Arc internally.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Connection pool for health checks; `None` with the in-memory store
    pub db_pool: Option<AsyncDbPool>,
}

impl AppState {
    /// Creates a PostgreSQL-backed state from a connection pool.
    ///
    /// # Example
    /// ```ignore
    /// let pool = establish_async_connection_pool(&settings.database).await?;
    /// let state = AppState::new(pool);
    /// ```
    pub fn new(pool: AsyncDbPool) -> Self {
        let repos = Repositories::postgres(pool.clone());
        Self {
            services: Services::new(repos, Arc::new(TracingEventPublisher)),
            db_pool: Some(pool),
        }
    }

    /// Creates a state backed by a fresh process-local store.
    pub fn in_memory() -> Self {
        Self {
            services: Services::new(Repositories::in_memory(), Arc::new(TracingEventPublisher)),
            db_pool: None,
        }
    }
}
