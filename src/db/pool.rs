//! Async database connection pool implementation.

use std::time::Duration;

use bb8::Pool;
use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;

use crate::config::DatabaseConfig;
use crate::error::AppError;

/// Async connection pool type alias.
///
/// bb8::Pool is reference counted, so cloning it is cheap.
pub type AsyncDbPool = Pool<AsyncDieselConnectionManager<AsyncPgConnection>>;

/// Builds the connection pool described by `config`.
///
/// bb8 opens `min_connections` eagerly, so an unreachable database fails here
/// rather than on the first request.
pub async fn establish_async_connection_pool(
    config: &DatabaseConfig,
) -> Result<AsyncDbPool, AppError> {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.url.as_str());
    Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_connections))
        .connection_timeout(Duration::from_secs(config.connection_timeout))
        .build(manager)
        .await
        .map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::from(e),
        })
}
