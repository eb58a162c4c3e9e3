//! Database connection pool and embedded schema migrations.
//!
//! Provides async PostgreSQL connection pooling using diesel_async with bb8.

mod migrations;
mod pool;

pub use migrations::{
    MIGRATIONS, establish_sync_connection, pending_migrations, revert_migrations,
    run_pending_migrations,
};
pub use pool::{AsyncDbPool, establish_async_connection_pool};
