//! Persistence layer for the roomdesk services.
//!
//! - [`models`]: row structs and request DTOs
//! - [`repositories`]: zero-sized repos issuing SQL against a `PgPool`
//! - [`store`]: object-safe store traits and the Postgres-backed [`store::PgStore`]
//! - [`memory`]: an in-process store used by tests and local tooling

pub mod memory;
pub mod models;
pub mod repositories;
pub mod store;

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

/// Maximum number of pooled connections per service process.
pub const MAX_CONNECTIONS: u32 = 20;

/// How long a request waits for a free connection before failing.
pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations bundled with this crate.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
