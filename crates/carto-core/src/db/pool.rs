//! Database connection pool management.
//!
//! The store is SQLite (the deployment target is a libSQL/Turso database,
//! which speaks the SQLite dialect), reached through a sqlx pool.

use super::DbError;
use std::time::Duration;
use tracing::info;

/// Connection pool for the relational store.
#[derive(Debug, Clone)]
pub struct DbPool {
    pool: sqlx::SqlitePool,
}

impl DbPool {
    /// Wraps an already-connected sqlx pool.
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self { pool }
    }

    /// The underlying sqlx pool.
    pub fn sqlite(&self) -> &sqlx::SqlitePool {
        &self.pool
    }

    /// Round-trips a trivial query to verify connectivity.
    pub async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Options for creating a database connection pool.
#[derive(Debug, Clone)]
pub struct PoolOptions {
    /// Maximum number of connections in the pool.
    pub max_connections: u32,
    /// Minimum number of connections to maintain.
    pub min_connections: u32,
    /// Maximum time to wait for a connection.
    pub acquire_timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        let min_connections = std::env::var("DATABASE_MIN_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1);

        let acquire_timeout_secs = std::env::var("DATABASE_ACQUIRE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        Self {
            max_connections,
            min_connections,
            acquire_timeout: Duration::from_secs(acquire_timeout_secs),
        }
    }
}

/// Creates a database connection pool from a database URL.
///
/// Only `sqlite:` URLs are accepted; anything else is a configuration
/// error.
pub async fn create_pool(database_url: &str) -> Result<DbPool, DbError> {
    create_pool_with_options(database_url, PoolOptions::default()).await
}

/// Creates a database connection pool with custom options.
pub async fn create_pool_with_options(
    database_url: &str,
    options: PoolOptions,
) -> Result<DbPool, DbError> {
    if !database_url.starts_with("sqlite:") {
        return Err(DbError::Configuration(format!(
            "Unsupported database URL scheme. Expected sqlite:, got: {}",
            database_url.split(':').next().unwrap_or("unknown")
        )));
    }

    info!(max_connections = options.max_connections, "Creating SQLite connection pool");
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(options.max_connections)
        .min_connections(options.min_connections)
        .acquire_timeout(options.acquire_timeout)
        .connect(database_url)
        .await?;

    Ok(DbPool::new(pool))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_non_sqlite_urls() {
        let err = create_pool("postgres://localhost/carto").await.unwrap_err();
        assert!(matches!(err, DbError::Configuration(_)));
    }

    #[tokio::test]
    async fn connects_to_in_memory_database() {
        let db = create_pool("sqlite::memory:").await.unwrap();
        db.ping().await.unwrap();
    }
}
