//! Test utilities shared by this crate's tests and the API crate's tests.

use super::{initialize_schema, DbPool};
use uuid::Uuid;

/// Creates an isolated in-memory SQLite database with the full schema.
///
/// Each call uses a unique shared-cache name so parallel tests never see
/// each other's data.
pub async fn setup_test_db() -> DbPool {
    let db_url = format!(
        "sqlite:file:carto_test_{}?mode=memory&cache=shared",
        Uuid::new_v4()
    );

    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&db_url)
        .await
        .expect("Failed to create SQLite pool");

    let db = DbPool::new(pool);
    initialize_schema(&db).await.expect("Failed to create schema");
    db
}
