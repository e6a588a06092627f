//! Application state shared across handlers.

use carto_core::db::DbPool;
use carto_core::DataService;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DbPool>,
    /// Aggregation service with its bundle cache.
    pub data_service: Arc<DataService>,
}

impl AppState {
    /// Creates a new application state around a connected pool.
    pub fn new(db: DbPool) -> Self {
        let data_service = Arc::new(DataService::new(db.clone()));
        Self {
            db: Arc::new(db),
            data_service,
        }
    }

    /// Creates a new application state with a preconfigured service,
    /// mainly for tests that shrink the cache TTL.
    pub fn with_data_service(db: DbPool, data_service: DataService) -> Self {
        Self {
            db: Arc::new(db),
            data_service: Arc::new(data_service),
        }
    }
}
