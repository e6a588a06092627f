//! Helpers shared by the API integration tests.

use crate::routes::create_router;
use crate::state::AppState;
use axum::Router;
use carto_core::db::test_support::setup_test_db;

/// Creates an application state backed by a fresh in-memory database.
pub async fn test_state() -> AppState {
    AppState::new(setup_test_db().await)
}

/// Builds the full router (without the outer middleware stack) for
/// `tower::ServiceExt::oneshot` style tests.
pub fn test_app(state: AppState) -> Router {
    create_router(state)
}
