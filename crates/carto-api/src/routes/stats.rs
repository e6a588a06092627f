//! Inventory statistics endpoint.

use axum::{extract::State, routing::get, Json, Router};
use carto_core::Statistiques;

use crate::dto::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/stats", get(stats))
}

async fn stats(State(state): State<AppState>) -> Result<Json<ApiResponse<Statistiques>>, ApiError> {
    let stats = state.data_service.statistiques().await?;
    Ok(Json(ApiResponse::ok(stats)))
}
