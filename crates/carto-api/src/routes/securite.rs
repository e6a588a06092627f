//! Endpoints for the security posture singleton.

use axum::{extract::State, routing::get, Json, Router};
use carto_core::db::create_securite_repository;
use carto_core::model::Securite;

use crate::dto::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(get_securite).put(put_securite))
}

async fn get_securite(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Securite>>, ApiError> {
    match create_securite_repository(&state.db).get().await? {
        Some(securite) => Ok(Json(ApiResponse::ok(securite))),
        None => Err(ApiError::NotFound(
            "Données de sécurité non trouvées".to_string(),
        )),
    }
}

async fn put_securite(
    State(state): State<AppState>,
    Json(payload): Json<Securite>,
) -> Result<Json<ApiResponse<Securite>>, ApiError> {
    let stored = create_securite_repository(&state.db).put(&payload).await?;
    state.data_service.invalidate().await;
    Ok(Json(ApiResponse::ok(stored)))
}
