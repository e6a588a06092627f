//! Cross-entity search endpoint.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use carto_core::ResultatRecherche;
use serde::Deserialize;

use crate::dto::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/recherche", get(rechercher))
}

#[derive(Debug, Deserialize)]
struct RechercheQuery {
    #[serde(default)]
    q: String,
}

async fn rechercher(
    State(state): State<AppState>,
    Query(query): Query<RechercheQuery>,
) -> Result<Json<ApiResponse<Vec<ResultatRecherche>>>, ApiError> {
    let resultats = state.data_service.rechercher(&query.q).await?;
    Ok(Json(ApiResponse::ok(resultats)))
}
