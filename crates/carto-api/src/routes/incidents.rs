//! CRUD endpoints for incidents.
//!
//! The list endpoint accepts optional `impact` and `statut` query
//! parameters; both are exact matches, AND-combined. An empty value
//! means no filter.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use carto_core::db::{create_incident_repository, IncidentFilter};
use carto_core::model::{assigned_id, Incident, IncidentUpdate};
use serde::Deserialize;

use crate::dto::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).put(update).delete(remove))
}

#[derive(Debug, Deserialize)]
struct IncidentQuery {
    impact: Option<String>,
    statut: Option<String>,
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<IncidentQuery>,
) -> Result<Json<ApiResponse<Vec<Incident>>>, ApiError> {
    let filter = IncidentFilter {
        impact: query.impact.filter(|v| !v.is_empty()),
        statut: query.statut.filter(|v| !v.is_empty()),
    };
    let items = create_incident_repository(&state.db).list(&filter).await?;
    Ok(Json(ApiResponse::ok(items)))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Incident>>, ApiError> {
    match create_incident_repository(&state.db).get(&id).await? {
        Some(item) => Ok(Json(ApiResponse::ok(item))),
        None => Err(ApiError::NotFound("Incident non trouvé".to_string())),
    }
}

async fn create(
    State(state): State<AppState>,
    Json(mut payload): Json<Incident>,
) -> Result<Json<ApiResponse<Incident>>, ApiError> {
    if payload.nom.trim().is_empty() {
        return Err(ApiError::BadRequest("Le champ nom est requis".to_string()));
    }

    payload.id = assigned_id(&payload.id);
    let created = create_incident_repository(&state.db)
        .create(&payload)
        .await?;
    state.data_service.invalidate().await;
    Ok(Json(ApiResponse::ok(created)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<IncidentUpdate>,
) -> Result<Json<ApiResponse<Incident>>, ApiError> {
    let updated = create_incident_repository(&state.db)
        .update(&id, &payload)
        .await?;
    state.data_service.invalidate().await;
    Ok(Json(ApiResponse::ok(updated)))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let deleted = create_incident_repository(&state.db).delete(&id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Incident non trouvé".to_string()));
    }
    state.data_service.invalidate().await;
    Ok(Json(ApiResponse::message("Incident supprimé")))
}
