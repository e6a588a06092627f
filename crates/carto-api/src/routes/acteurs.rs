//! CRUD endpoints for actors.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use carto_core::db::create_acteur_repository;
use carto_core::model::{assigned_id, Acteur, ActeurUpdate};

use crate::dto::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).put(update).delete(remove))
}

async fn list(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Acteur>>>, ApiError> {
    let items = create_acteur_repository(&state.db).list().await?;
    Ok(Json(ApiResponse::ok(items)))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Acteur>>, ApiError> {
    match create_acteur_repository(&state.db).get(&id).await? {
        Some(item) => Ok(Json(ApiResponse::ok(item))),
        None => Err(ApiError::NotFound("Acteur non trouvé".to_string())),
    }
}

async fn create(
    State(state): State<AppState>,
    Json(mut payload): Json<Acteur>,
) -> Result<Json<ApiResponse<Acteur>>, ApiError> {
    if payload.nom.trim().is_empty() {
        return Err(ApiError::BadRequest("Le champ nom est requis".to_string()));
    }

    payload.id = assigned_id(&payload.id);
    let created = create_acteur_repository(&state.db).create(&payload).await?;
    state.data_service.invalidate().await;
    Ok(Json(ApiResponse::ok(created)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ActeurUpdate>,
) -> Result<Json<ApiResponse<Acteur>>, ApiError> {
    let updated = create_acteur_repository(&state.db)
        .update(&id, &payload)
        .await?;
    state.data_service.invalidate().await;
    Ok(Json(ApiResponse::ok(updated)))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let deleted = create_acteur_repository(&state.db).delete(&id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Acteur non trouvé".to_string()));
    }
    state.data_service.invalidate().await;
    Ok(Json(ApiResponse::message("Acteur supprimé")))
}
