//! CRUD endpoints for ecosystem entries.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use carto_core::db::create_ecosysteme_repository;
use carto_core::model::{assigned_id, Ecosysteme, EcosystemeUpdate};

use crate::dto::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).put(update).delete(remove))
}

async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Ecosysteme>>>, ApiError> {
    let items = create_ecosysteme_repository(&state.db).list().await?;
    Ok(Json(ApiResponse::ok(items)))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Ecosysteme>>, ApiError> {
    match create_ecosysteme_repository(&state.db).get(&id).await? {
        Some(item) => Ok(Json(ApiResponse::ok(item))),
        None => Err(ApiError::NotFound(
            "Élément d'écosystème non trouvé".to_string(),
        )),
    }
}

async fn create(
    State(state): State<AppState>,
    Json(mut payload): Json<Ecosysteme>,
) -> Result<Json<ApiResponse<Ecosysteme>>, ApiError> {
    if payload.nom.trim().is_empty() {
        return Err(ApiError::BadRequest("Le champ nom est requis".to_string()));
    }

    payload.id = assigned_id(&payload.id);
    let created = create_ecosysteme_repository(&state.db)
        .create(&payload)
        .await?;
    state.data_service.invalidate().await;
    Ok(Json(ApiResponse::ok(created)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<EcosystemeUpdate>,
) -> Result<Json<ApiResponse<Ecosysteme>>, ApiError> {
    let updated = create_ecosysteme_repository(&state.db)
        .update(&id, &payload)
        .await?;
    state.data_service.invalidate().await;
    Ok(Json(ApiResponse::ok(updated)))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let deleted = create_ecosysteme_repository(&state.db).delete(&id).await?;
    if !deleted {
        return Err(ApiError::NotFound(
            "Élément d'écosystème non trouvé".to_string(),
        ));
    }
    state.data_service.invalidate().await;
    Ok(Json(ApiResponse::message("Élément d'écosystème supprimé")))
}
