//! Database administration endpoints: schema initialization and the
//! one-time legacy data migration.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use carto_core::db::{initialize_schema, migrate_legacy_data, MigrationReport};
use tracing::info;

use crate::dto::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/init-db", get(init_db))
        .route("/migrate-data", post(migrate_data))
}

async fn init_db(State(state): State<AppState>) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .db
        .ping()
        .await
        .map_err(|e| ApiError::Database(e.to_string()))?;
    initialize_schema(&state.db).await?;
    Ok(Json(ApiResponse::message(
        "Base de données initialisée avec succès",
    )))
}

async fn migrate_data(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<MigrationReport>>, ApiError> {
    info!("Début de la migration des données");
    let report = migrate_legacy_data(&state.db).await?;
    state.data_service.invalidate().await;
    Ok(Json(ApiResponse::ok_with_message(
        report,
        "Migration terminée avec succès",
    )))
}
