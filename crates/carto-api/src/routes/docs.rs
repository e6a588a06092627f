//! Self-describing API index served at `GET /api`.

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::dto::ApiResponse;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(index))
}

async fn index() -> Json<ApiResponse<Value>> {
    let catalogue = json!({
        "nom": "API Cartographe",
        "description": "Inventaire du système d'information sur quatre couches",
        "endpoints": {
            "etablissements": "GET/POST /api/etablissements, GET/PUT/DELETE /api/etablissements/{id}",
            "processus": "GET/POST /api/processus, GET/PUT/DELETE /api/processus/{id}",
            "acteurs": "GET/POST /api/acteurs, GET/PUT/DELETE /api/acteurs/{id}",
            "ecosysteme": "GET/POST /api/ecosysteme, GET/PUT/DELETE /api/ecosysteme/{id}",
            "fonctions": "GET/POST /api/fonctions, GET/PUT/DELETE /api/fonctions/{id}",
            "applications": "GET/POST /api/applications, GET/PUT/DELETE /api/applications/{id}",
            "donnees": "GET/POST /api/donnees, GET/PUT/DELETE /api/donnees/{id}",
            "infrastructure": "GET/POST /api/infrastructure, GET/PUT/DELETE /api/infrastructure/{id}",
            "incidents": "GET/POST /api/incidents (filtres: impact, statut), GET/PUT/DELETE /api/incidents/{id}",
            "securite": "GET/PUT /api/securite",
            "stats": "GET /api/stats",
            "recherche": "GET /api/recherche?q=terme",
            "init-db": "GET /api/init-db",
            "migrate-data": "POST /api/migrate-data"
        },
        "enveloppe": {
            "success": "bool",
            "data": "présent en cas de succès",
            "error": "présent en cas d'échec"
        }
    });

    Json(ApiResponse::ok(catalogue))
}
