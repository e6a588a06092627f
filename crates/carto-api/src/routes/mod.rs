//! API routes.

pub mod acteurs;
pub mod admin;
pub mod applications;
pub mod docs;
pub mod donnees;
pub mod ecosysteme;
pub mod etablissements;
pub mod fonctions;
pub mod health;
pub mod incidents;
pub mod infrastructure;
pub mod processus;
pub mod recherche;
pub mod securite;
pub mod stats;

use crate::state::AppState;
use axum::Router;

/// Creates the main API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .merge(health::routes())
        .with_state(state)
}

/// Routes under the /api prefix.
fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(docs::routes())
        .merge(admin::routes())
        .merge(stats::routes())
        .merge(recherche::routes())
        .nest("/etablissements", etablissements::routes())
        .nest("/processus", processus::routes())
        .nest("/acteurs", acteurs::routes())
        .nest("/ecosysteme", ecosysteme::routes())
        .nest("/fonctions", fonctions::routes())
        .nest("/applications", applications::routes())
        .nest("/donnees", donnees::routes())
        .nest("/infrastructure", infrastructure::routes())
        .nest("/incidents", incidents::routes())
        .nest("/securite", securite::routes())
}
