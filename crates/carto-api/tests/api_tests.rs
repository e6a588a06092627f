//! End-to-end tests of the HTTP surface, driven through the router with
//! an in-memory database.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use carto_api::test_helpers::{test_app, test_state};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn put_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn etablissement_crud_lifecycle() {
    let app = test_app(test_state().await);

    // Create with a server-assigned id.
    let (status, body) = send(
        &app,
        post_json("/api/etablissements", json!({"nom": "Siège", "code": "SS"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert_eq!(body["data"]["code"], "SS");

    // Listed.
    let (status, body) = send(&app, get("/api/etablissements")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // Partial update leaves untouched fields alone.
    let (status, body) = send(
        &app,
        put_json(
            &format!("/api/etablissements/{}", id),
            json!({"adresse": "12 rue de la Paix"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["adresse"], "12 rue de la Paix");
    assert_eq!(body["data"]["code"], "SS");

    // Delete, then the record is gone.
    let (status, body) = send(&app, delete(&format!("/api/etablissements/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = send(&app, get(&format!("/api/etablissements/{}", id))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("non trouvé"));
}

#[tokio::test]
async fn etablissement_requires_nom_and_code() {
    let app = test_app(test_state().await);

    let (status, body) = send(
        &app,
        post_json("/api/etablissements", json!({"nom": "Sans code"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn list_fields_round_trip_through_the_api() {
    let app = test_app(test_state().await);

    let (status, body) = send(
        &app,
        post_json(
            "/api/etablissements",
            json!({
                "id": "etab-001",
                "nom": "Usine Nord",
                "code": "UN",
                "risques": ["Incendie", "Inondation"]
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["risques"], json!(["Incendie", "Inondation"]));

    let (_, body) = send(&app, get("/api/etablissements/etab-001")).await;
    assert_eq!(body["data"]["risques"], json!(["Incendie", "Inondation"]));
}

#[tokio::test]
async fn incident_list_filters_by_impact_and_statut() {
    let app = test_app(test_state().await);

    for (nom, impact, statut) in [
        ("Panne serveur", "Critique", "Ouvert"),
        ("Lenteur", "Mineur", "Ouvert"),
        ("Fuite", "Critique", "Résolu"),
    ] {
        let (status, _) = send(
            &app,
            post_json(
                "/api/incidents",
                json!({"nom": nom, "impact": impact, "statut": statut}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = send(&app, get("/api/incidents?impact=Critique")).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (_, body) = send(&app, get("/api/incidents?impact=Critique&statut=Ouvert")).await;
    let hits = body["data"].as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["nom"], "Panne serveur");

    // An empty value is no filter at all.
    let (_, body) = send(&app, get("/api/incidents?impact=&statut=")).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn securite_singleton_upsert() {
    let app = test_app(test_state().await);

    // Nothing stored yet.
    let (status, body) = send(&app, get("/api/securite")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    // Upsert always lands on the global row.
    let (status, body) = send(
        &app,
        put_json(
            "/api/securite",
            json!({"niveau": "Moyen", "score_global": 62.0, "mesures": ["Pare-feu"]}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], "global");
    assert_eq!(body["data"]["mesures"], json!(["Pare-feu"]));

    let (status, body) = send(&app, get("/api/securite")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["score_global"], 62.0);
}

#[tokio::test]
async fn stats_reflect_writes_immediately() {
    let app = test_app(test_state().await);

    let (_, body) = send(&app, get("/api/stats")).await;
    assert_eq!(body["data"]["incidents"], 0);

    let (status, _) = send(
        &app,
        post_json(
            "/api/incidents",
            json!({"nom": "Panne", "impact": "Critique", "statut": "Ouvert"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // The write invalidated the bundle cache.
    let (_, body) = send(&app, get("/api/stats")).await;
    assert_eq!(body["data"]["incidents"], 1);
    assert_eq!(body["data"]["incidents_critiques"], 1);
    assert_eq!(body["data"]["incidents_recents"], 1);
    assert_eq!(body["data"]["risques_critiques"], 1);
}

#[tokio::test]
async fn recherche_returns_tagged_results() {
    let app = test_app(test_state().await);

    let (status, _) = send(
        &app,
        post_json(
            "/api/acteurs",
            json!({"nom": "Jeanne Moreau", "role": "Comptable"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        post_json(
            "/api/applications",
            json!({"nom": "ERP Horizon", "domaine": "Gestion"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, get("/api/recherche?q=horizon")).await;
    let hits = body["data"].as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["type"], "application");
    assert_eq!(hits[0]["data"]["nom"], "ERP Horizon");

    let (_, body) = send(&app, get("/api/recherche?q=moreau")).await;
    let hits = body["data"].as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["type"], "acteur");
}

#[tokio::test]
async fn docs_index_lists_endpoints() {
    let app = test_app(test_state().await);

    let (status, body) = send(&app, get("/api")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["data"]["endpoints"]["securite"].is_string());
}

#[tokio::test]
async fn init_db_and_migrate_data() {
    let app = test_app(test_state().await);

    let (status, body) = send(&app, get("/api/init-db")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/migrate-data")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["data"]["etablissements"].as_u64().unwrap() > 0);
    assert_eq!(body["data"]["securite"], 1);

    // Migrated data is visible through the regular endpoints.
    let (_, body) = send(&app, get("/api/applications")).await;
    assert!(!body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn health_reports_database_status() {
    let app = test_app(test_state().await);

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "ok");
}
