use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::Value;
use tower::ServiceExt;

use dashboard_cell::router::{dashboard_routes, DashboardState};
use shared_config::AppConfig;
use shared_database::MemoryStore;
use shared_models::error::DataError;
use shared_utils::test_utils::{memory_context, MockSupabaseResponses};

fn create_test_app(store: Arc<MemoryStore>) -> Router {
    let config = AppConfig {
        session_patient_id: "p1".to_string(),
        session_provider_id: "pr1".to_string(),
        ..AppConfig::default()
    };
    dashboard_routes(DashboardState::from_config(memory_context(store), &config))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_patient_dashboard_route() {
    let store = Arc::new(MemoryStore::new());
    store
        .seed("patients", vec![MockSupabaseResponses::patient_response("p7", "Ada", "Lovelace")])
        .await;

    let (status, body) = get_json(create_test_app(store), "/patients/p7").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["patient"]["id"], "p7");
    assert_eq!(body["loading"], false);
    assert!(body["medicalRecords"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_session_routes_use_configured_ids() {
    let store = Arc::new(MemoryStore::new());
    store
        .seed("providers", vec![MockSupabaseResponses::provider_response("pr1", "Okafor", "Cardiology")])
        .await;
    store
        .seed(
            "appointments",
            vec![
                MockSupabaseResponses::appointment_response("next", "p1", "pr1", Utc::now() + Duration::days(2), "scheduled"),
                MockSupabaseResponses::appointment_response("done", "p1", "pr1", Utc::now() - Duration::days(2), "completed"),
            ],
        )
        .await;

    let (status, body) = get_json(create_test_app(store.clone()), "/me/provider").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["provider"]["lastName"], "Okafor");

    let (status, body) = get_json(create_test_app(store), "/me/appointments").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["upcoming"][0]["id"], "next");
    assert_eq!(body["past"][0]["id"], "done");
}

#[tokio::test]
async fn test_dashboard_routes_never_fail() {
    let store = Arc::new(MemoryStore::new());
    store
        .fail_all(DataError::Transport("connection refused".to_string()))
        .await;

    let (status, body) = get_json(create_test_app(store.clone()), "/me/patient").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["patient"].is_null());
    assert_eq!(body["loading"], false);

    let (status, body) = get_json(create_test_app(store), "/providers/pr1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["patients"].as_array().unwrap().is_empty());
}
