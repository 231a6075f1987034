use axum::{
    Router,
    routing::get,
};

use appointment_cell::router::appointment_routes;
use dashboard_cell::router::{dashboard_routes, DashboardState};
use patient_cell::router::patient_routes;
use provider_cell::router::provider_routes;
use shared_config::AppConfig;
use shared_database::DatabaseContext;

pub fn create_router(db: DatabaseContext, config: &AppConfig) -> Router {
    Router::new()
        .route("/", get(|| async { "Care portal API is running!" }))
        .nest("/patients", patient_routes(db.clone()))
        .nest("/providers", provider_routes(db.clone()))
        .nest("/appointments", appointment_routes(db.clone()))
        .nest("/dashboard", dashboard_routes(DashboardState::from_config(db, config)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{body::Body, http::{Request, StatusCode}};
    use tower::ServiceExt;

    use shared_database::MemoryStore;
    use shared_utils::test_utils::{memory_context, MockSupabaseResponses};

    use super::*;

    async fn status_of(app: Router, uri: &str) -> StatusCode {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        app.oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn every_cell_is_mounted() {
        let store = Arc::new(MemoryStore::new());
        store
            .seed("patients", vec![MockSupabaseResponses::patient_response("p1", "Ada", "Lovelace")])
            .await;
        store
            .seed("providers", vec![MockSupabaseResponses::provider_response("pr1", "Okafor", "Cardiology")])
            .await;

        let app = create_router(memory_context(store), &AppConfig::default());

        assert_eq!(status_of(app.clone(), "/").await, StatusCode::OK);
        assert_eq!(status_of(app.clone(), "/patients/p1").await, StatusCode::OK);
        assert_eq!(status_of(app.clone(), "/providers/pr1").await, StatusCode::OK);
        assert_eq!(status_of(app.clone(), "/appointments/patients/p1").await, StatusCode::OK);
        assert_eq!(status_of(app.clone(), "/dashboard/me/patient").await, StatusCode::OK);
        assert_eq!(status_of(app, "/appointments/missing").await, StatusCode::NOT_FOUND);
    }
}
