// libs/dashboard-cell/src/router.rs
use axum::{routing::get, Router};

use shared_config::AppConfig;
use shared_database::DatabaseContext;

use crate::handlers;

/// Router state: the data context plus the identifiers standing in for the
/// signed-in patient and provider until real sessions exist.
#[derive(Clone)]
pub struct DashboardState {
    pub db: DatabaseContext,
    pub session_patient_id: String,
    pub session_provider_id: String,
}

impl DashboardState {
    pub fn from_config(db: DatabaseContext, config: &AppConfig) -> Self {
        Self {
            db,
            session_patient_id: config.session_patient_id.clone(),
            session_provider_id: config.session_provider_id.clone(),
        }
    }
}

pub fn dashboard_routes(state: DashboardState) -> Router {
    Router::new()
        .route("/patients/{patient_id}", get(handlers::get_patient_dashboard))
        .route("/providers/{provider_id}", get(handlers::get_provider_dashboard))
        .route("/me/patient", get(handlers::get_my_patient_dashboard))
        .route("/me/provider", get(handlers::get_my_provider_dashboard))
        .route("/me/appointments", get(handlers::get_my_appointments))
        .with_state(state)
}
