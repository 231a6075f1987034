// libs/dashboard-cell/src/handlers.rs
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

use appointment_cell::models::AppointmentTimeline;
use appointment_cell::services::AppointmentService;
use patient_cell::services::PatientService;
use provider_cell::services::ProviderService;
use shared_utils::fallback::Settle;

use crate::models::{PatientDashboard, ProviderDashboard};
use crate::router::DashboardState;
use crate::services::{load_patient_dashboard, load_provider_dashboard};

#[axum::debug_handler]
pub async fn get_patient_dashboard(
    State(state): State<DashboardState>,
    Path(patient_id): Path<String>,
) -> Json<PatientDashboard> {
    let service = PatientService::new(state.db);

    Json(load_patient_dashboard(&service, &patient_id).await)
}

#[axum::debug_handler]
pub async fn get_provider_dashboard(
    State(state): State<DashboardState>,
    Path(provider_id): Path<String>,
) -> Json<ProviderDashboard> {
    let service = ProviderService::new(state.db);

    Json(load_provider_dashboard(&service, &provider_id).await)
}

#[axum::debug_handler]
pub async fn get_my_patient_dashboard(State(state): State<DashboardState>) -> Json<PatientDashboard> {
    let service = PatientService::new(state.db);

    Json(load_patient_dashboard(&service, &state.session_patient_id).await)
}

#[axum::debug_handler]
pub async fn get_my_provider_dashboard(State(state): State<DashboardState>) -> Json<ProviderDashboard> {
    let service = ProviderService::new(state.db);

    Json(load_provider_dashboard(&service, &state.session_provider_id).await)
}

#[axum::debug_handler]
pub async fn get_my_appointments(State(state): State<DashboardState>) -> Json<AppointmentTimeline> {
    let service = AppointmentService::new(state.db);

    let timeline = service
        .get_patient_appointment_timeline(&state.session_patient_id, Utc::now())
        .await
        .settle("getPatientAppointmentTimeline");

    Json(timeline)
}
