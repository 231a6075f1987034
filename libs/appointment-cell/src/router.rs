// libs/appointment-cell/src/router.rs
use axum::{
    Router,
    routing::{get, patch, post},
};

use shared_database::DatabaseContext;

use crate::handlers;

pub fn appointment_routes(db: DatabaseContext) -> Router {
    Router::new()
        .route("/", post(handlers::create_appointment))
        .route("/range", get(handlers::get_appointments_by_date_range))
        .route("/status/{status}", get(handlers::get_appointments_by_status))
        .route("/patients/{patient_id}", get(handlers::get_patient_appointments))
        .route("/patients/{patient_id}/timeline", get(handlers::get_patient_timeline))
        .route("/providers/{provider_id}", get(handlers::get_provider_appointments))
        .route(
            "/{appointment_id}",
            get(handlers::get_appointment)
                .put(handlers::update_appointment)
                .delete(handlers::delete_appointment),
        )
        .route("/{appointment_id}/status", patch(handlers::update_appointment_status))
        .with_state(db)
}
