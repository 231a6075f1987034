// libs/patient-cell/src/router.rs
use axum::{
    Router,
    routing::{get, post},
};

use shared_database::DatabaseContext;

use crate::handlers;

pub fn patient_routes(db: DatabaseContext) -> Router {
    Router::new()
        .route("/", post(handlers::create_patient))
        .route(
            "/{patient_id}",
            get(handlers::get_patient)
                .put(handlers::update_patient)
                .delete(handlers::delete_patient),
        )
        .route("/{patient_id}/appointments", get(handlers::get_patient_appointments))
        .route("/{patient_id}/prescriptions", get(handlers::get_patient_prescriptions))
        .route("/{patient_id}/medical-records", get(handlers::get_patient_medical_records))
        .with_state(db)
}
