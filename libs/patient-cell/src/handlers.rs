// libs/patient-cell/src/handlers.rs
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_database::DatabaseContext;
use shared_models::error::AppError;

use crate::models::{NewPatient, PatientUpdate};
use crate::services::PatientService;

#[axum::debug_handler]
pub async fn create_patient(
    State(db): State<DatabaseContext>,
    Json(request): Json<NewPatient>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if request.first_name.trim().is_empty() || request.last_name.trim().is_empty() {
        return Err(AppError::BadRequest("firstName and lastName are required".to_string()));
    }

    let service = PatientService::new(db);

    let patient = service.create_patient(request).await?;

    Ok((StatusCode::CREATED, Json(json!(patient))))
}

#[axum::debug_handler]
pub async fn get_patient(
    State(db): State<DatabaseContext>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(db);

    let patient = service
        .get_patient(&patient_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Patient {} not found", patient_id)))?;

    Ok(Json(json!(patient)))
}

#[axum::debug_handler]
pub async fn update_patient(
    State(db): State<DatabaseContext>,
    Path(patient_id): Path<String>,
    Json(request): Json<PatientUpdate>,
) -> Result<StatusCode, AppError> {
    let service = PatientService::new(db);

    service.update_patient(&patient_id, request).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn delete_patient(
    State(db): State<DatabaseContext>,
    Path(patient_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let service = PatientService::new(db);

    service.delete_patient(&patient_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn get_patient_appointments(
    State(db): State<DatabaseContext>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(db);

    let appointments = service.get_patient_appointments(&patient_id).await?;

    Ok(Json(json!({
        "total": appointments.len(),
        "appointments": appointments,
    })))
}

#[axum::debug_handler]
pub async fn get_patient_prescriptions(
    State(db): State<DatabaseContext>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(db);

    let prescriptions = service.get_patient_prescriptions(&patient_id).await?;

    Ok(Json(json!({
        "total": prescriptions.len(),
        "prescriptions": prescriptions,
    })))
}

#[axum::debug_handler]
pub async fn get_patient_medical_records(
    State(db): State<DatabaseContext>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(db);

    let records = service.get_patient_medical_records(&patient_id).await?;

    Ok(Json(json!({
        "total": records.len(),
        "medicalRecords": records,
    })))
}
