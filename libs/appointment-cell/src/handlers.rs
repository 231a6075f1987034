// libs/appointment-cell/src/handlers.rs
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};

use shared_database::DatabaseContext;
use shared_models::error::AppError;

use crate::models::{
    AppointmentStatus, AppointmentUpdate, DateRangeQuery, NewAppointment, UpdateStatusRequest,
};
use crate::services::AppointmentService;

fn list_body<T: serde::Serialize>(appointments: Vec<T>) -> Json<Value> {
    Json(json!({
        "total": appointments.len(),
        "appointments": appointments,
    }))
}

// ==============================================================================
// SINGLE APPOINTMENT HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn create_appointment(
    State(db): State<DatabaseContext>,
    Json(request): Json<NewAppointment>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let service = AppointmentService::new(db);

    let appointment = service.create_appointment(request).await?;

    Ok((StatusCode::CREATED, Json(json!(appointment))))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(db): State<DatabaseContext>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(db);

    let appointment = service
        .get_appointment(&appointment_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Appointment {} not found", appointment_id)))?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(db): State<DatabaseContext>,
    Path(appointment_id): Path<String>,
    Json(request): Json<AppointmentUpdate>,
) -> Result<StatusCode, AppError> {
    let service = AppointmentService::new(db);

    service.update_appointment(&appointment_id, request).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn update_appointment_status(
    State(db): State<DatabaseContext>,
    Path(appointment_id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<StatusCode, AppError> {
    let service = AppointmentService::new(db);

    service
        .update_appointment_status(&appointment_id, request.status)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(db): State<DatabaseContext>,
    Path(appointment_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let service = AppointmentService::new(db);

    service.delete_appointment(&appointment_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ==============================================================================
// LISTING HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_patient_appointments(
    State(db): State<DatabaseContext>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(db);

    let appointments = service.get_patient_appointments(&patient_id).await?;

    Ok(list_body(appointments))
}

#[axum::debug_handler]
pub async fn get_patient_timeline(
    State(db): State<DatabaseContext>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(db);

    let timeline = service
        .get_patient_appointment_timeline(&patient_id, Utc::now())
        .await?;

    Ok(Json(json!(timeline)))
}

#[axum::debug_handler]
pub async fn get_provider_appointments(
    State(db): State<DatabaseContext>,
    Path(provider_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(db);

    let appointments = service.get_provider_appointments(&provider_id).await?;

    Ok(list_body(appointments))
}

#[axum::debug_handler]
pub async fn get_appointments_by_date_range(
    State(db): State<DatabaseContext>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Json<Value>, AppError> {
    if range.start > range.end {
        return Err(AppError::BadRequest("start must not be after end".to_string()));
    }

    let service = AppointmentService::new(db);

    let appointments = service
        .get_appointments_by_date_range(range.start, range.end)
        .await?;

    Ok(list_body(appointments))
}

#[axum::debug_handler]
pub async fn get_appointments_by_status(
    State(db): State<DatabaseContext>,
    Path(status): Path<AppointmentStatus>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(db);

    let appointments = service.get_appointments_by_status(status).await?;

    Ok(list_body(appointments))
}
