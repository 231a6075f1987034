// libs/provider-cell/src/handlers.rs
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_database::DatabaseContext;
use shared_models::error::AppError;

use crate::models::{NewProvider, ProviderUpdate};
use crate::services::ProviderService;

// ==============================================================================
// PROFILE HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn create_provider(
    State(db): State<DatabaseContext>,
    Json(request): Json<NewProvider>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if request.first_name.trim().is_empty() || request.last_name.trim().is_empty() {
        return Err(AppError::BadRequest("firstName and lastName are required".to_string()));
    }

    let service = ProviderService::new(db);

    let provider = service.create_provider(request).await?;

    Ok((StatusCode::CREATED, Json(json!(provider))))
}

#[axum::debug_handler]
pub async fn get_provider(
    State(db): State<DatabaseContext>,
    Path(provider_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = ProviderService::new(db);

    let provider = service
        .get_provider(&provider_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Provider {} not found", provider_id)))?;

    Ok(Json(json!(provider)))
}

#[axum::debug_handler]
pub async fn update_provider(
    State(db): State<DatabaseContext>,
    Path(provider_id): Path<String>,
    Json(request): Json<ProviderUpdate>,
) -> Result<StatusCode, AppError> {
    let service = ProviderService::new(db);

    service.update_provider(&provider_id, request).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn delete_provider(
    State(db): State<DatabaseContext>,
    Path(provider_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let service = ProviderService::new(db);

    service.delete_provider(&provider_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ==============================================================================
// SCHEDULE AND PANEL HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_today_appointments(
    State(db): State<DatabaseContext>,
    Path(provider_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = ProviderService::new(db);

    let appointments = service.get_today_appointments(&provider_id).await?;

    Ok(Json(json!({
        "total": appointments.len(),
        "appointments": appointments,
    })))
}

#[axum::debug_handler]
pub async fn get_provider_patients(
    State(db): State<DatabaseContext>,
    Path(provider_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = ProviderService::new(db);

    let patients = service.get_provider_patients(&provider_id).await?;

    Ok(Json(json!({
        "total": patients.len(),
        "patients": patients,
    })))
}
