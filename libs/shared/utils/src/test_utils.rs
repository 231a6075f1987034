use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::{DatabaseContext, MemoryStore, TableResolver};

pub struct TestConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub project_prefix: Option<String>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "test-anon-key".to_string(),
            project_prefix: Some(String::new()),
        }
    }
}

impl TestConfig {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            supabase_url: url.into(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_anon_key: self.supabase_anon_key.clone(),
            project_prefix: self.project_prefix.clone(),
            ..AppConfig::default()
        }
    }

    /// Context talking to `supabase_url`, typically a wiremock server.
    pub fn to_context(&self) -> DatabaseContext {
        DatabaseContext::from_config(&self.to_app_config())
    }
}

/// Context backed by `store` with unprefixed table names.
pub fn memory_context(store: Arc<MemoryStore>) -> DatabaseContext {
    DatabaseContext::new(store, TableResolver::with_prefix(""))
}

pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub struct MockSupabaseResponses;

impl MockSupabaseResponses {
    pub fn patient_response(patient_id: &str, first_name: &str, last_name: &str) -> Value {
        json!({
            "id": patient_id,
            "firstName": first_name,
            "lastName": last_name,
            "email": format!("{}@example.com", first_name.to_lowercase()),
            "phone": "555-0100",
            "dateOfBirth": "1990-01-01",
            "gender": "Other",
            "address": null,
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        })
    }

    pub fn provider_response(provider_id: &str, last_name: &str, specialty: &str) -> Value {
        json!({
            "id": provider_id,
            "firstName": "Sam",
            "lastName": last_name,
            "title": "Dr.",
            "specialty": specialty,
            "email": "provider@example.com",
            "phone": null,
            "licenseNumber": "MD123456",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        })
    }

    pub fn appointment_response(
        appointment_id: &str,
        patient_id: &str,
        provider_id: &str,
        appointment_date: DateTime<Utc>,
        status: &str,
    ) -> Value {
        json!({
            "id": appointment_id,
            "patientId": patient_id,
            "providerId": provider_id,
            "appointmentDate": timestamp(appointment_date),
            "duration": 30,
            "type": "consultation",
            "status": status,
            "notes": null,
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        })
    }

    pub fn prescription_response(prescription_id: &str, patient_id: &str, status: &str, created_at: &str) -> Value {
        json!({
            "id": prescription_id,
            "patientId": patient_id,
            "providerId": null,
            "medication": "Amoxicillin",
            "dosage": "500mg",
            "frequency": "3x daily",
            "status": status,
            "createdAt": created_at
        })
    }

    pub fn medical_record_response(record_id: &str, patient_id: &str, date: &str) -> Value {
        json!({
            "id": record_id,
            "patientId": patient_id,
            "providerId": null,
            "date": date,
            "recordType": "visit",
            "title": "Annual check-up",
            "description": null
        })
    }

    pub fn error_response(message: &str, code: &str) -> Value {
        json!({
            "message": message,
            "code": code
        })
    }

    pub fn random_id(prefix: &str) -> String {
        format!("{}-{}", prefix, Uuid::new_v4())
    }
}
