use std::sync::Arc;

use chrono::{Duration, Utc};

use dashboard_cell::services::{load_patient_dashboard, load_provider_dashboard};
use patient_cell::services::PatientService;
use provider_cell::services::ProviderService;
use shared_database::{MemoryStore, StoreOperation};
use shared_models::error::DataError;
use shared_utils::test_utils::{memory_context, MockSupabaseResponses};

async fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    let now = Utc::now();
    let today_noon = now.date_naive().and_hms_opt(12, 0, 0).unwrap().and_utc();

    store
        .seed(
            "patients",
            vec![
                MockSupabaseResponses::patient_response("p1", "Ada", "Lovelace"),
                MockSupabaseResponses::patient_response("p2", "Alan", "Turing"),
            ],
        )
        .await;
    store
        .seed("providers", vec![MockSupabaseResponses::provider_response("pr1", "Okafor", "Cardiology")])
        .await;
    store
        .seed(
            "appointments",
            vec![
                MockSupabaseResponses::appointment_response("a-today", "p1", "pr1", today_noon, "scheduled"),
                MockSupabaseResponses::appointment_response("a-tomorrow", "p1", "pr1", today_noon + Duration::days(1), "scheduled"),
                MockSupabaseResponses::appointment_response("a-past", "p2", "pr1", now - Duration::days(30), "completed"),
            ],
        )
        .await;
    store
        .seed(
            "prescriptions",
            vec![
                MockSupabaseResponses::prescription_response("rx1", "p1", "active", "2026-03-01T00:00:00Z"),
                MockSupabaseResponses::prescription_response("rx2", "p1", "completed", "2026-04-01T00:00:00Z"),
            ],
        )
        .await;
    store
        .seed("medical_records", vec![MockSupabaseResponses::medical_record_response("mr1", "p1", "2026-02-10")])
        .await;

    store
}

#[tokio::test]
async fn test_patient_dashboard_collects_every_part() {
    let store = seeded_store().await;
    let service = PatientService::new(memory_context(store));

    let dashboard = load_patient_dashboard(&service, "p1").await;

    assert!(!dashboard.loading);
    assert_eq!(dashboard.patient.unwrap().id, "p1");
    let ids: Vec<&str> = dashboard.appointments.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["a-today", "a-tomorrow"]);
    assert_eq!(dashboard.prescriptions.len(), 1);
    assert_eq!(dashboard.medical_records.len(), 1);
}

#[tokio::test]
async fn test_provider_dashboard_today_and_patients() {
    let store = seeded_store().await;
    let service = ProviderService::new(memory_context(store));

    let dashboard = load_provider_dashboard(&service, "pr1").await;

    assert!(!dashboard.loading);
    assert_eq!(dashboard.provider.unwrap().id, "pr1");
    let today: Vec<&str> = dashboard.today_appointments.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(today, vec!["a-today"]);

    let mut patients: Vec<&str> = dashboard.patients.iter().map(|p| p.id.as_str()).collect();
    patients.sort();
    assert_eq!(patients, vec!["p1", "p2"]);
}

#[tokio::test]
async fn test_partial_failure_still_resolves() {
    let store = seeded_store().await;
    store
        .fail_table("prescriptions", DataError::Transport("connection refused".to_string()))
        .await;
    let service = PatientService::new(memory_context(store));

    let dashboard = load_patient_dashboard(&service, "p1").await;

    assert!(!dashboard.loading);
    assert!(dashboard.patient.is_some());
    assert!(dashboard.prescriptions.is_empty());
    assert_eq!(dashboard.appointments.len(), 2);
}

#[tokio::test]
async fn test_total_outage_yields_empty_dashboard() {
    let store = seeded_store().await;
    store
        .fail_all(DataError::Backend {
            status: 500,
            message: "boom".to_string(),
        })
        .await;
    let service = ProviderService::new(memory_context(store.clone()));

    let dashboard = load_provider_dashboard(&service, "pr1").await;

    assert!(!dashboard.loading);
    assert!(dashboard.provider.is_none());
    assert!(dashboard.today_appointments.is_empty());
    assert!(dashboard.patients.is_empty());
    assert_eq!(store.call_count(StoreOperation::Select, "patients").await, 0);
}

#[tokio::test]
async fn test_unknown_provider_has_no_patients() {
    let store = seeded_store().await;
    let service = ProviderService::new(memory_context(store.clone()));

    let dashboard = load_provider_dashboard(&service, "pr-new").await;

    assert!(dashboard.provider.is_none());
    assert!(dashboard.patients.is_empty());
    assert_eq!(store.call_count(StoreOperation::Select, "patients").await, 0);
}
