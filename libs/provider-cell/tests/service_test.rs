use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{Duration, NaiveDate, TimeZone, Utc};

use provider_cell::models::{NewProvider, ProviderUpdate};
use provider_cell::services::ProviderService;
use shared_database::{MemoryStore, StoreOperation};
use shared_models::error::DataError;
use shared_utils::fallback::{Settle, SettleFlag};
use shared_utils::test_utils::{memory_context, MockSupabaseResponses};

fn setup() -> (Arc<MemoryStore>, ProviderService) {
    let store = Arc::new(MemoryStore::new());
    let service = ProviderService::new(memory_context(store.clone()));
    (store, service)
}

#[tokio::test]
async fn test_get_provider() {
    let (store, service) = setup();
    store
        .seed("providers", vec![MockSupabaseResponses::provider_response("pr1", "Okafor", "Cardiology")])
        .await;

    let provider = service.get_provider("pr1").await.unwrap().unwrap();
    assert_eq!(provider.specialty.as_deref(), Some("Cardiology"));
    assert!(service.get_provider("pr2").await.unwrap().is_none());
}

#[tokio::test]
async fn test_day_range_excludes_neighbouring_days() {
    let (store, service) = setup();
    let day = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    let midnight = Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap();

    store
        .seed(
            "appointments",
            vec![
                MockSupabaseResponses::appointment_response("late", "p1", "pr1", midnight + Duration::hours(17), "scheduled"),
                MockSupabaseResponses::appointment_response("midnight", "p2", "pr1", midnight, "scheduled"),
                MockSupabaseResponses::appointment_response("yesterday", "p1", "pr1", midnight - Duration::seconds(1), "completed"),
                MockSupabaseResponses::appointment_response("tomorrow", "p1", "pr1", midnight + Duration::days(1), "scheduled"),
                MockSupabaseResponses::appointment_response("other", "p1", "pr2", midnight + Duration::hours(9), "scheduled"),
            ],
        )
        .await;

    let appointments = service.get_appointments_for_day("pr1", day).await.unwrap();
    let ids: Vec<&str> = appointments.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["midnight", "late"]);
}

#[tokio::test]
async fn test_tomorrows_appointment_is_not_today() {
    let (store, service) = setup();
    let tomorrow = Utc::now().date_naive().succ_opt().unwrap();
    let tomorrow_noon = tomorrow.and_hms_opt(12, 0, 0).unwrap().and_utc();

    store
        .seed(
            "appointments",
            vec![MockSupabaseResponses::appointment_response("a1", "p1", "pr1", tomorrow_noon, "scheduled")],
        )
        .await;

    assert!(service.get_today_appointments("pr1").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_patient_set_is_deduplicated() {
    let (store, service) = setup();
    let now = Utc::now();

    store
        .seed(
            "appointments",
            vec![
                MockSupabaseResponses::appointment_response("a1", "p1", "pr1", now, "scheduled"),
                MockSupabaseResponses::appointment_response("a2", "p1", "pr1", now + Duration::days(3), "scheduled"),
                MockSupabaseResponses::appointment_response("a3", "p2", "pr1", now + Duration::days(4), "scheduled"),
                MockSupabaseResponses::appointment_response("a4", "p3", "pr2", now, "scheduled"),
            ],
        )
        .await;
    store
        .seed(
            "patients",
            vec![
                MockSupabaseResponses::patient_response("p1", "Ada", "Lovelace"),
                MockSupabaseResponses::patient_response("p2", "Alan", "Turing"),
                MockSupabaseResponses::patient_response("p3", "Edsger", "Dijkstra"),
            ],
        )
        .await;

    let ids = service.get_provider_patient_ids("pr1").await.unwrap();
    assert_eq!(ids, vec!["p1".to_string(), "p2".to_string()]);

    let patients = service.get_provider_patients("pr1").await.unwrap();
    let mut patient_ids: Vec<&str> = patients.iter().map(|p| p.id.as_str()).collect();
    patient_ids.sort();
    assert_eq!(patient_ids, vec!["p1", "p2"]);
}

#[tokio::test]
async fn test_no_appointments_skips_patient_lookup() {
    let (store, service) = setup();

    let patients = service.get_provider_patients("pr-idle").await.unwrap();

    assert!(patients.is_empty());
    assert_eq!(store.call_count(StoreOperation::Select, "appointments").await, 1);
    assert_eq!(store.call_count(StoreOperation::Select, "patients").await, 0);
}

#[tokio::test]
async fn test_patient_lookup_failure_settles_to_empty() {
    let (store, service) = setup();
    store
        .seed(
            "appointments",
            vec![MockSupabaseResponses::appointment_response("a1", "p1", "pr1", Utc::now(), "scheduled")],
        )
        .await;
    store
        .fail_table("patients", DataError::Transport("connection reset".to_string()))
        .await;

    let result = service.get_provider_patients("pr1").await;
    assert_matches!(result, Err(DataError::Transport(_)));
    assert!(result.settle("getProviderPatients").is_empty());
}

#[tokio::test]
async fn test_provider_lifecycle() {
    let (_, service) = setup();

    let created = service
        .create_provider(NewProvider {
            first_name: "Sam".to_string(),
            last_name: "Okafor".to_string(),
            title: Some("Dr.".to_string()),
            specialty: Some("Cardiology".to_string()),
            email: None,
            phone: None,
            license_number: None,
        })
        .await
        .unwrap();

    service
        .update_provider(
            &created.id,
            ProviderUpdate {
                specialty: Some("Internal Medicine".to_string()),
                ..ProviderUpdate::default()
            },
        )
        .await
        .unwrap();

    let updated = service.get_provider(&created.id).await.unwrap().unwrap();
    assert_eq!(updated.specialty.as_deref(), Some("Internal Medicine"));
    assert_eq!(updated.created_at, created.created_at);

    service.delete_provider(&created.id).await.unwrap();
    let err = service.delete_provider(&created.id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_mutations_settle_to_success_flags() {
    let (store, service) = setup();
    store
        .seed("providers", vec![MockSupabaseResponses::provider_response("pr1", "Okafor", "Cardiology")])
        .await;

    let phone = ProviderUpdate {
        phone: Some("555-0110".to_string()),
        ..ProviderUpdate::default()
    };
    assert!(service.update_provider("pr1", phone.clone()).await.succeeded("updateProvider"));
    assert!(!service.update_provider("pr9", phone).await.succeeded("updateProvider"));
    assert!(service.delete_provider("pr1").await.succeeded("deleteProvider"));
}
