use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Notify;
use tokio::time::timeout;

use dashboard_cell::models::{PatientDashboard, ProviderDashboard, ViewState};
use dashboard_cell::services::{DashboardLoader, DataHook, PatientDataHook};
use shared_database::{MemoryStore, StoreOperation};
use shared_utils::test_utils::{memory_context, MockSupabaseResponses};

/// Loader that blocks until released, so the in-between state is observable.
struct GatedLoader {
    gate: Arc<Notify>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl DashboardLoader for GatedLoader {
    type State = ProviderDashboard;

    async fn load(&self, provider_id: &str) -> ProviderDashboard {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;

        let mut dashboard = ProviderDashboard::pending();
        dashboard.provider = Some(
            serde_json::from_value(json!({
                "id": provider_id,
                "firstName": "Sam",
                "lastName": "Okafor"
            }))
            .unwrap(),
        );
        dashboard
    }
}

fn gated_hook() -> (Arc<DataHook<GatedLoader>>, Arc<Notify>, Arc<AtomicUsize>) {
    let gate = Arc::new(Notify::new());
    let calls = Arc::new(AtomicUsize::new(0));
    let hook = Arc::new(DataHook::new(GatedLoader {
        gate: gate.clone(),
        calls: calls.clone(),
    }));
    (hook, gate, calls)
}

#[tokio::test]
async fn test_initial_state_is_loading() {
    let (hook, _, calls) = gated_hook();

    assert!(hook.current().is_loading());
    assert!(hook.key().await.is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_load_publishes_loading_then_result() {
    let (hook, gate, _) = gated_hook();
    let mut receiver = hook.subscribe();

    let task = {
        let hook = hook.clone();
        tokio::spawn(async move { hook.load("pr1").await })
    };

    receiver.changed().await.unwrap();
    assert!(receiver.borrow_and_update().is_loading());

    gate.notify_one();
    assert!(task.await.unwrap());

    let state = hook.current();
    assert!(!state.is_loading());
    assert_eq!(state.provider.unwrap().id, "pr1");
}

#[tokio::test]
async fn test_same_key_is_not_reloaded() {
    let (hook, gate, calls) = gated_hook();

    gate.notify_one();
    assert!(hook.load("pr1").await);
    assert!(!hook.load("pr1").await);

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(hook.key().await.as_deref(), Some("pr1"));
}

#[tokio::test]
async fn test_empty_key_is_ignored() {
    let (hook, _, calls) = gated_hook();

    assert!(!hook.load("").await);

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(hook.current().is_loading());
    assert!(hook.key().await.is_none());
}

#[tokio::test]
async fn test_dropped_subscribers_do_not_break_publishing() {
    let (hook, gate, _) = gated_hook();
    drop(hook.subscribe());

    gate.notify_one();
    assert!(hook.load("pr1").await);
    assert!(!hook.current().is_loading());
}

#[tokio::test]
async fn test_patient_hook_recomputes_on_key_change() {
    let store = Arc::new(MemoryStore::new());
    store
        .seed(
            "patients",
            vec![
                MockSupabaseResponses::patient_response("p1", "Ada", "Lovelace"),
                MockSupabaseResponses::patient_response("p2", "Alan", "Turing"),
            ],
        )
        .await;

    let hook = PatientDataHook::for_patients(memory_context(store.clone()));

    assert!(hook.load("p1").await);
    let first: PatientDashboard = hook.current();
    assert_eq!(first.patient.unwrap().last_name, "Lovelace");

    assert!(!hook.load("p1").await);
    assert_eq!(store.call_count(StoreOperation::Select, "patients").await, 1);

    assert!(hook.load("p2").await);
    let second = hook.current();
    assert!(!second.loading);
    assert_eq!(second.patient.unwrap().last_name, "Turing");
    assert_eq!(store.call_count(StoreOperation::Select, "patients").await, 2);
}

#[tokio::test]
async fn test_cancelled_load_can_be_retried_with_same_key() {
    let (hook, gate, calls) = gated_hook();

    let cancelled = timeout(Duration::from_millis(50), hook.load("pr1")).await;
    assert!(cancelled.is_err());
    assert!(hook.key().await.is_none());

    gate.notify_one();
    assert!(hook.load("pr1").await);

    let state = hook.current();
    assert!(!state.is_loading());
    assert_eq!(state.provider.unwrap().id, "pr1");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_cancelled_switch_keeps_previous_dashboard() {
    let (hook, gate, _) = gated_hook();

    gate.notify_one();
    assert!(hook.load("pr1").await);

    let cancelled = timeout(Duration::from_millis(50), hook.load("pr2")).await;
    assert!(cancelled.is_err());

    let state = hook.current();
    assert!(!state.is_loading());
    assert_eq!(state.provider.unwrap().id, "pr1");
    assert_eq!(hook.key().await.as_deref(), Some("pr1"));

    gate.notify_one();
    assert!(hook.load("pr2").await);
    assert_eq!(hook.current().provider.unwrap().id, "pr2");
}
