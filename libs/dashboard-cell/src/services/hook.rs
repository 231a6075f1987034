use async_trait::async_trait;
use tokio::sync::{watch, Mutex};
use tracing::debug;

use patient_cell::services::PatientService;
use provider_cell::services::ProviderService;
use shared_database::DatabaseContext;

use crate::models::{PatientDashboard, ProviderDashboard, ViewState};
use crate::services::aggregate::{load_patient_dashboard, load_provider_dashboard};

#[async_trait]
pub trait DashboardLoader: Send + Sync {
    type State: ViewState;

    async fn load(&self, key: &str) -> Self::State;
}

pub struct PatientDashboardLoader {
    service: PatientService,
}

impl PatientDashboardLoader {
    pub fn new(db: DatabaseContext) -> Self {
        Self {
            service: PatientService::new(db),
        }
    }
}

#[async_trait]
impl DashboardLoader for PatientDashboardLoader {
    type State = PatientDashboard;

    async fn load(&self, patient_id: &str) -> PatientDashboard {
        load_patient_dashboard(&self.service, patient_id).await
    }
}

pub struct ProviderDashboardLoader {
    service: ProviderService,
}

impl ProviderDashboardLoader {
    pub fn new(db: DatabaseContext) -> Self {
        Self {
            service: ProviderService::new(db),
        }
    }
}

#[async_trait]
impl DashboardLoader for ProviderDashboardLoader {
    type State = ProviderDashboard;

    async fn load(&self, provider_id: &str) -> ProviderDashboard {
        load_provider_dashboard(&self.service, provider_id).await
    }
}

/// Keyed view-model that republishes its dashboard whenever the key changes.
///
/// Subscribers see `loading = true` first, then the settled dashboard.
/// Loads are serialized, so a slow load for an old key can never overwrite
/// the state of a newer one.
pub struct DataHook<L: DashboardLoader> {
    loader: L,
    key: Mutex<Option<String>>,
    state: watch::Sender<L::State>,
}

pub type PatientDataHook = DataHook<PatientDashboardLoader>;
pub type ProviderDataHook = DataHook<ProviderDashboardLoader>;

impl PatientDataHook {
    pub fn for_patients(db: DatabaseContext) -> Self {
        DataHook::new(PatientDashboardLoader::new(db))
    }
}

impl ProviderDataHook {
    pub fn for_providers(db: DatabaseContext) -> Self {
        DataHook::new(ProviderDashboardLoader::new(db))
    }
}

impl<L: DashboardLoader> DataHook<L> {
    pub fn new(loader: L) -> Self {
        let (state, _) = watch::channel(L::State::pending());
        Self {
            loader,
            key: Mutex::new(None),
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<L::State> {
        self.state.subscribe()
    }

    pub fn current(&self) -> L::State {
        self.state.borrow().clone()
    }

    pub async fn key(&self) -> Option<String> {
        self.key.lock().await.clone()
    }

    /// Points the hook at `key` and recomputes. Returns `false` when nothing
    /// was fetched: an empty key, or the key already loaded.
    ///
    /// The key is only committed once its dashboard has been published. A
    /// load dropped mid-flight restores the previous loading flag and leaves
    /// the key untouched, so the same key can be loaded again.
    pub async fn load(&self, key: &str) -> bool {
        if key.is_empty() {
            debug!("Ignoring empty dashboard key");
            return false;
        }

        let mut current = self.key.lock().await;
        if current.as_deref() == Some(key) {
            return false;
        }

        let pending = PendingLoad::start(&self.state);

        let mut next = self.loader.load(key).await;
        next.set_loading(false);
        pending.finish(next);

        *current = Some(key.to_string());
        true
    }
}

/// Publishes `loading = true` for the duration of one load and puts the
/// previous flag back if the load never finishes.
struct PendingLoad<'a, S: ViewState> {
    state: &'a watch::Sender<S>,
    was_loading: bool,
    finished: bool,
}

impl<'a, S: ViewState> PendingLoad<'a, S> {
    fn start(state: &'a watch::Sender<S>) -> Self {
        let was_loading = state.borrow().is_loading();
        // send_* on a watch sender succeeds even with no receivers left.
        state.send_modify(|state| state.set_loading(true));
        Self {
            state,
            was_loading,
            finished: false,
        }
    }

    fn finish(mut self, next: S) {
        self.state.send_replace(next);
        self.finished = true;
    }
}

impl<S: ViewState> Drop for PendingLoad<'_, S> {
    fn drop(&mut self) {
        if !self.finished {
            debug!("Dashboard load dropped before completion");
            let was_loading = self.was_loading;
            self.state.send_modify(|state| state.set_loading(was_loading));
        }
    }
}
