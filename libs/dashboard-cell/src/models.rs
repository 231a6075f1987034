use serde::{Deserialize, Serialize};

use appointment_cell::models::Appointment;
use patient_cell::models::{MedicalRecord, Patient, Prescription};
use provider_cell::models::Provider;

/// View state published by a data hook. Starts out loading and flips to
/// loaded once the aggregate for the current key has settled.
pub trait ViewState: Clone + Send + Sync + 'static {
    fn pending() -> Self;

    fn is_loading(&self) -> bool;

    fn set_loading(&mut self, loading: bool);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientDashboard {
    pub patient: Option<Patient>,
    pub appointments: Vec<Appointment>,
    pub prescriptions: Vec<Prescription>,
    pub medical_records: Vec<MedicalRecord>,
    pub loading: bool,
}

impl ViewState for PatientDashboard {
    fn pending() -> Self {
        Self {
            patient: None,
            appointments: Vec::new(),
            prescriptions: Vec::new(),
            medical_records: Vec::new(),
            loading: true,
        }
    }

    fn is_loading(&self) -> bool {
        self.loading
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDashboard {
    pub provider: Option<Provider>,
    pub today_appointments: Vec<Appointment>,
    pub patients: Vec<Patient>,
    pub loading: bool,
}

impl ViewState for ProviderDashboard {
    fn pending() -> Self {
        Self {
            provider: None,
            today_appointments: Vec::new(),
            patients: Vec::new(),
            loading: true,
        }
    }

    fn is_loading(&self) -> bool {
        self.loading
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}
