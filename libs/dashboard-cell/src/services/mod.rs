pub mod aggregate;
pub mod hook;

pub use aggregate::{load_patient_dashboard, load_provider_dashboard};
pub use hook::{DashboardLoader, DataHook, PatientDashboardLoader, PatientDataHook, ProviderDashboardLoader, ProviderDataHook};
