pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::*;
pub use router::{dashboard_routes, DashboardState};
pub use services::{
    load_patient_dashboard, load_provider_dashboard, DashboardLoader, DataHook, PatientDataHook, ProviderDataHook,
};
