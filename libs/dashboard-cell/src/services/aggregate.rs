use tracing::debug;

use patient_cell::services::PatientService;
use provider_cell::services::ProviderService;
use shared_utils::fallback::Settle;

use crate::models::{PatientDashboard, ProviderDashboard};

/// Everything the patient dashboard shows, fetched concurrently.
///
/// Never fails: each part that errors is logged and replaced with its empty
/// value, so one unavailable table does not blank the whole page.
pub async fn load_patient_dashboard(service: &PatientService, patient_id: &str) -> PatientDashboard {
    debug!("Loading patient dashboard for: {}", patient_id);

    let (patient, appointments, prescriptions, medical_records) = futures::join!(
        service.get_patient(patient_id),
        service.get_patient_appointments(patient_id),
        service.get_patient_prescriptions(patient_id),
        service.get_patient_medical_records(patient_id),
    );

    PatientDashboard {
        patient: patient.settle("getPatient"),
        appointments: appointments.settle("getPatientAppointments"),
        prescriptions: prescriptions.settle("getPatientPrescriptions"),
        medical_records: medical_records.settle("getPatientMedicalRecords"),
        loading: false,
    }
}

pub async fn load_provider_dashboard(service: &ProviderService, provider_id: &str) -> ProviderDashboard {
    debug!("Loading provider dashboard for: {}", provider_id);

    let (provider, today_appointments, patients) = futures::join!(
        service.get_provider(provider_id),
        service.get_today_appointments(provider_id),
        service.get_provider_patients(provider_id),
    );

    ProviderDashboard {
        provider: provider.settle("getProvider"),
        today_appointments: today_appointments.settle("getTodayAppointments"),
        patients: patients.settle("getProviderPatients"),
        loading: false,
    }
}
