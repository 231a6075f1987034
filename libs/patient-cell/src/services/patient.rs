use tracing::{debug, info};

use appointment_cell::models::Appointment;
use appointment_cell::services::AppointmentService;
use shared_database::{
    decode_row, decode_rows, ensure_affected, touched_patch, DatabaseContext, Direction, Query,
    Table,
};
use shared_models::error::DataResult;

use crate::models::{MedicalRecord, NewPatient, Patient, PatientUpdate, Prescription, PrescriptionStatus};

pub struct PatientService {
    db: DatabaseContext,
    appointments: AppointmentService,
}

impl PatientService {
    pub fn new(db: DatabaseContext) -> Self {
        Self {
            appointments: AppointmentService::new(db.clone()),
            db,
        }
    }

    pub async fn get_patient(&self, patient_id: &str) -> DataResult<Option<Patient>> {
        debug!("Fetching patient: {}", patient_id);

        let rows = self
            .db
            .store()
            .select(&self.db.table(Table::Patients), &Query::by_id(patient_id))
            .await?;

        rows.into_iter().next().map(decode_row).transpose()
    }

    pub async fn get_patient_appointments(&self, patient_id: &str) -> DataResult<Vec<Appointment>> {
        self.appointments.get_patient_appointments(patient_id).await
    }

    /// Active prescriptions, most recent first.
    pub async fn get_patient_prescriptions(&self, patient_id: &str) -> DataResult<Vec<Prescription>> {
        debug!("Fetching active prescriptions for patient: {}", patient_id);

        let query = Query::new()
            .eq("patientId", patient_id)
            .eq("status", PrescriptionStatus::Active.as_str())
            .order_by("createdAt", Direction::Descending);

        let rows = self
            .db
            .store()
            .select(&self.db.table(Table::Prescriptions), &query)
            .await?;

        decode_rows(rows)
    }

    /// Medical records, most recent first.
    pub async fn get_patient_medical_records(&self, patient_id: &str) -> DataResult<Vec<MedicalRecord>> {
        debug!("Fetching medical records for patient: {}", patient_id);

        let query = Query::new()
            .eq("patientId", patient_id)
            .order_by("date", Direction::Descending);

        let rows = self
            .db
            .store()
            .select(&self.db.table(Table::MedicalRecords), &query)
            .await?;

        decode_rows(rows)
    }

    pub async fn create_patient(&self, patient: NewPatient) -> DataResult<Patient> {
        debug!("Creating patient: {} {}", patient.first_name, patient.last_name);

        let row = serde_json::to_value(&patient)?;
        let stored = self
            .db
            .store()
            .insert(&self.db.table(Table::Patients), row)
            .await?;
        let created: Patient = decode_row(stored)?;

        info!("Patient created with ID: {}", created.id);
        Ok(created)
    }

    pub async fn update_patient(&self, patient_id: &str, update: PatientUpdate) -> DataResult<()> {
        debug!("Updating patient: {}", patient_id);

        let table = self.db.table(Table::Patients);
        let patch = touched_patch(&update)?;
        let rows = self
            .db
            .store()
            .update(&table, &Query::by_id(patient_id), patch)
            .await?;

        ensure_affected(&rows, &table, patient_id)
    }

    pub async fn delete_patient(&self, patient_id: &str) -> DataResult<()> {
        debug!("Deleting patient: {}", patient_id);

        let table = self.db.table(Table::Patients);
        let rows = self
            .db
            .store()
            .delete(&table, &Query::by_id(patient_id))
            .await?;

        ensure_affected(&rows, &table, patient_id)
    }
}
