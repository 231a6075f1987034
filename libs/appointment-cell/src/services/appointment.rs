use chrono::{DateTime, Utc};
use tracing::{debug, info};

use shared_database::{
    decode_row, decode_rows, ensure_affected, timestamp_value, touched_patch, DatabaseContext,
    Direction, Query, Table,
};
use shared_models::error::DataResult;

use crate::models::{
    Appointment, AppointmentStatus, AppointmentTimeline, AppointmentUpdate, NewAppointment,
};

pub struct AppointmentService {
    db: DatabaseContext,
}

impl AppointmentService {
    pub fn new(db: DatabaseContext) -> Self {
        Self { db }
    }

    fn table(&self) -> String {
        self.db.table(Table::Appointments)
    }

    async fn list(&self, query: Query) -> DataResult<Vec<Appointment>> {
        let rows = self.db.store().select(&self.table(), &query).await?;
        decode_rows(rows)
    }

    /// Get a single appointment, `None` when no row has this id.
    pub async fn get_appointment(&self, appointment_id: &str) -> DataResult<Option<Appointment>> {
        debug!("Fetching appointment: {}", appointment_id);

        let rows = self
            .db
            .store()
            .select(&self.table(), &Query::by_id(appointment_id))
            .await?;

        rows.into_iter().next().map(decode_row).transpose()
    }

    /// All appointments for a patient, earliest first.
    pub async fn get_patient_appointments(&self, patient_id: &str) -> DataResult<Vec<Appointment>> {
        debug!("Fetching appointments for patient: {}", patient_id);

        self.list(
            Query::new()
                .eq("patientId", patient_id)
                .order_by("appointmentDate", Direction::Ascending),
        )
        .await
    }

    /// All appointments for a provider, earliest first.
    pub async fn get_provider_appointments(&self, provider_id: &str) -> DataResult<Vec<Appointment>> {
        debug!("Fetching appointments for provider: {}", provider_id);

        self.list(
            Query::new()
                .eq("providerId", provider_id)
                .order_by("appointmentDate", Direction::Ascending),
        )
        .await
    }

    /// A provider's appointments in `[start, end)`, earliest first.
    pub async fn get_provider_appointments_between(
        &self,
        provider_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DataResult<Vec<Appointment>> {
        debug!("Fetching appointments for provider {} between {} and {}", provider_id, start, end);

        self.list(
            Query::new()
                .eq("providerId", provider_id)
                .gte("appointmentDate", timestamp_value(&start))
                .lt("appointmentDate", timestamp_value(&end))
                .order_by("appointmentDate", Direction::Ascending),
        )
        .await
    }

    pub async fn create_appointment(&self, appointment: NewAppointment) -> DataResult<Appointment> {
        debug!(
            "Creating appointment for patient {} with provider {}",
            appointment.patient_id, appointment.provider_id
        );

        let row = serde_json::to_value(&appointment)?;
        let stored = self.db.store().insert(&self.table(), row).await?;
        let created: Appointment = decode_row(stored)?;

        info!("Appointment created with ID: {}", created.id);
        Ok(created)
    }

    /// Overwrites the status. Any status may replace any other.
    pub async fn update_appointment_status(
        &self,
        appointment_id: &str,
        status: AppointmentStatus,
    ) -> DataResult<()> {
        debug!("Setting appointment {} status to {}", appointment_id, status);

        self.update_appointment(appointment_id, AppointmentUpdate::status(status)).await
    }

    pub async fn update_appointment(
        &self,
        appointment_id: &str,
        update: AppointmentUpdate,
    ) -> DataResult<()> {
        debug!("Updating appointment: {}", appointment_id);

        let table = self.table();
        let patch = touched_patch(&update)?;
        let rows = self
            .db
            .store()
            .update(&table, &Query::by_id(appointment_id), patch)
            .await?;

        ensure_affected(&rows, &table, appointment_id)
    }

    pub async fn delete_appointment(&self, appointment_id: &str) -> DataResult<()> {
        debug!("Deleting appointment: {}", appointment_id);

        let table = self.table();
        let rows = self
            .db
            .store()
            .delete(&table, &Query::by_id(appointment_id))
            .await?;

        ensure_affected(&rows, &table, appointment_id)
    }

    /// Appointments in `[start, end]`, both bounds inclusive.
    pub async fn get_appointments_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DataResult<Vec<Appointment>> {
        debug!("Fetching appointments between {} and {}", start, end);

        self.list(
            Query::new()
                .gte("appointmentDate", timestamp_value(&start))
                .lte("appointmentDate", timestamp_value(&end))
                .order_by("appointmentDate", Direction::Ascending),
        )
        .await
    }

    pub async fn get_appointments_by_status(
        &self,
        status: AppointmentStatus,
    ) -> DataResult<Vec<Appointment>> {
        debug!("Fetching appointments with status: {}", status);

        self.list(
            Query::new()
                .eq("status", status.as_str())
                .order_by("appointmentDate", Direction::Ascending),
        )
        .await
    }

    pub async fn get_patient_appointment_timeline(
        &self,
        patient_id: &str,
        now: DateTime<Utc>,
    ) -> DataResult<AppointmentTimeline> {
        let appointments = self.get_patient_appointments(patient_id).await?;
        Ok(AppointmentTimeline::partition(&appointments, now))
    }
}
