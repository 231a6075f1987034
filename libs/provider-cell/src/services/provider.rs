use std::collections::HashSet;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::{debug, info};

use appointment_cell::models::Appointment;
use appointment_cell::services::AppointmentService;
use patient_cell::models::Patient;
use shared_database::{
    decode_row, decode_rows, ensure_affected, touched_patch, DatabaseContext, Query, Table,
};
use shared_models::error::DataResult;

use crate::models::{NewProvider, Provider, ProviderUpdate};

pub struct ProviderService {
    db: DatabaseContext,
    appointments: AppointmentService,
}

impl ProviderService {
    pub fn new(db: DatabaseContext) -> Self {
        Self {
            appointments: AppointmentService::new(db.clone()),
            db,
        }
    }

    pub async fn get_provider(&self, provider_id: &str) -> DataResult<Option<Provider>> {
        debug!("Fetching provider: {}", provider_id);

        let rows = self
            .db
            .store()
            .select(&self.db.table(Table::Providers), &Query::by_id(provider_id))
            .await?;

        rows.into_iter().next().map(decode_row).transpose()
    }

    /// Appointments on the current UTC calendar day.
    pub async fn get_today_appointments(&self, provider_id: &str) -> DataResult<Vec<Appointment>> {
        self.get_appointments_for_day(provider_id, Utc::now().date_naive())
            .await
    }

    /// Appointments in `[day 00:00, next day 00:00)` UTC, earliest first.
    pub async fn get_appointments_for_day(
        &self,
        provider_id: &str,
        day: NaiveDate,
    ) -> DataResult<Vec<Appointment>> {
        let (start, end) = day_bounds(day);
        self.appointments
            .get_provider_appointments_between(provider_id, start, end)
            .await
    }

    /// Distinct patient ids across the provider's appointments, in first-seen order.
    pub async fn get_provider_patient_ids(&self, provider_id: &str) -> DataResult<Vec<String>> {
        debug!("Collecting patient ids for provider: {}", provider_id);

        let query = Query::new()
            .select(&["patientId"])
            .eq("providerId", provider_id);

        let rows = self
            .db
            .store()
            .select(&self.db.table(Table::Appointments), &query)
            .await?;

        let mut seen = HashSet::new();
        let ids = rows
            .iter()
            .filter_map(|row| row.get("patientId").and_then(|id| id.as_str()))
            .filter(|id| seen.insert(id.to_string()))
            .map(str::to_string)
            .collect();

        Ok(ids)
    }

    pub async fn get_provider_patients(&self, provider_id: &str) -> DataResult<Vec<Patient>> {
        let patient_ids = self.get_provider_patient_ids(provider_id).await?;

        if patient_ids.is_empty() {
            debug!("Provider {} has no appointments; skipping patient lookup", provider_id);
            return Ok(Vec::new());
        }

        let rows = self
            .db
            .store()
            .select(
                &self.db.table(Table::Patients),
                &Query::new().in_list("id", patient_ids),
            )
            .await?;

        decode_rows(rows)
    }

    pub async fn create_provider(&self, provider: NewProvider) -> DataResult<Provider> {
        debug!("Creating provider: {} {}", provider.first_name, provider.last_name);

        let row = serde_json::to_value(&provider)?;
        let stored = self
            .db
            .store()
            .insert(&self.db.table(Table::Providers), row)
            .await?;
        let created: Provider = decode_row(stored)?;

        info!("Provider created with ID: {}", created.id);
        Ok(created)
    }

    pub async fn update_provider(&self, provider_id: &str, update: ProviderUpdate) -> DataResult<()> {
        debug!("Updating provider: {}", provider_id);

        let table = self.db.table(Table::Providers);
        let patch = touched_patch(&update)?;
        let rows = self
            .db
            .store()
            .update(&table, &Query::by_id(provider_id), patch)
            .await?;

        ensure_affected(&rows, &table, provider_id)
    }

    pub async fn delete_provider(&self, provider_id: &str) -> DataResult<()> {
        debug!("Deleting provider: {}", provider_id);

        let table = self.db.table(Table::Providers);
        let rows = self
            .db
            .store()
            .delete(&table, &Query::by_id(provider_id))
            .await?;

        ensure_affected(&rows, &table, provider_id)
    }
}

fn day_bounds(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = day.and_time(chrono::NaiveTime::MIN).and_utc();
    (start, start + Duration::days(1))
}
