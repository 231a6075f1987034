// libs/appointment-cell/src/models.rs
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub provider_id: String,
    pub appointment_date: DateTime<Utc>,
    /// Minutes.
    pub duration: i32,
    #[serde(rename = "type")]
    pub appointment_type: String,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    pub fn end_time(&self) -> DateTime<Utc> {
        self.appointment_date + Duration::minutes(self.duration as i64)
    }

    /// Still ahead of `now` and not yet completed or cancelled.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.appointment_date > now && self.status == AppointmentStatus::Scheduled
    }

    /// Already behind `now`, or completed early.
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.appointment_date < now || self.status == AppointmentStatus::Completed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// Whether moving from `self` to `next` follows the usual
    /// scheduled -> completed | cancelled flow. Writes are not checked
    /// against this; callers that want the guard apply it themselves.
    pub fn is_expected_transition(&self, next: AppointmentStatus) -> bool {
        match (self, next) {
            (current, next) if *current == next => true,
            (AppointmentStatus::Scheduled, AppointmentStatus::Completed) => true,
            (AppointmentStatus::Scheduled, AppointmentStatus::Cancelled) => true,
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

/// Insert payload; the store assigns `id`, `createdAt` and `updatedAt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub patient_id: String,
    pub provider_id: String,
    pub appointment_date: DateTime<Utc>,
    pub duration: i32,
    #[serde(rename = "type")]
    pub appointment_type: String,
    #[serde(default = "default_status")]
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn default_status() -> AppointmentStatus {
    AppointmentStatus::Scheduled
}

/// Partial update. `createdAt` is deliberately absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub appointment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl AppointmentUpdate {
    pub fn status(status: AppointmentStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRangeQuery {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A patient's appointments split the way the appointments page shows them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentTimeline {
    pub upcoming: Vec<Appointment>,
    pub past: Vec<Appointment>,
}

impl AppointmentTimeline {
    /// An appointment can land in both lists (completed ahead of its slot)
    /// or in neither (cancelled but still in the future).
    pub fn partition(appointments: &[Appointment], now: DateTime<Utc>) -> Self {
        Self {
            upcoming: appointments.iter().filter(|a| a.is_upcoming(now)).cloned().collect(),
            past: appointments.iter().filter(|a| a.is_past(now)).cloned().collect(),
        }
    }
}
