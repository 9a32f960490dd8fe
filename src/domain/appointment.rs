//! Appointment domain model and status enumeration

use super::ids::{Entity, EntityKind};
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default appointment length in minutes
pub const DEFAULT_DURATION_MINUTES: i32 = 30;

/// Lifecycle status of an appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    /// Initial status of every scheduled or rescheduled appointment
    #[default]
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    /// All statuses, in declaration order
    pub const ALL: [AppointmentStatus; 5] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::NoShow,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "SCHEDULED",
            AppointmentStatus::Confirmed => "CONFIRMED",
            AppointmentStatus::Completed => "COMPLETED",
            AppointmentStatus::Cancelled => "CANCELLED",
            AppointmentStatus::NoShow => "NO_SHOW",
        }
    }

    /// Statuses from which an appointment may not be rescheduled
    pub fn blocks_reschedule(self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled
        )
    }

    /// Statuses from which an appointment may not be cancelled
    pub fn blocks_cancel(self) -> bool {
        self == AppointmentStatus::Completed
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace([' ', '-'], "_");
        AppointmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "Invalid appointment status '{s}'. Must be one of: SCHEDULED, CONFIRMED, COMPLETED, CANCELLED, NO_SHOW"
                )
            })
    }
}

/// An appointment between a patient and a doctor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Appointment id (blank until scheduled)
    #[serde(default)]
    pub id: String,

    pub patient_id: String,

    pub doctor_id: String,

    pub date_time: NaiveDateTime,

    pub reason: String,

    #[serde(default)]
    pub status: AppointmentStatus,

    #[serde(default)]
    pub notes: Option<String>,

    /// Must be positive
    #[serde(default = "default_duration")]
    pub duration_minutes: i32,
}

fn default_duration() -> i32 {
    DEFAULT_DURATION_MINUTES
}

impl Appointment {
    /// Creates a scheduled, 30-minute appointment with a blank id
    pub fn new(
        patient_id: impl Into<String>,
        doctor_id: impl Into<String>,
        date_time: NaiveDateTime,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            patient_id: patient_id.into(),
            doctor_id: doctor_id.into(),
            date_time,
            reason: reason.into(),
            status: AppointmentStatus::Scheduled,
            notes: None,
            duration_minutes: DEFAULT_DURATION_MINUTES,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_duration_minutes(mut self, minutes: i32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    /// True iff the appointment is strictly after `now` and still SCHEDULED
    ///
    /// CONFIRMED appointments are not upcoming under this definition.
    pub fn is_upcoming_at(&self, now: NaiveDateTime) -> bool {
        self.date_time > now && self.status == AppointmentStatus::Scheduled
    }

    /// True iff the appointment started strictly before `now`
    pub fn is_past_at(&self, now: NaiveDateTime) -> bool {
        self.date_time < now
    }

    /// Scheduled end of the appointment
    pub fn end_time(&self) -> NaiveDateTime {
        self.date_time + Duration::minutes(i64::from(self.duration_minutes))
    }
}

impl Entity for Appointment {
    const KIND: EntityKind = EntityKind::Appointment;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Appointment{{id='{}', patientId='{}', doctorId='{}', dateTime={}, reason='{}', status={}, duration={} minutes}}",
            self.id,
            self.patient_id,
            self.doctor_id,
            self.date_time.format(crate::core::dates::DATE_TIME_FORMAT),
            self.reason,
            self.status,
            self.duration_minutes
        )
    }
}
