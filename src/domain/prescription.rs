//! Prescription and medication domain models

use super::ids::{Entity, EntityKind};
use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default validity window in days
pub const DEFAULT_VALIDITY_DAYS: i32 = 30;

/// A single medication line on a prescription
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,

    pub dosage: String,

    pub frequency: String,

    /// Must be positive
    pub duration_days: i32,

    #[serde(default)]
    pub instructions: Option<String>,
}

impl Medication {
    pub fn new(
        name: impl Into<String>,
        dosage: impl Into<String>,
        frequency: impl Into<String>,
        duration_days: i32,
    ) -> Self {
        Self {
            name: name.into(),
            dosage: dosage.into(),
            frequency: frequency.into(),
            duration_days,
            instructions: None,
        }
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }
}

impl fmt::Display for Medication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Medication{{medicine='{}', dosage='{}', frequency='{}', duration={} days}}",
            self.name, self.dosage, self.frequency, self.duration_days
        )
    }
}

/// A prescription issued by a doctor to a patient
///
/// Medications are kept in the order they were added.
///
/// # Examples
///
/// ```
/// use clinica::domain::Prescription;
/// use chrono::NaiveDate;
///
/// let issued = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// let prescription = Prescription::new("PAT001", "DOC001", "Hypertension")
///     .with_prescription_date(issued);
///
/// assert_eq!(prescription.expiry_date(), NaiveDate::from_ymd_opt(2026, 1, 31));
/// assert!(prescription.is_valid_on(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()));
/// assert!(!prescription.is_valid_on(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prescription {
    /// Prescription id (blank until created)
    #[serde(default)]
    pub id: String,

    pub patient_id: String,

    pub doctor_id: String,

    /// Not cross-checked against stored appointments
    #[serde(default)]
    pub appointment_id: Option<String>,

    /// Start of the validity window, stamped on creation when unset
    #[serde(default)]
    pub prescription_date: Option<NaiveDate>,

    #[serde(default)]
    pub medications: Vec<Medication>,

    pub diagnosis: String,

    #[serde(default)]
    pub instructions: Option<String>,

    /// Must be positive
    #[serde(default = "default_validity_days")]
    pub validity_days: i32,
}

fn default_validity_days() -> i32 {
    DEFAULT_VALIDITY_DAYS
}

impl Prescription {
    /// Creates an undated prescription with the default validity window
    pub fn new(
        patient_id: impl Into<String>,
        doctor_id: impl Into<String>,
        diagnosis: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            patient_id: patient_id.into(),
            doctor_id: doctor_id.into(),
            appointment_id: None,
            prescription_date: None,
            medications: Vec::new(),
            diagnosis: diagnosis.into(),
            instructions: None,
            validity_days: DEFAULT_VALIDITY_DAYS,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_appointment_id(mut self, appointment_id: impl Into<String>) -> Self {
        self.appointment_id = Some(appointment_id.into());
        self
    }

    pub fn with_prescription_date(mut self, date: NaiveDate) -> Self {
        self.prescription_date = Some(date);
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    pub fn with_validity_days(mut self, days: i32) -> Self {
        self.validity_days = days;
        self
    }

    pub fn with_medication(mut self, medication: Medication) -> Self {
        self.medications.push(medication);
        self
    }

    /// `prescription_date + validity_days`, or `None` while undated
    pub fn expiry_date(&self) -> Option<NaiveDate> {
        self.prescription_date.map(|start| self.expiry_from(start))
    }

    /// Saturates at the calendar bounds; a negative window yields the
    /// start date shifted backwards.
    fn expiry_from(&self, start: NaiveDate) -> NaiveDate {
        let days = Days::new(u64::from(self.validity_days.unsigned_abs()));
        let shifted = if self.validity_days >= 0 {
            start.checked_add_days(days)
        } else {
            start.checked_sub_days(days)
        };
        shifted.unwrap_or(if self.validity_days >= 0 {
            NaiveDate::MAX
        } else {
            NaiveDate::MIN
        })
    }

    /// Valid iff `today` is on or before the expiry day
    ///
    /// An undated prescription is treated as issued on `today`.
    pub fn is_valid_on(&self, today: NaiveDate) -> bool {
        today <= self.expiry_from(self.prescription_date.unwrap_or(today))
    }

    /// Validity as of the local calendar date
    pub fn is_valid(&self) -> bool {
        self.is_valid_on(Local::now().date_naive())
    }
}

impl Entity for Prescription {
    const KIND: EntityKind = EntityKind::Prescription;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl fmt::Display for Prescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Prescription{{id='{}', patientId='{}', doctorId='{}', date={}, diagnosis='{}', medications={}, expires={}}}",
            self.id,
            self.patient_id,
            self.doctor_id,
            format_optional_date(self.prescription_date),
            self.diagnosis,
            self.medications.len(),
            format_optional_date(self.expiry_date())
        )
    }
}

fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "-".to_string(), crate::core::dates::format_date)
}
