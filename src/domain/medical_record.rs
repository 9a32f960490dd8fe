//! Medical record domain model

use super::ids::{Entity, EntityKind};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Notes taken during a single patient visit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalRecord {
    /// Record id (blank until created)
    #[serde(default)]
    pub id: String,

    pub patient_id: String,

    pub doctor_id: String,

    #[serde(default)]
    pub appointment_id: Option<String>,

    /// Creation time; stamped by the service and preserved on update
    pub record_date_time: NaiveDateTime,

    pub chief_complaint: String,

    pub diagnosis: String,

    #[serde(default)]
    pub treatment: String,

    #[serde(default)]
    pub vital_signs: Option<String>,

    #[serde(default)]
    pub lab_results: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub follow_up_instructions: Option<String>,
}

impl MedicalRecord {
    pub fn new(
        patient_id: impl Into<String>,
        doctor_id: impl Into<String>,
        chief_complaint: impl Into<String>,
        diagnosis: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            patient_id: patient_id.into(),
            doctor_id: doctor_id.into(),
            appointment_id: None,
            record_date_time: Local::now().naive_local(),
            chief_complaint: chief_complaint.into(),
            diagnosis: diagnosis.into(),
            treatment: String::new(),
            vital_signs: None,
            lab_results: None,
            notes: None,
            follow_up_instructions: None,
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

    pub fn with_treatment(mut self, treatment: impl Into<String>) -> Self {
        self.treatment = treatment.into();
        self
    }

    pub fn with_vital_signs(mut self, vital_signs: impl Into<String>) -> Self {
        self.vital_signs = Some(vital_signs.into());
        self
    }

    pub fn with_lab_results(mut self, lab_results: impl Into<String>) -> Self {
        self.lab_results = Some(lab_results.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_follow_up_instructions(mut self, follow_up: impl Into<String>) -> Self {
        self.follow_up_instructions = Some(follow_up.into());
        self
    }
}

impl Entity for MedicalRecord {
    const KIND: EntityKind = EntityKind::MedicalRecord;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl fmt::Display for MedicalRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MedicalRecord{{id='{}', patientId='{}', doctorId='{}', recorded={}, chiefComplaint='{}', diagnosis='{}'}}",
            self.id,
            self.patient_id,
            self.doctor_id,
            self.record_date_time
                .format(crate::core::dates::DATE_TIME_FORMAT),
            self.chief_complaint,
            self.diagnosis
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_default_to_none() {
        let record = MedicalRecord::new("PAT1", "DOC1", "Headache", "Migraine");
        assert!(record.appointment_id.is_none());
        assert!(record.vital_signs.is_none());
        assert!(record.treatment.is_empty());
    }

    #[test]
    fn test_display_mentions_complaint() {
        let record = MedicalRecord::new("PAT1", "DOC1", "Headache", "Migraine")
            .with_id("REC00000001")
            .with_treatment("Rest and fluids");
        let line = record.to_string();
        assert!(line.contains("REC00000001"));
        assert!(line.contains("Headache"));
    }
}
