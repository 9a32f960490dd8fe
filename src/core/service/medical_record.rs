//! Medical records

use super::{assign_unique_id, DoctorService, PatientService};
use crate::adapters::repository::{MedicalRecordQueries, Repository};
use crate::core::clock::Clock;
use crate::core::validation;
use crate::domain::errors::ClinicError;
use crate::domain::ids::{EntityKind, IdGenerator};
use crate::domain::{MedicalRecord, Result};
use std::sync::Arc;

/// Creates, reads, updates and deletes medical records
///
/// Records have no lifecycle; their creation time is fixed once stored.
#[derive(Clone)]
pub struct MedicalRecordService {
    repository: Arc<dyn Repository<MedicalRecord>>,
    patients: PatientService,
    doctors: DoctorService,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl MedicalRecordService {
    pub fn new(
        repository: Arc<dyn Repository<MedicalRecord>>,
        patients: PatientService,
        doctors: DoctorService,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            patients,
            doctors,
            ids,
            clock,
        }
    }

    /// Create a new medical record stamped with the current time
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::InvalidData`] if a required field is blank, the
    /// patient or doctor does not exist, or a record with the same id already
    /// exists.
    pub fn create_medical_record(&self, mut record: MedicalRecord) -> Result<MedicalRecord> {
        self.check_new_record(&record)
            .inspect_err(|e| crate::log_rule_violation!(EntityKind::MedicalRecord, e))?;

        assign_unique_id(&mut record, self.ids.as_ref(), self.repository.as_ref())?;
        record.record_date_time = self.clock.now();

        let saved = self.repository.save(record)?;
        crate::log_entity_saved!(EntityKind::MedicalRecord, saved.id, "created");
        Ok(saved)
    }

    fn check_new_record(&self, record: &MedicalRecord) -> Result<()> {
        validate_medical_record(record)?;

        if !self.patients.patient_exists(&record.patient_id) {
            return Err(ClinicError::invalid(format!(
                "Patient not found with ID: {}",
                record.patient_id
            )));
        }
        if !self.doctors.doctor_exists(&record.doctor_id) {
            return Err(ClinicError::invalid(format!(
                "Doctor not found with ID: {}",
                record.doctor_id
            )));
        }
        Ok(())
    }

    /// Look a record up by id
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::InvalidData`] for a blank id and
    /// [`ClinicError::MedicalRecordNotFound`] if no record has that id.
    pub fn get_medical_record_by_id(&self, record_id: &str) -> Result<MedicalRecord> {
        validation::validate_not_empty(record_id, "Record ID")?;
        self.repository
            .find_by_id(record_id)?
            .ok_or_else(|| not_found(record_id))
    }

    pub fn get_all_medical_records(&self) -> Result<Vec<MedicalRecord>> {
        self.repository.find_all()
    }

    /// A patient's records, newest first
    pub fn get_medical_records_by_patient(&self, patient_id: &str) -> Result<Vec<MedicalRecord>> {
        validation::validate_not_empty(patient_id, "Patient ID")?;
        self.repository.find_by_patient_id(patient_id)
    }

    pub fn get_medical_records_by_doctor(&self, doctor_id: &str) -> Result<Vec<MedicalRecord>> {
        validation::validate_not_empty(doctor_id, "Doctor ID")?;
        self.repository.find_by_doctor_id(doctor_id)
    }

    /// The record written for an appointment, if there is one
    pub fn get_medical_record_by_appointment(
        &self,
        appointment_id: &str,
    ) -> Result<Option<MedicalRecord>> {
        validation::validate_not_empty(appointment_id, "Appointment ID")?;
        self.repository.find_by_appointment_id(appointment_id)
    }

    /// Replace a record's contents
    ///
    /// The stored id and creation time are kept, whatever `updated` carries.
    pub fn update_medical_record(
        &self,
        record_id: &str,
        mut updated: MedicalRecord,
    ) -> Result<MedicalRecord> {
        validation::validate_not_empty(record_id, "Record ID")?;
        let existing = self.get_medical_record_by_id(record_id)?;

        validate_medical_record(&updated)
            .inspect_err(|e| crate::log_rule_violation!(EntityKind::MedicalRecord, e))?;

        updated.id = existing.id;
        updated.record_date_time = existing.record_date_time;

        let saved = self.repository.save(updated)?;
        crate::log_entity_saved!(EntityKind::MedicalRecord, saved.id, "updated");
        Ok(saved)
    }

    pub fn delete_medical_record(&self, record_id: &str) -> Result<()> {
        validation::validate_not_empty(record_id, "Record ID")?;
        if !self.repository.exists_by_id(record_id)? {
            return Err(not_found(record_id));
        }
        self.repository.delete_by_id(record_id)?;
        tracing::info!(id = %record_id, "Medical record deleted");
        Ok(())
    }

    pub fn get_total_record_count(&self) -> Result<usize> {
        self.repository.count()
    }
}

fn not_found(record_id: &str) -> ClinicError {
    ClinicError::MedicalRecordNotFound(format!("Medical record not found with ID: {}", record_id))
}

fn validate_medical_record(record: &MedicalRecord) -> Result<()> {
    validation::validate_not_empty(&record.patient_id, "Patient ID")?;
    validation::validate_not_empty(&record.doctor_id, "Doctor ID")?;
    validation::validate_not_empty(&record.chief_complaint, "Chief complaint")?;
    validation::validate_not_empty(&record.diagnosis, "Diagnosis")?;
    Ok(())
}
