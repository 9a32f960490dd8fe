//! Prescriptions and their medications

use super::{assign_unique_id, DoctorService, PatientService};
use crate::adapters::repository::{PrescriptionQueries, Repository};
use crate::core::clock::Clock;
use crate::core::validation;
use crate::domain::errors::ClinicError;
use crate::domain::ids::{EntityKind, IdGenerator};
use crate::domain::{Medication, Prescription, Result};
use std::sync::Arc;

/// Issues prescriptions and appends medications to them
#[derive(Clone)]
pub struct PrescriptionService {
    repository: Arc<dyn Repository<Prescription>>,
    patients: PatientService,
    doctors: DoctorService,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl PrescriptionService {
    pub fn new(
        repository: Arc<dyn Repository<Prescription>>,
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

    /// Issue a new prescription
    ///
    /// The appointment id, if any, is stored as given and not checked.
    /// Medications already attached are validated like those added through
    /// [`PrescriptionService::add_medication`]. An undated prescription is
    /// dated today by the service clock.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::InvalidData`] if a field is invalid,
    /// `validity_days` is not positive, the patient or doctor does not
    /// exist, or a prescription with the same id already exists. Nothing is
    /// stored in that case.
    pub fn create_prescription(&self, mut prescription: Prescription) -> Result<Prescription> {
        self.check_new_prescription(&prescription)
            .inspect_err(|e| crate::log_rule_violation!(EntityKind::Prescription, e))?;

        assign_unique_id(&mut prescription, self.ids.as_ref(), self.repository.as_ref())?;
        if prescription.prescription_date.is_none() {
            prescription.prescription_date = Some(self.clock.today());
        }

        let saved = self.repository.save(prescription)?;
        crate::log_entity_saved!(EntityKind::Prescription, saved.id, "created");
        Ok(saved)
    }

    fn check_new_prescription(&self, prescription: &Prescription) -> Result<()> {
        validate_prescription(prescription)?;
        for medication in &prescription.medications {
            validate_medication(medication)?;
        }

        if !self.patients.patient_exists(&prescription.patient_id) {
            return Err(ClinicError::invalid(format!(
                "Patient not found with ID: {}",
                prescription.patient_id
            )));
        }
        if !self.doctors.doctor_exists(&prescription.doctor_id) {
            return Err(ClinicError::invalid(format!(
                "Doctor not found with ID: {}",
                prescription.doctor_id
            )));
        }
        Ok(())
    }

    /// Look a prescription up by id
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::InvalidData`] for a blank id and
    /// [`ClinicError::PrescriptionNotFound`] if no prescription has that id.
    pub fn get_prescription_by_id(&self, prescription_id: &str) -> Result<Prescription> {
        validation::validate_not_empty(prescription_id, "Prescription ID")?;
        self.repository
            .find_by_id(prescription_id)?
            .ok_or_else(|| not_found(prescription_id))
    }

    pub fn get_all_prescriptions(&self) -> Result<Vec<Prescription>> {
        self.repository.find_all()
    }

    pub fn get_prescriptions_by_patient(&self, patient_id: &str) -> Result<Vec<Prescription>> {
        validation::validate_not_empty(patient_id, "Patient ID")?;
        self.repository.find_by_patient_id(patient_id)
    }

    pub fn get_prescriptions_by_doctor(&self, doctor_id: &str) -> Result<Vec<Prescription>> {
        validation::validate_not_empty(doctor_id, "Doctor ID")?;
        self.repository.find_by_doctor_id(doctor_id)
    }

    /// Prescriptions still valid today
    ///
    /// Evaluated against the clock on every call.
    pub fn get_valid_prescriptions(&self) -> Result<Vec<Prescription>> {
        self.repository.find_valid(self.clock.today())
    }

    /// Returns true if `prescription` is still valid today
    pub fn is_valid(&self, prescription: &Prescription) -> bool {
        prescription.is_valid_on(self.clock.today())
    }

    /// Append a medication to an existing prescription
    ///
    /// Medications keep the order in which they were added.
    pub fn add_medication(
        &self,
        prescription_id: &str,
        medication: Medication,
    ) -> Result<Prescription> {
        let mut prescription = self.get_prescription_by_id(prescription_id)?;
        validate_medication(&medication)
            .inspect_err(|e| crate::log_rule_violation!(EntityKind::Prescription, e))?;

        prescription.medications.push(medication);

        let saved = self.repository.save(prescription)?;
        tracing::info!(
            id = %saved.id,
            medications = saved.medications.len(),
            "Medication added"
        );
        Ok(saved)
    }

    pub fn delete_prescription(&self, prescription_id: &str) -> Result<()> {
        validation::validate_not_empty(prescription_id, "Prescription ID")?;
        if !self.repository.exists_by_id(prescription_id)? {
            return Err(not_found(prescription_id));
        }
        self.repository.delete_by_id(prescription_id)?;
        tracing::info!(id = %prescription_id, "Prescription deleted");
        Ok(())
    }

    pub fn get_total_prescription_count(&self) -> Result<usize> {
        self.repository.count()
    }
}

fn not_found(prescription_id: &str) -> ClinicError {
    ClinicError::PrescriptionNotFound(format!(
        "Prescription not found with ID: {}",
        prescription_id
    ))
}

fn validate_prescription(prescription: &Prescription) -> Result<()> {
    validation::validate_not_empty(&prescription.patient_id, "Patient ID")?;
    validation::validate_not_empty(&prescription.doctor_id, "Doctor ID")?;
    validation::validate_not_empty(&prescription.diagnosis, "Diagnosis")?;
    validation::validate_positive(prescription.validity_days, "Validity days")?;
    Ok(())
}

fn validate_medication(medication: &Medication) -> Result<()> {
    validation::validate_not_empty(&medication.name, "Medicine name")?;
    validation::validate_not_empty(&medication.dosage, "Dosage")?;
    validation::validate_not_empty(&medication.frequency, "Frequency")?;
    validation::validate_positive(medication.duration_days, "Duration days")?;
    Ok(())
}
