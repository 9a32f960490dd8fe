//! Patient registry

use super::assign_unique_id;
use crate::adapters::repository::{PatientQueries, Repository};
use crate::core::clock::Clock;
use crate::core::validation;
use crate::domain::errors::ClinicError;
use crate::domain::ids::{EntityKind, IdGenerator};
use crate::domain::{Patient, Result};
use std::sync::Arc;

/// Registers, looks up, updates and removes patients
///
/// Independent service: it references no other entity. Dependent services use
/// [`PatientService::patient_exists`] as their referential probe.
#[derive(Clone)]
pub struct PatientService {
    repository: Arc<dyn Repository<Patient>>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl PatientService {
    /// Create a new PatientService
    ///
    /// # Arguments
    ///
    /// * `repository` - Patient store
    /// * `ids` - Source of ids for patients registered without one
    /// * `clock` - Source of the registration date
    pub fn new(
        repository: Arc<dyn Repository<Patient>>,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            ids,
            clock,
        }
    }

    /// Register a new patient
    ///
    /// Validates every field, assigns a `PAT` id when the id is blank and
    /// stamps today's registration date.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::InvalidData`] on the first invalid field or if
    /// a patient with the same id is already registered.
    pub fn register_patient(&self, mut patient: Patient) -> Result<Patient> {
        validate_patient(&patient)
            .inspect_err(|e| crate::log_rule_violation!(EntityKind::Patient, e))?;

        assign_unique_id(&mut patient, self.ids.as_ref(), self.repository.as_ref())?;

        patient.registration_date = self.clock.today();
        let saved = self.repository.save(patient)?;
        crate::log_entity_saved!(EntityKind::Patient, saved.id, "registered");
        Ok(saved)
    }

    /// Look a patient up by id
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::InvalidData`] for a blank id and
    /// [`ClinicError::PatientNotFound`] if no patient has that id.
    pub fn get_patient_by_id(&self, patient_id: &str) -> Result<Patient> {
        validation::validate_not_empty(patient_id, "Patient ID")?;
        self.repository.find_by_id(patient_id)?.ok_or_else(|| {
            ClinicError::PatientNotFound(format!("Patient not found with ID: {}", patient_id))
        })
    }

    pub fn get_all_patients(&self) -> Result<Vec<Patient>> {
        self.repository.find_all()
    }

    /// Patients whose last name matches, ignoring case
    pub fn get_patients_by_last_name(&self, last_name: &str) -> Result<Vec<Patient>> {
        validation::validate_not_empty(last_name, "Last name")?;
        self.repository.find_by_last_name(last_name)
    }

    /// Patients with the given blood group
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::InvalidData`] if `blood_group` is not one of the
    /// eight recognised groups. An unmatched valid group yields an empty list.
    pub fn get_patients_by_blood_group(&self, blood_group: &str) -> Result<Vec<Patient>> {
        validation::validate_blood_group(blood_group)?;
        self.repository.find_by_blood_group(blood_group)
    }

    /// Replace a patient's details
    ///
    /// The stored id and registration date are kept regardless of what
    /// `updated` carries.
    pub fn update_patient(&self, patient_id: &str, mut updated: Patient) -> Result<Patient> {
        validation::validate_not_empty(patient_id, "Patient ID")?;
        let existing = self.get_patient_by_id(patient_id)?;

        validate_patient(&updated)
            .inspect_err(|e| crate::log_rule_violation!(EntityKind::Patient, e))?;

        updated.id = existing.id;
        updated.registration_date = existing.registration_date;

        let saved = self.repository.save(updated)?;
        crate::log_entity_saved!(EntityKind::Patient, saved.id, "updated");
        Ok(saved)
    }

    pub fn delete_patient(&self, patient_id: &str) -> Result<()> {
        validation::validate_not_empty(patient_id, "Patient ID")?;
        if !self.repository.exists_by_id(patient_id)? {
            return Err(ClinicError::PatientNotFound(format!(
                "Patient not found with ID: {}",
                patient_id
            )));
        }
        self.repository.delete_by_id(patient_id)?;
        tracing::info!(id = %patient_id, "Patient deleted");
        Ok(())
    }

    /// Referential probe used by dependent services
    ///
    /// Never fails: a blank id is simply absent, and a storage failure is
    /// logged and reported as absent.
    pub fn patient_exists(&self, patient_id: &str) -> bool {
        if patient_id.trim().is_empty() {
            return false;
        }
        self.repository
            .exists_by_id(patient_id)
            .unwrap_or_else(|e| {
                tracing::warn!(id = %patient_id, error = %e, "Patient lookup failed");
                false
            })
    }

    pub fn get_total_patient_count(&self) -> Result<usize> {
        self.repository.count()
    }
}

fn validate_patient(patient: &Patient) -> Result<()> {
    validation::validate_not_empty(&patient.first_name, "First name")?;
    validation::validate_not_empty(&patient.last_name, "Last name")?;
    validation::validate_gender(&patient.gender)?;
    validation::validate_phone_number(&patient.phone_number)?;
    validation::validate_email(&patient.email)?;
    validation::validate_blood_group(&patient.blood_group)?;
    validation::validate_not_empty(&patient.address, "Address")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::repository::InMemoryRepository;
    use crate::core::clock::FixedClock;
    use crate::domain::SequentialIdGenerator;
    use chrono::NaiveDate;

    fn clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::new(
            NaiveDate::from_ymd_opt(2026, 3, 2)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        ))
    }

    fn service() -> PatientService {
        PatientService::new(
            Arc::new(InMemoryRepository::<Patient>::new()),
            Arc::new(SequentialIdGenerator::new()),
            clock(),
        )
    }

    fn patient() -> Patient {
        Patient::builder()
            .first_name("John")
            .last_name("Doe")
            .date_of_birth(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap())
            .gender("Male")
            .phone_number("9876543210")
            .email("john.doe@email.com")
            .address("123 Main St")
            .blood_group("O+")
            .build()
            .unwrap()
    }

    #[test]
    fn test_register_assigns_id_and_registration_date() {
        let service = service();
        let saved = service.register_patient(patient()).unwrap();

        assert_eq!(saved.id, "PAT00000001");
        assert_eq!(
            saved.registration_date,
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
        );
        assert_eq!(service.get_total_patient_count().unwrap(), 1);
    }

    #[test]
    fn test_register_keeps_explicit_id() {
        let service = service();
        let mut p = patient();
        p.id = "PAT001".to_string();

        assert_eq!(service.register_patient(p).unwrap().id, "PAT001");
    }

    #[test]
    fn test_register_duplicate_id_rejected() {
        let service = service();
        let mut first = patient();
        first.id = "PAT001".to_string();
        service.register_patient(first).unwrap();

        let mut second = patient();
        second.id = "PAT001".to_string();
        second.first_name = "Jane".to_string();
        let err = service.register_patient(second).unwrap_err();

        assert_eq!(
            err,
            ClinicError::invalid("Patient with ID PAT001 already exists")
        );
        assert_eq!(
            service.get_patient_by_id("PAT001").unwrap().first_name,
            "John"
        );
    }

    #[test]
    fn test_register_fails_fast_on_first_violation() {
        let service = service();
        let mut p = patient();
        p.first_name = "  ".to_string();
        p.email = "broken".to_string();

        let err = service.register_patient(p).unwrap_err();
        assert_eq!(err, ClinicError::invalid("First name cannot be empty"));
        assert_eq!(service.get_total_patient_count().unwrap(), 0);
    }

    #[test]
    fn test_get_by_id_error_kinds() {
        let service = service();

        assert!(service.get_patient_by_id("").unwrap_err().is_invalid_data());

        let err = service.get_patient_by_id("PAT404").unwrap_err();
        assert_eq!(
            err,
            ClinicError::PatientNotFound("Patient not found with ID: PAT404".to_string())
        );
    }

    #[test]
    fn test_blood_group_filter() {
        let service = service();
        service.register_patient(patient()).unwrap();

        assert!(service
            .get_patients_by_blood_group("X")
            .unwrap_err()
            .is_invalid_data());
        assert_eq!(service.get_patients_by_blood_group("O+").unwrap().len(), 1);
        assert!(service.get_patients_by_blood_group("AB-").unwrap().is_empty());
    }

    #[test]
    fn test_last_name_filter_ignores_case() {
        let service = service();
        service.register_patient(patient()).unwrap();

        assert_eq!(service.get_patients_by_last_name("doe").unwrap().len(), 1);
        assert!(service.get_patients_by_last_name("").is_err());
    }

    #[test]
    fn test_update_preserves_id_and_registration_date() {
        let clock = clock();
        let service = PatientService::new(
            Arc::new(InMemoryRepository::<Patient>::new()),
            Arc::new(SequentialIdGenerator::new()),
            clock.clone(),
        );
        let saved = service.register_patient(patient()).unwrap();

        clock.advance(chrono::Duration::days(10));
        let mut changed = patient();
        changed.id = "OTHER".to_string();
        changed.phone_number = "9000000000".to_string();

        let updated = service.update_patient(&saved.id, changed).unwrap();
        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.registration_date, saved.registration_date);
        assert_eq!(updated.phone_number, "9000000000");
        assert!(service.get_patient_by_id("OTHER").is_err());
    }

    #[test]
    fn test_update_missing_patient_is_not_found() {
        let service = service();
        let err = service.update_patient("PAT404", patient()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_and_exists() {
        let service = service();
        let saved = service.register_patient(patient()).unwrap();

        assert!(service.patient_exists(&saved.id));
        assert!(!service.patient_exists(""));
        assert!(!service.patient_exists("   "));

        service.delete_patient(&saved.id).unwrap();
        assert!(!service.patient_exists(&saved.id));
        assert!(service.delete_patient(&saved.id).unwrap_err().is_not_found());
    }
}
