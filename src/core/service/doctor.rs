//! Doctor registry

use super::assign_unique_id;
use crate::adapters::repository::{DoctorQueries, Repository};
use crate::core::validation;
use crate::domain::errors::ClinicError;
use crate::domain::ids::{EntityKind, IdGenerator};
use crate::domain::{Doctor, Result};
use std::sync::Arc;

/// Registers, looks up, updates and removes doctors
#[derive(Clone)]
pub struct DoctorService {
    repository: Arc<dyn Repository<Doctor>>,
    ids: Arc<dyn IdGenerator>,
}

impl DoctorService {
    pub fn new(repository: Arc<dyn Repository<Doctor>>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { repository, ids }
    }

    /// Register a new doctor
    ///
    /// Assigns a `DOC` id when the id is blank.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::InvalidData`] on the first invalid field or if
    /// a doctor with the same id is already registered.
    pub fn register_doctor(&self, mut doctor: Doctor) -> Result<Doctor> {
        validate_doctor(&doctor)
            .inspect_err(|e| crate::log_rule_violation!(EntityKind::Doctor, e))?;

        assign_unique_id(&mut doctor, self.ids.as_ref(), self.repository.as_ref())?;

        let saved = self.repository.save(doctor)?;
        crate::log_entity_saved!(EntityKind::Doctor, saved.id, "registered");
        Ok(saved)
    }

    /// Look a doctor up by id
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::InvalidData`] for a blank id and
    /// [`ClinicError::DoctorNotFound`] if no doctor has that id.
    pub fn get_doctor_by_id(&self, doctor_id: &str) -> Result<Doctor> {
        validation::validate_not_empty(doctor_id, "Doctor ID")?;
        self.repository
            .find_by_id(doctor_id)?
            .ok_or_else(|| not_found(doctor_id))
    }

    pub fn get_all_doctors(&self) -> Result<Vec<Doctor>> {
        self.repository.find_all()
    }

    /// Doctors with the given specialization, ignoring case
    pub fn get_doctors_by_specialization(&self, specialization: &str) -> Result<Vec<Doctor>> {
        validation::validate_not_empty(specialization, "Specialization")?;
        self.repository.find_by_specialization(specialization)
    }

    pub fn get_available_doctors(&self) -> Result<Vec<Doctor>> {
        self.repository.find_available()
    }

    /// Replace a doctor's details, keeping the stored id
    pub fn update_doctor(&self, doctor_id: &str, mut updated: Doctor) -> Result<Doctor> {
        validation::validate_not_empty(doctor_id, "Doctor ID")?;
        let existing = self.get_doctor_by_id(doctor_id)?;

        validate_doctor(&updated)
            .inspect_err(|e| crate::log_rule_violation!(EntityKind::Doctor, e))?;
        updated.id = existing.id;

        let saved = self.repository.save(updated)?;
        crate::log_entity_saved!(EntityKind::Doctor, saved.id, "updated");
        Ok(saved)
    }

    /// Mark a doctor as accepting (or not accepting) appointments
    pub fn set_doctor_availability(&self, doctor_id: &str, available: bool) -> Result<Doctor> {
        let mut doctor = self.get_doctor_by_id(doctor_id)?;
        doctor.available = available;

        let saved = self.repository.save(doctor)?;
        tracing::info!(id = %saved.id, available, "Doctor availability changed");
        Ok(saved)
    }

    pub fn delete_doctor(&self, doctor_id: &str) -> Result<()> {
        validation::validate_not_empty(doctor_id, "Doctor ID")?;
        if !self.repository.exists_by_id(doctor_id)? {
            return Err(not_found(doctor_id));
        }
        self.repository.delete_by_id(doctor_id)?;
        tracing::info!(id = %doctor_id, "Doctor deleted");
        Ok(())
    }

    /// Referential probe used by dependent services
    ///
    /// Returns false for a blank id and when the lookup itself fails.
    pub fn doctor_exists(&self, doctor_id: &str) -> bool {
        if doctor_id.trim().is_empty() {
            return false;
        }
        self.repository.exists_by_id(doctor_id).unwrap_or_else(|e| {
            tracing::warn!(id = %doctor_id, error = %e, "Doctor lookup failed");
            false
        })
    }

    pub fn get_total_doctor_count(&self) -> Result<usize> {
        self.repository.count()
    }
}

fn not_found(doctor_id: &str) -> ClinicError {
    ClinicError::DoctorNotFound(format!("Doctor not found with ID: {}", doctor_id))
}

fn validate_doctor(doctor: &Doctor) -> Result<()> {
    validation::validate_not_empty(&doctor.first_name, "First name")?;
    validation::validate_not_empty(&doctor.last_name, "Last name")?;
    validation::validate_not_empty(&doctor.specialization, "Specialization")?;
    validation::validate_phone_number(&doctor.phone_number)?;
    validation::validate_email(&doctor.email)?;
    validation::validate_non_negative(doctor.years_of_experience, "Years of experience")?;
    validation::validate_not_empty(&doctor.qualification, "Qualification")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::repository::InMemoryRepository;
    use crate::domain::SequentialIdGenerator;
    use test_case::test_case;

    fn service() -> DoctorService {
        DoctorService::new(
            Arc::new(InMemoryRepository::<Doctor>::new()),
            Arc::new(SequentialIdGenerator::new()),
        )
    }

    fn doctor() -> Doctor {
        Doctor::new(
            "Jane",
            "Smith",
            "Cardiology",
            "9876543211",
            "jane.smith@hospital.com",
            10,
            "MBBS, MD",
        )
    }

    #[test]
    fn test_register_assigns_prefixed_id() {
        let service = service();
        let saved = service.register_doctor(doctor()).unwrap();

        assert_eq!(saved.id, "DOC00000001");
        assert!(saved.available);
    }

    #[test]
    fn test_register_duplicate_rejected() {
        let service = service();
        service.register_doctor(doctor().with_id("DOC001")).unwrap();

        let err = service
            .register_doctor(doctor().with_id("DOC001"))
            .unwrap_err();
        assert_eq!(err, ClinicError::invalid("Doctor with ID DOC001 already exists"));
        assert_eq!(service.get_total_doctor_count().unwrap(), 1);
    }

    #[test_case(|d: &mut Doctor| d.specialization = String::new(), "Specialization cannot be empty" ; "blank specialization")]
    #[test_case(|d: &mut Doctor| d.phone_number = "12345".into(), "Invalid phone number. Must be 10 digits: 12345" ; "short phone")]
    #[test_case(|d: &mut Doctor| d.years_of_experience = -1, "Years of experience cannot be negative" ; "negative experience")]
    #[test_case(|d: &mut Doctor| d.qualification = " ".into(), "Qualification cannot be empty" ; "blank qualification")]
    fn test_register_rejects_invalid(mutate: fn(&mut Doctor), message: &str) {
        let service = service();
        let mut d = doctor();
        mutate(&mut d);

        assert_eq!(
            service.register_doctor(d).unwrap_err(),
            ClinicError::invalid(message)
        );
    }

    #[test]
    fn test_zero_years_of_experience_allowed() {
        let service = service();
        let mut d = doctor();
        d.years_of_experience = 0;
        assert!(service.register_doctor(d).is_ok());
    }

    #[test]
    fn test_availability_and_specialization_filters() {
        let service = service();
        let saved = service.register_doctor(doctor()).unwrap();

        assert_eq!(service.get_available_doctors().unwrap().len(), 1);
        service.set_doctor_availability(&saved.id, false).unwrap();
        assert!(service.get_available_doctors().unwrap().is_empty());

        assert_eq!(
            service
                .get_doctors_by_specialization("CARDIOLOGY")
                .unwrap()
                .len(),
            1
        );
        assert!(service
            .get_doctors_by_specialization("")
            .unwrap_err()
            .is_invalid_data());
    }

    #[test]
    fn test_update_keeps_id() {
        let service = service();
        let saved = service.register_doctor(doctor()).unwrap();

        let mut changed = doctor().with_id("DOC999");
        changed.specialization = "Neurology".to_string();
        let updated = service.update_doctor(&saved.id, changed).unwrap();

        assert_eq!(updated.id, saved.id);
        assert_eq!(
            service.get_doctor_by_id(&saved.id).unwrap().specialization,
            "Neurology"
        );
    }

    #[test]
    fn test_not_found_and_delete() {
        let service = service();
        assert_eq!(
            service.get_doctor_by_id("DOC404").unwrap_err(),
            ClinicError::DoctorNotFound("Doctor not found with ID: DOC404".to_string())
        );
        assert!(service
            .set_doctor_availability("DOC404", true)
            .unwrap_err()
            .is_not_found());

        let saved = service.register_doctor(doctor()).unwrap();
        service.delete_doctor(&saved.id).unwrap();
        assert!(!service.doctor_exists(&saved.id));
        assert!(!service.doctor_exists(""));
    }
}
