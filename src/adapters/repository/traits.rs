//! Persistence collaborator traits
//!
//! This module defines the storage interface each entity store implements,
//! plus per-entity query extensions built on top of it.

use crate::domain::ids::Entity;
use crate::domain::Result;
use crate::domain::{
    Appointment, AppointmentStatus, Doctor, MedicalRecord, Patient, Prescription,
};
use chrono::{NaiveDate, NaiveDateTime};

/// Key/value storage for one entity type
///
/// Implementations key entities by [`Entity::id`] and hand out owned copies,
/// so callers can never mutate stored state except through [`Repository::save`].
/// Implementations shared between threads must serialize reads and writes
/// internally; the service layer performs no locking.
pub trait Repository<T: Entity>: Send + Sync {
    /// Inserts or replaces the entity under its id
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store is unavailable.
    fn save(&self, entity: T) -> Result<T>;

    /// Looks an entity up by id
    ///
    /// # Returns
    ///
    /// Returns `Ok(None)` if no entity has that id.
    fn find_by_id(&self, id: &str) -> Result<Option<T>>;

    /// Returns every stored entity
    fn find_all(&self) -> Result<Vec<T>>;

    fn exists_by_id(&self, id: &str) -> Result<bool>;

    /// Removes the entity, returning whether it was present
    fn delete_by_id(&self, id: &str) -> Result<bool>;

    fn count(&self) -> Result<usize>;

    /// Removes every entity
    fn clear(&self) -> Result<()>;

    /// Returns the stored entities accepted by `predicate`
    ///
    /// The default implementation filters [`Repository::find_all`].
    fn find_matching(&self, predicate: &dyn Fn(&T) -> bool) -> Result<Vec<T>> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|entity| predicate(entity))
            .collect())
    }
}

/// Patient-specific queries
pub trait PatientQueries: Repository<Patient> {
    /// Case-insensitive last-name match
    fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Patient>> {
        self.find_matching(&|p: &Patient| p.last_name.eq_ignore_ascii_case(last_name))
    }

    fn find_by_blood_group(&self, blood_group: &str) -> Result<Vec<Patient>> {
        self.find_matching(&|p: &Patient| p.blood_group.eq_ignore_ascii_case(blood_group))
    }
}

impl<R: Repository<Patient> + ?Sized> PatientQueries for R {}

/// Doctor-specific queries
pub trait DoctorQueries: Repository<Doctor> {
    /// Case-insensitive specialization match
    fn find_by_specialization(&self, specialization: &str) -> Result<Vec<Doctor>> {
        self.find_matching(&|d: &Doctor| d.specialization.eq_ignore_ascii_case(specialization))
    }

    fn find_available(&self) -> Result<Vec<Doctor>> {
        self.find_matching(&|d: &Doctor| d.available)
    }
}

impl<R: Repository<Doctor> + ?Sized> DoctorQueries for R {}

/// Appointment-specific queries
pub trait AppointmentQueries: Repository<Appointment> {
    fn find_by_patient_id(&self, patient_id: &str) -> Result<Vec<Appointment>> {
        self.find_matching(&|a: &Appointment| a.patient_id == patient_id)
    }

    fn find_by_doctor_id(&self, doctor_id: &str) -> Result<Vec<Appointment>> {
        self.find_matching(&|a: &Appointment| a.doctor_id == doctor_id)
    }

    fn find_by_status(&self, status: AppointmentStatus) -> Result<Vec<Appointment>> {
        self.find_matching(&|a: &Appointment| a.status == status)
    }

    /// Appointments falling on the given calendar date
    fn find_by_date(&self, date: NaiveDate) -> Result<Vec<Appointment>> {
        self.find_matching(&|a: &Appointment| a.date_time.date() == date)
    }

    /// Upcoming appointments as of `now`, earliest first
    fn find_upcoming(&self, now: NaiveDateTime) -> Result<Vec<Appointment>> {
        let mut upcoming = self.find_matching(&|a: &Appointment| a.is_upcoming_at(now))?;
        upcoming.sort_by_key(|a| a.date_time);
        Ok(upcoming)
    }
}

impl<R: Repository<Appointment> + ?Sized> AppointmentQueries for R {}

/// Prescription-specific queries
pub trait PrescriptionQueries: Repository<Prescription> {
    fn find_by_patient_id(&self, patient_id: &str) -> Result<Vec<Prescription>> {
        self.find_matching(&|p: &Prescription| p.patient_id == patient_id)
    }

    fn find_by_doctor_id(&self, doctor_id: &str) -> Result<Vec<Prescription>> {
        self.find_matching(&|p: &Prescription| p.doctor_id == doctor_id)
    }

    /// Prescriptions whose validity window contains `today`
    fn find_valid(&self, today: NaiveDate) -> Result<Vec<Prescription>> {
        self.find_matching(&|p: &Prescription| p.is_valid_on(today))
    }
}

impl<R: Repository<Prescription> + ?Sized> PrescriptionQueries for R {}

/// Medical-record-specific queries
pub trait MedicalRecordQueries: Repository<MedicalRecord> {
    /// Records for a patient, newest first
    fn find_by_patient_id(&self, patient_id: &str) -> Result<Vec<MedicalRecord>> {
        let mut records = self.find_matching(&|r: &MedicalRecord| r.patient_id == patient_id)?;
        records.sort_by(|a, b| b.record_date_time.cmp(&a.record_date_time));
        Ok(records)
    }

    fn find_by_doctor_id(&self, doctor_id: &str) -> Result<Vec<MedicalRecord>> {
        self.find_matching(&|r: &MedicalRecord| r.doctor_id == doctor_id)
    }

    /// First record linked to the appointment, if any
    fn find_by_appointment_id(&self, appointment_id: &str) -> Result<Option<MedicalRecord>> {
        Ok(self
            .find_matching(&|r: &MedicalRecord| {
                r.appointment_id.as_deref() == Some(appointment_id)
            })?
            .into_iter()
            .next())
    }
}

impl<R: Repository<MedicalRecord> + ?Sized> MedicalRecordQueries for R {}
