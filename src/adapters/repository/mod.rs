//! Persistence collaborators
//!
//! This module provides a trait-based abstraction for entity storage, so
//! services receive their stores explicitly at construction instead of
//! reaching for process-wide state.

pub mod memory;
pub mod traits;

pub use memory::InMemoryRepository;
pub use traits::{
    AppointmentQueries, DoctorQueries, MedicalRecordQueries, PatientQueries, PrescriptionQueries,
    Repository,
};

use crate::domain::{Appointment, Doctor, MedicalRecord, Patient, Prescription};
use std::sync::Arc;

/// One store per entity type
///
/// Cloning the bundle shares the underlying stores.
#[derive(Clone)]
pub struct Repositories {
    pub patients: Arc<dyn Repository<Patient>>,
    pub doctors: Arc<dyn Repository<Doctor>>,
    pub appointments: Arc<dyn Repository<Appointment>>,
    pub prescriptions: Arc<dyn Repository<Prescription>>,
    pub medical_records: Arc<dyn Repository<MedicalRecord>>,
}

impl Repositories {
    /// Fresh, empty in-memory stores
    pub fn in_memory() -> Self {
        tracing::debug!("Creating in-memory repositories");
        Self {
            patients: Arc::new(InMemoryRepository::<Patient>::new()),
            doctors: Arc::new(InMemoryRepository::<Doctor>::new()),
            appointments: Arc::new(InMemoryRepository::<Appointment>::new()),
            prescriptions: Arc::new(InMemoryRepository::<Prescription>::new()),
            medical_records: Arc::new(InMemoryRepository::<MedicalRecord>::new()),
        }
    }
}
