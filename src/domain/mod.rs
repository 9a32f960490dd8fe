//! Domain models and types for Clinica.
//!
//! This module contains the entity records managed by the clinic, their
//! identifiers and the error types shared by every layer.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Entity records** ([`Patient`], [`Doctor`], [`Appointment`],
//!   [`Prescription`] with embedded [`Medication`] items, [`MedicalRecord`])
//! - **Identifiers** ([`EntityKind`], [`IdGenerator`] and its random and
//!   sequential implementations)
//! - **Error types** ([`ClinicError`]) and the [`Result`] alias
//!
//! Entities are plain data holders with a few derived read-only properties
//! (age, full name, expiry, validity). All business rules live in
//! [`crate::core`].
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, ClinicError>`]:
//!
//! ```rust
//! use clinica::domain::{ClinicError, Result};
//!
//! fn example() -> Result<()> {
//!     Err(ClinicError::invalid("Reason cannot be empty"))
//! }
//!
//! assert!(example().unwrap_err().is_invalid_data());
//! ```

pub mod appointment;
pub mod doctor;
pub mod errors;
pub mod ids;
pub mod medical_record;
pub mod patient;
pub mod prescription;
pub mod result;

// Re-export commonly used types for convenience
pub use appointment::{Appointment, AppointmentStatus, DEFAULT_DURATION_MINUTES};
pub use doctor::Doctor;
pub use errors::ClinicError;
pub use ids::{
    is_generated_id, Entity, EntityKind, IdGenerator, RandomIdGenerator, SequentialIdGenerator,
};
pub use medical_record::MedicalRecord;
pub use patient::{Patient, PatientBuilder};
pub use prescription::{Medication, Prescription, DEFAULT_VALIDITY_DAYS};
pub use result::Result;
