//! Management services
//!
//! - [`PatientService`], [`DoctorService`] - independent registries that own
//!   id generation, field validation and existence checks
//! - [`AppointmentService`], [`PrescriptionService`], [`MedicalRecordService`]
//!   - dependent services that check patient/doctor references through the
//!   registries and add their own lifecycle rules
//!
//! Every operation validates first, then checks references, then assigns an
//! id, and only then touches storage. A rejected operation leaves no stored
//! side effect.

pub mod appointment;
pub mod doctor;
pub mod medical_record;
pub mod patient;
pub mod prescription;

pub use appointment::AppointmentService;
pub use doctor::DoctorService;
pub use medical_record::MedicalRecordService;
pub use patient::PatientService;
pub use prescription::PrescriptionService;

use crate::adapters::repository::Repository;
use crate::domain::errors::ClinicError;
use crate::domain::ids::{Entity, IdGenerator};
use crate::domain::Result;

/// Gives `entity` a fresh id if its id is blank, then rejects the id if it
/// is already stored
fn assign_unique_id<T: Entity>(
    entity: &mut T,
    ids: &dyn IdGenerator,
    repository: &dyn Repository<T>,
) -> Result<()> {
    if entity.has_blank_id() {
        entity.set_id(ids.generate(T::KIND)?);
    }
    if repository.exists_by_id(entity.id())? {
        let error = ClinicError::invalid(format!(
            "{} with ID {} already exists",
            T::KIND.label(),
            entity.id()
        ));
        crate::log_rule_violation!(T::KIND, &error);
        return Err(error);
    }
    Ok(())
}
