//! Appointment scheduling and lifecycle
//!
//! Appointments move through [`AppointmentStatus`]:
//!
//! - `schedule` always starts at `SCHEDULED`
//! - `reschedule` is refused for `COMPLETED` and `CANCELLED`, and resets the
//!   status to `SCHEDULED`
//! - `cancel` is refused for `COMPLETED` and idempotent otherwise
//! - `complete` and `update_appointment_status` set the status directly,
//!   without any guard

use super::{assign_unique_id, DoctorService, PatientService};
use crate::adapters::repository::{AppointmentQueries, Repository};
use crate::core::clock::Clock;
use crate::core::{dates, validation};
use crate::domain::errors::ClinicError;
use crate::domain::ids::{EntityKind, IdGenerator};
use crate::domain::{Appointment, AppointmentStatus, Result};
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;

/// Schedules appointments and drives their status transitions
#[derive(Clone)]
pub struct AppointmentService {
    repository: Arc<dyn Repository<Appointment>>,
    patients: PatientService,
    doctors: DoctorService,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl AppointmentService {
    /// Create a new AppointmentService
    ///
    /// # Arguments
    ///
    /// * `repository` - Appointment store
    /// * `patients` - Patient registry used for referential checks
    /// * `doctors` - Doctor registry used for referential checks
    /// * `ids` - Source of `APT` ids
    /// * `clock` - Defines "now" for the future-date rules and upcoming queries
    pub fn new(
        repository: Arc<dyn Repository<Appointment>>,
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

    /// Schedule a new appointment
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::InvalidData`] if a field is invalid, if the
    /// patient or doctor does not exist, if `date_time` is not strictly
    /// after now, or if an appointment with the same id already exists.
    pub fn schedule_appointment(&self, mut appointment: Appointment) -> Result<Appointment> {
        self.check_new_appointment(&appointment)
            .inspect_err(|e| crate::log_rule_violation!(EntityKind::Appointment, e))?;

        assign_unique_id(&mut appointment, self.ids.as_ref(), self.repository.as_ref())?;
        appointment.status = AppointmentStatus::Scheduled;

        let saved = self.repository.save(appointment)?;
        tracing::info!(
            id = %saved.id,
            patient_id = %saved.patient_id,
            doctor_id = %saved.doctor_id,
            date_time = %dates::format_date_time(saved.date_time),
            "Appointment scheduled"
        );
        Ok(saved)
    }

    fn check_new_appointment(&self, appointment: &Appointment) -> Result<()> {
        validate_appointment(appointment)?;

        if !self.patients.patient_exists(&appointment.patient_id) {
            return Err(ClinicError::invalid(format!(
                "Patient not found with ID: {}",
                appointment.patient_id
            )));
        }
        if !self.doctors.doctor_exists(&appointment.doctor_id) {
            return Err(ClinicError::invalid(format!(
                "Doctor not found with ID: {}",
                appointment.doctor_id
            )));
        }
        if !dates::is_future_date_time(appointment.date_time, self.clock.now()) {
            return Err(ClinicError::invalid("Appointment date must be in the future"));
        }
        Ok(())
    }

    /// Look an appointment up by id
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::InvalidData`] for a blank id and
    /// [`ClinicError::AppointmentNotFound`] if no appointment has that id.
    pub fn get_appointment_by_id(&self, appointment_id: &str) -> Result<Appointment> {
        validation::validate_not_empty(appointment_id, "Appointment ID")?;
        self.repository
            .find_by_id(appointment_id)?
            .ok_or_else(|| not_found(appointment_id))
    }

    pub fn get_all_appointments(&self) -> Result<Vec<Appointment>> {
        self.repository.find_all()
    }

    pub fn get_appointments_by_patient(&self, patient_id: &str) -> Result<Vec<Appointment>> {
        validation::validate_not_empty(patient_id, "Patient ID")?;
        self.repository.find_by_patient_id(patient_id)
    }

    pub fn get_appointments_by_doctor(&self, doctor_id: &str) -> Result<Vec<Appointment>> {
        validation::validate_not_empty(doctor_id, "Doctor ID")?;
        self.repository.find_by_doctor_id(doctor_id)
    }

    /// Appointments on the given calendar date, at any time of day
    pub fn get_appointments_by_date(&self, date: NaiveDate) -> Result<Vec<Appointment>> {
        self.repository.find_by_date(date)
    }

    pub fn get_appointments_by_status(&self, status: AppointmentStatus) -> Result<Vec<Appointment>> {
        self.repository.find_by_status(status)
    }

    /// Scheduled appointments after now, earliest first
    ///
    /// Confirmed appointments are not included.
    pub fn get_upcoming_appointments(&self) -> Result<Vec<Appointment>> {
        self.repository.find_upcoming(self.clock.now())
    }

    /// Returns true if `appointment` is scheduled and lies after now
    pub fn is_upcoming(&self, appointment: &Appointment) -> bool {
        appointment.is_upcoming_at(self.clock.now())
    }

    /// Set the status directly, bypassing the cancel/reschedule guards
    pub fn update_appointment_status(
        &self,
        appointment_id: &str,
        status: AppointmentStatus,
    ) -> Result<Appointment> {
        let appointment = self.get_appointment_by_id(appointment_id)?;
        self.transition(appointment, status)
    }

    /// Move an appointment to a new date-time
    ///
    /// The status is reset to `SCHEDULED`.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::InvalidData`] if `new_date_time` is not strictly
    /// after now or if the appointment is completed or cancelled. The stored
    /// appointment is left untouched on failure.
    pub fn reschedule_appointment(
        &self,
        appointment_id: &str,
        new_date_time: NaiveDateTime,
    ) -> Result<Appointment> {
        let mut appointment = self.get_appointment_by_id(appointment_id)?;

        let guard = if !dates::is_future_date_time(new_date_time, self.clock.now()) {
            Err(ClinicError::invalid("New appointment date must be in the future"))
        } else if appointment.status.blocks_reschedule() {
            Err(ClinicError::invalid(format!(
                "Cannot reschedule a {} appointment",
                appointment.status
            )))
        } else {
            Ok(())
        };
        guard.inspect_err(|e| crate::log_rule_violation!(EntityKind::Appointment, e))?;

        tracing::info!(
            id = %appointment.id,
            from = %dates::format_date_time(appointment.date_time),
            to = %dates::format_date_time(new_date_time),
            "Appointment rescheduled"
        );
        appointment.date_time = new_date_time;
        self.transition(appointment, AppointmentStatus::Scheduled)
    }

    /// Cancel an appointment
    ///
    /// Cancelling an already cancelled appointment succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::InvalidData`] if the appointment is completed.
    pub fn cancel_appointment(&self, appointment_id: &str) -> Result<Appointment> {
        let appointment = self.get_appointment_by_id(appointment_id)?;

        if appointment.status.blocks_cancel() {
            let error = ClinicError::invalid("Cannot cancel a completed appointment");
            crate::log_rule_violation!(EntityKind::Appointment, &error);
            return Err(error);
        }

        self.transition(appointment, AppointmentStatus::Cancelled)
    }

    /// Mark an appointment completed, whatever its current status
    pub fn complete_appointment(&self, appointment_id: &str) -> Result<Appointment> {
        let appointment = self.get_appointment_by_id(appointment_id)?;
        self.transition(appointment, AppointmentStatus::Completed)
    }

    pub fn delete_appointment(&self, appointment_id: &str) -> Result<()> {
        validation::validate_not_empty(appointment_id, "Appointment ID")?;
        if !self.repository.exists_by_id(appointment_id)? {
            return Err(not_found(appointment_id));
        }
        self.repository.delete_by_id(appointment_id)?;
        tracing::info!(id = %appointment_id, "Appointment deleted");
        Ok(())
    }

    pub fn get_total_appointment_count(&self) -> Result<usize> {
        self.repository.count()
    }

    fn transition(
        &self,
        mut appointment: Appointment,
        status: AppointmentStatus,
    ) -> Result<Appointment> {
        let previous = appointment.status;
        appointment.status = status;

        let saved = self.repository.save(appointment)?;
        crate::log_status_change!(saved.id, previous, status);
        Ok(saved)
    }
}

fn not_found(appointment_id: &str) -> ClinicError {
    ClinicError::AppointmentNotFound(format!(
        "Appointment not found with ID: {}",
        appointment_id
    ))
}

fn validate_appointment(appointment: &Appointment) -> Result<()> {
    validation::validate_not_empty(&appointment.patient_id, "Patient ID")?;
    validation::validate_not_empty(&appointment.doctor_id, "Doctor ID")?;
    validation::validate_not_empty(&appointment.reason, "Reason")?;
    validation::validate_positive(appointment.duration_minutes, "Duration")?;
    Ok(())
}
