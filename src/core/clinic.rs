//! Clinic facade
//!
//! [`Clinic`] wires the five services over one set of stores, one clock and
//! one id generator, and reports aggregate [`ClinicStatistics`].

use crate::adapters::repository::Repositories;
use crate::config::{ClinicConfig, IdStrategy};
use crate::core::clock::{Clock, SystemClock};
use crate::core::service::{
    AppointmentService, DoctorService, MedicalRecordService, PatientService, PrescriptionService,
};
use crate::domain::errors::ClinicError;
use crate::domain::ids::{IdGenerator, RandomIdGenerator, SequentialIdGenerator};
use crate::domain::{Doctor, Patient, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// All clinic services sharing the same stores
///
/// # Example
///
/// ```
/// use clinica::core::clinic::Clinic;
///
/// let clinic = Clinic::in_memory();
/// clinic.seed_sample_data().unwrap();
///
/// let stats = clinic.statistics().unwrap();
/// assert_eq!(stats.total_doctors, 3);
/// assert_eq!(stats.total_patients, 3);
/// ```
#[derive(Clone)]
pub struct Clinic {
    patients: PatientService,
    doctors: DoctorService,
    appointments: AppointmentService,
    prescriptions: PrescriptionService,
    medical_records: MedicalRecordService,
    clock: Arc<dyn Clock>,
}

impl Clinic {
    /// Build a clinic over the given stores
    pub fn new(
        repositories: Repositories,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let patients = PatientService::new(repositories.patients, ids.clone(), clock.clone());
        let doctors = DoctorService::new(repositories.doctors, ids.clone());
        let appointments = AppointmentService::new(
            repositories.appointments,
            patients.clone(),
            doctors.clone(),
            ids.clone(),
            clock.clone(),
        );
        let prescriptions = PrescriptionService::new(
            repositories.prescriptions,
            patients.clone(),
            doctors.clone(),
            ids.clone(),
            clock.clone(),
        );
        let medical_records = MedicalRecordService::new(
            repositories.medical_records,
            patients.clone(),
            doctors.clone(),
            ids,
            clock.clone(),
        );

        Self {
            patients,
            doctors,
            appointments,
            prescriptions,
            medical_records,
            clock,
        }
    }

    /// Empty in-memory clinic with random ids and the system clock
    pub fn in_memory() -> Self {
        Self::new(
            Repositories::in_memory(),
            Arc::new(RandomIdGenerator),
            Arc::new(SystemClock),
        )
    }

    /// In-memory clinic set up from configuration
    ///
    /// Seeds the sample data when `sample_data.enabled` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if seeding fails.
    pub fn from_config(config: &ClinicConfig) -> Result<Self> {
        Self::from_config_with_clock(config, Arc::new(SystemClock))
    }

    /// Like [`Clinic::from_config`], with an explicit clock
    pub fn from_config_with_clock(config: &ClinicConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let ids: Arc<dyn IdGenerator> = match config.identifiers.strategy {
            IdStrategy::Random => Arc::new(RandomIdGenerator),
            IdStrategy::Sequential => Arc::new(SequentialIdGenerator::new()),
        };

        tracing::info!(
            name = %config.application.name,
            id_strategy = ?config.identifiers.strategy,
            sample_data = config.sample_data.enabled,
            "Opening clinic"
        );

        let clinic = Self::new(Repositories::in_memory(), ids, clock);
        if config.sample_data.enabled {
            clinic.seed_sample_data()?;
        }
        Ok(clinic)
    }

    pub fn patients(&self) -> &PatientService {
        &self.patients
    }

    pub fn doctors(&self) -> &DoctorService {
        &self.doctors
    }

    pub fn appointments(&self) -> &AppointmentService {
        &self.appointments
    }

    pub fn prescriptions(&self) -> &PrescriptionService {
        &self.prescriptions
    }

    pub fn medical_records(&self) -> &MedicalRecordService {
        &self.medical_records
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Register the three sample doctors and three sample patients
    ///
    /// # Errors
    ///
    /// Fails with [`ClinicError::InvalidData`] if any sample id is already
    /// registered.
    pub fn seed_sample_data(&self) -> Result<()> {
        for doctor in sample_doctors() {
            self.doctors.register_doctor(doctor)?;
        }
        for patient in sample_patients()? {
            self.patients.register_patient(patient)?;
        }

        tracing::info!(doctors = 3, patients = 3, "Sample data loaded");
        Ok(())
    }

    /// Aggregate counts across every service
    pub fn statistics(&self) -> Result<ClinicStatistics> {
        Ok(ClinicStatistics {
            total_patients: self.patients.get_total_patient_count()?,
            total_doctors: self.doctors.get_total_doctor_count()?,
            total_appointments: self.appointments.get_total_appointment_count()?,
            upcoming_appointments: self.appointments.get_upcoming_appointments()?.len(),
            total_prescriptions: self.prescriptions.get_total_prescription_count()?,
            valid_prescriptions: self.prescriptions.get_valid_prescriptions()?.len(),
            total_medical_records: self.medical_records.get_total_record_count()?,
            available_doctors: self.doctors.get_available_doctors()?.len(),
        })
    }
}

/// Point-in-time counts for the whole clinic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClinicStatistics {
    pub total_patients: usize,
    pub total_doctors: usize,
    pub total_appointments: usize,
    pub upcoming_appointments: usize,
    pub total_prescriptions: usize,
    pub valid_prescriptions: usize,
    pub total_medical_records: usize,
    pub available_doctors: usize,
}

impl fmt::Display for ClinicStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Patients         : {}", self.total_patients)?;
        writeln!(f, "Total Doctors          : {}", self.total_doctors)?;
        writeln!(f, "Total Appointments     : {}", self.total_appointments)?;
        writeln!(f, "Upcoming Appointments  : {}", self.upcoming_appointments)?;
        writeln!(f, "Total Prescriptions    : {}", self.total_prescriptions)?;
        writeln!(f, "Valid Prescriptions    : {}", self.valid_prescriptions)?;
        writeln!(f, "Total Medical Records  : {}", self.total_medical_records)?;
        write!(f, "Available Doctors      : {}", self.available_doctors)
    }
}

fn sample_doctors() -> Vec<Doctor> {
    vec![
        Doctor::new(
            "John",
            "Smith",
            "Cardiology",
            "9876543210",
            "john.smith@hospital.com",
            15,
            "MBBS, MD",
        )
        .with_id("DOC001"),
        Doctor::new(
            "Sarah",
            "Johnson",
            "Pediatrics",
            "9876543211",
            "sarah.johnson@hospital.com",
            10,
            "MBBS, DCH",
        )
        .with_id("DOC002"),
        Doctor::new(
            "Michael",
            "Brown",
            "Orthopedics",
            "9876543212",
            "michael.brown@hospital.com",
            12,
            "MBBS, MS",
        )
        .with_id("DOC003"),
    ]
}

fn sample_patients() -> Result<Vec<Patient>> {
    #[rustfmt::skip]
    let rows = [
        ("PAT001", "Alice", "Williams", (1990, 5, 15), "Female", "9123456780", "alice.w@email.com", "123 Main St, City", "A+"),
        ("PAT002", "Bob", "Davis", (1985, 8, 20), "Male", "9123456781", "bob.d@email.com", "456 Oak Ave, Town", "O+"),
        ("PAT003", "Charlie", "Miller", (2010, 3, 10), "Male", "9123456782", "charlie.m@email.com", "789 Pine Rd, Village", "B+"),
    ];

    rows.into_iter()
        .map(|(id, first, last, (y, m, d), gender, phone, email, address, blood)| {
            let date_of_birth = NaiveDate::from_ymd_opt(y, m, d)
                .ok_or_else(|| ClinicError::invalid(format!("Invalid birth date for {}", id)))?;
            Patient::builder()
                .id(id)
                .first_name(first)
                .last_name(last)
                .date_of_birth(date_of_birth)
                .gender(gender)
                .phone_number(phone)
                .email(email)
                .address(address)
                .blood_group(blood)
                .build()
                .map_err(ClinicError::invalid)
        })
        .collect()
}
