// Clinica - Clinical Records Manager
// Copyright (c) 2025 Clinica Contributors
// Licensed under the MIT License

//! # Clinica - Clinical Records Manager
//!
//! Clinica keeps the day-to-day records of a small clinic: patients, doctors,
//! appointments, prescriptions and medical records, with the validation and
//! cross-entity rules that keep them consistent.
//!
//! ## Overview
//!
//! This library provides:
//! - **Registration** of patients and doctors with field validation and
//!   prefixed ids (`PAT`, `DOC`)
//! - **Scheduling** of appointments through a small status machine
//! - **Prescriptions** with ordered medications and a validity window
//! - **Medical records** whose creation time is fixed once stored
//!
//! ## Architecture
//!
//! Clinica follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (validation, dates, services, clinic facade)
//! - [`adapters`] - Entity storage behind repository traits
//! - [`domain`] - Entities, ids and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust
//! use clinica::core::clinic::Clinic;
//! use clinica::domain::{Medication, Prescription};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let clinic = Clinic::in_memory();
//! clinic.seed_sample_data()?;
//!
//! let prescription = clinic
//!     .prescriptions()
//!     .create_prescription(Prescription::new("PAT002", "DOC002", "Seasonal flu"))?;
//! clinic.prescriptions().add_medication(
//!     &prescription.id,
//!     Medication::new("Paracetamol", "500mg", "Three times daily", 5),
//! )?;
//!
//! println!("{}", clinic.statistics()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Appointment Lifecycle
//!
//! Every scheduled appointment starts as `SCHEDULED`. Cancelling a completed
//! appointment and rescheduling a completed or cancelled one are refused;
//! completing is always allowed.
//!
//! ```rust
//! use clinica::adapters::repository::Repositories;
//! use clinica::core::clinic::Clinic;
//! use clinica::core::clock::FixedClock;
//! use clinica::domain::{Appointment, AppointmentStatus, SequentialIdGenerator};
//! use chrono::{Duration, NaiveDate};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let now = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let clinic = Clinic::new(
//!     Repositories::in_memory(),
//!     Arc::new(SequentialIdGenerator::new()),
//!     Arc::new(FixedClock::new(now)),
//! );
//! clinic.seed_sample_data()?;
//!
//! let appointments = clinic.appointments();
//! let booked = appointments.schedule_appointment(Appointment::new(
//!     "PAT001",
//!     "DOC001",
//!     now + Duration::days(7),
//!     "Follow-up",
//! ))?;
//! assert_eq!(booked.id, "APT00000001");
//!
//! let done = appointments.complete_appointment(&booked.id)?;
//! assert_eq!(done.status, AppointmentStatus::Completed);
//! assert!(appointments.cancel_appointment(&booked.id).is_err());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`domain::Result`]. Invalid input, failed
//! references and refused transitions are [`domain::ClinicError::InvalidData`];
//! a well-formed id that is not stored yields the matching not-found variant.
//!
//! ```rust
//! use clinica::core::clinic::Clinic;
//! use clinica::domain::ClinicError;
//!
//! let clinic = Clinic::in_memory();
//! assert!(matches!(
//!     clinic.patients().get_patient_by_id("PAT404"),
//!     Err(ClinicError::PatientNotFound(_))
//! ));
//! assert!(clinic.patients().get_patient_by_id("").unwrap_err().is_invalid_data());
//! ```
//!
//! ## Logging
//!
//! Clinica uses structured logging with the `tracing` crate. Services emit an
//! `info` event per successful change and a `warn` event per refused one.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
