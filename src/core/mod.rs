//! Core business logic for Clinica.
//!
//! # Modules
//!
//! - [`validation`] - Field validation primitives shared by every service
//! - [`dates`] - Date parsing, formatting and comparisons
//! - [`clock`] - Injectable source of "now"
//! - [`service`] - Patient, doctor, appointment, prescription and medical
//!   record services
//! - [`clinic`] - Facade wiring all services together, plus statistics
//!
//! # Example
//!
//! ```rust
//! use clinica::core::clinic::Clinic;
//! use clinica::domain::Appointment;
//! use chrono::{Duration, Local};
//!
//! # fn example() -> clinica::domain::Result<()> {
//! let clinic = Clinic::in_memory();
//! clinic.seed_sample_data()?;
//!
//! let when = Local::now().naive_local() + Duration::days(7);
//! let appointment = clinic
//!     .appointments()
//!     .schedule_appointment(Appointment::new("PAT001", "DOC001", when, "Annual checkup"))?;
//!
//! assert!(appointment.id.starts_with("APT"));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod clinic;
pub mod clock;
pub mod dates;
pub mod service;
pub mod validation;

pub use clinic::{Clinic, ClinicStatistics};
pub use clock::{Clock, FixedClock, SystemClock};
