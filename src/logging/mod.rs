//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console output
//! - Configurable log levels
//! - Optional JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use clinica::logging::init_logging;
//! use clinica::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Clinic opened");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log a successful create/update of an entity
///
/// # Example
///
/// ```no_run
/// use clinica::log_entity_saved;
/// use clinica::domain::EntityKind;
///
/// log_entity_saved!(EntityKind::Patient, "PAT1A2B3C4D", "registered");
/// ```
#[macro_export]
macro_rules! log_entity_saved {
    ($kind:expr, $id:expr, $action:expr) => {
        tracing::info!(
            entity = %$kind,
            id = %$id,
            action = $action,
            "Entity saved"
        )
    };
}

/// Log an appointment status transition
///
/// # Example
///
/// ```no_run
/// use clinica::log_status_change;
/// use clinica::domain::AppointmentStatus;
///
/// log_status_change!("APT1A2B3C4D", AppointmentStatus::Scheduled, AppointmentStatus::Cancelled);
/// ```
#[macro_export]
macro_rules! log_status_change {
    ($id:expr, $from:expr, $to:expr) => {
        tracing::info!(
            id = %$id,
            from = %$from,
            to = %$to,
            "Appointment status changed"
        )
    };
}

/// Log an operation rejected by a validation, reference or transition rule
///
/// # Example
///
/// ```no_run
/// use clinica::log_rule_violation;
/// use clinica::domain::{ClinicError, EntityKind};
///
/// let error = ClinicError::invalid("Reason cannot be empty");
/// log_rule_violation!(EntityKind::Appointment, &error);
/// ```
#[macro_export]
macro_rules! log_rule_violation {
    ($kind:expr, $error:expr) => {
        tracing::warn!(
            entity = %$kind,
            error = %$error,
            "Operation rejected"
        )
    };
}
