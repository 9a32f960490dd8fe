//! Domain error types
//!
//! This module defines the error hierarchy for Clinica. Service operations
//! surface two principal kinds: invalid data (malformed input, failed
//! referential checks, rejected state transitions, duplicate ids) and
//! not-found (a well-formed id that is absent from storage). Not-found is
//! reported with a dedicated variant per entity type.

use thiserror::Error;

/// Main Clinica error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClinicError {
    /// Malformed or missing field, failed referential check, rejected
    /// state transition or duplicate id
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Patient id is well-formed but not present in storage
    #[error("{0}")]
    PatientNotFound(String),

    /// Doctor id is well-formed but not present in storage
    #[error("{0}")]
    DoctorNotFound(String),

    /// Appointment id is well-formed but not present in storage
    #[error("{0}")]
    AppointmentNotFound(String),

    /// Prescription id is well-formed but not present in storage
    #[error("{0}")]
    PrescriptionNotFound(String),

    /// Medical record id is well-formed but not present in storage
    #[error("{0}")]
    MedicalRecordNotFound(String),

    /// Persistence collaborator failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ClinicError {
    /// Shorthand for building an [`ClinicError::InvalidData`]
    pub fn invalid(message: impl Into<String>) -> Self {
        ClinicError::InvalidData(message.into())
    }

    /// Returns true for the invalid-data kind
    pub fn is_invalid_data(&self) -> bool {
        matches!(self, ClinicError::InvalidData(_))
    }

    /// Returns true for any of the per-entity not-found kinds
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ClinicError::PatientNotFound(_)
                | ClinicError::DoctorNotFound(_)
                | ClinicError::AppointmentNotFound(_)
                | ClinicError::PrescriptionNotFound(_)
                | ClinicError::MedicalRecordNotFound(_)
        )
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for ClinicError {
    fn from(err: std::io::Error) -> Self {
        ClinicError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ClinicError {
    fn from(err: serde_json::Error) -> Self {
        ClinicError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ClinicError {
    fn from(err: toml::de::Error) -> Self {
        ClinicError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_data_display() {
        let err = ClinicError::invalid("Reason cannot be empty");
        assert_eq!(err.to_string(), "Invalid data: Reason cannot be empty");
    }

    #[test]
    fn test_not_found_display_is_bare_message() {
        let err = ClinicError::PatientNotFound("Patient not found with ID: PAT1".to_string());
        assert_eq!(err.to_string(), "Patient not found with ID: PAT1");
    }

    #[test]
    fn test_kind_predicates() {
        assert!(ClinicError::invalid("x").is_invalid_data());
        assert!(!ClinicError::invalid("x").is_not_found());

        for err in [
            ClinicError::PatientNotFound(String::new()),
            ClinicError::DoctorNotFound(String::new()),
            ClinicError::AppointmentNotFound(String::new()),
            ClinicError::PrescriptionNotFound(String::new()),
            ClinicError::MedicalRecordNotFound(String::new()),
        ] {
            assert!(err.is_not_found());
            assert!(!err.is_invalid_data());
        }

        assert!(!ClinicError::Storage("poisoned".to_string()).is_not_found());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: ClinicError = io_err.into();
        assert!(matches!(err, ClinicError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: ClinicError = json_err.into();
        assert!(matches!(err, ClinicError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: ClinicError = toml_err.into();
        assert!(matches!(err, ClinicError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_clinic_error_implements_std_error() {
        let err = ClinicError::invalid("Test error");
        let _: &dyn std::error::Error = &err;
    }
}
