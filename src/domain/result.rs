//! Result type alias for Clinica
//!
//! This module provides a convenient Result type alias that uses ClinicError
//! as the error type.

use super::errors::ClinicError;

/// Result type alias for Clinica operations
///
/// # Examples
///
/// ```
/// use clinica::domain::result::Result;
/// use clinica::domain::errors::ClinicError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ClinicError::InvalidData("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ClinicError>;
