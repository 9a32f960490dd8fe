//! Field validation primitives
//!
//! Stateless predicates and assertions over scalar fields. Each `validate_*`
//! function returns `Ok(())` or a [`ClinicError::InvalidData`] whose message
//! names the offending field or the violated rule. Services call them in
//! field order and stop at the first violation.

use crate::domain::errors::ClinicError;
use crate::domain::result::Result;
use regex::Regex;
use std::sync::OnceLock;

/// Accepted blood groups, in display order
pub const BLOOD_GROUPS: [&str; 8] = ["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];

/// Accepted genders (compared case-insensitively)
pub const GENDERS: [&str; 3] = ["Male", "Female", "Other"];

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
            .expect("email pattern is a valid regex")
    })
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern is a valid regex"))
}

fn blood_group_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(A|B|AB|O)[+-]$").expect("blood group pattern is a valid regex")
    })
}

/// Fails if `value` is absent
///
/// # Examples
///
/// ```
/// use clinica::core::validation::validate_present;
///
/// assert!(validate_present(Some(&3), "Duration").is_ok());
/// let err = validate_present::<i32>(None, "Date").unwrap_err();
/// assert_eq!(err.to_string(), "Invalid data: Date cannot be null");
/// ```
pub fn validate_present<T>(value: Option<&T>, field_name: &str) -> Result<()> {
    match value {
        Some(_) => Ok(()),
        None => Err(ClinicError::invalid(format!("{field_name} cannot be null"))),
    }
}

/// Fails if `value` is empty after trimming whitespace
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClinicError::invalid(format!(
            "{field_name} cannot be empty"
        )));
    }
    Ok(())
}

/// Like [`validate_not_empty`], for optional text
pub fn validate_not_empty_opt(value: Option<&str>, field_name: &str) -> Result<()> {
    validate_not_empty(value.unwrap_or_default(), field_name)
}

/// Fails unless `email` looks like `local-part@domain.tld`
pub fn validate_email(email: &str) -> Result<()> {
    if !is_valid_email(email) {
        return Err(ClinicError::invalid(format!(
            "Invalid email format: {email}"
        )));
    }
    Ok(())
}

/// Fails unless `phone_number` is exactly 10 ASCII digits
pub fn validate_phone_number(phone_number: &str) -> Result<()> {
    if !is_valid_phone_number(phone_number) {
        return Err(ClinicError::invalid(format!(
            "Invalid phone number. Must be 10 digits: {phone_number}"
        )));
    }
    Ok(())
}

/// Fails unless `blood_group` is one of [`BLOOD_GROUPS`] (case-sensitive)
pub fn validate_blood_group(blood_group: &str) -> Result<()> {
    if !is_valid_blood_group(blood_group) {
        return Err(ClinicError::invalid(format!(
            "Invalid blood group. Must be A+, A-, B+, B-, AB+, AB-, O+, or O-: {blood_group}"
        )));
    }
    Ok(())
}

/// Fails unless `gender` is Male, Female or Other, ignoring case
pub fn validate_gender(gender: &str) -> Result<()> {
    if !is_valid_gender(gender) {
        return Err(ClinicError::invalid(
            "Invalid gender. Must be Male, Female, or Other",
        ));
    }
    Ok(())
}

/// Fails unless `value > 0`
pub fn validate_positive<T>(value: T, field_name: &str) -> Result<()>
where
    T: PartialOrd + Default,
{
    if value <= T::default() {
        return Err(ClinicError::invalid(format!(
            "{field_name} must be a positive number"
        )));
    }
    Ok(())
}

/// Fails unless `value >= 0`
pub fn validate_non_negative<T>(value: T, field_name: &str) -> Result<()>
where
    T: PartialOrd + Default,
{
    if value < T::default() {
        return Err(ClinicError::invalid(format!("{field_name} cannot be negative")));
    }
    Ok(())
}

/// Fails if `id` is blank or shorter than 3 characters
pub fn validate_id_format(id: &str, id_type: &str) -> Result<()> {
    validate_not_empty(id, id_type)?;
    if id.chars().count() < 3 {
        return Err(ClinicError::invalid(format!(
            "{id_type} must be at least 3 characters long"
        )));
    }
    Ok(())
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

pub fn is_valid_phone_number(phone_number: &str) -> bool {
    phone_pattern().is_match(phone_number)
}

pub fn is_valid_blood_group(blood_group: &str) -> bool {
    blood_group_pattern().is_match(blood_group)
}

pub fn is_valid_gender(gender: &str) -> bool {
    GENDERS.iter().any(|g| g.eq_ignore_ascii_case(gender))
}
