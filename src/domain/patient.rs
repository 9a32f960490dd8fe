//! Patient domain model

use super::ids::{Entity, EntityKind};
use crate::core::dates;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered patient
///
/// Gender and blood group are kept in their textual form; the patient
/// service validates them on registration and update.
///
/// # Examples
///
/// ```
/// use clinica::domain::Patient;
/// use chrono::NaiveDate;
///
/// let patient = Patient::builder()
///     .first_name("Alice")
///     .last_name("Williams")
///     .date_of_birth(NaiveDate::from_ymd_opt(1990, 5, 15).unwrap())
///     .gender("Female")
///     .phone_number("9123456780")
///     .email("alice.w@email.com")
///     .address("123 Main St, City")
///     .blood_group("A+")
///     .build()
///     .unwrap();
///
/// assert_eq!(patient.full_name(), "Alice Williams");
/// assert!(patient.id.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    /// Patient id (blank until registered)
    #[serde(default)]
    pub id: String,

    pub first_name: String,

    pub last_name: String,

    pub date_of_birth: NaiveDate,

    /// One of Male, Female, Other (case-insensitive)
    pub gender: String,

    /// Exactly 10 digits
    pub phone_number: String,

    pub email: String,

    pub address: String,

    /// One of A+, A-, B+, B-, AB+, AB-, O+, O-
    pub blood_group: String,

    /// Set when the patient is registered; never changes afterwards
    pub registration_date: NaiveDate,
}

impl Patient {
    /// Returns a builder for constructing a patient
    pub fn builder() -> PatientBuilder {
        PatientBuilder::default()
    }

    /// Returns "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Age in whole years on the given day
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        dates::calculate_age(self.date_of_birth, today)
    }

    /// Age in whole years as of the local calendar date
    pub fn age(&self) -> u32 {
        self.age_on(Local::now().date_naive())
    }
}

impl Entity for Patient {
    const KIND: EntityKind = EntityKind::Patient;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Patient{{id='{}', name='{}', age={}, gender='{}', bloodGroup='{}'}}",
            self.id,
            self.full_name(),
            self.age(),
            self.gender,
            self.blood_group
        )
    }
}

/// Builder for constructing [`Patient`] instances
///
/// Every field except the id is required. The registration date defaults to
/// the local calendar date and is restamped by the patient service on
/// registration.
#[derive(Debug, Default)]
pub struct PatientBuilder {
    id: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    date_of_birth: Option<NaiveDate>,
    gender: Option<String>,
    phone_number: Option<String>,
    email: Option<String>,
    address: Option<String>,
    blood_group: Option<String>,
}

impl PatientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an explicit id instead of letting the service generate one
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn date_of_birth(mut self, date_of_birth: NaiveDate) -> Self {
        self.date_of_birth = Some(date_of_birth);
        self
    }

    pub fn gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn blood_group(mut self, blood_group: impl Into<String>) -> Self {
        self.blood_group = Some(blood_group.into());
        self
    }

    /// Builds the patient
    ///
    /// # Errors
    ///
    /// Returns an error naming the first missing field
    pub fn build(self) -> Result<Patient, String> {
        Ok(Patient {
            id: self.id.unwrap_or_default(),
            first_name: self.first_name.ok_or("first_name is required")?,
            last_name: self.last_name.ok_or("last_name is required")?,
            date_of_birth: self.date_of_birth.ok_or("date_of_birth is required")?,
            gender: self.gender.ok_or("gender is required")?,
            phone_number: self.phone_number.ok_or("phone_number is required")?,
            email: self.email.ok_or("email is required")?,
            address: self.address.ok_or("address is required")?,
            blood_group: self.blood_group.ok_or("blood_group is required")?,
            registration_date: Local::now().date_naive(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Patient {
        Patient::builder()
            .first_name("Bob")
            .last_name("Davis")
            .date_of_birth(NaiveDate::from_ymd_opt(1985, 8, 20).unwrap())
            .gender("Male")
            .phone_number("9123456781")
            .email("bob.d@email.com")
            .address("456 Oak Ave, Town")
            .blood_group("O+")
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_leaves_id_blank() {
        let patient = sample();
        assert!(patient.has_blank_id());
    }

    #[test]
    fn test_builder_missing_field() {
        let result = Patient::builder().first_name("Bob").build();
        assert!(result.unwrap_err().contains("last_name is required"));
    }

    #[test]
    fn test_age_on_before_and_after_birthday() {
        let patient = sample();
        let before = NaiveDate::from_ymd_opt(2025, 8, 19).unwrap();
        let on = NaiveDate::from_ymd_opt(2025, 8, 20).unwrap();
        assert_eq!(patient.age_on(before), 39);
        assert_eq!(patient.age_on(on), 40);
    }

    #[test]
    fn test_full_name() {
        assert_eq!(sample().full_name(), "Bob Davis");
    }

    #[test]
    fn test_serialization_roundtrip() {
        let patient = sample();
        let json = serde_json::to_string(&patient).unwrap();
        let back: Patient = serde_json::from_str(&json).unwrap();
        assert_eq!(patient, back);
    }
}
