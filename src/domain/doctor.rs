//! Doctor domain model

use super::ids::{Entity, EntityKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered doctor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    /// Doctor id (blank until registered)
    #[serde(default)]
    pub id: String,

    pub first_name: String,

    pub last_name: String,

    pub specialization: String,

    /// Exactly 10 digits
    pub phone_number: String,

    pub email: String,

    /// Must not be negative
    pub years_of_experience: i32,

    pub qualification: String,

    /// Whether the doctor is accepting appointments
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl Doctor {
    /// Creates an available doctor with a blank id
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        specialization: impl Into<String>,
        phone_number: impl Into<String>,
        email: impl Into<String>,
        years_of_experience: i32,
        qualification: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            specialization: specialization.into(),
            phone_number: phone_number.into(),
            email: email.into(),
            years_of_experience,
            qualification: qualification.into(),
            available: default_available(),
        }
    }

    /// Sets an explicit id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Returns "Dr. First Last"
    pub fn full_name(&self) -> String {
        format!("Dr. {} {}", self.first_name, self.last_name)
    }
}

impl Entity for Doctor {
    const KIND: EntityKind = EntityKind::Doctor;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl fmt::Display for Doctor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Doctor{{id='{}', name='{}', specialization='{}', experience={} years, qualification='{}', available={}}}",
            self.id,
            self.full_name(),
            self.specialization,
            self.years_of_experience,
            self.qualification,
            self.available
        )
    }
}
