//! Persistence-facing domain models
//!
//! Models mirror the wire optionality of the DTOs: fields the wire may omit
//! are `Option<_>`, and the services establish presence before any write.
//! Identifiers are `Option<i32>` until storage assigns them on insert.

use crate::domain::errors::MedrecError;
use std::fmt;
use std::str::FromStr;

/// Medical specialty of a doctor.
///
/// The four values accepted by the records system; anything else is a
/// validation error at the mapping boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specialty {
    Dermatology,
    Orthopedics,
    Cardiology,
    Gynecology,
}

impl Specialty {
    /// Canonical wire spelling of the accepted values.
    pub const ACCEPTED: [&'static str; 4] =
        ["DERMATOLOGY", "ORTHOPEDICS", "CARDIOLOGY", "GYNECOLOGY"];

    /// Returns the canonical wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Specialty::Dermatology => "DERMATOLOGY",
            Specialty::Orthopedics => "ORTHOPEDICS",
            Specialty::Cardiology => "CARDIOLOGY",
            Specialty::Gynecology => "GYNECOLOGY",
        }
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Specialty {
    type Err = MedrecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DERMATOLOGY" => Ok(Specialty::Dermatology),
            "ORTHOPEDICS" => Ok(Specialty::Orthopedics),
            "CARDIOLOGY" => Ok(Specialty::Cardiology),
            "GYNECOLOGY" => Ok(Specialty::Gynecology),
            other => Err(MedrecError::validation(format!(
                "Invalid specialty '{}'. Must be one of: {}",
                other,
                Specialty::ACCEPTED.join(", ")
            ))),
        }
    }
}

/// A postal address owned by exactly one person.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressModel {
    pub id: Option<i32>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
}

/// A person record. Owns one [`AddressModel`] by composition: the address is
/// created and updated as part of the person's lifecycle, never shared.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonModel {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub tax_id: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub active: bool,
    pub address: AddressModel,
}

impl Default for PersonModel {
    fn default() -> Self {
        Self {
            id: None,
            name: None,
            tax_id: None,
            phone: None,
            email: None,
            // Records are created active; deactivation is the only way out.
            active: true,
            address: AddressModel::default(),
        }
    }
}

/// A doctor record: a 1:1 extension of a person sharing its id.
///
/// The doctor-specific columns (license code, specialty) are immutable after
/// creation; updates flow through the person and address sub-records only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DoctorModel {
    pub person: PersonModel,
    pub license_code: Option<String>,
    pub specialty: Option<Specialty>,
}
