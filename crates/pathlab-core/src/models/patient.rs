//! Patient models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Patient gender as recorded at registration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a gender string is not one of Male/Female/Other.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown gender: {0}")]
pub struct ParseGenderError(pub String);

impl FromStr for Gender {
    type Err = ParseGenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "other" | "o" => Ok(Gender::Other),
            _ => Err(ParseGenderError(s.to_string())),
        }
    }
}

/// A registered patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Sequential identifier (e.g. "P001")
    pub id: String,
    /// Full name
    pub name: String,
    /// Age in years
    pub age: u32,
    pub gender: Gender,
    /// Phone number or other contact string
    pub contact: String,
}

/// Registration details for a patient that has no identifier yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPatient {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub contact: String,
}

impl NewPatient {
    pub fn new(name: impl Into<String>, age: u32, gender: Gender, contact: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            gender,
            contact: contact.into(),
        }
    }

    /// Attach an identifier, producing the stored record.
    pub fn with_id(self, id: String) -> Patient {
        Patient {
            id,
            name: self.name.trim().to_string(),
            age: self.age,
            gender: self.gender,
            contact: self.contact.trim().to_string(),
        }
    }
}

impl Patient {
    /// Compare against an identifier typed into the patient portal.
    pub fn matches_id(&self, id: &str) -> bool {
        self.id.eq_ignore_ascii_case(id.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_parse() {
        assert_eq!("Male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!(" OTHER ".parse::<Gender>().unwrap(), Gender::Other);
    }

    #[test]
    fn test_gender_parse_rejects_unknown() {
        let err = "unknown".parse::<Gender>().unwrap_err();
        assert_eq!(err, ParseGenderError("unknown".into()));
    }

    #[test]
    fn test_with_id_trims() {
        let patient = NewPatient::new("  Ravi Kumar ", 34, Gender::Male, " 9876543210").with_id("P001".into());
        assert_eq!(patient.id, "P001");
        assert_eq!(patient.name, "Ravi Kumar");
        assert_eq!(patient.contact, "9876543210");
    }

    #[test]
    fn test_matches_id_case_insensitive() {
        let patient = NewPatient::new("Sita", 28, Gender::Female, "").with_id("P002".into());
        assert!(patient.matches_id("p002"));
        assert!(!patient.matches_id("P003"));
    }
}
