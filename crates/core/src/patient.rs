//! Patient intake.
//!
//! The intake form collects the identity that heads the session report. Every field is
//! required; a session cannot be started without them.

use crate::constants::MISSING_FIELDS_MESSAGE;
use crate::validation::{parse_age, validate_phone_number};
use crate::{TriageError, TriageResult};
use serde::{Deserialize, Serialize};
use triage_types::NonEmptyText;

/// Validated patient identity for one triage session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientDetails {
    pub name: NonEmptyText,
    pub age: u8,
    pub gender: NonEmptyText,
    pub phone_number: String,
}

impl PatientDetails {
    /// Validates raw intake fields.
    ///
    /// # Errors
    ///
    /// Returns a `TriageError::InvalidInput` if:
    /// - any field is blank ("All fields are required!"),
    /// - the age is not a whole number of years in range,
    /// - the phone number is malformed.
    pub fn new(name: &str, age: &str, gender: &str, phone_number: &str) -> TriageResult<Self> {
        if [name, age, gender, phone_number]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(TriageError::InvalidInput(MISSING_FIELDS_MESSAGE.into()));
        }

        let age = parse_age(age)?;
        validate_phone_number(phone_number)?;

        Ok(Self {
            name: NonEmptyText::new(name)?,
            age,
            gender: NonEmptyText::new(gender)?,
            phone_number: phone_number.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_and_parses_fields() {
        let patient = PatientDetails::new(" Amira Khan ", "29", "Female", " 07700 900123 ")
            .expect("valid intake");
        assert_eq!(patient.name.as_str(), "Amira Khan");
        assert_eq!(patient.age, 29);
        assert_eq!(patient.phone_number, "07700 900123");
    }

    #[test]
    fn new_requires_every_field() {
        let err = PatientDetails::new("Amira Khan", "29", " ", "07700 900123")
            .expect_err("missing gender");
        match err {
            TriageError::InvalidInput(msg) => assert_eq!(msg, MISSING_FIELDS_MESSAGE),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn new_rejects_non_numeric_age() {
        assert!(PatientDetails::new("Amira Khan", "twenty", "Female", "07700 900123").is_err());
    }
}
