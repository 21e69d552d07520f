//! Input validation utilities.
//!
//! This module contains functions for validating patient intake fields before they are
//! accepted into a triage session.

use crate::{TriageError, TriageResult};

/// Oldest accepted patient age in years.
pub const MAX_AGE_YEARS: u8 = 130;

/// Parses a patient age entered as free text.
///
/// # Errors
///
/// Returns a `TriageError::InvalidInput` if the value is not a whole number of years
/// between 0 and [`MAX_AGE_YEARS`].
pub fn parse_age(input: &str) -> TriageResult<u8> {
    let trimmed = input.trim();
    let age: u8 = trimmed
        .parse()
        .map_err(|_| TriageError::InvalidInput(format!("age must be a whole number, got '{trimmed}'")))?;

    if age > MAX_AGE_YEARS {
        return Err(TriageError::InvalidInput(format!(
            "age exceeds maximum of {} years",
            MAX_AGE_YEARS
        )));
    }

    Ok(age)
}

/// Validates a contact phone number.
///
/// Accepts digits, spaces and the punctuation commonly typed into phone fields
/// (`+`, `-`, `(`, `)`), between 7 and 20 characters long with at least 7 digits.
///
/// # Errors
///
/// Returns a `TriageError::InvalidInput` if the number is malformed.
pub fn validate_phone_number(phone: &str) -> TriageResult<()> {
    const MIN_LEN: usize = 7;
    const MAX_LEN: usize = 20;

    let phone = phone.trim();
    if phone.len() < MIN_LEN || phone.len() > MAX_LEN {
        return Err(TriageError::InvalidInput(format!(
            "phone number must be between {MIN_LEN} and {MAX_LEN} characters"
        )));
    }

    let ok = phone
        .bytes()
        .all(|b| matches!(b, b'0'..=b'9' | b' ' | b'+' | b'-' | b'(' | b')'));
    if !ok {
        return Err(TriageError::InvalidInput(
            "phone number contains invalid characters (only digits, spaces, '+', '-', '(', ')' allowed)"
                .into(),
        ));
    }

    if phone.bytes().filter(u8::is_ascii_digit).count() < MIN_LEN {
        return Err(TriageError::InvalidInput(format!(
            "phone number must contain at least {MIN_LEN} digits"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_age_accepts_whole_years() {
        assert_eq!(parse_age(" 34 ").expect("valid"), 34);
        assert_eq!(parse_age("0").expect("valid"), 0);
    }

    #[test]
    fn parse_age_rejects_bad_values() {
        assert!(parse_age("thirty").is_err());
        assert!(parse_age("-1").is_err());
        assert!(parse_age("131").is_err());
        assert!(parse_age("").is_err());
    }

    #[test]
    fn phone_numbers_are_checked() {
        assert!(validate_phone_number("+44 (0) 20-7946-0958").is_ok());
        assert!(validate_phone_number("0123456").is_ok());
        assert!(validate_phone_number("12345").is_err());
        assert!(validate_phone_number("call me maybe").is_err());
        assert!(validate_phone_number("+++ --- ( )").is_err());
    }
}
