//! API-key authentication.
//!
//! The expected key is resolved once at startup and passed in; nothing here reads the
//! process environment.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing x-api-key header")]
    MissingKey,
    #[error("Invalid API key")]
    InvalidKey,
}

/// Validates the provided API key against the expected one.
///
/// Both keys are hashed before a constant-time comparison, so neither their contents nor their
/// lengths affect timing.
///
/// Returns `Ok(())` if the key matches, or an error if it is invalid or missing.
pub fn validate_api_key(provided_key: Option<&str>, expected_key: &str) -> Result<(), AuthError> {
    let provided_key = provided_key.ok_or(AuthError::MissingKey)?;

    if bool::from(hash_key(provided_key).ct_eq(&hash_key(expected_key))) {
        Ok(())
    } else {
        Err(AuthError::InvalidKey)
    }
}

fn hash_key(key: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_matching_key() {
        assert_eq!(validate_api_key(Some("s3cret"), "s3cret"), Ok(()));
    }

    #[test]
    fn rejects_missing_or_wrong_key() {
        assert_eq!(validate_api_key(None, "s3cret"), Err(AuthError::MissingKey));
        assert_eq!(
            validate_api_key(Some("s3cret!"), "s3cret"),
            Err(AuthError::InvalidKey)
        );
        assert_eq!(
            validate_api_key(Some("S3CRET"), "s3cret"),
            Err(AuthError::InvalidKey)
        );
        assert_eq!(validate_api_key(Some(""), "s3cret"), Err(AuthError::InvalidKey));
    }
}
