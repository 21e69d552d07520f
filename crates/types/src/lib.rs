//! Validated primitive types shared across the triage crates.
//!
//! Values of these types are checked once, at construction, so code further in never has to
//! re-validate a patient name or a severity rating.

/// Errors that can occur when creating validated types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TypesError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    EmptyText,
    /// A severity rating outside the 1-10 scale
    #[error("severity must be between {min} and {max}, got {value}", min = Severity::MIN, max = Severity::MAX)]
    SeverityOutOfRange { value: i64 },
}

/// A string type that guarantees non-empty content.
///
/// The input is trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// # Returns
    ///
    /// Returns `Ok(NonEmptyText)` if the trimmed input is non-empty,
    /// or `Err(TypesError::EmptyText)` if it's empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TypesError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TypesError::EmptyText);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A user-reported symptom intensity on the integer 1-10 scale.
///
/// A severity of 5 is neutral for scoring purposes and is the value a symptom
/// starts with when first selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Severity(u8);

impl Severity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Severity assigned to a symptom that has been selected but not adjusted.
    pub const DEFAULT: Severity = Severity(5);

    /// Creates a severity, rejecting values outside 1..=10.
    pub fn new(value: i64) -> Result<Self, TypesError> {
        if value < i64::from(Self::MIN) || value > i64::from(Self::MAX) {
            return Err(TypesError::SeverityOutOfRange { value });
        }
        Ok(Self(value as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Severity {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Severity {
    type Error = TypesError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.0
    }
}

impl serde::Serialize for Severity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        Severity::new(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_input() {
        let text = NonEmptyText::new("  Jane Doe ").expect("valid text");
        assert_eq!(text.as_str(), "Jane Doe");
    }

    #[test]
    fn non_empty_text_rejects_whitespace() {
        assert_eq!(NonEmptyText::new("   "), Err(TypesError::EmptyText));
    }

    #[test]
    fn severity_accepts_scale_bounds() {
        assert_eq!(Severity::new(1).expect("min").value(), 1);
        assert_eq!(Severity::new(10).expect("max").value(), 10);
        assert_eq!(Severity::default().value(), 5);
    }

    #[test]
    fn severity_rejects_out_of_range() {
        assert_eq!(
            Severity::new(0),
            Err(TypesError::SeverityOutOfRange { value: 0 })
        );
        assert!(Severity::new(11).is_err());
        assert!(Severity::new(-3).is_err());
    }

    #[test]
    fn severity_deserialize_validates() {
        let ok: Severity = serde_json::from_str("7").expect("in range");
        assert_eq!(ok.value(), 7);

        let err = serde_json::from_str::<Severity>("42").expect_err("out of range");
        assert!(err.to_string().contains("between 1 and 10"));
    }
}
