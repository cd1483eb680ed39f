//! City name value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A validated city name for upstream weather and geocoding queries
///
/// Accepts letters, whitespace, commas, hyphens, apostrophes, and periods,
/// up to 100 characters. Anything else (including accented letters) is
/// rejected before a request is ever built from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CityName(String);

impl CityName {
    /// Maximum accepted length in characters
    pub const MAX_LENGTH: usize = 100;

    /// Create a new city name with validation
    ///
    /// # Errors
    ///
    /// Returns a validation error when the name is empty or whitespace-only,
    /// longer than [`Self::MAX_LENGTH`] characters, or contains characters
    /// outside letters, whitespace, `,`, `-`, `'`, and `.`.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(DomainError::validation("city_name", "cannot be empty"));
        }
        if name.chars().count() > Self::MAX_LENGTH {
            return Err(DomainError::validation(
                "city_name",
                format!("must be at most {} characters", Self::MAX_LENGTH),
            ));
        }
        if !name.chars().all(Self::is_allowed_char) {
            return Err(DomainError::validation(
                "city_name",
                "contains invalid characters",
            ));
        }

        Ok(Self(name))
    }

    /// Get the city name as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_allowed_char(c: char) -> bool {
        c.is_ascii_alphabetic() || c.is_whitespace() || matches!(c, ',' | '-' | '\'' | '.')
    }
}

impl fmt::Display for CityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CityName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CityName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for CityName {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for CityName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_name() {
        let city = CityName::new("London").unwrap();
        assert_eq!(city.as_str(), "London");
    }

    #[test]
    fn accepts_name_with_space() {
        assert!(CityName::new("New York").is_ok());
    }

    #[test]
    fn accepts_apostrophe_comma_and_period() {
        assert!(CityName::new("O'Fallon, MO").is_ok());
        assert!(CityName::new("St. Louis").is_ok());
    }

    #[test]
    fn accepts_hyphenated_name() {
        assert!(CityName::new("Winston-Salem").is_ok());
    }

    #[test]
    fn rejects_empty() {
        let err = CityName::new("").unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn rejects_whitespace_only() {
        assert!(CityName::new("   ").is_err());
    }

    #[test]
    fn rejects_accented_characters() {
        let err = CityName::new("São Paulo").unwrap_err();
        assert!(err.to_string().contains("invalid characters"));
        assert!(CityName::new("München").is_err());
    }

    #[test]
    fn rejects_digits_and_symbols() {
        assert!(CityName::new("District 9").is_err());
        assert!(CityName::new("Tokyo!").is_err());
        assert!(CityName::new("<script>").is_err());
    }

    #[test]
    fn length_boundary() {
        let at_limit = "a".repeat(CityName::MAX_LENGTH);
        assert!(CityName::new(at_limit).is_ok());

        let over_limit = "a".repeat(CityName::MAX_LENGTH + 1);
        let err = CityName::new(over_limit).unwrap_err();
        assert!(err.to_string().contains("at most 100 characters"));
    }

    #[test]
    fn display_and_as_ref() {
        let city = CityName::new("New York").unwrap();
        assert_eq!(format!("{city}"), "New York");
        assert_eq!(city.as_ref(), "New York");
    }

    #[test]
    fn try_from_and_from_str() {
        assert!(CityName::try_from("Paris").is_ok());
        assert!(CityName::try_from(String::from("Paris")).is_ok());
        assert!("Paris".parse::<CityName>().is_ok());
        assert!("Pàris".parse::<CityName>().is_err());
    }

    #[test]
    fn serde_is_transparent() {
        let city = CityName::new("New York").unwrap();
        let json = serde_json::to_string(&city).unwrap();
        assert_eq!(json, "\"New York\"");

        let back: CityName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, city);
    }
}
