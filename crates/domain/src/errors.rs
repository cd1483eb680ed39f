//! Domain-level errors

use thiserror::Error;

/// Errors raised by domain validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// A value failed validation
    #[error("Validation error on {field}: {message}")]
    Validation {
        /// Name of the offending field
        field: String,
        /// What was wrong with it
        message: String,
    },

    /// Geographic coordinates outside the valid range
    #[error(
        "Invalid coordinates ({latitude}, {longitude}): latitude must be -90 to 90, longitude must be -180 to 180"
    )]
    InvalidCoordinates {
        /// Latitude as given
        latitude: f64,
        /// Longitude as given
        longitude: f64,
    },

    /// Unit system name that is neither metric nor imperial
    #[error("Unknown unit system: {0}. Use 'metric' or 'imperial'")]
    UnknownUnitSystem(String),
}

impl DomainError {
    /// Convenience constructor for validation errors
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_message() {
        let err = DomainError::validation("city_name", "cannot be empty");
        assert_eq!(
            err.to_string(),
            "Validation error on city_name: cannot be empty"
        );
    }

    #[test]
    fn invalid_coordinates_message() {
        let err = DomainError::InvalidCoordinates {
            latitude: 91.0,
            longitude: 0.0,
        };
        assert!(err.to_string().contains("(91, 0)"));
        assert!(err.to_string().contains("latitude must be -90 to 90"));
    }

    #[test]
    fn unknown_unit_system_message() {
        let err = DomainError::UnknownUnitSystem("kelvin".to_string());
        assert_eq!(
            err.to_string(),
            "Unknown unit system: kelvin. Use 'metric' or 'imperial'"
        );
    }

    #[test]
    fn errors_are_comparable() {
        assert_eq!(
            DomainError::validation("a", "b"),
            DomainError::validation("a", "b")
        );
        assert_ne!(
            DomainError::validation("a", "b"),
            DomainError::UnknownUnitSystem("a".to_string())
        );
    }
}
