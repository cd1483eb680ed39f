//! Geographic location value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A validated latitude/longitude pair
///
/// Latitude is bounded to [-90, 90] and longitude to [-180, 180]; values are
/// checked at construction so downstream code never sees out-of-range
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    latitude: f64,
    longitude: f64,
}

impl GeoLocation {
    /// Create a new location with range validation
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidCoordinates`] when either value is out
    /// of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create a location without validation
    ///
    /// The caller must guarantee both values are in range; intended for
    /// compile-time constants.
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Latitude in decimal degrees
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// London, United Kingdom
    #[must_use]
    pub const fn london() -> Self {
        Self::new_unchecked(51.5074, -0.1278)
    }

    /// New York City, United States
    #[must_use]
    pub const fn new_york() -> Self {
        Self::new_unchecked(40.7128, -74.0060)
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}
