//! Geocoding port
//!
//! City-name prefix search and reverse lookup from coordinates.

use async_trait::async_trait;
use domain::{CityName, GeoLocation};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Default number of candidates returned by a prefix search
pub const DEFAULT_SEARCH_LIMIT: u8 = 5;

/// One geocoding candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    /// Place name
    pub name: String,
    /// Resolved coordinates
    pub location: GeoLocation,
    /// ISO country code, when known
    pub country: Option<String>,
    /// State or region, when known
    pub state: Option<String>,
}

impl PlaceCandidate {
    /// Label combining name, state, and country for display
    #[must_use]
    pub fn label(&self) -> String {
        let mut label = self.name.clone();
        if let Some(state) = &self.state {
            label.push_str(", ");
            label.push_str(state);
        }
        if let Some(country) = &self.country {
            label.push_str(", ");
            label.push_str(country);
        }
        label
    }
}

/// Port for place lookups
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Search candidate places by name prefix
    async fn search(
        &self,
        query: &CityName,
        limit: u8,
    ) -> Result<Vec<PlaceCandidate>, ApplicationError>;

    /// Resolve coordinates to the nearest known place
    ///
    /// Returns `None` when the provider knows no place at these coordinates.
    async fn reverse(
        &self,
        location: &GeoLocation,
    ) -> Result<Option<PlaceCandidate>, ApplicationError>;
}
