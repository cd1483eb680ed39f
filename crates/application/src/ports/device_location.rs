//! Device location port
//!
//! Produces the position the dashboard uses when no city is given. Adapters
//! decide where positions come from (configuration, a cached previous fix, a
//! platform service) and surface failures as geolocation errors.

use async_trait::async_trait;
use domain::GeoLocation;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for resolving the device's current position
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DeviceLocationPort: Send + Sync {
    /// Resolve the current position
    ///
    /// Fails with [`ApplicationError::Geolocation`] when the position is
    /// unavailable, denied, or the request times out.
    async fn current_position(&self) -> Result<GeoLocation, ApplicationError>;
}
