//! Device location providers
//!
//! [`StaticLocationProvider`] serves a position fixed at configuration time,
//! standing in for platforms without a position source. [`CachedLocationProvider`]
//! wraps any provider with the caching and deadline semantics a dashboard
//! wants: a recent position is reused instead of re-resolving, and a resolver
//! that hangs is cut off after a timeout.

use std::{
    fmt,
    sync::Arc,
    time::{Duration, Instant},
};

use application::error::ApplicationError;
use application::ports::DeviceLocationPort;
use async_trait::async_trait;
use domain::GeoLocation;
use parking_lot::RwLock;
use tracing::{debug, instrument};

/// Provider answering every request with one configured position
#[derive(Debug, Clone)]
pub struct StaticLocationProvider {
    position: Option<GeoLocation>,
}

impl StaticLocationProvider {
    /// Provider that always resolves to `position`
    #[must_use]
    pub const fn new(position: GeoLocation) -> Self {
        Self {
            position: Some(position),
        }
    }

    /// Provider representing a device without any position source
    #[must_use]
    pub const fn unavailable() -> Self {
        Self { position: None }
    }
}

#[async_trait]
impl DeviceLocationPort for StaticLocationProvider {
    async fn current_position(&self) -> Result<GeoLocation, ApplicationError> {
        self.position.ok_or_else(|| {
            ApplicationError::geolocation("no position source configured for this device")
        })
    }
}

/// Caching and timeout wrapper around another location provider
pub struct CachedLocationProvider {
    inner: Arc<dyn DeviceLocationPort>,
    max_age: Duration,
    timeout: Duration,
    cached: RwLock<Option<(GeoLocation, Instant)>>,
}

impl fmt::Debug for CachedLocationProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedLocationProvider")
            .field("max_age", &self.max_age)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl CachedLocationProvider {
    /// Wrap `inner`, reusing positions younger than `max_age` and aborting
    /// resolutions slower than `timeout`
    pub fn new(inner: Arc<dyn DeviceLocationPort>, max_age: Duration, timeout: Duration) -> Self {
        Self {
            inner,
            max_age,
            timeout,
            cached: RwLock::new(None),
        }
    }

    fn fresh_position(&self) -> Option<GeoLocation> {
        let cached = self.cached.read();
        cached.and_then(|(position, resolved_at)| {
            (resolved_at.elapsed() < self.max_age).then_some(position)
        })
    }
}

#[async_trait]
impl DeviceLocationPort for CachedLocationProvider {
    #[instrument(skip(self))]
    async fn current_position(&self) -> Result<GeoLocation, ApplicationError> {
        if let Some(position) = self.fresh_position() {
            debug!(%position, "serving cached position");
            return Ok(position);
        }

        let position = tokio::time::timeout(self.timeout, self.inner.current_position())
            .await
            .map_err(|_| ApplicationError::geolocation("position request timed out"))??;

        *self.cached.write() = Some((position, Instant::now()));
        debug!(%position, "resolved fresh position");
        Ok(position)
    }
}
