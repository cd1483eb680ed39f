//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain validation error (malformed input, never sent upstream)
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Upstream reachable but returned a non-success status for the query
    #[error("Not found: {0}")]
    NotFound(String),

    /// Transport-level failure, upstream unreachable
    #[error("Network error: {0}")]
    Network(String),

    /// Upstream responded but the body failed boundary validation
    #[error("Schema error: {0}")]
    Schema(String),

    /// Device location unavailable, denied, or timed out
    #[error("Geolocation error: {0}")]
    Geolocation(String),

    /// Persistence failure in a storage adapter
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ApplicationError {
    /// Convenience constructor for not-found errors
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Convenience constructor for network errors
    pub fn network(reason: impl Into<String>) -> Self {
        Self::Network(reason.into())
    }

    /// Convenience constructor for schema errors
    pub fn schema(reason: impl Into<String>) -> Self {
        Self::Schema(reason.into())
    }

    /// Convenience constructor for geolocation errors
    pub fn geolocation(reason: impl Into<String>) -> Self {
        Self::Geolocation(reason.into())
    }

    /// Convenience constructor for storage errors
    pub fn storage(reason: impl Into<String>) -> Self {
        Self::Storage(reason.into())
    }

    /// Check if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
