//! Recent cities storage port
//!
//! Persists the bounded most-recently-viewed city list between sessions.
//! The list itself is a plain serializable structure; adapters only move it
//! in and out of storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Maximum number of entries the list retains
pub const RECENT_CITIES_CAPACITY: usize = 5;

/// One remembered city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentCity {
    /// City name as reported by the provider
    pub name: String,
    /// ISO country code, when known
    pub country: Option<String>,
    /// When the city was last viewed
    pub last_viewed: DateTime<Utc>,
}

/// Bounded most-recently-used city list
///
/// Newest entries first; names are de-duplicated case-insensitively; never
/// grows beyond [`RECENT_CITIES_CAPACITY`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentCityList {
    entries: Vec<RecentCity>,
}

impl RecentCityList {
    /// Create an empty list
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a viewed city at the front of the list
    ///
    /// An existing entry with the same name (any case) is replaced rather
    /// than duplicated; the list is then truncated to capacity.
    pub fn record(&mut self, name: &str, country: Option<&str>, now: DateTime<Utc>) {
        let lowered = name.to_lowercase();
        self.entries.retain(|e| e.name.to_lowercase() != lowered);
        self.entries.insert(
            0,
            RecentCity {
                name: name.to_string(),
                country: country.map(ToString::to_string),
                last_viewed: now,
            },
        );
        self.entries.truncate(RECENT_CITIES_CAPACITY);
    }

    /// Remove an entry by name, case-insensitively
    pub fn remove(&mut self, name: &str) {
        let lowered = name.to_lowercase();
        self.entries.retain(|e| e.name.to_lowercase() != lowered);
    }

    /// Drop all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries, newest first
    #[must_use]
    pub fn entries(&self) -> &[RecentCity] {
        &self.entries
    }

    /// Number of remembered cities
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Port for loading and saving the recent-cities list
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RecentCitiesStorePort: Send + Sync {
    /// Load the persisted list; an absent store yields an empty list
    async fn load(&self) -> Result<RecentCityList, ApplicationError>;

    /// Persist the full list
    async fn save(&self, list: &RecentCityList) -> Result<(), ApplicationError>;
}
