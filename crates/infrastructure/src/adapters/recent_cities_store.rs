//! JSON file store for recently viewed cities
//!
//! One small JSON document on disk. A missing file is an empty list, and so
//! is an unreadable document: losing the recency list is never worth failing
//! a dashboard load over.

use std::path::{Path, PathBuf};

use application::error::ApplicationError;
use application::ports::{RecentCitiesStorePort, RecentCityList};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

/// Persists the recent city list as a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileRecentCitiesStore {
    path: PathBuf,
}

impl JsonFileRecentCitiesStore {
    /// Store backed by the file at `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecentCitiesStorePort for JsonFileRecentCitiesStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<RecentCityList, ApplicationError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("no recent cities file yet");
                return Ok(RecentCityList::new());
            }
            Err(err) => return Err(ApplicationError::storage(err.to_string())),
        };

        match serde_json::from_slice(&bytes) {
            Ok(list) => Ok(list),
            Err(err) => {
                warn!(error = %err, "recent cities file is unreadable, starting fresh");
                Ok(RecentCityList::new())
            }
        }
    }

    #[instrument(skip(self, list), fields(path = %self.path.display(), entries = list.len()))]
    async fn save(&self, list: &RecentCityList) -> Result<(), ApplicationError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| ApplicationError::storage(e.to_string()))?;
            }
        }

        let bytes = serde_json::to_vec_pretty(list)
            .map_err(|e| ApplicationError::storage(e.to_string()))?;

        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| ApplicationError::storage(e.to_string()))
    }
}
