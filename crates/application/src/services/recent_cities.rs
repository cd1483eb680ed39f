//! Recently viewed cities
//!
//! Thin service over the persistence port: loads the list, applies one
//! mutation, writes it back. The most-recently-used ordering itself lives on
//! [`RecentCityList`].

use std::{fmt, sync::Arc};

use chrono::Utc;
use tracing::{debug, instrument};

use crate::{
    error::ApplicationError,
    ports::{RecentCitiesStorePort, RecentCity, RecentCityList},
};

/// Service managing the recently viewed city list
pub struct RecentCitiesService {
    store: Arc<dyn RecentCitiesStorePort>,
}

impl fmt::Debug for RecentCitiesService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecentCitiesService").finish_non_exhaustive()
    }
}

impl RecentCitiesService {
    /// Create a new recent cities service
    pub fn new(store: Arc<dyn RecentCitiesStorePort>) -> Self {
        Self { store }
    }

    /// Cities in most-recently-viewed order
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<RecentCity>, ApplicationError> {
        let list = self.store.load().await?;
        Ok(list.entries().to_vec())
    }

    /// Move a city to the front of the list, inserting it if new
    #[instrument(skip(self))]
    pub async fn record_view(
        &self,
        name: &str,
        country: Option<&str>,
    ) -> Result<(), ApplicationError> {
        let mut list = self.store.load().await?;
        list.record(name, country, Utc::now());
        debug!(city = name, total = list.len(), "recorded city view");
        self.store.save(&list).await
    }

    /// Drop one city from the list; unknown names are a no-op
    #[instrument(skip(self))]
    pub async fn remove(&self, name: &str) -> Result<(), ApplicationError> {
        let mut list = self.store.load().await?;
        list.remove(name);
        self.store.save(&list).await
    }

    /// Empty the list
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), ApplicationError> {
        self.store.save(&RecentCityList::new()).await
    }
}
