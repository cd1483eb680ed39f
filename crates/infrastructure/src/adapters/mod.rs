//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod location_provider;
mod recent_cities_store;
mod weather_adapter;

pub use location_provider::{CachedLocationProvider, StaticLocationProvider};
pub use recent_cities_store::JsonFileRecentCitiesStore;
pub use weather_adapter::OpenWeatherAdapter;
