//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains the OpenWeather adapter, device location providers, and the
//! on-disk recent cities store.

pub mod adapters;
pub mod config;

pub use adapters::*;
pub use config::{
    AppConfig, GeolocationAppConfig, PositionConfig, RecentCitiesAppConfig, ThrottleAppConfig,
};
