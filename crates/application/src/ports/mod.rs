//! Port definitions for the application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement them.

mod device_location;
mod geocoding;
mod recent_cities_store;
mod weather_api;

#[cfg(test)]
pub use device_location::MockDeviceLocationPort;
pub use device_location::DeviceLocationPort;
#[cfg(test)]
pub use geocoding::MockGeocodingPort;
pub use geocoding::{DEFAULT_SEARCH_LIMIT, GeocodingPort, PlaceCandidate};
#[cfg(test)]
pub use recent_cities_store::MockRecentCitiesStorePort;
pub use recent_cities_store::{
    RECENT_CITIES_CAPACITY, RecentCitiesStorePort, RecentCity, RecentCityList,
};
#[cfg(test)]
pub use weather_api::MockWeatherApiPort;
pub use weather_api::{
    CurrentConditions, PrecipitationVolume, RawSample, WeatherApiPort, WeatherCondition,
};
