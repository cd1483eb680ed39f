//! Value Objects - Immutable, identity-less domain primitives

mod city_name;
mod geo_location;
mod temperature_unit;

pub use city_name::CityName;
pub use geo_location::GeoLocation;
pub use temperature_unit::TemperatureUnit;
