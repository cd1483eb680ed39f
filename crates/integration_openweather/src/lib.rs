//! OpenWeatherMap integration
//!
//! Client for the OpenWeatherMap API (<https://openweathermap.org/api>):
//! current weather, the 5-day / 3-hour forecast, and forward and reverse
//! geocoding. All endpoints require an API key.

pub mod client;
mod models;

pub use client::{OpenWeatherApi, OpenWeatherClient, OpenWeatherConfig, OpenWeatherError};
pub use models::{
    CloudCover, ConditionEntry, Coordinates, CurrentWeatherResponse, ForecastCity, ForecastEntry,
    ForecastResponse, GeocodingEntry, SystemInfo, ThermalReadings, VolumeWindow, WindReadings,
};
