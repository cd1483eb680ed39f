//! Weather data port
//!
//! Defines the interface for upstream current-conditions and forecast
//! retrieval. The adapter validates upstream payloads against explicit
//! schemas before anything crosses this boundary, so every sample seen here
//! is well formed; only genuinely optional readings remain `Option`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{CityName, GeoLocation, TemperatureUnit};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Weather condition reported by the upstream provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherCondition {
    /// Provider condition code
    pub id: u16,
    /// Condition group, e.g. "Rain" or "Clear"
    pub group: String,
    /// Human-readable description
    pub description: String,
    /// Provider icon identifier
    pub icon: String,
}

/// Accumulated precipitation volumes for one sample window
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PrecipitationVolume {
    /// Volume over the trailing 3-hour window, in mm
    pub three_hour: Option<f64>,
    /// Volume over the trailing 1-hour window, in mm
    pub one_hour: Option<f64>,
}

impl PrecipitationVolume {
    /// Effective volume in millimetres
    ///
    /// A positive 3-hour reading wins; otherwise the 1-hour reading is used;
    /// otherwise zero. A present-but-zero 3-hour value falls through to the
    /// 1-hour window, matching the upstream payloads where a zero window is
    /// omitted or meaningless.
    #[must_use]
    pub fn volume_mm(&self) -> f64 {
        match self.three_hour {
            Some(volume) if volume > 0.0 => volume,
            _ => self.one_hour.unwrap_or(0.0),
        }
    }
}

/// One upstream forecast entry at 3-hour cadence
///
/// Values are in the unit system the query requested; nothing downstream
/// converts them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    /// Forecast instant
    pub timestamp: DateTime<Utc>,
    /// Temperature
    pub temperature: f64,
    /// Apparent temperature, when reported
    pub feels_like: Option<f64>,
    /// Low end of the temperature range for this window
    pub temperature_min: f64,
    /// High end of the temperature range for this window
    pub temperature_max: f64,
    /// Relative humidity in percent (0-100)
    pub humidity: u8,
    /// Pressure in hPa, when reported
    pub pressure: Option<u16>,
    /// Wind speed
    pub wind_speed: f64,
    /// Wind direction in degrees, when reported
    pub wind_direction: Option<u16>,
    /// Cloud cover in percent, when reported
    pub cloud_cover: Option<u8>,
    /// Rain volumes, when reported
    pub rain: Option<PrecipitationVolume>,
    /// Snow volumes, when reported
    pub snow: Option<PrecipitationVolume>,
    /// Probability of precipitation in [0, 1], when reported
    pub precipitation_probability: Option<f64>,
    /// Weather condition (first upstream condition entry)
    pub condition: WeatherCondition,
}

impl RawSample {
    /// Combined rain and snow contribution of this sample in millimetres
    #[must_use]
    pub fn precipitation_mm(&self) -> f64 {
        self.rain.map_or(0.0, |r| r.volume_mm()) + self.snow.map_or(0.0, |s| s.volume_mm())
    }

    /// Probability of precipitation as an integer percentage (0-100)
    ///
    /// A missing probability counts as zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn probability_percent(&self) -> u8 {
        (self.precipitation_probability.unwrap_or(0.0) * 100.0).round() as u8
    }
}

/// Current weather snapshot for one place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Place name as reported by the provider
    pub city_name: String,
    /// Coordinates of the observation
    pub coordinates: GeoLocation,
    /// Temperature
    pub temperature: f64,
    /// Apparent temperature
    pub feels_like: f64,
    /// Low end of the current temperature range
    pub temperature_min: f64,
    /// High end of the current temperature range
    pub temperature_max: f64,
    /// Relative humidity in percent (0-100)
    pub humidity: u8,
    /// Pressure in hPa, standard sea-level pressure when unreported
    pub pressure: u16,
    /// Wind speed
    pub wind_speed: f64,
    /// Wind direction in degrees, `0` when unreported
    pub wind_direction: u16,
    /// Visibility in metres, when reported
    pub visibility: Option<u32>,
    /// Weather condition (first upstream condition entry)
    pub condition: WeatherCondition,
    /// Sunrise time
    pub sunrise: DateTime<Utc>,
    /// Sunset time
    pub sunset: DateTime<Utc>,
    /// ISO country code, when reported
    pub country: Option<String>,
    /// When this data was observed
    pub observed_at: DateTime<Utc>,
}

/// Port for upstream weather retrieval
///
/// One implementation per provider; the facade addresses it either by
/// validated city name or by coordinates.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherApiPort: Send + Sync {
    /// Current conditions for a city
    async fn current_by_city(
        &self,
        city: &CityName,
        units: TemperatureUnit,
    ) -> Result<CurrentConditions, ApplicationError>;

    /// Current conditions at coordinates
    async fn current_by_coordinates(
        &self,
        location: &GeoLocation,
        units: TemperatureUnit,
    ) -> Result<CurrentConditions, ApplicationError>;

    /// Chronologically ascending 3-hour forecast series for a city
    async fn forecast_by_city(
        &self,
        city: &CityName,
        units: TemperatureUnit,
    ) -> Result<Vec<RawSample>, ApplicationError>;

    /// Chronologically ascending 3-hour forecast series at coordinates
    async fn forecast_by_coordinates(
        &self,
        location: &GeoLocation,
        units: TemperatureUnit,
    ) -> Result<Vec<RawSample>, ApplicationError>;
}
