//! OpenWeatherMap wire models
//!
//! Mirrors the JSON shapes of the `/data/2.5` and `/geo/1.0` endpoints.
//! Fields the provider omits on some responses are `Option`; timestamps stay
//! as unix seconds, converting them is the caller's concern.

use serde::{Deserialize, Serialize};

/// Geographic coordinates as the provider reports them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// One entry of the `weather` condition array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionEntry {
    /// Provider condition code, e.g. 800 for clear sky
    pub id: u16,
    /// Condition group such as "Clear", "Rain", "Clouds"
    #[serde(rename = "main")]
    pub group: String,
    /// Human readable variant within the group
    pub description: String,
    /// Icon code such as "04d"
    pub icon: String,
}

/// The `main` block shared by current weather and forecast entries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermalReadings {
    pub temp: f64,
    pub feels_like: Option<f64>,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: Option<u16>,
    pub humidity: u8,
}

/// The `wind` block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindReadings {
    pub speed: f64,
    /// Direction in degrees from north, absent on calm reports
    pub deg: Option<u16>,
    pub gust: Option<f64>,
}

/// The `clouds` block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CloudCover {
    /// Cloudiness in percent
    pub all: u8,
}

/// Rain or snow volume over the trailing window
///
/// The provider reports `3h` on forecast entries and `1h` on current
/// weather; either can be missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeWindow {
    #[serde(rename = "3h", skip_serializing_if = "Option::is_none")]
    pub three_hour: Option<f64>,
    #[serde(rename = "1h", skip_serializing_if = "Option::is_none")]
    pub one_hour: Option<f64>,
}

/// The `sys` block of a current weather response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub country: Option<String>,
    /// Sunrise as unix seconds UTC
    pub sunrise: i64,
    /// Sunset as unix seconds UTC
    pub sunset: i64,
}

/// Payload of `GET /data/2.5/weather`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeatherResponse {
    pub coord: Coordinates,
    /// Conditions, primary entry first; empty is a provider contract breach
    pub weather: Vec<ConditionEntry>,
    pub main: ThermalReadings,
    /// Visibility in metres, capped at 10 km by the provider
    pub visibility: Option<u32>,
    pub wind: Option<WindReadings>,
    pub clouds: Option<CloudCover>,
    pub rain: Option<VolumeWindow>,
    pub snow: Option<VolumeWindow>,
    /// Observation time as unix seconds UTC
    pub dt: i64,
    pub sys: SystemInfo,
    /// Shift from UTC in seconds
    pub timezone: Option<i32>,
    pub name: String,
}

/// One 3-hour slot of a forecast response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Slot start as unix seconds UTC
    pub dt: i64,
    pub main: ThermalReadings,
    pub weather: Vec<ConditionEntry>,
    pub clouds: Option<CloudCover>,
    pub wind: Option<WindReadings>,
    pub visibility: Option<u32>,
    /// Probability of precipitation, 0.0 to 1.0
    pub pop: Option<f64>,
    pub rain: Option<VolumeWindow>,
    pub snow: Option<VolumeWindow>,
}

/// The `city` block of a forecast response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastCity {
    pub name: String,
    pub coord: Coordinates,
    pub country: Option<String>,
    pub timezone: Option<i32>,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

/// Payload of `GET /data/2.5/forecast`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    /// Slots in chronological order, up to 40 covering five days
    pub list: Vec<ForecastEntry>,
    pub city: ForecastCity,
}

/// One match from `GET /geo/1.0/direct` or `/geo/1.0/reverse`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodingEntry {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub country: Option<String>,
    pub state: Option<String>,
}
