//! Hourly forecast projection
//!
//! Takes the leading slice of the upstream 3-hour series verbatim. Unlike the
//! daily aggregation there is no bucketing and no today-exclusion: the next
//! samples are exactly what a "coming hours" strip should show.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ports::{RawSample, WeatherCondition};

/// Number of leading samples projected
pub const HOURLY_WINDOW: usize = 8;

/// Standard sea-level pressure used when the upstream sample omits one
pub const DEFAULT_PRESSURE_HPA: u16 = 1013;

/// One upcoming 3-hour slot, gaps filled with neutral defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySummary {
    /// Start of the slot
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    /// Falls back to `temperature` when the sample has no perceived value
    pub feels_like: f64,
    pub condition: WeatherCondition,
    /// Probability of precipitation, percent
    pub precipitation_probability: u8,
    pub wind_speed: f64,
    /// Degrees from north, `0` when unreported
    pub wind_direction: u16,
    pub humidity: u8,
    /// Percent, `0` when unreported
    pub cloud_cover: u8,
    /// hPa, [`DEFAULT_PRESSURE_HPA`] when unreported
    pub pressure: u16,
}

impl HourlySummary {
    fn from_sample(sample: &RawSample) -> Self {
        Self {
            timestamp: sample.timestamp,
            temperature: sample.temperature,
            feels_like: sample.feels_like.unwrap_or(sample.temperature),
            condition: sample.condition.clone(),
            precipitation_probability: sample.probability_percent(),
            wind_speed: sample.wind_speed,
            wind_direction: sample.wind_direction.unwrap_or(0),
            humidity: sample.humidity,
            cloud_cover: sample.cloud_cover.unwrap_or(0),
            pressure: sample.pressure.unwrap_or(DEFAULT_PRESSURE_HPA),
        }
    }
}

/// Project the first [`HOURLY_WINDOW`] samples in their upstream order
#[must_use]
pub fn project_hourly(samples: &[RawSample]) -> Vec<HourlySummary> {
    samples
        .iter()
        .take(HOURLY_WINDOW)
        .map(HourlySummary::from_sample)
        .collect()
}
