//! Application configuration
//!
//! Loaded from an optional `skycast.toml` in the working directory, then
//! overridden by `SKYCAST_*` environment variables. Nested keys use a double
//! underscore, e.g. `SKYCAST_WEATHER__API_KEY` for `weather.api_key`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use application::services::ThrottleConfig;
use chrono_tz::Tz;
use domain::{DomainError, GeoLocation, TemperatureUnit};
use integration_openweather::OpenWeatherConfig;
use serde::{Deserialize, Serialize};

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Unit system applied until the user switches
    #[serde(default)]
    pub units: TemperatureUnit,

    /// Timezone used for daily forecast bucketing (default: UTC)
    #[serde(default = "default_timezone")]
    pub timezone: Tz,

    /// OpenWeatherMap access; the API key is the only required setting
    pub weather: OpenWeatherConfig,

    #[serde(default)]
    pub throttle: ThrottleAppConfig,

    #[serde(default)]
    pub geolocation: GeolocationAppConfig,

    #[serde(default)]
    pub recent_cities: RecentCitiesAppConfig,
}

fn default_timezone() -> Tz {
    chrono_tz::UTC
}

/// Request throttling section
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ThrottleAppConfig {
    /// Spacing between fired requests per input lane, in milliseconds
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
}

const fn default_min_interval_ms() -> u64 {
    2000
}

impl Default for ThrottleAppConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: default_min_interval_ms(),
        }
    }
}

impl ThrottleAppConfig {
    /// Convert into the throttle tuning used by the dashboard controller
    #[must_use]
    pub const fn to_throttle_config(self) -> ThrottleConfig {
        ThrottleConfig {
            min_interval: Duration::from_millis(self.min_interval_ms),
        }
    }
}

/// Device geolocation section
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeolocationAppConfig {
    /// Give up on a position resolution after this many seconds
    #[serde(default = "default_geolocation_timeout")]
    pub timeout_secs: u64,

    /// Reuse a resolved position for this many seconds
    #[serde(default = "default_geolocation_max_age")]
    pub max_age_secs: u64,

    /// Position to serve on hosts without a real position source
    #[serde(default)]
    pub default_position: Option<PositionConfig>,
}

const fn default_geolocation_timeout() -> u64 {
    10
}

const fn default_geolocation_max_age() -> u64 {
    300
}

impl Default for GeolocationAppConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_geolocation_timeout(),
            max_age_secs: default_geolocation_max_age(),
            default_position: None,
        }
    }
}

impl GeolocationAppConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[must_use]
    pub const fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_secs)
    }
}

/// A configured coordinate pair, validated on conversion
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PositionConfig {
    pub latitude: f64,
    pub longitude: f64,
}

impl PositionConfig {
    /// Validate into a domain location
    pub fn to_location(self) -> Result<GeoLocation, DomainError> {
        GeoLocation::new(self.latitude, self.longitude)
    }
}

/// Recent cities persistence section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentCitiesAppConfig {
    /// File the recency list is stored in
    #[serde(default = "default_recent_cities_path")]
    pub path: PathBuf,
}

fn default_recent_cities_path() -> PathBuf {
    PathBuf::from("recent_cities.json")
}

impl Default for RecentCitiesAppConfig {
    fn default() -> Self {
        Self {
            path: default_recent_cities_path(),
        }
    }
}

impl AppConfig {
    /// Load from `skycast.toml` (if present) and `SKYCAST_*` variables
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load with an explicit configuration file
    ///
    /// Environment variables still override file values.
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder();

        let builder = match path {
            Some(path) => builder.add_source(config::File::from(path)),
            None => builder.add_source(config::File::with_name("skycast").required(false)),
        };

        let builder = builder.add_source(
            config::Environment::with_prefix("SKYCAST")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}
