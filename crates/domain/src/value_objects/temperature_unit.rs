//! Unit system selection for upstream queries and display

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Unit system for temperatures and wind speeds
///
/// Every value in one query batch is in the system requested here; the
/// aggregation pipeline never converts between systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    /// Celsius and metres per second
    #[default]
    Metric,
    /// Fahrenheit and miles per hour
    Imperial,
}

impl TemperatureUnit {
    /// Value of the upstream `units` query parameter
    #[must_use]
    pub const fn api_value(&self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }

    /// Display symbol for temperatures
    #[must_use]
    pub const fn temperature_symbol(&self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
        }
    }

    /// Display label for wind speeds
    #[must_use]
    pub const fn wind_speed_unit(&self) -> &'static str {
        match self {
            Self::Metric => "m/s",
            Self::Imperial => "mph",
        }
    }

    /// The other unit system
    #[must_use]
    pub const fn toggled(&self) -> Self {
        match self {
            Self::Metric => Self::Imperial,
            Self::Imperial => Self::Metric,
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.api_value())
    }
}

impl FromStr for TemperatureUnit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" => Ok(Self::Metric),
            "imperial" => Ok(Self::Imperial),
            other => Err(DomainError::UnknownUnitSystem(other.to_string())),
        }
    }
}
