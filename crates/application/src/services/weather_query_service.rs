//! Weather query facade
//!
//! Single entry point for a dashboard refresh: resolves one query against the
//! upstream provider and derives the daily and hourly strips from the same
//! forecast series.

use std::{fmt, sync::Arc};

use chrono::Utc;
use chrono_tz::Tz;
use domain::{CityName, GeoLocation, TemperatureUnit};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{
    error::ApplicationError,
    ports::{CurrentConditions, RawSample, WeatherApiPort},
    services::{
        daily_forecast::{DailySummary, aggregate_daily},
        hourly_forecast::{HourlySummary, project_hourly},
    },
};

/// Location a weather request resolves against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WeatherQuery {
    /// Look up by city name
    City(CityName),
    /// Look up by coordinates, typically from device geolocation
    Coordinates(GeoLocation),
}

impl fmt::Display for WeatherQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::City(name) => write!(f, "{name}"),
            Self::Coordinates(location) => write!(f, "{location}"),
        }
    }
}

/// Everything one dashboard refresh needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastBundle {
    /// Conditions right now
    pub current: CurrentConditions,
    /// Upcoming days, today excluded
    pub daily: Vec<DailySummary>,
    /// Upcoming 3-hour slots, starting now
    pub hourly: Vec<HourlySummary>,
    /// Unit system the numbers were fetched in
    pub units: TemperatureUnit,
}

/// Facade combining current conditions with the derived forecast strips
pub struct WeatherQueryService {
    weather: Arc<dyn WeatherApiPort>,
    zone: Tz,
}

impl fmt::Debug for WeatherQueryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherQueryService")
            .field("zone", &self.zone)
            .finish_non_exhaustive()
    }
}

impl WeatherQueryService {
    /// Create a new weather query service
    ///
    /// `zone` is the timezone used for daily bucketing and for deciding
    /// which samples count as today.
    pub fn new(weather: Arc<dyn WeatherApiPort>, zone: Tz) -> Self {
        Self { weather, zone }
    }

    /// Current conditions for the query location
    #[instrument(skip(self))]
    pub async fn current(
        &self,
        query: &WeatherQuery,
        units: TemperatureUnit,
    ) -> Result<CurrentConditions, ApplicationError> {
        match query {
            WeatherQuery::City(name) => self.weather.current_by_city(name, units).await,
            WeatherQuery::Coordinates(location) => {
                self.weather.current_by_coordinates(location, units).await
            }
        }
    }

    /// Raw 3-hour forecast series for the query location
    #[instrument(skip(self))]
    pub async fn forecast_samples(
        &self,
        query: &WeatherQuery,
        units: TemperatureUnit,
    ) -> Result<Vec<RawSample>, ApplicationError> {
        match query {
            WeatherQuery::City(name) => self.weather.forecast_by_city(name, units).await,
            WeatherQuery::Coordinates(location) => {
                self.weather.forecast_by_coordinates(location, units).await
            }
        }
    }

    /// Current conditions plus derived strips as one bundle
    ///
    /// Both upstream calls run concurrently. The first failure aborts the
    /// other and becomes the bundle's error; there is no partial result.
    #[instrument(skip(self))]
    pub async fn complete_forecast(
        &self,
        query: &WeatherQuery,
        units: TemperatureUnit,
    ) -> Result<ForecastBundle, ApplicationError> {
        info!(%query, "fetching complete forecast");

        let (current, samples) = tokio::try_join!(
            self.current(query, units),
            self.forecast_samples(query, units),
        )?;

        Ok(self.compose(current, &samples, units))
    }

    fn compose(
        &self,
        current: CurrentConditions,
        samples: &[RawSample],
        units: TemperatureUnit,
    ) -> ForecastBundle {
        let today = Utc::now().with_timezone(&self.zone).date_naive();
        let daily = aggregate_daily(samples, today, self.zone);
        let hourly = project_hourly(samples);

        debug!(
            daily = daily.len(),
            hourly = hourly.len(),
            "composed forecast bundle"
        );

        ForecastBundle {
            current,
            daily,
            hourly,
            units,
        }
    }
}
