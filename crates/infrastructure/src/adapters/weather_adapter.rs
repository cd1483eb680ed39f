//! Weather adapter - implements the weather and geocoding ports over
//! `integration_openweather`
//!
//! Maps provider wire models into application DTOs and collapses the
//! provider's error zoo into the application taxonomy: transport failures
//! become `Network`, undecodable or contract-breaking bodies become
//! `Schema`, and every upstream non-success status is reported as the
//! query failing to resolve.

use application::error::ApplicationError;
use application::ports::{
    CurrentConditions, GeocodingPort, PlaceCandidate, PrecipitationVolume, RawSample,
    WeatherApiPort, WeatherCondition,
};
use application::services::DEFAULT_PRESSURE_HPA;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{CityName, GeoLocation, TemperatureUnit};
use integration_openweather::{
    ConditionEntry, CurrentWeatherResponse, ForecastEntry, GeocodingEntry, OpenWeatherApi,
    OpenWeatherClient, OpenWeatherConfig, OpenWeatherError, VolumeWindow,
};
use tracing::{debug, instrument, warn};

/// Adapter for weather and place lookups via OpenWeatherMap
pub struct OpenWeatherAdapter {
    client: OpenWeatherClient,
}

impl std::fmt::Debug for OpenWeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherAdapter")
            .field("client", &"OpenWeatherClient")
            .finish()
    }
}

impl OpenWeatherAdapter {
    /// Create a new adapter from provider configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: OpenWeatherConfig) -> Result<Self, ApplicationError> {
        let client =
            OpenWeatherClient::new(config).map_err(|e| ApplicationError::network(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map a provider error to the application taxonomy
    fn map_error(err: OpenWeatherError) -> ApplicationError {
        match err {
            OpenWeatherError::ConnectionFailed(e) => ApplicationError::network(e),
            OpenWeatherError::ParseError(e) => ApplicationError::schema(e),
            OpenWeatherError::NotFound
            | OpenWeatherError::Unauthorized
            | OpenWeatherError::RateLimitExceeded
            | OpenWeatherError::ServiceUnavailable(_)
            | OpenWeatherError::RequestFailed { .. } => {
                ApplicationError::not_found(err.to_string())
            }
        }
    }

    fn map_condition(entry: &ConditionEntry) -> WeatherCondition {
        WeatherCondition {
            id: entry.id,
            group: entry.group.clone(),
            description: entry.description.clone(),
            icon: entry.icon.clone(),
        }
    }

    const fn map_volume(window: VolumeWindow) -> PrecipitationVolume {
        PrecipitationVolume {
            three_hour: window.three_hour,
            one_hour: window.one_hour,
        }
    }

    fn timestamp(seconds: i64) -> Result<DateTime<Utc>, ApplicationError> {
        DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| ApplicationError::schema(format!("timestamp out of range: {seconds}")))
    }

    /// Map a current weather response, rejecting contract breaches
    fn map_current(
        response: CurrentWeatherResponse,
    ) -> Result<CurrentConditions, ApplicationError> {
        let condition = response
            .weather
            .first()
            .map(Self::map_condition)
            .ok_or_else(|| ApplicationError::schema("weather condition array is empty"))?;

        let coordinates = GeoLocation::new(response.coord.lat, response.coord.lon)
            .map_err(|e| ApplicationError::schema(e.to_string()))?;

        Ok(CurrentConditions {
            city_name: response.name,
            coordinates,
            temperature: response.main.temp,
            feels_like: response.main.feels_like.unwrap_or(response.main.temp),
            temperature_min: response.main.temp_min,
            temperature_max: response.main.temp_max,
            humidity: response.main.humidity,
            pressure: response.main.pressure.unwrap_or(DEFAULT_PRESSURE_HPA),
            wind_speed: response.wind.map_or(0.0, |w| w.speed),
            wind_direction: response.wind.and_then(|w| w.deg).unwrap_or(0),
            visibility: response.visibility,
            condition,
            sunrise: Self::timestamp(response.sys.sunrise)?,
            sunset: Self::timestamp(response.sys.sunset)?,
            observed_at: Self::timestamp(response.dt)?,
            country: response.sys.country,
        })
    }

    /// Map one forecast slot into a raw sample
    fn map_sample(entry: ForecastEntry) -> Result<RawSample, ApplicationError> {
        let condition = entry
            .weather
            .first()
            .map(Self::map_condition)
            .ok_or_else(|| ApplicationError::schema("forecast slot has no weather condition"))?;

        Ok(RawSample {
            timestamp: Self::timestamp(entry.dt)?,
            temperature: entry.main.temp,
            feels_like: entry.main.feels_like,
            temperature_min: entry.main.temp_min,
            temperature_max: entry.main.temp_max,
            humidity: entry.main.humidity,
            pressure: entry.main.pressure,
            wind_speed: entry.wind.map_or(0.0, |w| w.speed),
            wind_direction: entry.wind.and_then(|w| w.deg),
            cloud_cover: entry.clouds.map(|c| c.all),
            rain: entry.rain.map(Self::map_volume),
            snow: entry.snow.map(Self::map_volume),
            precipitation_probability: entry.pop,
            condition,
        })
    }

    fn map_samples(entries: Vec<ForecastEntry>) -> Result<Vec<RawSample>, ApplicationError> {
        entries.into_iter().map(Self::map_sample).collect()
    }

    fn map_place(entry: GeocodingEntry) -> Result<PlaceCandidate, ApplicationError> {
        let location = GeoLocation::new(entry.lat, entry.lon)
            .map_err(|e| ApplicationError::schema(e.to_string()))?;

        Ok(PlaceCandidate {
            name: entry.name,
            location,
            country: entry.country,
            state: entry.state,
        })
    }
}

#[async_trait]
impl WeatherApiPort for OpenWeatherAdapter {
    #[instrument(skip(self))]
    async fn current_by_city(
        &self,
        city: &CityName,
        units: TemperatureUnit,
    ) -> Result<CurrentConditions, ApplicationError> {
        let response = self
            .client
            .current_by_city(city.as_ref(), units.api_value())
            .await
            .map_err(|e| {
                warn!(error = %e, %city, "current weather lookup failed");
                Self::map_error(e)
            })?;

        Self::map_current(response)
    }

    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn current_by_coordinates(
        &self,
        location: &GeoLocation,
        units: TemperatureUnit,
    ) -> Result<CurrentConditions, ApplicationError> {
        let response = self
            .client
            .current_by_coordinates(location.latitude(), location.longitude(), units.api_value())
            .await
            .map_err(|e| {
                warn!(error = %e, "current weather lookup failed");
                Self::map_error(e)
            })?;

        Self::map_current(response)
    }

    #[instrument(skip(self))]
    async fn forecast_by_city(
        &self,
        city: &CityName,
        units: TemperatureUnit,
    ) -> Result<Vec<RawSample>, ApplicationError> {
        let response = self
            .client
            .forecast_by_city(city.as_ref(), units.api_value())
            .await
            .map_err(|e| {
                warn!(error = %e, %city, "forecast lookup failed");
                Self::map_error(e)
            })?;

        debug!(slots = response.list.len(), "retrieved forecast series");
        Self::map_samples(response.list)
    }

    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn forecast_by_coordinates(
        &self,
        location: &GeoLocation,
        units: TemperatureUnit,
    ) -> Result<Vec<RawSample>, ApplicationError> {
        let response = self
            .client
            .forecast_by_coordinates(location.latitude(), location.longitude(), units.api_value())
            .await
            .map_err(|e| {
                warn!(error = %e, "forecast lookup failed");
                Self::map_error(e)
            })?;

        debug!(slots = response.list.len(), "retrieved forecast series");
        Self::map_samples(response.list)
    }
}

#[async_trait]
impl GeocodingPort for OpenWeatherAdapter {
    #[instrument(skip(self))]
    async fn search(
        &self,
        query: &CityName,
        limit: u8,
    ) -> Result<Vec<PlaceCandidate>, ApplicationError> {
        let entries = self
            .client
            .search_places(query.as_ref(), limit)
            .await
            .map_err(Self::map_error)?;

        debug!(matches = entries.len(), "place search completed");
        entries.into_iter().map(Self::map_place).collect()
    }

    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn reverse(
        &self,
        location: &GeoLocation,
    ) -> Result<Option<PlaceCandidate>, ApplicationError> {
        let entries = self
            .client
            .reverse_geocode(location.latitude(), location.longitude())
            .await
            .map_err(Self::map_error)?;

        entries.into_iter().next().map(Self::map_place).transpose()
    }
}
