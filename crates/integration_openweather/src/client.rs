//! OpenWeatherMap HTTP client
//!
//! Thin client over the `/data/2.5` weather endpoints and the `/geo/1.0`
//! geocoding endpoints. Every request carries the configured API key; unit
//! selection is passed through as the provider's `units` query value.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{CurrentWeatherResponse, ForecastResponse, GeocodingEntry};

/// OpenWeatherMap client errors
#[derive(Debug, Error)]
pub enum OpenWeatherError {
    /// Connection to the provider failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The queried location is unknown to the provider
    #[error("Location not found")]
    NotFound,

    /// API key missing, invalid, or not activated yet
    #[error("Invalid or missing API key")]
    Unauthorized,

    /// Quota for the key is exhausted
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Provider-side failure
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Any other non-success status
    #[error("Request failed: HTTP {status}")]
    RequestFailed { status: u16 },

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl OpenWeatherError {
    fn from_status(status: reqwest::StatusCode) -> Self {
        match status.as_u16() {
            404 => Self::NotFound,
            401 | 403 => Self::Unauthorized,
            429 => Self::RateLimitExceeded,
            s if status.is_server_error() => Self::ServiceUnavailable(format!("HTTP {s}")),
            s => Self::RequestFailed { status: s },
        }
    }
}

impl From<reqwest::Error> for OpenWeatherError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::ParseError(err.to_string())
        } else {
            Self::ConnectionFailed(err.to_string())
        }
    }
}

/// OpenWeatherMap client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenWeatherConfig {
    /// API key sent as the `appid` query parameter
    pub api_key: String,

    /// Weather API base URL (default: <https://api.openweathermap.org/data/2.5>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Geocoding API base URL (default: <https://api.openweathermap.org/geo/1.0>)
    #[serde(default = "default_geo_url")]
    pub geo_url: String,

    /// Connection timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_geo_url() -> String {
    "https://api.openweathermap.org/geo/1.0".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl OpenWeatherConfig {
    /// Configuration with defaults for everything but the key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            geo_url: default_geo_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Provider API surface consumed by the weather adapter
#[async_trait]
pub trait OpenWeatherApi: Send + Sync {
    /// Current weather for a city name query
    async fn current_by_city(
        &self,
        city: &str,
        units: &str,
    ) -> Result<CurrentWeatherResponse, OpenWeatherError>;

    /// Current weather at coordinates
    async fn current_by_coordinates(
        &self,
        lat: f64,
        lon: f64,
        units: &str,
    ) -> Result<CurrentWeatherResponse, OpenWeatherError>;

    /// 5-day / 3-hour forecast for a city name query
    async fn forecast_by_city(
        &self,
        city: &str,
        units: &str,
    ) -> Result<ForecastResponse, OpenWeatherError>;

    /// 5-day / 3-hour forecast at coordinates
    async fn forecast_by_coordinates(
        &self,
        lat: f64,
        lon: f64,
        units: &str,
    ) -> Result<ForecastResponse, OpenWeatherError>;

    /// Forward geocoding, best matches first
    async fn search_places(
        &self,
        query: &str,
        limit: u8,
    ) -> Result<Vec<GeocodingEntry>, OpenWeatherError>;

    /// Reverse geocoding, at most one match
    async fn reverse_geocode(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<Vec<GeocodingEntry>, OpenWeatherError>;
}

/// OpenWeatherMap HTTP client implementation
#[derive(Debug)]
pub struct OpenWeatherClient {
    client: Client,
    config: OpenWeatherConfig,
}

impl OpenWeatherClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: OpenWeatherConfig) -> Result<Self, OpenWeatherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| OpenWeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// GET `url` with `params` plus the API key, decoding the JSON body
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: String,
        params: &[(&str, String)],
    ) -> Result<T, OpenWeatherError> {
        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("appid", self.config.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!(%url, %status, "provider returned non-success status");
            return Err(OpenWeatherError::from_status(status));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl OpenWeatherApi for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn current_by_city(
        &self,
        city: &str,
        units: &str,
    ) -> Result<CurrentWeatherResponse, OpenWeatherError> {
        let url = format!("{}/weather", self.config.base_url);
        self.fetch_json(url, &[("q", city.to_string()), ("units", units.to_string())])
            .await
    }

    #[instrument(skip(self), fields(lat = %lat, lon = %lon))]
    async fn current_by_coordinates(
        &self,
        lat: f64,
        lon: f64,
        units: &str,
    ) -> Result<CurrentWeatherResponse, OpenWeatherError> {
        let url = format!("{}/weather", self.config.base_url);
        self.fetch_json(
            url,
            &[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("units", units.to_string()),
            ],
        )
        .await
    }

    #[instrument(skip(self))]
    async fn forecast_by_city(
        &self,
        city: &str,
        units: &str,
    ) -> Result<ForecastResponse, OpenWeatherError> {
        let url = format!("{}/forecast", self.config.base_url);
        self.fetch_json(url, &[("q", city.to_string()), ("units", units.to_string())])
            .await
    }

    #[instrument(skip(self), fields(lat = %lat, lon = %lon))]
    async fn forecast_by_coordinates(
        &self,
        lat: f64,
        lon: f64,
        units: &str,
    ) -> Result<ForecastResponse, OpenWeatherError> {
        let url = format!("{}/forecast", self.config.base_url);
        self.fetch_json(
            url,
            &[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("units", units.to_string()),
            ],
        )
        .await
    }

    #[instrument(skip(self))]
    async fn search_places(
        &self,
        query: &str,
        limit: u8,
    ) -> Result<Vec<GeocodingEntry>, OpenWeatherError> {
        let url = format!("{}/direct", self.config.geo_url);
        self.fetch_json(
            url,
            &[("q", query.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    #[instrument(skip(self), fields(lat = %lat, lon = %lon))]
    async fn reverse_geocode(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<Vec<GeocodingEntry>, OpenWeatherError> {
        let url = format!("{}/reverse", self.config.geo_url);
        self.fetch_json(
            url,
            &[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("limit", "1".to_string()),
            ],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = OpenWeatherConfig::new("test-key");
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "https://api.openweathermap.org/data/2.5");
        assert_eq!(config.geo_url, "https://api.openweathermap.org/geo/1.0");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: OpenWeatherConfig =
            serde_json::from_str(r#"{"api_key": "abc"}"#).expect("should deserialize");
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn status_mapping() {
        use reqwest::StatusCode;

        assert!(matches!(
            OpenWeatherError::from_status(StatusCode::NOT_FOUND),
            OpenWeatherError::NotFound
        ));
        assert!(matches!(
            OpenWeatherError::from_status(StatusCode::UNAUTHORIZED),
            OpenWeatherError::Unauthorized
        ));
        assert!(matches!(
            OpenWeatherError::from_status(StatusCode::FORBIDDEN),
            OpenWeatherError::Unauthorized
        ));
        assert!(matches!(
            OpenWeatherError::from_status(StatusCode::TOO_MANY_REQUESTS),
            OpenWeatherError::RateLimitExceeded
        ));
        assert!(matches!(
            OpenWeatherError::from_status(StatusCode::INTERNAL_SERVER_ERROR),
            OpenWeatherError::ServiceUnavailable(_)
        ));
        assert!(matches!(
            OpenWeatherError::from_status(StatusCode::BAD_REQUEST),
            OpenWeatherError::RequestFailed { status: 400 }
        ));
    }

    #[test]
    fn error_display() {
        let err = OpenWeatherError::NotFound;
        assert_eq!(err.to_string(), "Location not found");

        let err = OpenWeatherError::RequestFailed { status: 418 };
        assert!(err.to_string().contains("418"));
    }

    #[test]
    fn client_creation() {
        let client = OpenWeatherClient::new(OpenWeatherConfig::new("key"));
        assert!(client.is_ok());
    }
}
