//! OpenWeatherMap forecast client
//!
//! HTTP client for the OpenWeatherMap forecast API.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

/// Path of the 5 day / 3 hour forecast resource
const FORECAST_PATH: &str = "/data/2.5/forecast";

/// Unit system requested from the provider (Celsius, m/s)
const UNITS: &str = "metric";

/// OpenWeatherMap client errors
#[derive(Debug, Error)]
pub enum OpenWeatherError {
    /// No API key was supplied
    #[error("API key is empty")]
    MissingApiKey,

    /// Connection to the weather service failed or timed out
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The API key was rejected
    #[error("Unauthorized: the API key was rejected")]
    Unauthorized,

    /// The provider does not know the requested city
    #[error("City not found: {0}")]
    CityNotFound(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Response body was not valid JSON
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// OpenWeatherMap client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenWeatherConfig {
    /// API base URL (default: <https://api.openweathermap.org>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for OpenWeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Forecast client trait for fetching raw forecast documents
#[async_trait]
pub trait ForecastClient: Send + Sync {
    /// Fetch the 5 day / 3 hour forecast for `city,country_code`
    ///
    /// Returns the decoded JSON body on a successful status code.
    async fn fetch_forecast(
        &self,
        api_key: &str,
        city: &str,
        country_code: &str,
    ) -> Result<serde_json::Value, OpenWeatherError>;
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

    /// Full URL of the forecast resource, without query parameters
    fn forecast_endpoint(&self) -> String {
        format!(
            "{}{FORECAST_PATH}",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Query parameters for a forecast request
    fn forecast_query<'a>(
        api_key: &'a str,
        city: &str,
        country_code: &str,
    ) -> [(&'static str, std::borrow::Cow<'a, str>); 3] {
        [
            ("q", format!("{city},{country_code}").into()),
            ("appid", api_key.into()),
            ("units", UNITS.into()),
        ]
    }

    /// Classify a transport-level reqwest error
    fn map_send_error(err: &reqwest::Error) -> OpenWeatherError {
        if err.is_timeout() {
            OpenWeatherError::ConnectionFailed(format!("request timed out: {err}"))
        } else if err.is_connect() {
            OpenWeatherError::ConnectionFailed(err.to_string())
        } else {
            OpenWeatherError::RequestFailed(err.to_string())
        }
    }

    /// Map a non-success status code to an error
    fn check_status(status: StatusCode, city: &str) -> Result<(), OpenWeatherError> {
        match status {
            s if s.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED => Err(OpenWeatherError::Unauthorized),
            StatusCode::NOT_FOUND => Err(OpenWeatherError::CityNotFound(city.to_string())),
            StatusCode::TOO_MANY_REQUESTS => Err(OpenWeatherError::RateLimitExceeded),
            s if s.is_server_error() => {
                Err(OpenWeatherError::ServiceUnavailable(format!("HTTP {s}")))
            },
            s => Err(OpenWeatherError::RequestFailed(format!("HTTP {s}"))),
        }
    }
}

#[async_trait]
impl ForecastClient for OpenWeatherClient {
    #[instrument(skip(self, api_key), fields(city = %city, country = %country_code))]
    async fn fetch_forecast(
        &self,
        api_key: &str,
        city: &str,
        country_code: &str,
    ) -> Result<serde_json::Value, OpenWeatherError> {
        if api_key.trim().is_empty() {
            return Err(OpenWeatherError::MissingApiKey);
        }

        // The query string carries the API key, so only the bare endpoint is logged
        let endpoint = self.forecast_endpoint();
        debug!(endpoint = %endpoint, "Fetching forecast");

        let response = self
            .client
            .get(&endpoint)
            .query(&Self::forecast_query(api_key, city, country_code))
            .send()
            .await
            .map_err(|e| Self::map_send_error(&e))?;

        Self::check_status(response.status(), city)?;

        let document: serde_json::Value = response
            .json()
            .await
            .map_err(|e| OpenWeatherError::ParseError(e.to_string()))?;

        debug!("Forecast document received");
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = OpenWeatherConfig::default();
        assert_eq!(config.base_url, "https://api.openweathermap.org");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_forecast_endpoint() {
        let client = OpenWeatherClient::new(OpenWeatherConfig::default())
            .expect("client creation should succeed");
        assert_eq!(
            client.forecast_endpoint(),
            "https://api.openweathermap.org/data/2.5/forecast"
        );
    }

    #[test]
    fn test_forecast_endpoint_trims_trailing_slash() {
        let config = OpenWeatherConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..Default::default()
        };
        let client = OpenWeatherClient::new(config).expect("client creation should succeed");
        assert_eq!(
            client.forecast_endpoint(),
            "http://localhost:8080/data/2.5/forecast"
        );
    }

    #[test]
    fn test_forecast_query() {
        let query = OpenWeatherClient::forecast_query("secret", "Tokyo", "JP");
        assert_eq!(query[0].0, "q");
        assert_eq!(query[0].1, "Tokyo,JP");
        assert_eq!(query[1].0, "appid");
        assert_eq!(query[1].1, "secret");
        assert_eq!(query[2].0, "units");
        assert_eq!(query[2].1, "metric");
    }

    #[test]
    fn test_check_status() {
        assert!(OpenWeatherClient::check_status(StatusCode::OK, "Tokyo").is_ok());
        assert!(matches!(
            OpenWeatherClient::check_status(StatusCode::UNAUTHORIZED, "Tokyo"),
            Err(OpenWeatherError::Unauthorized)
        ));
        assert!(matches!(
            OpenWeatherClient::check_status(StatusCode::NOT_FOUND, "Atlantis"),
            Err(OpenWeatherError::CityNotFound(city)) if city == "Atlantis"
        ));
        assert!(matches!(
            OpenWeatherClient::check_status(StatusCode::TOO_MANY_REQUESTS, "Tokyo"),
            Err(OpenWeatherError::RateLimitExceeded)
        ));
        assert!(matches!(
            OpenWeatherClient::check_status(StatusCode::BAD_GATEWAY, "Tokyo"),
            Err(OpenWeatherError::ServiceUnavailable(_))
        ));
        assert!(matches!(
            OpenWeatherClient::check_status(StatusCode::BAD_REQUEST, "Tokyo"),
            Err(OpenWeatherError::RequestFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_api_key_is_rejected_without_request() {
        let config = OpenWeatherConfig {
            // Nothing listens here; the key check must fail before any I/O
            base_url: "http://127.0.0.1:1".to_string(),
            timeout_secs: 1,
        };
        let client = OpenWeatherClient::new(config).expect("client creation should succeed");

        let result = client.fetch_forecast("  ", "Tokyo", "JP").await;
        assert!(matches!(result, Err(OpenWeatherError::MissingApiKey)));
    }

    #[test]
    fn test_error_display() {
        assert!(OpenWeatherError::RateLimitExceeded.to_string().contains("Rate limit"));
        assert_eq!(
            OpenWeatherError::CityNotFound("Atlantis".to_string()).to_string(),
            "City not found: Atlantis"
        );
    }

    #[test]
    fn test_config_serialization() {
        let config = OpenWeatherConfig {
            base_url: "https://custom.api.com".to_string(),
            timeout_secs: 60,
        };

        let json = serde_json::to_string(&config).expect("should serialize");
        let deserialized: OpenWeatherConfig =
            serde_json::from_str(&json).expect("should deserialize");

        assert_eq!(deserialized.base_url, "https://custom.api.com");
        assert_eq!(deserialized.timeout_secs, 60);
    }

    #[test]
    fn test_config_deserialization_applies_defaults() {
        let config: OpenWeatherConfig = serde_json::from_str("{}").expect("should deserialize");
        assert_eq!(config.base_url, "https://api.openweathermap.org");
        assert_eq!(config.timeout_secs, 30);
    }
}
