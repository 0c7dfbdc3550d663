//! Forecast source adapter - Implements ForecastSourcePort using integration_openweather

use application::{
    error::ApplicationError,
    ports::{ForecastSourcePort, RawForecastDocument},
};
use async_trait::async_trait;
use integration_openweather::{ForecastClient, OpenWeatherClient, OpenWeatherError};
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use crate::config::WeatherConfig;

/// Adapter for the OpenWeatherMap forecast endpoint
pub struct OpenWeatherSourceAdapter {
    client: OpenWeatherClient,
    api_key: SecretString,
}

impl std::fmt::Debug for OpenWeatherSourceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherSourceAdapter")
            .field("client", &"OpenWeatherClient")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl OpenWeatherSourceAdapter {
    /// Create the adapter from configuration
    ///
    /// A missing API key is not rejected here; the first fetch fails instead
    /// without sending a request.
    pub fn new(config: &WeatherConfig) -> Result<Self, ApplicationError> {
        let client = OpenWeatherClient::new(config.client_config()).map_err(map_client_error)?;
        let api_key = config
            .api_key
            .clone()
            .unwrap_or_else(|| SecretString::from(String::new()));

        Ok(Self { client, api_key })
    }
}

/// Every client failure belongs to the extract stage
fn map_client_error(e: OpenWeatherError) -> ApplicationError {
    ApplicationError::Transport(e.to_string())
}

#[async_trait]
impl ForecastSourcePort for OpenWeatherSourceAdapter {
    #[instrument(skip(self))]
    async fn fetch(
        &self,
        city: &str,
        country_code: &str,
    ) -> Result<RawForecastDocument, ApplicationError> {
        self.client
            .fetch_forecast(self.api_key.expose_secret(), city, country_code)
            .await
            .map(RawForecastDocument::new)
            .map_err(map_client_error)
    }
}
