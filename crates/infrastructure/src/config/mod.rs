//! Application configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then `WEATHER_ETL_*` environment variables (nested keys use `__`,
//! e.g. `WEATHER_ETL_DATABASE__HOST`).
//!
//! The plain `API_KEY` and `DB_PASSWORD` variables are honoured as a fallback
//! for the two secrets when neither the file nor the prefixed variables set them.

mod database;
mod integrations;
mod logging;
mod target;

use std::path::Path;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use database::DatabaseConfig;
pub use integrations::WeatherConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use target::TargetConfig;

/// Environment variable prefix for layered overrides
pub const ENV_PREFIX: &str = "WEATHER_ETL";

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "config";

/// Legacy variable holding the OpenWeatherMap API key
pub const API_KEY_VAR: &str = "API_KEY";

/// Legacy variable holding the database password
pub const DB_PASSWORD_VAR: &str = "DB_PASSWORD";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Application configuration
///
/// Built once at startup and treated as read-only afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Forecast provider settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// PostgreSQL settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// City to ingest
    #[serde(default)]
    pub target: TargetConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from file and process environment
    ///
    /// With `path == None` a `config.toml` in the working directory is used
    /// if it exists. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::load_with(path, None)?;
        config.apply_fallback_secrets(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Build the layered configuration
    ///
    /// `env` replaces the process environment as the override source when set.
    fn load_with(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let builder = config::Config::builder()
            .add_source(file)
            // Override with environment variables (e.g., WEATHER_ETL_DATABASE__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(false)
                    .source(env),
            );

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Fill missing secrets from the legacy variables
    ///
    /// Only populates fields that are currently empty. Values from the file
    /// or from `WEATHER_ETL_*` variables are never overridden.
    pub fn apply_fallback_secrets(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if is_unset(self.weather.api_key.as_ref()) {
            if let Some(key) = lookup(API_KEY_VAR).filter(|v| !v.is_empty()) {
                self.weather.api_key = Some(SecretString::from(key));
            }
        }

        if is_unset(self.database.password.as_ref()) {
            if let Some(password) = lookup(DB_PASSWORD_VAR).filter(|v| !v.is_empty()) {
                self.database.password = Some(SecretString::from(password));
            }
        }
    }

    /// Check the configuration before any I/O happens
    pub fn validate(&self) -> Result<(), ConfigError> {
        if is_unset(self.weather.api_key.as_ref()) {
            return Err(ConfigError::Invalid(format!(
                "weather.api_key is not set (use {ENV_PREFIX}_WEATHER__API_KEY or {API_KEY_VAR})"
            )));
        }
        if self.weather.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "weather.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.weather.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "weather.base_url must not be empty".to_string(),
            ));
        }
        if self.target.city.trim().is_empty() {
            return Err(ConfigError::Invalid("target.city must not be empty".to_string()));
        }
        if self.target.country_code.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "target.country_code must not be empty".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be greater than zero".to_string(),
            ));
        }
        if self.database.acquire_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "database.acquire_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn is_unset(secret: Option<&SecretString>) -> bool {
    secret.is_none_or(|s| s.expose_secret().trim().is_empty())
}
