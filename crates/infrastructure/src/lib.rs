//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains the PostgreSQL forecast store, the OpenWeatherMap source adapter,
//! configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::OpenWeatherSourceAdapter;
pub use config::{
    AppConfig, ConfigError, DatabaseConfig, LogFormat, LoggingConfig, TargetConfig, WeatherConfig,
};
pub use persistence::{PersistenceError, PgDatabase, PostgresForecastStore};
pub use telemetry::{TelemetryError, init_logging};
