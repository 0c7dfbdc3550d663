//! Forecast reading entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Conditions forecast for one 3-hour slot at a location
///
/// A reading does not carry its location; the location identifier is only
/// known once the location row has been persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReading {
    /// Start of the forecast slot
    pub forecast_time: DateTime<Utc>,
    /// Air temperature in Celsius
    pub temperature_celsius: f64,
    /// Apparent (feels like) temperature in Celsius
    pub feels_like_celsius: f64,
    /// Relative humidity percentage
    pub humidity_percent: i32,
    /// Wind speed in m/s
    pub wind_speed_ms: f64,
    /// Textual condition, e.g. "light rain"
    pub description: String,
    /// Provider icon code, e.g. "10d"
    pub weather_icon: String,
}
