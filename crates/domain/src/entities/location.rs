//! Location entity

use serde::{Deserialize, Serialize};
use std::fmt;

/// A queried place as reported by the forecast provider
///
/// The tuple `(city, country, latitude, longitude)` is the natural key of a
/// location; two values with the same tuple describe the same row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// City name (e.g. "Tokyo")
    pub city: String,
    /// ISO 3166-1 alpha-2 country code (e.g. "JP")
    pub country: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Location {
    /// Create a new location
    pub fn new(
        city: impl Into<String>,
        country: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            city: city.into(),
            country: country.into(),
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {} ({:.4}, {:.4})",
            self.city, self.country, self.latitude, self.longitude
        )
    }
}
