//! Forecast source port
//!
//! Defines the interface for retrieving a raw forecast document.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Forecast document exactly as decoded from the provider's JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct RawForecastDocument(serde_json::Value);

impl RawForecastDocument {
    /// Wrap a decoded JSON document
    pub const fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Borrow the underlying JSON value
    pub const fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Unwrap into the underlying JSON value
    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

impl From<serde_json::Value> for RawForecastDocument {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// Port for the extract stage
///
/// Implementations perform exactly one request per call and never retry.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ForecastSourcePort: Send + Sync {
    /// Fetch the multi-day forecast for `city` in `country_code`
    ///
    /// Any failure to obtain a JSON document is reported as
    /// [`ApplicationError::Transport`].
    async fn fetch(
        &self,
        city: &str,
        country_code: &str,
    ) -> Result<RawForecastDocument, ApplicationError>;
}
