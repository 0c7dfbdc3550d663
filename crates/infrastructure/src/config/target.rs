//! Forecast target (which city to ingest).

use serde::{Deserialize, Serialize};

/// City whose forecast is ingested on each run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetConfig {
    /// City name as understood by the provider
    #[serde(default = "default_city")]
    pub city: String,

    /// ISO 3166-1 alpha-2 country code
    #[serde(default = "default_country_code")]
    pub country_code: String,
}

fn default_city() -> String {
    "Tokyo".to_string()
}

fn default_country_code() -> String {
    "JP".to_string()
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            city: default_city(),
            country_code: default_country_code(),
        }
    }
}
