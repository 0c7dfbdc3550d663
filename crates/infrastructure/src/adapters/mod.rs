//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod forecast_source_adapter;

pub use forecast_source_adapter::OpenWeatherSourceAdapter;
