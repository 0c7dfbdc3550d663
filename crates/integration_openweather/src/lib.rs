//! OpenWeatherMap integration
//!
//! Client for the OpenWeatherMap "5 day / 3 hour forecast" API
//! (<https://openweathermap.org/forecast5>). The client performs a single
//! request per call and returns the decoded JSON document untouched; mapping
//! it onto domain records happens in the application layer.

pub mod client;

pub use client::{ForecastClient, OpenWeatherClient, OpenWeatherConfig, OpenWeatherError};
