//! Domain entities - Records produced by one pipeline run

mod forecast_reading;
mod location;

pub use forecast_reading::ForecastReading;
pub use location::Location;
