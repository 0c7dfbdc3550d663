//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod forecast_source_port;
mod forecast_store_port;

#[cfg(test)]
pub use forecast_source_port::MockForecastSourcePort;
pub use forecast_source_port::{ForecastSourcePort, RawForecastDocument};
#[cfg(test)]
pub use forecast_store_port::MockForecastStorePort;
pub use forecast_store_port::{ForecastStorePort, LoadSummary};
