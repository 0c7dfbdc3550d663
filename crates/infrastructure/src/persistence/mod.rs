//! Persistence module
//!
//! PostgreSQL storage for locations and their forecast readings.

pub mod connection;
pub mod error;
pub mod forecast_store;

pub use connection::{PersistenceError, PgDatabase};
pub use forecast_store::PostgresForecastStore;
