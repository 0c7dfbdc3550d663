//! Forecast storage port
//!
//! Defines the interface for persisting a location and its readings.

use async_trait::async_trait;
use domain::{ForecastReading, Location, LocationId};
#[cfg(test)]
use mockall::automock;
use serde::Serialize;

use crate::error::ApplicationError;

/// Outcome of one successful load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    /// Identifier the readings were stored under
    pub location_id: LocationId,
    /// Whether the location row was created by this load
    pub location_inserted: bool,
    /// Readings written by this load
    pub readings_inserted: u64,
    /// Readings whose (location, forecast time) key already existed
    pub readings_skipped: u64,
}

impl LoadSummary {
    /// Whether this load changed nothing in the database
    pub const fn is_noop(&self) -> bool {
        !self.location_inserted && self.readings_inserted == 0
    }
}

/// Port for the load stage
///
/// A call is one transaction: either every row it writes is committed, or
/// none is. Existing rows are never updated; conflicting inserts are skipped.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ForecastStorePort: Send + Sync {
    /// Upsert `location`, then upsert every reading under its identifier
    async fn load(
        &self,
        location: &Location,
        readings: &[ForecastReading],
    ) -> Result<LoadSummary, ApplicationError>;
}
