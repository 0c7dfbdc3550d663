//! Forecast pipeline - Extract, transform and load one city's forecast

use std::{fmt, sync::Arc, time::Instant};

use domain::Location;
use serde::Serialize;
use tracing::{info, instrument, warn};

use super::forecast_transformer::transform;
use crate::{
    error::ApplicationError,
    ports::{ForecastSourcePort, ForecastStorePort, LoadSummary},
};

/// Result of a successful pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    /// Location as reported by the provider
    pub location: Location,
    /// Readings produced by the transform stage
    pub readings_transformed: usize,
    /// What the load stage wrote
    pub load: LoadSummary,
    /// Wall-clock duration of the run in milliseconds
    pub elapsed_ms: u64,
}

/// Runs the three stages strictly in sequence
///
/// A failing stage ends the run; later stages are never invoked.
pub struct ForecastPipeline {
    source: Arc<dyn ForecastSourcePort>,
    store: Arc<dyn ForecastStorePort>,
}

impl fmt::Debug for ForecastPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForecastPipeline").finish_non_exhaustive()
    }
}

impl ForecastPipeline {
    /// Create a new pipeline
    pub fn new(source: Arc<dyn ForecastSourcePort>, store: Arc<dyn ForecastStorePort>) -> Self {
        Self { source, store }
    }

    /// Fetch, transform and persist the forecast for one city
    #[instrument(skip(self))]
    pub async fn run(
        &self,
        city: &str,
        country_code: &str,
    ) -> Result<PipelineReport, ApplicationError> {
        let start = Instant::now();

        let document = self
            .source
            .fetch(city, country_code)
            .await
            .inspect_err(|e| warn!(error = %e, "Extract failed, nothing will be written"))?;
        info!("Forecast fetched");

        let batch = transform(&document)
            .inspect_err(|e| warn!(error = %e, "Transform failed, nothing will be written"))?;
        info!(
            location = %batch.location,
            readings = batch.readings.len(),
            "Forecast transformed"
        );

        let load = self
            .store
            .load(&batch.location, &batch.readings)
            .await
            .inspect_err(|e| warn!(error = %e, "Load failed"))?;

        let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        info!(
            location_id = %load.location_id,
            inserted = load.readings_inserted,
            skipped = load.readings_skipped,
            elapsed_ms,
            "Forecast loaded"
        );

        Ok(PipelineReport {
            location: batch.location,
            readings_transformed: batch.readings.len(),
            load,
            elapsed_ms,
        })
    }
}
