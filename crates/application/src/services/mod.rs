//! Application services - Use case implementations

mod forecast_pipeline;
mod forecast_transformer;

pub use forecast_pipeline::{ForecastPipeline, PipelineReport};
pub use forecast_transformer::{ForecastBatch, transform};
