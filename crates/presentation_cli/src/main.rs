//! Weather ETL
//!
//! Fetches the 5 day / 3 hour forecast for one city from OpenWeatherMap and
//! stores it in PostgreSQL. Exits non-zero on any failure.

#![allow(clippy::print_stdout)]

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use application::{ApplicationError, ForecastPipeline};
use clap::Parser;
use infrastructure::{
    AppConfig, OpenWeatherSourceAdapter, PgDatabase, PostgresForecastStore, init_logging,
};
use tracing::{debug, error, info};

/// Weather forecast ETL
#[derive(Debug, Parser)]
#[command(name = "weather-etl")]
#[command(author, version, about = "Load an OpenWeatherMap forecast into PostgreSQL", long_about = None)]
struct Cli {
    /// Configuration file (default: config.toml in the working directory, if present)
    #[arg(short, long, env = "WEATHER_ETL_CONFIG")]
    config: Option<PathBuf>,

    /// City to ingest (overrides target.city)
    #[arg(long)]
    city: Option<String>,

    /// ISO country code (overrides target.country_code)
    #[arg(long)]
    country: Option<String>,

    /// Apply database migrations before loading
    #[arg(long)]
    migrate: bool,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Determine log filter override from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Apply command-line overrides on top of the loaded configuration
fn apply_overrides(mut config: AppConfig, cli: &Cli) -> AppConfig {
    if let Some(city) = &cli.city {
        config.target.city.clone_from(city);
    }
    if let Some(country) = &cli.country {
        config.target.country_code.clone_from(country);
    }
    if cli.migrate {
        config.database.run_migrations = true;
    }
    config
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // A missing .env is fine
    dotenvy::dotenv().ok();

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let config = apply_overrides(config, &cli);

    init_logging(&config.logging, log_filter_from_verbosity(cli.verbose))
        .context("Failed to initialize logging")?;
    debug!(?config, "Configuration loaded");

    config
        .validate()
        .map_err(|e| ApplicationError::Configuration(e.to_string()))
        .inspect_err(|e| error!(error = %e, "Refusing to start"))?;

    info!(
        city = %config.target.city,
        country = %config.target.country_code,
        "Starting forecast ingestion"
    );

    let source = OpenWeatherSourceAdapter::new(&config.weather)?;
    let db = PgDatabase::connect_lazy(&config.database).context("Failed to configure database")?;

    if config.database.run_migrations {
        db.migrate().await.context("Failed to apply migrations")?;
    }

    let pipeline = ForecastPipeline::new(
        Arc::new(source),
        Arc::new(PostgresForecastStore::new(db.pool().clone())),
    );

    let result = pipeline
        .run(&config.target.city, &config.target.country_code)
        .await;
    db.close().await;

    match result {
        Ok(report) => {
            println!(
                "✅ {}: {} readings fetched, {} inserted, {} already stored (location #{}, {}ms)",
                report.location,
                report.readings_transformed,
                report.load.readings_inserted,
                report.load.readings_skipped,
                report.load.location_id,
                report.elapsed_ms,
            );
            Ok(())
        },
        Err(e) => {
            let stage = e.stage();
            error!(
                stage,
                rolled_back = e.reached_database(),
                error = %e,
                "Forecast ingestion failed"
            );
            Err(anyhow::Error::new(e).context(format!("{stage} stage failed")))
        },
    }
}
