//! PostgreSQL forecast store implementation
//!
//! Implements the `ForecastStorePort`. Every load runs in a single
//! transaction: the location upsert, the identifier lookup and all reading
//! upserts are committed together or not at all. Rows that already exist are
//! left untouched.

use application::{
    error::ApplicationError,
    ports::{ForecastStorePort, LoadSummary},
};
use async_trait::async_trait;
use domain::{ForecastReading, Location, LocationId};
use sqlx::{PgConnection, PgPool};
use tracing::{debug, instrument, warn};

use super::error::{map_commit_error, map_connect_error, map_sqlx_error};

const INSERT_LOCATION: &str = r"
    INSERT INTO locations (city, country, latitude, longitude)
    VALUES ($1, $2, $3, $4)
    ON CONFLICT (city, country, latitude, longitude) DO NOTHING
";

// Lowest identifier wins when several rows share a city and country.
const SELECT_LOCATION_ID: &str = r"
    SELECT location_id FROM locations
    WHERE city = $1 AND country = $2
    ORDER BY location_id
    LIMIT 1
";

const INSERT_READING: &str = r"
    INSERT INTO weather_readings (
        location_id, forecast_time, temperature_celsius, feels_like_celsius,
        humidity_percent, wind_speed_ms, description, weather_icon
    )
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
    ON CONFLICT (location_id, forecast_time) DO NOTHING
";

/// PostgreSQL-based forecast store
#[derive(Debug, Clone)]
pub struct PostgresForecastStore {
    pool: PgPool,
}

impl PostgresForecastStore {
    /// Create a new forecast store
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ForecastStorePort for PostgresForecastStore {
    #[instrument(
        skip(self, location, readings),
        fields(city = %location.city, country = %location.country, readings = readings.len())
    )]
    async fn load(
        &self,
        location: &Location,
        readings: &[ForecastReading],
    ) -> Result<LoadSummary, ApplicationError> {
        let mut tx = self.pool.begin().await.map_err(map_connect_error)?;

        match write_batch(&mut tx, location, readings).await {
            Ok(summary) => {
                tx.commit().await.map_err(map_commit_error)?;
                debug!(
                    location_id = %summary.location_id,
                    inserted = summary.readings_inserted,
                    skipped = summary.readings_skipped,
                    "Forecast batch committed"
                );
                Ok(summary)
            },
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed");
                }
                warn!(error = %e, "Forecast batch rolled back");
                Err(e)
            },
        }
    }
}

/// Run every statement of one load on the transaction's connection
async fn write_batch(
    conn: &mut PgConnection,
    location: &Location,
    readings: &[ForecastReading],
) -> Result<LoadSummary, ApplicationError> {
    let location_inserted = sqlx::query(INSERT_LOCATION)
        .bind(&location.city)
        .bind(&location.country)
        .bind(location.latitude)
        .bind(location.longitude)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx_error)?
        .rows_affected()
        > 0;

    let location_id: i64 = sqlx::query_scalar(SELECT_LOCATION_ID)
        .bind(&location.city)
        .bind(&location.country)
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_sqlx_error)?
        .ok_or_else(|| {
            ApplicationError::Consistency(format!(
                "no location row for {}, {} after upsert",
                location.city, location.country
            ))
        })?;
    let location_id = LocationId::new(location_id);

    let mut readings_inserted = 0;
    for reading in readings {
        readings_inserted += sqlx::query(INSERT_READING)
            .bind(location_id.as_i64())
            .bind(reading.forecast_time)
            .bind(reading.temperature_celsius)
            .bind(reading.feels_like_celsius)
            .bind(reading.humidity_percent)
            .bind(reading.wind_speed_ms)
            .bind(&reading.description)
            .bind(&reading.weather_icon)
            .execute(&mut *conn)
            .await
            .map_err(map_sqlx_error)?
            .rows_affected();
    }

    let attempted = u64::try_from(readings.len()).unwrap_or(u64::MAX);

    Ok(LoadSummary {
        location_id,
        location_inserted,
        readings_inserted,
        readings_skipped: attempted.saturating_sub(readings_inserted),
    })
}
