//! PostgreSQL container helper for integration tests.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use domain::{ForecastReading, Location};
use infrastructure::{DatabaseConfig, PgDatabase};
use secrecy::SecretString;
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;

const DATABASE: &str = "weather_test";
const USERNAME: &str = "test";
const PASSWORD: &str = "test";
const VERSION: &str = "16-alpine";

/// Running PostgreSQL container with the schema applied
pub struct PostgresContainer {
    container: ContainerAsync<Postgres>,
    pub config: DatabaseConfig,
    pub db: PgDatabase,
}

impl PostgresContainer {
    /// Start a container and apply the migrations.
    pub async fn start() -> Self {
        let container = Postgres::default()
            .with_db_name(DATABASE)
            .with_user(USERNAME)
            .with_password(PASSWORD)
            .with_tag(VERSION)
            .start()
            .await
            .expect("Failed to start PostgreSQL container");

        let host = container
            .get_host()
            .await
            .expect("Failed to get container host")
            .to_string();
        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("Failed to get container port");

        let config = DatabaseConfig {
            host,
            port,
            name: DATABASE.to_string(),
            user: USERNAME.to_string(),
            password: Some(SecretString::from(PASSWORD)),
            max_connections: 2,
            ..Default::default()
        };

        let db = PgDatabase::connect_lazy(&config).expect("Failed to configure pool");
        db.migrate().await.expect("Failed to run migrations");

        Self {
            container,
            config,
            db,
        }
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(self.db.pool())
            .await
            .expect("count query failed")
    }
}

pub fn tokyo() -> Location {
    Location::new("Tokyo", "JP", 35.68, 139.69)
}

/// Readings three hours apart starting 2024-01-01 00:00 UTC
pub fn readings(count: u32) -> Vec<ForecastReading> {
    (0..count)
        .map(|i| ForecastReading {
            forecast_time: Utc
                .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
                .single()
                .expect("valid timestamp")
                + chrono::Duration::hours(3 * i64::from(i)),
            temperature_celsius: 10.0 + f64::from(i),
            feels_like_celsius: 9.0 + f64::from(i),
            humidity_percent: 60,
            wind_speed_ms: 3.2,
            description: "clear sky".to_string(),
            weather_icon: "01d".to_string(),
        })
        .collect()
}
