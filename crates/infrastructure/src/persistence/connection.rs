//! PostgreSQL connection management
//!
//! The pool is created lazily: no connection is opened until the first query,
//! so runs that fail before the load stage never touch the database.
//! Migrations are managed via sqlx's `migrate!()` macro using SQL files in the
//! workspace `migrations/` directory.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};
use tracing::{debug, info, instrument};

use crate::config::DatabaseConfig;

/// Error type for database setup and maintenance
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// PostgreSQL connection pool
#[derive(Debug, Clone)]
pub struct PgDatabase {
    pool: PgPool,
}

impl PgDatabase {
    /// Build a lazily connecting pool from configuration
    #[instrument(skip_all, fields(host = %config.host, port = config.port, database = %config.name))]
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, PersistenceError> {
        if config.max_connections == 0 {
            return Err(PersistenceError::Config(
                "max_connections must be greater than zero".to_string(),
            ));
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_lazy_with(connect_options(config));

        debug!(
            max_connections = config.max_connections,
            "Database pool configured"
        );

        Ok(Self { pool })
    }

    /// Get the underlying pool for raw queries
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply the bundled schema migrations
    #[instrument(skip(self))]
    pub async fn migrate(&self) -> Result<(), PersistenceError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Close all connections in the pool
    pub async fn close(&self) {
        self.pool.close().await;
        debug!("Database pool closed");
    }
}

fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
    let options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .database(&config.name)
        .username(&config.user)
        .application_name("weather-etl");

    match &config.password {
        Some(password) => options.password(password.expose_secret()),
        None => options,
    }
}
