//! Database (PostgreSQL) configuration.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// PostgreSQL connection configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Server host name
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Database name
    #[serde(default = "default_name")]
    pub name: String,

    /// Login role
    #[serde(default = "default_user")]
    pub user: String,

    /// Login password (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub password: Option<SecretString>,

    /// Maximum number of pooled connections
    ///
    /// A run uses exactly one connection for its single transaction.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds to wait for a connection before the load fails
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    /// Whether to apply the bundled schema migrations before loading (default: false)
    #[serde(default)]
    pub run_migrations: bool,
}

fn default_host() -> String {
    "localhost".to_string()
}

const fn default_port() -> u16 {
    5432
}

fn default_name() -> String {
    "weather_db".to_string()
}

fn default_user() -> String {
    "postgres".to_string()
}

const fn default_max_connections() -> u32 {
    1
}

const fn default_acquire_timeout() -> u64 {
    10
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            name: default_name(),
            user: default_user(),
            password: None,
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
            run_migrations: false,
        }
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field(
                "password",
                &if self.password.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .field("run_migrations", &self.run_migrations)
            .finish()
    }
}
