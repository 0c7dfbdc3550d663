//! Application-level errors

use thiserror::Error;

/// Errors that terminate a pipeline run
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// The forecast could not be obtained (network, timeout, HTTP status, non-JSON body)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The forecast document lacks or mistypes a required field
    #[error("Malformed forecast document: {0}")]
    Shape(String),

    /// No database connection could be established
    #[error("Database connection failed: {0}")]
    DatabaseConnection(String),

    /// A statement inside the load transaction failed; the transaction was rolled back
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Persisted state contradicts what was just written
    #[error("Consistency error: {0}")]
    Consistency(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Pipeline stage the error belongs to, for operator-facing reports
    pub const fn stage(&self) -> &'static str {
        match self {
            Self::Transport(_) => "extract",
            Self::Shape(_) => "transform",
            Self::DatabaseConnection(_) | Self::Persistence(_) | Self::Consistency(_) => "load",
            Self::Configuration(_) => "configuration",
        }
    }

    /// Whether the database may have been touched before the error occurred
    pub const fn reached_database(&self) -> bool {
        matches!(self, Self::Persistence(_) | Self::Consistency(_))
    }
}
