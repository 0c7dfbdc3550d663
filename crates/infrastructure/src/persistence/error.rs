//! Shared error mapping for sqlx persistence layer

use application::error::ApplicationError;

/// Map a failure to obtain a connection or open the transaction
pub fn map_connect_error(e: sqlx::Error) -> ApplicationError {
    ApplicationError::DatabaseConnection(e.to_string())
}

/// Map a failure to commit the load transaction
///
/// The outcome of a commit that fails mid-flight is unknown to the client, so
/// it is never reported as a connection failure.
pub fn map_commit_error(e: sqlx::Error) -> ApplicationError {
    ApplicationError::Persistence(format!("Commit failed: {e}"))
}

/// Map a failure of a statement inside the load transaction
pub fn map_sqlx_error(e: sqlx::Error) -> ApplicationError {
    match e {
        sqlx::Error::Database(db_err) => match db_err.constraint() {
            Some(constraint) => ApplicationError::Persistence(format!(
                "Database error: {db_err} (constraint {constraint})"
            )),
            None => ApplicationError::Persistence(format!("Database error: {db_err}")),
        },
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            ApplicationError::DatabaseConnection(e.to_string())
        },
        other => ApplicationError::Persistence(format!("Database error: {other}")),
    }
}
