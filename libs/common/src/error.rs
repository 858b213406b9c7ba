//! Error types for catalog database access

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Error type for catalog database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred while connecting to the catalog
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during query execution or row decoding
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
