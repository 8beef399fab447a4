//! Error types for the database client

use meetme_common::LinkStoreError;
use thiserror::Error;

/// Errors that can occur when working with the database client
#[derive(Debug, Error)]
pub enum DbError {
    /// Error from SQLx
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// Error with the database configuration
    #[error("Database configuration error: {0}")]
    ConfigError(String),

    /// Error with database pool creation
    #[error("Database pool error: {0}")]
    PoolError(String),

    /// Error with database query
    #[error("Database query error: {0}")]
    QueryError(String),

    /// A stored row could not be mapped back to a model
    #[error("Corrupt row: {0}")]
    CorruptRow(String),
}

impl From<DbError> for LinkStoreError {
    fn from(err: DbError) -> Self {
        LinkStoreError::Backend(err.to_string())
    }
}
