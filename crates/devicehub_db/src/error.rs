//! Error types for the database client

use sqlx::error::ErrorKind;
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

    /// Error with database URL parsing
    #[error("Database URL error: {0}")]
    UrlError(String),

    /// Error with database pool creation
    #[error("Database pool error: {0}")]
    PoolError(String),

    /// Error with database query
    #[error("Database query error: {0}")]
    QueryError(String),

    /// A constraint of the schema rejected the statement
    #[error("Database integrity error: {0}")]
    IntegrityViolation(String),

    /// A stored value could not be decoded
    #[error("Database decode error: {0}")]
    DecodeError(String),
}

impl DbError {
    /// Classifies a failed query, separating constraint violations from other failures.
    pub fn from_query(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => {
                    return DbError::IntegrityViolation(db_err.message().to_string());
                }
                _ => {}
            }
        }
        DbError::QueryError(err.to_string())
    }

    /// Returns `true` for constraint violations.
    pub fn is_integrity_violation(&self) -> bool {
        matches!(self, DbError::IntegrityViolation(_))
    }
}
