//! Domain error types
//!
//! This module defines the error taxonomy for Medrec. All errors are
//! domain-specific and don't expose third-party driver types.

use thiserror::Error;

/// Main Medrec error type
///
/// This is the primary error type used throughout the crate. Validation
/// failures are always raised before any write is committed; database
/// failures are always accompanied by a rollback attempt.
#[derive(Debug, Error)]
pub enum MedrecError {
    /// A precondition on the input was violated before any persistence
    /// occurred (missing or malformed field, immutable-field mutation
    /// attempt, not-found on deactivate).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A failure surfaced by the storage layer during repository execution,
    /// transaction begin, or commit. Carries the underlying driver message.
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl MedrecError {
    /// Build a validation error from anything displayable.
    pub fn validation(msg: impl Into<String>) -> Self {
        MedrecError::Validation(msg.into())
    }

    /// Build a database error carrying the driver message as context.
    pub fn database(msg: impl std::fmt::Display) -> Self {
        MedrecError::Database(msg.to_string())
    }
}

impl From<std::io::Error> for MedrecError {
    fn from(err: std::io::Error) -> Self {
        MedrecError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for MedrecError {
    fn from(err: toml::de::Error) -> Self {
        MedrecError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<tokio_postgres::Error> for MedrecError {
    fn from(err: tokio_postgres::Error) -> Self {
        MedrecError::Database(err.to_string())
    }
}
