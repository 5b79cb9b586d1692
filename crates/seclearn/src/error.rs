//! Error types for seclearn.
//!
//! This module defines all error types used throughout the seclearn crate.
//! Persistence failures never reach callers as errors: the persistence
//! adapter logs and swallows them. What remains are validation, import,
//! configuration and database-open failures.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for seclearn operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Domain Errors ===
    /// A form was submitted without a required field.
    #[error("{message}")]
    Validation {
        /// Name of the missing field.
        field: &'static str,
        /// User-facing message.
        message: String,
    },

    /// A bulk import payload could not be used.
    #[error("invalid import payload: {message}")]
    ImportPayload {
        /// Description of what was wrong with the payload.
        message: String,
    },

    /// No record with the given id exists in the collection.
    #[error("no {collection} record with id {id}")]
    RecordNotFound {
        /// Collection that was searched.
        collection: &'static str,
        /// The id that was looked up.
        id: String,
    },

    /// A collection name could not be parsed.
    #[error("unknown collection: {0}")]
    UnknownCollection(String),

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for seclearn operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a validation error for a missing required field.
    #[must_use]
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Create an import payload error.
    #[must_use]
    pub fn import_payload(message: impl Into<String>) -> Self {
        Self::ImportPayload {
            message: message.into(),
        }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error is a form validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this error came from a malformed import payload.
    #[must_use]
    pub fn is_import_payload(&self) -> bool {
        matches!(self, Self::ImportPayload { .. })
    }
}
