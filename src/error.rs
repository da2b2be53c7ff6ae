//! Error types for the plan task renderer.
//!
//! Errors are split by the layer that produces them: loading and validating
//! descriptors and operator settings, and building the plan task itself.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the plan task renderer.
#[derive(Debug, Error)]
pub enum SchemaHeroError {
    /// Configuration and descriptor loading errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Plan task construction errors.
    #[error("Task error: {0}")]
    Task(#[from] TaskError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration and descriptor loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file was not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// A file could not be parsed.
    #[error("Failed to parse {what}: {message}")]
    ParseError {
        /// What was being parsed (settings, database, table).
        what: &'static str,
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// Validation failed.
    #[error("Validation failed: {message}")]
    ValidationError {
        /// Description of the validation error.
        message: String,
        /// Field that failed validation.
        field: Option<String>,
    },
}

/// Errors raised while building the plan task and its configuration artifact.
#[derive(Debug, Error)]
pub enum TaskError {
    /// The structured document encoder failed.
    #[error("Failed to serialize table document: {message}")]
    Serialization {
        /// Description of the encoder failure.
        message: String,
    },

    /// The database connection does not select exactly one engine and
    /// exactly one credential source.
    #[error("Invalid connection config for database '{database}': {reason}")]
    InvalidConnectionConfig {
        /// Name of the database descriptor.
        database: String,
        /// Why the connection was rejected.
        reason: String,
    },
}

/// Result type alias for plan task operations.
pub type Result<T> = std::result::Result<T, SchemaHeroError>;

impl SchemaHeroError {
    /// Returns true if this error is retryable.
    ///
    /// Building a task is a pure function of its inputs, so none of the
    /// task or configuration errors clear up on their own.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_))
    }

    /// Returns true if the error is an invalid connection configuration.
    #[must_use]
    pub const fn is_invalid_connection(&self) -> bool {
        matches!(self, Self::Task(TaskError::InvalidConnectionConfig { .. }))
    }
}

impl ConfigError {
    /// Creates a validation error for a specific field.
    #[must_use]
    pub fn validation(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}

impl TaskError {
    /// Creates a serialization error with the given message.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Creates an invalid connection error for the named database.
    #[must_use]
    pub fn invalid_connection(database: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConnectionConfig {
            database: database.into(),
            reason: reason.into(),
        }
    }
}
