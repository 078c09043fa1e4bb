//! Error types for logbook.
//!
//! This module defines all error types used throughout the logbook crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for logbook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Duty Errors ===
    /// Attempted to record a duty whose text is empty after trimming.
    #[error("duty text must not be empty")]
    Validation,

    /// Attempted to remove a duty at a position the day doesn't have.
    #[error("no duty at index {index} for {date} (day has {len})")]
    IndexOutOfRange {
        /// The day being edited.
        date: String,
        /// The requested position.
        index: usize,
        /// Number of duties currently recorded for the day.
        len: usize,
    },

    /// The date lies outside the logbook's display range.
    #[error("{date} is outside the logbook range")]
    OutOfRange {
        /// The offending date.
        date: String,
    },

    /// A session line could not be understood.
    #[error("unknown command '{input}' (try 'help')")]
    UnknownCommand {
        /// The rejected line.
        input: String,
    },

    // === Calendar Errors ===
    /// A date string was not a valid `YYYY-MM-DD` calendar date.
    #[error("invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input.
        input: String,
    },

    /// A month string was not a valid `YYYY-MM` month.
    #[error("invalid month '{input}': expected YYYY-MM")]
    InvalidMonth {
        /// The rejected input.
        input: String,
    },

    /// The display range ends before it starts.
    #[error("invalid display range: start {start} is after end {end}")]
    InvalidRange {
        /// First day of the range.
        start: String,
        /// Last day of the range.
        end: String,
    },

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

/// A specialized Result type for logbook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create an invalid date error for the given input.
    #[must_use]
    pub fn invalid_date(input: impl Into<String>) -> Self {
        Self::InvalidDate {
            input: input.into(),
        }
    }

    /// Create an invalid month error for the given input.
    #[must_use]
    pub fn invalid_month(input: impl Into<String>) -> Self {
        Self::InvalidMonth {
            input: input.into(),
        }
    }

    /// Check if this error was caused by bad user input rather than the
    /// environment (storage, config, I/O).
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Validation
                | Self::IndexOutOfRange { .. }
                | Self::OutOfRange { .. }
                | Self::UnknownCommand { .. }
                | Self::InvalidDate { .. }
                | Self::InvalidMonth { .. }
        )
    }
}
