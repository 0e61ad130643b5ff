//! Error types for the particulars-core library.
//!
//! Depositor extraction itself is infallible; these errors cover the record
//! models around it.

use thiserror::Error;

/// Main error type for the particulars library.
#[derive(Error, Debug)]
pub enum ParticularsError {
    /// Backup document error.
    #[error("backup error: {0}")]
    Backup(#[from] BackupError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to backup documents.
#[derive(Error, Debug)]
pub enum BackupError {
    /// The document is not a backup (bad JSON or missing sections).
    #[error("invalid backup format: {0}")]
    InvalidFormat(String),

    /// The version field is missing or blank.
    #[error("backup has no version")]
    MissingVersion,
}

/// Result type for the particulars library.
pub type Result<T> = std::result::Result<T, ParticularsError>;
