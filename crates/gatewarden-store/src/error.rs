//! Error types for store operations.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Journal backend error.
    #[error("journal error: {0}")]
    Journal(#[from] gatewarden_journal::JournalError),
    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// An asset with the same serial number is already registered.
    #[error("asset with serial number '{serial_number}' already exists")]
    DuplicateSerial {
        /// The conflicting serial number.
        serial_number: String,
    },
    /// Rejected record field.
    #[error("invalid {field}: {reason}")]
    InvalidRecord {
        /// Field that failed validation.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}
