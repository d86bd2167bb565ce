//! Error types for shepherd-sync.

use thiserror::Error;

/// Errors that can occur while turning an appointment into a calendar file.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The appointment form is missing or its start date cannot be resolved.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// A timestamp handed to the encoder is not a valid instant.
    #[error("Format error: {0}")]
    Format(String),

    #[error("Locator error: {0}")]
    Locator(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for shepherd-sync operations.
pub type SyncResult<T> = Result<T, SyncError>;
