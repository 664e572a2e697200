//! Error types for quote extraction

use thiserror::Error;

/// Errors that can occur while extracting option quotes
#[derive(Error, Debug)]
pub enum ExtractError {
    /// A numeric field matched its pattern but did not decode
    #[error("Invalid number for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    /// A date or time field matched its pattern but did not decode
    #[error("Invalid date {value:?} (expected {format})")]
    InvalidDate { value: String, format: &'static str },

    /// A contract header appeared before any company header
    #[error("Line {line}: contract header before any company header")]
    MissingCompany { line: usize },

    /// A quote line appeared before any contract header
    #[error("Line {line}: quote line before any contract header")]
    MissingContract { line: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExtractError {
    /// Whether the error comes from a single malformed field.
    ///
    /// The scanner skips such lines instead of aborting the file.
    #[must_use]
    pub const fn is_malformed_field(&self) -> bool {
        matches!(self, Self::InvalidNumber { .. } | Self::InvalidDate { .. })
    }
}

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;
