//! Error types for the core transformation crate

use thiserror::Error;

/// Errors that can occur while transforming order batches
#[derive(Debug, Error)]
pub enum CoreError {
    /// A required column is missing from the input batch
    #[error("missing required column '{name}'")]
    MissingColumn { name: String },

    /// A column exists but has an unexpected Arrow type
    #[error("column '{name}' has type {actual}, expected {expected}")]
    ColumnType {
        name: String,
        expected: &'static str,
        actual: String,
    },

    /// An Arrow kernel (filter, cast, batch construction) failed
    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),
}

/// Result type alias for CoreError
pub type Result<T> = std::result::Result<T, CoreError>;
