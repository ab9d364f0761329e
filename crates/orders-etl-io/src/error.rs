//! Error types for pipeline file I/O

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing pipeline files
#[derive(Debug, Error)]
pub enum EtlIoError {
    /// Opening the input dataset failed (missing file, permissions)
    #[error("failed to open '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Creating an output file or its parent directory failed
    #[error("failed to create '{path}': {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Parquet encode/decode failed (corrupt file, unsupported encoding)
    #[error(transparent)]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Arrow-level failure while materializing or serializing batches
    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),
}

/// Result type alias for EtlIoError
pub type Result<T> = std::result::Result<T, EtlIoError>;
