//! Error types for seglog-tsv operations.

use std::io;
use thiserror::Error;

/// The error type for seglog-tsv operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while reading or writing.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Tab-delimited record could not be decoded or encoded.
    #[error("TSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The input contained no header line.
    #[error("Input has no header row")]
    MissingHeader,
}

/// A specialized Result type for seglog-tsv operations.
pub type Result<T> = std::result::Result<T, Error>;
