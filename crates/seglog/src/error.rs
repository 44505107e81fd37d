//! Error types for seglog operations.

use crate::predicate::PredicateError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for seglog operations.
///
/// Every variant is fatal for the run that produced it.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The input log could not be read or a segment could not be encoded.
    #[error(transparent)]
    Tsv(#[from] seglog_tsv::Error),

    /// The predicate string could not be parsed.
    #[error("Invalid predicate: {0}")]
    Predicate(#[from] PredicateError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A condition names a field that is not in the header.
    #[error("Field not found: '{field}'. Available fields: {}", available.join(", "))]
    FieldNotFound {
        /// The field named by the condition.
        field: String,
        /// Header names, in column order.
        available: Vec<String>,
    },

    /// A compared cell is not a number.
    #[error("Line {line}: value '{value}' in field '{field}' is not numeric")]
    NotNumeric {
        /// 1-based source line of the row.
        line: u64,
        /// The field being compared.
        field: String,
        /// The offending cell contents.
        value: String,
    },

    /// A row is too short to contain a compared field.
    #[error("Line {line}: row has no value for field '{field}'")]
    MissingCell {
        /// 1-based source line of the row.
        line: u64,
        /// The field being compared.
        field: String,
    },

    /// Strict mode is on and the predicate produced no conditions.
    #[error("Predicate '{0}' contains no conditions")]
    EmptyPredicate(String),

    /// The output prefix cannot be used in a file name.
    #[error("Invalid output prefix '{prefix}': {reason}")]
    InvalidPrefix {
        /// The rejected prefix.
        prefix: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A segment file or the output directory could not be written.
    #[error("Cannot write '{}'", path.display())]
    Output {
        /// The path being written.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: seglog_tsv::Error,
    },
}

/// A specialized Result type for seglog operations.
pub type Result<T> = std::result::Result<T, Error>;
