//! Error taxonomy for the extract decoder.
//!
//! Only file-level conditions surface as errors: a file that cannot be
//! opened, a truncated record under strict scanning, a malformed header
//! line. Field-level decode failures are not errors; they map to the
//! configured policy default inside [`crate::decode::FieldDecoder`].

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::schema::SchemaError;

/// Errors that abort an extract operation.
#[derive(Debug, Error, Diagnostic)]
pub enum ExtractError {
    /// The schema failed validation; raised before any file access.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The data or header file could not be read.
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        /// Path of the file being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A nonzero trailing chunk shorter than one record (strict mode only).
    #[error(
        "truncated record at byte {offset} of '{}': expected {expected} bytes, got {got}",
        path.display()
    )]
    TruncatedRecord {
        /// Path of the data file.
        path: PathBuf,
        /// Byte offset where the partial record starts.
        offset: u64,
        /// Record width the schema requires.
        expected: usize,
        /// Bytes actually present.
        got: usize,
    },

    /// The header file exists but its first line is malformed.
    #[error("malformed header line in '{}': {reason}", path.display())]
    HeaderParse {
        /// Path of the header file.
        path: PathBuf,
        /// What was wrong with the line.
        reason: String,
    },
}

/// Result type for extract operations.
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;
