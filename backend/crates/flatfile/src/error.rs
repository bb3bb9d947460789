//! Error types for the flatfile crate.
//!
//! One semantic enum covers path validation, file reads, JSON parsing,
//! and atomic writes, following the project's error handling conventions
//! with `thiserror`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when opening, loading, or saving a document file.
///
/// Variants carry the offending path and a description of the underlying
/// failure so callers can log a complete account without holding onto
/// non-cloneable I/O error values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The configured path does not name a file inside an openable directory.
    #[error("data file path must name a file: '{path}'")]
    InvalidPath {
        /// The rejected path.
        path: PathBuf,
    },

    /// The file or its containing directory could not be read.
    #[error("failed to read data file at '{path}': {message}")]
    Read {
        /// Path to the data file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The file contents are not valid JSON for the document type.
    #[error("invalid JSON in data file at '{path}': {message}")]
    Parse {
        /// Path to the data file.
        path: PathBuf,
        /// Description of the parse error.
        message: String,
    },

    /// The file could not be written or renamed into place.
    #[error("failed to write data file at '{path}': {message}")]
    Write {
        /// Path to the data file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },
}
