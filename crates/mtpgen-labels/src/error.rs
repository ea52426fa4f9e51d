//! Error types for label loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading labels from a tabular source.
#[derive(Debug, Error)]
pub enum Error {
    /// Source file not found.
    #[error("label source not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read the source file.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension is not a supported tabular format.
    #[error("unsupported label source format: {path} (expected .csv, .tsv, .txt or .xlsx)")]
    UnsupportedFormat { path: PathBuf },

    /// Failed to parse a delimited text file.
    #[error("failed to parse {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failed to read a workbook.
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// Required column not present in the header row.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    /// Header row present but no data rows.
    #[error("label source has no rows: {path}")]
    EmptySource { path: PathBuf },
}

/// Result type for label loading.
pub type Result<T> = std::result::Result<T, Error>;
