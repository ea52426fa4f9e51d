//! Error types for the container crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when packing, encoding or decoding MTP containers.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// XML writing error.
    #[error("{0}")]
    Xml(#[from] mtpgen_xml::Error),

    /// ZIP writing error.
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Material asset path does not point at a file.
    #[error("material asset not found: {path}")]
    MaterialAssetNotFound { path: PathBuf },

    /// Material asset exists but could not be read.
    #[error("failed to read material asset {path}: {source}")]
    MaterialAssetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Container or embedded archive cannot be decoded.
    #[error("malformed container: {0}")]
    MalformedContainer(String),

    /// Archive entry name would land outside the extraction directory.
    #[error("unsafe archive entry name: {0}")]
    UnsafeEntryName(String),
}

impl Error {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedContainer(message.into())
    }
}

/// Result type for container operations.
pub type Result<T> = std::result::Result<T, Error>;
