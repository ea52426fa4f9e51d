//! Error types for XML reading and writing.

use thiserror::Error;

/// Errors that can occur when parsing or writing project XML.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// XML parsing or writing error.
    #[error("XML error: {0}")]
    Xml(String),

    /// Document contains no root element.
    #[error("no root element found in XML")]
    NoRoot,
}

/// Result type for XML operations.
pub type Result<T> = std::result::Result<T, Error>;
