//! Error types for mtpgen-common.

use thiserror::Error;

/// Common error type for mtpgen operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Text field is not valid Base64.
    #[error("invalid Base64 text: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decoded text field is not valid UTF-8.
    #[error("decoded text is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error is a text format error (bad Base64 or bad UTF-8).
    pub fn is_format(&self) -> bool {
        matches!(self, Error::Base64(_) | Error::Utf8(_))
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
