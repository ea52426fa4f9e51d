//! Error types for project documents.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when building or reading a project document.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error (text field decoding).
    #[error("{0}")]
    Common(#[from] mtpgen_common::Error),

    /// XML parsing or writing error.
    #[error("{0}")]
    Xml(#[from] mtpgen_xml::Error),

    /// No labels to lay out.
    #[error("label source is empty")]
    EmptySource,

    /// Configuration value out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read a configuration file.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid JSON for [`GeneratorConfig`](crate::GeneratorConfig).
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Required element missing from a parsed document.
    #[error("missing <{0}> element")]
    MissingElement(String),

    /// Attribute missing or not in the expected form.
    #[error("invalid {attribute} attribute on <{element}>: {value:?}")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: Option<String>,
    },
}

/// Result type for project document operations.
pub type Result<T> = std::result::Result<T, Error>;
