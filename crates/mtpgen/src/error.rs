//! Error type for the generator as a whole.

use std::path::PathBuf;

use thiserror::Error;

/// Any error a generation, extraction or inspection run can return.
#[derive(Debug, Error)]
pub enum Error {
    /// Loading the label source failed.
    #[error(transparent)]
    Labels(#[from] mtpgen_labels::Error),

    /// Building or reading the project document failed.
    #[error(transparent)]
    Project(#[from] mtpgen_project::Error),

    /// Packing, encoding or decoding the container failed.
    #[error(transparent)]
    Container(#[from] mtpgen_container::Error),

    /// Reading or writing a container file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Broad classification of [`Error`] for callers that branch on the cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Label source has no `Labels` column.
    MissingColumn,
    /// Label source has no data rows.
    EmptySource,
    /// Material asset path is not a readable file.
    MaterialAssetNotFound,
    /// Container, embedded archive or inner document cannot be decoded.
    MalformedContainer,
    /// Filesystem failure.
    Io,
    /// Text or tabular data not in the expected format.
    Format,
    /// Configuration rejected.
    InvalidConfig,
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Labels(e) => match e {
                mtpgen_labels::Error::MissingColumn { .. } => ErrorKind::MissingColumn,
                mtpgen_labels::Error::EmptySource { .. } => ErrorKind::EmptySource,
                mtpgen_labels::Error::FileNotFound { .. } | mtpgen_labels::Error::FileRead { .. } => {
                    ErrorKind::Io
                }
                mtpgen_labels::Error::UnsupportedFormat { .. }
                | mtpgen_labels::Error::Csv { .. }
                | mtpgen_labels::Error::Workbook { .. } => ErrorKind::Format,
            },
            Error::Project(e) => match e {
                mtpgen_project::Error::Common(inner) if inner.is_format() => ErrorKind::Format,
                mtpgen_project::Error::Common(_) | mtpgen_project::Error::ConfigRead { .. } => {
                    ErrorKind::Io
                }
                mtpgen_project::Error::EmptySource => ErrorKind::EmptySource,
                mtpgen_project::Error::InvalidConfig(_) | mtpgen_project::Error::ConfigParse { .. } => {
                    ErrorKind::InvalidConfig
                }
                mtpgen_project::Error::Xml(_)
                | mtpgen_project::Error::MissingElement(_)
                | mtpgen_project::Error::InvalidAttribute { .. } => ErrorKind::MalformedContainer,
            },
            Error::Container(e) => match e {
                mtpgen_container::Error::MaterialAssetNotFound { .. } => {
                    ErrorKind::MaterialAssetNotFound
                }
                mtpgen_container::Error::Io(_) | mtpgen_container::Error::MaterialAssetRead { .. } => {
                    ErrorKind::Io
                }
                mtpgen_container::Error::Xml(_) => ErrorKind::Format,
                mtpgen_container::Error::Zip(zip::result::ZipError::Io(_)) => ErrorKind::Io,
                mtpgen_container::Error::Zip(_)
                | mtpgen_container::Error::MalformedContainer(_)
                | mtpgen_container::Error::UnsafeEntryName(_) => ErrorKind::MalformedContainer,
            },
            Error::Io { .. } => ErrorKind::Io,
        }
    }
}

/// Result type for generator operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_of_label_errors() {
        let err: Error = mtpgen_labels::Error::MissingColumn {
            column: "Labels".into(),
            path: "a.csv".into(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::MissingColumn);

        let err: Error = mtpgen_labels::Error::EmptySource { path: "a.csv".into() }.into();
        assert_eq!(err.kind(), ErrorKind::EmptySource);
    }

    #[test]
    fn test_kind_of_container_errors() {
        let err: Error = mtpgen_container::Error::MalformedContainer("x".into()).into();
        assert_eq!(err.kind(), ErrorKind::MalformedContainer);

        let err: Error = mtpgen_container::Error::MaterialAssetNotFound { path: "m.mat".into() }.into();
        assert_eq!(err.kind(), ErrorKind::MaterialAssetNotFound);
    }

    #[test]
    fn test_kind_of_corrupt_document() {
        let err: Error = mtpgen_project::Error::Xml(mtpgen_xml::Error::NoRoot).into();
        assert_eq!(err.kind(), ErrorKind::MalformedContainer);
    }

    #[test]
    fn test_kind_of_config_error() {
        let err: Error = mtpgen_project::Error::InvalidConfig("chunk".into()).into();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
        assert_eq!(
            Error::io("out.mtp", std::io::Error::other("disk full")).kind(),
            ErrorKind::Io
        );
    }
}
