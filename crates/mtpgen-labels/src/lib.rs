//! Label list loading.
//!
//! Labels come from a single column named `Labels` in a tabular file whose
//! first row is the header. Supported sources:
//!
//! - `.csv` - comma separated
//! - `.tsv`, `.txt` - tab separated
//! - `.xlsx` - first worksheet of an Office Open XML workbook
//!
//! Empty cells become empty strings. Row order is preserved.

mod delimited;
mod error;
mod table;
mod xlsx;

use std::path::Path;

pub use error::{Error, Result};
pub use table::Table;

/// Column holding label texts.
pub const LABELS_COLUMN: &str = "Labels";

/// Tabular source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Tsv,
    Xlsx,
}

impl SourceFormat {
    /// Pick the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(SourceFormat::Csv),
            Some("tsv") | Some("txt") => Ok(SourceFormat::Tsv),
            Some("xlsx") | Some("xlsm") => Ok(SourceFormat::Xlsx),
            _ => Err(Error::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Read a whole tabular file.
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let format = SourceFormat::from_path(path)?;
    if !path.is_file() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let table = match format {
        SourceFormat::Csv => delimited::read(path, b',')?,
        SourceFormat::Tsv => delimited::read(path, b'\t')?,
        SourceFormat::Xlsx => xlsx::read(path)?,
    };

    tracing::debug!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.rows.len(),
        "loaded label source"
    );

    Ok(table)
}

/// Load the values of `column` in row order.
pub fn load_column<P: AsRef<Path>>(path: P, column: &str) -> Result<Vec<String>> {
    let path = path.as_ref();
    let table = load_table(path)?;

    let values = table.column(column).ok_or_else(|| Error::MissingColumn {
        column: column.to_string(),
        path: path.to_path_buf(),
    })?;
    if values.is_empty() {
        return Err(Error::EmptySource {
            path: path.to_path_buf(),
        });
    }

    Ok(values)
}

/// Load label texts from the `Labels` column.
pub fn load_labels<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    load_column(path, LABELS_COLUMN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_format_from_path() {
        assert_eq!(SourceFormat::from_path(Path::new("a.CSV")).unwrap(), SourceFormat::Csv);
        assert_eq!(SourceFormat::from_path(Path::new("a.tsv")).unwrap(), SourceFormat::Tsv);
        assert_eq!(SourceFormat::from_path(Path::new("a.xlsx")).unwrap(), SourceFormat::Xlsx);
        assert!(matches!(
            SourceFormat::from_path(Path::new("a.ods")),
            Err(Error::UnsupportedFormat { .. })
        ));
        assert!(SourceFormat::from_path(Path::new("labels")).is_err());
    }

    #[test]
    fn test_load_labels_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.csv");
        fs::write(&path, "Id,Labels\n1,X-101\n2,\n3,\"K1, K2\"\n").unwrap();

        let labels = load_labels(&path).unwrap();
        assert_eq!(labels, ["X-101", "", "K1, K2"]);
    }

    #[test]
    fn test_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.csv");
        fs::write(&path, "Name,Text\nA,B\n").unwrap();

        let err = load_labels(&path).unwrap_err();
        assert!(matches!(err, Error::MissingColumn { ref column, .. } if column == "Labels"));
    }

    #[test]
    fn test_header_only_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.csv");
        fs::write(&path, "Labels\n").unwrap();

        assert!(matches!(load_labels(&path), Err(Error::EmptySource { .. })));
    }

    #[test]
    fn test_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_labels(dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
