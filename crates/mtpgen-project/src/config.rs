//! Generator configuration.
//!
//! Values that shape every generated project (chunk size, material profile,
//! timestamp layout, default output name) are carried in one explicit value
//! instead of process-wide constants. Any field left out of a JSON config
//! file keeps its default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use mtpgen_common::DEFAULT_TIMESTAMP_FORMAT;

use crate::{Error, Result};

/// Labels per material sheet.
pub const DEFAULT_CHUNK_SIZE: usize = 7;

/// Output file name used when only a directory is given.
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "AUTOMATED_PROJECT.mtp";

/// How many times the root logic node name is run through the text codec.
///
/// The consuming application has only been observed with doubly encoded root
/// names, while every other field is encoded once.
pub const DEFAULT_ROOT_NAME_ENCODING_DEPTH: u8 = 2;

/// Physical layout attributes of a material sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialProfile {
    /// Material name, also the stem of the bundled `.mat` asset.
    pub name: String,
    /// Printer device identifier.
    pub device: String,
    /// Sheet height in millimetres, as written.
    pub height: String,
    /// Sheet width in millimetres, as written.
    pub width: String,
    /// Order code and color suffix.
    pub color: String,
    /// Rotation of the sheet layout in degrees.
    pub angle: String,
}

impl Default for MaterialProfile {
    fn default() -> Self {
        Self {
            name: "TR_WML6(13X13)R".to_string(),
            device: "D17".to_string(),
            height: "35.75".to_string(),
            width: "175".to_string(),
            color: "0816252:WH".to_string(),
            angle: "0".to_string(),
        }
    }
}

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Label slots per material.
    pub chunk_size: usize,
    /// File name used when the caller names only an output directory.
    pub output_file_name: String,
    /// chrono format string for `DataCreation`/`DataLastModyfication`.
    pub timestamp_format: String,
    /// `OrderNumberOfCopy` on the project root.
    pub copy_count: u32,
    /// Encoding depth of the root logic node name.
    pub root_name_encoding_depth: u8,
    /// Material sheet attributes.
    pub material: MaterialProfile,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            output_file_name: DEFAULT_OUTPUT_FILE_NAME.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            copy_count: 1,
            root_name_encoding_depth: DEFAULT_ROOT_NAME_ENCODING_DEPTH,
            material: MaterialProfile::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load a configuration from a JSON file and validate it.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&data).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Override the chunk size.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Check values that would produce an unusable document.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::InvalidConfig("chunk_size must be at least 1".to_string()));
        }
        if self.output_file_name.trim().is_empty() {
            return Err(Error::InvalidConfig("output_file_name must not be empty".to_string()));
        }
        if self.timestamp_format.is_empty() {
            return Err(Error::InvalidConfig("timestamp_format must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.chunk_size, 7);
        assert_eq!(config.root_name_encoding_depth, 2);
        assert_eq!(config.material.name, "TR_WML6(13X13)R");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let config = GeneratorConfig::default().with_chunk_size(0);
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "chunk_size": 5, "material": {{ "device": "D20" }} }}"#).unwrap();

        let config = GeneratorConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.chunk_size, 5);
        assert_eq!(config.material.device, "D20");
        assert_eq!(config.material.name, "TR_WML6(13X13)R");
        assert_eq!(config.output_file_name, DEFAULT_OUTPUT_FILE_NAME);
    }

    #[test]
    fn test_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "chunk_size = 5").unwrap();
        let err = GeneratorConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_json_validated() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "chunk_size": 0 }}"#).unwrap();
        let err = GeneratorConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
