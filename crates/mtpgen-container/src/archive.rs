//! In-memory archive embedded in a container.
//!
//! The archive is a deflate-compressed zip holding two entries: the project
//! document `Data.xml` and the material definition under `Materials/`.
//! Entries are written in insertion order; readers look entries up by name.

use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::{Error, Result};

/// Entry name of the project document.
pub const DATA_ENTRY: &str = "Data.xml";

/// Directory holding material definition assets.
pub const MATERIALS_DIR: &str = "Materials";

/// A file read out of an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Path inside the archive, `/` separated.
    pub name: String,
    /// Uncompressed contents.
    pub data: Vec<u8>,
}

/// Builds the container archive in memory.
pub struct ContainerArchiveBuilder {
    zip_writer: ZipWriter<Cursor<Vec<u8>>>,
    names: Vec<String>,
}

impl ContainerArchiveBuilder {
    /// Create an empty archive.
    pub fn new() -> Self {
        Self {
            zip_writer: ZipWriter::new(Cursor::new(Vec::new())),
            names: Vec::new(),
        }
    }

    /// Add a deflate-compressed file.
    pub fn add_file(&mut self, name: &str, content: &[u8]) -> Result<()> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        self.zip_writer.start_file(name, options)?;
        self.zip_writer.write_all(content)?;
        self.names.push(name.to_string());
        Ok(())
    }

    /// Add the project document as `Data.xml`.
    pub fn add_data_document(&mut self, xml: &[u8]) -> Result<()> {
        self.add_file(DATA_ENTRY, xml)
    }

    /// Copy a material asset verbatim to `Materials/<file name>`.
    ///
    /// Returns the entry name.
    pub fn add_material_asset(&mut self, path: &Path) -> Result<String> {
        let data = read_material_asset(path)?;
        let name = material_entry_name(path)?;
        self.add_file(&name, &data)?;
        Ok(name)
    }

    /// Entry names added so far, in order.
    pub fn entry_names(&self) -> &[String] {
        &self.names
    }

    /// Finish the archive and return its bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        let cursor = self.zip_writer.finish()?;
        Ok(cursor.into_inner())
    }
}

impl Default for ContainerArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Pack a project document and its material asset into archive bytes.
pub fn pack(data_xml: &[u8], material_asset: &Path) -> Result<Vec<u8>> {
    let mut builder = ContainerArchiveBuilder::new();
    builder.add_data_document(data_xml)?;
    let material_entry = builder.add_material_asset(material_asset)?;
    let bytes = builder.finish()?;

    tracing::debug!(
        data_xml = data_xml.len(),
        material = %material_entry,
        archive = bytes.len(),
        "packed container archive"
    );

    Ok(bytes)
}

/// Archive entry name for a material asset path.
pub fn material_entry_name(path: &Path) -> Result<String> {
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::MaterialAssetNotFound {
            path: path.to_path_buf(),
        })?;
    Ok(format!("{}/{}", MATERIALS_DIR, file_name.to_string_lossy()))
}

fn read_material_asset(path: &Path) -> Result<Vec<u8>> {
    let is_file = fs::metadata(path).map(|m| m.is_file()).unwrap_or(false);
    if !is_file {
        return Err(Error::MaterialAssetNotFound {
            path: path.to_path_buf(),
        });
    }
    fs::read(path).map_err(|source| Error::MaterialAssetRead {
        path: path.to_path_buf(),
        source,
    })
}

fn open_archive(bytes: &[u8]) -> Result<ZipArchive<Cursor<&[u8]>>> {
    ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| Error::malformed(format!("embedded archive is not a valid zip: {}", e)))
}

/// Read every file entry out of archive bytes.
pub fn unpack(bytes: &[u8]) -> Result<Vec<ArchiveEntry>> {
    let mut archive = open_archive(bytes)?;
    let mut entries = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| Error::malformed(format!("unreadable archive entry {}: {}", i, e)))?;
        if file.is_dir() {
            continue;
        }

        let name = file.name().to_string();
        let mut data = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut data)
            .map_err(|e| Error::malformed(format!("corrupt archive entry {}: {}", name, e)))?;
        entries.push(ArchiveEntry { name, data });
    }

    Ok(entries)
}

/// Extract every file entry under `dir`, creating directories as needed.
///
/// Returns the written paths in archive order.
pub fn extract_to(bytes: &[u8], dir: &Path) -> Result<Vec<PathBuf>> {
    extract_to_with_progress(bytes, dir, |_, _| {})
}

/// [`extract_to`] reporting `(entries_done, total)` before each entry.
pub fn extract_to_with_progress(
    bytes: &[u8],
    dir: &Path,
    mut progress: impl FnMut(usize, usize),
) -> Result<Vec<PathBuf>> {
    let mut archive = open_archive(bytes)?;
    fs::create_dir_all(dir)?;

    let total = archive.len();
    let mut written = Vec::with_capacity(total);
    for i in 0..total {
        progress(i, total);
        let mut file = archive
            .by_index(i)
            .map_err(|e| Error::malformed(format!("unreadable archive entry {}: {}", i, e)))?;

        let relative = file
            .enclosed_name()
            .ok_or_else(|| Error::UnsafeEntryName(file.name().to_string()))?;
        let output_path = dir.join(relative);

        if file.is_dir() {
            fs::create_dir_all(&output_path)?;
            continue;
        }
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut data = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut data)
            .map_err(|e| Error::malformed(format!("corrupt archive entry {}: {}", file.name(), e)))?;
        fs::write(&output_path, data)?;
        written.push(output_path);
    }

    Ok(written)
}
