//! End-to-end generation of a container file from a label source.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use mtpgen_container::archive::{self, DATA_ENTRY, MATERIALS_DIR};
use mtpgen_container::MtpContainerCodec;
use mtpgen_project::{DataDocumentBuilder, GeneratorConfig};

use crate::{Error, Result};

/// Outcome of a generation run whose file was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Path of the written container.
    pub output: PathBuf,
    /// Labels read from the source.
    pub labels: usize,
    /// Material sheets in the document.
    pub materials: usize,
    /// Result of reading the written file back.
    pub verification: Verification,
}

/// Read-back check of a written container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// Both entries were present and non-empty.
    Passed { entries: Vec<String> },
    /// The file was written but does not read back as expected.
    Failed(String),
}

impl Verification {
    pub fn is_passed(&self) -> bool {
        matches!(self, Verification::Passed { .. })
    }
}

/// Generate a container with the default configuration.
///
/// Reads labels from the `Labels` column of `labels_path`, lays them out
/// on material sheets of seven slots, embeds the material asset at
/// `material_path` and writes the result to `output`. If `output` is an
/// existing directory the file is named `AUTOMATED_PROJECT.mtp` inside it.
pub fn generate_mtp_solution(
    labels_path: impl AsRef<Path>,
    material_path: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<GenerationReport> {
    generate_with_config(labels_path, material_path, output, &GeneratorConfig::default())
}

/// Generate a container with an explicit configuration.
///
/// Every input is read and the container is fully built before anything is
/// written, and the file is replaced atomically, so a failed run leaves no
/// partial output.
pub fn generate_with_config(
    labels_path: impl AsRef<Path>,
    material_path: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &GeneratorConfig,
) -> Result<GenerationReport> {
    let labels_path = labels_path.as_ref();
    let material_path = material_path.as_ref();
    config.validate()?;

    let labels = mtpgen_labels::load_labels(labels_path)?;
    tracing::debug!(path = %labels_path.display(), count = labels.len(), "loaded labels");

    let document = DataDocumentBuilder::new(config).build_document(&labels)?;
    let data_xml = document.to_bytes()?;
    let archive = archive::pack(&data_xml, material_path)?;
    let container = MtpContainerCodec::new()
        .with_timestamp(document.created.clone())
        .encode(&archive)?;

    let output = resolve_output(output.as_ref(), config);
    write_atomic(&output, &container)?;

    let verification = verify(&output);
    if let Verification::Failed(reason) = &verification {
        tracing::warn!(output = %output.display(), %reason, "written container failed verification");
    }

    tracing::info!(
        output = %output.display(),
        labels = labels.len(),
        materials = document.materials.len(),
        bytes = container.len(),
        "generated container"
    );

    Ok(GenerationReport {
        output,
        labels: labels.len(),
        materials: document.materials.len(),
        verification,
    })
}

/// Destination file for `output`: the path itself, or the configured file
/// name inside it when it is an existing directory.
pub fn resolve_output(output: &Path, config: &GeneratorConfig) -> PathBuf {
    if output.is_dir() {
        output.join(&config.output_file_name)
    } else {
        output.to_path_buf()
    }
}

/// Write through a temporary file in the destination directory, then rename.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    temp.write_all(bytes).map_err(|e| Error::io(temp.path(), e))?;
    temp.as_file().sync_all().map_err(|e| Error::io(path, e))?;
    temp.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}

/// Decode the file at `path`, extract it to a scratch directory and check
/// that the project document and one material asset came out non-empty.
pub fn verify(path: &Path) -> Verification {
    match check_container(path) {
        Ok(entries) => Verification::Passed { entries },
        Err(reason) => Verification::Failed(reason),
    }
}

fn check_container(path: &Path) -> std::result::Result<Vec<String>, String> {
    let bytes = fs::read(path).map_err(|e| format!("cannot read back {}: {}", path.display(), e))?;
    let archive = MtpContainerCodec::new()
        .decode(&bytes)
        .map_err(|e| e.to_string())?;

    let scratch = tempfile::tempdir().map_err(|e| format!("cannot create scratch directory: {}", e))?;
    let written = archive::extract_to(&archive, scratch.path()).map_err(|e| e.to_string())?;

    let mut entries = Vec::with_capacity(written.len());
    for file in &written {
        let name = entry_name(file, scratch.path());
        if extracted_size(file)? == 0 {
            return Err(format!("entry {} is empty", name));
        }
        entries.push(name);
    }

    if !entries.iter().any(|name| name == DATA_ENTRY) {
        return Err(format!("archive has no {}", DATA_ENTRY));
    }
    let materials = entries
        .iter()
        .filter(|name| name.starts_with(&format!("{}/", MATERIALS_DIR)))
        .count();
    if materials != 1 {
        return Err(format!("archive has {} material assets, expected 1", materials));
    }
    if entries.len() != 2 {
        return Err(format!("archive has {} entries, expected 2", entries.len()));
    }

    Ok(entries)
}

/// Archive-style `/` separated name of an extracted file.
fn entry_name(file: &Path, root: &Path) -> String {
    file.strip_prefix(root)
        .unwrap_or(file)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn extracted_size(file: &Path) -> std::result::Result<u64, String> {
    fs::metadata(file)
        .map(|m| m.len())
        .map_err(|e| format!("cannot stat extracted {}: {}", file.display(), e))
}
