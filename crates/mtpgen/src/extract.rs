//! Reading existing container files.

use std::fs;
use std::path::{Path, PathBuf};

use mtpgen_container::archive::{self, ArchiveEntry, DATA_ENTRY};
use mtpgen_container::MtpContainerCodec;
use mtpgen_project::{GeneratorConfig, ProjectDocument};

use crate::{Error, Result};

/// Decode the container at `path` into its archive entries.
pub fn read_container(path: impl AsRef<Path>) -> Result<Vec<ArchiveEntry>> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    let archive = MtpContainerCodec::new().decode(&bytes)?;
    Ok(archive::unpack(&archive)?)
}

/// Extract the archive embedded in the container at `input` into `dir`.
///
/// `progress` is called with `(entries_done, total)` before each entry.
pub fn extract_mtp(
    input: impl AsRef<Path>,
    dir: impl AsRef<Path>,
    progress: impl FnMut(usize, usize),
) -> Result<Vec<PathBuf>> {
    let input = input.as_ref();
    let dir = dir.as_ref();

    let bytes = fs::read(input).map_err(|e| Error::io(input, e))?;
    let archive = MtpContainerCodec::new().decode(&bytes)?;
    let written = archive::extract_to_with_progress(&archive, dir, progress)?;

    tracing::info!(
        input = %input.display(),
        output = %dir.display(),
        entries = written.len(),
        "extracted container"
    );
    Ok(written)
}

/// Decode the project document inside the container at `input`.
pub fn inspect_mtp(input: impl AsRef<Path>, config: &GeneratorConfig) -> Result<ProjectDocument> {
    let input = input.as_ref();
    let data = read_container(input)?
        .into_iter()
        .find(|entry| entry.name == DATA_ENTRY)
        .ok_or_else(|| {
            mtpgen_container::Error::MalformedContainer(format!("archive has no {}", DATA_ENTRY))
        })?;

    Ok(ProjectDocument::parse(&data.data, config.root_name_encoding_depth)?)
}
