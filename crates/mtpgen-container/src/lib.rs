//! MTP container codec.
//!
//! An MTP project file nests four encodings:
//!
//! - The project document (`Data.xml`) and the material asset are packed into
//!   a deflate-compressed zip archive ([`archive`])
//! - The archive bytes are Base64 encoded into the `Content` element of a small
//!   outer XML document ([`codec`])
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use mtpgen_container::{archive, MtpContainerCodec};
//!
//! let archive_bytes = archive::pack(b"<Project/>", Path::new("TR_WML6(13X13)R.mat"))?;
//! let mtp = MtpContainerCodec::new().encode(&archive_bytes)?;
//! std::fs::write("labels.mtp", &mtp)?;
//!
//! let decoded = MtpContainerCodec::new().decode(&mtp)?;
//! for entry in archive::unpack(&decoded)? {
//!     println!("{}: {} bytes", entry.name, entry.data.len());
//! }
//! # Ok::<(), mtpgen_container::Error>(())
//! ```

mod error;

pub mod archive;
pub mod codec;

pub use archive::{ArchiveEntry, ContainerArchiveBuilder, DATA_ENTRY, MATERIALS_DIR};
pub use codec::MtpContainerCodec;
pub use error::{Error, Result};
