//! mtpgen - MTP label printer project generator.
//!
//! Turns a column of label texts into an `.mtp` project file: the labels are
//! laid out on fixed-size material sheets, the project document and a
//! material definition asset are zipped, and the archive is wrapped Base64
//! encoded into an XML envelope.
//!
//! # Crates
//!
//! - [`mtpgen_common`] - Base64 text fields and timestamps
//! - [`mtpgen_xml`] - Element tree, writer and parser
//! - [`mtpgen_project`] - Project document (`Data.xml`) model and builder
//! - [`mtpgen_container`] - Archive packing and the container envelope
//! - [`mtpgen_labels`] - Label loading from CSV, TSV and XLSX
//!
//! # Example
//!
//! ```no_run
//! use mtpgen::prelude::*;
//!
//! let report = generate_mtp_solution("labels.csv", "TR_WML6(13X13)R.mat", "out/")?;
//! println!("{} labels on {} sheets", report.labels, report.materials);
//! assert!(report.verification.is_passed());
//!
//! let document = inspect_mtp(&report.output, &GeneratorConfig::default())?;
//! for material in &document.materials {
//!     for label in &material.labels {
//!         println!("{}: {}", label.index, label.text);
//!     }
//! }
//! # Ok::<(), mtpgen::Error>(())
//! ```

mod error;
mod extract;
mod generate;

pub use mtpgen_common as common;
pub use mtpgen_container as container;
pub use mtpgen_labels as labels;
pub use mtpgen_project as project;
pub use mtpgen_xml as xml;

pub use error::{Error, ErrorKind, Result};
pub use extract::{extract_mtp, inspect_mtp, read_container};
pub use generate::{
    generate_mtp_solution, generate_with_config, resolve_output, verify, GenerationReport,
    Verification,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        extract_mtp, generate_mtp_solution, generate_with_config, inspect_mtp, Error, ErrorKind,
        GenerationReport, Verification,
    };
    pub use mtpgen_container::{ArchiveEntry, MtpContainerCodec};
    pub use mtpgen_labels::load_labels;
    pub use mtpgen_project::{GeneratorConfig, MaterialProfile, ProjectDocument};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
