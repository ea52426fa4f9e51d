//! Label/material project document (`Data.xml`).
//!
//! The project document is the layout tree packed inside an MTP container:
//! a single root logic node, one `Material` per sheet of labels, a fixed block
//! of wire metadata column descriptors and two empty resource nodes. Every
//! label text and the root node name are stored Base64 encoded.
//!
//! # Example
//!
//! ```
//! use mtpgen_project::{DataDocumentBuilder, GeneratorConfig, ProjectDocument};
//!
//! let config = GeneratorConfig::default();
//! let labels = ["X1", "X2", "X3"];
//!
//! let xml = DataDocumentBuilder::new(&config).build(&labels)?;
//!
//! let doc = ProjectDocument::parse(&xml, config.root_name_encoding_depth)?;
//! assert_eq!(doc.materials.len(), 1);
//! assert_eq!(doc.materials[0].labels[0].text, "X1");
//! assert!(doc.materials[0].labels[3].is_padding());
//! # Ok::<(), mtpgen_project::Error>(())
//! ```

mod builder;
mod error;
mod model;
mod reader;

pub mod columns;
pub mod config;

pub use builder::{DataDocumentBuilder, DOCUMENT_INDENT};
pub use config::{GeneratorConfig, MaterialProfile};
pub use error::{Error, Result};
pub use model::{Label, LogicNode, Material, ProjectDocument, FORMAT_VERSION, PADDING_TEXT, ROOT_NODE_NAME};
