//! XML element tree for MTP project documents.
//!
//! MTP files are plain XML, both the outer container and the `Data.xml`
//! document packed inside it. This crate holds the narrow subset of XML the
//! format needs: an owned element tree with ordered attributes, a writer with
//! an XML declaration and optional indentation, and a parser back into the tree.
//!
//! # Example
//!
//! ```
//! use mtpgen_xml::{XmlElement, WriteOptions};
//!
//! let root = XmlElement::new("Project")
//!     .attr("Version", "12")
//!     .child(XmlElement::new("Content").text("UEsDBA=="));
//!
//! let bytes = root.to_bytes(&WriteOptions::compact())?;
//! let parsed = XmlElement::parse(&bytes)?;
//! assert_eq!(parsed.find("Content").map(|c| c.content()), Some("UEsDBA=="));
//! # Ok::<(), mtpgen_xml::Error>(())
//! ```

mod attributes;
mod element;
mod error;
mod parser;
mod writer;

pub use attributes::Attributes;
pub use element::XmlElement;
pub use error::{Error, Result};
pub use writer::WriteOptions;
