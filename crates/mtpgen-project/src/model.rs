//! Project document model.
//!
//! The model holds only what varies between projects: timestamps, copy count,
//! the root logic node, and the material sheets with their label texts (plain,
//! not yet Base64 encoded). Every fixed attribute table lives in the XML stage
//! ([`crate::builder`]).

use mtpgen_common::Timestamp;

use crate::config::MaterialProfile;

/// Text written into label slots past the end of the label list.
pub const PADDING_TEXT: &str = "default";

/// `Version` attribute of project documents.
pub const FORMAT_VERSION: &str = "12";

/// Name of the synthetic root grouping node.
pub const ROOT_NODE_NAME: &str = "Root";

/// The inner project document (`Data.xml`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDocument {
    /// `DataCreation` attribute.
    pub created: Timestamp,
    /// `DataLastModyfication` attribute.
    pub modified: Timestamp,
    /// `OrderNumberOfCopy` attribute.
    pub copy_count: u32,
    /// The single root grouping node.
    pub logic_node: LogicNode,
    /// Material sheets in order.
    pub materials: Vec<Material>,
}

/// Synthetic root of the label tree. Deeper hierarchies are not supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicNode {
    pub ref_id: i32,
    pub parent_ref_id: i32,
    pub level: i32,
    /// Plain (decoded) node name.
    pub name: String,
    /// How many times `name` is Base64 encoded on write.
    pub name_encoding_depth: u8,
}

impl LogicNode {
    /// The root node, with its name encoded `name_encoding_depth` times.
    pub fn root(name_encoding_depth: u8) -> Self {
        Self {
            ref_id: 1,
            parent_ref_id: -1,
            level: -1,
            name: ROOT_NODE_NAME.to_string(),
            name_encoding_depth,
        }
    }
}

/// One physical label sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Material {
    /// Sheet layout attributes.
    pub profile: MaterialProfile,
    /// Label slots, `labels[i].index == i`.
    pub labels: Vec<Label>,
}

/// One printable label slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    /// Position within the material, also written as `OrderIndex`.
    pub index: usize,
    /// Plain (decoded) text.
    pub text: String,
}

impl Label {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    /// Whether this slot was filled with [`PADDING_TEXT`].
    pub fn is_padding(&self) -> bool {
        self.text == PADDING_TEXT
    }
}

impl ProjectDocument {
    /// Total label slots across all materials, padding included.
    pub fn slot_count(&self) -> usize {
        self.materials.iter().map(|m| m.labels.len()).sum()
    }

    /// Label texts in document order, padding included.
    pub fn label_texts(&self) -> impl Iterator<Item = &str> {
        self.materials
            .iter()
            .flat_map(|m| m.labels.iter().map(|l| l.text.as_str()))
    }
}
