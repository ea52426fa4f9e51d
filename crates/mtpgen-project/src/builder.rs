//! Build the project document from an ordered label list.
//!
//! Building is staged so each step can be checked on its own:
//!
//! 1. [`DataDocumentBuilder::build_document`] - labels to [`ProjectDocument`]
//! 2. [`ProjectDocument::to_element`] - model to XML tree, with all fixed attribute tables
//! 3. [`ProjectDocument::to_bytes`] - XML tree to indented UTF-8 bytes

use mtpgen_common::{text, Timestamp};
use mtpgen_xml::{WriteOptions, XmlElement};

use crate::columns::wire_information_columns;
use crate::config::GeneratorConfig;
use crate::model::{Label, LogicNode, Material, ProjectDocument, FORMAT_VERSION, PADDING_TEXT};
use crate::{Error, Result};

/// Indentation of `Data.xml`.
pub const DOCUMENT_INDENT: usize = 4;

/// Fixed `Label` attributes written after `Index` and `OrderIndex`.
///
/// `IsPrinted` and `TreeRefId` appear twice. The later value overrides the
/// earlier one while the attribute keeps its first position.
const LABEL_ATTRIBUTES: &[(&str, &str)] = &[
    ("IsPrinted", "true"),
    ("TreeRefId", "1"),
    ("HorizontalAlign", "Center"),
    ("VerticalAlign", "Center"),
    ("Rotation", "0"),
    ("Width", "12.7"),
    ("Height", "12.7"),
    ("Mirrored", "false"),
    ("GroupID", "0"),
    ("LineSpacing", "1"),
    ("ContentProtection", "false"),
    ("IsPrinted", "false"),
    ("PrintedTime", "2026-01-29T13:55:49.5675461-05:00"),
    ("CurrentColor", "0, 0, 0"),
    ("Section", "0"),
    ("TreeRefId", "1"),
];

/// Attributes shared by the `Font`, `DefaultFont` and `CurrentFont` blocks.
const FONT_ATTRIBUTES: &[(&str, &str)] = &[
    ("Size", "2.5"),
    ("Type", "TTF"),
    ("LineThickness", "0"),
    ("Stretching", "1.5"),
    ("Proportional", "false"),
    ("Kerning", "false"),
    ("WidthFactor", "1"),
    ("FormattingType", "0"),
];

const TEXT_COLOR: &str = "0, 0, 0";
const LABEL_FONT_FAMILY: &str = "Arial Narrow";
const DEFAULT_FONT_FAMILY: &str = "Arial";

/// Builds project documents for one generation run.
#[derive(Debug)]
pub struct DataDocumentBuilder<'a> {
    config: &'a GeneratorConfig,
    timestamp: Option<Timestamp>,
}

impl<'a> DataDocumentBuilder<'a> {
    /// Create a builder using `config`.
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            config,
            timestamp: None,
        }
    }

    /// Use a fixed timestamp instead of the current local time.
    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Lay out `labels` into materials of `chunk_size` slots each.
    ///
    /// The last material is padded with [`PADDING_TEXT`].
    pub fn build_document<S: AsRef<str>>(&self, labels: &[S]) -> Result<ProjectDocument> {
        self.config.validate()?;
        if labels.is_empty() {
            return Err(Error::EmptySource);
        }

        let chunk_size = self.config.chunk_size;
        let materials: Vec<Material> = labels
            .chunks(chunk_size)
            .map(|chunk| Material {
                profile: self.config.material.clone(),
                labels: (0..chunk_size)
                    .map(|index| {
                        let text = chunk.get(index).map_or(PADDING_TEXT, |s| s.as_ref());
                        Label::new(index, text)
                    })
                    .collect(),
            })
            .collect();

        tracing::debug!(
            labels = labels.len(),
            materials = materials.len(),
            chunk_size,
            "laid out project document"
        );

        let timestamp = self
            .timestamp
            .clone()
            .unwrap_or_else(|| Timestamp::now(&self.config.timestamp_format));

        Ok(ProjectDocument {
            created: timestamp.clone(),
            modified: timestamp,
            copy_count: self.config.copy_count,
            logic_node: LogicNode::root(self.config.root_name_encoding_depth),
            materials,
        })
    }

    /// Lay out `labels` and serialize the document to `Data.xml` bytes.
    pub fn build<S: AsRef<str>>(&self, labels: &[S]) -> Result<Vec<u8>> {
        self.build_document(labels)?.to_bytes()
    }
}

impl ProjectDocument {
    /// Render the document as an XML tree.
    pub fn to_element(&self) -> XmlElement {
        XmlElement::new("Project")
            .attr("DataCreation", self.created.as_str())
            .attr("DataLastModyfication", self.modified.as_str())
            .attr("Version", FORMAT_VERSION)
            .attr("OrderNumberOfCopy", self.copy_count.to_string())
            .child(logic_node_element(&self.logic_node))
            .children(self.materials.iter().map(material_element))
            .children(wire_information_columns())
            .child(XmlElement::new("CadDataBase").child(XmlElement::new("Entrys")))
            .child(XmlElement::new("Resources"))
    }

    /// Serialize the document as indented UTF-8 XML with a declaration.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self
            .to_element()
            .to_bytes(&WriteOptions::pretty(DOCUMENT_INDENT))?)
    }
}

fn logic_node_element(node: &LogicNode) -> XmlElement {
    XmlElement::new("LogicNode")
        .attr("RefId", node.ref_id.to_string())
        .child(XmlElement::new("ParentRefId").text(node.parent_ref_id.to_string()))
        .child(XmlElement::new("Name").text(text::encode_depth(&node.name, node.name_encoding_depth)))
        .child(XmlElement::new("Level").text(node.level.to_string()))
}

fn material_element(material: &Material) -> XmlElement {
    let profile = &material.profile;
    XmlElement::new("Material")
        .attr("Name", profile.name.as_str())
        .attr("Device", profile.device.as_str())
        .attr("Height", profile.height.as_str())
        .attr("Width", profile.width.as_str())
        .attr("OrderMaterialColor", profile.color.as_str())
        .attr("TransformedByAngle", profile.angle.as_str())
        .children(material.labels.iter().map(label_element))
}

fn label_element(label: &Label) -> XmlElement {
    let index = label.index.to_string();
    XmlElement::new("Label")
        .attr("Index", index.as_str())
        .attr("OrderIndex", index.as_str())
        .attrs(LABEL_ATTRIBUTES)
        .child(
            XmlElement::new("TextRange")
                .child(XmlElement::new("Color").text(TEXT_COLOR))
                .child(XmlElement::new("Text").text(text::encode(&label.text)))
                .child(font_element("Font", LABEL_FONT_FAMILY)),
        )
        .child(XmlElement::new("CutOrPerforations"))
        .child(font_element("DefaultFont", DEFAULT_FONT_FAMILY))
        .child(font_element("CurrentFont", LABEL_FONT_FAMILY))
}

fn font_element(tag: &str, family: &str) -> XmlElement {
    XmlElement::new(tag)
        .attrs(FONT_ATTRIBUTES)
        .child(XmlElement::new("Name").text(family))
}
