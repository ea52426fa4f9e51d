//! Read a serialized project document back into the model.

use mtpgen_common::{text, Timestamp};
use mtpgen_xml::XmlElement;

use crate::config::MaterialProfile;
use crate::model::{Label, LogicNode, Material, ProjectDocument};
use crate::{Error, Result};

impl ProjectDocument {
    /// Parse `Data.xml` bytes.
    ///
    /// `root_name_depth` is the encoding depth the root node name was written
    /// with; label texts are always decoded once. Labels are ordered by their
    /// `Index` attribute.
    pub fn parse(xml: &[u8], root_name_depth: u8) -> Result<Self> {
        let root = XmlElement::parse(xml)?;
        Self::from_element(&root, root_name_depth)
    }

    /// Read the model from an already parsed tree.
    pub fn from_element(root: &XmlElement, root_name_depth: u8) -> Result<Self> {
        if root.tag != "Project" {
            return Err(Error::MissingElement("Project".to_string()));
        }

        let logic = root
            .find("LogicNode")
            .ok_or_else(|| Error::MissingElement("LogicNode".to_string()))?;

        let materials = root
            .find_all("Material")
            .map(read_material)
            .collect::<Result<Vec<_>>>()?;

        Ok(ProjectDocument {
            created: Timestamp::from_raw(root.attribute("DataCreation").unwrap_or_default()),
            modified: Timestamp::from_raw(root.attribute("DataLastModyfication").unwrap_or_default()),
            copy_count: parse_attr(root, "OrderNumberOfCopy")?,
            logic_node: read_logic_node(logic, root_name_depth)?,
            materials,
        })
    }
}

fn read_logic_node(node: &XmlElement, depth: u8) -> Result<LogicNode> {
    let encoded = child_text(node, "Name")?;
    Ok(LogicNode {
        ref_id: parse_attr(node, "RefId")?,
        parent_ref_id: parse_child(node, "ParentRefId")?,
        level: parse_child(node, "Level")?,
        name: text::decode_depth(encoded, depth)?,
        name_encoding_depth: depth,
    })
}

fn read_material(material: &XmlElement) -> Result<Material> {
    let attr = |key: &str| material.attribute(key).unwrap_or_default().to_string();
    let profile = MaterialProfile {
        name: attr("Name"),
        device: attr("Device"),
        height: attr("Height"),
        width: attr("Width"),
        color: attr("OrderMaterialColor"),
        angle: attr("TransformedByAngle"),
    };

    let mut labels = material
        .find_all("Label")
        .map(|label| -> Result<Label> {
            let range = label
                .find("TextRange")
                .ok_or_else(|| Error::MissingElement("TextRange".to_string()))?;
            Ok(Label {
                index: parse_attr(label, "Index")?,
                text: text::decode(child_text(range, "Text")?)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    labels.sort_by_key(|l| l.index);

    Ok(Material { profile, labels })
}

fn child_text<'a>(element: &'a XmlElement, tag: &str) -> Result<&'a str> {
    element
        .child_text(tag)
        .ok_or_else(|| Error::MissingElement(tag.to_string()))
}

fn parse_attr<T: std::str::FromStr>(element: &XmlElement, key: &str) -> Result<T> {
    let value = element.attribute(key);
    value
        .and_then(|v| v.trim().parse().ok())
        .ok_or_else(|| Error::InvalidAttribute {
            element: element.tag.clone(),
            attribute: key.to_string(),
            value: value.map(str::to_string),
        })
}

fn parse_child<T: std::str::FromStr>(element: &XmlElement, tag: &str) -> Result<T> {
    let value = child_text(element, tag)?;
    value.trim().parse().map_err(|_| Error::InvalidAttribute {
        element: element.tag.clone(),
        attribute: tag.to_string(),
        value: Some(value.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DataDocumentBuilder, GeneratorConfig};

    #[test]
    fn test_round_trip() {
        let config = GeneratorConfig::default();
        let labels = ["A", "B", "", "Ω", "E", "F", "G", "H"];
        let original = DataDocumentBuilder::new(&config)
            .timestamp(Timestamp::from_raw("26-01-29 13/55"))
            .build_document(&labels)
            .unwrap();

        let bytes = original.to_bytes().unwrap();
        let parsed = ProjectDocument::parse(&bytes, config.root_name_encoding_depth).unwrap();

        assert_eq!(parsed, original);
        assert_eq!(parsed.logic_node.name, "Root");
        assert_eq!(parsed.slot_count(), 14);
    }

    #[test]
    fn test_root_name_decoded_at_given_depth() {
        let config = GeneratorConfig::default();
        let bytes = DataDocumentBuilder::new(&config).build(&["A"]).unwrap();
        let parsed = ProjectDocument::parse(&bytes, 1).unwrap();
        assert_eq!(parsed.logic_node.name, "Um9vdA==");
    }

    #[test]
    fn test_labels_sorted_by_index() {
        let xml = r#"<Project OrderNumberOfCopy="1">
            <LogicNode RefId="1"><ParentRefId>-1</ParentRefId><Name>Um9vdA==</Name><Level>-1</Level></LogicNode>
            <Material Name="M">
                <Label Index="1"><TextRange><Text>Qg==</Text></TextRange></Label>
                <Label Index="0"><TextRange><Text>QQ==</Text></TextRange></Label>
            </Material>
        </Project>"#;

        let doc = ProjectDocument::parse(xml.as_bytes(), 1).unwrap();
        let texts: Vec<_> = doc.label_texts().collect();
        assert_eq!(texts, ["A", "B"]);
        assert_eq!(doc.materials[0].profile.name, "M");
    }

    #[test]
    fn test_missing_logic_node() {
        let xml = r#"<Project OrderNumberOfCopy="1"><Resources/></Project>"#;
        let err = ProjectDocument::parse(xml.as_bytes(), 2).unwrap_err();
        assert!(matches!(err, Error::MissingElement(ref tag) if tag == "LogicNode"));
    }

    #[test]
    fn test_bad_index_attribute() {
        let xml = r#"<Project OrderNumberOfCopy="1">
            <LogicNode RefId="1"><ParentRefId>-1</ParentRefId><Name>Um9vdA==</Name><Level>-1</Level></LogicNode>
            <Material><Label Index="x"><TextRange><Text/></TextRange></Label></Material>
        </Project>"#;
        let err = ProjectDocument::parse(xml.as_bytes(), 1).unwrap_err();
        assert!(matches!(err, Error::InvalidAttribute { .. }));
    }

    #[test]
    fn test_wrong_root() {
        let err = ProjectDocument::parse(b"<Container/>", 2).unwrap_err();
        assert!(matches!(err, Error::MissingElement(_)));
    }
}
