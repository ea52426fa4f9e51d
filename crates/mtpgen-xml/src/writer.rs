//! XML serialization.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::{Error, Result, XmlElement};

/// Output settings for [`XmlElement::to_bytes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Spaces per nesting level, `None` for a single-line document.
    pub indent: Option<usize>,
    /// Emit `<?xml version="1.0" encoding="utf-8"?>` first.
    pub declaration: bool,
}

impl WriteOptions {
    /// Declaration, no indentation.
    pub fn compact() -> Self {
        Self {
            indent: None,
            declaration: true,
        }
    }

    /// Declaration, `indent` spaces per level.
    pub fn pretty(indent: usize) -> Self {
        Self {
            indent: Some(indent),
            declaration: true,
        }
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self::pretty(4)
    }
}

impl XmlElement {
    /// Serialize this element as a UTF-8 document.
    pub fn to_bytes(&self, options: &WriteOptions) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.write_to(&mut output, options)?;
        Ok(output)
    }

    /// Serialize this element as a document string.
    pub fn to_xml_string(&self, options: &WriteOptions) -> Result<String> {
        let bytes = self.to_bytes(options)?;
        String::from_utf8(bytes).map_err(|e| Error::Xml(e.to_string()))
    }

    /// Write this element as a document to a writer.
    pub fn write_to<W: Write>(&self, writer: W, options: &WriteOptions) -> Result<()> {
        let mut xml_writer = match options.indent {
            Some(width) => Writer::new_with_indent(writer, b' ', width),
            None => Writer::new(writer),
        };

        if options.declaration {
            xml_writer
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
                .map_err(|e| Error::Xml(e.to_string()))?;
        }

        write_element(&mut xml_writer, self)
    }
}

/// Write a single element and its children.
fn write_element<W: Write>(writer: &mut Writer<W>, element: &XmlElement) -> Result<()> {
    let mut start = BytesStart::new(element.tag.as_str());
    for (key, value) in element.attributes.iter() {
        start.push_attribute((key, value));
    }

    if element.children.is_empty() && element.content.is_empty() {
        writer
            .write_event(Event::Empty(start))
            .map_err(|e| Error::Xml(e.to_string()))?;
        return Ok(());
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|e| Error::Xml(e.to_string()))?;

    if !element.content.is_empty() {
        writer
            .write_event(Event::Text(BytesText::new(&element.content)))
            .map_err(|e| Error::Xml(e.to_string()))?;
    }

    for child in &element.children {
        write_element(writer, child)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(element.tag.as_str())))
        .map_err(|e| Error::Xml(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_output() {
        let root = XmlElement::new("Project")
            .attr("Version", "12")
            .attr("IsComplex", "true")
            .child(XmlElement::new("Content").text("QUJD"));

        let xml = root.to_xml_string(&WriteOptions::compact()).unwrap();
        assert_eq!(
            xml,
            r#"<?xml version="1.0" encoding="utf-8"?><Project Version="12" IsComplex="true"><Content>QUJD</Content></Project>"#
        );
    }

    #[test]
    fn test_pretty_output_keeps_text_inline() {
        let root = XmlElement::new("LogicNode")
            .attr("RefId", "1")
            .child(XmlElement::new("ParentRefId").text("-1"))
            .child(XmlElement::new("CutOrPerforations"));

        let xml = root.to_xml_string(&WriteOptions::pretty(4)).unwrap();
        let lines: Vec<&str> = xml.lines().collect();
        assert_eq!(lines[0], r#"<?xml version="1.0" encoding="utf-8"?>"#);
        assert_eq!(lines[1], r#"<LogicNode RefId="1">"#);
        assert_eq!(lines[2], "    <ParentRefId>-1</ParentRefId>");
        assert_eq!(lines[3], "    <CutOrPerforations/>");
        assert_eq!(lines[4], "</LogicNode>");
    }

    #[test]
    fn test_escaping() {
        let root = XmlElement::new("Material").attr("Name", "A<B & \"C\"");
        let xml = root.to_xml_string(&WriteOptions::compact()).unwrap();
        assert!(xml.contains("A&lt;B &amp; &quot;C&quot;"));
    }

    #[test]
    fn test_without_declaration() {
        let options = WriteOptions {
            indent: None,
            declaration: false,
        };
        let xml = XmlElement::new("Resources").to_xml_string(&options).unwrap();
        assert_eq!(xml, "<Resources/>");
    }
}
