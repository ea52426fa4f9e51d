//! Parse XML text into an element tree.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::{Error, Result, XmlElement};

impl XmlElement {
    /// Parse XML bytes into the root element.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let xml_str = std::str::from_utf8(xml).map_err(Error::Utf8)?;
        Self::parse_str(xml_str)
    }

    /// Parse XML text into the root element.
    ///
    /// Leading and trailing whitespace of text nodes is trimmed.
    pub fn parse_str(xml: &str) -> Result<Self> {
        parse_text(xml, true)
    }

    /// Parse XML bytes keeping text nodes exactly as written.
    ///
    /// Whitespace between child elements ends up in the parent's content.
    pub fn parse_preserving_whitespace(xml: &[u8]) -> Result<Self> {
        let xml_str = std::str::from_utf8(xml).map_err(Error::Utf8)?;
        parse_text(xml_str, false)
    }
}

fn parse_text(xml: &str, trim_text: bool) -> Result<XmlElement> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(trim_text);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                stack.push(element_from_start(&e)?);
            }
            Ok(Event::Empty(e)) => {
                let element = element_from_start(&e)?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::End(_)) => {
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element)?;
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(element) = stack.last_mut() {
                    let text = e.unescape().map_err(|e| Error::Xml(e.to_string()))?;
                    element.content.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(element) = stack.last_mut() {
                    let text = std::str::from_utf8(&e)?;
                    element.content.push_str(text);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {} // Declarations, comments, processing instructions
            Err(e) => return Err(Error::Xml(format!("XML parse error: {}", e))),
        }
    }

    if !stack.is_empty() {
        return Err(Error::Xml(format!(
            "unexpected end of document inside <{}>",
            stack.last().map(|e| e.tag.as_str()).unwrap_or_default()
        )));
    }

    root.ok_or(Error::NoRoot)
}

/// Build an element (tag and attributes) from a start or empty tag.
fn element_from_start(e: &BytesStart<'_>) -> Result<XmlElement> {
    let tag = std::str::from_utf8(e.name().as_ref())?.to_string();
    let mut element = XmlElement::new(tag);

    for attr in e.attributes() {
        let attr = attr.map_err(|e| Error::Xml(e.to_string()))?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| Error::Xml(e.to_string()))?
            .into_owned();
        element.attributes.set(key, value);
    }

    Ok(element)
}

/// Attach a finished element to its parent, or make it the root.
fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    } else if root.is_none() {
        *root = Some(element);
    } else {
        return Err(Error::Xml("multiple root elements".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WriteOptions;

    #[test]
    fn test_parse_simple() {
        let root = XmlElement::parse_str(r#"<Root version="1.0"/>"#).unwrap();
        assert_eq!(root.tag, "Root");
        assert_eq!(root.attribute("version"), Some("1.0"));
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_parse_with_declaration() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<Project DataCreation="26-01-29 13/55" Version="12">
    <Content>
        UEsDBBQ=
    </Content>
</Project>"#;

        let root = XmlElement::parse_str(xml).unwrap();
        assert_eq!(root.tag, "Project");
        assert_eq!(root.attribute("DataCreation"), Some("26-01-29 13/55"));
        assert_eq!(root.child_text("Content"), Some("UEsDBBQ="));
    }

    #[test]
    fn test_parse_nested() {
        let xml = r#"<A>
            <B attr="1">
                <C/>
                <D attr="2"/>
            </B>
            <E/>
        </A>"#;

        let root = XmlElement::parse_str(xml).unwrap();
        assert_eq!(root.children.len(), 2);
        let b = root.find("B").unwrap();
        assert_eq!(b.children.len(), 2);
        assert_eq!(b.children[1].attribute("attr"), Some("2"));
        assert_eq!(root.children[1].tag, "E");
    }

    #[test]
    fn test_unescape() {
        let root = XmlElement::parse_str(r#"<M Name="A&lt;B"><T>x &amp; y</T></M>"#).unwrap();
        assert_eq!(root.attribute("Name"), Some("A<B"));
        assert_eq!(root.child_text("T"), Some("x & y"));
    }

    #[test]
    fn test_round_trip() {
        let original = XmlElement::new("Config")
            .attr("version", "2.0")
            .child(XmlElement::new("Setting").attr("key", "option1"))
            .child(XmlElement::new("Color").text("0, 0, 0"));

        for options in [WriteOptions::compact(), WriteOptions::pretty(4)] {
            let bytes = original.to_bytes(&options).unwrap();
            let parsed = XmlElement::parse(&bytes).unwrap();
            assert_eq!(parsed, original);
        }
    }

    #[test]
    fn test_preserve_whitespace() {
        let xml = br#"<si><t xml:space="preserve">  K1 </t><t>   </t></si>"#;

        let kept = XmlElement::parse_preserving_whitespace(xml).unwrap();
        assert_eq!(kept.children[0].content(), "  K1 ");
        assert_eq!(kept.children[1].content(), "   ");

        let trimmed = XmlElement::parse(xml).unwrap();
        assert_eq!(trimmed.children[0].content(), "K1");
        assert_eq!(trimmed.children[1].content(), "");
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(XmlElement::parse_str(""), Err(Error::NoRoot)));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(XmlElement::parse_str("<Project><Content></Project>").is_err());
        assert!(XmlElement::parse(&[0xFF, 0xFE, 0x00]).is_err());
    }

    #[test]
    fn test_parse_unclosed() {
        assert!(XmlElement::parse_str("<Project><Content>abc").is_err());
    }
}
