//! Owned XML element tree.

use crate::Attributes;

/// An XML element with its attributes, text content and child elements.
///
/// Built with a chained builder API and serialized with
/// [`XmlElement::to_bytes`](crate::XmlElement::to_bytes).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Tag name of the element.
    pub tag: String,
    /// Text content (empty for container elements).
    pub content: String,
    /// Attributes in document order.
    pub attributes: Attributes,
    /// Child elements.
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Create a new element with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Set the text content of this element.
    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Set an attribute. A repeated key overrides the earlier value in place.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.set(key, value);
        self
    }

    /// Set attributes from a fixed table, in order.
    pub fn attrs<'a>(mut self, table: impl IntoIterator<Item = &'a (&'a str, &'a str)>) -> Self {
        for (key, value) in table {
            self.attributes.set(*key, *value);
        }
        self
    }

    /// Add a child element.
    pub fn child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    /// Add multiple children.
    pub fn children(mut self, children: impl IntoIterator<Item = XmlElement>) -> Self {
        self.children.extend(children);
        self
    }

    /// Text content of this element.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Value of an attribute.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key)
    }

    /// First direct child with the given tag.
    pub fn find(&self, tag: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// All direct children with the given tag, in order.
    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// Text of the first direct child with the given tag.
    pub fn child_text(&self, tag: &str) -> Option<&str> {
        self.find(tag).map(|c| c.content.as_str())
    }
}
