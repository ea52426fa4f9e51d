//! Outer container envelope.
//!
//! An `.mtp` file is a small XML document:
//!
//! ```text
//! <?xml version="1.0" encoding="utf-8"?>
//! <Project DataCreation="26-01-29 13/55" DataLastModyfication="26-01-29 13/55" Version="12" IsComplex="true">
//!   <Content>UEsDBBQAAAAIA...</Content>
//! </Project>
//! ```
//!
//! `Content` holds the Base64 encoding of the archive built by
//! [`crate::archive`]. The `DataLastModyfication` spelling is what the
//! consuming application reads and must not be corrected.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use mtpgen_common::{Timestamp, DEFAULT_TIMESTAMP_FORMAT};
use mtpgen_xml::{WriteOptions, XmlElement};

use crate::{Error, Result};

/// Root element of the container.
pub const ROOT_ELEMENT: &str = "Project";

/// Element carrying the Base64 archive.
pub const CONTENT_ELEMENT: &str = "Content";

/// `Version` attribute of containers.
pub const CONTAINER_VERSION: &str = "12";

/// Encodes archives into containers and decodes them back.
#[derive(Debug, Clone)]
pub struct MtpContainerCodec {
    timestamp: Option<Timestamp>,
    timestamp_format: String,
    allow_empty: bool,
}

impl MtpContainerCodec {
    /// Strict codec: an empty `Content` element is malformed.
    pub fn new() -> Self {
        Self {
            timestamp: None,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            allow_empty: false,
        }
    }

    /// Codec that decodes an empty `Content` element to an empty archive.
    ///
    /// With this codec `decode(encode(b)) == b` holds for every byte sequence,
    /// the empty one included.
    pub fn permissive() -> Self {
        Self {
            allow_empty: true,
            ..Self::new()
        }
    }

    /// Stamp encoded containers with a fixed timestamp.
    pub fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// chrono format used when stamping with the current time.
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    /// Build the container element for `archive`.
    pub fn encode_element(&self, archive: &[u8]) -> XmlElement {
        let timestamp = self
            .timestamp
            .clone()
            .unwrap_or_else(|| Timestamp::now(&self.timestamp_format));

        XmlElement::new(ROOT_ELEMENT)
            .attr("DataCreation", timestamp.as_str())
            .attr("DataLastModyfication", timestamp.as_str())
            .attr("Version", CONTAINER_VERSION)
            .attr("IsComplex", "true")
            .child(XmlElement::new(CONTENT_ELEMENT).text(STANDARD.encode(archive)))
    }

    /// Wrap archive bytes into container XML bytes.
    pub fn encode(&self, archive: &[u8]) -> Result<Vec<u8>> {
        let bytes = self.encode_element(archive).to_bytes(&WriteOptions::compact())?;
        tracing::debug!(archive = archive.len(), container = bytes.len(), "encoded container");
        Ok(bytes)
    }

    /// Extract the archive bytes from container XML bytes.
    pub fn decode(&self, xml: &[u8]) -> Result<Vec<u8>> {
        let root = XmlElement::parse(xml)
            .map_err(|e| Error::malformed(format!("container is not valid XML: {}", e)))?;

        let mut contents = root.find_all(CONTENT_ELEMENT);
        let content = contents
            .next()
            .ok_or_else(|| Error::malformed("no <Content> element"))?;
        if contents.next().is_some() {
            return Err(Error::malformed("more than one <Content> element"));
        }

        let payload: String = content
            .content()
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        if payload.is_empty() && !self.allow_empty {
            return Err(Error::malformed("<Content> element is empty"));
        }

        STANDARD
            .decode(payload.as_bytes())
            .map_err(|e| Error::malformed(format!("<Content> is not valid Base64: {}", e)))
    }
}

impl Default for MtpContainerCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode with a strict codec stamped with the current time.
pub fn encode(archive: &[u8]) -> Result<Vec<u8>> {
    MtpContainerCodec::new().encode(archive)
}

/// Decode with a strict codec.
pub fn decode(xml: &[u8]) -> Result<Vec<u8>> {
    MtpContainerCodec::new().decode(xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fixed() -> MtpContainerCodec {
        MtpContainerCodec::new().with_timestamp(Timestamp::from_raw("26-01-29 13/55"))
    }

    #[test]
    fn test_encode_layout() {
        let xml = fixed().encode(b"ABC").unwrap();
        assert_eq!(
            String::from_utf8(xml).unwrap(),
            concat!(
                r#"<?xml version="1.0" encoding="utf-8"?>"#,
                r#"<Project DataCreation="26-01-29 13/55" DataLastModyfication="26-01-29 13/55" Version="12" IsComplex="true">"#,
                "<Content>QUJD</Content></Project>"
            )
        );
    }

    #[test]
    fn test_decode_trims_whitespace() {
        let xml = b"<?xml version=\"1.0\"?>\n<Project>\n  <Content>\n    QUJD\n  </Content>\n</Project>\n";
        assert_eq!(decode(xml).unwrap(), b"ABC");
    }

    #[test]
    fn test_decode_line_wrapped_payload() {
        let xml = b"<Project><Content>QU\nJD</Content></Project>";
        assert_eq!(decode(xml).unwrap(), b"ABC");
    }

    #[test]
    fn test_decode_not_xml() {
        let err = decode(b"\x00\x01 not xml <").unwrap_err();
        assert!(matches!(err, Error::MalformedContainer(_)));
    }

    #[test]
    fn test_decode_missing_content() {
        let err = decode(b"<Project Version=\"12\"/>").unwrap_err();
        assert!(matches!(err, Error::MalformedContainer(ref m) if m.contains("no <Content>")));
    }

    #[test]
    fn test_decode_empty_content() {
        let cases: [&[u8]; 2] = [
            b"<Project><Content/></Project>",
            b"<Project><Content>  \n </Content></Project>",
        ];
        for xml in cases {
            let err = decode(xml).unwrap_err();
            assert!(matches!(err, Error::MalformedContainer(ref m) if m.contains("empty")));
        }
    }

    #[test]
    fn test_decode_bad_base64() {
        let err = decode(b"<Project><Content>@@@@</Content></Project>").unwrap_err();
        assert!(matches!(err, Error::MalformedContainer(ref m) if m.contains("Base64")));
    }

    #[test]
    fn test_decode_duplicate_content() {
        let err = decode(b"<Project><Content>QQ==</Content><Content>QQ==</Content></Project>").unwrap_err();
        assert!(matches!(err, Error::MalformedContainer(_)));
    }

    #[test]
    fn test_permissive_empty_round_trip() {
        let codec = MtpContainerCodec::permissive().with_timestamp(Timestamp::from_raw("t"));
        let xml = codec.encode(&[]).unwrap();
        assert_eq!(codec.decode(&xml).unwrap(), Vec::<u8>::new());
        // The strict codec refuses the same document
        assert!(fixed().decode(&xml).is_err());
    }

    proptest! {
        #[test]
        fn prop_round_trip(bytes in proptest::collection::vec(any::<u8>(), 1..2048)) {
            let codec = fixed();
            let xml = codec.encode(&bytes).unwrap();
            prop_assert_eq!(codec.decode(&xml).unwrap(), bytes);
        }

        #[test]
        fn prop_permissive_round_trip(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
            let codec = MtpContainerCodec::permissive();
            let xml = codec.encode(&bytes).unwrap();
            prop_assert_eq!(codec.decode(&xml).unwrap(), bytes);
        }
    }
}
