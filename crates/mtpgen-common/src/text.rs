//! Base64 encoding of text fields.
//!
//! Every user-visible string in a project document is stored as the standard
//! Base64 encoding of its UTF-8 bytes. A few fields are encoded more than once,
//! so the depth is an explicit parameter rather than repeated calls.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::Result;

/// Depth used for ordinary text fields.
pub const SINGLE: u8 = 1;

/// Encode a text field once.
///
/// Empty input maps to an empty string.
pub fn encode(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    STANDARD.encode(text.as_bytes())
}

/// Encode an optional text field once. `None` maps to an empty string.
pub fn encode_opt(text: Option<&str>) -> String {
    text.map(encode).unwrap_or_default()
}

/// Apply [`encode`] `depth` times. Depth 0 returns the input unchanged.
pub fn encode_depth(text: &str, depth: u8) -> String {
    let mut value = text.to_string();
    for _ in 0..depth {
        value = encode(&value);
    }
    value
}

/// Decode a text field once.
pub fn decode(encoded: &str) -> Result<String> {
    if encoded.is_empty() {
        return Ok(String::new());
    }
    let bytes = STANDARD.decode(encoded.as_bytes())?;
    Ok(String::from_utf8(bytes)?)
}

/// Apply [`decode`] `depth` times. Depth 0 returns the input unchanged.
pub fn decode_depth(encoded: &str, depth: u8) -> Result<String> {
    let mut value = encoded.to_string();
    for _ in 0..depth {
        value = decode(&value)?;
    }
    Ok(value)
}
