//! Field text cleanup
//!
//! Scalar fields in the legacy XML are padded with layout whitespace and
//! some captions were stored URL-escaped (`Informaci%C3%B3n`). Rich-text
//! fields carry inline HTML as child elements.

use percent_encoding::percent_decode_str;

use crate::error::Result;
use crate::formats::xml::{XmlElement, serialize_element};

/// Trim a scalar field and decode `%XX` escapes.
///
/// Absent input gives an empty string. Decoded byte sequences that are not
/// valid UTF-8 become U+FFFD; the rest of the field still decodes.
pub fn clean(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    let trimmed = raw.trim();

    let decoded = percent_decode_str(trimmed).decode_utf8_lossy();
    if decoded.contains(char::REPLACEMENT_CHARACTER) && !trimmed.contains(char::REPLACEMENT_CHARACTER) {
        tracing::warn!("Invalid UTF-8 escapes replaced in {:?}", trimmed);
    }
    decoded.into_owned()
}

/// Text of an element with its child markup kept verbatim, trimmed.
///
/// Concatenates the element's leading text with the serialized form of each
/// child (tags, attributes and the text following each child). No escaping
/// is applied to the leading text.
///
/// # Errors
/// Returns an error if a child cannot be serialized.
pub fn text_with_markup(element: &XmlElement) -> Result<String> {
    let mut out = element.text.clone();
    for child in &element.children {
        out.push_str(&serialize_element(child)?);
    }
    Ok(out.trim().to_string())
}

/// Leading text of an element, trimmed. Child elements are ignored.
pub fn plain_text(element: &XmlElement) -> String {
    element.text.trim().to_string()
}
