//! Source and output formats
//!
//! - [`encoding`] - legacy 8-bit XML to UTF-8
//! - [`xml`] - element tree, reader, markup serializer
//! - [`text`] - scalar and rich-text field cleanup
//! - [`json`] - pretty JSON emission

pub mod encoding;
pub mod json;
pub mod text;
pub mod xml;

pub use json::{serialize_json, write_json};
pub use text::{clean, plain_text, text_with_markup};
pub use xml::{XmlElement, parse_xml, read_xml};
