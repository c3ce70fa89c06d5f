//! XML document model

mod document;
mod reader;
mod writer;

pub use document::XmlElement;
pub use reader::{parse_xml, read_xml};
pub use writer::serialize_element;
