//! XML element serialization
//!
//! Used to carry inline markup (`<b>`, `<a href>`, `<br/>`) through
//! rich-text fields verbatim. Output follows the conventions of the tool
//! that produced the site's earlier JSON: attributes in source order,
//! childless empty elements written as `<tag />`, and the element's tail
//! text appended after its end tag.

use super::document::XmlElement;
use crate::error::Result;
use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

/// Serialize an element, its descendants and its tail text.
///
/// # Errors
/// Returns an error if XML serialization fails.
pub fn serialize_element(element: &XmlElement) -> Result<String> {
    let mut output = Vec::new();
    let mut writer = Writer::new(&mut output);
    write_element(&mut writer, element)?;

    let xml = String::from_utf8(output)?;
    // Fix spacing before self-closing tags; text and attributes escape `>`
    Ok(xml.replace("/>", " />"))
}

fn write_element<W: std::io::Write>(writer: &mut Writer<W>, element: &XmlElement) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.is_empty() {
        writer.write_event(Event::Empty(start))?;
    } else {
        writer.write_event(Event::Start(start))?;
        write_text(writer, &element.text)?;
        for child in &element.children {
            write_element(writer, child)?;
        }
        writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    }

    write_text(writer, &element.tail)
}

fn write_text<W: std::io::Write>(writer: &mut Writer<W>, text: &str) -> Result<()> {
    if !text.is_empty() {
        writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
    }
    Ok(())
}
