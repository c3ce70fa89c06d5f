//! SPDX-FileCopyrightText: 2025 Nievemar
//!
//! SPDX-License-Identifier: MIT
//!
//! XML reading into an [`XmlElement`] tree

use super::document::XmlElement;
use crate::error::{Error, Result};
use crate::formats::encoding;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::fs;
use std::path::Path;

/// Read an XML file from disk, normalizing its encoding first.
///
/// # Errors
/// Returns an error if the file cannot be read, declares an unknown
/// encoding, or is not well-formed.
pub fn read_xml<P: AsRef<Path>>(path: P) -> Result<XmlElement> {
    let path = path.as_ref();
    let raw = fs::read(path).map_err(|source| Error::ReadSource {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Read {} bytes from {:?}", raw.len(), path);

    let normalized = encoding::normalize(&raw)?;
    let content = String::from_utf8(normalized.into_owned())?;
    parse_xml(&content)
}

/// Parse an XML string and return its root element.
///
/// Comments, processing instructions and the DOCTYPE are dropped. CDATA is
/// merged into the surrounding text. Whitespace is kept as written.
///
/// # Errors
/// Returns an error if the XML is malformed: bad syntax, mismatched or
/// unclosed tags, no root element, or content after the root.
pub fn parse_xml(content: &str) -> Result<XmlElement> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = Reader::from_str(content);
    reader.trim_text(false);

    let mut buf = Vec::new();
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                ensure_single_root(root.as_ref(), &stack)?;
                stack.push(element_from_start(&e)?);
            }
            Ok(Event::Empty(e)) => {
                ensure_single_root(root.as_ref(), &stack)?;
                let element = element_from_start(&e)?;
                close_element(element, &mut stack, &mut root);
            }
            Ok(Event::End(e)) => {
                let Some(element) = stack.pop() else {
                    return Err(Error::XmlStructure {
                        message: format!(
                            "unexpected closing tag </{}>",
                            String::from_utf8_lossy(e.name().as_ref())
                        ),
                    });
                };
                close_element(element, &mut stack, &mut root);
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape()?;
                push_text(&text, &mut stack)?;
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e);
                push_text(&text, &mut stack)?;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlError(e)),
            // Decl, Comment, PI, DocType
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(Error::XmlStructure {
            message: format!("unclosed element <{}>", open.name),
        });
    }
    root.ok_or_else(|| Error::XmlStructure {
        message: "no root element".to_string(),
    })
}

fn element_from_start(e: &BytesStart<'_>) -> Result<XmlElement> {
    let mut element = XmlElement::new(String::from_utf8_lossy(e.name().as_ref()));
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        element.attributes.insert(key, value);
    }
    Ok(element)
}

fn ensure_single_root(root: Option<&XmlElement>, stack: &[XmlElement]) -> Result<()> {
    if stack.is_empty()
        && let Some(existing) = root
    {
        return Err(Error::XmlStructure {
            message: format!("content after root element <{}>", existing.name),
        });
    }
    Ok(())
}

fn close_element(element: XmlElement, stack: &mut [XmlElement], root: &mut Option<XmlElement>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

/// Attach character data to the open element: as its text before any child,
/// otherwise as the tail of its last child.
fn push_text(text: &str, stack: &mut [XmlElement]) -> Result<()> {
    let Some(current) = stack.last_mut() else {
        if text.trim().is_empty() {
            return Ok(());
        }
        return Err(Error::XmlStructure {
            message: "text outside the root element".to_string(),
        });
    };

    match current.children.last_mut() {
        Some(last) => last.tail.push_str(text),
        None => current.text.push_str(text),
    }
    Ok(())
}
