//! SPDX-FileCopyrightText: 2025 Nievemar
//!
//! SPDX-License-Identifier: MIT
//!
//! Encoding normalization for XML sources
//!
//! The home and menu documents declare `ISO-8859-1` and really are 8-bit
//! Latin text. The parser only reads UTF-8, so those bytes are decoded with
//! the declared codec, re-encoded as UTF-8 and the declaration is rewritten
//! to match. Documents that already declare UTF-8 (or declare nothing) pass
//! through untouched.

use std::borrow::Cow;
use std::ops::Range;

use encoding_rs::{Encoding, UTF_8};
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::{Error, Result};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Labels naming true ISO-8859-1. `encoding_rs` folds these into
/// windows-1252, which maps 0x80-0x9F to punctuation instead of C1 controls.
const LATIN1_LABELS: &[&str] = &[
    "iso-8859-1",
    "iso8859-1",
    "iso88591",
    "iso_8859-1",
    "iso_8859-1:1987",
    "iso-ir-100",
    "latin1",
    "l1",
    "cp819",
    "ibm819",
    "csisolatin1",
];

/// Codec used to turn source bytes into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceCodec {
    /// ISO-8859-1: every byte maps to the code point of the same value.
    Latin1,
    /// Any other label `encoding_rs` knows.
    Encoding(&'static Encoding),
}

impl SourceCodec {
    pub fn name(self) -> &'static str {
        match self {
            SourceCodec::Latin1 => "ISO-8859-1",
            SourceCodec::Encoding(encoding) => encoding.name(),
        }
    }

    fn is_utf8(self) -> bool {
        self == SourceCodec::Encoding(UTF_8)
    }
}

/// The encoding label found in an XML declaration, with its byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredEncoding {
    /// The label exactly as written (e.g. `ISO-8859-1`).
    pub label: String,
    /// Byte range of the label inside the raw document.
    pub span: Range<usize>,
}

impl DeclaredEncoding {
    /// Resolve the label to a codec.
    pub fn codec(&self) -> Result<SourceCodec> {
        let label = self.label.trim();
        if LATIN1_LABELS.iter().any(|l| l.eq_ignore_ascii_case(label)) {
            return Ok(SourceCodec::Latin1);
        }
        Encoding::for_label(label.as_bytes())
            .map(SourceCodec::Encoding)
            .ok_or_else(|| Error::UnsupportedEncoding {
                label: self.label.clone(),
            })
    }
}

/// Find the `encoding="..."` label of the XML declaration, if there is one.
pub fn sniff_declaration(raw: &[u8]) -> Option<DeclaredEncoding> {
    let offset = if raw.starts_with(UTF8_BOM) { UTF8_BOM.len() } else { 0 };
    let body = &raw[offset..];

    let mut reader = Reader::from_reader(body);
    let mut buf = Vec::new();
    let Ok(Event::Decl(decl)) = reader.read_event_into(&mut buf) else {
        return None;
    };
    let label = decl.encoding()?.ok()?.into_owned();
    if label.is_empty() {
        return None;
    }

    // The label is the last quoted value of that name inside the declaration
    let decl_end = reader.buffer_position();
    let start = body[..decl_end]
        .windows(label.len())
        .rposition(|window| window == label.as_slice())?;

    Some(DeclaredEncoding {
        label: String::from_utf8_lossy(&label).into_owned(),
        span: offset + start..offset + start + label.len(),
    })
}

/// Normalize a raw XML document to UTF-8 with a matching declaration.
///
/// Reads the declared encoding from the document itself; see
/// [`normalize_with`] for the explicit form.
///
/// # Errors
/// Returns an error if the declaration names an unknown encoding.
pub fn normalize(raw: &[u8]) -> Result<Cow<'_, [u8]>> {
    match sniff_declaration(raw) {
        Some(declared) => {
            let codec = declared.codec()?;
            Ok(normalize_with(raw, codec, Some(&declared)))
        }
        // No declaration: XML says UTF-8
        None => Ok(Cow::Borrowed(raw)),
    }
}

/// Normalize `raw` knowing it is encoded with `codec`.
///
/// UTF-8 input is returned borrowed and unchanged. Anything else is decoded
/// with `codec`, the declaration label (when `declaration` is given) is
/// replaced by `UTF-8`, and the result is returned as UTF-8 bytes.
pub fn normalize_with<'a>(
    raw: &'a [u8],
    codec: SourceCodec,
    declaration: Option<&DeclaredEncoding>,
) -> Cow<'a, [u8]> {
    if codec.is_utf8() {
        return Cow::Borrowed(raw);
    }

    // Rewrite the label first; declarations are ASCII in every codec we accept
    let mut rewritten = Vec::with_capacity(raw.len() + 8);
    match declaration {
        Some(decl) => {
            rewritten.extend_from_slice(&raw[..decl.span.start]);
            rewritten.extend_from_slice(UTF_8.name().as_bytes());
            rewritten.extend_from_slice(&raw[decl.span.end..]);
        }
        None => rewritten.extend_from_slice(raw),
    }

    let text = match codec {
        SourceCodec::Latin1 => encoding_rs::mem::decode_latin1(&rewritten).into_owned(),
        SourceCodec::Encoding(encoding) => {
            let (text, had_errors) = encoding.decode_without_bom_handling(&rewritten);
            if had_errors {
                tracing::warn!(
                    "Bytes not valid in {} were replaced while re-encoding",
                    encoding.name()
                );
            }
            text.into_owned()
        }
    };
    tracing::debug!("Re-encoded {} bytes from {} to UTF-8", raw.len(), codec.name());

    Cow::Owned(text.into_bytes())
}
