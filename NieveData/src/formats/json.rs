//! JSON emission
//!
//! Output is meant to be diffed by hand: two-space indentation, keys in
//! insertion order (`serde_json` is built with `preserve_order`), and
//! non-ASCII characters written literally rather than as `\u` escapes.

use crate::error::Result;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Write a value as pretty JSON to disk, creating the parent directory if
/// it does not exist yet.
///
/// # Errors
/// Returns an error if serialization or file writing fails.
pub fn write_json<T: Serialize + ?Sized, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let path = path.as_ref();
    let json = serialize_json(value)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;
    tracing::debug!("Wrote {:?}", path);
    Ok(())
}

/// Serialize a value to a pretty JSON string (2-space indent, no trailing
/// newline).
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub fn serialize_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
