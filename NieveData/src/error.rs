//! Error types for `NieveData`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `NieveData` operations.
///
/// Only structural failures live here. Field-level anomalies (a missing
/// caption, a malformed rating, an unresolvable map) are recovered where
/// they are read and never surface as an `Error`.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A source document could not be read.
    #[error("failed to read {path}: {source}")]
    ReadSource {
        /// The path that failed to open.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    // ==================== Encoding Errors ====================
    /// The XML declaration names an encoding we have no codec for.
    #[error("unsupported declared encoding: {label}")]
    UnsupportedEncoding {
        /// The label as written in the declaration.
        label: String,
    },

    /// UTF-8 conversion error.
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    // ==================== Parsing Errors ====================
    /// XML parse error.
    #[error("XML parse error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// XML attribute error.
    #[error("XML attribute error: {0}")]
    XmlAttrError(String),

    /// The document parsed but its element structure is unusable.
    #[error("malformed XML: {message}")]
    XmlStructure {
        /// Description of what is wrong.
        message: String,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Config file could not be parsed.
    #[error("config error: {0}")]
    ConfigError(#[from] toml::de::Error),

    // ==================== Pipeline Errors ====================
    /// A conversion stage failed; wraps the cause with the stage name.
    #[error("stage '{stage}' failed: {source}")]
    Stage {
        /// The stage that failed (`inicio`, `content` or `hoteles`).
        stage: &'static str,
        /// The underlying error.
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap this error with the name of the pipeline stage it came from.
    #[must_use]
    pub fn in_stage(self, stage: &'static str) -> Self {
        Error::Stage {
            stage,
            source: Box::new(self),
        }
    }
}

// Add conversion from quick_xml::events::attributes::AttrError
impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlAttrError(err.to_string())
    }
}

/// A specialized Result type for `NieveData` operations.
pub type Result<T> = std::result::Result<T, Error>;
