//! # NieveData
//!
//! Converts the legacy XML documents of the Nievemar tourism site into the
//! JSON files its static front end loads.
//!
//! ## Inputs and outputs
//!
//! - **`inicio.xml` + `menu.xml`** (ISO-8859-1) → `inicio.json` - navigation,
//!   home page boxes, contact form captions
//! - **`pageUTF8.xml`** → `content.json` - content sections per language
//! - **`hotelesUTF8.xml`** → `hoteles.json` - hotels grouped by city
//!
//! ## Quick Start
//!
//! ```no_run
//! use nievedata::prelude::*;
//!
//! let config = ConvertConfig::new("legacy/www", "site/data");
//! for report in run_all(&config)? {
//!     println!("{} written", report.output.display());
//! }
//! # Ok::<(), nievedata::Error>(())
//! ```
//!
//! ### Converting a Single Document
//!
//! ```
//! use nievedata::converter::hoteles;
//! use nievedata::formats::parse_xml;
//! use nievedata::ConvertConfig;
//!
//! let root = parse_xml(r#"<hoteles><ciudad name="Trelew">
//!     <hotel><nombre>Centenario</nombre><estrellas>3</estrellas></hotel>
//! </ciudad></hoteles>"#)?;
//! let doc = hoteles::from_xml(&root, &ConvertConfig::default());
//! assert_eq!(doc.ciudades[0].hoteles[0].estrellas, 3);
//! # Ok::<(), nievedata::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `nievedata` command-line binary

pub mod config;
pub mod converter;
pub mod error;
pub mod formats;

// Re-exports for convenience
pub use config::ConvertConfig;
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::config::ConvertConfig;
    pub use crate::converter::{
        ContentDocument, ConvertPhase, ConvertProgress, HotelesDocument, InicioDocument, Stage,
        StageReport, run_all, run_stages,
    };
    pub use crate::error::{Error, Result};
    pub use crate::formats::{XmlElement, clean, parse_xml, read_xml, text_with_markup};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
