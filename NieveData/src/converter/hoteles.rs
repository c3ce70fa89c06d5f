//! Hotel listings conversion
//!
//! `hotelesUTF8.xml` lists `<ciudad>` blocks, each with an optional map
//! embed and its `<hotel>` records. Output shape:
//!
//! ```text
//! { "ciudades": [ { "name": "...", "mapa": "..." | null,
//!                   "hoteles": [ { "nombre", "imagen", "estrellas", "web" } ] } ] }
//! ```

use serde::Serialize;

use super::{ConvertPhase, ConvertProgress, ConvertProgressCallback, Stage, StageReport};
use crate::config::{ConvertConfig, outputs};
use crate::error::Result;
use crate::formats::{XmlElement, clean, read_xml, write_json};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hotel {
    pub nombre: String,
    /// Image file reference.
    pub imagen: String,
    /// Star rating; 0 when the source is not a plain non-negative integer.
    pub estrellas: u64,
    pub web: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct City {
    pub name: Option<String>,
    /// Map embed URL, `null` when none could be resolved.
    pub mapa: Option<String>,
    pub hoteles: Vec<Hotel>,
}

/// Contents of `hoteles.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HotelesDocument {
    pub ciudades: Vec<City>,
}

impl HotelesDocument {
    pub fn hotel_count(&self) -> usize {
        self.ciudades.iter().map(|city| city.hoteles.len()).sum()
    }
}

/// Convert `hotelesUTF8.xml` into `hoteles.json`.
///
/// # Errors
/// Returns an error if the document cannot be read or parsed, or the output
/// cannot be written.
pub fn convert_hoteles(config: &ConvertConfig) -> Result<StageReport> {
    convert_hoteles_with_progress(config, &|_| {})
}

/// Convert `hotelesUTF8.xml` into `hoteles.json` with progress callback.
///
/// # Errors
/// Returns an error if the document cannot be read or parsed, or the output
/// cannot be written.
pub fn convert_hoteles_with_progress(
    config: &ConvertConfig,
    progress: ConvertProgressCallback,
) -> Result<StageReport> {
    let hotels_path = config.hotels_path();
    let output = config.output_path(outputs::HOTELES);
    tracing::info!("Converting {:?} → {:?}", hotels_path, output);

    progress(&ConvertProgress::with_message(
        ConvertPhase::ReadingSource,
        1,
        3,
        "Reading hotels XML...",
    ));
    let root = read_xml(&hotels_path)?;

    progress(&ConvertProgress::with_message(
        ConvertPhase::Converting,
        2,
        3,
        "Resolving maps and ratings...",
    ));
    let document = from_xml(&root, config);

    progress(&ConvertProgress::with_message(
        ConvertPhase::WritingOutput,
        3,
        3,
        format!(
            "Writing {} cities, {} hotels...",
            document.ciudades.len(),
            document.hotel_count()
        ),
    ));
    write_json(&document, &output)?;

    progress(&ConvertProgress::new(ConvertPhase::Complete, 3, 3));
    tracing::info!(
        "hoteles: {} cities, {} hotels written",
        document.ciudades.len(),
        document.hotel_count()
    );
    Ok(StageReport {
        stage: Stage::Hoteles,
        output,
        entries: document.ciudades.len(),
    })
}

/// Build the city list from a parsed hotels document.
pub fn from_xml(root: &XmlElement, config: &ConvertConfig) -> HotelesDocument {
    let ciudades = root
        .find_all("ciudad")
        .map(|ciudad| {
            let name = ciudad.attr("name");
            City {
                name: name.map(ToString::to_string),
                mapa: resolve_map(name, ciudad.find("mapa"), config),
                hoteles: ciudad.find_all("hotel").map(hotel).collect(),
            }
        })
        .collect();

    HotelesDocument { ciudades }
}

/// Pick the map embed for a city.
///
/// A usable URL is kept as-is. A URL on the defunct map host, or no URL at
/// all, is replaced from the configured table; a city missing from the
/// table gets `None`.
pub fn resolve_map(city: Option<&str>, mapa: Option<&XmlElement>, config: &ConvertConfig) -> Option<String> {
    let lookup = || {
        let url = city.and_then(|name| config.map_override(name)).map(ToString::to_string);
        if url.is_none() {
            tracing::warn!("No map available for city {:?}", city);
        }
        url
    };

    match mapa.filter(|el| !el.text.is_empty()) {
        Some(el) => {
            let url = el.text.trim();
            if url.contains(config.defunct_map_host.as_str()) {
                tracing::debug!("Replacing defunct map URL for city {:?}", city);
                lookup()
            } else {
                Some(url.to_string())
            }
        }
        None => lookup(),
    }
}

/// Parse a star rating: a plain non-negative integer, otherwise 0.
pub fn parse_rating(text: &str) -> u64 {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        if !text.is_empty() {
            tracing::warn!("Rating {:?} is not a number, using 0", text);
        }
        return 0;
    }
    text.parse().unwrap_or_else(|_| {
        tracing::warn!("Rating {:?} is out of range, using 0", text);
        0
    })
}

fn hotel(el: &XmlElement) -> Hotel {
    Hotel {
        nombre: clean(el.find_text("nombre")),
        imagen: clean(el.find_text("imagen")),
        estrellas: parse_rating(&clean(el.find_text("estrellas"))),
        web: clean(el.find_text("web")),
    }
}
