//! Navigation + home page conversion
//!
//! `menu.xml` holds the four navigation captions per language; `inicio.xml`
//! holds the home page blocks. Both are merged by language into
//! `inicio.json`:
//!
//! ```text
//! { "espanol": { "nav": {...}, "cuadroder": "...", "terminos": "...",
//!                "form": {...}, "compra": "..." }, ... }
//! ```

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::{ConvertPhase, ConvertProgress, ConvertProgressCallback, Stage, StageReport};
use crate::config::{ConvertConfig, outputs};
use crate::error::Result;
use crate::formats::{XmlElement, clean, read_xml, text_with_markup, write_json};

const DEFAULT_FORM_NOMBRE: &str = "Nombre";
const DEFAULT_FORM_EMAIL: &str = "Email";
const DEFAULT_FORM_MENSAJE: &str = "Mensaje";

/// Navigation link captions for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub home: String,
    pub nosotros: String,
    pub servicios: String,
    pub contacto: String,
}

/// Contact form captions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactForm {
    pub nombre: String,
    pub email: String,
    pub mensaje: String,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self {
            nombre: DEFAULT_FORM_NOMBRE.to_string(),
            email: DEFAULT_FORM_EMAIL.to_string(),
            mensaje: DEFAULT_FORM_MENSAJE.to_string(),
        }
    }
}

/// Everything the home page needs for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeBundle {
    /// `None` when the menu has no block for this language; written as `{}`.
    #[serde(serialize_with = "nav_or_empty")]
    pub nav: Option<NavEntry>,
    /// Right-hand box, rich text.
    pub cuadroder: String,
    /// Privacy terms, rich text.
    pub terminos: String,
    pub form: ContactForm,
    /// "Buy" call-to-action caption.
    pub compra: String,
}

/// Contents of `inicio.json`, keyed by language.
pub type InicioDocument = IndexMap<String, HomeBundle>;

#[allow(clippy::ref_option)]
fn nav_or_empty<S: Serializer>(nav: &Option<NavEntry>, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    match nav {
        Some(entry) => entry.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}

/// Convert `inicio.xml` + `menu.xml` into `inicio.json`.
///
/// # Errors
/// Returns an error if either document cannot be read or parsed, or the
/// output cannot be written.
pub fn convert_inicio(config: &ConvertConfig) -> Result<StageReport> {
    convert_inicio_with_progress(config, &|_| {})
}

/// Convert `inicio.xml` + `menu.xml` into `inicio.json` with progress callback.
///
/// # Errors
/// Returns an error if either document cannot be read or parsed, or the
/// output cannot be written.
pub fn convert_inicio_with_progress(
    config: &ConvertConfig,
    progress: ConvertProgressCallback,
) -> Result<StageReport> {
    let home_path = config.home_path();
    let menu_path = config.menu_path();
    let output = config.output_path(outputs::INICIO);
    tracing::info!("Converting {:?} + {:?} → {:?}", home_path, menu_path, output);

    progress(&ConvertProgress::with_message(
        ConvertPhase::ReadingSource,
        1,
        3,
        "Reading home and menu XML...",
    ));
    let home_root = read_xml(&home_path)?;
    let menu_root = read_xml(&menu_path)?;

    progress(&ConvertProgress::with_message(
        ConvertPhase::Converting,
        2,
        3,
        "Merging navigation into home blocks...",
    ));
    let document = from_xml(&home_root, &menu_root, config)?;

    progress(&ConvertProgress::with_message(
        ConvertPhase::WritingOutput,
        3,
        3,
        format!("Writing {} languages...", document.len()),
    ));
    write_json(&document, &output)?;

    progress(&ConvertProgress::new(ConvertPhase::Complete, 3, 3));
    tracing::info!("inicio: {} languages written", document.len());
    Ok(StageReport {
        stage: Stage::Inicio,
        output,
        entries: document.len(),
    })
}

/// Build the home page bundles from parsed home and menu documents.
///
/// # Errors
/// Returns an error if a rich-text field's markup cannot be serialized.
pub fn from_xml(
    home_root: &XmlElement,
    menu_root: &XmlElement,
    config: &ConvertConfig,
) -> Result<InicioDocument> {
    let menu = menu_by_language(menu_root);
    let mut result = InicioDocument::new();

    for idioma in home_root.find_all("idioma") {
        let Some(lang) = idioma.attr("name") else {
            tracing::warn!("Skipping home block without a language name");
            continue;
        };
        if !config.is_supported_language(lang) {
            tracing::debug!("Skipping home block for unsupported language '{}'", lang);
            continue;
        }

        let nav = menu.get(lang).cloned();
        if nav.is_none() {
            tracing::warn!("No menu entry for '{}', writing empty navigation", lang);
        }

        result.insert(
            lang.to_string(),
            HomeBundle {
                nav,
                cuadroder: rich_text(idioma.find("cuadroder"))?,
                terminos: rich_text(idioma.find("terminos"))?,
                form: contact_form(idioma.find("form")),
                compra: clean(idioma.find_text("compra")),
            },
        );
    }

    Ok(result)
}

fn rich_text(element: Option<&XmlElement>) -> Result<String> {
    Ok(element.map(text_with_markup).transpose()?.unwrap_or_default())
}

/// Index the menu document's navigation captions by language name.
pub fn menu_by_language(menu_root: &XmlElement) -> IndexMap<String, NavEntry> {
    menu_root
        .find_all("idioma")
        .filter_map(|idioma| {
            let name = idioma.attr("name")?;
            let entry = NavEntry {
                home: clean(idioma.find_text("home")),
                nosotros: clean(idioma.find_text("nosotros")),
                servicios: clean(idioma.find_text("servicios")),
                contacto: clean(idioma.find_text("contacto")),
            };
            Some((name.to_string(), entry))
        })
        .collect()
}

/// Contact form captions, each falling back to its default when absent.
fn contact_form(form: Option<&XmlElement>) -> ContactForm {
    let Some(form) = form else {
        return ContactForm::default();
    };
    let caption = |tag: &str, default: &str| match form.find_text(tag) {
        Some(text) => clean(Some(text)),
        None => default.to_string(),
    };

    ContactForm {
        nombre: caption("nombre", DEFAULT_FORM_NOMBRE),
        email: caption("email", DEFAULT_FORM_EMAIL),
        mensaje: caption("mensaje", DEFAULT_FORM_MENSAJE),
    }
}
