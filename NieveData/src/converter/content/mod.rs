//! Content sections conversion
//!
//! `pageUTF8.xml` groups content per language into `<item>`s. Each item
//! carries an optional `<titulares>` sub-navigation and one or more
//! `<texto data="...">` fragments; every fragment becomes one entry of the
//! language's `sections` map in `content.json`.
//!
//! The `srv` item is special: its `srv` fragment is the services overview,
//! with an intro and the list of `<paquete>` packages.

use indexmap::IndexMap;
use serde::Serialize;

use super::{ConvertPhase, ConvertProgress, ConvertProgressCallback, Stage, StageReport};
use crate::config::{ConvertConfig, outputs};
use crate::error::Result;
use crate::formats::{XmlElement, clean, plain_text, read_xml, write_json};

/// Item and fragment id of the services overview.
pub const SERVICES_ID: &str = "srv";

/// Fragment id of the excursions timetable.
pub const EXCURSIONS_ID: &str = "srv_excursiones";

/// Excursions timetable.
///
/// The source XML has no usable content for this section (the old site
/// rendered the table from a PHP template), so whatever the fragment holds
/// is always replaced with this markup.
pub const EXCURSIONS_TIMETABLE_HTML: &str = include_str!("excursiones.html");

/// One sub-navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Headline {
    pub label: String,
    /// Section id the entry links to.
    pub data: String,
    /// Icon CSS class.
    pub icon: String,
}

/// A tour package listed in the services overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    pub id: String,
    pub titulo: String,
    pub html: String,
}

/// The services overview section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServicesSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titulares: Option<Vec<Headline>>,
    pub intro: String,
    pub paquetes: Vec<Package>,
}

/// A plain HTML section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSection {
    pub html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titulares: Option<Vec<Headline>>,
}

/// One entry of a language's `sections` map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Section {
    Services(ServicesSection),
    Page(PageSection),
}

impl Section {
    /// HTML body of a page section; `None` for the services overview.
    pub fn html(&self) -> Option<&str> {
        match self {
            Section::Page(page) => Some(&page.html),
            Section::Services(_) => None,
        }
    }
}

/// All sections of one language, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LanguageContent {
    pub sections: IndexMap<String, Section>,
}

/// Contents of `content.json`, keyed by language.
pub type ContentDocument = IndexMap<String, LanguageContent>;

/// Convert `pageUTF8.xml` into `content.json`.
///
/// # Errors
/// Returns an error if the document cannot be read or parsed, or the output
/// cannot be written.
pub fn convert_content(config: &ConvertConfig) -> Result<StageReport> {
    convert_content_with_progress(config, &|_| {})
}

/// Convert `pageUTF8.xml` into `content.json` with progress callback.
///
/// # Errors
/// Returns an error if the document cannot be read or parsed, or the output
/// cannot be written.
pub fn convert_content_with_progress(
    config: &ConvertConfig,
    progress: ConvertProgressCallback,
) -> Result<StageReport> {
    let page_path = config.page_path();
    let output = config.output_path(outputs::CONTENT);
    tracing::info!("Converting {:?} → {:?}", page_path, output);

    progress(&ConvertProgress::with_message(
        ConvertPhase::ReadingSource,
        1,
        3,
        "Reading page XML...",
    ));
    let root = read_xml(&page_path)?;

    progress(&ConvertProgress::with_message(
        ConvertPhase::Converting,
        2,
        3,
        "Collecting sections...",
    ));
    let document = from_xml(&root, config);

    let section_count: usize = document.values().map(|lang| lang.sections.len()).sum();
    progress(&ConvertProgress::with_message(
        ConvertPhase::WritingOutput,
        3,
        3,
        format!("Writing {section_count} sections..."),
    ));
    write_json(&document, &output)?;

    progress(&ConvertProgress::new(ConvertPhase::Complete, 3, 3));
    tracing::info!(
        "content: {} languages, {} sections written",
        document.len(),
        section_count
    );
    Ok(StageReport {
        stage: Stage::Content,
        output,
        entries: document.len(),
    })
}

/// Build the per-language section maps from a parsed page document.
pub fn from_xml(root: &XmlElement, config: &ConvertConfig) -> ContentDocument {
    let mut result = ContentDocument::new();

    for idioma in root.find_all("idioma") {
        let Some(lang) = idioma.attr("name") else {
            tracing::warn!("Skipping page block without a language name");
            continue;
        };
        if !config.is_supported_language(lang) {
            tracing::debug!("Skipping page block for unsupported language '{}'", lang);
            continue;
        }

        let mut content = LanguageContent::default();
        for item in idioma.find_all("item") {
            collect_item(item, &mut content.sections);
        }
        tracing::debug!("{}: {} sections", lang, content.sections.len());
        result.insert(lang.to_string(), content);
    }

    result
}

/// Add the sections of one item. Later writes to an id replace earlier
/// ones but keep the id's original position.
fn collect_item(item: &XmlElement, sections: &mut IndexMap<String, Section>) {
    let item_name = item.attr("name").unwrap_or_default();
    let headlines = headlines(item);

    if item_name == SERVICES_ID {
        let mut services = ServicesSection {
            titulares: (!headlines.is_empty()).then(|| headlines.clone()),
            ..ServicesSection::default()
        };

        for texto in item.find_all("texto") {
            let Some(id) = fragment_id(texto) else { continue };

            if id == SERVICES_ID {
                services.intro = plain_text(texto);
                services.paquetes = texto.find_all("paquete").map(package).collect();
                sections.insert(id.to_string(), Section::Services(services.clone()));
            } else {
                let html = if id == EXCURSIONS_ID {
                    EXCURSIONS_TIMETABLE_HTML.to_string()
                } else {
                    plain_text(texto)
                };
                sections.insert(
                    id.to_string(),
                    Section::Page(PageSection {
                        html,
                        titulares: None,
                    }),
                );
            }
        }
    } else {
        for texto in item.find_all("texto") {
            let Some(id) = fragment_id(texto) else { continue };

            let titulares = (id == item_name && !headlines.is_empty()).then(|| headlines.clone());
            sections.insert(
                id.to_string(),
                Section::Page(PageSection {
                    html: plain_text(texto),
                    titulares,
                }),
            );
        }
    }
}

fn fragment_id(texto: &XmlElement) -> Option<&str> {
    let id = texto.attr("data");
    if id.is_none() {
        tracing::warn!("Skipping <texto> without a data attribute");
    }
    id
}

/// The item's `<titulares><tit>` entries, in order.
fn headlines(item: &XmlElement) -> Vec<Headline> {
    let Some(titulares) = item.find("titulares") else {
        return Vec::new();
    };

    titulares
        .find_all("tit")
        .map(|tit| Headline {
            label: plain_text(tit),
            data: tit.find_text("data").unwrap_or_default().trim().to_string(),
            icon: tit.find_text("icon").unwrap_or_default().trim().to_string(),
        })
        .collect()
}

fn package(paquete: &XmlElement) -> Package {
    Package {
        id: paquete.attr("data").unwrap_or_default().to_string(),
        titulo: clean(paquete.find_text("titulo")),
        html: paquete.find("texto").map(plain_text).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::{parse_xml, serialize_json};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const PAGE: &str = r#"<page>
  <idioma name="espanol">
    <item name="nos">
      <titulares>
        <tit>Empresa<data>nos</data><icon> fa fa-users </icon></tit>
        <tit>Equipo<data>nos_equipo</data></tit>
      </titulares>
      <texto data="nos"><![CDATA[ <p>Somos una empresa</p> ]]></texto>
      <texto data="nos_equipo"><![CDATA[<p>Equipo</p>]]></texto>
    </item>
    <item name="srv">
      <titulares>
        <tit>Paquetes<data>srv</data><icon>fa fa-map</icon></tit>
      </titulares>
      <texto data="srv"><![CDATA[<p>Nuestros paquetes</p>]]>
        <paquete data="1">
          <titulo>Pen%C3%ADnsula Vald%C3%A9s</titulo>
          <texto><![CDATA[ Ballenas ]]></texto>
        </paquete>
        <paquete data="101">
          <titulo> Punta Tombo </titulo>
          <texto>Pinguinos</texto>
        </paquete>
      </texto>
      <texto data="srv_avistaje"><![CDATA[<p>Avistaje</p>]]></texto>
      <texto data="srv_excursiones"><![CDATA[<p>ver tabla</p>]]></texto>
    </item>
  </idioma>
  <idioma name="vulcan">
    <item name="nos"><texto data="nos">Dif-tor heh smusma</texto></item>
  </idioma>
</page>"#;

    fn convert() -> ContentDocument {
        from_xml(&parse_xml(PAGE).unwrap(), &ConvertConfig::default())
    }

    #[test]
    fn test_page_sections_and_headlines() {
        let doc = convert();
        let sections = &doc["espanol"].sections;

        let nos = serde_json::to_value(&sections["nos"]).unwrap();
        assert_eq!(
            nos,
            json!({
                "html": "<p>Somos una empresa</p>",
                "titulares": [
                    { "label": "Empresa", "data": "nos", "icon": "fa fa-users" },
                    { "label": "Equipo", "data": "nos_equipo", "icon": "" }
                ]
            })
        );

        // Headlines only attach to the fragment named like its item
        let equipo = serde_json::to_value(&sections["nos_equipo"]).unwrap();
        assert_eq!(equipo, json!({ "html": "<p>Equipo</p>" }));
    }

    #[test]
    fn test_services_overview_and_packages() {
        let doc = convert();
        let sections = &doc["espanol"].sections;

        let Section::Services(srv) = &sections["srv"] else {
            panic!("srv should be a services section");
        };
        assert_eq!(srv.intro, "<p>Nuestros paquetes</p>");
        assert_eq!(
            srv.paquetes,
            vec![
                Package {
                    id: "1".to_string(),
                    titulo: "Península Valdés".to_string(),
                    html: "Ballenas".to_string(),
                },
                Package {
                    id: "101".to_string(),
                    titulo: "Punta Tombo".to_string(),
                    html: "Pinguinos".to_string(),
                },
            ]
        );
        assert_eq!(srv.titulares.as_ref().map(Vec::len), Some(1));

        assert_eq!(sections["srv_avistaje"].html(), Some("<p>Avistaje</p>"));
    }

    #[test]
    fn test_services_key_order() {
        let doc = convert();
        let keys: Vec<&str> = doc["espanol"].sections.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["nos", "nos_equipo", "srv", "srv_avistaje", "srv_excursiones"]
        );

        let srv = serde_json::to_value(&doc["espanol"].sections["srv"]).unwrap();
        let srv_keys: Vec<&String> = srv.as_object().unwrap().keys().collect();
        assert_eq!(srv_keys, vec!["titulares", "intro", "paquetes"]);
    }

    #[test]
    fn test_excursions_timetable_is_overridden() {
        let doc = convert();
        let html = doc["espanol"].sections[EXCURSIONS_ID].html().unwrap();
        assert_eq!(html, EXCURSIONS_TIMETABLE_HTML);
        assert!(html.starts_with("<div id=\"showhide\">"));
        assert!(html.ends_with("</div>"));
        assert!(!html.contains("ver tabla"));
    }

    #[test]
    fn test_unknown_language_dropped() {
        let doc = convert();
        assert_eq!(doc.len(), 1);
        assert!(!serialize_json(&doc).unwrap().contains("vulcan"));
    }

    #[test]
    fn test_last_write_wins_keeps_position() {
        let root = parse_xml(
            r#"<page><idioma name="english">
                <item name="idx"><texto data="idx">first</texto><texto data="extra">x</texto></item>
                <item name="cnt"><titulares><tit>A<data>idx</data></tit></titulares>
                  <texto data="idx">second</texto></item>
            </idioma></page>"#,
        )
        .unwrap();
        let doc = from_xml(&root, &ConvertConfig::default());
        let sections = &doc["english"].sections;

        let keys: Vec<&str> = sections.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["idx", "extra"]);
        // Overwritten by the cnt item; its headlines do not attach (id != item name)
        assert_eq!(
            sections["idx"],
            Section::Page(PageSection {
                html: "second".to_string(),
                titulares: None,
            })
        );
    }

    #[test]
    fn test_fragment_without_id_is_skipped() {
        let root = parse_xml(
            r#"<page><idioma name="english"><item name="idx">
                <texto>orphan</texto><texto data="idx">kept</texto>
            </item></idioma></page>"#,
        )
        .unwrap();
        let doc = from_xml(&root, &ConvertConfig::default());
        let keys: Vec<&str> = doc["english"].sections.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["idx"]);
        assert!(!serialize_json(&doc).unwrap().contains("orphan"));
    }

    #[test]
    fn test_services_without_headlines_omits_titulares() {
        let root = parse_xml(
            r#"<page><idioma name="deutsch"><item name="srv">
                <texto data="srv">Intro</texto>
            </item></idioma></page>"#,
        )
        .unwrap();
        let doc = from_xml(&root, &ConvertConfig::default());
        let srv = serde_json::to_value(&doc["deutsch"].sections["srv"]).unwrap();
        assert_eq!(srv, json!({ "intro": "Intro", "paquetes": [] }));
    }
}
