use nievedata::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// Latin-1 bytes: "Información" / "Dirección" with single-byte ó (0xF3).
const MENU_LATIN1: &[u8] = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>
<menu>
  <idioma name=\"espanol\">
    <home>Inicio</home>
    <nosotros>Informaci\xF3n</nosotros>
    <servicios>Servicios</servicios>
    <contacto>Direcci\xF3n</contacto>
  </idioma>
  <idioma name=\"esperanto\">
    <home>Hejmo</home>
  </idioma>
</menu>";

const HOME_LATIN1: &[u8] = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>
<inicio>
  <idioma name=\"espanol\">
    <cuadroder><![CDATA[<p>Excursiones en la Patagonia</p>]]></cuadroder>
    <terminos><![CDATA[<p>T\xE9rminos</p>]]></terminos>
    <compra>Me interesa</compra>
  </idioma>
  <idioma name=\"english\">
    <cuadroder>Tours</cuadroder>
    <form><nombre>Name</nombre><email>E-mail</email><mensaje>Message</mensaje></form>
    <compra>I want it</compra>
  </idioma>
  <idioma name=\"esperanto\">
    <compra>Mi volas</compra>
  </idioma>
</inicio>";

const PAGE_UTF8: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<page>
  <idioma name="espanol">
    <item name="idx">
      <texto data="idx"><![CDATA[<h1>Bienvenidos</h1>]]></texto>
    </item>
    <item name="srv">
      <texto data="srv"><![CDATA[<p>Paquetes</p>]]>
        <paquete data="7"><titulo>Pen%C3%ADnsula</titulo><texto>Ballenas</texto></paquete>
        <paquete data="8"><titulo>Tombo</titulo><texto>Pingüinos</texto></paquete>
      </texto>
      <texto data="srv_avistaje"><![CDATA[<p>Avistaje</p>]]></texto>
      <texto data="srv_excursiones"><![CDATA[<p>placeholder</p>]]></texto>
    </item>
  </idioma>
  <idioma name="esperanto">
    <item name="idx"><texto data="idx">Bonvenon</texto></item>
  </idioma>
</page>"#;

const HOTELS_UTF8: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<hoteles>
  <ciudad name="Trelew">
    <mapa>https://mapsengine.google.com/map/embed?mid=zAbc</mapa>
    <hotel>
      <nombre>Hotel Touring Club</nombre>
      <imagen>touring.jpg</imagen>
      <estrellas>3</estrellas>
      <web>http://www.touringpatagonia.com.ar</web>
    </hotel>
    <hotel>
      <nombre>Residencial</nombre>
      <estrellas>sin categoría</estrellas>
    </hotel>
  </ciudad>
</hoteles>"#;

fn write_sources(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("menu.xml"), MENU_LATIN1).unwrap();
    fs::write(dir.join("inicio.xml"), HOME_LATIN1).unwrap();
    fs::write(dir.join("pageUTF8.xml"), PAGE_UTF8).unwrap();
    fs::write(dir.join("hotelesUTF8.xml"), HOTELS_UTF8).unwrap();
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_full_pipeline() {
    let root = tempdir().unwrap();
    let source = root.path().join("xml");
    let dest = root.path().join("data");
    write_sources(&source);

    let config = ConvertConfig::new(&source, &dest);
    let reports = run_all(&config).unwrap();

    let stages: Vec<Stage> = reports.iter().map(|r| r.stage).collect();
    assert_eq!(stages, Stage::ALL.to_vec());
    assert_eq!(reports[0].entries, 2);
    assert_eq!(reports[2].entries, 1);

    let inicio = read_json(&dest.join("inicio.json"));
    assert_eq!(
        inicio,
        json!({
            "espanol": {
                "nav": {
                    "home": "Inicio",
                    "nosotros": "Información",
                    "servicios": "Servicios",
                    "contacto": "Dirección"
                },
                "cuadroder": "<p>Excursiones en la Patagonia</p>",
                "terminos": "<p>Términos</p>",
                "form": { "nombre": "Nombre", "email": "Email", "mensaje": "Mensaje" },
                "compra": "Me interesa"
            },
            "english": {
                "nav": {},
                "cuadroder": "Tours",
                "terminos": "",
                "form": { "nombre": "Name", "email": "E-mail", "mensaje": "Message" },
                "compra": "I want it"
            }
        })
    );

    let content = read_json(&dest.join("content.json"));
    assert_eq!(content["espanol"]["sections"]["idx"], json!({ "html": "<h1>Bienvenidos</h1>" }));
    assert_eq!(
        content["espanol"]["sections"]["srv"],
        json!({
            "intro": "<p>Paquetes</p>",
            "paquetes": [
                { "id": "7", "titulo": "Península", "html": "Ballenas" },
                { "id": "8", "titulo": "Tombo", "html": "Pingüinos" }
            ]
        })
    );
    assert_eq!(
        content["espanol"]["sections"]["srv_avistaje"],
        json!({ "html": "<p>Avistaje</p>" })
    );

    let hoteles = read_json(&dest.join("hoteles.json"));
    assert_eq!(
        hoteles["ciudades"][0]["mapa"],
        json!(nievedata::config::DEFAULT_MAP_OVERRIDES[0].1)
    );
    assert_eq!(hoteles["ciudades"][0]["hoteles"][0]["estrellas"], json!(3));
    assert_eq!(hoteles["ciudades"][0]["hoteles"][1]["estrellas"], json!(0));
    assert_eq!(hoteles["ciudades"][0]["hoteles"][1]["web"], json!(""));
}

#[test]
fn test_output_formatting() {
    let root = tempdir().unwrap();
    let source = root.path().join("xml");
    let dest = root.path().join("data");
    write_sources(&source);
    run_all(&ConvertConfig::new(&source, &dest)).unwrap();

    let inicio = fs::read_to_string(dest.join("inicio.json")).unwrap();
    assert!(inicio.starts_with("{\n  \"espanol\": {\n    \"nav\": {\n      \"home\": \"Inicio\","));
    // Non-ASCII written literally, no trailing newline
    assert!(inicio.contains("\"nosotros\": \"Información\""));
    assert!(!inicio.contains("\\u00f3"));
    assert!(inicio.ends_with('}'));
}

#[test]
fn test_excursions_timetable_override() {
    let root = tempdir().unwrap();
    let source = root.path().join("xml");
    let dest = root.path().join("data");
    write_sources(&source);
    run_all(&ConvertConfig::new(&source, &dest)).unwrap();

    let content = read_json(&dest.join("content.json"));
    assert_eq!(
        content["espanol"]["sections"]["srv_excursiones"]["html"],
        json!(nievedata::converter::content::EXCURSIONS_TIMETABLE_HTML)
    );
}

#[test]
fn test_unknown_language_absent_everywhere() {
    let root = tempdir().unwrap();
    let source = root.path().join("xml");
    let dest = root.path().join("data");
    write_sources(&source);
    run_all(&ConvertConfig::new(&source, &dest)).unwrap();

    for file in ["inicio.json", "content.json", "hoteles.json"] {
        let text = fs::read_to_string(dest.join(file)).unwrap();
        assert!(!text.contains("esperanto"), "{file} leaked an unknown language");
    }
}

#[test]
fn test_rerun_is_byte_identical() {
    let root = tempdir().unwrap();
    let source = root.path().join("xml");
    write_sources(&source);

    let first = root.path().join("first");
    let second = root.path().join("second");
    run_all(&ConvertConfig::new(&source, &first)).unwrap();
    run_all(&ConvertConfig::new(&source, &second)).unwrap();

    for file in ["inicio.json", "content.json", "hoteles.json"] {
        assert_eq!(
            fs::read(first.join(file)).unwrap(),
            fs::read(second.join(file)).unwrap(),
            "{file} differs between runs"
        );
    }
}

#[test]
fn test_malformed_xml_aborts_at_its_stage() {
    let root = tempdir().unwrap();
    let source = root.path().join("xml");
    let dest = root.path().join("data");
    write_sources(&source);
    fs::write(source.join("pageUTF8.xml"), "<page><idioma name=\"espanol\"></page>").unwrap();

    let err = run_all(&ConvertConfig::new(&source, &dest)).unwrap_err();
    assert!(matches!(err, Error::Stage { stage: "content", .. }), "{err}");
    assert!(err.to_string().contains("content"));

    // Earlier stage finished, failing and later stages wrote nothing
    assert!(dest.join("inicio.json").exists());
    assert!(!dest.join("content.json").exists());
    assert!(!dest.join("hoteles.json").exists());
}

#[test]
fn test_single_stage_and_custom_files() {
    let root = tempdir().unwrap();
    let source = root.path().join("xml");
    let dest = root.path().join("data");
    write_sources(&source);
    fs::rename(source.join("hotelesUTF8.xml"), source.join("hotels.xml")).unwrap();

    let mut config = ConvertConfig::new(&source, &dest);
    config.inputs.hotels = "hotels.xml".to_string();
    let reports = run_stages(&config, &[Stage::Hoteles], &|_| {}).unwrap();

    assert_eq!(reports.len(), 1);
    assert!(dest.join("hoteles.json").exists());
    assert!(!dest.join("inicio.json").exists());
}
