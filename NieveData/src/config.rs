//! Conversion configuration
//!
//! Everything the extractors treat as a constant (directories, file names,
//! the language catalog, the map substitution table) lives in one
//! [`ConvertConfig`] value that is built at start-up and passed down.
//! The defaults reproduce the site's fixed layout; an optional TOML file
//! can override any subset of fields.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Languages the site publishes, in emission order.
pub const DEFAULT_LANGUAGES: [&str; 6] = [
    "espanol",
    "english",
    "francais",
    "portuguese",
    "italiano",
    "deutsch",
];

/// Host of the retired Google Maps Engine embeds.
pub const DEFAULT_DEFUNCT_MAP_HOST: &str = "mapsengine.google.com";

/// `OpenStreetMap` embeds standing in for the retired map URLs.
pub const DEFAULT_MAP_OVERRIDES: [(&str, &str); 2] = [
    (
        "Trelew",
        "https://www.openstreetmap.org/export/embed.html?bbox=-65.3400%2C-43.2700%2C-65.2700%2C-43.2200&layer=mapnik&marker=-43.2490%2C-65.3053",
    ),
    (
        "Puerto Madryn",
        "https://www.openstreetmap.org/export/embed.html?bbox=-65.0500%2C-42.7900%2C-65.0000%2C-42.7500&layer=mapnik&marker=-42.7692%2C-65.0338",
    ),
];

/// Source file names, relative to [`ConvertConfig::source_dir`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputFiles {
    /// Home page blocks (legacy 8-bit encoding).
    pub home: String,
    /// Navigation captions (legacy 8-bit encoding).
    pub menu: String,
    /// Per-language content items (UTF-8).
    pub page: String,
    /// Per-city hotel listings (UTF-8).
    pub hotels: String,
}

impl Default for InputFiles {
    fn default() -> Self {
        Self {
            home: "inicio.xml".to_string(),
            menu: "menu.xml".to_string(),
            page: "pageUTF8.xml".to_string(),
            hotels: "hotelesUTF8.xml".to_string(),
        }
    }
}

/// Output file names written into [`ConvertConfig::dest_dir`].
pub mod outputs {
    /// Navigation + home page bundle.
    pub const INICIO: &str = "inicio.json";
    /// Content sections.
    pub const CONTENT: &str = "content.json";
    /// Hotel listings.
    pub const HOTELES: &str = "hoteles.json";
}

/// Start-up configuration for a conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Directory holding the source XML documents.
    pub source_dir: PathBuf,
    /// Directory the JSON files are written to.
    pub dest_dir: PathBuf,
    /// Source file names.
    pub inputs: InputFiles,
    /// Language catalog; blocks for any other language are dropped.
    pub languages: Vec<String>,
    /// City name to map embed URL, used when a city's own URL is unusable.
    pub map_overrides: IndexMap<String, String>,
    /// Map URLs containing this host are treated as dead.
    pub defunct_map_host: String,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("xml"),
            dest_dir: PathBuf::from("data"),
            inputs: InputFiles::default(),
            languages: DEFAULT_LANGUAGES.iter().map(ToString::to_string).collect(),
            map_overrides: DEFAULT_MAP_OVERRIDES
                .iter()
                .map(|(city, url)| ((*city).to_string(), (*url).to_string()))
                .collect(),
            defunct_map_host: DEFAULT_DEFUNCT_MAP_HOST.to_string(),
        }
    }
}

impl ConvertConfig {
    /// Default configuration rooted at the given directories.
    pub fn new<S: Into<PathBuf>, D: Into<PathBuf>>(source_dir: S, dest_dir: D) -> Self {
        Self {
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            ..Self::default()
        }
    }

    /// Load a configuration from a TOML file. Missing keys keep their defaults.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::ReadSource {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        tracing::debug!(
            "Loaded config: source={:?} dest={:?} languages={}",
            config.source_dir,
            config.dest_dir,
            config.languages.len()
        );
        Ok(config)
    }

    /// Whether `lang` is in the language catalog.
    pub fn is_supported_language(&self, lang: &str) -> bool {
        self.languages.iter().any(|l| l == lang)
    }

    /// Replacement embed URL for a city, if one is configured.
    pub fn map_override(&self, city: &str) -> Option<&str> {
        self.map_overrides.get(city).map(String::as_str)
    }

    pub fn home_path(&self) -> PathBuf {
        self.source_dir.join(&self.inputs.home)
    }

    pub fn menu_path(&self) -> PathBuf {
        self.source_dir.join(&self.inputs.menu)
    }

    pub fn page_path(&self) -> PathBuf {
        self.source_dir.join(&self.inputs.page)
    }

    pub fn hotels_path(&self) -> PathBuf {
        self.source_dir.join(&self.inputs.hotels)
    }

    /// Path of an output file inside the destination directory.
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.dest_dir.join(file_name)
    }
}
