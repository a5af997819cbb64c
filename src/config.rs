//! User configuration read from `config.toml` and its defaults.

use anyhow::{Context, Result};
use discshelf_core::{
    AliasTable, BrowseDefaults, Field, TableLayout, ViewMode, DEFAULT_FACETS, DEFAULT_PAGE_SIZE,
};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SOURCE: &str = "catalogo_musical.xlsx";

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub table: TableLayout,
    #[serde(default)]
    pub facets: FacetsConfig,
    /// Extra header spellings, consulted after the built-in ones.
    #[serde(default)]
    pub aliases: Vec<AliasConfig>,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct SourceConfig {
    #[serde(default = "default_source_path")]
    pub path: PathBuf,
    /// Worksheet name or zero-based index
    #[serde(default)]
    pub sheet: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ViewConfig {
    #[serde(default)]
    pub mode: ViewMode,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_cards_per_row")]
    pub cards_per_row: usize,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct FacetsConfig {
    /// Field names, in the order filters are applied
    #[serde(default = "default_facet_fields")]
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct AliasConfig {
    pub alias: String,
    pub field: String,
}

fn default_source_path() -> PathBuf {
    PathBuf::from(DEFAULT_SOURCE)
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_cards_per_row() -> usize {
    discshelf_core::view::DEFAULT_CARDS_PER_ROW
}

fn default_facet_fields() -> Vec<String> {
    DEFAULT_FACETS.iter().map(|f| f.name().to_string()).collect()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: default_source_path(),
            sheet: None,
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            mode: ViewMode::default(),
            page_size: default_page_size(),
            cards_per_row: default_cards_per_row(),
        }
    }
}

impl Default for FacetsConfig {
    fn default() -> Self {
        Self {
            fields: default_facet_fields(),
        }
    }
}

impl Config {
    /// Built-in aliases followed by the configured ones. Entries naming an
    /// unknown field are skipped with a warning.
    pub fn alias_table(&self) -> AliasTable {
        let mut table = AliasTable::default();
        for entry in &self.aliases {
            match Field::from_name(entry.field.trim()) {
                Some(field) => table.push(entry.alias.trim(), field),
                None => warn!(
                    "ignoring alias '{}': unknown field '{}'",
                    entry.alias, entry.field
                ),
            }
        }
        table
    }

    /// Configured facet fields, falling back to the default set when none
    /// of them resolve
    pub fn facet_fields(&self) -> Vec<Field> {
        let aliases = self.alias_table();
        let mut fields = Vec::new();
        for name in &self.facets.fields {
            match aliases.resolve_name(name) {
                Some(field) if !fields.contains(&field) => fields.push(field),
                Some(_) => {}
                None => warn!("ignoring unknown facet field '{}'", name),
            }
        }

        if fields.is_empty() {
            DEFAULT_FACETS.to_vec()
        } else {
            fields
        }
    }

    pub fn browse_defaults(&self) -> BrowseDefaults {
        BrowseDefaults {
            facets: self.facet_fields(),
            view_mode: self.view.mode,
            page_size: self.view.page_size,
            cards_per_row: self.view.cards_per_row,
        }
    }
}

/// `<config_dir>/discshelf/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("discshelf").join("config.toml"))
}

/// Read the configuration. An explicit path must exist; a missing default
/// file just means defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                debug!("no configuration file, using defaults");
                return Ok(Config::default());
            }
        },
    };

    let text = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config = parse_config(&text)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    debug!("loaded configuration from {}", path.display());
    Ok(config)
}

pub fn parse_config(text: &str) -> Result<Config> {
    Ok(toml::from_str(text)?)
}
