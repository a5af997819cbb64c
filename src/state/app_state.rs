use discshelf_core::*;
use log::info;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;

/// Application state management
/// Holds the loaded catalog, its facet choices and the browsing session
#[derive(Debug)]
pub struct AppState {
    /// Path to the current catalog source
    pub current_file: Option<PathBuf>,
    /// Normalized catalog shared with the cache
    pub catalog: Arc<Catalog>,
    /// Facet choice lists for the current catalog
    pub facet_index: FacetIndex,
    /// Filters, search, paging and view settings
    pub browse: BrowseState,
    /// Table sizing metrics
    pub layout: TableLayout,
    cache: CatalogCache,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            current_file: None,
            catalog: Arc::new(Catalog::default()),
            facet_index: FacetIndex::default(),
            browse: BrowseState::new(config.browse_defaults()),
            layout: config.table,
            cache: CatalogCache::new(config.alias_table(), config.source.sheet.clone()),
        }
    }

    pub fn aliases(&self) -> &AliasTable {
        self.cache.aliases()
    }

    /// Load a catalog source, reusing the cached copy when the file is unchanged
    pub fn load_from_file(&mut self, path: &Path) -> Result<(), CatalogError> {
        let catalog = self.cache.get_or_load(path)?;
        let facets: Vec<Field> = self.browse.defaults().facets.clone();
        self.facet_index = FacetIndex::build(catalog.iter(), &facets);
        self.catalog = catalog;
        self.current_file = Some(path.to_path_buf());
        Ok(())
    }

    /// Load the current file again if it changed on disk. The session's
    /// filters and paging survive; the cursor is re-clamped on the next render.
    pub fn reload(&mut self) -> Result<bool, CatalogError> {
        let Some(path) = self.current_file.clone() else {
            return Ok(false);
        };
        let previous = Arc::clone(&self.catalog);
        self.load_from_file(&path)?;
        let changed = !Arc::ptr_eq(&previous, &self.catalog);
        if changed {
            info!("reloaded {} ({} records)", path.display(), self.catalog.len());
        }
        Ok(changed)
    }

    /// Records passing the current filters and search
    pub fn query(&self) -> QueryResult<'_> {
        self.browse.query(&self.catalog)
    }

    /// Number of records passing the current filters and search
    pub fn match_count(&self) -> usize {
        self.query().len()
    }

    pub fn render(&mut self) -> BrowseView {
        self.browse.render(&self.catalog, &self.layout)
    }

    /// Short title with file name and record count
    pub fn get_title(&self) -> String {
        let file_name = self
            .current_file
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("no catalog");

        format!("discshelf - {} ({} records)", file_name, self.catalog.len())
    }
}
