use discshelf_core::{save_csv, CatalogError, DisplayTable};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::state::AppState;

/// Catalog path to open: the command-line argument when given, otherwise
/// the configured source
pub fn resolve_source(cli_file: Option<&Path>, config: &Config) -> PathBuf {
    cli_file
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.source.path.clone())
}

/// Export the current results (all pages) as CSV in table column order.
/// Returns the number of rows written.
pub fn export_results(state: &AppState, path: &Path) -> Result<usize, CatalogError> {
    let table = DisplayTable::from_records(state.query(), state.catalog.fields());
    save_csv(&table, path)?;
    Ok(table.len())
}
