// Public modules
pub mod cache;
pub mod error;
pub mod export;
pub mod facets;
pub mod filtering;
pub mod io;
pub mod models;
pub mod pagination;
pub mod query;
pub mod sanitize;
pub mod schema;
pub mod search;
pub mod state;
pub mod view;

// Re-export commonly used types for convenience
pub use cache::{CatalogCache, SourceKey};
pub use error::CatalogError;
pub use export::DisplayTable;
pub use facets::{FacetChoices, FacetIndex, ALL_SENTINEL, DEFAULT_FACETS};
pub use filtering::{
    apply_filters, matches_filters, parse_facet_selections, FacetSelection, FilterState,
};
pub use io::{load_catalog, load_raw_table, save_csv, write_csv, SourceFormat};
pub use models::{Catalog, Field, RawTable, Record};
pub use pagination::{paginate, Page, PageInfo, PaginationState, DEFAULT_PAGE_SIZE};
pub use query::{run_query, QueryResult};
pub use sanitize::{is_visually_empty, prune_empty_rows};
pub use schema::{build_catalog, normalize_table, AliasTable, SchemaReport};
pub use search::{apply_search, fold_text, SearchQuery};
pub use state::{BrowseDefaults, BrowseState, BrowseView, ViewMode};
pub use view::{
    classify_format, Card, CardGrid, FormatBadge, TableLayout, TableView, PLACEHOLDER,
};
