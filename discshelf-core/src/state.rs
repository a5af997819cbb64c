use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::facets::DEFAULT_FACETS;
use crate::filtering::{FacetSelection, FilterState};
use crate::models::{Catalog, Field};
use crate::pagination::{PageInfo, PaginationState, DEFAULT_PAGE_SIZE};
use crate::query::{run_query, QueryResult};
use crate::view::{clamp_cards_per_row, CardGrid, TableLayout, TableView, DEFAULT_CARDS_PER_ROW};

/// Presentation chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Table,
    Cards,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Table => f.write_str("table"),
            ViewMode::Cards => f.write_str("cards"),
        }
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(ViewMode::Table),
            "cards" | "card" => Ok(ViewMode::Cards),
            other => Err(format!("unknown view mode '{}', expected 'table' or 'cards'", other)),
        }
    }
}

/// Values a session returns to on reset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseDefaults {
    pub facets: Vec<Field>,
    pub view_mode: ViewMode,
    pub page_size: usize,
    pub cards_per_row: usize,
}

impl Default for BrowseDefaults {
    fn default() -> Self {
        Self {
            facets: DEFAULT_FACETS.to_vec(),
            view_mode: ViewMode::default(),
            page_size: DEFAULT_PAGE_SIZE,
            cards_per_row: DEFAULT_CARDS_PER_ROW,
        }
    }
}

/// The rendered outcome of one interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum BrowseView {
    Table {
        total_matches: usize,
        table: TableView,
    },
    Cards {
        total_matches: usize,
        page: PageInfo,
        grid: CardGrid,
    },
}

impl BrowseView {
    pub fn total_matches(&self) -> usize {
        match self {
            BrowseView::Table { total_matches, .. } | BrowseView::Cards { total_matches, .. } => {
                *total_matches
            }
        }
    }
}

/// Filter selections, search text, pagination cursor and view settings of
/// one browsing session. The host owns it and passes it to every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseState {
    defaults: BrowseDefaults,
    pub filters: FilterState,
    pub search: String,
    pub view_mode: ViewMode,
    pub pagination: PaginationState,
    cards_per_row: usize,
}

impl Default for BrowseState {
    fn default() -> Self {
        BrowseState::new(BrowseDefaults::default())
    }
}

impl BrowseState {
    pub fn new(defaults: BrowseDefaults) -> Self {
        Self {
            filters: FilterState::new(&defaults.facets),
            search: String::new(),
            view_mode: defaults.view_mode,
            pagination: PaginationState::new(defaults.page_size),
            cards_per_row: clamp_cards_per_row(defaults.cards_per_row),
            defaults,
        }
    }

    pub fn defaults(&self) -> &BrowseDefaults {
        &self.defaults
    }

    pub fn cards_per_row(&self) -> usize {
        self.cards_per_row
    }

    /// A new selection changes the result set, so paging restarts
    pub fn select_facet(&mut self, field: Field, selection: FacetSelection) {
        self.filters.select(field, selection);
        self.pagination.first();
    }

    pub fn clear_facet(&mut self, field: Field) {
        self.filters.clear(field);
        self.pagination.first();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.pagination.first();
    }

    pub fn set_page(&mut self, page: usize) {
        self.pagination.current_page = page;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.pagination.page_size = page_size.max(1);
    }

    pub fn set_cards_per_row(&mut self, cards_per_row: usize) {
        self.cards_per_row = clamp_cards_per_row(cards_per_row);
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// All facets back to `(All)`, empty search, first page, default page
    /// size, card count and view mode
    pub fn reset(&mut self) {
        *self = BrowseState::new(self.defaults.clone());
    }

    pub fn query<'a>(&self, catalog: &'a Catalog) -> QueryResult<'a> {
        run_query(catalog, &self.filters, &self.search)
    }

    /// Recompute the view for the current state. The page cursor is
    /// re-clamped against the fresh result, so out-of-range pages never fail.
    pub fn render(&mut self, catalog: &Catalog, layout: &TableLayout) -> BrowseView {
        let result = self.query(catalog);
        let total_matches = result.len();
        self.pagination.reclamp(total_matches);

        match self.view_mode {
            ViewMode::Table => BrowseView::Table {
                total_matches,
                table: TableView::build(result.iter(), catalog.fields(), layout),
            },
            ViewMode::Cards => {
                let page = self.pagination.page(result.records());
                BrowseView::Cards {
                    total_matches,
                    page: page.info,
                    grid: CardGrid::build(page.items, self.cards_per_row),
                }
            }
        }
    }
}
