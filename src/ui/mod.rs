pub mod cards;
pub mod formatting;
pub mod table;

pub use cards::render_cards;
pub use formatting::{
    format_active_filters, format_choices, format_facet_choices, format_match_count,
    format_page_footer,
};
pub use table::render_table;

use discshelf_core::{BrowseState, BrowseView};

/// Full text for one interaction: active filters, match count, then the
/// table or the current page of cards
pub fn render_view(view: &BrowseView, state: &BrowseState) -> String {
    let mut out = String::new();

    let filters = format_active_filters(state);
    if !filters.is_empty() {
        out.push_str(&format!("Filters: {}\n", filters));
    }
    out.push_str(&format_match_count(view.total_matches()));
    out.push_str("\n\n");

    match view {
        BrowseView::Table { table, .. } => out.push_str(&render_table(table)),
        BrowseView::Cards { page, grid, .. } => {
            out.push_str(&render_cards(grid));
            out.push_str(&format_page_footer(page));
            out.push('\n');
        }
    }
    out
}
