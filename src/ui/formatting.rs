use colored::{ColoredString, Colorize};
use discshelf_core::{BrowseState, FacetChoices, FacetIndex, FormatBadge, PageInfo, ALL_SENTINEL};

/// Widest a table cell may grow before it is truncated
pub const MAX_CELL_WIDTH: usize = 28;

/// `text` (usually the padded badge label) in the colour of `badge`
pub fn paint_badge(badge: &FormatBadge, text: &str) -> ColoredString {
    match badge {
        FormatBadge::Vinyl => text.magenta().bold(),
        FormatBadge::Cd => text.cyan().bold(),
        FormatBadge::Generic(_) => text.dimmed(),
    }
}

/// Number of characters, used as display width
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Cut `text` to `width` characters, marking the cut with an ellipsis
pub fn truncate(text: &str, width: usize) -> String {
    if text_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Left-align `text` in a field of `width` characters
pub fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text_width(text));
    format!("{}{}", text, " ".repeat(fill))
}

/// One line describing the active facets and search, empty when none apply
pub fn format_active_filters(state: &BrowseState) -> String {
    let mut parts: Vec<String> = state
        .filters
        .active()
        .map(|(field, value)| format!("{}: {}", field, value))
        .collect();

    let search = state.search.trim();
    if !search.is_empty() {
        parts.push(format!("search: \"{}\"", search));
    }
    parts.join("; ")
}

pub fn format_match_count(total: usize) -> String {
    match total {
        0 => "No records match.".to_string(),
        1 => "1 record".to_string(),
        n => format!("{} records", n),
    }
}

/// "Page 2 of 5 (records 13-24 of 60)  [prev] [next]"
pub fn format_page_footer(info: &PageInfo) -> String {
    let mut footer = if info.total_items == 0 {
        format!("Page {} of {}", info.current_page, info.total_pages)
    } else {
        format!(
            "Page {} of {} (records {}-{} of {})",
            info.current_page,
            info.total_pages,
            info.start + 1,
            info.end,
            info.total_items
        )
    };

    let hints: Vec<&str> = [(info.has_previous(), "[prev]"), (info.has_next(), "[next]")]
        .into_iter()
        .filter_map(|(available, hint)| available.then_some(hint))
        .collect();
    if !hints.is_empty() {
        footer.push_str("  ");
        footer.push_str(&hints.join(" "));
    }
    footer
}

/// Choice lists for the facets, `(All)` first, with the current selection marked
pub fn format_choices(index: &FacetIndex, state: &BrowseState) -> String {
    index
        .iter()
        .map(|choices| format_facet_choices(choices, state))
        .collect()
}

/// Choice list of a single facet
pub fn format_facet_choices(choices: &FacetChoices, state: &BrowseState) -> String {
    let selected = state
        .filters
        .selection(choices.field)
        .map(|selection| selection.label())
        .unwrap_or(ALL_SENTINEL);

    let mut out = format!(
        "{} ({} values)\n",
        choices.field.name().bold(),
        choices.values().len()
    );
    for option in choices.options() {
        if option == selected {
            out.push_str(&format!("  * {}\n", option.green()));
        } else {
            out.push_str(&format!("    {}\n", option));
        }
    }
    out
}
