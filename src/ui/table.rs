use colored::Colorize;
use discshelf_core::{Field, TableView};

use super::formatting::{paint_badge, pad, text_width, truncate, MAX_CELL_WIDTH};

const SEPARATOR: &str = " │ ";

/// Draw the table view-model as aligned text.
///
/// Columns that are empty in every row are left out to keep the table
/// narrow; the format column is always shown.
pub fn render_table(view: &TableView) -> String {
    let is_format = |col: usize| view.columns[col].field == Field::Format;

    let visible: Vec<usize> = (0..view.columns.len())
        .filter(|&col| {
            is_format(col) || view.rows.iter().any(|row| !row.cells[col].trim().is_empty())
        })
        .collect();

    let widths: Vec<usize> = visible
        .iter()
        .map(|&col| {
            let cells = view
                .rows
                .iter()
                .map(|row| {
                    if is_format(col) {
                        text_width(row.badge.label())
                    } else {
                        text_width(&row.cells[col])
                    }
                })
                .max()
                .unwrap_or(0);
            text_width(&view.columns[col].header)
                .max(cells)
                .min(MAX_CELL_WIDTH)
        })
        .collect();

    let mut out = String::new();

    let header: Vec<String> = visible
        .iter()
        .zip(&widths)
        .map(|(&col, &width)| pad(&view.columns[col].header, width).bold().to_string())
        .collect();
    out.push_str(header.join(SEPARATOR).trim_end());
    out.push('\n');

    let rule: Vec<String> = widths.iter().map(|&width| "─".repeat(width)).collect();
    out.push_str(&rule.join("─┼─"));
    out.push('\n');

    for row in &view.rows {
        let cells: Vec<String> = visible
            .iter()
            .zip(&widths)
            .map(|(&col, &width)| {
                if is_format(col) {
                    // colour after padding so escape codes don't skew alignment
                    let label = pad(&truncate(row.badge.label(), width), width);
                    paint_badge(&row.badge, &label).to_string()
                } else {
                    pad(&truncate(&row.cells[col], width), width)
                }
            })
            .collect();
        out.push_str(cells.join(SEPARATOR).trim_end());
        out.push('\n');
    }

    out
}
