use colored::Colorize;
use discshelf_core::{Card, CardGrid};

use super::formatting::{paint_badge, pad, truncate};

/// Width of one card column, in characters
pub const CARD_WIDTH: usize = 32;
const GUTTER: &str = "   ";

/// Text lines of one card, in display order. Optional lines are skipped.
fn card_lines(card: &Card) -> Vec<(String, LineStyle)> {
    let mut lines = vec![
        (card.badge.label().to_string(), LineStyle::Badge),
        (card.title.clone(), LineStyle::Title),
    ];

    for value in [&card.album, &card.performer, &card.orchestra, &card.composer]
        .into_iter()
        .flatten()
    {
        lines.push((value.clone(), LineStyle::Plain));
    }

    for combined in [&card.year_genre, &card.label_catalog, &card.location_position] {
        if !combined.is_empty() {
            lines.push((combined.clone(), LineStyle::Muted));
        }
    }

    if let Some(notes) = &card.notes {
        lines.push((notes.clone(), LineStyle::Muted));
    }
    lines
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineStyle {
    Badge,
    Title,
    Plain,
    Muted,
}

fn paint(card: &Card, text: &str, style: LineStyle) -> String {
    match style {
        LineStyle::Badge => paint_badge(&card.badge, text).to_string(),
        LineStyle::Title => text.bold().to_string(),
        LineStyle::Plain => text.to_string(),
        LineStyle::Muted => text.dimmed().to_string(),
    }
}

/// Draw the card grid row by row, cards side by side. Padding slots of the
/// last row stay blank.
pub fn render_cards(grid: &CardGrid) -> String {
    let mut out = String::new();

    for row in &grid.rows {
        let columns: Vec<Option<(&Card, Vec<(String, LineStyle)>)>> = row
            .iter()
            .map(|slot| slot.as_ref().map(|card| (card, card_lines(card))))
            .collect();
        let height = columns
            .iter()
            .flatten()
            .map(|(_, lines)| lines.len())
            .max()
            .unwrap_or(0);

        for line in 0..height {
            let cells: Vec<String> = columns
                .iter()
                .map(|column| match column {
                    Some((card, lines)) => match lines.get(line) {
                        Some((text, style)) => {
                            let text = pad(&truncate(text, CARD_WIDTH), CARD_WIDTH);
                            paint(card, &text, *style)
                        }
                        None => " ".repeat(CARD_WIDTH),
                    },
                    None => " ".repeat(CARD_WIDTH),
                })
                .collect();
            out.push_str(cells.join(GUTTER).trim_end());
            out.push('\n');
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use discshelf_core::{Field, Record};

    fn records() -> Vec<Record> {
        vec![
            Record::from_fields([
                (Field::Song, "Alma"),
                (Field::Format, "LP"),
                (Field::Year, "1960"),
                (Field::Genre, "Bolero"),
            ]),
            Record::from_fields([(Field::Song, "Corazón"), (Field::Format, "CD")]),
            Record::from_fields([(Field::Album, "Sin título")]),
        ]
    }

    #[test]
    fn test_cards_side_by_side() {
        let owned = records();
        let refs: Vec<&Record> = owned.iter().collect();
        let grid = CardGrid::build(&refs, 2);
        let text = render_cards(&grid);

        let first_line = text.lines().next().unwrap();
        assert!(first_line.contains("Vinyl"));
        assert!(first_line.contains("CD"));
        assert!(text.contains("1960 · Bolero"));
        assert!(text.contains("Sin título"));
        assert!(text.contains("—"));
    }

    #[test]
    fn test_card_lines_skip_missing_values() {
        let card = Card::from_record(&Record::from_fields([(Field::Song, "Alma")]));
        let lines = card_lines(&card);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].0, "—");
        assert_eq!(lines[1].0, "Alma");
    }

    #[test]
    fn test_empty_grid_renders_nothing() {
        assert_eq!(render_cards(&CardGrid::build(&[], 3)), "");
    }
}
