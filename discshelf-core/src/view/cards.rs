use serde::Serialize;

use super::badge::{classify_format, FormatBadge};
use super::PLACEHOLDER;
use crate::models::{Field, Record};

pub const MAX_CARDS_PER_ROW: usize = 3;
pub const DEFAULT_CARDS_PER_ROW: usize = 3;

const LINE_SEPARATOR: &str = " · ";

pub fn clamp_cards_per_row(cards_per_row: usize) -> usize {
    cards_per_row.clamp(1, MAX_CARDS_PER_ROW)
}

/// Plain field values for one release card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub badge: FormatBadge,
    pub title: String,
    pub album: Option<String>,
    pub performer: Option<String>,
    pub orchestra: Option<String>,
    pub composer: Option<String>,
    pub year_genre: String,
    pub label_catalog: String,
    pub location_position: String,
    pub notes: Option<String>,
}

impl Card {
    pub fn from_record(record: &Record) -> Self {
        let owned = |field: Field| record.non_blank(field).map(str::to_string);

        Self {
            badge: classify_format(record.get(Field::Format)),
            title: record
                .non_blank(Field::Song)
                .unwrap_or(PLACEHOLDER)
                .to_string(),
            album: owned(Field::Album),
            performer: owned(Field::Performer),
            orchestra: owned(Field::OrchestraSoloist),
            composer: owned(Field::Composer),
            year_genre: combine(record, &[Field::Year, Field::Genre]),
            label_catalog: combine(record, &[Field::Label, Field::CatalogNumber]),
            location_position: combine(record, &[Field::Location, Field::Position]),
            notes: owned(Field::Notes),
        }
    }
}

/// Join the non-blank display values of `fields`
fn combine(record: &Record, fields: &[Field]) -> String {
    fields
        .iter()
        .map(|field| record.display(*field))
        .filter(|value| !value.trim().is_empty())
        .map(|value| value.trim().to_string())
        .collect::<Vec<_>>()
        .join(LINE_SEPARATOR)
}

/// Cards laid out row by row; `None` pads the last row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardGrid {
    pub cards_per_row: usize,
    pub rows: Vec<Vec<Option<Card>>>,
}

impl CardGrid {
    pub fn build(records: &[&Record], cards_per_row: usize) -> Self {
        let cards_per_row = clamp_cards_per_row(cards_per_row);
        let rows = records
            .chunks(cards_per_row)
            .map(|chunk| {
                let mut row: Vec<Option<Card>> =
                    chunk.iter().map(|record| Some(Card::from_record(record))).collect();
                row.resize(cards_per_row, None);
                row
            })
            .collect();

        Self {
            cards_per_row,
            rows,
        }
    }

    pub fn card_count(&self) -> usize {
        self.rows.iter().flatten().filter(|slot| slot.is_some()).count()
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.rows.iter().flatten().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| Record::from_fields([(Field::Song, format!("Song {}", i))]))
            .collect()
    }

    #[test]
    fn test_grid_pads_last_row() {
        let owned = records(7);
        let refs: Vec<&Record> = owned.iter().collect();
        let grid = CardGrid::build(&refs, 3);
        assert_eq!(grid.rows.len(), 3);
        assert!(grid.rows.iter().all(|row| row.len() == 3));
        assert_eq!(grid.card_count(), 7);
        assert!(grid.rows[2][0].is_some());
        assert!(grid.rows[2][1].is_none());
        assert!(grid.rows[2][2].is_none());
        assert_eq!(grid.cards().last().unwrap().title, "Song 6");
    }

    #[test]
    fn test_cards_per_row_clamped() {
        let owned = records(4);
        let refs: Vec<&Record> = owned.iter().collect();
        assert_eq!(CardGrid::build(&refs, 0).cards_per_row, 1);
        assert_eq!(CardGrid::build(&refs, 0).rows.len(), 4);
        assert_eq!(CardGrid::build(&refs, 9).cards_per_row, 3);
        assert_eq!(CardGrid::build(&refs, 2).rows.len(), 2);
    }

    #[test]
    fn test_empty_page_has_no_rows() {
        let grid = CardGrid::build(&[], 3);
        assert!(grid.rows.is_empty());
        assert_eq!(grid.card_count(), 0);
    }

    #[test]
    fn test_card_fields() {
        let record = Record::from_fields([
            (Field::Song, "Alma"),
            (Field::Album, "Boleros"),
            (Field::Format, "LP"),
            (Field::Year, "1960.0"),
            (Field::Genre, "Bolero"),
            (Field::Label, "Odeon"),
            (Field::Location, "Estante A"),
            (Field::Notes, "  "),
        ]);
        let card = Card::from_record(&record);
        assert_eq!(card.badge, FormatBadge::Vinyl);
        assert_eq!(card.title, "Alma");
        assert_eq!(card.album.as_deref(), Some("Boleros"));
        assert_eq!(card.performer, None);
        assert_eq!(card.year_genre, "1960 · Bolero");
        assert_eq!(card.label_catalog, "Odeon");
        assert_eq!(card.location_position, "Estante A");
        assert_eq!(card.notes, None);
    }

    #[test]
    fn test_missing_title_uses_placeholder() {
        let card = Card::from_record(&Record::from_fields([(Field::Album, "Boleros")]));
        assert_eq!(card.title, PLACEHOLDER);
        assert_eq!(card.badge.label(), PLACEHOLDER);
        assert_eq!(card.year_genre, "");
    }
}
