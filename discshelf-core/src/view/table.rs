use serde::{Deserialize, Serialize};

use super::badge::{classify_format, FormatBadge};
use crate::models::{Field, Record, FIELD_COUNT};

/// Table column order. Format comes first and is shown as a badge.
pub const TABLE_COLUMN_ORDER: [Field; FIELD_COUNT] = [
    Field::Format,
    Field::Album,
    Field::Performer,
    Field::Song,
    Field::Duration,
    Field::OrchestraSoloist,
    Field::Composer,
    Field::Year,
    Field::Genre,
    Field::Label,
    Field::CatalogNumber,
    Field::Location,
    Field::Position,
    Field::Notes,
];

/// Pixel metrics used to size the table viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableLayout {
    pub min_height: u32,
    pub header_height: u32,
    pub row_height: u32,
    pub max_height: u32,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            min_height: 140,
            header_height: 42,
            row_height: 38,
            max_height: 700,
        }
    }
}

impl TableLayout {
    /// Viewport height for `row_count` rows. An empty table is sized as one row.
    pub fn height(&self, row_count: usize) -> u32 {
        let rows = u32::try_from(row_count.max(1)).unwrap_or(u32::MAX);
        let natural = self
            .header_height
            .saturating_add(self.row_height.saturating_mul(rows));
        natural.max(self.min_height).min(self.max_height.max(self.min_height))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableColumn {
    pub field: Field,
    /// Empty for the format column, whose badge speaks for itself
    pub header: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub badge: FormatBadge,
    /// One display string per column, aligned with `TableView::columns`
    pub cells: Vec<String>,
}

/// Everything a host needs to draw the dense table view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<TableRow>,
    pub height: u32,
}

impl TableView {
    pub fn build<'a, I>(records: I, active_fields: &[Field], layout: &TableLayout) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let fields: Vec<Field> = TABLE_COLUMN_ORDER
            .into_iter()
            .filter(|field| active_fields.contains(field))
            .collect();

        let columns = fields
            .iter()
            .map(|field| TableColumn {
                field: *field,
                header: if *field == Field::Format {
                    String::new()
                } else {
                    field.name().to_string()
                },
            })
            .collect();

        let rows: Vec<TableRow> = records
            .into_iter()
            .map(|record| TableRow {
                badge: classify_format(record.get(Field::Format)),
                cells: fields
                    .iter()
                    .map(|field| record.display(*field).into_owned())
                    .collect(),
            })
            .collect();

        let height = layout.height(rows.len());
        Self {
            columns,
            rows,
            height,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
