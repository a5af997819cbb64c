use serde::Serialize;

use crate::models::{Field, Record};
use crate::view::TABLE_COLUMN_ORDER;

/// A query result reduced to display columns, ready for a serializer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DisplayTable {
    /// Columns follow the table view order; every header is named.
    pub fn from_records<'a, I>(records: I, active_fields: &[Field]) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let fields: Vec<Field> = TABLE_COLUMN_ORDER
            .into_iter()
            .filter(|field| active_fields.contains(field))
            .collect();

        Self {
            headers: fields.iter().map(|f| f.name().to_string()).collect(),
            rows: records
                .into_iter()
                .map(|record| {
                    fields
                        .iter()
                        .map(|field| record.display(*field).into_owned())
                        .collect()
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_follow_table_order() {
        let table = DisplayTable::from_records(std::iter::empty::<&Record>(), &Field::ALL);
        assert_eq!(table.headers[0], "Format");
        assert_eq!(table.headers[1], "Album");
        assert_eq!(table.headers.len(), 14);
        assert!(table.is_empty());
    }

    #[test]
    fn test_rows_are_display_strings() {
        let records = [Record::from_fields([
            (Field::Format, "CD"),
            (Field::Song, "Corazón"),
            (Field::Year, "1961.0"),
        ])];
        let table = DisplayTable::from_records(records.iter(), &[Field::Song, Field::Format, Field::Year]);
        assert_eq!(table.headers, vec!["Format", "Song", "Year"]);
        assert_eq!(table.rows, vec![vec!["CD", "Corazón", "1961"]]);
    }
}
