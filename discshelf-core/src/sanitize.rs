use crate::models::{Field, Record};
use crate::query::QueryResult;

/// A record is visually empty when every display field is null or blank.
pub fn is_visually_empty(record: &Record, display_fields: &[Field]) -> bool {
    display_fields
        .iter()
        .all(|field| record.non_blank(*field).is_none())
}

/// Drop visually empty records so reported counts match what is shown.
pub fn prune_empty_rows<'a>(records: QueryResult<'a>, display_fields: &[Field]) -> QueryResult<'a> {
    records.retain(|record| !is_visually_empty(record, display_fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Catalog;

    #[test]
    fn test_blank_and_null_rows_dropped() {
        let catalog = Catalog::new(vec![
            Record::new(),
            Record::from_fields([(Field::Song, "  "), (Field::Notes, "\t")]),
            Record::from_fields([(Field::Song, "Alma")]),
            Record::from_fields([(Field::Album, ""), (Field::Position, " 3 ")]),
        ]);
        let result = prune_empty_rows(catalog.iter().collect(), &Field::ALL);
        assert_eq!(result.len(), 2);
        assert_eq!(result.records()[0].get(Field::Song), Some("Alma"));
        assert_eq!(result.records()[1].get(Field::Position), Some(" 3 "));
    }

    #[test]
    fn test_only_display_fields_count() {
        let record = Record::from_fields([(Field::Notes, "hidden")]);
        assert!(is_visually_empty(&record, &[Field::Song, Field::Album]));
        assert!(!is_visually_empty(&record, &Field::ALL));
    }

    #[test]
    fn test_empty_input() {
        let result = prune_empty_rows(QueryResult::default(), &Field::ALL);
        assert!(result.is_empty());
    }
}
