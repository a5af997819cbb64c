use serde::Serialize;
use std::collections::BTreeSet;

use crate::models::{Field, Record};

/// Synthetic choice meaning "no constraint on this facet"
pub const ALL_SENTINEL: &str = "(All)";

/// Facet fields offered by default, in the order filters are applied
pub const DEFAULT_FACETS: [Field; 4] = [
    Field::Song,
    Field::Performer,
    Field::OrchestraSoloist,
    Field::Composer,
];

/// Distinct values of one facet field, ordinal-sorted, without nulls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetChoices {
    pub field: Field,
    values: Vec<String>,
}

impl FacetChoices {
    pub fn from_records<'a, I>(field: Field, records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let distinct: BTreeSet<&str> = records
            .into_iter()
            .filter_map(|record| record.get(field))
            .collect();

        Self {
            field,
            values: distinct.into_iter().map(str::to_string).collect(),
        }
    }

    /// Data values only, without the sentinel
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// The choice list as offered to the user: the sentinel, then the values
    pub fn options(&self) -> Vec<&str> {
        std::iter::once(ALL_SENTINEL)
            .chain(self.values.iter().map(String::as_str))
            .collect()
    }
}

/// Choice lists for every configured facet, computed once per load.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FacetIndex {
    facets: Vec<FacetChoices>,
}

impl FacetIndex {
    pub fn build<'a, I>(records: I, fields: &[Field]) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
        I::IntoIter: Clone,
    {
        let records = records.into_iter();
        Self {
            facets: fields
                .iter()
                .map(|field| FacetChoices::from_records(*field, records.clone()))
                .collect(),
        }
    }

    pub fn choices(&self, field: Field) -> Option<&FacetChoices> {
        self.facets.iter().find(|choices| choices.field == field)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.facets.iter().map(|choices| choices.field)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FacetChoices> {
        self.facets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Catalog;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Record::from_fields([(Field::Performer, "Y"), (Field::Song, "Corazón")]),
            Record::from_fields([(Field::Performer, "X"), (Field::Song, "Alma")]),
            Record::from_fields([(Field::Performer, "X")]),
            Record::from_fields([(Field::Performer, "a")]),
        ])
    }

    #[test]
    fn test_choices_sorted_distinct_with_sentinel() {
        let catalog = catalog();
        let index = FacetIndex::build(catalog.iter(), &DEFAULT_FACETS);

        let performers = index.choices(Field::Performer).unwrap();
        // ordinal order puts upper case before lower case
        assert_eq!(performers.options(), vec![ALL_SENTINEL, "X", "Y", "a"]);
        assert_eq!(performers.values().len(), 3);
    }

    #[test]
    fn test_nulls_are_not_choices() {
        let catalog = catalog();
        let index = FacetIndex::build(catalog.iter(), &DEFAULT_FACETS);
        let songs = index.choices(Field::Song).unwrap();
        assert_eq!(songs.options(), vec![ALL_SENTINEL, "Alma", "Corazón"]);

        let composers = index.choices(Field::Composer).unwrap();
        assert_eq!(composers.options(), vec![ALL_SENTINEL]);
    }

    #[test]
    fn test_only_configured_fields_indexed() {
        let catalog = catalog();
        let index = FacetIndex::build(catalog.iter(), &[Field::Song]);
        assert!(index.choices(Field::Performer).is_none());
        assert_eq!(index.fields().collect::<Vec<_>>(), vec![Field::Song]);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::default();
        let index = FacetIndex::build(catalog.iter(), &DEFAULT_FACETS);
        for choices in index.iter() {
            assert_eq!(choices.options(), vec![ALL_SENTINEL]);
        }
    }
}
