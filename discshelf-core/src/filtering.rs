use serde::{Deserialize, Serialize};

use crate::facets::{ALL_SENTINEL, DEFAULT_FACETS};
use crate::models::{Field, Record};
use crate::query::QueryResult;
use crate::schema::AliasTable;

/// The chosen value of one facet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FacetSelection {
    #[default]
    All,
    Value(String),
}

impl FacetSelection {
    pub fn value(value: impl Into<String>) -> Self {
        FacetSelection::Value(value.into())
    }

    /// Interpret an entry of a choice list; the sentinel means no constraint
    pub fn from_choice(choice: &str) -> Self {
        if choice == ALL_SENTINEL {
            FacetSelection::All
        } else {
            FacetSelection::Value(choice.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, FacetSelection::All)
    }

    pub fn label(&self) -> &str {
        match self {
            FacetSelection::All => ALL_SENTINEL,
            FacetSelection::Value(value) => value,
        }
    }

    /// Exact, case-sensitive match; a null value never matches a selection
    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            FacetSelection::All => true,
            FacetSelection::Value(wanted) => value == Some(wanted.as_str()),
        }
    }
}

/// Per-facet selections, kept in the order the filters are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    selections: Vec<(Field, FacetSelection)>,
}

impl Default for FilterState {
    fn default() -> Self {
        FilterState::new(&DEFAULT_FACETS)
    }
}

impl FilterState {
    /// Every listed facet starts at `(All)`
    pub fn new(facets: &[Field]) -> Self {
        let mut selections: Vec<(Field, FacetSelection)> = Vec::with_capacity(facets.len());
        for field in facets {
            if !selections.iter().any(|(f, _)| f == field) {
                selections.push((*field, FacetSelection::All));
            }
        }
        Self { selections }
    }

    /// Set a facet; a field not yet known is appended after the others
    pub fn select(&mut self, field: Field, selection: FacetSelection) {
        match self.selections.iter_mut().find(|(f, _)| *f == field) {
            Some((_, current)) => *current = selection,
            None => self.selections.push((field, selection)),
        }
    }

    pub fn clear(&mut self, field: Field) {
        if let Some((_, current)) = self.selections.iter_mut().find(|(f, _)| *f == field) {
            *current = FacetSelection::All;
        }
    }

    pub fn clear_all(&mut self) {
        for (_, selection) in &mut self.selections {
            *selection = FacetSelection::All;
        }
    }

    pub fn selection(&self, field: Field) -> Option<&FacetSelection> {
        self.selections
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, selection)| selection)
    }

    pub fn facets(&self) -> impl Iterator<Item = Field> + '_ {
        self.selections.iter().map(|(field, _)| *field)
    }

    /// Constrained facets with their chosen value, in application order
    pub fn active(&self) -> impl Iterator<Item = (Field, &str)> {
        self.selections
            .iter()
            .filter_map(|(field, selection)| match selection {
                FacetSelection::All => None,
                FacetSelection::Value(value) => Some((*field, value.as_str())),
            })
    }

    pub fn has_filters(&self) -> bool {
        self.active().next().is_some()
    }
}

/// Keep only the records matching every active facet, preserving order.
pub fn apply_filters<'a, I>(records: I, filters: &FilterState) -> QueryResult<'a>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter(|record| matches_filters(record, filters))
        .collect()
}

/// Check if a record matches the given filters (AND across facets)
pub fn matches_filters(record: &Record, filters: &FilterState) -> bool {
    filters
        .active()
        .all(|(field, wanted)| record.get(field) == Some(wanted))
}

/// Parse facet filter strings in the format "name=value".
///
/// Names resolve through the canonical field names and the alias table,
/// ignoring case. The value is taken verbatim after the first '='.
/// Every malformed entry is reported.
pub fn parse_facet_selections(
    facet_strings: &[String],
    aliases: &AliasTable,
) -> Result<Vec<(Field, FacetSelection)>, Vec<String>> {
    let mut selections = Vec::new();
    let mut errors = Vec::new();

    for facet_str in facet_strings {
        match facet_str.split_once('=') {
            Some((name, value)) => match aliases.resolve_name(name) {
                Some(field) => selections.push((field, FacetSelection::from_choice(value))),
                None => errors.push(format!("Unknown field '{}' in '{}'", name.trim(), facet_str)),
            },
            None => errors.push(format!(
                "Invalid facet format '{}'. Expected 'name=value'",
                facet_str
            )),
        }
    }

    if errors.is_empty() {
        Ok(selections)
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Catalog;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Record::from_fields([
                (Field::Song, "Alma"),
                (Field::Performer, "X"),
                (Field::Composer, "Lara"),
            ]),
            Record::from_fields([(Field::Song, "Corazón"), (Field::Performer, "Y")]),
            Record::from_fields([
                (Field::Song, "Alma"),
                (Field::Performer, "Y"),
                (Field::Composer, "Lara"),
            ]),
        ])
    }

    #[test]
    fn test_no_filters_keeps_everything_in_order() {
        let catalog = catalog();
        let result = apply_filters(catalog.iter(), &FilterState::default());
        assert_eq!(result.len(), 3);
        assert!(std::ptr::eq(result.records()[0], &catalog.records()[0]));
        assert!(std::ptr::eq(result.records()[2], &catalog.records()[2]));
    }

    #[test]
    fn test_filters_combine_with_and() {
        let catalog = catalog();
        let mut filters = FilterState::default();
        filters.select(Field::Song, FacetSelection::value("Alma"));
        assert_eq!(apply_filters(catalog.iter(), &filters).len(), 2);

        filters.select(Field::Performer, FacetSelection::value("Y"));
        let result = apply_filters(catalog.iter(), &filters);
        assert_eq!(result.len(), 1);
        assert!(std::ptr::eq(result.records()[0], &catalog.records()[2]));
    }

    #[test]
    fn test_exact_case_sensitive_match() {
        let catalog = catalog();
        let mut filters = FilterState::default();
        filters.select(Field::Performer, FacetSelection::value("x"));
        assert!(apply_filters(catalog.iter(), &filters).is_empty());

        filters.select(Field::Performer, FacetSelection::value(" X"));
        assert!(apply_filters(catalog.iter(), &filters).is_empty());
    }

    #[test]
    fn test_unknown_selection_yields_nothing() {
        let catalog = catalog();
        let mut filters = FilterState::default();
        filters.select(Field::Composer, FacetSelection::value("Piazzolla"));
        assert!(apply_filters(catalog.iter(), &filters).is_empty());
    }

    #[test]
    fn test_null_never_matches_selection() {
        let catalog = catalog();
        let mut filters = FilterState::default();
        filters.select(Field::Composer, FacetSelection::value(""));
        assert!(apply_filters(catalog.iter(), &filters).is_empty());
    }

    #[test]
    fn test_matches_filters_agrees_with_apply() {
        let catalog = catalog();
        let mut filters = FilterState::default();
        filters.select(Field::Composer, FacetSelection::value("Lara"));
        let expected: Vec<bool> = catalog.iter().map(|r| matches_filters(r, &filters)).collect();
        assert_eq!(expected, vec![true, false, true]);
    }

    #[test]
    fn test_sentinel_choice_is_all() {
        assert_eq!(FacetSelection::from_choice(ALL_SENTINEL), FacetSelection::All);
        assert_eq!(FacetSelection::from_choice("X"), FacetSelection::value("X"));
        assert_eq!(FacetSelection::All.label(), ALL_SENTINEL);
    }

    #[test]
    fn test_clear_and_has_filters() {
        let mut filters = FilterState::default();
        assert!(!filters.has_filters());
        filters.select(Field::Song, FacetSelection::value("Alma"));
        filters.select(Field::Genre, FacetSelection::value("Tango"));
        assert!(filters.has_filters());
        assert_eq!(filters.facets().last(), Some(Field::Genre));

        filters.clear(Field::Song);
        assert_eq!(filters.active().collect::<Vec<_>>(), vec![(Field::Genre, "Tango")]);
        filters.clear_all();
        assert!(!filters.has_filters());
    }

    #[test]
    fn test_default_facet_order() {
        let filters = FilterState::default();
        assert_eq!(filters.facets().collect::<Vec<_>>(), DEFAULT_FACETS.to_vec());
    }

    #[test]
    fn test_parse_facet_selections() {
        let aliases = AliasTable::default();
        let parsed = parse_facet_selections(
            &["performer=X".to_string(), "Intérprete=Y=Z".to_string(), "song=(All)".to_string()],
            &aliases,
        )
        .unwrap();
        assert_eq!(
            parsed,
            vec![
                (Field::Performer, FacetSelection::value("X")),
                (Field::Performer, FacetSelection::value("Y=Z")),
                (Field::Song, FacetSelection::All),
            ]
        );
    }

    #[test]
    fn test_parse_facet_selections_reports_every_error() {
        let aliases = AliasTable::default();
        let errors = parse_facet_selections(
            &["performer".to_string(), "precio=10".to_string(), "song=Alma".to_string()],
            &aliases,
        )
        .unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("Expected 'name=value'"));
        assert!(errors[1].contains("precio"));
    }
}
