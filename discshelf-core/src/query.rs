use serde::Serialize;

use crate::filtering::{apply_filters, FilterState};
use crate::models::{Catalog, Record};
use crate::sanitize::prune_empty_rows;
use crate::search::apply_search;

/// Records of a catalog that pass the current filters, search and pruning,
/// in catalog order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct QueryResult<'a> {
    records: Vec<&'a Record>,
}

impl<'a> QueryResult<'a> {
    pub fn new(records: Vec<&'a Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[&'a Record] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn retain<F>(mut self, mut keep: F) -> Self
    where
        F: FnMut(&Record) -> bool,
    {
        self.records.retain(|record| keep(record));
        self
    }
}

impl<'a> FromIterator<&'a Record> for QueryResult<'a> {
    fn from_iter<I: IntoIterator<Item = &'a Record>>(iter: I) -> Self {
        QueryResult::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for QueryResult<'a> {
    type Item = &'a Record;
    type IntoIter = std::vec::IntoIter<&'a Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// Filters, then search, then empty-row pruning over the whole catalog.
pub fn run_query<'a>(catalog: &'a Catalog, filters: &FilterState, search: &str) -> QueryResult<'a> {
    let filtered = apply_filters(catalog.iter(), filters);
    let searched = apply_search(filtered, search);
    prune_empty_rows(searched, catalog.fields())
}
