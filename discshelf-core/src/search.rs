use unicode_normalization::UnicodeNormalization;

use crate::models::{Field, Record};
use crate::query::QueryResult;

/// Canonical composition followed by lowercasing, so "Corazón" typed with a
/// combining accent still matches the precomposed spelling.
pub fn fold_text(text: &str) -> String {
    text.nfc().collect::<String>().to_lowercase()
}

/// A free-text query reduced to its comparison form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    /// `None` for a blank query, which means "no search"
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self {
                needle: fold_text(trimmed),
            })
        }
    }

    /// True when any canonical field's display string contains the query.
    /// Null fields read as the empty string.
    pub fn matches(&self, record: &Record) -> bool {
        Field::ALL
            .into_iter()
            .any(|field| fold_text(&record.display(field)).contains(&self.needle))
    }
}

/// Keep the records matching `query`; a blank query keeps everything.
pub fn apply_search<'a>(records: QueryResult<'a>, query: &str) -> QueryResult<'a> {
    match SearchQuery::parse(query) {
        Some(query) => records.retain(|record| query.matches(record)),
        None => records,
    }
}
