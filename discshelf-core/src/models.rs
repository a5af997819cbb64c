use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

use crate::schema::parse_year;

/// Number of canonical fields every record carries
pub const FIELD_COUNT: usize = 14;

/// The canonical record attributes, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    Album,
    Performer,
    Song,
    Duration,
    #[serde(rename = "Orchestra/Soloist")]
    OrchestraSoloist,
    Composer,
    Genre,
    Year,
    Format,
    Label,
    CatalogNumber,
    Location,
    Position,
    Notes,
}

impl Field {
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::Album,
        Field::Performer,
        Field::Song,
        Field::Duration,
        Field::OrchestraSoloist,
        Field::Composer,
        Field::Genre,
        Field::Year,
        Field::Format,
        Field::Label,
        Field::CatalogNumber,
        Field::Location,
        Field::Position,
        Field::Notes,
    ];

    /// Canonical header name
    pub fn name(self) -> &'static str {
        match self {
            Field::Album => "Album",
            Field::Performer => "Performer",
            Field::Song => "Song",
            Field::Duration => "Duration",
            Field::OrchestraSoloist => "Orchestra/Soloist",
            Field::Composer => "Composer",
            Field::Genre => "Genre",
            Field::Year => "Year",
            Field::Format => "Format",
            Field::Label => "Label",
            Field::CatalogNumber => "CatalogNumber",
            Field::Location => "Location",
            Field::Position => "Position",
            Field::Notes => "Notes",
        }
    }

    /// Exact lookup by canonical header name
    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.name() == name)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One catalog entry: every canonical field, each possibly null, plus the
/// numeric year derived from `Year`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    values: [Option<String>; FIELD_COUNT],
    year_numeric: Option<f64>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(field, value)` pairs; unspecified fields are null.
    pub fn from_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (Field, S)>,
        S: Into<String>,
    {
        let mut record = Record::new();
        for (field, value) in fields {
            record.values[field.index()] = Some(value.into());
        }
        record.refresh_year();
        record
    }

    pub(crate) fn from_values(values: [Option<String>; FIELD_COUNT]) -> Self {
        let mut record = Record {
            values,
            year_numeric: None,
        };
        record.refresh_year();
        record
    }

    fn refresh_year(&mut self) {
        self.year_numeric = self.get(Field::Year).and_then(parse_year);
    }

    /// Raw value of a field, `None` when null
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values[field.index()].as_deref()
    }

    /// Display-string form of a field; null renders as the empty string.
    /// An integral numeric year is shown without a fractional part.
    pub fn display(&self, field: Field) -> Cow<'_, str> {
        if field == Field::Year {
            if let Some(year) = self.year_numeric {
                if year.fract() == 0.0 {
                    return Cow::Owned(year.to_string());
                }
            }
        }
        Cow::Borrowed(self.get(field).unwrap_or(""))
    }

    /// Value with surrounding whitespace removed, `None` when null or blank
    pub fn non_blank(&self, field: Field) -> Option<&str> {
        self.get(field).map(str::trim).filter(|value| !value.is_empty())
    }

    pub fn year_numeric(&self) -> Option<f64> {
        self.year_numeric
    }

    pub fn values(&self) -> impl Iterator<Item = (Field, Option<&str>)> {
        Field::ALL.into_iter().map(move |field| (field, self.get(field)))
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FIELD_COUNT + 1))?;
        for (field, value) in self.values() {
            map.serialize_entry(field.name(), &value)?;
        }
        map.serialize_entry("YearNumeric", &self.year_numeric)?;
        map.end()
    }
}

/// The normalized, immutable record set for one load of a source.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Catalog {
    records: Vec<Record>,
}

impl Catalog {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fields of the active schema. After normalization this is always the
    /// full canonical set.
    pub fn fields(&self) -> &'static [Field] {
        &Field::ALL
    }

    /// Tabular form with canonical headers, suitable for re-normalization
    pub fn to_raw_table(&self) -> RawTable {
        RawTable {
            headers: Field::ALL.iter().map(|f| f.name().to_string()).collect(),
            rows: self
                .records
                .iter()
                .map(|record| record.values.to_vec())
                .collect(),
        }
    }
}

impl FromIterator<Record> for Catalog {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Catalog::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Header row plus cells as read from a source, before normalization.
/// Rows may be shorter than the header; missing cells are null.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { headers, rows }
    }

    /// Index of the first column with exactly this header
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .and_then(|cell| cell.as_deref())
    }
}
