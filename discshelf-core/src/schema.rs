use log::debug;

use crate::models::{Catalog, Field, RawTable, Record, FIELD_COUNT};

/// Known alternate spellings of the canonical headers, in resolution order.
///
/// The source spreadsheet uses Spanish headers, sometimes without accents or
/// with typos; the English variants cover exports from other tools.
pub const DEFAULT_ALIASES: &[(&str, Field)] = &[
    ("Álbum", Field::Album),
    ("Disco", Field::Album),
    ("Intérprete", Field::Performer),
    ("Interprete", Field::Performer),
    ("Interpréte", Field::Performer),
    ("Artista", Field::Performer),
    ("Artist", Field::Performer),
    ("Canción", Field::Song),
    ("Cancion", Field::Song),
    ("Canciòn", Field::Song),
    ("Tema", Field::Song),
    ("Title", Field::Song),
    ("Track", Field::Song),
    ("Duración", Field::Duration),
    ("Duracion", Field::Duration),
    ("Length", Field::Duration),
    ("Orquesta/Solista", Field::OrchestraSoloist),
    ("Orquesta / Solista", Field::OrchestraSoloist),
    ("Orquesta", Field::OrchestraSoloist),
    ("Solista", Field::OrchestraSoloist),
    ("Orchestra", Field::OrchestraSoloist),
    ("Orchestra / Soloist", Field::OrchestraSoloist),
    ("Compositor", Field::Composer),
    ("Compositores", Field::Composer),
    ("Género", Field::Genre),
    ("Genero", Field::Genre),
    ("Año", Field::Year),
    ("Ano", Field::Year),
    ("Anio", Field::Year),
    ("Formato", Field::Format),
    ("Sello", Field::Label),
    ("Discográfica", Field::Label),
    ("Discografica", Field::Label),
    ("Número de catálogo", Field::CatalogNumber),
    ("Numero de catalogo", Field::CatalogNumber),
    ("Nº de catálogo", Field::CatalogNumber),
    ("Catálogo", Field::CatalogNumber),
    ("Catalogo", Field::CatalogNumber),
    ("Catalog Number", Field::CatalogNumber),
    ("Catalogue Number", Field::CatalogNumber),
    ("Catalog #", Field::CatalogNumber),
    ("Ubicación", Field::Location),
    ("Ubicacion", Field::Location),
    ("Posición", Field::Position),
    ("Posicion", Field::Position),
    ("Notas", Field::Notes),
    ("Observaciones", Field::Notes),
];

/// Ordered `(alias -> canonical field)` pairs consulted once per load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    pairs: Vec<(String, Field)>,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self {
            pairs: DEFAULT_ALIASES
                .iter()
                .map(|(alias, field)| (clean_header(alias), *field))
                .collect(),
        }
    }
}

impl AliasTable {
    /// A table with no aliases at all
    pub fn empty() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append an alias after the existing ones
    pub fn push(&mut self, alias: impl AsRef<str>, field: Field) {
        self.pairs.push((clean_header(alias.as_ref()), field));
    }

    pub fn extend<I, S>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (S, Field)>,
        S: AsRef<str>,
    {
        for (alias, field) in pairs {
            self.push(alias, field);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Field)> {
        self.pairs.iter().map(|(alias, field)| (alias.as_str(), *field))
    }

    /// Resolve a user-typed field name: canonical names and aliases, ignoring
    /// case and surrounding whitespace
    pub fn resolve_name(&self, name: &str) -> Option<Field> {
        let wanted = clean_header(name).to_lowercase();
        Field::ALL
            .into_iter()
            .find(|field| field.name().to_lowercase() == wanted)
            .or_else(|| {
                self.pairs
                    .iter()
                    .find(|(alias, _)| alias.to_lowercase() == wanted)
                    .map(|(_, field)| *field)
            })
    }
}

/// What normalization changed in a table's header row
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SchemaReport {
    pub renamed: Vec<(String, Field)>,
    pub synthesized: Vec<Field>,
}

impl SchemaReport {
    pub fn is_clean(&self) -> bool {
        self.renamed.is_empty() && self.synthesized.is_empty()
    }
}

fn clean_header(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_string()
}

/// Parse a year cell as a number. Blank or non-numeric text yields `None`.
pub fn parse_year(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|year| year.is_finite())
}

/// Rename aliased headers and append any missing canonical columns.
///
/// An alias is only applied when its canonical header is absent, so real
/// canonical data is never overwritten. Running this on its own output
/// changes nothing.
pub fn normalize_table(raw: &RawTable, aliases: &AliasTable) -> (RawTable, SchemaReport) {
    let mut headers: Vec<String> = raw.headers.iter().map(|h| clean_header(h)).collect();
    let mut report = SchemaReport::default();

    for (alias, field) in aliases.iter() {
        if headers.iter().any(|h| h == field.name()) {
            continue;
        }
        if let Some(position) = headers.iter().position(|h| h == alias) {
            debug!("renaming column '{}' to '{}'", alias, field);
            headers[position] = field.name().to_string();
            report.renamed.push((alias.to_string(), field));
        }
    }

    for field in Field::ALL {
        if !headers.iter().any(|h| h == field.name()) {
            debug!("column '{}' missing from source, filling with nulls", field);
            headers.push(field.name().to_string());
            report.synthesized.push(field);
        }
    }

    let width = headers.len();
    let rows = raw
        .rows
        .iter()
        .map(|row| {
            let mut row = row.clone();
            row.resize(width, None);
            row
        })
        .collect();

    (RawTable::new(headers, rows), report)
}

/// Normalize a raw table and materialize its records in source order.
/// Columns that are not canonical after alias resolution are dropped.
pub fn build_catalog(raw: &RawTable, aliases: &AliasTable) -> Catalog {
    let (table, report) = normalize_table(raw, aliases);
    if !report.is_clean() {
        debug!(
            "schema normalized: {} renamed, {} synthesized",
            report.renamed.len(),
            report.synthesized.len()
        );
    }

    let mut columns = [0usize; FIELD_COUNT];
    for field in Field::ALL {
        // normalize_table guarantees every canonical header exists
        columns[field.index()] = table.column_index(field.name()).unwrap_or(usize::MAX);
    }

    table
        .rows
        .iter()
        .map(|row| {
            let values: [Option<String>; FIELD_COUNT] = std::array::from_fn(|i| {
                row.get(columns[i]).cloned().flatten()
            });
            Record::from_values(values)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_alias_renamed_when_canonical_absent() {
        let raw = RawTable::new(headers(&["Canción", "Intérprete"]), vec![vec![s("Alma"), s("X")]]);
        let catalog = build_catalog(&raw, &AliasTable::default());
        let record = &catalog.records()[0];
        assert_eq!(record.get(Field::Song), Some("Alma"));
        assert_eq!(record.get(Field::Performer), Some("X"));
    }

    #[test]
    fn test_canonical_wins_over_alias() {
        let raw = RawTable::new(
            headers(&["Cancion", "Song"]),
            vec![vec![s("from alias"), s("from canonical")]],
        );
        let (table, report) = normalize_table(&raw, &AliasTable::default());
        assert_eq!(table.headers[0], "Cancion");
        assert!(report.renamed.is_empty());

        let catalog = build_catalog(&raw, &AliasTable::default());
        assert_eq!(catalog.records()[0].get(Field::Song), Some("from canonical"));
    }

    #[test]
    fn test_first_alias_in_table_order_wins() {
        let raw = RawTable::new(
            headers(&["Orquesta", "Orquesta/Solista"]),
            vec![vec![s("short"), s("long")]],
        );
        let catalog = build_catalog(&raw, &AliasTable::default());
        assert_eq!(catalog.records()[0].get(Field::OrchestraSoloist), Some("long"));
    }

    #[test]
    fn test_headers_are_trimmed() {
        let raw = RawTable::new(headers(&["\u{feff} Song ", "  Año"]), vec![vec![s("Alma"), s("1960")]]);
        let catalog = build_catalog(&raw, &AliasTable::default());
        assert_eq!(catalog.records()[0].get(Field::Song), Some("Alma"));
        assert_eq!(catalog.records()[0].year_numeric(), Some(1960.0));
    }

    #[test]
    fn test_missing_fields_synthesized() {
        let raw = RawTable::new(headers(&["Song"]), vec![vec![s("Alma")], vec![]]);
        let (table, report) = normalize_table(&raw, &AliasTable::default());
        assert_eq!(table.headers.len(), 14);
        assert_eq!(report.synthesized.len(), 13);
        assert!(table.rows.iter().all(|row| row.len() == 14));

        let catalog = build_catalog(&raw, &AliasTable::default());
        assert_eq!(catalog.len(), 2);
        assert!(catalog.records()[1].values().all(|(_, v)| v.is_none()));
    }

    #[test]
    fn test_extra_columns_are_dropped() {
        let raw = RawTable::new(headers(&["Song", "Precio"]), vec![vec![s("Alma"), s("10")]]);
        let catalog = build_catalog(&raw, &AliasTable::default());
        let record = &catalog.records()[0];
        assert!(record.values().all(|(_, v)| v != Some("10")));
    }

    #[test]
    fn test_normalize_table_idempotent() {
        let raw = RawTable::new(
            headers(&["Cancion", "Interprete", "Formato", "Extra"]),
            vec![vec![s("Alma"), s("X"), s("Vinilo"), None]],
        );
        let aliases = AliasTable::default();
        let (once, _) = normalize_table(&raw, &aliases);
        let (twice, report) = normalize_table(&once, &aliases);
        assert_eq!(once, twice);
        assert!(report.is_clean());
    }

    #[test]
    fn test_catalog_rebuild_is_noop() {
        let raw = RawTable::new(
            headers(&["Canción", "Año"]),
            vec![vec![s("Alma"), s("1960")], vec![s("Corazón"), s("n/d")]],
        );
        let aliases = AliasTable::default();
        let catalog = build_catalog(&raw, &aliases);
        assert_eq!(build_catalog(&catalog.to_raw_table(), &aliases), catalog);
    }

    #[test]
    fn test_unparseable_year_is_null() {
        assert_eq!(parse_year("1975"), Some(1975.0));
        assert_eq!(parse_year("1975.0"), Some(1975.0));
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("s/f"), None);
        assert_eq!(parse_year("NaN"), None);
        assert_eq!(parse_year("inf"), None);
    }

    #[test]
    fn test_custom_alias_appended() {
        let mut aliases = AliasTable::default();
        aliases.push("Estante", Field::Location);
        let raw = RawTable::new(headers(&["Estante"]), vec![vec![s("A3")]]);
        let catalog = build_catalog(&raw, &aliases);
        assert_eq!(catalog.records()[0].get(Field::Location), Some("A3"));
    }

    #[test]
    fn test_resolve_name() {
        let aliases = AliasTable::default();
        assert_eq!(aliases.resolve_name("performer"), Some(Field::Performer));
        assert_eq!(aliases.resolve_name(" INTÉRPRETE "), Some(Field::Performer));
        assert_eq!(aliases.resolve_name("orchestra/soloist"), Some(Field::OrchestraSoloist));
        assert_eq!(aliases.resolve_name("precio"), None);
    }
}
