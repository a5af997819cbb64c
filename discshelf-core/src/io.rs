use calamine::{open_workbook_auto, Data, DataType, Reader};
use chrono::{Duration, NaiveDateTime, NaiveTime, SubsecRound};
use log::info;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::CatalogError;
use crate::export::DisplayTable;
use crate::models::{Catalog, RawTable};
use crate::schema::{build_catalog, AliasTable};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Source formats the loader understands, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Spreadsheet,
    Csv,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(SourceFormat::Spreadsheet),
            "csv" => Some(SourceFormat::Csv),
            _ => None,
        }
    }
}

/// Read the header row and cells of a catalog source.
///
/// `sheet` selects a worksheet by name or zero-based index; the first sheet
/// is used when it is `None`. It is ignored for CSV sources.
pub fn load_raw_table<P: AsRef<Path>>(path: P, sheet: Option<&str>) -> Result<RawTable, CatalogError> {
    let path = path.as_ref();
    match fs::metadata(path) {
        Ok(_) => {}
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(CatalogError::SourceNotFound(path.to_path_buf()));
        }
        Err(err) => return Err(err.into()),
    }

    let format = SourceFormat::from_path(path)
        .ok_or_else(|| CatalogError::UnsupportedFormat(path.to_path_buf()))?;

    let table = match format {
        SourceFormat::Spreadsheet => read_spreadsheet(path, sheet)?,
        SourceFormat::Csv => read_csv(File::open(path)?, path)?,
    };

    if table.headers.is_empty() {
        return Err(CatalogError::EmptySource(path.to_path_buf()));
    }
    Ok(table)
}

/// Load and normalize a catalog source
pub fn load_catalog<P: AsRef<Path>>(
    path: P,
    sheet: Option<&str>,
    aliases: &AliasTable,
) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let raw = load_raw_table(path, sheet)?;
    let catalog = build_catalog(&raw, aliases);
    info!("loaded {} records from {}", catalog.len(), path.display());
    Ok(catalog)
}

fn read_spreadsheet(path: &Path, sheet: Option<&str>) -> Result<RawTable, CatalogError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| CatalogError::spreadsheet(path, e))?;

    let range = match sheet {
        Some(selector) => match selector.parse::<usize>() {
            Ok(index) => workbook
                .worksheet_range_at(index)
                .ok_or_else(|| CatalogError::spreadsheet(path, format!("no sheet at index {}", index)))?
                .map_err(|e| CatalogError::spreadsheet(path, e))?,
            Err(_) => workbook
                .worksheet_range(selector)
                .map_err(|e| CatalogError::spreadsheet(path, e))?,
        },
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| CatalogError::spreadsheet(path, "workbook has no worksheets"))?
            .map_err(|e| CatalogError::spreadsheet(path, e))?,
    };

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|cell| cell_to_string(cell).unwrap_or_default())
            .collect(),
        None => Vec::new(),
    };
    let rows = rows
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    Ok(RawTable::new(headers, rows))
}

/// Spreadsheet cell as text. Empty, error and blank text cells are null,
/// matching empty CSV fields.
fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(value) if value.is_empty() => None,
        Data::String(value) => Some(value.clone()),
        Data::Float(value) => Some(value.to_string()),
        Data::Int(value) => Some(value.to_string()),
        Data::Bool(value) => Some(value.to_string()),
        other => Some(temporal_to_string(other).unwrap_or_else(|| other.to_string())),
    }
}

/// Date and time cells the way a spreadsheet shows them: serials below one
/// day are a time of day, duration formats are elapsed `[h]:mm:ss`, and
/// anything else is an ISO date, with the time when it is not midnight.
fn temporal_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::DateTime(value) if value.is_duration() => {
            let millis = (value.as_f64() * SECONDS_PER_DAY * 1000.0).round() as i64;
            Some(format_elapsed(Duration::milliseconds(millis)))
        }
        Data::DateTime(value) if (0.0..1.0).contains(&value.as_f64()) => {
            time_of_day(value.as_f64()).map(|time| time.format("%H:%M:%S").to_string())
        }
        Data::DurationIso(_) => cell.as_duration().map(format_elapsed),
        _ => cell
            .as_datetime()
            .map(|datetime| format_datetime(datetime.round_subsecs(0))),
    }
}

fn time_of_day(serial: f64) -> Option<NaiveTime> {
    let seconds = (serial * SECONDS_PER_DAY).round() as u32 % 86_400;
    NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
}

fn format_elapsed(duration: Duration) -> String {
    let millis = duration.num_milliseconds();
    let sign = if millis < 0 { "-" } else { "" };
    let seconds = (millis.unsigned_abs() + 500) / 1000;
    format!(
        "{}{:02}:{:02}:{:02}",
        sign,
        seconds / 3600,
        seconds / 60 % 60,
        seconds % 60
    )
}

fn format_datetime(datetime: NaiveDateTime) -> String {
    if datetime.time() == NaiveTime::MIN {
        datetime.format("%Y-%m-%d").to_string()
    } else {
        datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Read a CSV source with a header row. Empty fields are null.
pub fn read_csv<R: std::io::Read>(reader: R, path: &Path) -> Result<RawTable, CatalogError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() {
        return Err(CatalogError::EmptySource(path.to_path_buf()));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        None
                    } else {
                        Some(field.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(RawTable::new(headers, rows))
}

/// Write a display table as UTF-8 CSV preceded by a byte-order mark, so
/// spreadsheet applications detect the encoding.
pub fn write_csv<W: Write>(table: &DisplayTable, mut writer: W) -> Result<(), CatalogError> {
    writer.write_all(UTF8_BOM)?;
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(&table.headers)?;
    for row in &table.rows {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write a display table to a CSV file
pub fn save_csv<P: AsRef<Path>>(table: &DisplayTable, path: P) -> Result<(), CatalogError> {
    let file = File::create(path.as_ref())?;
    write_csv(table, BufWriter::new(file))?;
    info!("exported {} rows to {}", table.len(), path.as_ref().display());
    Ok(())
}
