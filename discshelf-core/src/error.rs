use std::fmt;
use std::path::{Path, PathBuf};

/// Errors raised while loading or exporting a catalog.
///
/// Query stages (filtering, search, pruning, pagination, presentation) never
/// produce one of these; they degrade to empty or clamped results instead.
#[derive(Debug)]
pub enum CatalogError {
    /// The catalog source does not exist. Fatal for the session.
    SourceNotFound(PathBuf),
    /// The file extension is not one the loader understands.
    UnsupportedFormat(PathBuf),
    /// The source has no header row.
    EmptySource(PathBuf),
    /// The spreadsheet reader rejected the workbook or sheet.
    Spreadsheet { path: PathBuf, message: String },
    Csv(csv::Error),
    Io(std::io::Error),
}

impl CatalogError {
    pub(crate) fn spreadsheet(path: &Path, message: impl fmt::Display) -> Self {
        CatalogError::Spreadsheet {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }

    /// Path of the resource the error refers to, when known
    pub fn path(&self) -> Option<&Path> {
        match self {
            CatalogError::SourceNotFound(path)
            | CatalogError::UnsupportedFormat(path)
            | CatalogError::EmptySource(path)
            | CatalogError::Spreadsheet { path, .. } => Some(path),
            CatalogError::Csv(_) | CatalogError::Io(_) => None,
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::SourceNotFound(path) => {
                write!(f, "catalog source not found: {}", path.display())
            }
            CatalogError::UnsupportedFormat(path) => {
                write!(f, "unsupported catalog format: {}", path.display())
            }
            CatalogError::EmptySource(path) => {
                write!(f, "catalog source has no header row: {}", path.display())
            }
            CatalogError::Spreadsheet { path, message } => {
                write!(f, "failed to read spreadsheet {}: {}", path.display(), message)
            }
            CatalogError::Csv(err) => write!(f, "csv error: {}", err),
            CatalogError::Io(err) => write!(f, "i/o error: {}", err),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Csv(err) => Some(err),
            CatalogError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<csv::Error> for CatalogError {
    fn from(err: csv::Error) -> Self {
        CatalogError::Csv(err)
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::Io(err)
    }
}
