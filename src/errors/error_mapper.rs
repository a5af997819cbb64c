use discshelf_core::CatalogError;
use std::path::Path;

/// Map catalog loading errors to user-friendly messages
/// Returns (title, message, details)
pub fn map_load_error(error: &CatalogError) -> (String, String, String) {
    match error {
        CatalogError::SourceNotFound(path) => (
            "Catalog Not Found".to_string(),
            "The catalog file could not be found.".to_string(),
            format!(
                "Expected: {}\n\nPlace the spreadsheet there, pass its path as an argument, or set [source] path in the config file.",
                path.display()
            ),
        ),
        CatalogError::UnsupportedFormat(path) => (
            "Unsupported Format".to_string(),
            "The catalog file type is not supported.".to_string(),
            format!(
                "Path: {}\n\nUse a spreadsheet (.xlsx, .xls, .xlsm, .xlsb, .ods) or a .csv file.",
                path.display()
            ),
        ),
        CatalogError::EmptySource(path) => (
            "Empty Catalog".to_string(),
            "The catalog file has no header row.".to_string(),
            format!("Path: {}", path.display()),
        ),
        CatalogError::Spreadsheet { path, message } => (
            "Spreadsheet Error".to_string(),
            "The spreadsheet could not be read.".to_string(),
            format!("Path: {}\n\n{}", path.display(), message),
        ),
        CatalogError::Csv(err) => (
            "CSV Error".to_string(),
            "The CSV file could not be parsed.".to_string(),
            err.to_string(),
        ),
        CatalogError::Io(err) if err.kind() == std::io::ErrorKind::PermissionDenied => (
            "Permission Denied".to_string(),
            "Permission denied.".to_string(),
            "You don't have permission to read the catalog file.".to_string(),
        ),
        CatalogError::Io(err) => (
            "Error Loading Catalog".to_string(),
            "Failed to load the catalog file.".to_string(),
            err.to_string(),
        ),
    }
}

/// Map export errors to user-friendly messages
/// Returns (title, message, details)
pub fn map_export_error(error: &CatalogError, path: &Path) -> (String, String, String) {
    match error {
        CatalogError::Io(err) if err.kind() == std::io::ErrorKind::PermissionDenied => (
            "Permission Denied".to_string(),
            "Permission denied.".to_string(),
            format!("You don't have permission to write to:\n{}", path.display()),
        ),
        CatalogError::Io(err) if err.kind() == std::io::ErrorKind::NotFound => (
            "Folder Not Found".to_string(),
            "The export folder does not exist.".to_string(),
            format!("Path: {}", path.display()),
        ),
        other => (
            "Error Exporting".to_string(),
            "Failed to export the current results.".to_string(),
            other.to_string(),
        ),
    }
}

/// Single block of text for terminal output
pub fn format_error(triple: &(String, String, String)) -> String {
    let (title, message, details) = triple;
    format!("{}: {}\n{}", title, message, details)
}
