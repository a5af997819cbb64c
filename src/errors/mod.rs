pub mod error_mapper;

pub use error_mapper::{format_error, map_export_error, map_load_error};
