pub mod file_ops;

pub use file_ops::{export_results, resolve_source};
