//! View-models for the two presentation modes. Rendering them (terminal,
//! HTML, widgets) is the host's job.

pub mod badge;
pub mod cards;
pub mod table;

pub use badge::{classify_format, FormatBadge};
pub use cards::{clamp_cards_per_row, Card, CardGrid, DEFAULT_CARDS_PER_ROW, MAX_CARDS_PER_ROW};
pub use table::{TableColumn, TableLayout, TableRow, TableView, TABLE_COLUMN_ORDER};

/// Shown in place of a missing title or format
pub const PLACEHOLDER: &str = "—";
