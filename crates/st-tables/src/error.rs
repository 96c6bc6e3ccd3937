//! Table lookup errors.

use std::path::PathBuf;

use st_core::StError;
use thiserror::Error;

use crate::property::TableKind;

/// Result type for table operations.
pub type TableResult<T> = Result<T, TableError>;

/// Errors raised while loading or querying property tables.
///
/// A query outside a table's range is not an error; it comes back as a
/// result whose value is `None`.
#[derive(Error, Debug)]
pub enum TableError {
    /// The table has no column for the requested property.
    #[error("Missing column: {column}")]
    MissingColumn { column: &'static str },

    /// A numeric property hit a text cell.
    #[error("Non-numeric cell in column {column} at row {row}")]
    NonNumericCell { column: &'static str, row: usize },

    /// The search mode does not fit the table shape.
    #[error("{table} table does not support {mode} search")]
    ModeMismatch {
        table: TableKind,
        mode: &'static str,
    },

    /// Malformed table text.
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Failed to read table file: {path}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Unit conversion or interpolation failure.
    #[error(transparent)]
    Core(#[from] StError),
}
