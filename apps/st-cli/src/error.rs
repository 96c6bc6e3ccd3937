//! Error types for the command-line front end.

use std::path::PathBuf;

use st_core::StError;
use st_tables::TableError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Core(#[from] StError),

    #[error("Failed to read config file: {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Unknown unit '{unit}' for {kind}")]
    UnknownUnit { unit: String, kind: String },

    #[error("Unknown property: {0}")]
    UnknownProperty(String),

    #[error("{property} is not tabulated in the {table} table")]
    PropertyNotInTable { property: String, table: String },

    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Unknown quantity kind: {0}")]
    UnknownKind(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;
