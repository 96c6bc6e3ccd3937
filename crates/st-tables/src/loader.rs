//! Reading reference tables from delimited text files.
//!
//! The shipped files open with a fixed-height title block, followed by one
//! header row and one record per line. Cells that parse as numbers become
//! [`CellValue::Number`](crate::table::CellValue::Number); everything else
//! is kept as text.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{TableError, TableResult};
use crate::property::TableKind;
use crate::table::PropertyTable;

/// Layout of the table files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Lines before the header row.
    pub title_block_lines: usize,
    pub delimiter: char,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            title_block_lines: 6,
            delimiter: ',',
        }
    }
}

/// Parse table text of the given shape.
pub fn parse_table(text: &str, kind: TableKind, config: &LoaderConfig) -> TableResult<PropertyTable> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.lines().enumerate().skip(config.title_block_lines);

    let (header_idx, header_line) = lines.next().ok_or_else(|| TableError::Parse {
        line: config.title_block_lines + 1,
        message: "missing header row".to_string(),
    })?;
    let headers = split_record(header_line, config.delimiter, header_idx + 1)?;

    let mut records = Vec::new();
    for (idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_record(line, config.delimiter, idx + 1)?;
        if fields.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        if fields.len() < headers.len() {
            return Err(TableError::Parse {
                line: idx + 1,
                message: format!(
                    "expected {} fields, found {}",
                    headers.len(),
                    fields.len()
                ),
            });
        }
        records.push(fields);
    }

    let table = PropertyTable::from_records(kind, &headers, records)?;
    debug!(%kind, rows = table.len(), columns = table.properties().len(), "parsed table");
    Ok(table)
}

/// Read and parse one table file.
pub fn load_table(path: &Path, kind: TableKind, config: &LoaderConfig) -> TableResult<PropertyTable> {
    let text = std::fs::read_to_string(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = parse_table(&text, kind, config)?;
    info!(path = %path.display(), %kind, rows = table.len(), "loaded table");
    Ok(table)
}

/// Split one line on `delimiter`, honouring double quotes (`""` escapes a quote).
fn split_record(line: &str, delimiter: char, line_no: usize) -> TableResult<Vec<String>> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            c if c == delimiter && !in_quotes => fields.push(std::mem::take(&mut field)),
            c => field.push(c),
        }
    }
    if in_quotes {
        return Err(TableError::Parse {
            line: line_no,
            message: "unterminated quoted field".to_string(),
        });
    }
    fields.push(field);
    Ok(fields)
}

/// The three reference tables, loaded together.
#[derive(Debug, Clone)]
pub struct TableSet {
    pub saturation_by_temperature: PropertyTable,
    pub saturation_by_pressure: PropertyTable,
    pub compressed_superheated: PropertyTable,
}

impl TableSet {
    /// Load every table from `dir` using the default file names.
    pub fn load_dir(dir: &Path, config: &LoaderConfig) -> TableResult<Self> {
        let load = |kind: TableKind| load_table(&Self::path_in(dir, kind), kind, config);
        Ok(Self {
            saturation_by_temperature: load(TableKind::SaturationByTemperature)?,
            saturation_by_pressure: load(TableKind::SaturationByPressure)?,
            compressed_superheated: load(TableKind::CompressedSuperheated)?,
        })
    }

    pub fn path_in(dir: &Path, kind: TableKind) -> PathBuf {
        dir.join(kind.default_file_name())
    }

    pub fn get(&self, kind: TableKind) -> &PropertyTable {
        match kind {
            TableKind::SaturationByTemperature => &self.saturation_by_temperature,
            TableKind::SaturationByPressure => &self.saturation_by_pressure,
            TableKind::CompressedSuperheated => &self.compressed_superheated,
        }
    }
}
