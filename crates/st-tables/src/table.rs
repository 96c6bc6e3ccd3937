//! Immutable in-memory property tables.

use core::fmt;
use std::collections::HashMap;

use st_core::{Tolerances, nearly_equal};
use tracing::debug;

use crate::error::{TableError, TableResult};
use crate::property::{PropertyKey, TableKind};

/// One table cell: a number in the table's native unit, or free text.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum CellValue {
    Number(f64),
    Label(String),
}

impl CellValue {
    /// Numeric when the trimmed text parses as `f64`, otherwise kept as text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<f64>() {
            Ok(v) => Self::Number(v),
            Err(_) => Self::Label(trimmed.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Label(_) => None,
        }
    }

    pub fn as_label(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Label(s) => Some(s),
        }
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Label(s.to_string())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Label(s) => f.write_str(s),
        }
    }
}

/// Cells of one record, addressed by column index.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    cells: Vec<CellValue>,
}

impl TableRow {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells }
    }

    pub fn cell(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Resolved location of one property inside a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub key: PropertyKey,
    pub index: usize,
}

/// An ordered, read-only collection of records of one [`TableKind`].
///
/// The property-to-column mapping is fixed at construction; rows carry no
/// ordering guarantee.
#[derive(Debug, Clone)]
pub struct PropertyTable {
    kind: TableKind,
    columns: HashMap<PropertyKey, usize>,
    rows: Vec<TableRow>,
}

impl PropertyTable {
    /// Build a table whose `i`-th cell in every row belongs to `keys[i]`.
    pub fn new(
        kind: TableKind,
        keys: &[PropertyKey],
        rows: Vec<Vec<CellValue>>,
    ) -> TableResult<Self> {
        let columns = keys
            .iter()
            .enumerate()
            .map(|(index, key)| (*key, index))
            .collect();
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(idx, cells)| {
                if cells.len() < keys.len() {
                    Err(TableError::Parse {
                        line: idx + 1,
                        message: format!("expected {} cells, found {}", keys.len(), cells.len()),
                    })
                } else {
                    Ok(TableRow::new(cells))
                }
            })
            .collect::<TableResult<Vec<_>>>()?;
        Ok(Self {
            kind,
            columns,
            rows,
        })
    }

    /// Build a table from raw header labels and rows of raw cell text.
    ///
    /// Headers that name no known property are skipped. Fails with
    /// `MissingColumn` when an axis column of `kind` has no header.
    pub fn from_records<H, R>(kind: TableKind, headers: &[H], records: R) -> TableResult<Self>
    where
        H: AsRef<str>,
        R: IntoIterator<Item = Vec<String>>,
    {
        let mut columns = HashMap::new();
        for (index, header) in headers.iter().enumerate() {
            match PropertyKey::from_column(header.as_ref()) {
                Some(key) => {
                    columns.entry(key).or_insert(index);
                }
                None => debug!(header = header.as_ref(), "ignoring unknown column"),
            }
        }
        if let Some(key) = kind.axes().iter().find(|key| !columns.contains_key(*key)) {
            return Err(TableError::MissingColumn {
                column: key.column(),
            });
        }
        let rows = records
            .into_iter()
            .map(|raw| TableRow::new(raw.iter().map(|cell| CellValue::parse(cell)).collect()))
            .collect();
        Ok(Self {
            kind,
            columns,
            rows,
        })
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, key: PropertyKey) -> bool {
        self.columns.contains_key(&key)
    }

    pub fn column(&self, key: PropertyKey) -> TableResult<Column> {
        self.columns
            .get(&key)
            .map(|&index| Column { key, index })
            .ok_or(TableError::MissingColumn {
                column: key.column(),
            })
    }

    /// Properties present in this table, in column order.
    /// Tabulated `key` value closest to `value`, if one lies within `tol`.
    pub fn nearest_tabulated(
        &self,
        key: PropertyKey,
        value: f64,
        tol: Tolerances,
    ) -> TableResult<Option<f64>> {
        let column = self.column(key)?;
        let mut best: Option<f64> = None;
        for (idx, row) in self.rows.iter().enumerate() {
            let v = number(row, column, idx)?;
            if nearly_equal(v, value, tol)
                && best.is_none_or(|b| (v - value).abs() < (b - value).abs())
            {
                best = Some(v);
            }
        }
        Ok(best)
    }

    pub fn properties(&self) -> Vec<PropertyKey> {
        let mut keys: Vec<_> = self.columns.iter().map(|(k, i)| (*i, *k)).collect();
        keys.sort_unstable();
        keys.into_iter().map(|(_, k)| k).collect()
    }
}

/// Cell of `row` at `column`, treating a short row as a missing column.
pub(crate) fn cell(row: &TableRow, column: Column) -> TableResult<&CellValue> {
    row.cell(column.index).ok_or(TableError::MissingColumn {
        column: column.key.column(),
    })
}

/// Numeric cell of `row` at `column`; `row_index` is only used for reporting.
pub(crate) fn number(row: &TableRow, column: Column, row_index: usize) -> TableResult<f64> {
    cell(row, column)?
        .as_number()
        .ok_or(TableError::NonNumericCell {
            column: column.key.column(),
            row: row_index,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_parse_keeps_text() {
        assert_eq!(CellValue::parse(" 0.101325 "), CellValue::Number(0.101325));
        assert_eq!(CellValue::parse("1e-3"), CellValue::Number(1e-3));
        assert_eq!(CellValue::parse("liquid"), CellValue::Label("liquid".into()));
        assert_eq!(
            CellValue::parse(" supercritical fluid "),
            CellValue::Label("supercritical fluid".into())
        );
    }

    #[test]
    fn from_records_maps_known_headers() {
        let headers = ["P (MPa)", "Notes", "T (°C)", "Phase"];
        let records = vec![vec![
            "0.1".to_string(),
            "ref".to_string(),
            "20".to_string(),
            "liquid".to_string(),
        ]];
        let table =
            PropertyTable::from_records(TableKind::CompressedSuperheated, &headers, records)
                .unwrap();

        assert_eq!(table.column(PropertyKey::Temperature).unwrap().index, 2);
        assert_eq!(
            table.properties(),
            vec![PropertyKey::Pressure, PropertyKey::Temperature, PropertyKey::Phase]
        );
        let t = table.column(PropertyKey::Temperature).unwrap();
        assert_eq!(number(&table.rows()[0], t, 0).unwrap(), 20.0);
    }

    #[test]
    fn from_records_requires_axis_columns() {
        let headers = ["T (°C)", "Phase"];
        let records = vec![vec!["20".to_string(), "liquid".to_string()]];
        let err = PropertyTable::from_records(TableKind::CompressedSuperheated, &headers, records)
            .unwrap_err();
        assert!(matches!(err, TableError::MissingColumn { column: "P (MPa)" }));
    }

    #[test]
    fn nearest_tabulated_snaps_within_tolerance() {
        let table = PropertyTable::new(
            TableKind::SaturationByTemperature,
            &[PropertyKey::Temperature],
            vec![
                vec![CellValue::Number(0.01)],
                vec![CellValue::Number(200.0)],
                vec![CellValue::Number(373.95)],
            ],
        )
        .unwrap();
        let tol = Tolerances::default();
        let near = |v| {
            table
                .nearest_tabulated(PropertyKey::Temperature, v, tol)
                .unwrap()
        };
        assert_eq!(near(373.950_000_000_000_05), Some(373.95));
        assert_eq!(near(0.009_999_999_999_99), Some(0.01));
        assert_eq!(near(200.0), Some(200.0));
        assert_eq!(near(199.9), None);
        assert!(matches!(
            table.nearest_tabulated(PropertyKey::Pressure, 1.0, tol),
            Err(TableError::MissingColumn { .. })
        ));
    }

    #[test]
    fn missing_column_is_reported() {
        let table = PropertyTable::new(
            TableKind::SaturationByTemperature,
            &[PropertyKey::Temperature],
            vec![vec![CellValue::Number(10.0)]],
        )
        .unwrap();
        let err = table.column(PropertyKey::Enthalpy).unwrap_err();
        assert!(matches!(
            err,
            TableError::MissingColumn { column } if column == "Specific Enthalpy (kJ/kg)"
        ));
    }

    #[test]
    fn text_in_numeric_column_is_reported() {
        let table = PropertyTable::new(
            TableKind::SaturationByTemperature,
            &[PropertyKey::Temperature],
            vec![vec!["n/a".into()]],
        )
        .unwrap();
        let t = table.column(PropertyKey::Temperature).unwrap();
        let err = number(&table.rows()[0], t, 0).unwrap_err();
        assert!(matches!(err, TableError::NonNumericCell { row: 0, .. }));
    }

    #[test]
    fn short_rows_are_rejected() {
        let err = PropertyTable::new(
            TableKind::SaturationByTemperature,
            &[PropertyKey::Temperature, PropertyKey::Pressure],
            vec![vec![CellValue::Number(10.0)]],
        )
        .unwrap_err();
        assert!(matches!(err, TableError::Parse { line: 1, .. }));
    }

    #[test]
    fn tables_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PropertyTable>();
    }
}
