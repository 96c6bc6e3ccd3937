//! Single-axis bracket search and interpolation.
//!
//! Rows are scanned once in file order; no sorting is assumed. An exact
//! match on the independent column wins immediately. Otherwise the tightest
//! rows strictly below and above the target bracket it, and the dependent
//! column is interpolated (numeric) or combined (categorical) between them.

use st_core::lin_interp;
use tracing::debug;

use crate::error::TableResult;
use crate::property::PropertyKey;
use crate::table::{CellValue, Column, PropertyTable, TableRow, cell, number};

/// Outcome of a single-axis lookup.
///
/// `value == None` means the target lies outside the table on this axis.
/// `low_bound == high_bound` means an exact match was found.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryResult {
    pub low_bound: Option<f64>,
    pub high_bound: Option<f64>,
    pub value: Option<CellValue>,
}

impl QueryResult {
    pub fn out_of_range() -> Self {
        Self {
            low_bound: None,
            high_bound: None,
            value: None,
        }
    }

    pub fn exact(at: f64, value: CellValue) -> Self {
        Self {
            low_bound: Some(at),
            high_bound: Some(at),
            value: Some(value),
        }
    }

    pub fn is_out_of_range(&self) -> bool {
        self.value.is_none()
    }

    pub fn is_exact(&self) -> bool {
        self.value.is_some() && self.low_bound.is_some() && self.low_bound == self.high_bound
    }
}

/// Look up `dependent` at `independent == target` over every row of `table`.
pub fn search_interpolate(
    table: &PropertyTable,
    independent: PropertyKey,
    target: f64,
    dependent: PropertyKey,
) -> TableResult<QueryResult> {
    let x_col = table.column(independent)?;
    let y_col = table.column(dependent)?;
    search_rows(table.rows().iter().enumerate(), x_col, y_col, target)
}

/// Bracket search over an arbitrary subset of rows, given as `(row_index, row)`.
pub(crate) fn search_rows<'a, I>(
    rows: I,
    x_col: Column,
    y_col: Column,
    target: f64,
) -> TableResult<QueryResult>
where
    I: IntoIterator<Item = (usize, &'a TableRow)>,
{
    let mut low: Option<(f64, usize, &TableRow)> = None;
    let mut high: Option<(f64, usize, &TableRow)> = None;

    for (idx, row) in rows {
        let x = number(row, x_col, idx)?;
        if x == target {
            debug!(property = %x_col.key, target, row = idx, "exact match");
            return Ok(QueryResult::exact(target, dependent_value(row, y_col, idx)?));
        }
        if x < target {
            if low.is_none_or(|(best, _, _)| x > best) {
                low = Some((x, idx, row));
            }
        } else if x > target && high.is_none_or(|(best, _, _)| x < best) {
            high = Some((x, idx, row));
        }
    }

    let (Some((x_low, low_idx, low_row)), Some((x_high, high_idx, high_row))) = (low, high)
    else {
        debug!(property = %x_col.key, target, "target outside table range");
        return Ok(QueryResult::out_of_range());
    };

    let y_low = dependent_value(low_row, y_col, low_idx)?;
    let y_high = dependent_value(high_row, y_col, high_idx)?;
    let value = blend(y_col.key, target, x_low, x_high, y_low, y_high)?;
    Ok(QueryResult {
        low_bound: Some(x_low),
        high_bound: Some(x_high),
        value: Some(value),
    })
}

/// Dependent cell of `row`; numeric properties must hold numbers.
fn dependent_value(row: &TableRow, y_col: Column, idx: usize) -> TableResult<CellValue> {
    if y_col.key.is_categorical() {
        Ok(cell(row, y_col)?.clone())
    } else {
        Ok(CellValue::Number(number(row, y_col, idx)?))
    }
}

/// Combine two bracket values: linear interpolation for numbers, label
/// merging for categorical properties.
pub(crate) fn blend(
    key: PropertyKey,
    x: f64,
    x_low: f64,
    x_high: f64,
    low: CellValue,
    high: CellValue,
) -> TableResult<CellValue> {
    match (key.is_categorical(), low.as_number(), high.as_number()) {
        (false, Some(y_low), Some(y_high)) => Ok(CellValue::Number(lin_interp(
            x, x_low, x_high, y_low, y_high,
        )?)),
        _ => Ok(combine_labels(&low, &high)),
    }
}

/// The shared label when both sides agree, otherwise `"low or high"`.
pub fn combine_labels(low: &CellValue, high: &CellValue) -> CellValue {
    if low == high {
        low.clone()
    } else {
        CellValue::Label(format!("{low} or {high}"))
    }
}
