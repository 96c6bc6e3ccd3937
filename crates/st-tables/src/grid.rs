//! Two-axis (temperature, pressure) lookup over a possibly irregular grid.
//!
//! Resolution order:
//! 1. a row matching both temperature and pressure exactly;
//! 2. exact temperature, pressure interpolated within that temperature slice;
//! 3. exact pressure, temperature interpolated within that pressure slice;
//! 4. bilinear: pressure interpolated inside the two temperature slices that
//!    bracket the query, then temperature interpolated across the two results.
//!
//! Once an exact match on one axis exists the answer comes from that slice
//! alone; a slice that cannot bracket the other axis yields out-of-range.

use tracing::debug;

use crate::error::TableResult;
use crate::property::PropertyKey;
use crate::search::{QueryResult, blend, search_rows};
use crate::table::{CellValue, Column, PropertyTable, TableRow, cell, number};

/// Outcome of a two-axis lookup. `value == None` means out of range.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridResult {
    pub temp_low: Option<f64>,
    pub temp_high: Option<f64>,
    pub pres_low: Option<f64>,
    pub pres_high: Option<f64>,
    pub value: Option<CellValue>,
}

impl GridResult {
    pub fn out_of_range() -> Self {
        Self {
            temp_low: None,
            temp_high: None,
            pres_low: None,
            pres_high: None,
            value: None,
        }
    }

    pub fn is_out_of_range(&self) -> bool {
        self.value.is_none()
    }

    /// Both axes matched a tabulated row exactly.
    pub fn is_exact(&self) -> bool {
        self.value.is_some()
            && self.temp_low.is_some()
            && self.temp_low == self.temp_high
            && self.pres_low.is_some()
            && self.pres_low == self.pres_high
    }

    fn along_pressure(t: f64, slice: QueryResult) -> Self {
        match slice.value {
            None => Self::out_of_range(),
            Some(value) => Self {
                temp_low: Some(t),
                temp_high: Some(t),
                pres_low: slice.low_bound,
                pres_high: slice.high_bound,
                value: Some(value),
            },
        }
    }

    fn along_temperature(p: f64, slice: QueryResult) -> Self {
        match slice.value {
            None => Self::out_of_range(),
            Some(value) => Self {
                temp_low: slice.low_bound,
                temp_high: slice.high_bound,
                pres_low: Some(p),
                pres_high: Some(p),
                value: Some(value),
            },
        }
    }
}

/// Look up `dependent` at temperature `t` and pressure `p` (table-native units).
pub fn find_by_temperature_and_pressure(
    table: &PropertyTable,
    t: f64,
    p: f64,
    dependent: PropertyKey,
) -> TableResult<GridResult> {
    let t_col = table.column(PropertyKey::Temperature)?;
    let p_col = table.column(PropertyKey::Pressure)?;
    let y_col = table.column(dependent)?;
    let rows = table.rows();

    let mut t_exact = false;
    let mut p_exact = false;
    let mut temperatures = Vec::new();
    for (idx, row) in rows.iter().enumerate() {
        let row_t = number(row, t_col, idx)?;
        let row_p = number(row, p_col, idx)?;
        if row_t == t && row_p == p {
            debug!(t, p, row = idx, "exact grid match");
            let value = if dependent.is_categorical() {
                cell(row, y_col)?.clone()
            } else {
                CellValue::Number(number(row, y_col, idx)?)
            };
            return Ok(GridResult {
                temp_low: Some(t),
                temp_high: Some(t),
                pres_low: Some(p),
                pres_high: Some(p),
                value: Some(value),
            });
        }
        t_exact |= row_t == t;
        p_exact |= row_p == p;
        temperatures.push(row_t);
    }

    if t_exact {
        debug!(t, p, "exact temperature, interpolating pressure");
        let along = search_rows(rows_at(rows, t_col, t), p_col, y_col, p)?;
        return Ok(GridResult::along_pressure(t, along));
    }
    if p_exact {
        debug!(t, p, "exact pressure, interpolating temperature");
        let along = search_rows(rows_at(rows, p_col, p), t_col, y_col, t)?;
        return Ok(GridResult::along_temperature(p, along));
    }

    temperatures.sort_by(f64::total_cmp);
    temperatures.dedup();
    let (Some(t_low), Some(t_high)) = (
        temperatures.iter().rev().copied().find(|&x| x < t),
        temperatures.iter().copied().find(|&x| x > t),
    ) else {
        debug!(t, "temperature outside grid");
        return Ok(GridResult::out_of_range());
    };

    let low = search_rows(rows_at(rows, t_col, t_low), p_col, y_col, p)?;
    let high = search_rows(rows_at(rows, t_col, t_high), p_col, y_col, p)?;
    let (Some(low_value), Some(high_value)) = (low.value, high.value) else {
        debug!(t_low, t_high, p, "pressure outside a bracketing temperature slice");
        return Ok(GridResult::out_of_range());
    };

    let value = blend(dependent, t, t_low, t_high, low_value, high_value)?;
    Ok(GridResult {
        temp_low: Some(t_low),
        temp_high: Some(t_high),
        pres_low: min_bound(low.low_bound, high.low_bound),
        pres_high: max_bound(low.high_bound, high.high_bound),
        value: Some(value),
    })
}

/// Rows whose `column` holds exactly `at`.
fn rows_at(
    rows: &[TableRow],
    column: Column,
    at: f64,
) -> impl Iterator<Item = (usize, &TableRow)> {
    rows.iter()
        .enumerate()
        .filter(move |(_, row)| row.cell(column.index).and_then(CellValue::as_number) == Some(at))
}

fn min_bound(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

fn max_bound(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TableError;
    use crate::property::TableKind;

    const KEYS: [PropertyKey; 4] = [
        PropertyKey::Pressure,
        PropertyKey::Temperature,
        PropertyKey::Enthalpy,
        PropertyKey::Phase,
    ];

    fn grid(rows: &[(f64, f64, f64, &str)]) -> PropertyTable {
        PropertyTable::new(
            TableKind::CompressedSuperheated,
            &KEYS,
            rows.iter()
                .map(|&(p, t, h, phase)| {
                    vec![
                        CellValue::Number(p),
                        CellValue::Number(t),
                        CellValue::Number(h),
                        CellValue::from(phase),
                    ]
                })
                .collect(),
        )
        .unwrap()
    }

    // Irregular: the 300 °C slice has no 5 MPa row.
    fn sample() -> PropertyTable {
        grid(&[
            (1.0, 200.0, 2827.9, "vapor"),
            (5.0, 200.0, 853.8, "liquid"),
            (1.0, 250.0, 2942.6, "vapor"),
            (5.0, 250.0, 1085.8, "liquid"),
            (1.0, 300.0, 3051.2, "vapor"),
            (3.0, 300.0, 2994.3, "vapor"),
        ])
    }

    fn number_of(res: &GridResult) -> f64 {
        res.value.as_ref().and_then(CellValue::as_number).unwrap()
    }

    #[test]
    fn exact_on_both_axes() {
        let res =
            find_by_temperature_and_pressure(&sample(), 250.0, 5.0, PropertyKey::Enthalpy).unwrap();
        assert!(res.is_exact());
        assert_eq!(number_of(&res), 1085.8);
        assert_eq!(
            (res.temp_low, res.temp_high, res.pres_low, res.pres_high),
            (Some(250.0), Some(250.0), Some(5.0), Some(5.0))
        );
    }

    #[test]
    fn exact_temperature_interpolates_pressure() {
        let res =
            find_by_temperature_and_pressure(&sample(), 200.0, 3.0, PropertyKey::Enthalpy).unwrap();
        assert_eq!((res.temp_low, res.temp_high), (Some(200.0), Some(200.0)));
        assert_eq!((res.pres_low, res.pres_high), (Some(1.0), Some(5.0)));
        assert!((number_of(&res) - (2827.9 + 853.8) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn exact_temperature_does_not_fall_back_to_grid() {
        // 300 °C exists but its slice tops out at 3 MPa.
        let res =
            find_by_temperature_and_pressure(&sample(), 300.0, 4.0, PropertyKey::Enthalpy).unwrap();
        assert_eq!(res, GridResult::out_of_range());
    }

    #[test]
    fn exact_pressure_interpolates_temperature() {
        let res =
            find_by_temperature_and_pressure(&sample(), 225.0, 1.0, PropertyKey::Enthalpy).unwrap();
        assert_eq!((res.temp_low, res.temp_high), (Some(200.0), Some(250.0)));
        assert_eq!((res.pres_low, res.pres_high), (Some(1.0), Some(1.0)));
        assert!((number_of(&res) - (2827.9 + 2942.6) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn bilinear_between_slices() {
        let res =
            find_by_temperature_and_pressure(&sample(), 225.0, 2.0, PropertyKey::Enthalpy).unwrap();
        let at_200 = 2827.9 + 0.25 * (853.8 - 2827.9);
        let at_250 = 2942.6 + 0.25 * (1085.8 - 2942.6);
        assert!((number_of(&res) - (at_200 + at_250) / 2.0).abs() < 1e-9);
        assert_eq!((res.temp_low, res.temp_high), (Some(200.0), Some(250.0)));
        assert_eq!((res.pres_low, res.pres_high), (Some(1.0), Some(5.0)));
    }

    #[test]
    fn bilinear_reports_union_of_slice_pressure_windows() {
        let table = grid(&[
            (1.0, 100.0, 10.0, "liquid"),
            (2.0, 100.0, 20.0, "liquid"),
            (1.5, 200.0, 30.0, "liquid"),
            (4.0, 200.0, 40.0, "liquid"),
        ]);
        let res =
            find_by_temperature_and_pressure(&table, 150.0, 1.75, PropertyKey::Enthalpy).unwrap();
        assert_eq!((res.pres_low, res.pres_high), (Some(1.0), Some(4.0)));
    }

    #[test]
    fn bilinear_needs_both_slices_to_bracket_pressure() {
        // 4 MPa is bracketed at 250 °C but not at 300 °C.
        let res =
            find_by_temperature_and_pressure(&sample(), 275.0, 4.0, PropertyKey::Enthalpy).unwrap();
        assert!(res.is_out_of_range());
    }

    #[test]
    fn temperature_outside_grid() {
        for t in [150.0, 350.0] {
            let res =
                find_by_temperature_and_pressure(&sample(), t, 2.0, PropertyKey::Enthalpy).unwrap();
            assert_eq!(res, GridResult::out_of_range());
        }
    }

    #[test]
    fn single_temperature_grid_cannot_bracket() {
        let table = grid(&[(1.0, 100.0, 1.0, "liquid"), (2.0, 100.0, 2.0, "liquid")]);
        let res =
            find_by_temperature_and_pressure(&table, 120.0, 1.5, PropertyKey::Enthalpy).unwrap();
        assert!(res.is_out_of_range());
    }

    #[test]
    fn phase_labels_combine_across_slices() {
        let same =
            find_by_temperature_and_pressure(&sample(), 225.0, 1.0, PropertyKey::Phase).unwrap();
        assert_eq!(same.value, Some(CellValue::from("vapor")));

        let mixed =
            find_by_temperature_and_pressure(&sample(), 225.0, 3.0, PropertyKey::Phase).unwrap();
        assert_eq!(mixed.value, Some(CellValue::from("vapor or liquid")));
    }

    #[test]
    fn missing_axis_column_is_an_error() {
        let table = PropertyTable::new(
            TableKind::CompressedSuperheated,
            &[PropertyKey::Temperature, PropertyKey::Enthalpy],
            vec![vec![CellValue::Number(1.0), CellValue::Number(2.0)]],
        )
        .unwrap();
        let err =
            find_by_temperature_and_pressure(&table, 1.0, 1.0, PropertyKey::Enthalpy).unwrap_err();
        assert!(matches!(err, TableError::MissingColumn { column: "P (MPa)" }));
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let table = sample();
        let first =
            find_by_temperature_and_pressure(&table, 231.7, 2.3, PropertyKey::Enthalpy).unwrap();
        for _ in 0..10 {
            let again =
                find_by_temperature_and_pressure(&table, 231.7, 2.3, PropertyKey::Enthalpy)
                    .unwrap();
            assert_eq!(
                number_of(&first).to_bits(),
                number_of(&again).to_bits()
            );
            assert_eq!(first, again);
        }
    }
}
