//! End-to-end lookups: display units in, table search, display units out.

use st_core::{StError, Tolerances, Unit, convert, ensure_finite};

use crate::error::{TableError, TableResult};
use crate::grid::{GridResult, find_by_temperature_and_pressure};
use crate::property::{PropertyKey, TableKind};
use crate::search::{QueryResult, search_interpolate};
use crate::table::{CellValue, PropertyTable};

/// A value paired with the unit it is expressed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub value: f64,
    pub unit: &'static Unit,
}

impl Reading {
    pub fn new(value: f64, unit: &'static Unit) -> Self {
        Self { value, unit }
    }
}

/// Which search runs, with its query coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchMode {
    /// One independent property, used by the saturation tables.
    SingleAxis {
        independent: PropertyKey,
        target: Reading,
    },
    /// Temperature and pressure, used by the compressed/superheated grid.
    DoubleAxis {
        temperature: Reading,
        pressure: Reading,
    },
}

impl SearchMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SingleAxis {
                independent: PropertyKey::Temperature,
                ..
            } => "single-axis temperature",
            Self::SingleAxis {
                independent: PropertyKey::Pressure,
                ..
            } => "single-axis pressure",
            Self::SingleAxis { .. } => "single-axis",
            Self::DoubleAxis { .. } => "double-axis",
        }
    }

    fn fits(&self, kind: TableKind) -> bool {
        matches!(
            (kind, self),
            (
                TableKind::SaturationByTemperature,
                Self::SingleAxis {
                    independent: PropertyKey::Temperature,
                    ..
                }
            ) | (
                TableKind::SaturationByPressure,
                Self::SingleAxis {
                    independent: PropertyKey::Pressure,
                    ..
                }
            ) | (TableKind::CompressedSuperheated, Self::DoubleAxis { .. })
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookupRequest {
    pub mode: SearchMode,
    pub dependent: PropertyKey,
    /// Unit for the result; the table-native unit when `None`.
    pub output_unit: Option<&'static Unit>,
}

/// Lookup outcome with bounds in the query units and the value in the output unit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mode", rename_all = "kebab-case"))]
pub enum Lookup {
    Single(QueryResult),
    Double(GridResult),
}

impl Lookup {
    pub fn value(&self) -> Option<&CellValue> {
        match self {
            Self::Single(r) => r.value.as_ref(),
            Self::Double(r) => r.value.as_ref(),
        }
    }

    pub fn is_out_of_range(&self) -> bool {
        self.value().is_none()
    }
}

/// Run `request` against `table`.
///
/// Readings are converted to the table's native units before searching. The
/// bracketing bounds come back in each reading's own unit and the value in
/// `output_unit`. Categorical values are returned untouched.
pub fn lookup(table: &PropertyTable, request: &LookupRequest) -> TableResult<Lookup> {
    if !request.mode.fits(table.kind()) {
        return Err(TableError::ModeMismatch {
            table: table.kind(),
            mode: request.mode.name(),
        });
    }
    let output = output_unit(request.dependent, request.output_unit)?;

    match request.mode {
        SearchMode::SingleAxis {
            independent,
            target,
        } => {
            let axis = Axis::new(table, independent, target)?;
            let raw = search_interpolate(table, independent, axis.native_value, request.dependent)?;
            Ok(Lookup::Single(QueryResult {
                low_bound: axis.back(raw.low_bound)?,
                high_bound: axis.back(raw.high_bound)?,
                value: to_output(raw.value, output)?,
            }))
        }
        SearchMode::DoubleAxis {
            temperature,
            pressure,
        } => {
            let t = Axis::new(table, PropertyKey::Temperature, temperature)?;
            let p = Axis::new(table, PropertyKey::Pressure, pressure)?;
            let raw = find_by_temperature_and_pressure(
                table,
                t.native_value,
                p.native_value,
                request.dependent,
            )?;
            Ok(Lookup::Double(GridResult {
                temp_low: t.back(raw.temp_low)?,
                temp_high: t.back(raw.temp_high)?,
                pres_low: p.back(raw.pres_low)?,
                pres_high: p.back(raw.pres_high)?,
                value: to_output(raw.value, output)?,
            }))
        }
    }
}

/// One query coordinate, in both its display unit and the table's unit.
struct Axis {
    reading: Reading,
    native: &'static Unit,
    native_value: f64,
}

impl Axis {
    /// A converted query within tolerance of a tabulated value takes that value.
    fn new(table: &PropertyTable, key: PropertyKey, reading: Reading) -> TableResult<Self> {
        let native = key.native_unit().ok_or(StError::InvalidArg {
            what: "categorical property used as a search axis",
        })?;
        ensure_finite(reading.value, key.id())?;
        let mut native_value = convert(reading.value, reading.unit, native)?;
        if !reading.unit.is_interchangeable(native) {
            if let Some(tabulated) =
                table.nearest_tabulated(key, native_value, Tolerances::default())?
            {
                native_value = tabulated;
            }
        }
        Ok(Self {
            reading,
            native,
            native_value,
        })
    }

    /// Bound back in the reading's unit; the query point itself maps back exactly.
    fn back(&self, bound: Option<f64>) -> TableResult<Option<f64>> {
        Ok(match bound {
            None => None,
            Some(b) if b == self.native_value => Some(self.reading.value),
            Some(b) => Some(convert(b, self.native, self.reading.unit)?),
        })
    }
}

/// Validated (native, requested) unit pair for a numeric dependent.
fn output_unit(
    dependent: PropertyKey,
    requested: Option<&'static Unit>,
) -> TableResult<Option<(&'static Unit, &'static Unit)>> {
    let Some(native) = dependent.native_unit() else {
        return Ok(None);
    };
    let target = requested.unwrap_or(native);
    if target.kind != native.kind {
        return Err(StError::IncompatibleUnit {
            from: native.kind,
            to: target.kind,
        }
        .into());
    }
    Ok(Some((native, target)))
}

fn to_output(
    value: Option<CellValue>,
    units: Option<(&'static Unit, &'static Unit)>,
) -> TableResult<Option<CellValue>> {
    match (value, units) {
        (Some(CellValue::Number(v)), Some((native, target))) => {
            Ok(Some(CellValue::Number(convert(v, native, target)?)))
        }
        (value, _) => Ok(value),
    }
}
