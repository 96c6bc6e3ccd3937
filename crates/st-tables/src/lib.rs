//! st-tables: steam-table lookups for steamtab.
//!
//! Provides:
//! - Property catalog (column identity, quantity kind, native unit)
//! - Immutable property tables and a loader for the reference data files
//! - Single-axis bracket search with linear interpolation
//! - Two-axis (temperature, pressure) search with bilinear interpolation
//! - A lookup pipeline that converts display units in and out
//!
//! # Example
//!
//! ```
//! use st_core::catalog::{CELSIUS, KILOJOULE_PER_KG, MEGAPASCAL};
//! use st_tables::{
//!     CellValue, Lookup, LookupRequest, PropertyKey, PropertyTable, Reading, SearchMode,
//!     TableKind, lookup,
//! };
//!
//! let table = PropertyTable::new(
//!     TableKind::CompressedSuperheated,
//!     &[PropertyKey::Temperature, PropertyKey::Pressure, PropertyKey::InternalEnergy],
//!     vec![
//!         vec![CellValue::Number(20.0), CellValue::Number(0.1), CellValue::Number(200.0)],
//!         vec![CellValue::Number(30.0), CellValue::Number(0.1), CellValue::Number(220.0)],
//!     ],
//! )
//! .unwrap();
//!
//! let request = LookupRequest {
//!     mode: SearchMode::DoubleAxis {
//!         temperature: Reading::new(25.0, &CELSIUS),
//!         pressure: Reading::new(0.1, &MEGAPASCAL),
//!     },
//!     dependent: PropertyKey::InternalEnergy,
//!     output_unit: Some(&KILOJOULE_PER_KG),
//! };
//!
//! let result = lookup(&table, &request).unwrap();
//! assert_eq!(result.value(), Some(&CellValue::Number(210.0)));
//! ```

pub mod error;
pub mod grid;
pub mod loader;
pub mod lookup;
pub mod property;
pub mod search;
pub mod table;

// Re-exports for ergonomics
pub use error::{TableError, TableResult};
pub use grid::{GridResult, find_by_temperature_and_pressure};
pub use loader::{LoaderConfig, TableSet, load_table, parse_table};
pub use lookup::{Lookup, LookupRequest, Reading, SearchMode, lookup};
pub use property::{PropertyInfo, PropertyKey, TableKind, all_properties, native_unit};
pub use search::{QueryResult, combine_labels, search_interpolate};
pub use table::{CellValue, Column, PropertyTable, TableRow};
