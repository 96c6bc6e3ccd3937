//! Predefined units for every quantity kind.
//!
//! Scales are SI reference units per one display unit.

use super::{QuantityKind, Unit};

use QuantityKind::{Density, Entropy, Pressure, SpecificEnergy, SpecificVolume, Temperature};

pub const KELVIN: Unit = Unit::linear("K", &["kelvin"], Temperature, 1.0);
pub const CELSIUS: Unit =
    Unit::affine("°C", &["C", "degC", "celsius"], Temperature, 1.0, 0.0, 273.15);
pub const FAHRENHEIT: Unit = Unit::affine(
    "°F",
    &["F", "degF", "fahrenheit"],
    Temperature,
    5.0 / 9.0,
    -32.0,
    273.15,
);
pub const RANKINE: Unit = Unit::linear("°R", &["R", "degR", "rankine"], Temperature, 5.0 / 9.0);

pub const MEGAPASCAL: Unit = Unit::linear("MPa", &[], Pressure, 1.0e6);
pub const KILOPASCAL: Unit = Unit::linear("kPa", &[], Pressure, 1.0e3);
pub const PASCAL: Unit = Unit::linear("Pa", &["pascal"], Pressure, 1.0);
pub const BAR: Unit = Unit::linear("bar", &["bara"], Pressure, 1.0e5);
pub const ATMOSPHERE: Unit = Unit::linear("atm", &[], Pressure, 101_325.0);
pub const PSIA: Unit = Unit::linear("psia", &[], Pressure, 6_894.757_293_168_361);

pub const CUBIC_METER_PER_KG: Unit =
    Unit::linear("m^3/kg", &["m3/kg", "m³/kg"], SpecificVolume, 1.0);
pub const LITER_PER_KG: Unit = Unit::linear("L/kg", &[], SpecificVolume, 1.0e-3);
pub const CUBIC_CM_PER_GRAM: Unit =
    Unit::linear("cm^3/g", &["cm3/g", "cm³/g"], SpecificVolume, 1.0e-3);
pub const CUBIC_FOOT_PER_LBM: Unit = Unit::linear(
    "ft^3/lbm",
    &["ft3/lbm", "ft³/lbm"],
    SpecificVolume,
    0.028_316_846_592 / 0.453_592_37,
);

pub const KG_PER_CUBIC_METER: Unit =
    Unit::linear("kg/m^3", &["kg/m3", "kg/m³"], Density, 1.0);
pub const GRAM_PER_CUBIC_CM: Unit =
    Unit::linear("g/cm^3", &["g/cm3", "g/cm³"], Density, 1.0e3);
pub const LBM_PER_CUBIC_FOOT: Unit = Unit::linear(
    "lbm/ft^3",
    &["lbm/ft3", "lbm/ft³"],
    Density,
    0.453_592_37 / 0.028_316_846_592,
);

pub const KILOJOULE_PER_KG: Unit = Unit::linear("kJ/kg", &[], SpecificEnergy, 1.0e3);
pub const JOULE_PER_KG: Unit = Unit::linear("J/kg", &[], SpecificEnergy, 1.0);
pub const BTU_PER_LBM: Unit = Unit::linear("Btu/lbm", &["btu/lb"], SpecificEnergy, 2_326.0);

pub const KILOJOULE_PER_KG_K: Unit = Unit::linear(
    "kJ/(kg K)",
    &["kJ/kg-K", "kJ/kgK", "kJ/(kg*K)", "kJ/(kg·K)"],
    Entropy,
    1.0e3,
);
pub const JOULE_PER_KG_K: Unit = Unit::linear(
    "J/(kg K)",
    &["J/kg-K", "J/kgK", "J/(kg*K)", "J/(kg·K)"],
    Entropy,
    1.0,
);
pub const BTU_PER_LBM_R: Unit = Unit::linear(
    "Btu/(lbm °R)",
    &["Btu/lbm-R", "Btu/lbmR", "Btu/(lbm*R)", "Btu/(lbm·R)"],
    Entropy,
    4_186.8,
);

static CATALOG: [Unit; 23] = [
    CELSIUS,
    KELVIN,
    FAHRENHEIT,
    RANKINE,
    MEGAPASCAL,
    KILOPASCAL,
    PASCAL,
    BAR,
    ATMOSPHERE,
    PSIA,
    CUBIC_METER_PER_KG,
    LITER_PER_KG,
    CUBIC_CM_PER_GRAM,
    CUBIC_FOOT_PER_LBM,
    KG_PER_CUBIC_METER,
    GRAM_PER_CUBIC_CM,
    LBM_PER_CUBIC_FOOT,
    KILOJOULE_PER_KG,
    JOULE_PER_KG,
    BTU_PER_LBM,
    KILOJOULE_PER_KG_K,
    JOULE_PER_KG_K,
    BTU_PER_LBM_R,
];

pub fn all() -> &'static [Unit] {
    &CATALOG
}

pub fn for_kind(kind: QuantityKind) -> impl Iterator<Item = &'static Unit> {
    CATALOG.iter().filter(move |unit| unit.kind == kind)
}

/// Look a unit up by symbol or alias, ignoring ASCII case.
pub fn find(symbol: &str) -> Option<&'static Unit> {
    CATALOG.iter().find(|unit| unit.matches_symbol(symbol))
}

/// Like [`find`], restricted to one quantity kind.
pub fn find_for_kind(kind: QuantityKind, symbol: &str) -> Option<&'static Unit> {
    for_kind(kind).find(|unit| unit.matches_symbol(symbol))
}
