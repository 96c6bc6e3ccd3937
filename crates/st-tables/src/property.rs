//! Tabulated properties and the table shapes that carry them.
//!
//! Each [`PropertyKey`] owns a fixed metadata record: stable id, display
//! name, raw column header, and quantity kind (`None` for categorical data).

use core::fmt;

use st_core::{QuantityKind, Unit, catalog};

/// Identifier of a tabulated quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum PropertyKey {
    Temperature,
    Pressure,
    SpecificVolume,
    SpecificVolumeLiquid,
    SpecificVolumeVapor,
    Density,
    DensityLiquid,
    DensityVapor,
    InternalEnergy,
    InternalEnergyLiquid,
    InternalEnergyVapor,
    InternalEnergyVaporization,
    Enthalpy,
    EnthalpyLiquid,
    EnthalpyVapor,
    EnthalpyVaporization,
    Entropy,
    EntropyLiquid,
    EntropyVapor,
    EntropyVaporization,
    Phase,
}

/// Static metadata attached to a [`PropertyKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyInfo {
    pub key: PropertyKey,
    /// Stable kebab-case name, used on the command line.
    pub id: &'static str,
    pub display_name: &'static str,
    /// Header text of the column in the reference data files.
    pub column: &'static str,
    pub kind: Option<QuantityKind>,
}

const fn info(
    key: PropertyKey,
    id: &'static str,
    display_name: &'static str,
    column: &'static str,
    kind: Option<QuantityKind>,
) -> PropertyInfo {
    PropertyInfo {
        key,
        id,
        display_name,
        column,
        kind,
    }
}

use PropertyKey as P;
use QuantityKind as Q;

// Indexed by `PropertyKey as usize`.
static PROPERTY_CATALOG: [PropertyInfo; 21] = [
    info(P::Temperature, "temperature", "Temperature", "T (°C)", Some(Q::Temperature)),
    info(P::Pressure, "pressure", "Pressure", "P (MPa)", Some(Q::Pressure)),
    info(
        P::SpecificVolume,
        "specific-volume",
        "Specific Volume",
        "Specific Volume (m^3/kg)",
        Some(Q::SpecificVolume),
    ),
    info(
        P::SpecificVolumeLiquid,
        "specific-volume-liquid",
        "Specific Volume (liquid)",
        "Specific Volume Liquid (m^3/kg)",
        Some(Q::SpecificVolume),
    ),
    info(
        P::SpecificVolumeVapor,
        "specific-volume-vapor",
        "Specific Volume (vapor)",
        "Specific Volume Vapor (m^3/kg)",
        Some(Q::SpecificVolume),
    ),
    info(P::Density, "density", "Density", "Density (kg/m^3)", Some(Q::Density)),
    info(
        P::DensityLiquid,
        "density-liquid",
        "Density (liquid)",
        "Density Liquid (kg/m^3)",
        Some(Q::Density),
    ),
    info(
        P::DensityVapor,
        "density-vapor",
        "Density (vapor)",
        "Density Vapor (kg/m^3)",
        Some(Q::Density),
    ),
    info(
        P::InternalEnergy,
        "internal-energy",
        "Specific Internal Energy",
        "Specific Internal Energy (kJ/kg)",
        Some(Q::SpecificEnergy),
    ),
    info(
        P::InternalEnergyLiquid,
        "internal-energy-liquid",
        "Specific Internal Energy (liquid)",
        "Specific Internal Energy Liquid (kJ/kg)",
        Some(Q::SpecificEnergy),
    ),
    info(
        P::InternalEnergyVapor,
        "internal-energy-vapor",
        "Specific Internal Energy (vapor)",
        "Specific Internal Energy Vapor (kJ/kg)",
        Some(Q::SpecificEnergy),
    ),
    info(
        P::InternalEnergyVaporization,
        "internal-energy-vaporization",
        "Specific Internal Energy of Vaporization",
        "Specific Internal Energy of Vaporization (kJ/kg)",
        Some(Q::SpecificEnergy),
    ),
    info(
        P::Enthalpy,
        "enthalpy",
        "Specific Enthalpy",
        "Specific Enthalpy (kJ/kg)",
        Some(Q::SpecificEnergy),
    ),
    info(
        P::EnthalpyLiquid,
        "enthalpy-liquid",
        "Specific Enthalpy (liquid)",
        "Specific Enthalpy Liquid (kJ/kg)",
        Some(Q::SpecificEnergy),
    ),
    info(
        P::EnthalpyVapor,
        "enthalpy-vapor",
        "Specific Enthalpy (vapor)",
        "Specific Enthalpy Vapor (kJ/kg)",
        Some(Q::SpecificEnergy),
    ),
    info(
        P::EnthalpyVaporization,
        "enthalpy-vaporization",
        "Specific Enthalpy of Vaporization",
        "Specific Enthalpy of Vaporization (kJ/kg)",
        Some(Q::SpecificEnergy),
    ),
    info(
        P::Entropy,
        "entropy",
        "Specific Entropy",
        "Specific Entropy (kJ/kg/K)",
        Some(Q::Entropy),
    ),
    info(
        P::EntropyLiquid,
        "entropy-liquid",
        "Specific Entropy (liquid)",
        "Specific Entropy Liquid (kJ/kg/K)",
        Some(Q::Entropy),
    ),
    info(
        P::EntropyVapor,
        "entropy-vapor",
        "Specific Entropy (vapor)",
        "Specific Entropy Vapor (kJ/kg/K)",
        Some(Q::Entropy),
    ),
    info(
        P::EntropyVaporization,
        "entropy-vaporization",
        "Specific Entropy of Vaporization",
        "Specific Entropy of Vaporization (kJ/kg/K)",
        Some(Q::Entropy),
    ),
    info(P::Phase, "phase", "Phase", "Phase", None),
];

impl PropertyKey {
    pub fn info(self) -> &'static PropertyInfo {
        &PROPERTY_CATALOG[self as usize]
    }

    pub fn id(self) -> &'static str {
        self.info().id
    }

    /// Raw header label of this property's column.
    pub fn column(self) -> &'static str {
        self.info().column
    }

    pub fn quantity_kind(self) -> Option<QuantityKind> {
        self.info().kind
    }

    /// Free-text properties that are never interpolated numerically.
    pub fn is_categorical(self) -> bool {
        self.info().kind.is_none()
    }

    /// Unit the reference tables store this property in.
    pub fn native_unit(self) -> Option<&'static Unit> {
        self.info().kind.map(native_unit)
    }

    pub fn from_column(header: &str) -> Option<Self> {
        let header = header.trim();
        PROPERTY_CATALOG
            .iter()
            .find(|entry| entry.column == header)
            .map(|entry| entry.key)
    }

    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        PROPERTY_CATALOG
            .iter()
            .find(|entry| entry.id.eq_ignore_ascii_case(id))
            .map(|entry| entry.key)
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().display_name)
    }
}

pub fn all_properties() -> &'static [PropertyInfo] {
    &PROPERTY_CATALOG
}

/// Table-native unit for each quantity kind.
pub fn native_unit(kind: QuantityKind) -> &'static Unit {
    match kind {
        QuantityKind::Temperature => &catalog::CELSIUS,
        QuantityKind::Pressure => &catalog::MEGAPASCAL,
        QuantityKind::SpecificVolume => &catalog::CUBIC_METER_PER_KG,
        QuantityKind::Density => &catalog::KG_PER_CUBIC_METER,
        QuantityKind::SpecificEnergy => &catalog::KILOJOULE_PER_KG,
        QuantityKind::Entropy => &catalog::KILOJOULE_PER_KG_K,
    }
}

/// Shape of a reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum TableKind {
    /// Single-axis, keyed by saturation temperature.
    SaturationByTemperature,
    /// Single-axis, keyed by saturation pressure.
    SaturationByPressure,
    /// Two-axis grid over temperature and pressure.
    CompressedSuperheated,
}

const SATURATION_PAIRS: [PropertyKey; 13] = [
    P::SpecificVolumeLiquid,
    P::SpecificVolumeVapor,
    P::DensityLiquid,
    P::DensityVapor,
    P::InternalEnergyLiquid,
    P::InternalEnergyVapor,
    P::InternalEnergyVaporization,
    P::EnthalpyLiquid,
    P::EnthalpyVapor,
    P::EnthalpyVaporization,
    P::EntropyLiquid,
    P::EntropyVapor,
    P::EntropyVaporization,
];

impl TableKind {
    pub const ALL: [TableKind; 3] = [
        Self::SaturationByTemperature,
        Self::SaturationByPressure,
        Self::CompressedSuperheated,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::SaturationByTemperature => "saturation-by-temperature",
            Self::SaturationByPressure => "saturation-by-pressure",
            Self::CompressedSuperheated => "compressed-superheated",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id().eq_ignore_ascii_case(id.trim()))
    }

    /// Columns carried by this table shape, in file order.
    pub fn properties(self) -> Vec<PropertyKey> {
        match self {
            Self::SaturationByTemperature => [P::Temperature, P::Pressure]
                .into_iter()
                .chain(SATURATION_PAIRS)
                .collect(),
            Self::SaturationByPressure => [P::Pressure, P::Temperature]
                .into_iter()
                .chain(SATURATION_PAIRS)
                .collect(),
            Self::CompressedSuperheated => vec![
                P::Pressure,
                P::Temperature,
                P::SpecificVolume,
                P::Density,
                P::InternalEnergy,
                P::Enthalpy,
                P::Entropy,
                P::Phase,
            ],
        }
    }

    /// Independent columns a table of this shape cannot do without.
    pub fn axes(self) -> &'static [PropertyKey] {
        match self {
            Self::SaturationByTemperature => &[P::Temperature],
            Self::SaturationByPressure => &[P::Pressure],
            Self::CompressedSuperheated => &[P::Temperature, P::Pressure],
        }
    }

    /// File name of the shipped reference data for this shape.
    pub fn default_file_name(self) -> &'static str {
        match self {
            Self::SaturationByTemperature => "saturated_by_temperature_V1.5.csv",
            Self::SaturationByPressure => "saturated_by_pressure_V1.4.csv",
            Self::CompressedSuperheated => "compressed_liquid_and_superheated_steam_V1.3.csv",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SaturationByTemperature => write!(f, "Saturation (by temperature)"),
            Self::SaturationByPressure => write!(f, "Saturation (by pressure)"),
            Self::CompressedSuperheated => write!(f, "Compressed liquid and superheated steam"),
        }
    }
}
