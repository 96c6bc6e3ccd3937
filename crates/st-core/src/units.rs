//! Quantity kinds, affine units and conversion between them.
//!
//! Every unit maps onto the SI reference unit of its kind through
//! `si = (value + pre_shift) * scale + post_shift`. Pure-linear units leave
//! both shifts at zero; offset scales (°C, °F) use them to reach Kelvin.

use core::fmt;

use crate::{StError, StResult};

pub mod catalog;

/// Physical dimension measured by a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum QuantityKind {
    /// Temperature (reference: K)
    Temperature,
    /// Absolute pressure (reference: Pa)
    Pressure,
    /// Specific volume (reference: m^3/kg)
    SpecificVolume,
    /// Density (reference: kg/m^3)
    Density,
    /// Specific internal energy / enthalpy (reference: J/kg)
    SpecificEnergy,
    /// Specific entropy (reference: J/(kg·K))
    Entropy,
}

impl QuantityKind {
    pub const ALL: [QuantityKind; 6] = [
        Self::Temperature,
        Self::Pressure,
        Self::SpecificVolume,
        Self::Density,
        Self::SpecificEnergy,
        Self::Entropy,
    ];

    /// Stable kebab-case name.
    pub fn id(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Pressure => "pressure",
            Self::SpecificVolume => "specific-volume",
            Self::Density => "density",
            Self::SpecificEnergy => "specific-energy",
            Self::Entropy => "entropy",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.id().eq_ignore_ascii_case(id))
    }

    /// Symbol of the SI reference unit every unit of this kind converts through.
    pub fn si_symbol(self) -> &'static str {
        match self {
            Self::Temperature => "K",
            Self::Pressure => "Pa",
            Self::SpecificVolume => "m^3/kg",
            Self::Density => "kg/m^3",
            Self::SpecificEnergy => "J/kg",
            Self::Entropy => "J/(kg K)",
        }
    }
}

impl fmt::Display for QuantityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature => write!(f, "Temperature"),
            Self::Pressure => write!(f, "Pressure"),
            Self::SpecificVolume => write!(f, "Specific Volume"),
            Self::Density => write!(f, "Density"),
            Self::SpecificEnergy => write!(f, "Specific Energy"),
            Self::Entropy => write!(f, "Entropy"),
        }
    }
}

/// A display unit: an affine map onto the SI reference unit of its kind.
///
/// Units are immutable values, normally borrowed as `&'static Unit` from
/// [`catalog`]. Equality compares the conversion (kind, scale, shifts) and
/// ignores the symbol, so two units compare equal exactly when converting
/// between them is the identity.
#[derive(Debug, Clone, Copy)]
pub struct Unit {
    /// Display label, e.g. `"°C"` or `"MPa"`.
    pub symbol: &'static str,
    /// ASCII spellings accepted by [`catalog::find`].
    pub aliases: &'static [&'static str],
    pub kind: QuantityKind,
    /// SI units per one of this unit; never zero.
    pub scale: f64,
    /// Added before scaling.
    pub pre_shift: f64,
    /// Added after scaling.
    pub post_shift: f64,
}

impl Unit {
    pub const fn linear(
        symbol: &'static str,
        aliases: &'static [&'static str],
        kind: QuantityKind,
        scale: f64,
    ) -> Self {
        Self::affine(symbol, aliases, kind, scale, 0.0, 0.0)
    }

    pub const fn affine(
        symbol: &'static str,
        aliases: &'static [&'static str],
        kind: QuantityKind,
        scale: f64,
        pre_shift: f64,
        post_shift: f64,
    ) -> Self {
        Self {
            symbol,
            aliases,
            kind,
            scale,
            pre_shift,
            post_shift,
        }
    }

    /// True when converting between `self` and `other` is the identity.
    pub fn is_interchangeable(&self, other: &Unit) -> bool {
        self.kind == other.kind
            && self.scale == other.scale
            && self.pre_shift == other.pre_shift
            && self.post_shift == other.post_shift
    }

    #[inline]
    pub fn to_si(&self, value: f64) -> f64 {
        (value + self.pre_shift) * self.scale + self.post_shift
    }

    #[inline]
    pub fn from_si(&self, si: f64) -> f64 {
        (si - self.post_shift) / self.scale - self.pre_shift
    }

    /// Case-insensitive match against the symbol and aliases.
    pub fn matches_symbol(&self, query: &str) -> bool {
        let query = query.trim();
        self.symbol.eq_ignore_ascii_case(query)
            || self
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(query))
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.is_interchangeable(other)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol)
    }
}

/// Convert `value` expressed in `from` into `to`.
///
/// Interchangeable units return `value` untouched. Units of different kinds
/// fail with [`StError::IncompatibleUnit`].
pub fn convert(value: f64, from: &Unit, to: &Unit) -> StResult<f64> {
    if from.is_interchangeable(to) {
        return Ok(value);
    }
    if from.kind != to.kind {
        return Err(StError::IncompatibleUnit {
            from: from.kind,
            to: to.kind,
        });
    }
    Ok(to.from_si(from.to_si(value)))
}
