use thiserror::Error;

use crate::units::QuantityKind;

pub type StResult<T> = Result<T, StError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StError {
    #[error("Incompatible units: cannot convert {from} to {to}")]
    IncompatibleUnit {
        from: QuantityKind,
        to: QuantityKind,
    },

    #[error("Degenerate interpolation interval: both bounds are {x}")]
    DegenerateInterval { x: f64 },

    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
