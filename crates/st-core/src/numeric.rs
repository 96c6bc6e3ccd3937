//! Float helpers shared by conversion and table search.

use crate::StError;

pub type Real = f64;

/// Absolute and relative slack for comparing table values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Tolerances {
    pub const TIGHT: Self = Self {
        abs: 1e-12,
        rel: 1e-9,
    };
}

impl Default for Tolerances {
    fn default() -> Self {
        Self::TIGHT
    }
}

/// True when `a` and `b` agree within either the absolute or the scaled relative slack.
pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    diff <= tol.abs || diff <= tol.rel * a.abs().max(b.abs())
}

/// Pass `v` through, or fail naming the offending input.
pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, StError> {
    if !v.is_finite() {
        return Err(StError::NonFinite { what, value: v });
    }
    Ok(v)
}

/// Straight-line interpolation of `y` at `x` between `(x_low, y_low)` and `(x_high, y_high)`.
///
/// The endpoints are returned bit-exactly, so an `x` sitting on a bound never
/// picks up rounding noise from the slope term.
pub fn lin_interp(
    x: Real,
    x_low: Real,
    x_high: Real,
    y_low: Real,
    y_high: Real,
) -> Result<Real, StError> {
    if x_low == x_high {
        return Err(StError::DegenerateInterval { x: x_low });
    }
    if x == x_low {
        return Ok(y_low);
    }
    if x == x_high {
        return Ok(y_high);
    }
    Ok(y_low + (x - x_low) * (y_high - y_low) / (x_high - x_low))
}
