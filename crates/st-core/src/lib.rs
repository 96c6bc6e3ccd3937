//! st-core: stable foundation for steamtab.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers + linear interpolation)
//! - units (quantity kinds, affine `Unit`, `convert`, unit catalog)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{StError, StResult};
pub use numeric::*;
pub use units::{QuantityKind, Unit, catalog, convert};
