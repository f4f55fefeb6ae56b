//! Closed-form option formulas on a forward.
//!
//! All functions are undiscounted and per unit notional. Degenerate inputs
//! (zero time value, zero strike, zero forward) collapse to the intrinsic
//! value and its derivatives instead of producing NaN.

pub mod bachelier;
pub mod black;

/// Below this level `σ√T`, strike, or forward are treated as zero.
pub(crate) const SMALL: f64 = 1.0e-13;
