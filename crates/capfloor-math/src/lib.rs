//! # capfloor-math
//!
//! Stateless numerics used by the pricers: the normal distribution (via
//! statrs), the Black-76 and Bachelier option formulas with their Greeks,
//! the Hagan SABR implied volatility with its adjoint, and linear/bilinear
//! interpolation that also reports node weights (over nalgebra).

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Probability distributions.
pub mod distributions;

/// Closed-form option formulas.
pub mod formula;

/// Interpolation with node sensitivities.
pub mod interpolations;

/// SABR implied volatility and its adjoint.
pub mod sabr;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use distributions::{normal_cdf, normal_pdf};
pub use formula::{bachelier, black};
pub use interpolations::{BilinearInterpolation, LinearInterpolation};
pub use sabr::{sabr_volatility, sabr_volatility_adjoint, SabrParameters, SabrVolatilityAdjoint};
