//! # capfloor-market
//!
//! Market data consumed by the cap/floor pricers: Ibor indices and their
//! observations, interpolated curves and surfaces, the rates provider, the
//! caplet volatility models, and the point and parameter sensitivities that
//! flow between them.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `InterpolatedCurve`: named 1D curve with node sensitivities.
pub mod curve;

/// `ZeroRateDiscountFactors`: discount factors from a zero-rate curve.
pub mod discount_factors;

/// Finite-difference parameter sensitivities, for validating analytic risk.
pub mod finite_difference;

/// `IborIndex` and `IborIndexObservation`.
pub mod index;

/// `RatesProvider` and the immutable snapshot implementation.
pub mod provider;

/// Point and parameter sensitivities.
pub mod sensitivity;

/// `InterpolatedSurface`: named expiry × strike surface.
pub mod surface;

/// Caplet volatilities for the Black, shifted-Black, Normal and SABR models.
pub mod volatility;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use curve::InterpolatedCurve;
pub use discount_factors::ZeroRateDiscountFactors;
pub use finite_difference::FiniteDifferenceCalculator;
pub use index::{IborIndex, IborIndexObservation};
pub use provider::{ImmutableRatesProvider, ImmutableRatesProviderBuilder, RatesProvider};
pub use sensitivity::{
    CapletVolatilitySensitivity, CurrencyParameterSensitivities, CurrencyParameterSensitivity,
    IborRateSensitivity, PointSensitivities, PointSensitivity, PointSensitivityBuilder,
    SabrParameterSensitivity, SabrParameterType, ZeroRateSensitivity,
};
pub use surface::InterpolatedSurface;
pub use volatility::{
    BlackCapletVolatilities, CapletVolatilities, NormalCapletVolatilities,
    SabrCapletVolatilities, SabrParameterCurves, ShiftedBlackCapletVolatilities, VolatilityModel,
};
