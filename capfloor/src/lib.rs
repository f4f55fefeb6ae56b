//! # capfloor
//!
//! Pricing and risk for interest-rate caps, floors and their binary
//! variants under Black, shifted Black, Normal and SABR caplet volatilities.
//!
//! This crate is a **façade** that re-exports the workspace crates.
//! Application code should depend on this crate rather than the individual
//! `capfloor-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! capfloor = "0.1"
//! ```
//!
//! ```rust
//! use capfloor::core::Currency;
//! use capfloor::market::{
//!     BlackCapletVolatilities, CapletVolatilities, IborIndex, IborIndexObservation,
//!     ImmutableRatesProvider, InterpolatedCurve, InterpolatedSurface,
//! };
//! use capfloor::pricer::{IborCapletFloorletPeriodPricer, VolatilityIborCapletFloorletPeriodPricer};
//! use capfloor::products::IborCapletFloorletPeriod;
//! use chrono::NaiveDate;
//!
//! # fn main() -> capfloor::core::Result<()> {
//! let valuation = NaiveDate::from_ymd_opt(2008, 8, 18).unwrap();
//! let index = IborIndex::EUR_EURIBOR_3M;
//! let rates = ImmutableRatesProvider::builder(valuation)
//!     .with_discount_curve(Currency::EUR, InterpolatedCurve::constant("EUR-DSC", 0.04)?)
//!     .with_index_curve(index, InterpolatedCurve::constant("EUR-EURIBOR-3M", 0.045)?)
//!     .build()?;
//! let surface = InterpolatedSurface::constant("EUR-BLACK", 0.2)?;
//! let vols: CapletVolatilities = BlackCapletVolatilities::new(index, valuation, surface).into();
//!
//! let fixing = NaiveDate::from_ymd_opt(2011, 1, 3).unwrap();
//! let caplet = IborCapletFloorletPeriod::builder(IborIndexObservation::of(index, fixing)?)
//!     .with_notional(1.0e6)
//!     .with_caplet(0.04)
//!     .build()?;
//!
//! let pricer = VolatilityIborCapletFloorletPeriodPricer::BLACK;
//! let pv = pricer.present_value(&caplet, &rates, &vols)?;
//! assert_eq!(pv.currency(), Currency::EUR);
//! assert!(pv.amount() > 0.0);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, amounts, currencies and error definitions.
pub use capfloor_core as core;

/// Normal distribution, Black and Bachelier formulas, SABR, interpolation.
pub use capfloor_math as math;

/// Indices, curves, rates providers, caplet volatilities and sensitivities.
pub use capfloor_market as market;

/// Caplet/floorlet periods, legs, swap legs, products and trades.
pub use capfloor_products as products;

/// Period, binary, leg, product and trade pricers.
pub use capfloor_pricer as pricer;
