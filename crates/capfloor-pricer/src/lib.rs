//! # capfloor-pricer
//!
//! Pricers for caplets, floorlets and their aggregates.
//!
//! The layering follows the products: a period pricer per volatility family,
//! a vertical-spread pricer for binaries on top of it, then the leg, product
//! and trade pricers. Each layer is generic over the period pricer so the
//! SABR-only sticky-model sensitivity is available only where it makes sense.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Binary periods priced as call/put spreads.
pub mod binary_pricer;

/// `PricingConfig`: binary spread and parallel threshold.
pub mod config;

/// Discounting pricers for coupons, swap legs and payments.
pub mod discounting;

/// `FixingState`: before, on, after fixing, or paid.
pub mod fixing_state;

/// Cap/floor leg pricer.
pub mod leg_pricer;

/// The period pricer trait and the Black, shifted-Black and Normal pricers.
pub mod period_pricer;

/// `PeriodValues`: per-caplet results of a leg.
pub mod period_values;

/// Cap/floor product pricer.
pub mod product_pricer;

/// SABR period pricer.
pub mod sabr_period_pricer;

/// Cap/floor trade pricer.
pub mod trade_pricer;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use binary_pricer::VerticalSpreadBinaryIborCapletFloorletPeriodPricer;
pub use config::{PricingConfig, DEFAULT_BINARY_SPREAD, DEFAULT_PARALLEL_THRESHOLD};
pub use discounting::{
    DiscountingPaymentPricer, DiscountingRatePaymentPeriodPricer, DiscountingSwapLegPricer,
};
pub use fixing_state::FixingState;
pub use leg_pricer::IborCapFloorLegPricer;
pub use period_pricer::{IborCapletFloorletPeriodPricer, VolatilityIborCapletFloorletPeriodPricer};
pub use period_values::PeriodValues;
pub use product_pricer::IborCapFloorProductPricer;
pub use sabr_period_pricer::SabrIborCapletFloorletPeriodPricer;
pub use trade_pricer::IborCapFloorTradePricer;
