//! # capfloor-products
//!
//! The instruments priced by `capfloor-pricer`: caplet/floorlet periods and
//! their binary counterparts, cap/floor legs, the swap legs used as funding
//! legs, premium payments, and the product and trade wrappers.
//!
//! Every type here is immutable and validated at construction.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `IborCapletFloorletBinaryPeriod`: digital caplet or floorlet.
pub mod binary_period;

/// `IborCapFloor` product and `IborCapFloorTrade`.
pub mod cap_floor;

/// `IborCapFloorLeg`: an ordered strip of caplets or floorlets.
pub mod leg;

/// `Payment`: a single dated cash amount.
pub mod payment;

/// `IborCapletFloorletPeriod` and its builder.
pub mod period;

/// Fixed and Ibor coupon periods and `SwapLeg`.
pub mod swap;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use binary_period::{IborCapletFloorletBinaryPeriod, IborCapletFloorletBinaryPeriodBuilder};
pub use cap_floor::{IborCapFloor, IborCapFloorTrade};
pub use leg::IborCapFloorLeg;
pub use payment::Payment;
pub use period::{IborCapletFloorletPeriod, IborCapletFloorletPeriodBuilder};
pub use swap::{FixedRatePaymentPeriod, IborRatePaymentPeriod, RatePaymentPeriod, SwapLeg};
