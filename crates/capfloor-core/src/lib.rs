//! # capfloor-core
//!
//! Core types, currencies, amounts, and error definitions for capfloor-rs.
//!
//! This crate provides the building blocks shared by every other crate in the
//! workspace – numeric type aliases, the error enum with its `ensure!` macro,
//! currencies and currency amounts, the put/call flag, day counts, and the
//! fixing time series used by rate indices.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Currencies.
pub mod currency;

/// Single- and multi-currency amounts.
pub mod currency_amount;

/// Day-count conventions.
pub mod day_count;

/// Error types and the `ensure!` macro.
pub mod errors;

/// Date-indexed fixing series.
pub mod fixing_series;

/// Put/call flag.
pub mod put_call;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// A rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A discount factor, normally in (0, 1].
pub type DiscountFactor = Real;

/// A volatility level expressed as a decimal (log-normal) or in rate units
/// (normal).
pub type Volatility = Real;

/// A time measurement in years.
pub type Time = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use currency::Currency;
pub use currency_amount::{CurrencyAmount, MultiCurrencyAmount};
pub use day_count::DayCount;
pub use errors::{Error, Result};
pub use fixing_series::FixingSeries;
pub use put_call::PutCall;
