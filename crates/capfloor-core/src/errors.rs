//! Error types for capfloor-rs.
//!
//! Every fallible operation in the workspace returns [`Result`], whose error
//! is the single `thiserror`-derived [`Error`] enum below. Construction-time
//! validation goes through the [`ensure!`](crate::ensure) macro.

use thiserror::Error;

/// The top-level error type used throughout capfloor-rs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A pricer was handed volatilities of the wrong model family.
    #[error("invalid volatility model: pricer expects {expected}, found {found}")]
    InvalidModel {
        /// Model family the pricer is built for.
        expected: String,
        /// Model family of the volatilities supplied.
        found: String,
    },

    /// An option-only quantity was requested after the option expired.
    #[error("option has expired: {0}")]
    ExpiredOption(String),

    /// A malformed object was rejected at construction time.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A curve, fixing, or other market input is absent from a snapshot.
    #[error("missing market data: {0}")]
    MissingMarketData(String),
}

/// Shorthand `Result` type used throughout capfloor-rs.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Validate a construction-time condition.
///
/// Returns `Err(Error::Configuration(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use capfloor_core::{ensure, errors::Error};
/// fn positive_spread(x: f64) -> capfloor_core::Result<f64> {
///     ensure!(x > 0.0, "spread must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive_spread(1.0e-4).is_ok());
/// assert!(matches!(positive_spread(0.0), Err(Error::Configuration(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Configuration(
                format!($($msg)*)
            ));
        }
    };
}
