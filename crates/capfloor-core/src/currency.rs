//! ISO 4217 currency identifiers.

use std::fmt;

/// A currency, identified by its ISO 4217 alphabetic code.
///
/// Currencies are small `Copy` values compared and ordered by code, so they
/// can key the hash and ordered maps used by providers and amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Currency {
    code: &'static str,
}

impl Currency {
    /// Euro.
    pub const EUR: Currency = Currency { code: "EUR" };
    /// United States Dollar.
    pub const USD: Currency = Currency { code: "USD" };
    /// Pound Sterling.
    pub const GBP: Currency = Currency { code: "GBP" };
    /// Japanese Yen.
    pub const JPY: Currency = Currency { code: "JPY" };
    /// Swiss Franc.
    pub const CHF: Currency = Currency { code: "CHF" };

    /// The ISO 4217 code (e.g. `"EUR"`).
    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_code() {
        assert_eq!(Currency::EUR.to_string(), "EUR");
        assert_eq!(Currency::USD.code(), "USD");
    }

    #[test]
    fn ordering_by_code() {
        assert!(Currency::EUR < Currency::USD);
        assert!(Currency::CHF < Currency::EUR);
    }
}
