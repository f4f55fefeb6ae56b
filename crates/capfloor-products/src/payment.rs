//! A single dated payment, used for premiums.

use capfloor_core::{Currency, CurrencyAmount, Real};
use chrono::NaiveDate;

/// An amount of one currency paid on a date. Positive amounts are received.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Payment {
    value: CurrencyAmount,
    date: NaiveDate,
}

impl Payment {
    /// A payment of `value` on `date`.
    pub fn new(value: CurrencyAmount, date: NaiveDate) -> Self {
        Self { value, date }
    }

    /// A payment of `amount` in `currency` on `date`.
    pub fn of(currency: Currency, amount: Real, date: NaiveDate) -> Self {
        Self::new(CurrencyAmount::new(currency, amount), date)
    }

    /// The paid amount.
    pub fn value(&self) -> CurrencyAmount {
        self.value
    }

    /// The payment currency.
    pub fn currency(&self) -> Currency {
        self.value.currency()
    }

    /// The signed amount.
    pub fn amount(&self) -> Real {
        self.value.amount()
    }

    /// The payment date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }
}
