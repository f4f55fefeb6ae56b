//! Currency amounts.
//!
//! [`CurrencyAmount`] is a signed value in one currency; [`MultiCurrencyAmount`]
//! is a set of such values keyed by currency, used wherever a result may span
//! several currencies (trade present value, currency exposure).

use crate::currency::Currency;
use crate::errors::{Error, Result};
use crate::Real;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, Neg};

/// A signed amount of money in a single currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrencyAmount {
    currency: Currency,
    amount: Real,
}

impl CurrencyAmount {
    /// Create a new amount.
    pub fn new(currency: Currency, amount: Real) -> Self {
        Self { currency, amount }
    }

    /// A zero amount in `currency`.
    pub fn zero(currency: Currency) -> Self {
        Self::new(currency, 0.0)
    }

    /// The currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// The signed amount.
    pub fn amount(&self) -> Real {
        self.amount
    }

    /// Add another amount in the same currency.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] when the currencies differ.
    pub fn plus(&self, other: CurrencyAmount) -> Result<Self> {
        if self.currency != other.currency {
            return Err(Error::Configuration(format!(
                "cannot add {} to {}",
                other.currency, self.currency
            )));
        }
        Ok(Self::new(self.currency, self.amount + other.amount))
    }

    /// Add a plain value in this amount's currency.
    pub fn plus_value(&self, value: Real) -> Self {
        Self::new(self.currency, self.amount + value)
    }

    /// Scale the amount.
    pub fn multiplied_by(&self, factor: Real) -> Self {
        Self::new(self.currency, self.amount * factor)
    }

    /// The amount with its sign flipped.
    pub fn negated(&self) -> Self {
        Self::new(self.currency, -self.amount)
    }
}

impl Neg for CurrencyAmount {
    type Output = CurrencyAmount;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency, self.amount)
    }
}

/// A collection of amounts, at most one per currency.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiCurrencyAmount {
    amounts: BTreeMap<Currency, Real>,
}

impl MultiCurrencyAmount {
    /// An empty amount.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A single-currency amount.
    pub fn of(amount: CurrencyAmount) -> Self {
        Self::empty().plus(amount)
    }

    /// Add an amount, merging with any existing amount in the same currency.
    pub fn plus(mut self, amount: CurrencyAmount) -> Self {
        *self.amounts.entry(amount.currency()).or_insert(0.0) += amount.amount();
        self
    }

    /// Add every amount of `other`.
    pub fn plus_all(self, other: &MultiCurrencyAmount) -> Self {
        other.iter().fold(self, |acc, ca| acc.plus(ca))
    }

    /// The amount in `currency`, zero if absent.
    pub fn amount(&self, currency: Currency) -> CurrencyAmount {
        CurrencyAmount::new(currency, self.amounts.get(&currency).copied().unwrap_or(0.0))
    }

    /// The amount in `currency`, if present.
    pub fn get(&self, currency: Currency) -> Option<CurrencyAmount> {
        self.amounts
            .get(&currency)
            .map(|&a| CurrencyAmount::new(currency, a))
    }

    /// Whether a currency is present.
    pub fn contains(&self, currency: Currency) -> bool {
        self.amounts.contains_key(&currency)
    }

    /// Currencies present, in code order.
    pub fn currencies(&self) -> Vec<Currency> {
        self.amounts.keys().copied().collect()
    }

    /// Number of currencies present.
    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    /// Whether no currency is present.
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Iterate over the amounts in currency order.
    pub fn iter(&self) -> impl Iterator<Item = CurrencyAmount> + '_ {
        self.amounts
            .iter()
            .map(|(&ccy, &a)| CurrencyAmount::new(ccy, a))
    }

    /// Scale every amount.
    pub fn multiplied_by(&self, factor: Real) -> Self {
        Self {
            amounts: self
                .amounts
                .iter()
                .map(|(&ccy, &a)| (ccy, a * factor))
                .collect(),
        }
    }
}

impl Add for MultiCurrencyAmount {
    type Output = MultiCurrencyAmount;

    fn add(self, rhs: Self) -> Self::Output {
        self.plus_all(&rhs)
    }
}

impl FromIterator<CurrencyAmount> for MultiCurrencyAmount {
    fn from_iter<I: IntoIterator<Item = CurrencyAmount>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), |acc, ca| acc.plus(ca))
    }
}
