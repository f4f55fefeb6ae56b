//! A strip of caplets or floorlets on one index.

use crate::period::IborCapletFloorletPeriod;
use capfloor_core::{ensure, Currency, Error, Result};
use capfloor_market::IborIndex;
use chrono::NaiveDate;

/// An ordered, non-overlapping sequence of caplet/floorlet periods sharing
/// one currency and one index.
#[derive(Debug, Clone, PartialEq)]
pub struct IborCapFloorLeg {
    periods: Vec<IborCapletFloorletPeriod>,
}

impl IborCapFloorLeg {
    /// Validate and wrap `periods`.
    ///
    /// # Errors
    /// `Error::Configuration` if the list is empty, mixes currencies or
    /// indices, or if a period starts before its predecessor ends.
    pub fn new(periods: Vec<IborCapletFloorletPeriod>) -> Result<Self> {
        let first = periods
            .first()
            .ok_or_else(|| Error::Configuration("cap/floor leg must have at least one period".into()))?;
        let (currency, index) = (first.currency(), first.index());
        for p in &periods {
            ensure!(
                p.currency() == currency,
                "cap/floor leg mixes currencies {currency} and {}",
                p.currency()
            );
            ensure!(
                p.index() == index,
                "cap/floor leg mixes indices {index} and {}",
                p.index()
            );
        }
        for w in periods.windows(2) {
            ensure!(
                w[0].end_date() <= w[1].start_date(),
                "cap/floor leg periods overlap: {} ends after {} starts",
                w[0].end_date(),
                w[1].start_date()
            );
        }
        Ok(Self { periods })
    }

    /// The periods in chronological order.
    pub fn periods(&self) -> &[IborCapletFloorletPeriod] {
        &self.periods
    }

    /// Number of periods.
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Always `false`: a leg has at least one period.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// The leg currency.
    pub fn currency(&self) -> Currency {
        self.periods[0].currency()
    }

    /// The index.
    pub fn index(&self) -> IborIndex {
        self.periods[0].index()
    }

    /// Start of the first period.
    pub fn start_date(&self) -> NaiveDate {
        self.periods[0].start_date()
    }

    /// End of the last period.
    pub fn end_date(&self) -> NaiveDate {
        self.periods[self.periods.len() - 1].end_date()
    }
}

impl<'a> IntoIterator for &'a IborCapFloorLeg {
    type Item = &'a IborCapletFloorletPeriod;
    type IntoIter = std::slice::Iter<'a, IborCapletFloorletPeriod>;

    fn into_iter(self) -> Self::IntoIter {
        self.periods.iter()
    }
}
