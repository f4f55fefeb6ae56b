//! Interbank offered-rate indices and their observations.
//!
//! Business-day handling is limited to skipping weekends: holiday calendars
//! belong to whoever builds the periods, and observations can always be
//! constructed with explicit dates.

use capfloor_core::{ensure, Currency, DayCount, Result, Time};
use chrono::{Datelike, Months, NaiveDate, Weekday};
use std::fmt;

/// An Interbank Offered Rate index (e.g. 3M Euribor).
///
/// Indices are small `Copy` values so they can key the provider's curve
/// and fixing maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IborIndex {
    name: &'static str,
    currency: Currency,
    tenor_months: u32,
    fixing_days: u32,
    day_count: DayCount,
}

impl IborIndex {
    /// EUR 3M Euribor: T+2, Act/360.
    pub const EUR_EURIBOR_3M: IborIndex =
        IborIndex::new("EUR-EURIBOR-3M", Currency::EUR, 3, 2, DayCount::Act360);
    /// EUR 6M Euribor: T+2, Act/360.
    pub const EUR_EURIBOR_6M: IborIndex =
        IborIndex::new("EUR-EURIBOR-6M", Currency::EUR, 6, 2, DayCount::Act360);
    /// USD 3M Libor: T+2, Act/360.
    pub const USD_LIBOR_3M: IborIndex =
        IborIndex::new("USD-LIBOR-3M", Currency::USD, 3, 2, DayCount::Act360);
    /// GBP 3M Libor: T+0, Act/365F.
    pub const GBP_LIBOR_3M: IborIndex =
        IborIndex::new("GBP-LIBOR-3M", Currency::GBP, 3, 0, DayCount::Act365F);

    /// Create a new index.
    pub const fn new(
        name: &'static str,
        currency: Currency,
        tenor_months: u32,
        fixing_days: u32,
        day_count: DayCount,
    ) -> Self {
        Self {
            name,
            currency,
            tenor_months,
            fixing_days,
            day_count,
        }
    }

    /// Index name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Index currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Tenor in months.
    pub fn tenor_months(&self) -> u32 {
        self.tenor_months
    }

    /// Business days between fixing and effective date.
    pub fn fixing_days(&self) -> u32 {
        self.fixing_days
    }

    /// Accrual day count.
    pub fn day_count(&self) -> DayCount {
        self.day_count
    }

    /// Effective date of a fixing: `fixing_days` business days later.
    pub fn effective_from_fixing(&self, fixing_date: NaiveDate) -> NaiveDate {
        let mut date = fixing_date;
        for _ in 0..self.fixing_days {
            date = next_business_day(date);
        }
        adjust_following(date)
    }

    /// Maturity of a deposit starting on `effective`: tenor later, modified following.
    pub fn maturity_from_effective(&self, effective: NaiveDate) -> Result<NaiveDate> {
        let unadjusted = effective
            .checked_add_months(Months::new(self.tenor_months))
            .ok_or_else(|| {
                capfloor_core::Error::Configuration(format!(
                    "{}: maturity out of range from {effective}",
                    self.name
                ))
            })?;
        Ok(adjust_modified_following(unadjusted))
    }
}

impl fmt::Display for IborIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn next_business_day(date: NaiveDate) -> NaiveDate {
    adjust_following(date.succ_opt().unwrap_or(date))
}

fn adjust_following(mut date: NaiveDate) -> NaiveDate {
    while is_weekend(date) {
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }
    date
}

fn adjust_modified_following(date: NaiveDate) -> NaiveDate {
    let following = adjust_following(date);
    if following.month() == date.month() {
        return following;
    }
    let mut preceding = date;
    while is_weekend(preceding) {
        match preceding.pred_opt() {
            Some(prev) => preceding = prev,
            None => break,
        }
    }
    preceding
}

/// One fixing of an Ibor index together with the deposit it refers to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IborIndexObservation {
    index: IborIndex,
    fixing_date: NaiveDate,
    effective_date: NaiveDate,
    maturity_date: NaiveDate,
    year_fraction: Time,
}

impl IborIndexObservation {
    /// Observation of `index` on `fixing_date`, deriving effective and
    /// maturity dates from the index conventions.
    pub fn of(index: IborIndex, fixing_date: NaiveDate) -> Result<Self> {
        let effective = index.effective_from_fixing(fixing_date);
        let maturity = index.maturity_from_effective(effective)?;
        Self::new(index, fixing_date, effective, maturity)
    }

    /// Observation with explicit dates; the accrual uses the index day count.
    ///
    /// # Errors
    /// `Error::Configuration` unless `fixing ≤ effective < maturity`.
    pub fn new(
        index: IborIndex,
        fixing_date: NaiveDate,
        effective_date: NaiveDate,
        maturity_date: NaiveDate,
    ) -> Result<Self> {
        ensure!(
            fixing_date <= effective_date,
            "{index}: fixing date {fixing_date} after effective date {effective_date}"
        );
        ensure!(
            effective_date < maturity_date,
            "{index}: effective date {effective_date} not before maturity {maturity_date}"
        );
        Ok(Self {
            index,
            fixing_date,
            effective_date,
            maturity_date,
            year_fraction: index.day_count().year_fraction(effective_date, maturity_date),
        })
    }

    /// The index.
    pub fn index(&self) -> IborIndex {
        self.index
    }

    /// The index currency.
    pub fn currency(&self) -> Currency {
        self.index.currency()
    }

    /// Fixing date.
    pub fn fixing_date(&self) -> NaiveDate {
        self.fixing_date
    }

    /// Start of the underlying deposit.
    pub fn effective_date(&self) -> NaiveDate {
        self.effective_date
    }

    /// End of the underlying deposit.
    pub fn maturity_date(&self) -> NaiveDate {
        self.maturity_date
    }

    /// Accrual of the underlying deposit in the index day count.
    pub fn year_fraction(&self) -> Time {
        self.year_fraction
    }
}
