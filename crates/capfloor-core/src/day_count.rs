//! Day-count conventions.
//!
//! Only the two actual-day conventions needed to turn dates into option
//! expiries and index accruals are provided; full day-count support belongs
//! to the market-data layer that builds the inputs.

use crate::Time;
use chrono::NaiveDate;
use std::fmt;

/// A convention for counting the fraction of a year between two dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum DayCount {
    /// Actual/360: `actual_days / 360`.
    Act360,
    /// Actual/365 (Fixed): `actual_days / 365`.
    #[default]
    Act365F,
}

impl DayCount {
    /// Number of actual days from `start` to `end` (negative if `end` is earlier).
    pub fn days(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        (end - start).num_days()
    }

    /// Fraction of a year from `start` to `end`.
    pub fn year_fraction(&self, start: NaiveDate, end: NaiveDate) -> Time {
        let days = self.days(start, end) as f64;
        match self {
            DayCount::Act360 => days / 360.0,
            DayCount::Act365F => days / 365.0,
        }
    }

    /// Signed fraction of a year relative to `reference`.
    ///
    /// Equal to `year_fraction(reference, date)`; negative when `date` is
    /// before `reference`.
    pub fn relative_year_fraction(&self, reference: NaiveDate, date: NaiveDate) -> Time {
        self.year_fraction(reference, date)
    }
}

impl fmt::Display for DayCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayCount::Act360 => write!(f, "Act/360"),
            DayCount::Act365F => write!(f, "Act/365F"),
        }
    }
}
