//! Published index fixings keyed by date.
//!
//! A thin ordered map from `NaiveDate` to rate. Missing dates simply return
//! `None`; whether a missing fixing is an error is decided by the caller.

use crate::Rate;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// An ordered series of published fixings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixingSeries {
    data: BTreeMap<NaiveDate, Rate>,
}

impl FromIterator<(NaiveDate, Rate)> for FixingSeries {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, Rate)>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl FixingSeries {
    // ── Constructors ─────────────────────────────────────────────────────

    /// Create an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from parallel slices of dates and values.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`](crate::Error::Configuration) if the
    /// slices have different lengths.
    pub fn from_dates_values(dates: &[NaiveDate], values: &[Rate]) -> crate::Result<Self> {
        crate::ensure!(
            dates.len() == values.len(),
            "fixing series: {} dates but {} values",
            dates.len(),
            values.len()
        );
        Ok(dates.iter().copied().zip(values.iter().copied()).collect())
    }

    /// Return a copy with one more fixing (overwriting an existing one).
    pub fn with_fixing(mut self, date: NaiveDate, value: Rate) -> Self {
        self.data.insert(date, value);
        self
    }

    // ── Inspectors ───────────────────────────────────────────────────────

    /// Number of fixings.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The fixing published on `date`, if any.
    pub fn get(&self, date: NaiveDate) -> Option<Rate> {
        self.data.get(&date).copied()
    }

    /// The latest fixing date, if any.
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.data.keys().next_back().copied()
    }

    /// Iterate over `(date, value)` in date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, Rate)> + '_ {
        self.data.iter().map(|(&d, &v)| (d, v))
    }
}
