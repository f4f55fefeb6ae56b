//! Binary (digital) caplets and floorlets.

use crate::period::{check_period, check_strikes};
use capfloor_core::{ensure, Currency, PutCall, Rate, Real, Result, Time};
use capfloor_market::{IborIndex, IborIndexObservation};
use chrono::NaiveDate;

/// Pays a fixed signed `amount` when the fixing ends in the money.
///
/// A binary caplet pays when the fixing is strictly above the strike, a
/// binary floorlet when it is strictly below.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IborCapletFloorletBinaryPeriod {
    currency: Currency,
    amount: Real,
    start_date: NaiveDate,
    end_date: NaiveDate,
    payment_date: NaiveDate,
    year_fraction: Time,
    caplet: Option<Rate>,
    floorlet: Option<Rate>,
    observation: IborIndexObservation,
}

impl IborCapletFloorletBinaryPeriod {
    /// Start building a binary period on `observation`.
    pub fn builder(observation: IborIndexObservation) -> IborCapletFloorletBinaryPeriodBuilder {
        IborCapletFloorletBinaryPeriodBuilder::new(observation)
    }

    /// Payment currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Signed amount paid in the money.
    pub fn amount(&self) -> Real {
        self.amount
    }

    /// Accrual start.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Accrual end.
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Payment date.
    pub fn payment_date(&self) -> NaiveDate {
        self.payment_date
    }

    /// Accrual year fraction.
    pub fn year_fraction(&self) -> Time {
        self.year_fraction
    }

    /// Caplet strike, if this is a binary caplet.
    pub fn caplet(&self) -> Option<Rate> {
        self.caplet
    }

    /// Floorlet strike, if this is a binary floorlet.
    pub fn floorlet(&self) -> Option<Rate> {
        self.floorlet
    }

    /// The index observation.
    pub fn observation(&self) -> &IborIndexObservation {
        &self.observation
    }

    /// The index.
    pub fn index(&self) -> IborIndex {
        self.observation.index()
    }

    /// Fixing date of the observation.
    pub fn fixing_date(&self) -> NaiveDate {
        self.observation.fixing_date()
    }

    /// The strike, whichever side is set.
    pub fn strike(&self) -> Rate {
        self.caplet.or(self.floorlet).unwrap_or_default()
    }

    /// `Call` for a binary caplet, `Put` for a binary floorlet.
    pub fn put_call(&self) -> PutCall {
        if self.caplet.is_some() {
            PutCall::Call
        } else {
            PutCall::Put
        }
    }

    /// A copy paying a different amount.
    pub fn with_amount(&self, amount: Real) -> Self {
        Self { amount, ..*self }
    }

    /// The step payoff for a fixing of `rate`.
    pub fn payoff(&self, rate: Rate) -> Real {
        if self.put_call().sign() * (rate - self.strike()) > 0.0 {
            self.amount
        } else {
            0.0
        }
    }
}

/// Builder for [`IborCapletFloorletBinaryPeriod`].
#[derive(Debug, Clone)]
pub struct IborCapletFloorletBinaryPeriodBuilder {
    observation: IborIndexObservation,
    currency: Option<Currency>,
    amount: Real,
    dates: Option<(NaiveDate, NaiveDate)>,
    payment_date: Option<NaiveDate>,
    year_fraction: Option<Time>,
    caplet: Option<Rate>,
    floorlet: Option<Rate>,
}

impl IborCapletFloorletBinaryPeriodBuilder {
    /// Start building on `observation`.
    pub fn new(observation: IborIndexObservation) -> Self {
        Self {
            observation,
            currency: None,
            amount: 1.0,
            dates: None,
            payment_date: None,
            year_fraction: None,
            caplet: None,
            floorlet: None,
        }
    }

    /// Set the signed amount paid in the money.
    pub fn with_amount(mut self, amount: Real) -> Self {
        self.amount = amount;
        self
    }

    /// Set the payment currency (defaults to the index currency).
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    /// Make this a binary caplet struck at `strike`.
    pub fn with_caplet(mut self, strike: Rate) -> Self {
        self.caplet = Some(strike);
        self
    }

    /// Make this a binary floorlet struck at `strike`.
    pub fn with_floorlet(mut self, strike: Rate) -> Self {
        self.floorlet = Some(strike);
        self
    }

    /// Set the accrual dates.
    pub fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.dates = Some((start, end));
        self
    }

    /// Set the payment date (defaults to the accrual end).
    pub fn with_payment_date(mut self, payment_date: NaiveDate) -> Self {
        self.payment_date = Some(payment_date);
        self
    }

    /// Set the accrual year fraction (defaults to the index accrual).
    pub fn with_year_fraction(mut self, year_fraction: Time) -> Self {
        self.year_fraction = Some(year_fraction);
        self
    }

    /// Validate and build.
    ///
    /// # Errors
    /// `Error::Configuration` on the same conditions as a vanilla period, or
    /// a non-finite amount.
    pub fn build(self) -> Result<IborCapletFloorletBinaryPeriod> {
        let obs = self.observation;
        let (start_date, end_date) = self
            .dates
            .unwrap_or((obs.effective_date(), obs.maturity_date()));
        let payment_date = self.payment_date.unwrap_or(end_date);
        let currency = self.currency.unwrap_or_else(|| obs.currency());
        let year_fraction = self.year_fraction.unwrap_or_else(|| obs.year_fraction());
        ensure!(
            self.amount.is_finite(),
            "binary amount must be finite, got {}",
            self.amount
        );
        check_period(&obs, currency, start_date, end_date, payment_date, year_fraction)?;
        check_strikes(self.caplet, self.floorlet)?;
        Ok(IborCapletFloorletBinaryPeriod {
            currency,
            amount: self.amount,
            start_date,
            end_date,
            payment_date,
            year_fraction,
            caplet: self.caplet,
            floorlet: self.floorlet,
            observation: obs,
        })
    }
}
