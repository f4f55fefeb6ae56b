//! A single caplet or floorlet on an Ibor index.

use capfloor_core::{ensure, Currency, PutCall, Rate, Real, Result, Time};
use capfloor_market::{IborIndex, IborIndexObservation};
use chrono::NaiveDate;

// ────────────────────────────────────────────────────────────────────────────
// IborCapletFloorletPeriod
// ────────────────────────────────────────────────────────────────────────────

/// A caplet or floorlet paying `notional × year_fraction × max(±(r − K), 0)`
/// on the payment date, where `r` is the index fixing.
///
/// Exactly one of the caplet and floorlet strikes is set. A positive
/// notional is a long position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IborCapletFloorletPeriod {
    currency: Currency,
    notional: Real,
    start_date: NaiveDate,
    end_date: NaiveDate,
    payment_date: NaiveDate,
    year_fraction: Time,
    caplet: Option<Rate>,
    floorlet: Option<Rate>,
    observation: IborIndexObservation,
}

impl IborCapletFloorletPeriod {
    /// Start building a period on `observation`.
    ///
    /// Dates, currency and year fraction default to those of the underlying
    /// deposit; the notional defaults to one.
    pub fn builder(observation: IborIndexObservation) -> IborCapletFloorletPeriodBuilder {
        IborCapletFloorletPeriodBuilder::new(observation)
    }

    /// Payment currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Signed notional.
    pub fn notional(&self) -> Real {
        self.notional
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

    /// Caplet strike, if this is a caplet.
    pub fn caplet(&self) -> Option<Rate> {
        self.caplet
    }

    /// Floorlet strike, if this is a floorlet.
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

    /// `Call` for a caplet, `Put` for a floorlet.
    pub fn put_call(&self) -> PutCall {
        if self.caplet.is_some() {
            PutCall::Call
        } else {
            PutCall::Put
        }
    }

    /// A copy with a different notional.
    pub fn with_notional(&self, notional: Real) -> Self {
        Self { notional, ..*self }
    }

    /// Undiscounted cash paid for a fixing of `rate`.
    pub fn payoff(&self, rate: Rate) -> Real {
        self.notional * self.year_fraction * self.put_call().intrinsic(rate, self.strike())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Builder
// ────────────────────────────────────────────────────────────────────────────

/// Builder for [`IborCapletFloorletPeriod`].
#[derive(Debug, Clone)]
pub struct IborCapletFloorletPeriodBuilder {
    observation: IborIndexObservation,
    currency: Option<Currency>,
    notional: Real,
    dates: Option<(NaiveDate, NaiveDate)>,
    payment_date: Option<NaiveDate>,
    year_fraction: Option<Time>,
    caplet: Option<Rate>,
    floorlet: Option<Rate>,
}

impl IborCapletFloorletPeriodBuilder {
    /// Start building on `observation`.
    pub fn new(observation: IborIndexObservation) -> Self {
        Self {
            observation,
            currency: None,
            notional: 1.0,
            dates: None,
            payment_date: None,
            year_fraction: None,
            caplet: None,
            floorlet: None,
        }
    }

    /// Set the signed notional.
    pub fn with_notional(mut self, notional: Real) -> Self {
        self.notional = notional;
        self
    }

    /// Set the payment currency (defaults to the index currency).
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    /// Make this a caplet struck at `strike`.
    pub fn with_caplet(mut self, strike: Rate) -> Self {
        self.caplet = Some(strike);
        self
    }

    /// Make this a floorlet struck at `strike`.
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
    /// `Error::Configuration` if both or neither strike is set, if the dates
    /// are out of order, or if the currency differs from the index currency.
    pub fn build(self) -> Result<IborCapletFloorletPeriod> {
        let obs = self.observation;
        let (start_date, end_date) = self
            .dates
            .unwrap_or((obs.effective_date(), obs.maturity_date()));
        let payment_date = self.payment_date.unwrap_or(end_date);
        let currency = self.currency.unwrap_or_else(|| obs.currency());
        let year_fraction = self.year_fraction.unwrap_or_else(|| obs.year_fraction());
        ensure!(
            self.notional.is_finite(),
            "caplet/floorlet notional must be finite, got {}",
            self.notional
        );
        check_period(&obs, currency, start_date, end_date, payment_date, year_fraction)?;
        check_strikes(self.caplet, self.floorlet)?;
        Ok(IborCapletFloorletPeriod {
            currency,
            notional: self.notional,
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

pub(crate) fn check_strikes(caplet: Option<Rate>, floorlet: Option<Rate>) -> Result<()> {
    match (caplet, floorlet) {
        (Some(k), None) | (None, Some(k)) => {
            ensure!(k.is_finite(), "strike must be finite, got {k}");
            Ok(())
        }
        (Some(_), Some(_)) => Err(capfloor_core::Error::Configuration(
            "only one of caplet and floorlet strike may be set".into(),
        )),
        (None, None) => Err(capfloor_core::Error::Configuration(
            "one of caplet and floorlet strike must be set".into(),
        )),
    }
}

pub(crate) fn check_period(
    observation: &IborIndexObservation,
    currency: Currency,
    start_date: NaiveDate,
    end_date: NaiveDate,
    payment_date: NaiveDate,
    year_fraction: Time,
) -> Result<()> {
    ensure!(
        start_date < end_date,
        "period start {start_date} must be before end {end_date}"
    );
    ensure!(
        observation.fixing_date() <= payment_date,
        "fixing date {} after payment date {payment_date}",
        observation.fixing_date()
    );
    ensure!(
        start_date <= payment_date,
        "payment date {payment_date} before period start {start_date}"
    );
    ensure!(
        year_fraction.is_finite() && year_fraction >= 0.0,
        "year fraction must be finite and non-negative, got {year_fraction}"
    );
    ensure!(
        currency == observation.currency(),
        "period currency {currency} differs from index currency {}",
        observation.currency()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use capfloor_core::Error;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn observation() -> IborIndexObservation {
        IborIndexObservation::of(IborIndex::EUR_EURIBOR_3M, date(2011, 1, 3)).unwrap()
    }

    #[test]
    fn defaults_follow_the_observation() {
        let p = IborCapletFloorletPeriod::builder(observation())
            .with_notional(1.0e6)
            .with_caplet(0.01)
            .build()
            .unwrap();
        assert_eq!(p.start_date(), date(2011, 1, 5));
        assert_eq!(p.end_date(), date(2011, 4, 5));
        assert_eq!(p.payment_date(), p.end_date());
        assert_eq!(p.currency(), Currency::EUR);
        assert_relative_eq!(p.year_fraction(), 90.0 / 360.0);
        assert_eq!(p.put_call(), PutCall::Call);
        assert_eq!(p.strike(), 0.01);
    }

    #[test]
    fn payoff_is_notional_accrual_and_intrinsic() {
        let cap = IborCapletFloorletPeriod::builder(observation())
            .with_notional(1.0e6)
            .with_caplet(0.01)
            .build()
            .unwrap();
        assert_relative_eq!(cap.payoff(0.03), 1.0e6 * 0.25 * 0.02, max_relative = 1e-12);
        assert_eq!(cap.payoff(0.005), 0.0);
        let floor = IborCapletFloorletPeriod::builder(observation())
            .with_notional(-2.0e6)
            .with_floorlet(0.02)
            .build()
            .unwrap();
        assert_relative_eq!(floor.payoff(0.015), -2.0e6 * 0.25 * 0.005, max_relative = 1e-12);
        assert_eq!(floor.put_call(), PutCall::Put);
    }

    #[test]
    fn with_notional_keeps_everything_else() {
        let p = IborCapletFloorletPeriod::builder(observation())
            .with_caplet(0.01)
            .build()
            .unwrap();
        let q = p.with_notional(-5.0);
        assert_eq!(q.notional(), -5.0);
        assert_eq!(q.strike(), p.strike());
        assert_eq!(q.payment_date(), p.payment_date());
    }

    #[test]
    fn rejects_both_or_neither_strike() {
        let both = IborCapletFloorletPeriod::builder(observation())
            .with_caplet(0.01)
            .with_floorlet(0.01)
            .build();
        assert!(matches!(both, Err(Error::Configuration(_))));
        let neither = IborCapletFloorletPeriod::builder(observation()).build();
        assert!(matches!(neither, Err(Error::Configuration(_))));
    }

    #[test]
    fn rejects_inverted_dates_and_foreign_currency() {
        let inverted = IborCapletFloorletPeriod::builder(observation())
            .with_caplet(0.01)
            .with_dates(date(2011, 4, 5), date(2011, 1, 5))
            .build();
        assert!(inverted.is_err());
        let early_payment = IborCapletFloorletPeriod::builder(observation())
            .with_caplet(0.01)
            .with_payment_date(date(2010, 12, 31))
            .build();
        assert!(early_payment.is_err());
        let usd = IborCapletFloorletPeriod::builder(observation())
            .with_caplet(0.01)
            .with_currency(Currency::USD)
            .build();
        assert!(matches!(usd, Err(Error::Configuration(_))));
    }
}
