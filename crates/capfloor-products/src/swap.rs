//! Fixed and Ibor coupon periods and the swap legs built from them.
//!
//! A swap leg is the optional funding leg of a cap/floor. Notionals are
//! signed: negative coupons are paid.

use capfloor_core::{ensure, Currency, Error, Rate, Real, Result, Time};
use capfloor_market::IborIndexObservation;
use chrono::NaiveDate;

// ────────────────────────────────────────────────────────────────────────────
// Coupon periods
// ────────────────────────────────────────────────────────────────────────────

/// A coupon paying `notional × year_fraction × rate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRatePaymentPeriod {
    currency: Currency,
    notional: Real,
    start_date: NaiveDate,
    end_date: NaiveDate,
    payment_date: NaiveDate,
    year_fraction: Time,
    rate: Rate,
}

impl FixedRatePaymentPeriod {
    /// Create a fixed coupon.
    ///
    /// # Errors
    /// `Error::Configuration` if the accrual dates are inverted, the payment
    /// precedes the accrual start, or any amount is not finite.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        currency: Currency,
        notional: Real,
        start_date: NaiveDate,
        end_date: NaiveDate,
        payment_date: NaiveDate,
        year_fraction: Time,
        rate: Rate,
    ) -> Result<Self> {
        check_coupon(start_date, end_date, payment_date, year_fraction)?;
        ensure!(
            notional.is_finite() && rate.is_finite(),
            "fixed coupon: notional and rate must be finite"
        );
        Ok(Self {
            currency,
            notional,
            start_date,
            end_date,
            payment_date,
            year_fraction,
            rate,
        })
    }

    /// The fixed rate.
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Accrual year fraction.
    pub fn year_fraction(&self) -> Time {
        self.year_fraction
    }

    /// The undiscounted coupon amount.
    pub fn amount(&self) -> Real {
        self.notional * self.year_fraction * self.rate
    }
}

/// A coupon paying `notional × year_fraction × (fixing + spread)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IborRatePaymentPeriod {
    currency: Currency,
    notional: Real,
    start_date: NaiveDate,
    end_date: NaiveDate,
    payment_date: NaiveDate,
    year_fraction: Time,
    observation: IborIndexObservation,
    spread: Rate,
}

impl IborRatePaymentPeriod {
    /// A coupon accruing over the underlying deposit of `observation` and
    /// paid at its maturity.
    pub fn of(observation: IborIndexObservation, notional: Real, spread: Rate) -> Result<Self> {
        Self::new(
            observation,
            notional,
            spread,
            observation.effective_date(),
            observation.maturity_date(),
            observation.maturity_date(),
            observation.year_fraction(),
        )
    }

    /// A coupon with explicit accrual and payment dates.
    ///
    /// # Errors
    /// `Error::Configuration` on inverted dates, a payment before the
    /// fixing, or non-finite amounts.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        observation: IborIndexObservation,
        notional: Real,
        spread: Rate,
        start_date: NaiveDate,
        end_date: NaiveDate,
        payment_date: NaiveDate,
        year_fraction: Time,
    ) -> Result<Self> {
        check_coupon(start_date, end_date, payment_date, year_fraction)?;
        ensure!(
            observation.fixing_date() <= payment_date,
            "Ibor coupon: fixing {} after payment {payment_date}",
            observation.fixing_date()
        );
        ensure!(
            notional.is_finite() && spread.is_finite(),
            "Ibor coupon: notional and spread must be finite"
        );
        Ok(Self {
            currency: observation.currency(),
            notional,
            start_date,
            end_date,
            payment_date,
            year_fraction,
            observation,
            spread,
        })
    }

    /// The index observation.
    pub fn observation(&self) -> &IborIndexObservation {
        &self.observation
    }

    /// Additive spread over the fixing.
    pub fn spread(&self) -> Rate {
        self.spread
    }

    /// Accrual year fraction.
    pub fn year_fraction(&self) -> Time {
        self.year_fraction
    }

    /// The undiscounted coupon amount for a fixing of `rate`.
    pub fn amount(&self, rate: Rate) -> Real {
        self.notional * self.year_fraction * (rate + self.spread)
    }
}

fn check_coupon(
    start_date: NaiveDate,
    end_date: NaiveDate,
    payment_date: NaiveDate,
    year_fraction: Time,
) -> Result<()> {
    ensure!(
        start_date < end_date,
        "coupon start {start_date} must be before end {end_date}"
    );
    ensure!(
        start_date <= payment_date,
        "coupon payment {payment_date} before start {start_date}"
    );
    ensure!(
        year_fraction.is_finite() && year_fraction >= 0.0,
        "coupon year fraction must be finite and non-negative, got {year_fraction}"
    );
    Ok(())
}

/// A fixed or Ibor coupon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RatePaymentPeriod {
    /// Fixed-rate coupon.
    Fixed(FixedRatePaymentPeriod),
    /// Ibor coupon.
    Ibor(IborRatePaymentPeriod),
}

impl From<FixedRatePaymentPeriod> for RatePaymentPeriod {
    fn from(p: FixedRatePaymentPeriod) -> Self {
        RatePaymentPeriod::Fixed(p)
    }
}

impl From<IborRatePaymentPeriod> for RatePaymentPeriod {
    fn from(p: IborRatePaymentPeriod) -> Self {
        RatePaymentPeriod::Ibor(p)
    }
}

macro_rules! forward {
    ($self:ident . $field:ident) => {
        match $self {
            RatePaymentPeriod::Fixed(p) => p.$field,
            RatePaymentPeriod::Ibor(p) => p.$field,
        }
    };
}

impl RatePaymentPeriod {
    /// Payment currency.
    pub fn currency(&self) -> Currency {
        forward!(self.currency)
    }

    /// Signed notional.
    pub fn notional(&self) -> Real {
        forward!(self.notional)
    }

    /// Accrual start.
    pub fn start_date(&self) -> NaiveDate {
        forward!(self.start_date)
    }

    /// Accrual end.
    pub fn end_date(&self) -> NaiveDate {
        forward!(self.end_date)
    }

    /// Payment date.
    pub fn payment_date(&self) -> NaiveDate {
        forward!(self.payment_date)
    }

    /// Accrual year fraction.
    pub fn year_fraction(&self) -> Time {
        forward!(self.year_fraction)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// SwapLeg
// ────────────────────────────────────────────────────────────────────────────

/// An ordered list of coupons in one currency.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapLeg {
    periods: Vec<RatePaymentPeriod>,
}

impl SwapLeg {
    /// Validate and wrap `periods`.
    ///
    /// # Errors
    /// `Error::Configuration` if the list is empty or mixes currencies.
    pub fn new(periods: Vec<RatePaymentPeriod>) -> Result<Self> {
        let currency = periods
            .first()
            .map(RatePaymentPeriod::currency)
            .ok_or_else(|| Error::Configuration("swap leg must have at least one coupon".into()))?;
        ensure!(
            periods.iter().all(|p| p.currency() == currency),
            "swap leg coupons must all be in {currency}"
        );
        Ok(Self { periods })
    }

    /// The coupons.
    pub fn periods(&self) -> &[RatePaymentPeriod] {
        &self.periods
    }

    /// The leg currency.
    pub fn currency(&self) -> Currency {
        self.periods[0].currency()
    }

    /// Number of coupons.
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Always `false`: a leg has at least one coupon.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}
