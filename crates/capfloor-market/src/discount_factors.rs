//! Discount factors implied by a continuously compounded zero-rate curve.
//!
//! `P(t) = exp(−z(t)·t)` with `t` the Act/365F year fraction from the
//! valuation date.

use crate::curve::InterpolatedCurve;
use crate::sensitivity::{CurrencyParameterSensitivity, ZeroRateSensitivity};
use capfloor_core::{Currency, DayCount, DiscountFactor, Rate, Real, Time};
use chrono::NaiveDate;
use nalgebra::DVector;

/// Discount factors for one currency, backed by a zero-rate curve.
#[derive(Debug, Clone, PartialEq)]
pub struct ZeroRateDiscountFactors {
    currency: Currency,
    valuation_date: NaiveDate,
    day_count: DayCount,
    curve: InterpolatedCurve,
}

impl ZeroRateDiscountFactors {
    /// Wrap a zero-rate curve whose x-values are Act/365F times.
    pub fn new(currency: Currency, valuation_date: NaiveDate, curve: InterpolatedCurve) -> Self {
        Self {
            currency,
            valuation_date,
            day_count: DayCount::Act365F,
            curve,
        }
    }

    /// Currency of the curve.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// The underlying zero-rate curve.
    pub fn curve(&self) -> &InterpolatedCurve {
        &self.curve
    }

    /// Time from the valuation date to `date`.
    pub fn relative_year_fraction(&self, date: NaiveDate) -> Time {
        self.day_count
            .relative_year_fraction(self.valuation_date, date)
    }

    /// Continuously compounded zero rate to `date`.
    pub fn zero_rate(&self, date: NaiveDate) -> Rate {
        self.curve.y_value(self.relative_year_fraction(date))
    }

    /// Discount factor to `date`.
    pub fn discount_factor(&self, date: NaiveDate) -> DiscountFactor {
        self.discount_factor_at(self.relative_year_fraction(date))
    }

    /// Discount factor at time `t`.
    pub fn discount_factor_at(&self, t: Time) -> DiscountFactor {
        (-self.curve.y_value(t) * t).exp()
    }

    /// `∂P(date)/∂z(date) = −t·P`, as a point sensitivity in `currency`.
    pub fn zero_rate_point_sensitivity(
        &self,
        date: NaiveDate,
        currency: Currency,
    ) -> ZeroRateSensitivity {
        let t = self.relative_year_fraction(date);
        ZeroRateSensitivity {
            curve_currency: self.currency,
            year_fraction: t,
            currency,
            sensitivity: -t * self.discount_factor_at(t),
        }
    }

    /// Zero-rate sensitivity at `t` spread over the curve nodes.
    pub fn parameter_sensitivity_at(
        &self,
        t: Time,
        value: Real,
        currency: Currency,
    ) -> CurrencyParameterSensitivity {
        let weights: DVector<Real> = self.curve.y_value_parameter_sensitivity(t) * value;
        CurrencyParameterSensitivity::new(self.curve.name(), currency, weights)
    }

    /// Resolve a zero-rate point sensitivity on this curve.
    pub fn parameter_sensitivity(&self, point: &ZeroRateSensitivity) -> CurrencyParameterSensitivity {
        self.parameter_sensitivity_at(point.year_fraction, point.sensitivity, point.currency)
    }
}
