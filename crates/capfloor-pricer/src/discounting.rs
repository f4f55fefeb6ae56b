//! Discounting pricers for coupons, swap legs and payments.
//!
//! Cash flows paid before the valuation date are worth nothing; a cash flow
//! paid on the valuation date is still valued and is also current cash.

use capfloor_core::{CurrencyAmount, Real, Result};
use capfloor_market::{PointSensitivityBuilder, RatesProvider};
use capfloor_products::{Payment, RatePaymentPeriod, SwapLeg};

// ────────────────────────────────────────────────────────────────────────────
// Coupons
// ────────────────────────────────────────────────────────────────────────────

/// Prices fixed and Ibor coupons by discounting their forecast amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscountingRatePaymentPeriodPricer;

impl DiscountingRatePaymentPeriodPricer {
    /// The undiscounted coupon amount, forecasting Ibor fixings from the
    /// index curve.
    pub fn forecast_value(&self, period: &RatePaymentPeriod, rates: &dyn RatesProvider) -> Result<Real> {
        match period {
            RatePaymentPeriod::Fixed(p) => Ok(p.amount()),
            RatePaymentPeriod::Ibor(p) => Ok(p.amount(rates.ibor_rate(p.observation())?)),
        }
    }

    /// Present value in the coupon currency.
    pub fn present_value(&self, period: &RatePaymentPeriod, rates: &dyn RatesProvider) -> Result<Real> {
        if rates.valuation_date() > period.payment_date() {
            return Ok(0.0);
        }
        let df = rates.discount_factor(period.currency(), period.payment_date())?;
        Ok(df * self.forecast_value(period, rates)?)
    }

    /// Point sensitivity to the discount curve and, for Ibor coupons, the
    /// forward curve.
    pub fn present_value_sensitivity(
        &self,
        period: &RatePaymentPeriod,
        rates: &dyn RatesProvider,
    ) -> Result<PointSensitivityBuilder> {
        if rates.valuation_date() > period.payment_date() {
            return Ok(PointSensitivityBuilder::none());
        }
        let (ccy, pay) = (period.currency(), period.payment_date());
        let forecast = self.forecast_value(period, rates)?;
        let discount = rates
            .discount_factor_zero_rate_sensitivity(ccy, pay)?
            .multiplied_by(forecast);
        match period {
            RatePaymentPeriod::Fixed(_) => Ok(discount),
            RatePaymentPeriod::Ibor(p) => {
                let df = rates.discount_factor(ccy, pay)?;
                Ok(rates
                    .ibor_rate_sensitivity(p.observation())?
                    .multiplied_by(period.notional() * p.year_fraction() * df)
                    .combined_with(discount))
            }
        }
    }

    /// The coupon amount if paid on the valuation date, zero otherwise.
    pub fn current_cash(&self, period: &RatePaymentPeriod, rates: &dyn RatesProvider) -> Result<Real> {
        if rates.valuation_date() == period.payment_date() {
            self.forecast_value(period, rates)
        } else {
            Ok(0.0)
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Swap legs
// ────────────────────────────────────────────────────────────────────────────

/// Prices a swap leg as the sum of its discounted coupons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscountingSwapLegPricer {
    period_pricer: DiscountingRatePaymentPeriodPricer,
}

impl DiscountingSwapLegPricer {
    /// The pricer.
    pub const DEFAULT: Self = Self {
        period_pricer: DiscountingRatePaymentPeriodPricer,
    };

    /// Present value.
    pub fn present_value(&self, leg: &SwapLeg, rates: &dyn RatesProvider) -> Result<CurrencyAmount> {
        let total = leg
            .periods()
            .iter()
            .map(|p| self.period_pricer.present_value(p, rates))
            .sum::<Result<Real>>()?;
        Ok(CurrencyAmount::new(leg.currency(), total))
    }

    /// Point sensitivity to the curves.
    pub fn present_value_sensitivity(
        &self,
        leg: &SwapLeg,
        rates: &dyn RatesProvider,
    ) -> Result<PointSensitivityBuilder> {
        leg.periods()
            .iter()
            .map(|p| self.period_pricer.present_value_sensitivity(p, rates))
            .collect()
    }

    /// Coupons paid on the valuation date.
    pub fn current_cash(&self, leg: &SwapLeg, rates: &dyn RatesProvider) -> Result<CurrencyAmount> {
        let total = leg
            .periods()
            .iter()
            .map(|p| self.period_pricer.current_cash(p, rates))
            .sum::<Result<Real>>()?;
        Ok(CurrencyAmount::new(leg.currency(), total))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Payments
// ────────────────────────────────────────────────────────────────────────────

/// Prices a single payment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscountingPaymentPricer;

impl DiscountingPaymentPricer {
    /// Present value.
    pub fn present_value(&self, payment: &Payment, rates: &dyn RatesProvider) -> Result<CurrencyAmount> {
        if rates.valuation_date() > payment.date() {
            return Ok(CurrencyAmount::zero(payment.currency()));
        }
        let df = rates.discount_factor(payment.currency(), payment.date())?;
        Ok(payment.value().multiplied_by(df))
    }

    /// Point sensitivity to the discount curve.
    pub fn present_value_sensitivity(
        &self,
        payment: &Payment,
        rates: &dyn RatesProvider,
    ) -> Result<PointSensitivityBuilder> {
        if rates.valuation_date() > payment.date() {
            return Ok(PointSensitivityBuilder::none());
        }
        Ok(rates
            .discount_factor_zero_rate_sensitivity(payment.currency(), payment.date())?
            .multiplied_by(payment.amount()))
    }

    /// The payment if made on the valuation date, zero otherwise.
    pub fn current_cash(&self, payment: &Payment, rates: &dyn RatesProvider) -> CurrencyAmount {
        if rates.valuation_date() == payment.date() {
            payment.value()
        } else {
            CurrencyAmount::zero(payment.currency())
        }
    }
}
