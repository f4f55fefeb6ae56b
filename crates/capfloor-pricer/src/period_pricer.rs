//! Caplet/floorlet period pricers.
//!
//! [`IborCapletFloorletPeriodPricer`] is the seam the leg, product and trade
//! pricers work against. [`VolatilityIborCapletFloorletPeriodPricer`] carries
//! the pricing skeleton for one volatility family:
//!
//! 1. check that the volatilities belong to the family and describe the
//!    same index and valuation date as the period and the rates;
//! 2. resolve the [`FixingState`] once;
//! 3. price the optionality with the family's formula, or collapse to the
//!    discounted payoff once the fixing is known.

use crate::fixing_state::FixingState;
use capfloor_core::{
    ensure, CurrencyAmount, DiscountFactor, Error, PutCall, Rate, Real, Result, Time, Volatility,
};
use capfloor_market::{
    CapletVolatilities, CapletVolatilitySensitivity, PointSensitivityBuilder, RatesProvider,
    VolatilityModel,
};
use capfloor_products::IborCapletFloorletPeriod;
use std::fmt;

// ────────────────────────────────────────────────────────────────────────────
// Trait
// ────────────────────────────────────────────────────────────────────────────

/// Prices a single caplet or floorlet against a rates provider and caplet
/// volatilities of one model family.
///
/// Every method fails with `Error::InvalidModel` when the volatilities belong
/// to another family, and with `Error::Configuration` when they are dated
/// differently from the rates or quote another index than the period.
pub trait IborCapletFloorletPeriodPricer: Send + Sync + fmt::Debug {
    /// The volatility family this pricer accepts.
    fn model(&self) -> VolatilityModel;

    /// Present value.
    fn present_value(
        &self,
        period: &IborCapletFloorletPeriod,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<CurrencyAmount>;

    /// `∂PV/∂forward` at constant volatility.
    fn present_value_delta(
        &self,
        period: &IborCapletFloorletPeriod,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<CurrencyAmount>;

    /// `∂²PV/∂forward²` at constant volatility.
    fn present_value_gamma(
        &self,
        period: &IborCapletFloorletPeriod,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<CurrencyAmount>;

    /// Driftless theta.
    fn present_value_theta(
        &self,
        period: &IborCapletFloorletPeriod,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<CurrencyAmount>;

    /// `∂PV/∂σ`.
    fn present_value_vega(
        &self,
        period: &IborCapletFloorletPeriod,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<CurrencyAmount>;

    /// Point sensitivity of the present value to forward and discount rates.
    fn present_value_sensitivity_rates(
        &self,
        period: &IborCapletFloorletPeriod,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<PointSensitivityBuilder>;

    /// Point sensitivity of the present value to the volatility model's
    /// parameters.
    fn present_value_sensitivity_model_params_volatility(
        &self,
        period: &IborCapletFloorletPeriod,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<PointSensitivityBuilder>;

    /// The volatility used to price the period.
    ///
    /// # Errors
    /// `Error::ExpiredOption` once the fixing is known.
    fn implied_volatility(
        &self,
        period: &IborCapletFloorletPeriod,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<Volatility>;

    /// The forward rate of the period's observation, or its fixing.
    fn forward_rate(&self, period: &IborCapletFloorletPeriod, rates: &dyn RatesProvider) -> Result<Rate> {
        rates.ibor_rate(period.observation())
    }

    /// The payoff when the period pays on the valuation date, zero otherwise.
    fn current_cash(
        &self,
        period: &IborCapletFloorletPeriod,
        rates: &dyn RatesProvider,
    ) -> Result<CurrencyAmount> {
        if rates.valuation_date() != period.payment_date() {
            return Ok(CurrencyAmount::zero(period.currency()));
        }
        let rate = rates.ibor_rate(period.observation())?;
        Ok(CurrencyAmount::new(period.currency(), period.payoff(rate)))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Resolved inputs
// ────────────────────────────────────────────────────────────────────────────

/// What remains to be priced once the fixing state is known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Pricing {
    /// Paid in the past.
    Expired,
    /// Fixing known: the discounted payoff.
    Fixed { rate: Rate, df: DiscountFactor },
    /// Optionality on the forward.
    Optional {
        expiry: Time,
        forward: Rate,
        volatility: Volatility,
        df: DiscountFactor,
    },
}

/// An undiscounted model formula: the price or one of its Greeks.
type FormulaFn = fn(&CapletVolatilities, Time, PutCall, Real, Real, Volatility) -> Real;

// ────────────────────────────────────────────────────────────────────────────
// VolatilityIborCapletFloorletPeriodPricer
// ────────────────────────────────────────────────────────────────────────────

/// Caplet/floorlet pricer for one volatility family.
///
/// Black prices with Black-76, shifted Black with Black-76 on the shifted
/// forward and strike, Normal with Bachelier. The volatility point
/// sensitivity is emitted at `(expiry, strike, forward)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolatilityIborCapletFloorletPeriodPricer {
    model: VolatilityModel,
}

impl VolatilityIborCapletFloorletPeriodPricer {
    /// Log-normal pricer.
    pub const BLACK: Self = Self {
        model: VolatilityModel::Black,
    };
    /// Shifted log-normal pricer.
    pub const SHIFTED_BLACK: Self = Self {
        model: VolatilityModel::ShiftedBlack,
    };
    /// Normal pricer.
    pub const NORMAL: Self = Self {
        model: VolatilityModel::Normal,
    };

    /// Skeleton shared with the SABR pricer.
    pub(crate) const SABR_BASE: Self = Self {
        model: VolatilityModel::Sabr,
    };

    pub(crate) fn resolve(
        &self,
        period: &IborCapletFloorletPeriod,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<Pricing> {
        volatilities.ensure_model(self.model)?;
        ensure!(
            volatilities.valuation_date() == rates.valuation_date(),
            "volatilities {} are dated {} but rates are dated {}",
            volatilities.name(),
            volatilities.valuation_date(),
            rates.valuation_date()
        );
        ensure!(
            volatilities.index() == period.index(),
            "volatilities {} quote {} but the period observes {}",
            volatilities.name(),
            volatilities.index(),
            period.index()
        );
        let observation = period.observation();
        let state = FixingState::resolve(rates, observation, period.payment_date())?;
        let discount = || rates.discount_factor(period.currency(), period.payment_date());
        Ok(match state {
            FixingState::AfterPayment => Pricing::Expired,
            FixingState::OnFixing {
                published: Some(rate),
            }
            | FixingState::AfterFixingBeforePayment { fixing: rate } => Pricing::Fixed {
                rate,
                df: discount()?,
            },
            FixingState::BeforeFixing | FixingState::OnFixing { published: None } => {
                let forward = rates.ibor_rate(observation)?;
                let expiry = match state {
                    FixingState::BeforeFixing => volatilities.relative_time(period.fixing_date()),
                    _ => 0.0,
                };
                Pricing::Optional {
                    expiry,
                    forward,
                    volatility: volatilities.volatility(expiry, period.strike(), forward)?,
                    df: discount()?,
                }
            }
        })
    }

    /// Scaled formula value for optional periods; `fixed` otherwise.
    fn greek(
        &self,
        period: &IborCapletFloorletPeriod,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
        formula: FormulaFn,
        fixed: impl Fn(Rate, DiscountFactor) -> Real,
    ) -> Result<CurrencyAmount> {
        let value = match self.resolve(period, rates, volatilities)? {
            Pricing::Expired => 0.0,
            Pricing::Fixed { rate, df } => fixed(rate, df),
            Pricing::Optional {
                expiry,
                forward,
                volatility,
                df,
            } => {
                let undiscounted = formula(
                    volatilities,
                    expiry,
                    period.put_call(),
                    period.strike(),
                    forward,
                    volatility,
                );
                period.notional() * period.year_fraction() * df * undiscounted
            }
        };
        Ok(CurrencyAmount::new(period.currency(), value))
    }
}

impl IborCapletFloorletPeriodPricer for VolatilityIborCapletFloorletPeriodPricer {
    fn model(&self) -> VolatilityModel {
        self.model
    }

    fn present_value(
        &self,
        period: &IborCapletFloorletPeriod,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<CurrencyAmount> {
        self.greek(period, rates, volatilities, CapletVolatilities::price, |rate, df| {
            df * period.payoff(rate)
        })
    }

    fn present_value_delta(
        &self,
        period: &IborCapletFloorletPeriod,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<CurrencyAmount> {
        self.greek(period, rates, volatilities, CapletVolatilities::price_delta, |rate, df| {
            let sign = period.put_call().sign();
            if sign * (rate - period.strike()) > 0.0 {
                sign * period.notional() * period.year_fraction() * df
            } else {
                0.0
            }
        })
    }

    fn present_value_gamma(
        &self,
        period: &IborCapletFloorletPeriod,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<CurrencyAmount> {
        self.greek(period, rates, volatilities, CapletVolatilities::price_gamma, |_, _| 0.0)
    }

    fn present_value_theta(
        &self,
        period: &IborCapletFloorletPeriod,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<CurrencyAmount> {
        self.greek(period, rates, volatilities, CapletVolatilities::price_theta, |_, _| 0.0)
    }

    fn present_value_vega(
        &self,
        period: &IborCapletFloorletPeriod,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<CurrencyAmount> {
        self.greek(period, rates, volatilities, CapletVolatilities::price_vega, |_, _| 0.0)
    }

    fn present_value_sensitivity_rates(
        &self,
        period: &IborCapletFloorletPeriod,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<PointSensitivityBuilder> {
        let accrual = period.notional() * period.year_fraction();
        let ccy = period.currency();
        let pay = period.payment_date();
        match self.resolve(period, rates, volatilities)? {
            Pricing::Expired => Ok(PointSensitivityBuilder::none()),
            Pricing::Fixed { rate, .. } => {
                let payoff = period.payoff(rate);
                if payoff == 0.0 {
                    return Ok(PointSensitivityBuilder::none());
                }
                Ok(rates
                    .discount_factor_zero_rate_sensitivity(ccy, pay)?
                    .multiplied_by(payoff))
            }
            Pricing::Optional {
                expiry,
                forward,
                volatility,
                df,
            } => {
                let (pc, k) = (period.put_call(), period.strike());
                let price = volatilities.price(expiry, pc, k, forward, volatility);
                let delta = volatilities.price_delta(expiry, pc, k, forward, volatility);
                let forward_part = rates
                    .ibor_rate_sensitivity(period.observation())?
                    .multiplied_by(accrual * df * delta);
                let discount_part = rates
                    .discount_factor_zero_rate_sensitivity(ccy, pay)?
                    .multiplied_by(accrual * price);
                Ok(forward_part.combined_with(discount_part))
            }
        }
    }

    fn present_value_sensitivity_model_params_volatility(
        &self,
        period: &IborCapletFloorletPeriod,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<PointSensitivityBuilder> {
        match self.resolve(period, rates, volatilities)? {
            Pricing::Optional {
                expiry,
                forward,
                volatility,
                df,
            } if expiry > 0.0 => {
                let (pc, k) = (period.put_call(), period.strike());
                let vega = volatilities.price_vega(expiry, pc, k, forward, volatility);
                Ok(PointSensitivityBuilder::of(CapletVolatilitySensitivity {
                    volatilities_name: volatilities.name().to_string(),
                    expiry,
                    strike: k,
                    forward,
                    currency: period.currency(),
                    sensitivity: period.notional() * period.year_fraction() * df * vega,
                }))
            }
            _ => Ok(PointSensitivityBuilder::none()),
        }
    }

    fn implied_volatility(
        &self,
        period: &IborCapletFloorletPeriod,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<Volatility> {
        let expired = || {
            Error::ExpiredOption(format!(
                "{}: fixing {} is known at valuation date {}",
                period.index(),
                period.fixing_date(),
                rates.valuation_date()
            ))
        };
        if rates.valuation_date() > period.fixing_date() {
            return Err(expired());
        }
        match self.resolve(period, rates, volatilities)? {
            Pricing::Optional { volatility, .. } => Ok(volatility),
            Pricing::Fixed { .. } | Pricing::Expired => Err(expired()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use capfloor_core::{Currency, FixingSeries};
    use capfloor_market::{
        BlackCapletVolatilities, IborIndex, IborIndexObservation, ImmutableRatesProvider,
        InterpolatedCurve, InterpolatedSurface, NormalCapletVolatilities,
    };
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rates(valuation: NaiveDate) -> ImmutableRatesProvider {
        let index = IborIndex::EUR_EURIBOR_3M;
        ImmutableRatesProvider::builder(valuation)
            .with_discount_curve(Currency::EUR, InterpolatedCurve::constant("EUR-DSC", 0.03).unwrap())
            .with_index_curve(index, InterpolatedCurve::constant("EUR-FWD", 0.035).unwrap())
            .with_time_series(index, FixingSeries::new().with_fixing(date(2011, 1, 3), 0.02))
            .build()
            .unwrap()
    }

    fn black(valuation: NaiveDate) -> CapletVolatilities {
        let surface = InterpolatedSurface::constant("EUR-BLACK", 0.25).unwrap();
        BlackCapletVolatilities::new(IborIndex::EUR_EURIBOR_3M, valuation, surface).into()
    }

    fn caplet(strike: Rate) -> IborCapletFloorletPeriod {
        let obs = IborIndexObservation::of(IborIndex::EUR_EURIBOR_3M, date(2011, 1, 3)).unwrap();
        IborCapletFloorletPeriod::builder(obs)
            .with_notional(1.0e6)
            .with_caplet(strike)
            .build()
            .unwrap()
    }

    #[test]
    fn black_present_value_is_scaled_formula() {
        let val = date(2008, 8, 18);
        let (r, v) = (rates(val), black(val));
        let p = caplet(0.03);
        let pricer = VolatilityIborCapletFloorletPeriodPricer::BLACK;
        let pv = pricer.present_value(&p, &r, &v).unwrap();
        let forward = r.ibor_rate(p.observation()).unwrap();
        let expiry = v.relative_time(p.fixing_date());
        let df = r.discount_factor(Currency::EUR, p.payment_date()).unwrap();
        let expected = 1.0e6
            * p.year_fraction()
            * df
            * capfloor_math::black::price(forward, 0.03, expiry, 0.25, PutCall::Call);
        assert_eq!(pv.currency(), Currency::EUR);
        assert_relative_eq!(pv.amount(), expected, max_relative = 1e-14);
    }

    #[test]
    fn wrong_family_is_rejected() {
        let val = date(2008, 8, 18);
        let surface = InterpolatedSurface::constant("EUR-NORMAL", 0.01).unwrap();
        let normal: CapletVolatilities =
            NormalCapletVolatilities::new(IborIndex::EUR_EURIBOR_3M, val, surface).into();
        let pricer = VolatilityIborCapletFloorletPeriodPricer::BLACK;
        let err = pricer.present_value(&caplet(0.03), &rates(val), &normal).unwrap_err();
        assert!(matches!(err, Error::InvalidModel { .. }));
    }

    #[test]
    fn volatilities_must_match_rates_date_and_period_index() {
        let val = date(2008, 8, 18);
        let pricer = VolatilityIborCapletFloorletPeriodPricer::BLACK;
        let r = rates(val);
        let late = black(date(2011, 2, 1));
        for result in [
            pricer.present_value(&caplet(0.01), &r, &late).map(|_| ()),
            pricer.present_value_delta(&caplet(0.01), &r, &late).map(|_| ()),
            pricer.implied_volatility(&caplet(0.01), &r, &late).map(|_| ()),
            pricer
                .present_value_sensitivity_model_params_volatility(&caplet(0.01), &r, &late)
                .map(|_| ()),
        ] {
            assert!(matches!(result, Err(Error::Configuration(_))));
        }

        let surface = InterpolatedSurface::constant("USD-BLACK", 0.25).unwrap();
        let usd: CapletVolatilities =
            BlackCapletVolatilities::new(IborIndex::USD_LIBOR_3M, val, surface).into();
        let err = pricer.present_value(&caplet(0.01), &r, &usd).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn after_fixing_collapses_to_discounted_payoff() {
        let val = date(2011, 2, 1);
        let (r, v) = (rates(val), black(val));
        let p = caplet(0.01);
        let pricer = VolatilityIborCapletFloorletPeriodPricer::BLACK;
        let df = r.discount_factor(Currency::EUR, p.payment_date()).unwrap();
        let pv = pricer.present_value(&p, &r, &v).unwrap();
        assert_relative_eq!(pv.amount(), df * 1.0e6 * 0.25 * 0.01, max_relative = 1e-12);
        let delta = pricer.present_value_delta(&p, &r, &v).unwrap();
        assert_relative_eq!(delta.amount(), df * 1.0e6 * 0.25, max_relative = 1e-12);
        assert_eq!(pricer.present_value_gamma(&p, &r, &v).unwrap().amount(), 0.0);
        assert!(pricer
            .present_value_sensitivity_model_params_volatility(&p, &r, &v)
            .unwrap()
            .is_empty());
        assert!(matches!(
            pricer.implied_volatility(&p, &r, &v),
            Err(Error::ExpiredOption(_))
        ));
    }
}
