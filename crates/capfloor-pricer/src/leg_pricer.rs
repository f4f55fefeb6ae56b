//! Cap/floor leg pricer: period results summed over the leg.
//!
//! Periods are priced independently. Once a leg reaches the configured
//! threshold they are priced on the rayon pool; results are collected in leg
//! order and reduced sequentially, so parallel and sequential runs agree
//! exactly.

use crate::config::{PricingConfig, DEFAULT_PARALLEL_THRESHOLD};
use crate::period_pricer::IborCapletFloorletPeriodPricer;
use crate::period_values::PeriodValues;
use crate::sabr_period_pricer::SabrIborCapletFloorletPeriodPricer;
use capfloor_core::{CurrencyAmount, Rate, Result, Volatility};
use capfloor_market::{CapletVolatilities, PointSensitivityBuilder, RatesProvider};
use capfloor_products::{IborCapFloorLeg, IborCapletFloorletPeriod};
use rayon::prelude::*;

/// Prices an [`IborCapFloorLeg`] with a period pricer.
#[derive(Debug, Clone)]
pub struct IborCapFloorLegPricer<P> {
    period_pricer: P,
    parallel_threshold: usize,
}

impl<P: IborCapletFloorletPeriodPricer> IborCapFloorLegPricer<P> {
    /// A leg pricer with the default parallel threshold.
    pub fn new(period_pricer: P) -> Self {
        Self {
            period_pricer,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// A leg pricer using the configured parallel threshold.
    pub fn with_config(period_pricer: P, config: &PricingConfig) -> Self {
        Self::new(period_pricer).with_parallel_threshold(config.parallel_threshold)
    }

    /// Price legs of at least `threshold` periods in parallel.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// The period pricer.
    pub fn period_pricer(&self) -> &P {
        &self.period_pricer
    }

    // ── Values ───────────────────────────────────────────────────────────

    /// Present value.
    pub fn present_value(
        &self,
        leg: &IborCapFloorLeg,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<CurrencyAmount> {
        self.sum(leg, |p| self.period_pricer.present_value(p, rates, volatilities))
    }

    /// Present value delta.
    pub fn present_value_delta(
        &self,
        leg: &IborCapFloorLeg,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<CurrencyAmount> {
        self.sum(leg, |p| self.period_pricer.present_value_delta(p, rates, volatilities))
    }

    /// Present value gamma.
    pub fn present_value_gamma(
        &self,
        leg: &IborCapFloorLeg,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<CurrencyAmount> {
        self.sum(leg, |p| self.period_pricer.present_value_gamma(p, rates, volatilities))
    }

    /// Present value theta.
    pub fn present_value_theta(
        &self,
        leg: &IborCapFloorLeg,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<CurrencyAmount> {
        self.sum(leg, |p| self.period_pricer.present_value_theta(p, rates, volatilities))
    }

    /// Present value vega.
    pub fn present_value_vega(
        &self,
        leg: &IborCapFloorLeg,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<CurrencyAmount> {
        self.sum(leg, |p| self.period_pricer.present_value_vega(p, rates, volatilities))
    }

    /// Cash paid on the valuation date.
    pub fn current_cash(
        &self,
        leg: &IborCapFloorLeg,
        rates: &dyn RatesProvider,
    ) -> Result<CurrencyAmount> {
        self.sum(leg, |p| self.period_pricer.current_cash(p, rates))
    }

    // ── Sensitivities ────────────────────────────────────────────────────

    /// Point sensitivity to forward and discount rates.
    pub fn present_value_sensitivity_rates(
        &self,
        leg: &IborCapFloorLeg,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<PointSensitivityBuilder> {
        let parts = self.map_periods(leg, |p| {
            self.period_pricer
                .present_value_sensitivity_rates(p, rates, volatilities)
        })?;
        Ok(parts.into_iter().collect())
    }

    /// Point sensitivity to the volatility parameters.
    pub fn present_value_sensitivity_model_params_volatility(
        &self,
        leg: &IborCapFloorLeg,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<PointSensitivityBuilder> {
        let parts = self.map_periods(leg, |p| {
            self.period_pricer
                .present_value_sensitivity_model_params_volatility(p, rates, volatilities)
        })?;
        Ok(parts.into_iter().collect())
    }

    // ── Per-period maps ──────────────────────────────────────────────────

    /// Present value of each period.
    pub fn present_value_caplet_periods(
        &self,
        leg: &IborCapFloorLeg,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<PeriodValues<CurrencyAmount>> {
        let values = self.map_periods(leg, |p| {
            self.period_pricer.present_value(p, rates, volatilities)
        })?;
        Ok(leg.periods().iter().copied().zip(values).collect())
    }

    /// Implied volatility of each period still to fix.
    pub fn implied_volatilities(
        &self,
        leg: &IborCapFloorLeg,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<PeriodValues<Volatility>> {
        let valuation = rates.valuation_date();
        leg.periods()
            .iter()
            .filter(|p| p.fixing_date() > valuation)
            .map(|p| {
                let vol = self.period_pricer.implied_volatility(p, rates, volatilities)?;
                Ok((*p, vol))
            })
            .collect()
    }

    /// Forward rate of each period still to fix.
    pub fn forward_rates(
        &self,
        leg: &IborCapFloorLeg,
        rates: &dyn RatesProvider,
    ) -> Result<PeriodValues<Rate>> {
        let valuation = rates.valuation_date();
        leg.periods()
            .iter()
            .filter(|p| p.fixing_date() > valuation)
            .map(|p| Ok((*p, self.period_pricer.forward_rate(p, rates)?)))
            .collect()
    }

    // ── Fan-out ──────────────────────────────────────────────────────────

    fn map_periods<T, F>(&self, leg: &IborCapFloorLeg, f: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(&IborCapletFloorletPeriod) -> Result<T> + Sync + Send,
    {
        let parallel = leg.len() >= self.parallel_threshold;
        tracing::debug!(
            periods = leg.len(),
            parallel,
            index = %leg.index(),
            "pricing cap/floor leg"
        );
        if parallel {
            leg.periods().par_iter().map(f).collect()
        } else {
            leg.periods().iter().map(f).collect()
        }
    }

    fn sum<F>(&self, leg: &IborCapFloorLeg, f: F) -> Result<CurrencyAmount>
    where
        F: Fn(&IborCapletFloorletPeriod) -> Result<CurrencyAmount> + Sync + Send,
    {
        let amounts = self.map_periods(leg, f)?;
        amounts
            .into_iter()
            .try_fold(CurrencyAmount::zero(leg.currency()), |acc, a| acc.plus(a))
    }
}

impl IborCapFloorLegPricer<SabrIborCapletFloorletPeriodPricer> {
    /// Rate sensitivity including the SABR smile dynamics.
    pub fn present_value_sensitivity_rates_sticky_model(
        &self,
        leg: &IborCapFloorLeg,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<PointSensitivityBuilder> {
        let parts = self.map_periods(leg, |p| {
            self.period_pricer
                .present_value_sensitivity_rates_sticky_model(p, rates, volatilities)
        })?;
        Ok(parts.into_iter().collect())
    }
}
