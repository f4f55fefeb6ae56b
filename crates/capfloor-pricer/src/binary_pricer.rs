//! Binary caplets and floorlets replicated by a vertical spread.
//!
//! A binary paying `A` above `K` is approximated by `A / (2s)` caplets struck
//! at `K − s` minus as many struck at `K + s`, each with a unit year
//! fraction. The approximation converges as `s → 0`.

use crate::config::{PricingConfig, DEFAULT_BINARY_SPREAD};
use crate::period_pricer::IborCapletFloorletPeriodPricer;
use capfloor_core::{ensure, CurrencyAmount, PutCall, Real, Result};
use capfloor_market::{CapletVolatilities, PointSensitivityBuilder, RatesProvider};
use capfloor_products::{IborCapletFloorletBinaryPeriod, IborCapletFloorletPeriod};

/// Prices binary periods as the difference of two vanilla periods.
#[derive(Debug, Clone)]
pub struct VerticalSpreadBinaryIborCapletFloorletPeriodPricer<P> {
    period_pricer: P,
    spread: Real,
}

impl<P: IborCapletFloorletPeriodPricer> VerticalSpreadBinaryIborCapletFloorletPeriodPricer<P> {
    /// A binary pricer with the default spread of one basis point.
    pub fn new(period_pricer: P) -> Self {
        Self {
            period_pricer,
            spread: DEFAULT_BINARY_SPREAD,
        }
    }

    /// A binary pricer with an explicit spread.
    ///
    /// # Errors
    /// `Error::Configuration` unless `spread` is positive and finite.
    pub fn with_spread(period_pricer: P, spread: Real) -> Result<Self> {
        ensure!(
            spread.is_finite() && spread > 0.0,
            "binary spread must be positive and finite, got {spread}"
        );
        Ok(Self {
            period_pricer,
            spread,
        })
    }

    /// A binary pricer using the configured spread.
    pub fn with_config(period_pricer: P, config: &PricingConfig) -> Result<Self> {
        Self::with_spread(period_pricer, config.binary_spread)
    }

    /// The half-width of the spread.
    pub fn spread(&self) -> Real {
        self.spread
    }

    /// The vanilla pricer.
    pub fn period_pricer(&self) -> &P {
        &self.period_pricer
    }

    /// The two vanilla periods replicating `binary`: `(low strike, high strike)`.
    ///
    /// A binary caplet is long the low strike and short the high strike; a
    /// binary floorlet the reverse.
    pub fn vanilla_pair(
        &self,
        binary: &IborCapletFloorletBinaryPeriod,
    ) -> Result<(IborCapletFloorletPeriod, IborCapletFloorletPeriod)> {
        let notional = binary.amount() / (2.0 * self.spread);
        let put_call = binary.put_call();
        let leg = |strike: Real, notional: Real| {
            let builder = IborCapletFloorletPeriod::builder(*binary.observation())
                .with_currency(binary.currency())
                .with_dates(binary.start_date(), binary.end_date())
                .with_payment_date(binary.payment_date())
                .with_year_fraction(1.0)
                .with_notional(notional);
            let builder = match put_call {
                PutCall::Call => builder.with_caplet(strike),
                PutCall::Put => builder.with_floorlet(strike),
            };
            builder.build()
        };
        let k = binary.strike();
        let low = leg(k - self.spread, put_call.sign() * notional)?;
        let high = leg(k + self.spread, -put_call.sign() * notional)?;
        Ok((low, high))
    }

    /// Present value.
    pub fn present_value(
        &self,
        binary: &IborCapletFloorletBinaryPeriod,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<CurrencyAmount> {
        let (low, high) = self.vanilla_pair(binary)?;
        let pv_low = self.period_pricer.present_value(&low, rates, volatilities)?;
        let pv_high = self.period_pricer.present_value(&high, rates, volatilities)?;
        pv_low.plus(pv_high)
    }

    /// Point sensitivity to forward and discount rates.
    pub fn present_value_sensitivity_rates(
        &self,
        binary: &IborCapletFloorletBinaryPeriod,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<PointSensitivityBuilder> {
        let (low, high) = self.vanilla_pair(binary)?;
        Ok(self
            .period_pricer
            .present_value_sensitivity_rates(&low, rates, volatilities)?
            .combined_with(
                self.period_pricer
                    .present_value_sensitivity_rates(&high, rates, volatilities)?,
            ))
    }

    /// Point sensitivity to the volatility parameters at both strikes.
    pub fn present_value_sensitivity_model_params_volatility(
        &self,
        binary: &IborCapletFloorletBinaryPeriod,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<PointSensitivityBuilder> {
        let (low, high) = self.vanilla_pair(binary)?;
        Ok(self
            .period_pricer
            .present_value_sensitivity_model_params_volatility(&low, rates, volatilities)?
            .combined_with(
                self.period_pricer
                    .present_value_sensitivity_model_params_volatility(&high, rates, volatilities)?,
            ))
    }
}
