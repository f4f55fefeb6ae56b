//! SABR caplet/floorlet pricer.
//!
//! Prices with Black-76 on the shifted forward and strike at the
//! SABR-implied volatility. Rate sensitivities come in two flavours:
//! sticky strike (volatility frozen) and sticky model (the smile moves with
//! the forward through `∂σ/∂F`).

use crate::period_pricer::{
    IborCapletFloorletPeriodPricer, Pricing, VolatilityIborCapletFloorletPeriodPricer,
};
use capfloor_core::{CurrencyAmount, Result, Volatility};
use capfloor_market::{
    CapletVolatilities, PointSensitivityBuilder, RatesProvider, SabrParameterSensitivity,
    SabrParameterType, VolatilityModel,
};
use capfloor_products::IborCapletFloorletPeriod;

/// Caplet/floorlet pricer for SABR volatilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SabrIborCapletFloorletPeriodPricer {
    base: VolatilityIborCapletFloorletPeriodPricer,
}

impl Default for SabrIborCapletFloorletPeriodPricer {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl SabrIborCapletFloorletPeriodPricer {
    /// The pricer.
    pub const DEFAULT: Self = Self {
        base: VolatilityIborCapletFloorletPeriodPricer::SABR_BASE,
    };

    /// Rate sensitivity including the smile dynamics:
    /// the sticky-strike sensitivity plus `vega × ∂σ/∂F` on the forward.
    pub fn present_value_sensitivity_rates_sticky_model(
        &self,
        period: &IborCapletFloorletPeriod,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<PointSensitivityBuilder> {
        let sticky_strike = self
            .base
            .present_value_sensitivity_rates(period, rates, volatilities)?;
        match self.base.resolve(period, rates, volatilities)? {
            Pricing::Optional {
                expiry,
                forward,
                df,
                ..
            } if expiry > 0.0 => {
                let adjoint = volatilities
                    .as_sabr()?
                    .volatility_adjoint(expiry, period.strike(), forward)?;
                let vega = period.notional()
                    * period.year_fraction()
                    * df
                    * volatilities.price_vega(
                        expiry,
                        period.put_call(),
                        period.strike(),
                        forward,
                        adjoint.volatility,
                    );
                let smile = rates
                    .ibor_rate_sensitivity(period.observation())?
                    .multiplied_by(vega * adjoint.d_forward);
                Ok(sticky_strike.combined_with(smile))
            }
            _ => Ok(sticky_strike),
        }
    }
}

impl IborCapletFloorletPeriodPricer for SabrIborCapletFloorletPeriodPricer {
    fn model(&self) -> VolatilityModel {
        VolatilityModel::Sabr
    }

    fn present_value(
        &self,
        period: &IborCapletFloorletPeriod,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<CurrencyAmount> {
        self.base.present_value(period, rates, volatilities)
    }

    fn present_value_delta(
        &self,
        period: &IborCapletFloorletPeriod,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<CurrencyAmount> {
        self.base.present_value_delta(period, rates, volatilities)
    }

    fn present_value_gamma(
        &self,
        period: &IborCapletFloorletPeriod,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<CurrencyAmount> {
        self.base.present_value_gamma(period, rates, volatilities)
    }

    fn present_value_theta(
        &self,
        period: &IborCapletFloorletPeriod,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<CurrencyAmount> {
        self.base.present_value_theta(period, rates, volatilities)
    }

    fn present_value_vega(
        &self,
        period: &IborCapletFloorletPeriod,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<CurrencyAmount> {
        self.base.present_value_vega(period, rates, volatilities)
    }

    /// Sticky-strike rate sensitivity.
    fn present_value_sensitivity_rates(
        &self,
        period: &IborCapletFloorletPeriod,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<PointSensitivityBuilder> {
        self.base
            .present_value_sensitivity_rates(period, rates, volatilities)
    }

    /// One sensitivity per SABR parameter: `vega × ∂σ/∂p`.
    fn present_value_sensitivity_model_params_volatility(
        &self,
        period: &IborCapletFloorletPeriod,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<PointSensitivityBuilder> {
        match self.base.resolve(period, rates, volatilities)? {
            Pricing::Optional {
                expiry,
                forward,
                df,
                ..
            } if expiry > 0.0 => {
                let adjoint = volatilities
                    .as_sabr()?
                    .volatility_adjoint(expiry, period.strike(), forward)?;
                let vega = period.notional()
                    * period.year_fraction()
                    * df
                    * volatilities.price_vega(
                        expiry,
                        period.put_call(),
                        period.strike(),
                        forward,
                        adjoint.volatility,
                    );
                let derivatives = [adjoint.d_alpha, adjoint.d_beta, adjoint.d_rho, adjoint.d_nu];
                Ok(SabrParameterType::ALL
                    .into_iter()
                    .zip(derivatives)
                    .map(|(parameter, d)| {
                        PointSensitivityBuilder::of(SabrParameterSensitivity {
                            volatilities_name: volatilities.name().to_string(),
                            expiry,
                            parameter,
                            currency: period.currency(),
                            sensitivity: vega * d,
                        })
                    })
                    .collect())
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
        self.base.implied_volatility(period, rates, volatilities)
    }
}
