//! Cap/floor product pricer: the caplet/floorlet leg plus the funding leg.

use crate::config::PricingConfig;
use crate::discounting::DiscountingSwapLegPricer;
use crate::leg_pricer::IborCapFloorLegPricer;
use crate::period_pricer::IborCapletFloorletPeriodPricer;
use crate::period_values::PeriodValues;
use crate::sabr_period_pricer::SabrIborCapletFloorletPeriodPricer;
use capfloor_core::{MultiCurrencyAmount, Rate, Result, Volatility};
use capfloor_market::{CapletVolatilities, PointSensitivityBuilder, RatesProvider};
use capfloor_products::IborCapFloor;

/// Prices an [`IborCapFloor`].
#[derive(Debug, Clone)]
pub struct IborCapFloorProductPricer<P> {
    leg_pricer: IborCapFloorLegPricer<P>,
    pay_leg_pricer: DiscountingSwapLegPricer,
}

impl<P: IborCapletFloorletPeriodPricer> IborCapFloorProductPricer<P> {
    /// A product pricer around `leg_pricer`.
    pub fn new(leg_pricer: IborCapFloorLegPricer<P>) -> Self {
        Self {
            leg_pricer,
            pay_leg_pricer: DiscountingSwapLegPricer::DEFAULT,
        }
    }

    /// A product pricer for `period_pricer` with the configured settings.
    pub fn with_config(period_pricer: P, config: &PricingConfig) -> Self {
        Self::new(IborCapFloorLegPricer::with_config(period_pricer, config))
    }

    /// The cap/floor leg pricer.
    pub fn leg_pricer(&self) -> &IborCapFloorLegPricer<P> {
        &self.leg_pricer
    }

    /// Present value of both legs.
    pub fn present_value(
        &self,
        product: &IborCapFloor,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<MultiCurrencyAmount> {
        let cap_floor = self
            .leg_pricer
            .present_value(product.cap_floor_leg(), rates, volatilities)?;
        let mut pv = MultiCurrencyAmount::of(cap_floor);
        if let Some(pay_leg) = product.pay_leg() {
            pv = pv.plus(self.pay_leg_pricer.present_value(pay_leg, rates)?);
        }
        Ok(pv)
    }

    /// Point sensitivity of both legs to forward and discount rates.
    pub fn present_value_sensitivity_rates(
        &self,
        product: &IborCapFloor,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<PointSensitivityBuilder> {
        let cap_floor = self.leg_pricer.present_value_sensitivity_rates(
            product.cap_floor_leg(),
            rates,
            volatilities,
        )?;
        self.with_pay_leg_sensitivity(product, rates, cap_floor)
    }

    /// Point sensitivity to the volatility parameters; the funding leg has none.
    pub fn present_value_sensitivity_model_params_volatility(
        &self,
        product: &IborCapFloor,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<PointSensitivityBuilder> {
        self.leg_pricer
            .present_value_sensitivity_model_params_volatility(
                product.cap_floor_leg(),
                rates,
                volatilities,
            )
    }

    /// Currency exposure: the FX risk of the rate sensitivities plus the
    /// present value.
    pub fn currency_exposure(
        &self,
        product: &IborCapFloor,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<MultiCurrencyAmount> {
        let points = self
            .present_value_sensitivity_rates(product, rates, volatilities)?
            .build();
        let pv = self.present_value(product, rates, volatilities)?;
        Ok(rates.currency_exposure(&points).plus_all(&pv))
    }

    /// Cash paid by either leg on the valuation date.
    pub fn current_cash(
        &self,
        product: &IborCapFloor,
        rates: &dyn RatesProvider,
    ) -> Result<MultiCurrencyAmount> {
        let mut cash =
            MultiCurrencyAmount::of(self.leg_pricer.current_cash(product.cap_floor_leg(), rates)?);
        if let Some(pay_leg) = product.pay_leg() {
            cash = cash.plus(self.pay_leg_pricer.current_cash(pay_leg, rates)?);
        }
        Ok(cash)
    }

    /// Forward rates of the caplets still to fix.
    pub fn forward_rates(
        &self,
        product: &IborCapFloor,
        rates: &dyn RatesProvider,
    ) -> Result<PeriodValues<Rate>> {
        self.leg_pricer.forward_rates(product.cap_floor_leg(), rates)
    }

    /// Implied volatilities of the caplets still to fix.
    pub fn implied_volatilities(
        &self,
        product: &IborCapFloor,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<PeriodValues<Volatility>> {
        self.leg_pricer
            .implied_volatilities(product.cap_floor_leg(), rates, volatilities)
    }

    fn with_pay_leg_sensitivity(
        &self,
        product: &IborCapFloor,
        rates: &dyn RatesProvider,
        cap_floor: PointSensitivityBuilder,
    ) -> Result<PointSensitivityBuilder> {
        match product.pay_leg() {
            Some(pay_leg) => Ok(cap_floor.combined_with(
                self.pay_leg_pricer.present_value_sensitivity(pay_leg, rates)?,
            )),
            None => Ok(cap_floor),
        }
    }
}

impl IborCapFloorProductPricer<SabrIborCapletFloorletPeriodPricer> {
    /// Rate sensitivity with the SABR smile moving with the forward.
    pub fn present_value_sensitivity_rates_sticky_model(
        &self,
        product: &IborCapFloor,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<PointSensitivityBuilder> {
        let cap_floor = self.leg_pricer.present_value_sensitivity_rates_sticky_model(
            product.cap_floor_leg(),
            rates,
            volatilities,
        )?;
        self.with_pay_leg_sensitivity(product, rates, cap_floor)
    }
}
