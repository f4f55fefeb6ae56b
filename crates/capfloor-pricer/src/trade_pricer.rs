//! Cap/floor trade pricer: the product plus the premium.

use crate::config::PricingConfig;
use crate::discounting::DiscountingPaymentPricer;
use crate::period_pricer::IborCapletFloorletPeriodPricer;
use crate::period_values::PeriodValues;
use crate::product_pricer::IborCapFloorProductPricer;
use crate::sabr_period_pricer::SabrIborCapletFloorletPeriodPricer;
use capfloor_core::{MultiCurrencyAmount, Rate, Result, Volatility};
use capfloor_market::{
    CapletVolatilities, PointSensitivities, PointSensitivityBuilder, RatesProvider,
};
use capfloor_products::IborCapFloorTrade;

/// Prices an [`IborCapFloorTrade`].
#[derive(Debug, Clone)]
pub struct IborCapFloorTradePricer<P> {
    product_pricer: IborCapFloorProductPricer<P>,
    payment_pricer: DiscountingPaymentPricer,
}

impl<P: IborCapletFloorletPeriodPricer> IborCapFloorTradePricer<P> {
    /// A trade pricer around `product_pricer`.
    pub fn new(product_pricer: IborCapFloorProductPricer<P>) -> Self {
        Self {
            product_pricer,
            payment_pricer: DiscountingPaymentPricer,
        }
    }

    /// A trade pricer for `period_pricer` with the configured settings.
    pub fn with_config(period_pricer: P, config: &PricingConfig) -> Self {
        Self::new(IborCapFloorProductPricer::with_config(period_pricer, config))
    }

    /// The product pricer.
    pub fn product_pricer(&self) -> &IborCapFloorProductPricer<P> {
        &self.product_pricer
    }

    /// Present value of the product and the premium.
    pub fn present_value(
        &self,
        trade: &IborCapFloorTrade,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<MultiCurrencyAmount> {
        let pv = self
            .product_pricer
            .present_value(trade.product(), rates, volatilities)?;
        tracing::debug!(
            currencies = pv.len(),
            premium = trade.premium().is_some(),
            "priced cap/floor trade"
        );
        match trade.premium() {
            Some(premium) => Ok(pv.plus(self.payment_pricer.present_value(premium, rates)?)),
            None => Ok(pv),
        }
    }

    /// Point sensitivity to forward and discount rates, premium included.
    pub fn present_value_sensitivity_rates(
        &self,
        trade: &IborCapFloorTrade,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<PointSensitivities> {
        let product = self.product_pricer.present_value_sensitivity_rates(
            trade.product(),
            rates,
            volatilities,
        )?;
        let premium = match trade.premium() {
            Some(p) => self.payment_pricer.present_value_sensitivity(p, rates)?,
            None => PointSensitivityBuilder::none(),
        };
        Ok(product.combined_with(premium).build())
    }

    /// Point sensitivity to the volatility parameters.
    pub fn present_value_sensitivity_model_params_volatility(
        &self,
        trade: &IborCapFloorTrade,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<PointSensitivities> {
        Ok(self
            .product_pricer
            .present_value_sensitivity_model_params_volatility(trade.product(), rates, volatilities)?
            .build())
    }

    /// `rates.currency_exposure(rate sensitivities) + present value`.
    pub fn currency_exposure(
        &self,
        trade: &IborCapFloorTrade,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<MultiCurrencyAmount> {
        let points = self.present_value_sensitivity_rates(trade, rates, volatilities)?;
        let pv = self.present_value(trade, rates, volatilities)?;
        Ok(rates.currency_exposure(&points).plus_all(&pv))
    }

    /// Cash paid on the valuation date, premium included.
    pub fn current_cash(
        &self,
        trade: &IborCapFloorTrade,
        rates: &dyn RatesProvider,
    ) -> Result<MultiCurrencyAmount> {
        let cash = self.product_pricer.current_cash(trade.product(), rates)?;
        Ok(match trade.premium() {
            Some(p) => cash.plus(self.payment_pricer.current_cash(p, rates)),
            None => cash,
        })
    }

    /// Forward rates of the caplets still to fix.
    pub fn forward_rates(
        &self,
        trade: &IborCapFloorTrade,
        rates: &dyn RatesProvider,
    ) -> Result<PeriodValues<Rate>> {
        self.product_pricer.forward_rates(trade.product(), rates)
    }

    /// Implied volatilities of the caplets still to fix.
    pub fn implied_volatilities(
        &self,
        trade: &IborCapFloorTrade,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<PeriodValues<Volatility>> {
        self.product_pricer
            .implied_volatilities(trade.product(), rates, volatilities)
    }
}

impl IborCapFloorTradePricer<SabrIborCapletFloorletPeriodPricer> {
    /// Rate sensitivity with the SABR smile moving with the forward.
    pub fn present_value_sensitivity_rates_sticky_model(
        &self,
        trade: &IborCapFloorTrade,
        rates: &dyn RatesProvider,
        volatilities: &CapletVolatilities,
    ) -> Result<PointSensitivities> {
        let product = self
            .product_pricer
            .present_value_sensitivity_rates_sticky_model(trade.product(), rates, volatilities)?;
        let premium = match trade.premium() {
            Some(p) => self.payment_pricer.present_value_sensitivity(p, rates)?,
            None => PointSensitivityBuilder::none(),
        };
        Ok(product.combined_with(premium).build())
    }
}
