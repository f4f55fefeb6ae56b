//! Finite-difference parameter sensitivities.
//!
//! Bumps every curve or surface parameter up and down by a fixed amount and
//! reprices. Slow but model-free, which makes it the reference the analytic
//! sensitivities are checked against.

use crate::provider::ImmutableRatesProvider;
use crate::sensitivity::{CurrencyParameterSensitivities, CurrencyParameterSensitivity};
use crate::volatility::CapletVolatilities;
use capfloor_core::{ensure, CurrencyAmount, Real, Result};
use nalgebra::DVector;

/// Central-difference sensitivity calculator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiniteDifferenceCalculator {
    shift: Real,
}

impl Default for FiniteDifferenceCalculator {
    fn default() -> Self {
        Self { shift: 1.0e-6 }
    }
}

impl FiniteDifferenceCalculator {
    /// A calculator bumping each parameter by `±shift`.
    pub fn new(shift: Real) -> Result<Self> {
        ensure!(shift > 0.0, "finite-difference shift must be positive, got {shift}");
        Ok(Self { shift })
    }

    /// The bump size.
    pub fn shift(&self) -> Real {
        self.shift
    }

    /// Sensitivity of `value` to every curve node of `provider`.
    pub fn sensitivity_rates<F>(
        &self,
        provider: &ImmutableRatesProvider,
        value: F,
    ) -> Result<CurrencyParameterSensitivities>
    where
        F: Fn(&ImmutableRatesProvider) -> Result<CurrencyAmount>,
    {
        let blocks = provider
            .curves()
            .into_iter()
            .map(|c| (c.name().to_string(), c.parameters().clone()))
            .collect();
        self.bump_all(blocks, |name, p| provider.with_curve_parameters(name, p), value)
    }

    /// Sensitivity of `value` to every volatility parameter of `volatilities`.
    pub fn sensitivity_volatilities<F>(
        &self,
        volatilities: &CapletVolatilities,
        value: F,
    ) -> Result<CurrencyParameterSensitivities>
    where
        F: Fn(&CapletVolatilities) -> Result<CurrencyAmount>,
    {
        self.bump_all(
            volatilities.parameter_blocks(),
            |name, p| volatilities.with_parameters(name, p),
            value,
        )
    }

    fn bump_all<T, B, F>(
        &self,
        blocks: Vec<(String, DVector<Real>)>,
        rebuild: B,
        value: F,
    ) -> Result<CurrencyParameterSensitivities>
    where
        B: Fn(&str, DVector<Real>) -> Result<T>,
        F: Fn(&T) -> Result<CurrencyAmount>,
    {
        let mut out = CurrencyParameterSensitivities::empty();
        for (name, base) in blocks {
            let mut derivatives = DVector::zeros(base.len());
            let mut currency = None;
            for i in 0..base.len() {
                let mut up = base.clone();
                up[i] += self.shift;
                let mut down = base.clone();
                down[i] -= self.shift;
                let v_up = value(&rebuild(&name, up)?)?;
                let v_down = value(&rebuild(&name, down)?)?;
                derivatives[i] = (v_up.amount() - v_down.amount()) / (2.0 * self.shift);
                currency = Some(v_up.currency());
            }
            if let Some(ccy) = currency {
                out = out.combined_with_one(CurrencyParameterSensitivity::new(name, ccy, derivatives));
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::InterpolatedCurve;
    use crate::provider::RatesProvider;
    use capfloor_core::Currency;
    use chrono::NaiveDate;

    #[test]
    fn discount_factor_bump_matches_analytic() {
        let val = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let pay = NaiveDate::from_ymd_opt(2022, 7, 1).unwrap();
        let curve = InterpolatedCurve::new("USD-DSC", &[1.0, 5.0], &[0.01, 0.02]).unwrap();
        let provider = ImmutableRatesProvider::builder(val)
            .with_discount_curve(Currency::USD, curve)
            .build()
            .unwrap();
        let pv = |p: &ImmutableRatesProvider| -> Result<CurrencyAmount> {
            Ok(CurrencyAmount::new(
                Currency::USD,
                1.0e6 * p.discount_factor(Currency::USD, pay)?,
            ))
        };
        let fd = FiniteDifferenceCalculator::default()
            .sensitivity_rates(&provider, pv)
            .unwrap();
        let points = provider
            .discount_factor_zero_rate_sensitivity(Currency::USD, pay)
            .unwrap()
            .multiplied_by(1.0e6)
            .build();
        let analytic = provider.parameter_sensitivity(&points).unwrap();
        assert!(fd.equal_within_tolerance(&analytic, 1e-3), "{fd:?} vs {analytic:?}");
    }

    #[test]
    fn rejects_non_positive_shift() {
        assert!(FiniteDifferenceCalculator::new(0.0).is_err());
    }
}
