//! SABR caplet volatilities: α, β, ρ, ν as curves over expiry plus a
//! constant shift.

use crate::curve::InterpolatedCurve;
use crate::index::IborIndex;
use crate::sensitivity::SabrParameterType;
use capfloor_core::{ensure, Real, Result, Time, Volatility};
use capfloor_math::{sabr_volatility, sabr_volatility_adjoint, SabrParameters, SabrVolatilityAdjoint};
use chrono::NaiveDate;

/// The four SABR parameter curves.
#[derive(Debug, Clone, PartialEq)]
pub struct SabrParameterCurves {
    /// α by expiry.
    pub alpha: InterpolatedCurve,
    /// β by expiry.
    pub beta: InterpolatedCurve,
    /// ρ by expiry.
    pub rho: InterpolatedCurve,
    /// ν by expiry.
    pub nu: InterpolatedCurve,
}

impl SabrParameterCurves {
    /// The curve of one parameter.
    pub fn curve(&self, parameter: SabrParameterType) -> &InterpolatedCurve {
        match parameter {
            SabrParameterType::Alpha => &self.alpha,
            SabrParameterType::Beta => &self.beta,
            SabrParameterType::Rho => &self.rho,
            SabrParameterType::Nu => &self.nu,
        }
    }

    pub(crate) fn curve_mut(&mut self, parameter: SabrParameterType) -> &mut InterpolatedCurve {
        match parameter {
            SabrParameterType::Alpha => &mut self.alpha,
            SabrParameterType::Beta => &mut self.beta,
            SabrParameterType::Rho => &mut self.rho,
            SabrParameterType::Nu => &mut self.nu,
        }
    }

    fn validate(&self) -> Result<()> {
        let all = |c: &InterpolatedCurve, ok: fn(Real) -> bool| c.parameters().iter().all(|&v| ok(v));
        ensure!(all(&self.alpha, |v| v > 0.0), "SABR alpha nodes must be positive");
        ensure!(
            all(&self.beta, |v| (0.0..=1.0).contains(&v)),
            "SABR beta nodes must lie in [0, 1]"
        );
        ensure!(
            all(&self.rho, |v| v > -1.0 && v < 1.0),
            "SABR rho nodes must lie in (-1, 1)"
        );
        ensure!(all(&self.nu, |v| v >= 0.0), "SABR nu nodes must be non-negative");
        Ok(())
    }
}

/// SABR caplet volatilities.
#[derive(Debug, Clone, PartialEq)]
pub struct SabrCapletVolatilities {
    pub(crate) name: String,
    pub(crate) index: IborIndex,
    pub(crate) valuation_date: NaiveDate,
    pub(crate) curves: SabrParameterCurves,
    pub(crate) shift: Real,
}

impl SabrCapletVolatilities {
    /// SABR volatilities for `index` as of `valuation_date`.
    ///
    /// # Errors
    /// `Error::Configuration` if any parameter node is outside its domain, if
    /// two parameter curves share a name, or if the shift is negative.
    pub fn new(
        name: impl Into<String>,
        index: IborIndex,
        valuation_date: NaiveDate,
        curves: SabrParameterCurves,
        shift: Real,
    ) -> Result<Self> {
        curves.validate()?;
        let mut names: Vec<&str> = SabrParameterType::ALL
            .iter()
            .map(|&p| curves.curve(p).name())
            .collect();
        names.sort_unstable();
        names.dedup();
        ensure!(names.len() == 4, "SABR parameter curves must have distinct names");
        ensure!(
            shift.is_finite() && shift >= 0.0,
            "SABR volatilities: shift must be finite and non-negative, got {shift}"
        );
        Ok(Self {
            name: name.into(),
            index,
            valuation_date,
            curves,
            shift,
        })
    }

    /// The parameter curves.
    pub fn curves(&self) -> &SabrParameterCurves {
        &self.curves
    }

    /// The constant shift.
    pub fn shift(&self) -> Real {
        self.shift
    }

    /// SABR parameters at an expiry.
    pub fn parameters(&self, expiry: Time) -> SabrParameters {
        SabrParameters {
            alpha: self.curves.alpha.y_value(expiry),
            beta: self.curves.beta.y_value(expiry),
            rho: self.curves.rho.y_value(expiry),
            nu: self.curves.nu.y_value(expiry),
        }
    }

    /// Implied Black volatility of the shifted forward and strike.
    ///
    /// # Errors
    /// `Error::Configuration` if the shifted forward is not positive.
    pub fn volatility(&self, expiry: Time, strike: Real, forward: Real) -> Result<Volatility> {
        sabr_volatility(
            forward + self.shift,
            strike + self.shift,
            expiry,
            &self.parameters(expiry),
        )
    }

    /// Implied volatility with its derivatives in forward, strike and the
    /// SABR parameters.
    ///
    /// # Errors
    /// `Error::Configuration` if the shifted forward is not positive.
    pub fn volatility_adjoint(
        &self,
        expiry: Time,
        strike: Real,
        forward: Real,
    ) -> Result<SabrVolatilityAdjoint> {
        sabr_volatility_adjoint(
            forward + self.shift,
            strike + self.shift,
            expiry,
            &self.parameters(expiry),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curves(beta: Real) -> SabrParameterCurves {
        SabrParameterCurves {
            alpha: InterpolatedCurve::new("alpha", &[0.5, 5.0], &[0.04, 0.06]).unwrap(),
            beta: InterpolatedCurve::constant("beta", beta).unwrap(),
            rho: InterpolatedCurve::constant("rho", -0.25).unwrap(),
            nu: InterpolatedCurve::constant("nu", 0.5).unwrap(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rejects_out_of_domain_nodes() {
        let r = SabrCapletVolatilities::new(
            "SABR",
            IborIndex::EUR_EURIBOR_3M,
            date(2008, 8, 18),
            curves(1.5),
            0.0,
        );
        assert!(r.is_err());
    }

    #[test]
    fn shift_moves_forward_and_strike() {
        let shifted = SabrCapletVolatilities::new(
            "SABR",
            IborIndex::EUR_EURIBOR_3M,
            date(2008, 8, 18),
            curves(0.5),
            0.02,
        )
        .unwrap();
        let p = shifted.parameters(2.0);
        assert!((p.alpha - (0.04 + 0.02 * 1.5 / 4.5)).abs() < 1e-15);
        let direct = sabr_volatility(0.03, 0.03, 2.0, &p).unwrap();
        assert_eq!(shifted.volatility(2.0, 0.01, 0.01).unwrap(), direct);
    }

    #[test]
    fn forward_below_minus_shift_is_rejected() {
        let shifted = SabrCapletVolatilities::new(
            "SABR",
            IborIndex::EUR_EURIBOR_3M,
            date(2008, 8, 18),
            curves(0.5),
            0.01,
        )
        .unwrap();
        assert!(shifted.volatility(2.0, 0.01, -0.005).is_ok());
        assert!(shifted.volatility(2.0, 0.01, -0.01).is_err());
        assert!(shifted.volatility_adjoint(2.0, 0.01, -0.02).is_err());
    }

    #[test]
    fn rejects_each_parameter_outside_its_domain() {
        let build = |c: SabrParameterCurves| {
            SabrCapletVolatilities::new("SABR", IborIndex::EUR_EURIBOR_3M, date(2008, 8, 18), c, 0.0)
        };
        let bad_alpha = SabrParameterCurves {
            alpha: InterpolatedCurve::constant("alpha", 0.0).unwrap(),
            ..curves(0.5)
        };
        let bad_rho = SabrParameterCurves {
            rho: InterpolatedCurve::constant("rho", 1.0).unwrap(),
            ..curves(0.5)
        };
        let bad_nu = SabrParameterCurves {
            nu: InterpolatedCurve::constant("nu", -0.1).unwrap(),
            ..curves(0.5)
        };
        for c in [bad_alpha, bad_rho, bad_nu, curves(-0.1)] {
            assert!(build(c).is_err());
        }
        assert!(build(curves(0.0)).is_ok());
    }
}
