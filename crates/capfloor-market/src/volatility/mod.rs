//! Caplet volatilities.
//!
//! The model families form a closed set. Each pricer declares the family it
//! handles and checks [`CapletVolatilities::model`] before pricing, so a
//! Normal surface can never be fed into a Black formula by accident.

mod sabr;
mod surface_models;

pub use sabr::{SabrCapletVolatilities, SabrParameterCurves};
pub use surface_models::{
    BlackCapletVolatilities, NormalCapletVolatilities, ShiftedBlackCapletVolatilities,
};

use crate::index::IborIndex;
use crate::sensitivity::{
    CapletVolatilitySensitivity, CurrencyParameterSensitivities, CurrencyParameterSensitivity,
    PointSensitivities, PointSensitivity, SabrParameterSensitivity, SabrParameterType,
};
use crate::surface::InterpolatedSurface;
use capfloor_core::{DayCount, Error, PutCall, Real, Result, Time, Volatility};
use capfloor_math::{bachelier, black};
use chrono::NaiveDate;
use nalgebra::DVector;
use std::fmt;

/// Model family of a set of caplet volatilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolatilityModel {
    /// Log-normal.
    Black,
    /// Shifted log-normal.
    ShiftedBlack,
    /// Normal (Bachelier).
    Normal,
    /// SABR, priced through shifted Black.
    Sabr,
}

impl fmt::Display for VolatilityModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VolatilityModel::Black => "Black",
            VolatilityModel::ShiftedBlack => "ShiftedBlack",
            VolatilityModel::Normal => "Normal",
            VolatilityModel::Sabr => "SABR",
        };
        f.write_str(s)
    }
}

/// Caplet volatilities of any supported model.
#[derive(Debug, Clone, PartialEq)]
pub enum CapletVolatilities {
    /// Log-normal surface.
    Black(BlackCapletVolatilities),
    /// Shifted log-normal surface.
    ShiftedBlack(ShiftedBlackCapletVolatilities),
    /// Normal surface.
    Normal(NormalCapletVolatilities),
    /// SABR parameter curves.
    Sabr(SabrCapletVolatilities),
}

impl From<BlackCapletVolatilities> for CapletVolatilities {
    fn from(v: BlackCapletVolatilities) -> Self {
        CapletVolatilities::Black(v)
    }
}

impl From<ShiftedBlackCapletVolatilities> for CapletVolatilities {
    fn from(v: ShiftedBlackCapletVolatilities) -> Self {
        CapletVolatilities::ShiftedBlack(v)
    }
}

impl From<NormalCapletVolatilities> for CapletVolatilities {
    fn from(v: NormalCapletVolatilities) -> Self {
        CapletVolatilities::Normal(v)
    }
}

impl From<SabrCapletVolatilities> for CapletVolatilities {
    fn from(v: SabrCapletVolatilities) -> Self {
        CapletVolatilities::Sabr(v)
    }
}

impl CapletVolatilities {
    // ── Identity ─────────────────────────────────────────────────────────

    /// The model family.
    pub fn model(&self) -> VolatilityModel {
        match self {
            CapletVolatilities::Black(_) => VolatilityModel::Black,
            CapletVolatilities::ShiftedBlack(_) => VolatilityModel::ShiftedBlack,
            CapletVolatilities::Normal(_) => VolatilityModel::Normal,
            CapletVolatilities::Sabr(_) => VolatilityModel::Sabr,
        }
    }

    /// `Error::InvalidModel` unless the family is `expected`.
    pub fn ensure_model(&self, expected: VolatilityModel) -> Result<()> {
        if self.model() == expected {
            Ok(())
        } else {
            Err(Error::InvalidModel {
                expected: expected.to_string(),
                found: self.model().to_string(),
            })
        }
    }

    /// The SABR volatilities, or `Error::InvalidModel`.
    pub fn as_sabr(&self) -> Result<&SabrCapletVolatilities> {
        match self {
            CapletVolatilities::Sabr(v) => Ok(v),
            _ => Err(Error::InvalidModel {
                expected: VolatilityModel::Sabr.to_string(),
                found: self.model().to_string(),
            }),
        }
    }

    /// Name, used to key volatility sensitivities.
    pub fn name(&self) -> &str {
        match self {
            CapletVolatilities::Black(v) => v.surface.name(),
            CapletVolatilities::ShiftedBlack(v) => v.surface.name(),
            CapletVolatilities::Normal(v) => v.surface.name(),
            CapletVolatilities::Sabr(v) => &v.name,
        }
    }

    /// The index the volatilities apply to.
    pub fn index(&self) -> IborIndex {
        match self {
            CapletVolatilities::Black(v) => v.index,
            CapletVolatilities::ShiftedBlack(v) => v.index,
            CapletVolatilities::Normal(v) => v.index,
            CapletVolatilities::Sabr(v) => v.index,
        }
    }

    /// The valuation date.
    pub fn valuation_date(&self) -> NaiveDate {
        match self {
            CapletVolatilities::Black(v) => v.valuation_date,
            CapletVolatilities::ShiftedBlack(v) => v.valuation_date,
            CapletVolatilities::Normal(v) => v.valuation_date,
            CapletVolatilities::Sabr(v) => v.valuation_date,
        }
    }

    /// Act/365F time from the valuation date to `date`; negative in the past.
    pub fn relative_time(&self, date: NaiveDate) -> Time {
        DayCount::Act365F.relative_year_fraction(self.valuation_date(), date)
    }

    /// The shift added to forward and strike before applying the formula.
    pub fn shift(&self) -> Real {
        match self {
            CapletVolatilities::ShiftedBlack(v) => v.shift,
            CapletVolatilities::Sabr(v) => v.shift,
            CapletVolatilities::Black(_) | CapletVolatilities::Normal(_) => 0.0,
        }
    }

    // ── Volatility and option formulas ───────────────────────────────────

    /// Volatility at `(expiry, strike, forward)`.
    ///
    /// # Errors
    /// `Error::Configuration` when SABR is asked for a non-positive shifted
    /// forward.
    pub fn volatility(&self, expiry: Time, strike: Real, forward: Real) -> Result<Volatility> {
        match self {
            CapletVolatilities::Black(v) => Ok(v.surface.z_value(expiry, strike)),
            CapletVolatilities::ShiftedBlack(v) => Ok(v.surface.z_value(expiry, strike)),
            CapletVolatilities::Normal(v) => Ok(v.surface.z_value(expiry, strike)),
            CapletVolatilities::Sabr(v) => v.volatility(expiry, strike, forward),
        }
    }

    /// Undiscounted option price under the model.
    pub fn price(
        &self,
        expiry: Time,
        put_call: PutCall,
        strike: Real,
        forward: Real,
        volatility: Volatility,
    ) -> Real {
        self.apply(black::price, bachelier::price, expiry, put_call, strike, forward, volatility)
    }

    /// `∂price/∂forward`.
    pub fn price_delta(
        &self,
        expiry: Time,
        put_call: PutCall,
        strike: Real,
        forward: Real,
        volatility: Volatility,
    ) -> Real {
        self.apply(black::delta, bachelier::delta, expiry, put_call, strike, forward, volatility)
    }

    /// `∂²price/∂forward²`.
    pub fn price_gamma(
        &self,
        expiry: Time,
        put_call: PutCall,
        strike: Real,
        forward: Real,
        volatility: Volatility,
    ) -> Real {
        self.apply(black::gamma, bachelier::gamma, expiry, put_call, strike, forward, volatility)
    }

    /// Driftless theta.
    pub fn price_theta(
        &self,
        expiry: Time,
        put_call: PutCall,
        strike: Real,
        forward: Real,
        volatility: Volatility,
    ) -> Real {
        self.apply(black::theta, bachelier::theta, expiry, put_call, strike, forward, volatility)
    }

    /// `∂price/∂volatility`.
    pub fn price_vega(
        &self,
        expiry: Time,
        put_call: PutCall,
        strike: Real,
        forward: Real,
        volatility: Volatility,
    ) -> Real {
        self.apply(black::vega, bachelier::vega, expiry, put_call, strike, forward, volatility)
    }

    #[allow(clippy::too_many_arguments)]
    fn apply(
        &self,
        lognormal: fn(Real, Real, Time, Volatility, PutCall) -> Real,
        normal: fn(Real, Real, Time, Volatility, PutCall) -> Real,
        expiry: Time,
        put_call: PutCall,
        strike: Real,
        forward: Real,
        volatility: Volatility,
    ) -> Real {
        match self {
            CapletVolatilities::Normal(_) => normal(forward, strike, expiry, volatility, put_call),
            _ => {
                let s = self.shift();
                lognormal(forward + s, strike + s, expiry, volatility, put_call)
            }
        }
    }

    // ── Sensitivities ────────────────────────────────────────────────────

    /// Resolve volatility point sensitivities that refer to these
    /// volatilities; every other point is ignored.
    ///
    /// # Errors
    /// `Error::InvalidModel` if a point of the wrong kind names these
    /// volatilities (a surface sensitivity on SABR volatilities, or the
    /// reverse).
    pub fn parameter_sensitivity(
        &self,
        sensitivities: &PointSensitivities,
    ) -> Result<CurrencyParameterSensitivities> {
        let mut out = CurrencyParameterSensitivities::empty();
        for point in sensitivities {
            let resolved = match point {
                PointSensitivity::CapletVolatility(p) if p.volatilities_name == self.name() => {
                    self.surface_sensitivity(p)?
                }
                PointSensitivity::SabrParameter(p) if p.volatilities_name == self.name() => {
                    self.sabr_sensitivity(p)?
                }
                _ => continue,
            };
            out = out.combined_with_one(resolved);
        }
        Ok(out)
    }

    fn surface(&self) -> Option<&InterpolatedSurface> {
        match self {
            CapletVolatilities::Black(v) => Some(&v.surface),
            CapletVolatilities::ShiftedBlack(v) => Some(&v.surface),
            CapletVolatilities::Normal(v) => Some(&v.surface),
            CapletVolatilities::Sabr(_) => None,
        }
    }

    fn surface_sensitivity(
        &self,
        point: &CapletVolatilitySensitivity,
    ) -> Result<CurrencyParameterSensitivity> {
        let surface = self.surface().ok_or_else(|| Error::InvalidModel {
            expected: "surface volatilities".into(),
            found: self.model().to_string(),
        })?;
        let weights = surface.z_value_parameter_sensitivity(point.expiry, point.strike);
        Ok(CurrencyParameterSensitivity::new(
            surface.name(),
            point.currency,
            weights * point.sensitivity,
        ))
    }

    fn sabr_sensitivity(
        &self,
        point: &SabrParameterSensitivity,
    ) -> Result<CurrencyParameterSensitivity> {
        let sabr = self.as_sabr()?;
        let curve = sabr.curves.curve(point.parameter);
        Ok(CurrencyParameterSensitivity::new(
            curve.name(),
            point.currency,
            curve.y_value_parameter_sensitivity(point.expiry) * point.sensitivity,
        ))
    }

    // ── Re-parameterization ──────────────────────────────────────────────

    /// Every parameter block as `(market data name, parameters)`.
    pub fn parameter_blocks(&self) -> Vec<(String, DVector<Real>)> {
        match self {
            CapletVolatilities::Sabr(v) => SabrParameterType::ALL
                .iter()
                .map(|&p| {
                    let c = v.curves.curve(p);
                    (c.name().to_string(), c.parameters().clone())
                })
                .collect(),
            _ => self
                .surface()
                .map(|s| vec![(s.name().to_string(), s.parameters())])
                .unwrap_or_default(),
        }
    }

    /// A copy with the block called `name` re-parameterized.
    ///
    /// # Errors
    /// `Error::MissingMarketData` if no block has that name.
    pub fn with_parameters(&self, name: &str, parameters: DVector<Real>) -> Result<Self> {
        let missing = || Error::MissingMarketData(format!("no volatility parameters named {name}"));
        let mut out = self.clone();
        match &mut out {
            CapletVolatilities::Black(v) if v.surface.name() == name => {
                v.surface = v.surface.with_parameters(parameters)?;
            }
            CapletVolatilities::ShiftedBlack(v) if v.surface.name() == name => {
                v.surface = v.surface.with_parameters(parameters)?;
            }
            CapletVolatilities::Normal(v) if v.surface.name() == name => {
                v.surface = v.surface.with_parameters(parameters)?;
            }
            CapletVolatilities::Sabr(v) => {
                let parameter = SabrParameterType::ALL
                    .into_iter()
                    .find(|&p| v.curves.curve(p).name() == name)
                    .ok_or_else(missing)?;
                let curve = v.curves.curve(parameter).with_parameters(parameters)?;
                *v.curves.curve_mut(parameter) = curve;
            }
            _ => return Err(missing()),
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capfloor_core::Currency;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn black_vols() -> CapletVolatilities {
        let surface = InterpolatedSurface::from_row_slice(
            "EUR-BLACK",
            &[1.0, 3.0],
            &[0.01, 0.03],
            &[0.30, 0.25, 0.28, 0.22],
        )
        .unwrap();
        BlackCapletVolatilities::new(IborIndex::EUR_EURIBOR_3M, date(2008, 8, 18), surface).into()
    }

    #[test]
    fn model_check() {
        let v = black_vols();
        assert!(v.ensure_model(VolatilityModel::Black).is_ok());
        let err = v.ensure_model(VolatilityModel::Normal).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidModel {
                expected: "Normal".into(),
                found: "Black".into()
            }
        );
        assert!(v.as_sabr().is_err());
    }

    #[test]
    fn relative_time_is_signed() {
        let v = black_vols();
        assert!((v.relative_time(date(2009, 8, 18)) - 1.0).abs() < 1e-15);
        assert!(v.relative_time(date(2008, 8, 17)) < 0.0);
    }

    #[test]
    fn surface_sensitivity_ignores_other_names() {
        let v = black_vols();
        let point = |name: &str| {
            PointSensitivity::from(CapletVolatilitySensitivity {
                volatilities_name: name.into(),
                expiry: 2.0,
                strike: 0.02,
                forward: 0.025,
                currency: Currency::EUR,
                sensitivity: 100.0,
            })
        };
        let sens = v
            .parameter_sensitivity(&PointSensitivities::of(vec![point("EUR-BLACK"), point("OTHER")]))
            .unwrap();
        assert_eq!(sens.len(), 1);
        let s = sens.get("EUR-BLACK", Currency::EUR).unwrap();
        assert!((s.sensitivity.sum() - 100.0).abs() < 1e-12);
        assert!(s.sensitivity.iter().all(|&w| (w - 25.0).abs() < 1e-12));
    }

    #[test]
    fn with_parameters_by_name() {
        let v = black_vols();
        let bumped = v
            .with_parameters("EUR-BLACK", DVector::from_element(4, 0.2))
            .unwrap();
        assert!((bumped.volatility(2.0, 0.02, 0.02).unwrap() - 0.2).abs() < 1e-15);
        assert!(v.with_parameters("NOPE", DVector::zeros(4)).is_err());
    }
}
