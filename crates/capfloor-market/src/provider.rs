//! Rates providers: the discounting and forward-rate view of a market.
//!
//! [`RatesProvider`] is the seam the pricers work against.
//! [`ImmutableRatesProvider`] is a snapshot of zero-rate discount curves,
//! zero-rate index curves and published fixings at one valuation date.

use crate::curve::InterpolatedCurve;
use crate::discount_factors::ZeroRateDiscountFactors;
use crate::index::{IborIndex, IborIndexObservation};
use crate::sensitivity::{
    CurrencyParameterSensitivities, IborRateSensitivity, PointSensitivities, PointSensitivity,
    PointSensitivityBuilder,
};
use capfloor_core::{
    Currency, DiscountFactor, Error, FixingSeries, MultiCurrencyAmount, Rate, Real, Result,
};
use chrono::NaiveDate;
use nalgebra::DVector;
use std::collections::HashMap;
use std::fmt;

/// Discount factors, forward rates and fixings as of a valuation date.
pub trait RatesProvider: Send + Sync + fmt::Debug {
    /// The valuation date.
    fn valuation_date(&self) -> NaiveDate;

    /// Discount factor in `currency` from the valuation date to `date`.
    fn discount_factor(&self, currency: Currency, date: NaiveDate) -> Result<DiscountFactor>;

    /// Sensitivity of the discount factor to the zero rate at `date`.
    fn discount_factor_zero_rate_sensitivity(
        &self,
        currency: Currency,
        date: NaiveDate,
    ) -> Result<PointSensitivityBuilder>;

    /// The fixing of `index` published on `date`, if known.
    fn ibor_fixing(&self, index: IborIndex, date: NaiveDate) -> Option<Rate>;

    /// The rate of an observation: the published fixing when the fixing date
    /// has passed (or is today and published), the forward rate otherwise.
    ///
    /// # Errors
    /// `Error::MissingMarketData` when a past fixing is not in the time
    /// series, or when the forward curve is absent.
    fn ibor_rate(&self, observation: &IborIndexObservation) -> Result<Rate>;

    /// Sensitivity of [`ibor_rate`](Self::ibor_rate) to the forward rate;
    /// none once the rate is fixed.
    fn ibor_rate_sensitivity(
        &self,
        observation: &IborIndexObservation,
    ) -> Result<PointSensitivityBuilder>;

    /// Resolve rate point sensitivities into curve parameter sensitivities.
    /// Volatility points are ignored.
    fn parameter_sensitivity(
        &self,
        sensitivities: &PointSensitivities,
    ) -> Result<CurrencyParameterSensitivities>;

    /// Currency exposure implied by point sensitivities (FX risk).
    fn currency_exposure(&self, sensitivities: &PointSensitivities) -> MultiCurrencyAmount;
}

/// An immutable market snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ImmutableRatesProvider {
    valuation_date: NaiveDate,
    discount_curves: HashMap<Currency, ZeroRateDiscountFactors>,
    index_curves: HashMap<IborIndex, ZeroRateDiscountFactors>,
    fixings: HashMap<IborIndex, FixingSeries>,
}

/// Builder for [`ImmutableRatesProvider`].
#[derive(Debug, Clone)]
pub struct ImmutableRatesProviderBuilder {
    valuation_date: NaiveDate,
    discount_curves: HashMap<Currency, InterpolatedCurve>,
    index_curves: HashMap<IborIndex, InterpolatedCurve>,
    fixings: HashMap<IborIndex, FixingSeries>,
}

impl ImmutableRatesProviderBuilder {
    /// Start a snapshot at `valuation_date`.
    pub fn new(valuation_date: NaiveDate) -> Self {
        Self {
            valuation_date,
            discount_curves: HashMap::new(),
            index_curves: HashMap::new(),
            fixings: HashMap::new(),
        }
    }

    /// Zero-rate discount curve for a currency.
    pub fn with_discount_curve(mut self, currency: Currency, curve: InterpolatedCurve) -> Self {
        self.discount_curves.insert(currency, curve);
        self
    }

    /// Zero-rate forward curve for an index.
    pub fn with_index_curve(mut self, index: IborIndex, curve: InterpolatedCurve) -> Self {
        self.index_curves.insert(index, curve);
        self
    }

    /// Published fixings of an index.
    pub fn with_time_series(mut self, index: IborIndex, series: FixingSeries) -> Self {
        self.fixings.insert(index, series);
        self
    }

    /// Build the snapshot.
    ///
    /// # Errors
    /// `Error::Configuration` when two curves share a name, since parameter
    /// sensitivities are keyed by name.
    pub fn build(self) -> Result<ImmutableRatesProvider> {
        let mut names: Vec<&str> = self
            .discount_curves
            .values()
            .chain(self.index_curves.values())
            .map(|c| c.name())
            .collect();
        names.sort_unstable();
        let unique = names.windows(2).all(|w| w[0] != w[1]);
        capfloor_core::ensure!(unique, "rates provider: curve names must be unique, got {names:?}");
        let valuation_date = self.valuation_date;
        Ok(ImmutableRatesProvider {
            valuation_date,
            discount_curves: self
                .discount_curves
                .into_iter()
                .map(|(ccy, c)| (ccy, ZeroRateDiscountFactors::new(ccy, valuation_date, c)))
                .collect(),
            index_curves: self
                .index_curves
                .into_iter()
                .map(|(idx, c)| {
                    let dfs = ZeroRateDiscountFactors::new(idx.currency(), valuation_date, c);
                    (idx, dfs)
                })
                .collect(),
            fixings: self.fixings,
        })
    }
}

impl ImmutableRatesProvider {
    /// Start building a snapshot at `valuation_date`.
    pub fn builder(valuation_date: NaiveDate) -> ImmutableRatesProviderBuilder {
        ImmutableRatesProviderBuilder::new(valuation_date)
    }

    /// Discount factors of a currency.
    pub fn discount_factors(&self, currency: Currency) -> Result<&ZeroRateDiscountFactors> {
        self.discount_curves.get(&currency).ok_or_else(|| {
            Error::MissingMarketData(format!("no discount curve for {currency}"))
        })
    }

    /// Forward curve of an index.
    pub fn index_curve(&self, index: IborIndex) -> Result<&ZeroRateDiscountFactors> {
        self.index_curves
            .get(&index)
            .ok_or_else(|| Error::MissingMarketData(format!("no forward curve for {index}")))
    }

    /// Every curve in the snapshot, sorted by name.
    pub fn curves(&self) -> Vec<&InterpolatedCurve> {
        let mut curves: Vec<&InterpolatedCurve> = self
            .discount_curves
            .values()
            .chain(self.index_curves.values())
            .map(|d| d.curve())
            .collect();
        curves.sort_by(|a, b| a.name().cmp(b.name()));
        curves
    }

    /// A copy with the curve called `name` re-parameterized.
    ///
    /// # Errors
    /// `Error::MissingMarketData` if no curve has that name.
    pub fn with_curve_parameters(&self, name: &str, parameters: DVector<Real>) -> Result<Self> {
        let mut out = self.clone();
        let target = out
            .discount_curves
            .values_mut()
            .chain(out.index_curves.values_mut())
            .find(|d| d.curve().name() == name)
            .ok_or_else(|| Error::MissingMarketData(format!("no curve named {name}")))?;
        let curve = target.curve().with_parameters(parameters)?;
        *target = ZeroRateDiscountFactors::new(target.currency(), self.valuation_date, curve);
        Ok(out)
    }

    /// Forward rate of the observation implied by the index curve.
    fn forward_rate(&self, observation: &IborIndexObservation) -> Result<Rate> {
        let curve = self.index_curve(observation.index())?;
        let p_start = curve.discount_factor(observation.effective_date());
        let p_end = curve.discount_factor(observation.maturity_date());
        Ok((p_start / p_end - 1.0) / observation.year_fraction())
    }

    fn known_fixing(&self, observation: &IborIndexObservation) -> Result<Option<Rate>> {
        let fixing_date = observation.fixing_date();
        if fixing_date > self.valuation_date {
            return Ok(None);
        }
        match self.ibor_fixing(observation.index(), fixing_date) {
            Some(rate) => Ok(Some(rate)),
            None if fixing_date == self.valuation_date => {
                tracing::trace!(
                    index = %observation.index(),
                    %fixing_date,
                    "fixing not yet published, using forward rate"
                );
                Ok(None)
            }
            None => Err(Error::MissingMarketData(format!(
                "{}: no fixing published for {fixing_date}",
                observation.index()
            ))),
        }
    }

    fn ibor_parameter_sensitivity(
        &self,
        point: &IborRateSensitivity,
    ) -> Result<CurrencyParameterSensitivities> {
        let obs = &point.observation;
        let curve = self.index_curve(obs.index())?;
        let t_start = curve.relative_year_fraction(obs.effective_date());
        let t_end = curve.relative_year_fraction(obs.maturity_date());
        let p_start = curve.discount_factor_at(t_start);
        let p_end = curve.discount_factor_at(t_end);
        let delta = obs.year_fraction();
        // F = (P_s / P_e − 1) / δ, with ∂P/∂z = −t·P at each end.
        let d_start = -t_start * p_start / (delta * p_end);
        let d_end = t_end * p_start / (delta * p_end);
        let s = point.sensitivity;
        Ok(CurrencyParameterSensitivities::of(
            curve.parameter_sensitivity_at(t_start, s * d_start, point.currency),
        )
        .combined_with_one(curve.parameter_sensitivity_at(t_end, s * d_end, point.currency)))
    }
}

impl RatesProvider for ImmutableRatesProvider {
    fn valuation_date(&self) -> NaiveDate {
        self.valuation_date
    }

    fn discount_factor(&self, currency: Currency, date: NaiveDate) -> Result<DiscountFactor> {
        Ok(self.discount_factors(currency)?.discount_factor(date))
    }

    fn discount_factor_zero_rate_sensitivity(
        &self,
        currency: Currency,
        date: NaiveDate,
    ) -> Result<PointSensitivityBuilder> {
        let dfs = self.discount_factors(currency)?;
        Ok(PointSensitivityBuilder::of(
            dfs.zero_rate_point_sensitivity(date, currency),
        ))
    }

    fn ibor_fixing(&self, index: IborIndex, date: NaiveDate) -> Option<Rate> {
        self.fixings.get(&index).and_then(|s| s.get(date))
    }

    fn ibor_rate(&self, observation: &IborIndexObservation) -> Result<Rate> {
        match self.known_fixing(observation)? {
            Some(rate) => Ok(rate),
            None => self.forward_rate(observation),
        }
    }

    fn ibor_rate_sensitivity(
        &self,
        observation: &IborIndexObservation,
    ) -> Result<PointSensitivityBuilder> {
        Ok(match self.known_fixing(observation)? {
            Some(_) => PointSensitivityBuilder::none(),
            None => PointSensitivityBuilder::of(IborRateSensitivity {
                observation: *observation,
                currency: observation.currency(),
                sensitivity: 1.0,
            }),
        })
    }

    fn parameter_sensitivity(
        &self,
        sensitivities: &PointSensitivities,
    ) -> Result<CurrencyParameterSensitivities> {
        let mut out = CurrencyParameterSensitivities::empty();
        for point in sensitivities {
            match point {
                PointSensitivity::ZeroRate(z) => {
                    let dfs = self.discount_factors(z.curve_currency)?;
                    out = out.combined_with_one(dfs.parameter_sensitivity(z));
                }
                PointSensitivity::IborRate(i) => {
                    out = out.combined_with(self.ibor_parameter_sensitivity(i)?);
                }
                PointSensitivity::CapletVolatility(_) | PointSensitivity::SabrParameter(_) => {}
            }
        }
        Ok(out)
    }

    fn currency_exposure(&self, _sensitivities: &PointSensitivities) -> MultiCurrencyAmount {
        // Single-currency curves carry no FX dependency.
        MultiCurrencyAmount::empty()
    }
}
