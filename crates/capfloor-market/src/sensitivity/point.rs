//! Point sensitivities: unresolved first-order risk on a single market point.
//!
//! Pricers emit these without knowing how curves and surfaces are
//! parameterized; the rates provider and the volatilities resolve them into
//! per-node parameter sensitivities.

use crate::index::IborIndexObservation;
use capfloor_core::{Currency, Real, Time};
use std::cmp::Ordering;
use std::fmt;

/// Sensitivity to the zero rate of a discount curve at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct ZeroRateSensitivity {
    /// Currency of the discount curve.
    pub curve_currency: Currency,
    /// Time of the zero rate, relative to the valuation date.
    pub year_fraction: Time,
    /// Currency of the sensitivity value.
    pub currency: Currency,
    /// The sensitivity value.
    pub sensitivity: Real,
}

/// Sensitivity to the forward rate of an Ibor observation.
#[derive(Debug, Clone, PartialEq)]
pub struct IborRateSensitivity {
    /// The observed index fixing.
    pub observation: IborIndexObservation,
    /// Currency of the sensitivity value.
    pub currency: Currency,
    /// The sensitivity value.
    pub sensitivity: Real,
}

/// Sensitivity to a Black, shifted-Black or Normal caplet volatility.
#[derive(Debug, Clone, PartialEq)]
pub struct CapletVolatilitySensitivity {
    /// Name of the volatilities.
    pub volatilities_name: String,
    /// Option expiry in years.
    pub expiry: Time,
    /// Option strike.
    pub strike: Real,
    /// Forward rate at which the volatility was read.
    pub forward: Real,
    /// Currency of the sensitivity value.
    pub currency: Currency,
    /// The sensitivity value.
    pub sensitivity: Real,
}

/// The four SABR parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SabrParameterType {
    /// α
    Alpha,
    /// β
    Beta,
    /// ρ
    Rho,
    /// ν
    Nu,
}

impl SabrParameterType {
    /// All parameters, in the order sensitivities are emitted.
    pub const ALL: [SabrParameterType; 4] = [
        SabrParameterType::Alpha,
        SabrParameterType::Beta,
        SabrParameterType::Rho,
        SabrParameterType::Nu,
    ];
}

impl fmt::Display for SabrParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SabrParameterType::Alpha => "Alpha",
            SabrParameterType::Beta => "Beta",
            SabrParameterType::Rho => "Rho",
            SabrParameterType::Nu => "Nu",
        };
        f.write_str(s)
    }
}

/// Sensitivity to one SABR parameter at an expiry.
#[derive(Debug, Clone, PartialEq)]
pub struct SabrParameterSensitivity {
    /// Name of the SABR volatilities.
    pub volatilities_name: String,
    /// Option expiry in years.
    pub expiry: Time,
    /// Which parameter.
    pub parameter: SabrParameterType,
    /// Currency of the sensitivity value.
    pub currency: Currency,
    /// The sensitivity value.
    pub sensitivity: Real,
}

/// A single point sensitivity.
#[derive(Debug, Clone, PartialEq)]
pub enum PointSensitivity {
    /// Discount-curve zero rate.
    ZeroRate(ZeroRateSensitivity),
    /// Ibor forward rate.
    IborRate(IborRateSensitivity),
    /// Caplet volatility.
    CapletVolatility(CapletVolatilitySensitivity),
    /// SABR model parameter.
    SabrParameter(SabrParameterSensitivity),
}

impl PointSensitivity {
    /// The sensitivity value.
    pub fn sensitivity(&self) -> Real {
        match self {
            PointSensitivity::ZeroRate(s) => s.sensitivity,
            PointSensitivity::IborRate(s) => s.sensitivity,
            PointSensitivity::CapletVolatility(s) => s.sensitivity,
            PointSensitivity::SabrParameter(s) => s.sensitivity,
        }
    }

    /// Currency of the sensitivity value.
    pub fn currency(&self) -> Currency {
        match self {
            PointSensitivity::ZeroRate(s) => s.currency,
            PointSensitivity::IborRate(s) => s.currency,
            PointSensitivity::CapletVolatility(s) => s.currency,
            PointSensitivity::SabrParameter(s) => s.currency,
        }
    }

    /// The same point with a different value.
    pub fn with_sensitivity(&self, value: Real) -> Self {
        let mut out = self.clone();
        match &mut out {
            PointSensitivity::ZeroRate(s) => s.sensitivity = value,
            PointSensitivity::IborRate(s) => s.sensitivity = value,
            PointSensitivity::CapletVolatility(s) => s.sensitivity = value,
            PointSensitivity::SabrParameter(s) => s.sensitivity = value,
        }
        out
    }

    /// Whether this point depends on volatilities rather than rates.
    pub fn is_volatility(&self) -> bool {
        matches!(
            self,
            PointSensitivity::CapletVolatility(_) | PointSensitivity::SabrParameter(_)
        )
    }

    /// Total order on the market point, ignoring the value.
    pub fn compare_key(&self, other: &Self) -> Ordering {
        use PointSensitivity::*;
        match (self, other) {
            (ZeroRate(a), ZeroRate(b)) => a
                .curve_currency
                .cmp(&b.curve_currency)
                .then(a.currency.cmp(&b.currency))
                .then(a.year_fraction.total_cmp(&b.year_fraction)),
            (IborRate(a), IborRate(b)) => {
                let (oa, ob) = (&a.observation, &b.observation);
                oa.index()
                    .cmp(&ob.index())
                    .then(a.currency.cmp(&b.currency))
                    .then(oa.fixing_date().cmp(&ob.fixing_date()))
                    .then(oa.effective_date().cmp(&ob.effective_date()))
                    .then(oa.maturity_date().cmp(&ob.maturity_date()))
            }
            (CapletVolatility(a), CapletVolatility(b)) => a
                .volatilities_name
                .cmp(&b.volatilities_name)
                .then(a.currency.cmp(&b.currency))
                .then(a.expiry.total_cmp(&b.expiry))
                .then(a.strike.total_cmp(&b.strike))
                .then(a.forward.total_cmp(&b.forward)),
            (SabrParameter(a), SabrParameter(b)) => a
                .volatilities_name
                .cmp(&b.volatilities_name)
                .then(a.currency.cmp(&b.currency))
                .then(a.expiry.total_cmp(&b.expiry))
                .then(a.parameter.cmp(&b.parameter)),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            PointSensitivity::ZeroRate(_) => 0,
            PointSensitivity::IborRate(_) => 1,
            PointSensitivity::CapletVolatility(_) => 2,
            PointSensitivity::SabrParameter(_) => 3,
        }
    }
}

impl From<ZeroRateSensitivity> for PointSensitivity {
    fn from(s: ZeroRateSensitivity) -> Self {
        PointSensitivity::ZeroRate(s)
    }
}

impl From<IborRateSensitivity> for PointSensitivity {
    fn from(s: IborRateSensitivity) -> Self {
        PointSensitivity::IborRate(s)
    }
}

impl From<CapletVolatilitySensitivity> for PointSensitivity {
    fn from(s: CapletVolatilitySensitivity) -> Self {
        PointSensitivity::CapletVolatility(s)
    }
}

impl From<SabrParameterSensitivity> for PointSensitivity {
    fn from(s: SabrParameterSensitivity) -> Self {
        PointSensitivity::SabrParameter(s)
    }
}

/// An immutable, composable collection of point sensitivities under
/// construction.
///
/// Combining never merges or drops points; that happens once, in
/// [`PointSensitivities::normalized`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSensitivityBuilder {
    points: Vec<PointSensitivity>,
}

impl PointSensitivityBuilder {
    /// No sensitivity.
    pub fn none() -> Self {
        Self::default()
    }

    /// A single point.
    pub fn of(point: impl Into<PointSensitivity>) -> Self {
        Self {
            points: vec![point.into()],
        }
    }

    /// Whether there is no point.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Both sets of points.
    pub fn combined_with(mut self, other: PointSensitivityBuilder) -> Self {
        self.points.extend(other.points);
        self
    }

    /// Every value scaled by `factor`.
    pub fn multiplied_by(self, factor: Real) -> Self {
        self.map_sensitivity(|v| v * factor)
    }

    /// Every value transformed by `f`.
    pub fn map_sensitivity(self, f: impl Fn(Real) -> Real) -> Self {
        Self {
            points: self
                .points
                .into_iter()
                .map(|p| p.with_sensitivity(f(p.sensitivity())))
                .collect(),
        }
    }

    /// Freeze into [`PointSensitivities`].
    pub fn build(self) -> PointSensitivities {
        PointSensitivities {
            points: self.points,
        }
    }
}

impl FromIterator<PointSensitivityBuilder> for PointSensitivityBuilder {
    fn from_iter<I: IntoIterator<Item = PointSensitivityBuilder>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::none(), |acc, b| acc.combined_with(b))
    }
}

/// A finished list of point sensitivities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSensitivities {
    points: Vec<PointSensitivity>,
}

impl PointSensitivities {
    /// An empty list.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A list from points.
    pub fn of(points: Vec<PointSensitivity>) -> Self {
        Self { points }
    }

    /// The points.
    pub fn points(&self) -> &[PointSensitivity] {
        &self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether there is no point.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over the points.
    pub fn iter(&self) -> std::slice::Iter<'_, PointSensitivity> {
        self.points.iter()
    }

    /// Both lists concatenated.
    pub fn combined_with(&self, other: &PointSensitivities) -> Self {
        let mut points = self.points.clone();
        points.extend(other.points.iter().cloned());
        Self { points }
    }

    /// Every value scaled by `factor`.
    pub fn multiplied_by(&self, factor: Real) -> Self {
        Self {
            points: self
                .points
                .iter()
                .map(|p| p.with_sensitivity(p.sensitivity() * factor))
                .collect(),
        }
    }

    /// Sorted by market point, with values on the same point summed.
    pub fn normalized(&self) -> Self {
        let mut sorted = self.points.clone();
        sorted.sort_by(|a, b| a.compare_key(b));
        let mut merged: Vec<PointSensitivity> = Vec::with_capacity(sorted.len());
        for p in sorted {
            match merged.last_mut() {
                Some(last) if last.compare_key(&p) == Ordering::Equal => {
                    *last = last.with_sensitivity(last.sensitivity() + p.sensitivity());
                }
                _ => merged.push(p),
            }
        }
        Self { points: merged }
    }

    /// Whether both lists, once normalized, hold the same points with values
    /// within `tolerance`. A point missing on one side counts as zero.
    pub fn equal_within_tolerance(&self, other: &PointSensitivities, tolerance: Real) -> bool {
        let a = self.normalized().points;
        let b = other.normalized().points;
        let (mut i, mut j) = (0, 0);
        while i < a.len() || j < b.len() {
            let order = match (a.get(i), b.get(j)) {
                (Some(x), Some(y)) => x.compare_key(y),
                (Some(_), None) => Ordering::Less,
                (None, _) => Ordering::Greater,
            };
            let ok = match order {
                Ordering::Equal => {
                    let d = (a[i].sensitivity() - b[j].sensitivity()).abs();
                    i += 1;
                    j += 1;
                    d <= tolerance
                }
                Ordering::Less => {
                    i += 1;
                    a[i - 1].sensitivity().abs() <= tolerance
                }
                Ordering::Greater => {
                    j += 1;
                    b[j - 1].sensitivity().abs() <= tolerance
                }
            };
            if !ok {
                return false;
            }
        }
        true
    }
}

impl<'a> IntoIterator for &'a PointSensitivities {
    type Item = &'a PointSensitivity;
    type IntoIter = std::slice::Iter<'a, PointSensitivity>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero(t: Time, s: Real) -> PointSensitivity {
        ZeroRateSensitivity {
            curve_currency: Currency::EUR,
            year_fraction: t,
            currency: Currency::EUR,
            sensitivity: s,
        }
        .into()
    }

    #[test]
    fn builder_combines_and_scales() {
        let b = PointSensitivityBuilder::of(zero(1.0, 2.0))
            .combined_with(PointSensitivityBuilder::none())
            .combined_with(PointSensitivityBuilder::of(zero(2.0, 3.0)))
            .multiplied_by(-2.0);
        let built = b.build();
        assert_eq!(built.len(), 2);
        assert_eq!(built.points()[0].sensitivity(), -4.0);
        assert_eq!(built.points()[1].sensitivity(), -6.0);
    }

    #[test]
    fn normalized_merges_equal_points() {
        let s = PointSensitivities::of(vec![zero(2.0, 1.0), zero(1.0, 2.0), zero(2.0, 0.5)]);
        let n = s.normalized();
        assert_eq!(n.len(), 2);
        assert_eq!(n.points()[0], zero(1.0, 2.0));
        assert_eq!(n.points()[1], zero(2.0, 1.5));
    }

    #[test]
    fn tolerance_comparison_treats_missing_as_zero() {
        let a = PointSensitivities::of(vec![zero(1.0, 2.0), zero(3.0, 1e-12)]);
        let b = PointSensitivities::of(vec![zero(1.0, 2.0 + 1e-11)]);
        assert!(a.equal_within_tolerance(&b, 1e-10));
        assert!(!a.equal_within_tolerance(&b, 1e-12));
    }

    #[test]
    fn kinds_are_ordered() {
        let z = zero(5.0, 1.0);
        let s: PointSensitivity = SabrParameterSensitivity {
            volatilities_name: "SABR".into(),
            expiry: 1.0,
            parameter: SabrParameterType::Nu,
            currency: Currency::EUR,
            sensitivity: 1.0,
        }
        .into();
        assert_eq!(z.compare_key(&s), Ordering::Less);
        assert!(s.is_volatility());
        assert!(!z.is_volatility());
    }
}
