//! Parameter sensitivities: risk per node of a named curve or surface.

use capfloor_core::{Currency, CurrencyAmount, MultiCurrencyAmount, Real};
use nalgebra::DVector;

/// Sensitivity of a value to every parameter of one curve or surface.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyParameterSensitivity {
    /// Curve or surface name.
    pub market_data_name: String,
    /// Currency of the values.
    pub currency: Currency,
    /// One value per parameter.
    pub sensitivity: DVector<Real>,
}

impl CurrencyParameterSensitivity {
    /// Create a sensitivity.
    pub fn new(
        market_data_name: impl Into<String>,
        currency: Currency,
        sensitivity: DVector<Real>,
    ) -> Self {
        Self {
            market_data_name: market_data_name.into(),
            currency,
            sensitivity,
        }
    }

    /// Number of parameters.
    pub fn parameter_count(&self) -> usize {
        self.sensitivity.len()
    }

    /// Sum over all parameters.
    pub fn total(&self) -> CurrencyAmount {
        CurrencyAmount::new(self.currency, self.sensitivity.sum())
    }

    fn same_key(&self, other: &CurrencyParameterSensitivity) -> bool {
        self.market_data_name == other.market_data_name && self.currency == other.currency
    }
}

/// A set of parameter sensitivities, at most one per (name, currency).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrencyParameterSensitivities {
    sensitivities: Vec<CurrencyParameterSensitivity>,
}

impl CurrencyParameterSensitivities {
    /// An empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A set holding one sensitivity.
    pub fn of(sensitivity: CurrencyParameterSensitivity) -> Self {
        Self::empty().combined_with_one(sensitivity)
    }

    /// The sensitivities, sorted by name then currency.
    pub fn sensitivities(&self) -> &[CurrencyParameterSensitivity] {
        &self.sensitivities
    }

    /// Number of (name, currency) entries.
    pub fn len(&self) -> usize {
        self.sensitivities.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.sensitivities.is_empty()
    }

    /// The entry for `name` in `currency`, if any.
    pub fn get(&self, name: &str, currency: Currency) -> Option<&CurrencyParameterSensitivity> {
        self.sensitivities
            .iter()
            .find(|s| s.market_data_name == name && s.currency == currency)
    }

    /// Add one sensitivity, summing element-wise into an existing entry with
    /// the same key.
    ///
    /// Entries with the same key must have the same parameter count; a
    /// mismatch keeps the longer vector and adds the shorter one into its
    /// leading elements.
    pub fn combined_with_one(mut self, sensitivity: CurrencyParameterSensitivity) -> Self {
        match self
            .sensitivities
            .iter_mut()
            .find(|s| s.same_key(&sensitivity))
        {
            Some(existing) => {
                if existing.sensitivity.len() < sensitivity.sensitivity.len() {
                    let old = std::mem::replace(&mut existing.sensitivity, sensitivity.sensitivity);
                    add_into(&mut existing.sensitivity, &old);
                } else {
                    add_into(&mut existing.sensitivity, &sensitivity.sensitivity);
                }
            }
            None => {
                self.sensitivities.push(sensitivity);
                self.sensitivities.sort_by(|a, b| {
                    a.market_data_name
                        .cmp(&b.market_data_name)
                        .then(a.currency.cmp(&b.currency))
                });
            }
        }
        self
    }

    /// Merge two sets.
    pub fn combined_with(self, other: CurrencyParameterSensitivities) -> Self {
        other
            .sensitivities
            .into_iter()
            .fold(self, |acc, s| acc.combined_with_one(s))
    }

    /// Every value scaled by `factor`.
    pub fn multiplied_by(&self, factor: Real) -> Self {
        Self {
            sensitivities: self
                .sensitivities
                .iter()
                .map(|s| CurrencyParameterSensitivity {
                    sensitivity: &s.sensitivity * factor,
                    ..s.clone()
                })
                .collect(),
        }
    }

    /// Sum of every parameter value, per currency.
    pub fn total(&self) -> MultiCurrencyAmount {
        self.sensitivities.iter().map(|s| s.total()).collect()
    }

    /// Whether every entry matches within `tolerance` element-wise; an entry
    /// missing on one side counts as zeros.
    pub fn equal_within_tolerance(&self, other: &CurrencyParameterSensitivities, tolerance: Real) -> bool {
        let within = |a: &CurrencyParameterSensitivity, b: Option<&CurrencyParameterSensitivity>| {
            match b {
                Some(b) => {
                    a.sensitivity.len() == b.sensitivity.len()
                        && a
                            .sensitivity
                            .iter()
                            .zip(b.sensitivity.iter())
                            .all(|(x, y)| (x - y).abs() <= tolerance)
                }
                None => a.sensitivity.iter().all(|x| x.abs() <= tolerance),
            }
        };
        self.sensitivities
            .iter()
            .all(|a| within(a, other.get(&a.market_data_name, a.currency)))
            && other
                .sensitivities
                .iter()
                .all(|b| within(b, self.get(&b.market_data_name, b.currency)))
    }
}

fn add_into(target: &mut DVector<Real>, other: &DVector<Real>) {
    for (t, o) in target.iter_mut().zip(other.iter()) {
        *t += o;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sens(name: &str, ccy: Currency, v: &[Real]) -> CurrencyParameterSensitivity {
        CurrencyParameterSensitivity::new(name, ccy, DVector::from_column_slice(v))
    }

    #[test]
    fn combine_merges_same_key() {
        let a = CurrencyParameterSensitivities::of(sens("EUR-DSC", Currency::EUR, &[1.0, 2.0]));
        let b = CurrencyParameterSensitivities::of(sens("EUR-DSC", Currency::EUR, &[0.5, 0.5]))
            .combined_with_one(sens("EUR-3M", Currency::EUR, &[3.0]));
        let c = a.combined_with(b);
        assert_eq!(c.len(), 2);
        assert_eq!(c.sensitivities()[0].market_data_name, "EUR-3M");
        let dsc = c.get("EUR-DSC", Currency::EUR).unwrap();
        assert_eq!(dsc.sensitivity.as_slice(), &[1.5, 2.5]);
    }

    #[test]
    fn total_by_currency() {
        let s = CurrencyParameterSensitivities::of(sens("A", Currency::EUR, &[1.0, 2.0]))
            .combined_with_one(sens("B", Currency::USD, &[4.0]))
            .combined_with_one(sens("C", Currency::EUR, &[-0.5]));
        let t = s.total();
        assert_eq!(t.amount(Currency::EUR).amount(), 2.5);
        assert_eq!(t.amount(Currency::USD).amount(), 4.0);
    }

    #[test]
    fn tolerance_comparison() {
        let a = CurrencyParameterSensitivities::of(sens("A", Currency::EUR, &[1.0, 2.0]));
        let b = CurrencyParameterSensitivities::of(sens("A", Currency::EUR, &[1.0, 2.0 + 1e-9]))
            .combined_with_one(sens("Z", Currency::EUR, &[1e-10]));
        assert!(a.equal_within_tolerance(&b, 1e-8));
        assert!(!a.equal_within_tolerance(&b, 1e-10));
        assert!(!a.equal_within_tolerance(&a.multiplied_by(2.0), 1e-3));
    }
}
