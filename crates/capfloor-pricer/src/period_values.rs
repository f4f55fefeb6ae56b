//! Per-period results of a leg.

use capfloor_products::IborCapletFloorletPeriod;

/// Values keyed by caplet/floorlet period, in leg order.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodValues<V> {
    entries: Vec<(IborCapletFloorletPeriod, V)>,
}

impl<V> Default for PeriodValues<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> PeriodValues<V> {
    /// Wrap `(period, value)` pairs.
    pub fn of(entries: Vec<(IborCapletFloorletPeriod, V)>) -> Self {
        Self { entries }
    }

    /// The value of `period`, if present.
    pub fn get(&self, period: &IborCapletFloorletPeriod) -> Option<&V> {
        self.entries
            .iter()
            .find(|(p, _)| p == period)
            .map(|(_, v)| v)
    }

    /// Number of periods.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no period has a value.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(period, value)` pairs in leg order.
    pub fn iter(&self) -> impl Iterator<Item = (&IborCapletFloorletPeriod, &V)> + '_ {
        self.entries.iter().map(|(p, v)| (p, v))
    }

    /// The values in leg order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<V> FromIterator<(IborCapletFloorletPeriod, V)> for PeriodValues<V> {
    fn from_iter<I: IntoIterator<Item = (IborCapletFloorletPeriod, V)>>(iter: I) -> Self {
        Self::of(iter.into_iter().collect())
    }
}
