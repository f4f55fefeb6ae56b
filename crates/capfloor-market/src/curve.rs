//! Named, linearly interpolated curves.
//!
//! A curve maps a time in years to a value: a zero rate for discounting and
//! forward curves, or one SABR parameter as a function of expiry.

use capfloor_core::{Real, Result, Time};
use capfloor_math::LinearInterpolation;
use nalgebra::DVector;

/// A named curve interpolated linearly between nodes, flat outside them.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedCurve {
    name: String,
    interpolation: LinearInterpolation,
}

impl InterpolatedCurve {
    /// Build a curve from node times and values.
    pub fn new(name: impl Into<String>, x_values: &[Time], y_values: &[Real]) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            interpolation: LinearInterpolation::new(x_values, y_values)?,
        })
    }

    /// A single-node curve, constant everywhere.
    pub fn constant(name: impl Into<String>, value: Real) -> Result<Self> {
        Self::new(name, &[0.0], &[value])
    }

    /// Curve name; parameter sensitivities are keyed by it.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Node times.
    pub fn x_values(&self) -> &[Time] {
        self.interpolation.x_values()
    }

    /// Node values (the curve parameters).
    pub fn parameters(&self) -> &DVector<Real> {
        self.interpolation.y_values()
    }

    /// Number of parameters.
    pub fn parameter_count(&self) -> usize {
        self.interpolation.x_values().len()
    }

    /// A copy of this curve with different node values.
    pub fn with_parameters(&self, parameters: DVector<Real>) -> Result<Self> {
        Ok(Self {
            name: self.name.clone(),
            interpolation: self.interpolation.with_y_values(parameters)?,
        })
    }

    /// Value at `x`.
    pub fn y_value(&self, x: Time) -> Real {
        self.interpolation.value(x)
    }

    /// `∂y(x)/∂parameter_i` for every node.
    pub fn y_value_parameter_sensitivity(&self, x: Time) -> DVector<Real> {
        self.interpolation.node_sensitivity(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_parameters_keeps_name_and_nodes() {
        let c = InterpolatedCurve::new("EUR-DSC", &[1.0, 2.0], &[0.01, 0.02]).unwrap();
        let bumped = c
            .with_parameters(DVector::from_vec(vec![0.02, 0.03]))
            .unwrap();
        assert_eq!(bumped.name(), "EUR-DSC");
        assert_eq!(bumped.x_values(), c.x_values());
        assert!((bumped.y_value(1.5) - 0.025).abs() < 1e-15);
        assert!(c.with_parameters(DVector::zeros(3)).is_err());
    }

    #[test]
    fn constant_curve() {
        let c = InterpolatedCurve::constant("beta", 0.5).unwrap();
        assert_eq!(c.y_value(7.0), 0.5);
        assert_eq!(c.parameter_count(), 1);
    }
}
