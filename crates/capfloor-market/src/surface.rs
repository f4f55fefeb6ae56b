//! Named volatility surfaces over expiry × strike.

use capfloor_core::{Real, Result, Time};
use capfloor_math::BilinearInterpolation;
use nalgebra::{DMatrix, DVector};

/// A named surface, bilinear in `(expiry, strike)` and flat outside the grid.
///
/// Parameters are the grid values flattened column-major: all expiries of
/// the first strike, then all expiries of the second, and so on.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedSurface {
    name: String,
    interpolation: BilinearInterpolation,
}

impl InterpolatedSurface {
    /// Build a surface; `values` has one row per expiry and one column per strike.
    pub fn new(
        name: impl Into<String>,
        expiries: &[Time],
        strikes: &[Real],
        values: DMatrix<Real>,
    ) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            interpolation: BilinearInterpolation::new(expiries, strikes, values)?,
        })
    }

    /// Build from a row-major slice of values (row = expiry).
    pub fn from_row_slice(
        name: impl Into<String>,
        expiries: &[Time],
        strikes: &[Real],
        values: &[Real],
    ) -> Result<Self> {
        capfloor_core::ensure!(
            values.len() == expiries.len() * strikes.len(),
            "surface: {} values for a {}x{} grid",
            values.len(),
            expiries.len(),
            strikes.len()
        );
        let m = DMatrix::from_row_slice(expiries.len(), strikes.len(), values);
        Self::new(name, expiries, strikes, m)
    }

    /// A surface with the same value everywhere.
    pub fn constant(name: impl Into<String>, value: Real) -> Result<Self> {
        Self::new(name, &[0.0], &[0.0], DMatrix::from_element(1, 1, value))
    }

    /// Surface name; parameter sensitivities are keyed by it.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Expiry nodes.
    pub fn expiries(&self) -> &[Time] {
        self.interpolation.x_values()
    }

    /// Strike nodes.
    pub fn strikes(&self) -> &[Real] {
        self.interpolation.y_values()
    }

    /// Grid values.
    pub fn values(&self) -> &DMatrix<Real> {
        self.interpolation.z_values()
    }

    /// Number of parameters.
    pub fn parameter_count(&self) -> usize {
        self.values().len()
    }

    /// The flattened parameters.
    pub fn parameters(&self) -> DVector<Real> {
        DVector::from_column_slice(self.values().as_slice())
    }

    /// A copy with different flattened parameters.
    pub fn with_parameters(&self, parameters: DVector<Real>) -> Result<Self> {
        let (rows, cols) = self.values().shape();
        capfloor_core::ensure!(
            parameters.len() == rows * cols,
            "surface {}: {} parameters for a {rows}x{cols} grid",
            self.name,
            parameters.len()
        );
        Ok(Self {
            name: self.name.clone(),
            interpolation: self
                .interpolation
                .with_z_values(DMatrix::from_column_slice(rows, cols, parameters.as_slice()))?,
        })
    }

    /// Value at `(expiry, strike)`.
    pub fn z_value(&self, expiry: Time, strike: Real) -> Real {
        self.interpolation.value(expiry, strike)
    }

    /// `∂z/∂parameter_i` for every flattened parameter.
    pub fn z_value_parameter_sensitivity(&self, expiry: Time, strike: Real) -> DVector<Real> {
        let w = self.interpolation.node_sensitivity(expiry, strike);
        DVector::from_column_slice(w.as_slice())
    }
}
