//! Bilinear interpolation on a rectangular grid, flat outside it.
//!
//! `z[(i, j)] = f(xs[i], ys[j])`; a dimension with a single node is constant
//! in that direction.

use super::{bracket, check_nodes};
use capfloor_core::{ensure, Real, Result};
use nalgebra::DMatrix;

/// Bilinear interpolation over `xs × ys`.
#[derive(Debug, Clone, PartialEq)]
pub struct BilinearInterpolation {
    xs: Vec<Real>,
    ys: Vec<Real>,
    z: DMatrix<Real>,
}

impl BilinearInterpolation {
    /// Build on the grid `xs × ys`, with `z` of shape `xs.len() × ys.len()`.
    pub fn new(xs: &[Real], ys: &[Real], z: DMatrix<Real>) -> Result<Self> {
        check_nodes(xs, "bilinear interpolation (x)")?;
        check_nodes(ys, "bilinear interpolation (y)")?;
        ensure!(
            z.nrows() == xs.len() && z.ncols() == ys.len(),
            "bilinear interpolation: z is {}x{} but grid is {}x{}",
            z.nrows(),
            z.ncols(),
            xs.len(),
            ys.len()
        );
        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            z,
        })
    }

    /// The x nodes.
    pub fn x_values(&self) -> &[Real] {
        &self.xs
    }

    /// The y nodes.
    pub fn y_values(&self) -> &[Real] {
        &self.ys
    }

    /// The grid values.
    pub fn z_values(&self) -> &DMatrix<Real> {
        &self.z
    }

    /// A copy with different grid values (same shape).
    pub fn with_z_values(&self, z: DMatrix<Real>) -> Result<Self> {
        Self::new(&self.xs, &self.ys, z)
    }

    /// Interpolated value at `(x, y)`.
    pub fn value(&self, x: Real, y: Real) -> Real {
        let bx = bracket(&self.xs, x);
        let by = bracket(&self.ys, y);
        bx.w_lo * (by.w_lo * self.z[(bx.lo, by.lo)] + by.w_hi * self.z[(bx.lo, by.hi)])
            + bx.w_hi * (by.w_lo * self.z[(bx.hi, by.lo)] + by.w_hi * self.z[(bx.hi, by.hi)])
    }

    /// `∂value(x, y)/∂z[(i, j)]` for every grid node.
    pub fn node_sensitivity(&self, x: Real, y: Real) -> DMatrix<Real> {
        let bx = bracket(&self.xs, x);
        let by = bracket(&self.ys, y);
        let mut w = DMatrix::zeros(self.xs.len(), self.ys.len());
        for (i, wi) in [(bx.lo, bx.w_lo), (bx.hi, bx.w_hi)] {
            for (j, wj) in [(by.lo, by.w_lo), (by.hi, by.w_hi)] {
                w[(i, j)] += wi * wj;
            }
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> BilinearInterpolation {
        // z = x + 2y on a 3×2 grid
        let xs = [0.0, 1.0, 2.0];
        let ys = [0.0, 1.0];
        let z = DMatrix::from_fn(3, 2, |i, j| xs[i] + 2.0 * ys[j]);
        BilinearInterpolation::new(&xs, &ys, z).unwrap()
    }

    #[test]
    fn exact_on_grid() {
        let b = grid();
        assert!((b.value(1.0, 1.0) - 3.0).abs() < 1e-15);
        assert!((b.value(2.0, 0.0) - 2.0).abs() < 1e-15);
    }

    #[test]
    fn reproduces_plane() {
        let b = grid();
        let v = b.value(0.5, 0.25);
        assert!((v - 1.0).abs() < 1e-15, "expected 1.0, got {v}");
    }

    #[test]
    fn flat_outside() {
        let b = grid();
        assert!((b.value(-1.0, 5.0) - 2.0).abs() < 1e-15);
        assert!((b.value(9.0, -3.0) - 2.0).abs() < 1e-15);
    }

    #[test]
    fn weights_sum_to_one_and_reproduce_value() {
        let b = grid();
        for &(x, y) in &[(0.3, 0.7), (1.5, 0.0), (-1.0, 2.0), (2.0, 1.0)] {
            let w = b.node_sensitivity(x, y);
            assert!((w.sum() - 1.0).abs() < 1e-15);
            assert!((w.component_mul(b.z_values()).sum() - b.value(x, y)).abs() < 1e-14);
        }
    }

    #[test]
    fn single_row_grid() {
        let z = DMatrix::from_row_slice(1, 3, &[0.2, 0.25, 0.3]);
        let b = BilinearInterpolation::new(&[1.0], &[0.01, 0.02, 0.03], z).unwrap();
        assert!((b.value(7.0, 0.015) - 0.225).abs() < 1e-15);
    }

    #[test]
    fn shape_mismatch_rejected() {
        let z = DMatrix::zeros(2, 2);
        assert!(BilinearInterpolation::new(&[1.0, 2.0, 3.0], &[0.1, 0.2], z).is_err());
    }
}
