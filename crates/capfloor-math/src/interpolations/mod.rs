//! Interpolation on sorted nodes, with flat extrapolation.
//!
//! Besides the interpolated value, every scheme here reports the weight each
//! node carries at a query point. Those weights are what turn a point
//! sensitivity on a curve or surface into a per-node parameter sensitivity.

mod bilinear;

pub use bilinear::BilinearInterpolation;

use capfloor_core::{ensure, Real, Result};
use nalgebra::DVector;

/// The two nodes bracketing `x` and their linear weights.
///
/// Outside `[xs[0], xs[n-1]]` the whole weight goes to the nearest end node;
/// a single node always carries weight 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Bracket {
    pub lo: usize,
    pub hi: usize,
    pub w_lo: Real,
    pub w_hi: Real,
}

pub(crate) fn bracket(xs: &[Real], x: Real) -> Bracket {
    let n = xs.len();
    if n == 1 || x <= xs[0] {
        return Bracket { lo: 0, hi: 0, w_lo: 1.0, w_hi: 0.0 };
    }
    if x >= xs[n - 1] {
        return Bracket { lo: n - 1, hi: n - 1, w_lo: 1.0, w_hi: 0.0 };
    }
    let lo = locate(xs, x);
    let t = (x - xs[lo]) / (xs[lo + 1] - xs[lo]);
    Bracket { lo, hi: lo + 1, w_lo: 1.0 - t, w_hi: t }
}

/// Binary search: find `k` such that `xs[k] <= x < xs[k+1]`, clamped.
fn locate(xs: &[Real], x: Real) -> usize {
    let n = xs.len();
    let mut lo = 0;
    let mut hi = n - 1;
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if xs[mid] <= x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo
}

pub(crate) fn check_nodes(xs: &[Real], what: &str) -> Result<()> {
    ensure!(!xs.is_empty(), "{what}: at least one node is required");
    ensure!(
        xs.windows(2).all(|w| w[0] < w[1]),
        "{what}: nodes must be strictly increasing"
    );
    Ok(())
}

/// Piecewise-linear interpolation with flat extrapolation.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearInterpolation {
    xs: Vec<Real>,
    ys: DVector<Real>,
}

impl LinearInterpolation {
    /// Build from nodes and values.
    ///
    /// # Errors
    /// `Error::Configuration` if the nodes are empty, unsorted, or the
    /// lengths differ.
    pub fn new(xs: &[Real], ys: &[Real]) -> Result<Self> {
        check_nodes(xs, "linear interpolation")?;
        ensure!(
            xs.len() == ys.len(),
            "linear interpolation: {} nodes but {} values",
            xs.len(),
            ys.len()
        );
        Ok(Self {
            xs: xs.to_vec(),
            ys: DVector::from_column_slice(ys),
        })
    }

    /// The node abscissas.
    pub fn x_values(&self) -> &[Real] {
        &self.xs
    }

    /// The node values.
    pub fn y_values(&self) -> &DVector<Real> {
        &self.ys
    }

    /// A copy with different node values (same length).
    pub fn with_y_values(&self, ys: DVector<Real>) -> Result<Self> {
        ensure!(
            ys.len() == self.xs.len(),
            "linear interpolation: {} nodes but {} values",
            self.xs.len(),
            ys.len()
        );
        Ok(Self {
            xs: self.xs.clone(),
            ys,
        })
    }

    /// Interpolated value at `x`.
    pub fn value(&self, x: Real) -> Real {
        let b = bracket(&self.xs, x);
        b.w_lo * self.ys[b.lo] + b.w_hi * self.ys[b.hi]
    }

    /// `∂value(x)/∂y_i` for every node `i`.
    pub fn node_sensitivity(&self, x: Real) -> DVector<Real> {
        let b = bracket(&self.xs, x);
        let mut w = DVector::zeros(self.xs.len());
        w[b.lo] += b.w_lo;
        w[b.hi] += b.w_hi;
        w
    }
}
