//! Piecewise-linear lookup over a tabulated density.
//!
//! A [`LookupTable`] stores `(xᵢ, f(xᵢ))` pairs on a strictly increasing grid
//! and evaluates by linear interpolation between neighbouring nodes. Queries
//! outside `[x₀, x_last]` clamp to the nearest edge value, so the table is
//! total over the real line.
use ndarray::Array1;

use crate::{
    catalog::Bounds,
    density::errors::{DensityError, DensityResult},
};

#[derive(Debug, Clone, PartialEq)]
pub struct LookupTable {
    nodes: Array1<f64>,
    values: Array1<f64>,
}

impl LookupTable {
    /// Tabulate `f` on `points` evenly spaced nodes over `window`.
    ///
    /// # Errors
    /// - [`DensityError::InvalidGridPoints`] if `points < 2`.
    /// - [`DensityError::NonFiniteDensity`] if `f` returns NaN or ±∞ at a node.
    pub fn tabulate<F>(window: Bounds, points: usize, f: F) -> DensityResult<Self>
    where
        F: Fn(f64) -> f64,
    {
        if points < 2 {
            return Err(DensityError::InvalidGridPoints { points });
        }
        let nodes = window.linspace(points);
        let mut values = Array1::<f64>::zeros(points);
        for (slot, &x) in values.iter_mut().zip(nodes.iter()) {
            let value = f(x);
            if !value.is_finite() {
                return Err(DensityError::NonFiniteDensity { x, value });
            }
            *slot = value;
        }
        Ok(Self { nodes, values })
    }

    pub fn nodes(&self) -> &Array1<f64> {
        &self.nodes
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    /// Nodes lying strictly inside `bounds`, used as quadrature breakpoints.
    pub fn interior_nodes(&self, bounds: &Bounds) -> Vec<f64> {
        bounds.interior(self.nodes.iter())
    }

    /// Linear interpolation between the two nodes bracketing `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        let n = self.nodes.len();
        let first = self.nodes[0];
        let last = self.nodes[n - 1];
        if x <= first {
            return self.values[0];
        }
        if x >= last {
            return self.values[n - 1];
        }
        // Index of the first node strictly greater than x; in 1..n.
        let hi = self
            .nodes
            .as_slice()
            .map(|s| s.partition_point(|&node| node <= x))
            .unwrap_or_else(|| self.nodes.iter().take_while(|&&node| node <= x).count());
        let lo = hi - 1;
        let (x0, x1) = (self.nodes[lo], self.nodes[hi]);
        let (y0, y1) = (self.values[lo], self.values[hi]);
        let t = (x - x0) / (x1 - x0);
        y0 + t * (y1 - y0)
    }
}
