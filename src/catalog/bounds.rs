//! Closed intervals used as evaluation and acceptance windows.
//!
//! A [`Bounds`] is always finite with `lo < hi`; it carries no relation to
//! the range of any particular column. Density grids, quadrature windows and
//! the PDF-matching acceptance filter are all expressed in terms of it.
use ndarray::Array1;

use crate::catalog::errors::{CatalogError, CatalogResult};

/// Closed interval `[lo, hi]` with finite endpoints and `lo < hi`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    lo: f64,
    hi: f64,
}

impl Bounds {
    /// Build a validated interval.
    ///
    /// # Errors
    /// - [`CatalogError::InvalidBounds`] if either endpoint is non-finite or
    ///   `lo >= hi`.
    pub fn new(lo: f64, hi: f64) -> CatalogResult<Self> {
        if !lo.is_finite() || !hi.is_finite() {
            return Err(CatalogError::InvalidBounds {
                lo,
                hi,
                reason: "Endpoints must be finite.",
            });
        }
        if lo >= hi {
            return Err(CatalogError::InvalidBounds {
                lo,
                hi,
                reason: "Lower bound must be < upper bound.",
            });
        }
        Ok(Self { lo, hi })
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }

    /// Inclusive membership test on both ends.
    pub fn contains(&self, x: f64) -> bool {
        x >= self.lo && x <= self.hi
    }

    /// `points` evenly spaced nodes from `lo` to `hi`, both included.
    pub fn linspace(&self, points: usize) -> Array1<f64> {
        Array1::linspace(self.lo, self.hi, points)
    }

    /// The subset of `nodes` lying strictly inside the interval, in input order.
    pub fn interior<'a, I>(&self, nodes: I) -> Vec<f64>
    where
        I: IntoIterator<Item = &'a f64>,
    {
        nodes.into_iter().copied().filter(|&x| x > self.lo && x < self.hi).collect()
    }
}

impl TryFrom<(f64, f64)> for Bounds {
    type Error = CatalogError;

    fn try_from((lo, hi): (f64, f64)) -> Result<Self, Self::Error> {
        Bounds::new(lo, hi)
    }
}

impl std::fmt::Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_reversed_and_degenerate_intervals() {
        assert!(Bounds::new(1.0, 1.0).is_err());
        assert!(Bounds::new(2.0, -2.0).is_err());
        assert!(Bounds::new(f64::NEG_INFINITY, 0.0).is_err());
        assert!(Bounds::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn contains_is_inclusive_on_both_ends() {
        let b = Bounds::new(-3.0, -0.5).unwrap();

        assert!(b.contains(-3.0));
        assert!(b.contains(-0.5));
        assert!(!b.contains(-0.499_999));
        assert!(!b.contains(-3.000_001));
    }

    #[test]
    fn linspace_hits_both_endpoints() {
        let b = Bounds::new(0.0, 10.0).unwrap();

        let grid = b.linspace(100);

        assert_eq!(grid.len(), 100);
        assert_eq!(grid[0], 0.0);
        assert!((grid[99] - 10.0).abs() < 1e-12);
    }

    #[test]
    fn interior_drops_endpoints_and_outside_nodes() {
        let b = Bounds::new(1.0, 3.0).unwrap();
        let nodes = [0.0, 1.0, 1.5, 2.0, 3.0, 4.0];

        let inner = b.interior(&nodes);

        assert_eq!(inner, vec![1.5, 2.0]);
    }
}
