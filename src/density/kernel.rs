//! Gaussian kernel density estimate and bandwidth rules.
//!
//! This module provides:
//! - A [`Bandwidth`] enum with the two rules used by the samplers: a fixed
//!   width and a fraction of the sample's population standard deviation.
//! - [`GaussianKde`], a 1-D Gaussian KDE over a sorted sample that only sums
//!   kernels within [`KERNEL_REACH`] bandwidths of the query point.
//!
//! Conventions:
//! - The bandwidth is the standard deviation of each Gaussian kernel.
//! - The estimate integrates to one over the real line; turning it into an
//!   expected-count density is the job of `estimator::DensityEstimate`.
use statrs::statistics::Statistics;

use crate::density::errors::{DensityError, DensityResult};

/// Number of bandwidths beyond which a kernel's contribution is dropped.
///
/// `exp(-0.5 · 8²) ≈ 1.3e-14`, far below the quadrature tolerances used
/// downstream.
pub const KERNEL_REACH: f64 = 8.0;

const INV_SQRT_TAU: f64 = 0.398_942_280_401_432_7;

/// Bandwidth rule.
///
/// - `Fixed(h)`: use `h` as-is.
/// - `StdFraction(d)`: use `σ / d`, where `σ` is the population standard
///   deviation of the sample the kernel is fit on. `d = 3` is the PDF-matching
///   default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bandwidth {
    Fixed(f64),
    StdFraction(f64),
}

impl Bandwidth {
    /// Resolve the rule against a sample.
    ///
    /// # Errors
    /// - [`DensityError::InvalidBandwidth`] if a fixed width or the divisor is
    ///   non-finite or not strictly positive.
    /// - [`DensityError::ZeroSpread`] if `StdFraction` is used on a sample
    ///   with zero standard deviation.
    /// - [`DensityError::EmptySample`] if `StdFraction` is used on an empty
    ///   sample.
    pub fn resolve(&self, sample: &[f64]) -> DensityResult<f64> {
        match *self {
            Bandwidth::Fixed(h) => {
                verify_positive(h, "Bandwidth must be finite and > 0.")?;
                Ok(h)
            }
            Bandwidth::StdFraction(divisor) => {
                verify_positive(divisor, "Standard-deviation divisor must be finite and > 0.")?;
                let first = *sample.first().ok_or(DensityError::EmptySample)?;
                let sigma = sample.iter().population_std_dev();
                if !sigma.is_finite() || sigma <= 0.0 {
                    return Err(DensityError::ZeroSpread { value: first });
                }
                Ok(sigma / divisor)
            }
        }
    }
}

fn verify_positive(value: f64, reason: &'static str) -> DensityResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(DensityError::InvalidBandwidth { value, reason });
    }
    Ok(())
}

/// Gaussian KDE over a sorted, finite sample.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKde {
    samples: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// Fit the estimate. The sample is sorted in place and kept.
    ///
    /// # Errors
    /// - [`DensityError::EmptySample`] if `samples` is empty.
    /// - [`DensityError::NonFiniteSample`] for the first NaN or ±∞ value.
    /// - [`DensityError::InvalidBandwidth`] if `bandwidth` is non-finite or ≤ 0.
    pub fn fit(mut samples: Vec<f64>, bandwidth: f64) -> DensityResult<Self> {
        if samples.is_empty() {
            return Err(DensityError::EmptySample);
        }
        if let Some((index, &value)) = samples.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(DensityError::NonFiniteSample { index, value });
        }
        verify_positive(bandwidth, "Bandwidth must be finite and > 0.")?;
        samples.sort_by(f64::total_cmp);
        Ok(Self { samples, bandwidth })
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Density at `x`: `(1 / (n·h)) Σ φ((x − xᵢ) / h)`.
    pub fn evaluate(&self, x: f64) -> f64 {
        let h = self.bandwidth;
        let reach = KERNEL_REACH * h;
        let start = self.samples.partition_point(|&s| s < x - reach);
        let end = self.samples.partition_point(|&s| s <= x + reach);
        let sum: f64 = self.samples[start..end]
            .iter()
            .map(|&s| {
                let z = (x - s) / h;
                (-0.5 * z * z).exp()
            })
            .sum();
        sum * INV_SQRT_TAU / (self.samples.len() as f64 * h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_point_matches_normal_pdf() {
        let kde = GaussianKde::fit(vec![1.0], 0.5).unwrap();

        let expected = INV_SQRT_TAU / 0.5;
        assert!((kde.evaluate(1.0) - expected).abs() < 1e-15);

        let z: f64 = 1.0;
        let expected_off = INV_SQRT_TAU / 0.5 * (-0.5 * z * z).exp();
        assert!((kde.evaluate(1.5) - expected_off).abs() < 1e-15);
    }

    #[test]
    fn far_queries_return_exact_zero() {
        let kde = GaussianKde::fit(vec![0.0, 0.1, 0.2], 0.1).unwrap();

        assert_eq!(kde.evaluate(100.0), 0.0);
        assert!(kde.evaluate(0.1) > 0.0);
    }

    #[test]
    fn riemann_mass_is_close_to_one() {
        let kde = GaussianKde::fit(vec![-1.0, 0.0, 0.3, 2.0], 0.4).unwrap();

        let step = 1e-3;
        let mass: f64 = (0..12_000).map(|i| kde.evaluate(-6.0 + i as f64 * step) * step).sum();

        assert!((mass - 1.0).abs() < 1e-6, "mass = {mass}");
    }

    #[test]
    fn fit_rejects_bad_inputs() {
        assert_eq!(GaussianKde::fit(vec![], 1.0), Err(DensityError::EmptySample));
        assert!(matches!(
            GaussianKde::fit(vec![0.0, f64::INFINITY], 1.0),
            Err(DensityError::NonFiniteSample { index: 1, .. })
        ));
        assert!(matches!(
            GaussianKde::fit(vec![0.0], -0.2),
            Err(DensityError::InvalidBandwidth { .. })
        ));
        assert!(matches!(GaussianKde::fit(vec![0.0], 0.0), Err(DensityError::InvalidBandwidth { .. })));
    }

    #[test]
    fn std_fraction_uses_population_std() {
        // σ of {1, 3} (population) is 1.0.
        let h = Bandwidth::StdFraction(3.0).resolve(&[1.0, 3.0]).unwrap();

        assert!((h - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn std_fraction_rejects_constant_sample() {
        assert!(matches!(
            Bandwidth::StdFraction(3.0).resolve(&[2.0, 2.0, 2.0]),
            Err(DensityError::ZeroSpread { .. })
        ));
        assert_eq!(Bandwidth::StdFraction(3.0).resolve(&[]), Err(DensityError::EmptySample));
    }
}
