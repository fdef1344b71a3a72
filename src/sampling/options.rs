//! Configuration for the flattening sampler.
//!
//! - [`BandwidthPolicy`]: fixed kernel width per column name, with a default.
//! - [`FlattenOptions`]: percentile, bandwidth policy, grid size and
//!   quadrature settings.
//!
//! PDF matching is configured with
//! [`ScaleOptions`](crate::optimization::scale_fit::ScaleOptions).
use std::collections::HashMap;

use crate::{
    density::{errors::DensityError, estimator::DEFAULT_GRID_POINTS, quadrature::QuadratureOptions},
    sampling::errors::{ResampleError, ResampleResult},
};

/// Default flattening bandwidth for columns without an override.
pub const DEFAULT_FLATTEN_BANDWIDTH: f64 = 0.15;

/// Effective-temperature columns live on a ~10³ K scale.
pub const TEFF_BANDWIDTH: f64 = 100.0;

/// Default acceptance percentile (as a fraction).
pub const DEFAULT_PERCENTILE: f64 = 0.7;

/// Fixed kernel bandwidth chosen by column name.
///
/// Default: `0.15` for every column except `TEFF`, which uses `100.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct BandwidthPolicy {
    default: f64,
    overrides: HashMap<String, f64>,
}

impl BandwidthPolicy {
    /// Same bandwidth for every column.
    ///
    /// # Errors
    /// [`ResampleError::InvalidOption`] if `bandwidth` is non-finite or ≤ 0.
    pub fn uniform(bandwidth: f64) -> ResampleResult<Self> {
        verify_bandwidth(bandwidth)?;
        Ok(Self { default: bandwidth, overrides: HashMap::new() })
    }

    /// Add (or replace) a per-column bandwidth.
    ///
    /// # Errors
    /// [`ResampleError::InvalidOption`] if `bandwidth` is non-finite or ≤ 0.
    pub fn with_override(mut self, variable: impl Into<String>, bandwidth: f64) -> ResampleResult<Self> {
        verify_bandwidth(bandwidth)?;
        self.overrides.insert(variable.into(), bandwidth);
        Ok(self)
    }

    pub fn default_bandwidth(&self) -> f64 {
        self.default
    }

    pub fn for_variable(&self, variable: &str) -> f64 {
        self.overrides.get(variable).copied().unwrap_or(self.default)
    }
}

impl Default for BandwidthPolicy {
    fn default() -> Self {
        let mut overrides = HashMap::new();
        overrides.insert("TEFF".to_string(), TEFF_BANDWIDTH);
        Self { default: DEFAULT_FLATTEN_BANDWIDTH, overrides }
    }
}

fn verify_bandwidth(bandwidth: f64) -> ResampleResult<()> {
    if !bandwidth.is_finite() || bandwidth <= 0.0 {
        return Err(ResampleError::InvalidOption {
            name: "bandwidth",
            value: bandwidth,
            reason: "Bandwidth must be finite and > 0.",
        });
    }
    Ok(())
}

/// Flattening configuration.
///
/// Fields:
/// - `percentile`: fraction in `[0, 1]`; the acceptance ceiling is this
///   quantile of the rescaled density over the bounds grid.
/// - `bandwidth`: kernel width per column.
/// - `grid_points`: nodes of the lookup and ceiling grids.
/// - `quadrature`: settings for the rescale integral.
///
/// Default: `percentile = 0.7`, `BandwidthPolicy::default()`,
/// `grid_points = 100`, `QuadratureOptions::default()`.
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenOptions {
    pub percentile: f64,
    pub bandwidth: BandwidthPolicy,
    pub grid_points: usize,
    pub quadrature: QuadratureOptions,
}

impl FlattenOptions {
    /// Create validated options.
    ///
    /// # Errors
    /// See [`FlattenOptions::validate`].
    pub fn new(
        percentile: f64, bandwidth: BandwidthPolicy, grid_points: usize,
        quadrature: QuadratureOptions,
    ) -> ResampleResult<Self> {
        let opts = Self { percentile, bandwidth, grid_points, quadrature };
        opts.validate()?;
        Ok(opts)
    }

    /// # Errors
    /// [`ResampleError::InvalidOption`] if `percentile` is outside `[0, 1]`,
    /// `grid_points < 2`, or a quadrature setting is invalid.
    pub fn validate(&self) -> ResampleResult<()> {
        if !(0.0..=1.0).contains(&self.percentile) {
            return Err(ResampleError::InvalidOption {
                name: "percentile",
                value: self.percentile,
                reason: "Percentile must be a fraction in [0, 1].",
            });
        }
        if self.grid_points < 2 {
            return Err(ResampleError::InvalidOption {
                name: "grid_points",
                value: self.grid_points as f64,
                reason: "Grid needs at least 2 points.",
            });
        }
        self.quadrature.validate().map_err(|err| match err {
            DensityError::InvalidQuadratureOption { name, value, reason } => {
                ResampleError::InvalidOption { name, value, reason }
            }
            _ => ResampleError::InvalidOption {
                name: "quadrature",
                value: f64::NAN,
                reason: "Invalid quadrature settings.",
            },
        })
    }
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            percentile: DEFAULT_PERCENTILE,
            bandwidth: BandwidthPolicy::default(),
            grid_points: DEFAULT_GRID_POINTS,
            quadrature: QuadratureOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_widens_teff_only() {
        let policy = BandwidthPolicy::default();

        assert_eq!(policy.for_variable("TEFF"), 100.0);
        assert_eq!(policy.for_variable("FEH"), 0.15);
        assert_eq!(policy.for_variable("teff"), 0.15);
    }

    #[test]
    fn overrides_replace_the_default_for_one_column() {
        let policy = BandwidthPolicy::uniform(0.5).unwrap().with_override("LOGG", 0.05).unwrap();

        assert_eq!(policy.for_variable("LOGG"), 0.05);
        assert_eq!(policy.for_variable("TEFF"), 0.5);
        assert!(BandwidthPolicy::uniform(0.0).is_err());
        assert!(BandwidthPolicy::uniform(0.1).unwrap().with_override("X", f64::NAN).is_err());
    }

    #[test]
    fn percentile_must_be_a_fraction() {
        let policy = BandwidthPolicy::default();
        let quad = QuadratureOptions::default();

        assert!(FlattenOptions::new(70.0, policy.clone(), 100, quad).is_err());
        assert!(FlattenOptions::new(0.7, policy.clone(), 1, quad).is_err());
        assert!(FlattenOptions::new(1.0, policy, 100, quad).is_ok());
    }
}
