//! Public API surface for the scale fit.
//!
//! - [`TargetPdf`]: trait for the target distribution `f(x, params)`.
//! - [`ScaleOptions`] and [`Tolerances`]: configuration for the grid,
//!   objective, quadrature and minimizer.
//! - [`ScaleOutcome`]: normalized result returned by `fit_scale`.
use argmin::core::{TerminationReason, TerminationStatus};

use crate::{
    density::quadrature::QuadratureOptions,
    optimization::{
        errors::{OptError, OptResult},
        scale_fit::validation::{
            validate_scale, verify_grid_points, verify_max_iter, verify_penalty_weight, verify_tol,
        },
    },
};

/// Target probability density evaluated as `f(x, params)`.
///
/// Implementations should return a finite, non-negative value for every `x`
/// on the search grid; anything else is reported as a domain violation.
/// The density does not need to be normalized.
///
/// Any `Fn(f64, &[f64]) -> f64` closure is a `TargetPdf`.
pub trait TargetPdf {
    fn density(&self, x: f64, params: &[f64]) -> f64;
}

impl<F> TargetPdf for F
where
    F: Fn(f64, &[f64]) -> f64 + ?Sized,
{
    fn density(&self, x: f64, params: &[f64]) -> f64 {
        self(x, params)
    }
}

/// Stopping rules for the golden-section minimizer.
///
/// - `tol`: relative bracket width at which the search stops.
/// - `max_iter`: hard cap on iterations; reaching it is a failure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol: f64,
    pub max_iter: usize,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Errors
    /// - [`OptError::InvalidTolerance`] if `tol` is non-finite, ≤ 0 or ≥ 1.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    pub fn new(tol: f64, max_iter: usize) -> OptResult<Self> {
        verify_tol(tol)?;
        verify_max_iter(max_iter)?;
        Ok(Self { tol, max_iter })
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self { tol: 1e-8, max_iter: 500 }
    }
}

/// Scale-fit configuration.
///
/// Fields:
/// - `grid_points`: evenly spaced evaluation points over the search bounds.
/// - `penalty_weight`: extra weight `w` on grid points where the scaled
///   target exceeds the parent count density; the residual there is
///   multiplied by `1 + w`.
/// - `tols`: minimizer stopping rules.
/// - `quadrature`: settings for normalizing the parent density.
/// - `verbose`: attach a terminal observer to the minimizer (only with the
///   `obs_slog` feature).
///
/// Default:
/// - `grid_points = 100`, `penalty_weight = 1.0`, `tols = Tolerances::default()`,
///   `quadrature = QuadratureOptions::default()`, `verbose = false`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleOptions {
    pub grid_points: usize,
    pub penalty_weight: f64,
    pub tols: Tolerances,
    pub quadrature: QuadratureOptions,
    pub verbose: bool,
}

impl ScaleOptions {
    /// Create validated options.
    ///
    /// # Errors
    /// - [`OptError::InvalidGridPoints`] if `grid_points < 2`.
    /// - [`OptError::InvalidPenaltyWeight`] for a negative or non-finite weight.
    /// - [`OptError::Density`] wrapping an invalid quadrature setting.
    pub fn new(
        grid_points: usize, penalty_weight: f64, tols: Tolerances, quadrature: QuadratureOptions,
        verbose: bool,
    ) -> OptResult<Self> {
        let opts = Self { grid_points, penalty_weight, tols, quadrature, verbose };
        opts.validate()?;
        Ok(opts)
    }

    /// Re-check every field; used by `fit_scale` since fields are public.
    pub fn validate(&self) -> OptResult<()> {
        verify_grid_points(self.grid_points)?;
        verify_penalty_weight(self.penalty_weight)?;
        verify_tol(self.tols.tol)?;
        verify_max_iter(self.tols.max_iter)?;
        self.quadrature.validate().map_err(OptError::from)
    }
}

impl Default for ScaleOptions {
    fn default() -> Self {
        Self {
            grid_points: 100,
            penalty_weight: 1.0,
            tols: Tolerances::default(),
            quadrature: QuadratureOptions::default(),
            verbose: false,
        }
    }
}

/// Canonical result returned by `fit_scale`.
///
/// - `scale`: best non-negative scale `s`.
/// - `objective`: penalized L1 objective at `scale`.
/// - `x0`: starting point (median count-density / target ratio, clamped
///   into the search bracket).
/// - `converged`: `true` only when the solver met its tolerance.
/// - `status`: human-readable termination status.
/// - `iterations`: minimizer iterations performed.
/// - `cost_evals`: objective evaluations reported by `argmin`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleOutcome {
    pub scale: f64,
    pub objective: f64,
    pub x0: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub cost_evals: u64,
}

impl ScaleOutcome {
    /// Build a validated outcome from raw solver state.
    ///
    /// # Errors
    /// - [`OptError::MissingScale`] / [`OptError::InvalidScale`] if the best
    ///   parameter is absent, non-finite or negative.
    /// - [`OptError::NonFiniteCost`] if the objective is not finite.
    pub fn new(
        best: Option<f64>, objective: f64, x0: f64, termination: &TerminationStatus,
        iterations: u64, cost_evals: u64,
    ) -> OptResult<Self> {
        let scale = validate_scale(best)?;
        if !objective.is_finite() {
            return Err(OptError::NonFiniteCost { value: objective });
        }
        let (converged, status) = match termination {
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
            TerminationStatus::Terminated(reason) => {
                (matches!(reason, TerminationReason::SolverConverged), format!("{reason:?}"))
            }
        };
        Ok(Self {
            scale,
            objective,
            x0,
            converged,
            status,
            iterations: iterations as usize,
            cost_evals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_target_pdfs() {
        let line = |x: f64, p: &[f64]| p[0] * x + p[1];

        assert_eq!(line.density(2.0, &[3.0, 1.0]), 7.0);
    }

    #[test]
    fn tolerances_reject_bad_values() {
        assert!(matches!(Tolerances::new(0.0, 10), Err(OptError::InvalidTolerance { .. })));
        assert!(matches!(Tolerances::new(f64::NAN, 10), Err(OptError::InvalidTolerance { .. })));
        assert!(matches!(Tolerances::new(1e-6, 0), Err(OptError::InvalidMaxIter { .. })));
        assert!(Tolerances::new(1e-6, 10).is_ok());
    }

    #[test]
    fn options_validate_every_field() {
        let mut opts = ScaleOptions::default();
        assert!(opts.validate().is_ok());

        opts.penalty_weight = -1.0;
        assert!(matches!(opts.validate(), Err(OptError::InvalidPenaltyWeight { .. })));

        opts.penalty_weight = 1.0;
        opts.grid_points = 1;
        assert_eq!(opts.validate(), Err(OptError::InvalidGridPoints { points: 1 }));

        opts.grid_points = 100;
        opts.quadrature.limit = 0;
        assert!(matches!(opts.validate(), Err(OptError::Density(_))));
    }

    #[test]
    // Purpose
    // -------
    // Only `SolverConverged` counts as convergence; an iteration cap does not.
    fn outcome_maps_termination_reasons() {
        let converged = TerminationStatus::Terminated(TerminationReason::SolverConverged);
        let capped = TerminationStatus::Terminated(TerminationReason::MaxItersReached);

        let ok = ScaleOutcome::new(Some(2.5), 0.1, 2.0, &converged, 40, 42).unwrap();
        let stopped = ScaleOutcome::new(Some(2.5), 0.1, 2.0, &capped, 500, 502).unwrap();

        assert!(ok.converged);
        assert_eq!(ok.status, "SolverConverged");
        assert!(!stopped.converged);
        assert!(matches!(
            ScaleOutcome::new(None, 0.1, 2.0, &converged, 1, 1),
            Err(OptError::MissingScale)
        ));
        assert!(matches!(
            ScaleOutcome::new(Some(-1.0), 0.1, 2.0, &converged, 1, 1),
            Err(OptError::InvalidScale { .. })
        ));
    }
}
