//! High-level entry point for fitting the scale between a parent density and
//! a target PDF.
//!
//! Builds the parent's expected-count density over the search window,
//! evaluates the target on the same grid, brackets the search around the
//! objective's exact minimizer, seeds it with the median count/target ratio
//! and delegates the minimization to
//! [`run_golden_section`].
use tracing::{debug, info};

use crate::{
    catalog::Bounds,
    density::{errors::DensityError, estimator::DensityEstimate, quadrature::integrate},
    optimization::{
        errors::{OptError, OptResult},
        scale_fit::{
            count_density::CountDensity,
            objective::ScaleObjective,
            run::run_golden_section,
            traits::{ScaleOptions, ScaleOutcome, TargetPdf},
            validation::validate_target_value,
        },
    },
    utils::median,
};

/// Fit the largest-support scale `s ≥ 0` such that `s · target` tracks the
/// parent's expected-count density from below.
///
/// # Behavior
/// - `N` = parent observations inside `search_bounds` (inclusive).
/// - The parent KDE is re-tabulated on `opts.grid_points` nodes over
///   `search_bounds`; `count(x) = N / ∫ lookup · lookup(x)`, integrated with
///   the interior grid nodes as breakpoints.
/// - The target is evaluated on the same grid. `x0` is the median of
///   `count / target` over points with a positive target, clamped into the
///   search bracket.
/// - Golden-section search minimizes the penalized L1 objective on
///   `[0, 2 · s*]`, where `s*` is the objective's exact weighted-quantile
///   minimizer; the bracket does not depend on how close to zero the target
///   gets on the grid.
///
/// # Errors
/// - [`OptError::EmptySearchWindow`] if `N == 0`.
/// - [`OptError::InvalidTargetValue`] for a negative or non-finite target.
/// - [`OptError::VanishingTarget`] if the target is zero on every node.
/// - [`OptError::DegenerateBracket`] if the optimal scale is zero (the
///   target's weight sits where the parent has no counts).
/// - [`OptError::NotConverged`] if the solver stops on its iteration cap.
/// - [`OptError::Density`] for tabulation or quadrature failures.
///
/// # Returns
/// The [`ScaleOutcome`] and the [`CountDensity`] the fit was made against.
pub fn fit_scale<T>(
    parent: &DensityEstimate, target: &T, params: &[f64], search_bounds: Bounds,
    opts: &ScaleOptions,
) -> OptResult<(ScaleOutcome, CountDensity)>
where
    T: TargetPdf + ?Sized,
{
    opts.validate()?;

    let count = parent.count_within(&search_bounds);
    if count == 0 {
        return Err(OptError::EmptySearchWindow { lo: search_bounds.lo(), hi: search_bounds.hi() });
    }

    let lookup = parent.tabulate_over(search_bounds, opts.grid_points)?;
    let breakpoints = lookup.interior_nodes(&search_bounds);
    let mass = integrate(|x| lookup.evaluate(x), &search_bounds, &breakpoints, &opts.quadrature)?
        .value;
    if !(mass.is_finite() && mass > 0.0) {
        return Err(DensityError::DegenerateMass {
            lo: search_bounds.lo(),
            hi: search_bounds.hi(),
            mass,
        }
        .into());
    }
    let factor = count as f64 / mass;
    let count_density = CountDensity::new(factor, lookup, count, search_bounds);

    let grid = count_density.lookup().nodes();
    let parent_counts = count_density.lookup().values().mapv(|v| factor * v);
    let mut target_values = grid.clone();
    for (slot, &x) in target_values.iter_mut().zip(grid.iter()) {
        let value = target.density(x, params);
        validate_target_value(x, value)?;
        *slot = value;
    }
    if target_values.iter().all(|&t| t == 0.0) {
        return Err(OptError::VanishingTarget { lo: search_bounds.lo(), hi: search_bounds.hi() });
    }

    let problem = ScaleObjective::new(parent_counts, target_values, opts.penalty_weight)?;
    let vanishing = || OptError::VanishingTarget { lo: search_bounds.lo(), hi: search_bounds.hi() };
    let optimum = problem.weighted_optimum().ok_or_else(vanishing)?;
    let upper = 2.0 * optimum;
    if !(upper.is_finite() && upper > 0.0) {
        return Err(OptError::DegenerateBracket { upper });
    }
    let x0 = median(&problem.ratios()).ok_or_else(vanishing)?.min(upper);
    debug!(count, factor, x0, optimum, upper, "Prepared scale fit");

    let outcome = run_golden_section(problem, x0, upper, opts)?;
    if !outcome.converged {
        return Err(OptError::NotConverged {
            status: outcome.status,
            iterations: outcome.iterations,
        });
    }
    info!(
        window = %search_bounds,
        scale = outcome.scale,
        objective = outcome.objective,
        iterations = outcome.iterations,
        "Fitted target scale"
    );
    Ok((outcome, count_density))
}
