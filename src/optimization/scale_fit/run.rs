//! Execution helper that runs `argmin`'s golden-section search on a
//! [`ScaleObjective`] and returns a crate-friendly [`ScaleOutcome`].
use argmin::{
    core::{Executor, State},
    solver::goldensectionsearch::GoldenSectionSearch,
};
use tracing::debug;

use crate::optimization::{
    errors::OptResult,
    scale_fit::{
        objective::ScaleObjective,
        traits::{ScaleOptions, ScaleOutcome},
    },
};

/// Minimize `problem` over `[0, upper]` starting from `x0`.
///
/// Wires up:
/// - a [`GoldenSectionSearch`] on the bracket with relative tolerance
///   `opts.tols.tol`,
/// - the initial estimate `x0` (must lie inside the bracket),
/// - the iteration cap `opts.tols.max_iter`,
/// - an optional terminal observer (behind the `obs_slog` feature, when
///   `opts.verbose` is set),
///
/// then executes the solver and converts the final state into a
/// [`ScaleOutcome`].
///
/// # Errors
/// - Bracket or tolerance rejected by the solver builder.
/// - Any `argmin` runtime error, mapped through `From<argmin::core::Error>`.
/// - Validation errors from [`ScaleOutcome::new`].
pub fn run_golden_section(
    problem: ScaleObjective, x0: f64, upper: f64, opts: &ScaleOptions,
) -> OptResult<ScaleOutcome> {
    let solver = GoldenSectionSearch::new(0.0, upper)?.with_tolerance(opts.tols.tol)?;
    let max_iter = opts.tols.max_iter as u64;

    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(x0).max_iters(max_iter));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }

    let result = optimizer.run()?;
    let state = result.state();
    let cost_evals = state.get_func_counts().get("cost_count").copied().unwrap_or(0);
    debug!(
        iterations = state.get_iter(),
        cost_evals,
        best_cost = state.get_best_cost(),
        "Golden-section search finished"
    );
    ScaleOutcome::new(
        state.get_best_param().copied(),
        state.get_best_cost(),
        x0,
        state.get_termination_status(),
        state.get_iter(),
        cost_evals,
    )
}
