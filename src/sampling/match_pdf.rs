//! Resample a catalog column so it follows a target PDF inside a window.
//!
//! Purpose
//! -------
//! Select rows such that, inside `bounds`, the chosen column is distributed
//! like `target(x, params)`, keeping as many rows as the parent sample can
//! support.
//!
//! Key behaviors
//! -------------
//! - Fit a plain Gaussian KDE on the full column (bandwidth `σ / 3`).
//! - Rescale it by `norm = rows / ∫_bounds KDE`, integrated with the column
//!   lookup nodes inside `bounds` as breakpoints.
//! - Fit the target's scale with
//!   [`fit_scale`](crate::optimization::scale_fit::fit_scale) over `bounds`.
//! - For every row draw `u ~ U[0, 1)`; a row inside `bounds` is kept iff
//!   `u · norm · KDE(x) < scale · target(x)`. Rows outside `bounds` still
//!   consume their draw and are always rejected.
//!
//! Invariants & assumptions
//! ------------------------
//! - Output rows keep input order (no shuffle).
//! - Every output row lies inside `bounds`.
//! - The target is only evaluated on the fit grid and at in-bounds rows.
use rand::Rng;
use tracing::{debug, info};

use crate::{
    catalog::{Bounds, Catalog},
    density::{
        estimator::{build_density, DensityMode},
        kernel::Bandwidth,
    },
    optimization::scale_fit::{
        fit_scale, traits::TargetPdf, validation::validate_target_value, ScaleOptions,
    },
    sampling::errors::{ResampleError, ResampleResult},
};

/// Standard-deviation divisor of the parent bandwidth.
pub const PARENT_STD_DIVISOR: f64 = 3.0;

/// Resample `variable` so that it follows `target` inside `bounds`.
///
/// # Errors
/// - [`ResampleError::Catalog`] for a missing, empty or non-finite column.
/// - [`ResampleError::Density`] if the parent density cannot be built or
///   rescaled over `bounds`.
/// - [`ResampleError::Optimization`] for invalid options, an empty window,
///   a target that is negative, non-finite or zero on the grid, or a scale
///   fit that does not converge.
pub fn match_pdf<T, R>(
    catalog: &Catalog, variable: &str, target: &T, params: &[f64], bounds: Bounds,
    opts: &ScaleOptions, rng: &mut R,
) -> ResampleResult<Catalog>
where
    T: TargetPdf + ?Sized,
    R: Rng + ?Sized,
{
    opts.validate().map_err(ResampleError::optimization(variable, bounds))?;
    let values = catalog.finite_column(variable)?.to_vec();
    info!(variable, %bounds, rows = values.len(), "Matching column to target PDF");

    let density = build_density(
        &values,
        Bandwidth::StdFraction(PARENT_STD_DIVISOR),
        DensityMode::Plain,
        opts.grid_points,
    )
    .map_err(ResampleError::density(variable, bounds))?;
    let (outcome, _) = fit_scale(&density, target, params, bounds, opts)
        .map_err(ResampleError::optimization(variable, bounds))?;
    let norm = density
        .rescale_factor(&bounds, &opts.quadrature)
        .map_err(ResampleError::density(variable, bounds))?;
    debug!(
        variable,
        bandwidth = density.bandwidth(),
        norm,
        scale = outcome.scale,
        "Acceptance envelope"
    );

    let mut accepted: Vec<usize> = Vec::new();
    for (row, &x) in values.iter().enumerate() {
        let u: f64 = rng.random();
        if !bounds.contains(x) {
            continue;
        }
        let t = target.density(x, params);
        validate_target_value(x, t).map_err(ResampleError::optimization(variable, bounds))?;
        if u * norm * density.evaluate(x) < outcome.scale * t {
            accepted.push(row);
        }
    }

    info!(variable, kept = accepted.len(), rows = values.len(), "Matched column to target PDF");
    Ok(catalog.take(&accepted)?)
}
