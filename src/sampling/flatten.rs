//! Uniform flattening of one catalog column.
//!
//! Purpose
//! -------
//! Thin a catalog so the chosen column is approximately uniformly
//! distributed inside a window, by rejecting rows in proportion to how much
//! the column's density at that row exceeds a ceiling.
//!
//! Key behaviors
//! -------------
//! - Fit a reflected Gaussian KDE with the column's fixed bandwidth (from
//!   [`BandwidthPolicy`](crate::sampling::options::BandwidthPolicy)), and
//!   rescale it to expected counts over the column's observed range.
//! - Set the ceiling to the configured percentile of the rescaled density on
//!   a grid over the bounds.
//! - For every row, draw `u ~ U[0, 1)` and keep the row iff
//!   `u · count(x) < ceiling`; rows in sparse regions are always kept.
//! - Shuffle the survivors once before returning them.
//!
//! Invariants & assumptions
//! ------------------------
//! - Exactly one uniform draw per input row, in row order, followed by one
//!   shuffle; a fixed seed gives a fixed output.
//! - The output is a subset of the input rows, each at most once, with
//!   original index values preserved.
//!
//! Testing notes
//! -------------
//! - Unit tests cover determinism, the subset property, full acceptance
//!   under a 100 % ceiling on flat data, and error wrapping.
use rand::{seq::SliceRandom, Rng};
use tracing::{debug, info};

use crate::{
    catalog::{Bounds, Catalog},
    density::{
        estimator::{build_density, DensityMode},
        kernel::Bandwidth,
    },
    sampling::{
        ceiling::acceptance_ceiling,
        errors::{ResampleError, ResampleResult},
        options::FlattenOptions,
    },
};

/// Flatten `variable` towards a uniform distribution over `bounds`.
///
/// # Errors
/// - [`ResampleError::InvalidOption`] for invalid `opts`.
/// - [`ResampleError::Catalog`] for a missing, empty or non-finite column.
/// - [`ResampleError::Density`] if the density cannot be built or rescaled
///   (e.g. a constant column, or quadrature that does not converge).
pub fn flatten<R>(
    catalog: &Catalog, variable: &str, bounds: Bounds, opts: &FlattenOptions, rng: &mut R,
) -> ResampleResult<Catalog>
where
    R: Rng + ?Sized,
{
    opts.validate()?;
    let values = catalog.finite_column(variable)?.to_vec();
    info!(variable, %bounds, rows = values.len(), "Flattening column");

    let bandwidth = opts.bandwidth.for_variable(variable);
    let density =
        build_density(&values, Bandwidth::Fixed(bandwidth), DensityMode::Reflected, opts.grid_points)
            .map_err(ResampleError::density(variable, bounds))?;
    let full_c = density
        .rescale_factor(&density.support(), &opts.quadrature)
        .map_err(ResampleError::density(variable, bounds))?;
    let ceiling =
        acceptance_ceiling(&density, full_c, bounds, opts.grid_points, opts.percentile)
            .map_err(ResampleError::density(variable, bounds))?
            .ok_or(ResampleError::InvalidOption {
                name: "percentile",
                value: opts.percentile,
                reason: "Percentile must be a fraction in [0, 1].",
            })?;
    debug!(variable, bandwidth, full_c, ceiling, "Flattening ceiling");

    let mut accepted: Vec<usize> = Vec::new();
    for (row, &x) in values.iter().enumerate() {
        let u: f64 = rng.random();
        if u * density.evaluate(x) * full_c < ceiling {
            accepted.push(row);
        }
    }
    accepted.shuffle(rng);

    info!(variable, kept = accepted.len(), rows = values.len(), "Flattened column");
    Ok(catalog.take(&accepted)?)
}
