//! Acceptance ceiling of the flattening sampler.
use crate::{
    catalog::Bounds,
    density::{errors::DensityResult, estimator::DensityEstimate},
    utils::percentile,
};

/// `q`-quantile of `factor · KDE(x)` over `points` evenly spaced nodes of
/// `bounds`, with linear interpolation between order statistics.
///
/// Returns `Ok(None)` only when `q` lies outside `[0, 1]`.
///
/// # Errors
/// [`DensityError::InvalidGridPoints`](crate::density::errors::DensityError)
/// if `points < 2`.
pub fn acceptance_ceiling(
    density: &DensityEstimate, factor: f64, bounds: Bounds, points: usize, q: f64,
) -> DensityResult<Option<f64>> {
    let grid = density.tabulate_over(bounds, points)?;
    let scaled: Vec<f64> = grid.values().iter().map(|&v| factor * v).collect();
    Ok(percentile(&scaled, q))
}
