//! Density estimate over one catalog column.
//!
//! Purpose
//! -------
//! Wrap a [`GaussianKde`] fit on a column's values together with a
//! piecewise-linear [`LookupTable`] over the column's observed range, and
//! expose the operations the samplers need: fast evaluation, exact
//! evaluation, integration over a window, and conversion to an
//! expected-count density.
//!
//! Key behaviors
//! -------------
//! - [`DensityMode::Reflected`] mirrors the sample across both data edges
//!   (`2m − x` and `2M − x`) before fitting, so the estimate does not sag at
//!   the boundaries. [`DensityMode::Plain`] fits the sample as-is.
//! - The lookup table always spans `[min, max]` of the original values, with
//!   `grid_points` evenly spaced nodes.
//! - [`DensityEstimate::rescale_factor`] returns `count / ∫_window KDE`, the
//!   multiplier that turns the unit-mass KDE into expected counts.
//!
//! Invariants & assumptions
//! ------------------------
//! - Values are non-empty, finite and not all equal.
//! - A reflected estimate carries roughly a third of its mass over
//!   `[min, max]`; rescaling always integrates over the window rather than
//!   assuming unit mass.
//!
//! Conventions
//! -----------
//! - `count` is the number of original observations, never the reflected
//!   sample size.
//!
//! Testing notes
//! -------------
//! - Unit tests check reflection flattening the boundary sag, rescaling
//!   exactness (`∫ factor · KDE == count`), inclusive counting and
//!   validation errors.
use tracing::debug;

use crate::{
    catalog::Bounds,
    density::{
        errors::{DensityError, DensityResult},
        kernel::{Bandwidth, GaussianKde},
        lookup::LookupTable,
        quadrature::{integrate, Integral, QuadratureOptions},
    },
};

/// Default number of lookup nodes over the data range.
pub const DEFAULT_GRID_POINTS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DensityMode {
    /// Fit on `[2m − x] ++ [2M − x] ++ [x]`.
    Reflected,
    /// Fit on the values directly.
    Plain,
}

impl std::fmt::Display for DensityMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DensityMode::Reflected => write!(f, "reflected"),
            DensityMode::Plain => write!(f, "plain"),
        }
    }
}

/// `DensityEstimate` — KDE plus range lookup for one column.
///
/// Fields
/// ------
/// - `kde`: the fitted kernel estimate (reflected or plain sample).
/// - `lookup`: linear interpolation of `kde` over `support`.
/// - `support`: `[min, max]` of the original values.
/// - `observations`: original values, sorted, for inclusive window counts.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityEstimate {
    kde: GaussianKde,
    lookup: LookupTable,
    support: Bounds,
    observations: Vec<f64>,
    mode: DensityMode,
}

impl DensityEstimate {
    /// Fit the estimate on `values`.
    ///
    /// `Bandwidth::StdFraction` is resolved against the original values in
    /// both modes.
    ///
    /// # Errors
    /// - [`DensityError::EmptySample`], [`DensityError::NonFiniteSample`] for
    ///   bad values.
    /// - [`DensityError::ZeroSpread`] if every value is equal.
    /// - [`DensityError::InvalidBandwidth`] for a non-positive bandwidth.
    /// - [`DensityError::InvalidGridPoints`] if `grid_points < 2`.
    /// - [`DensityError::NonFiniteDensity`] if tabulation produces NaN or ±∞.
    pub fn build(
        values: &[f64], bandwidth: Bandwidth, mode: DensityMode, grid_points: usize,
    ) -> DensityResult<Self> {
        let first = *values.first().ok_or(DensityError::EmptySample)?;
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(DensityError::NonFiniteSample { index, value });
        }
        if grid_points < 2 {
            return Err(DensityError::InvalidGridPoints { points: grid_points });
        }
        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        let support = Bounds::new(min, max).map_err(|_| DensityError::ZeroSpread { value: first })?;
        let h = bandwidth.resolve(values)?;

        let fit_sample = match mode {
            DensityMode::Plain => values.to_vec(),
            DensityMode::Reflected => {
                let mut out = Vec::with_capacity(3 * values.len());
                out.extend(values.iter().map(|&x| 2.0 * min - x));
                out.extend(values.iter().map(|&x| 2.0 * max - x));
                out.extend_from_slice(values);
                out
            }
        };
        let kde = GaussianKde::fit(fit_sample, h)?;
        let lookup = LookupTable::tabulate(support, grid_points, |x| kde.evaluate(x))?;

        let mut observations = values.to_vec();
        observations.sort_by(f64::total_cmp);

        debug!(%mode, bandwidth = h, n = values.len(), %support, "Fitted density estimate");

        Ok(Self { kde, lookup, support, observations, mode })
    }

    pub fn mode(&self) -> DensityMode {
        self.mode
    }

    pub fn bandwidth(&self) -> f64 {
        self.kde.bandwidth()
    }

    /// `[min, max]` of the original values.
    pub fn support(&self) -> Bounds {
        self.support
    }

    /// Number of original observations.
    pub fn count(&self) -> usize {
        self.observations.len()
    }

    pub fn lookup(&self) -> &LookupTable {
        &self.lookup
    }

    /// Lookup-table value at `x` (clamped outside the support).
    pub fn evaluate(&self, x: f64) -> f64 {
        self.lookup.evaluate(x)
    }

    /// Raw kernel estimate at `x`.
    pub fn evaluate_exact(&self, x: f64) -> f64 {
        self.kde.evaluate(x)
    }

    /// Tabulate the raw estimate on a fresh grid over `window`.
    pub fn tabulate_over(&self, window: Bounds, points: usize) -> DensityResult<LookupTable> {
        LookupTable::tabulate(window, points, |x| self.kde.evaluate(x))
    }

    /// `∫_window KDE`, split at the lookup nodes strictly inside `window`.
    pub fn mass_over(&self, window: &Bounds, quad: &QuadratureOptions) -> DensityResult<Integral> {
        let breakpoints = self.lookup.interior_nodes(window);
        integrate(|x| self.kde.evaluate(x), window, &breakpoints, quad)
    }

    /// `count / ∫_window KDE`.
    ///
    /// # Errors
    /// - Quadrature errors from [`DensityEstimate::mass_over`].
    /// - [`DensityError::DegenerateMass`] if the integral is not strictly
    ///   positive.
    pub fn rescale_factor(&self, window: &Bounds, quad: &QuadratureOptions) -> DensityResult<f64> {
        let mass = self.mass_over(window, quad)?.value;
        if !(mass.is_finite() && mass > 0.0) {
            return Err(DensityError::DegenerateMass { lo: window.lo(), hi: window.hi(), mass });
        }
        let factor = self.count() as f64 / mass;
        debug!(%window, mass, factor, "Computed rescale factor");
        Ok(factor)
    }

    /// Number of original observations inside `bounds` (inclusive).
    pub fn count_within(&self, bounds: &Bounds) -> usize {
        let start = self.observations.partition_point(|&v| v < bounds.lo());
        let end = self.observations.partition_point(|&v| v <= bounds.hi());
        end.saturating_sub(start)
    }
}

/// Fit a [`DensityEstimate`]; see [`DensityEstimate::build`].
pub fn build_density(
    values: &[f64], bandwidth: Bandwidth, mode: DensityMode, grid_points: usize,
) -> DensityResult<DensityEstimate> {
    DensityEstimate::build(values, bandwidth, mode, grid_points)
}
