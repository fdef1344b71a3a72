//! Integration tests for the resampling pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end path from a raw catalog column, through the
//!   density estimate and the target scale fit, to the two accept-reject
//!   samplers.
//! - Exercise realistic sample sizes (thousands of rows) and shapes (a
//!   ramp that should be flattened, a uniform parent that should become
//!   bell-shaped) rather than toy inputs only.
//!
//! Coverage
//! --------
//! - `density`:
//!   - `build_density` in plain mode and the rescale factor that turns the
//!     KDE into expected counts over a window.
//! - `optimization::scale_fit`:
//!   - `fit_scale` recovering the known scale of a proportional target.
//! - `sampling`:
//!   - `flatten` on a linear ramp and on a narrow window.
//!   - `match_pdf` with a Gaussian target built from `statrs`.
//!   - Determinism under a fixed seed and the subset property.
//!
//! Exclusions
//! ----------
//! - Option validation and error classification, covered by unit tests.
//! - Python bindings, which need an interpreter.
use std::collections::HashSet;

use catalog_resample::{
    catalog::{Bounds, Catalog},
    density::{
        build_density, integrate, Bandwidth, DensityMode, QuadratureOptions, DEFAULT_GRID_POINTS,
    },
    optimization::scale_fit::{fit_scale, ScaleOptions},
    sampling::{flatten, match_pdf, FlattenOptions},
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use statrs::distribution::{Continuous, ContinuousCDF, Normal};

/// Purpose
/// -------
/// Build a single-column catalog named `"x"` from a deterministic draw.
///
/// Parameters
/// ----------
/// - `n`: Number of rows.
/// - `seed`: Seed of the generator feeding `draw`.
/// - `draw`: Maps one `U[0, 1)` variate to a value of `x`.
///
/// Invariants
/// ----------
/// - Panics if `Catalog::from_columns` rejects the values; `draw` is
///   expected to return finite numbers.
fn make_catalog(n: usize, seed: u64, draw: impl Fn(f64) -> f64) -> Catalog {
    let mut rng = StdRng::seed_from_u64(seed);
    let x: Vec<f64> = (0..n).map(|_| draw(rng.random::<f64>())).collect();
    Catalog::from_columns(vec![("x", x)]).expect("finite column should build a catalog")
}

/// Purpose
/// -------
/// Coefficient of variation of equal-width histogram counts over `bounds`.
///
/// Values outside `bounds` are ignored; the upper edge falls in the last bin.
fn histogram_cv(values: &[f64], bounds: Bounds, bins: usize) -> f64 {
    let mut counts = vec![0.0_f64; bins];
    for &x in values.iter().filter(|&&x| bounds.contains(x)) {
        let pos = ((x - bounds.lo()) / bounds.width() * bins as f64) as usize;
        counts[pos.min(bins - 1)] += 1.0;
    }
    let mean = counts.iter().sum::<f64>() / bins as f64;
    let var = counts.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / bins as f64;
    var.sqrt() / mean
}

/// Gaussian target `N(params[0], params[1])`; `NaN` for an invalid sigma.
fn normal_pdf(x: f64, params: &[f64]) -> f64 {
    Normal::new(params[0], params[1]).map(|dist| dist.pdf(x)).unwrap_or(f64::NAN)
}

#[test]
// Purpose
// -------
// Flattening a linear ramp should make the column visibly more uniform.
//
// Given
// -----
// - 10 000 rows with `x = 10·√u`, i.e. density rising linearly on [0, 10].
// - Bounds (0, 10); default `FlattenOptions` (bandwidth 0.15, 70 %) and
//   the same options with a 30 % ceiling.
//
// Expect
// ------
// - Some rows are dropped and some survive.
// - The coefficient of variation of 10-bin counts drops at 70 % and drops
//   by at least a quarter at 30 %, where most of the ramp is clipped.
fn flatten_reduces_histogram_spread_on_a_ramp() {
    let cat = make_catalog(10_000, 11, |u| 10.0 * u.sqrt());
    let bounds = Bounds::new(0.0, 10.0).expect("valid bounds");
    let low = FlattenOptions { percentile: 0.3, ..FlattenOptions::default() };
    let before = histogram_cv(&cat.column("x").unwrap().to_vec(), bounds, 10);

    let default_out =
        flatten(&cat, "x", bounds, &FlattenOptions::default(), &mut StdRng::seed_from_u64(1))
            .expect("flatten should succeed on a smooth ramp");
    let low_out = flatten(&cat, "x", bounds, &low, &mut StdRng::seed_from_u64(1))
        .expect("flatten should succeed with a low ceiling");

    let after_default = histogram_cv(&default_out.column("x").unwrap().to_vec(), bounds, 10);
    let after_low = histogram_cv(&low_out.column("x").unwrap().to_vec(), bounds, 10);
    assert!(default_out.nrows() > 0 && default_out.nrows() < cat.nrows());
    assert!(low_out.nrows() < default_out.nrows());
    assert!(after_default < before, "cv before {before:.3}, after {after_default:.3}");
    assert!(after_low < 0.75 * before, "cv before {before:.3}, after {after_low:.3}");
}

#[test]
// Purpose
// -------
// Matching a uniform parent to a Gaussian target should keep the centre
// dense and thin the shoulders, never keeping rows outside the bounds.
//
// Given
// -----
// - 6 000 rows uniform on [-3, 3].
// - Target `N(0, 1)` from `statrs`, bounds [-2, 2], default `ScaleOptions`.
//
// Expect
// ------
// - Every kept row lies in [-2, 2].
// - More rows survive in |x| < 0.5 than in 1.5 < |x| < 2.
// - Kept rows appear in input order.
fn match_pdf_shapes_a_uniform_parent_into_a_bell() {
    let cat = make_catalog(6_000, 12, |u| -3.0 + 6.0 * u);
    let bounds = Bounds::new(-2.0, 2.0).expect("valid bounds");

    let out = match_pdf(
        &cat,
        "x",
        &normal_pdf,
        &[0.0, 1.0],
        bounds,
        &ScaleOptions::default(),
        &mut StdRng::seed_from_u64(2),
    )
    .expect("match_pdf should succeed for a positive target");

    let kept = out.column("x").unwrap();
    let centre = kept.iter().filter(|x| x.abs() < 0.5).count();
    let shoulder = kept.iter().filter(|x| (1.5..2.0).contains(&x.abs())).count();
    assert!(kept.iter().all(|&x| bounds.contains(x)));
    assert!(centre > shoulder, "centre {centre}, shoulder {shoulder}");
    assert!(out.index().windows(2).all(|w| w[0] < w[1]));
}

#[test]
// Purpose
// -------
// A window much narrower than the data must still produce a usable
// ceiling and envelope.
//
// Given
// -----
// - 4 000 rows uniform on [-3, 3].
// - Bounds [0.1, 0.3] for both samplers.
//
// Expect
// ------
// - `flatten` keeps a non-empty subset.
// - `match_pdf` keeps only rows inside the window.
fn narrow_bounds_are_supported() {
    let cat = make_catalog(4_000, 13, |u| -3.0 + 6.0 * u);
    let bounds = Bounds::new(0.1, 0.3).expect("valid bounds");
    let mut rng = StdRng::seed_from_u64(3);

    let flat = flatten(&cat, "x", bounds, &FlattenOptions::default(), &mut rng)
        .expect("flatten should succeed on a narrow window");
    let matched = match_pdf(
        &cat,
        "x",
        &normal_pdf,
        &[0.2, 0.5],
        bounds,
        &ScaleOptions::default(),
        &mut rng,
    )
    .expect("match_pdf should succeed on a narrow window");

    assert!(flat.nrows() > 0);
    assert!(matched.column("x").unwrap().iter().all(|&x| bounds.contains(x)));
}

#[test]
// Purpose
// -------
// Both samplers are pure functions of (catalog, options, seed) and only
// ever return distinct input rows with their original values.
//
// Given
// -----
// - 3 000 rows with a ramp shape, run twice per sampler with seed 7.
//
// Expect
// ------
// - Identical index sequences across runs.
// - Indices are unique and map back to the same input values.
fn samplers_are_deterministic_subsets() {
    let cat = make_catalog(3_000, 14, |u| 10.0 * u.sqrt());
    let bounds = Bounds::new(2.0, 9.0).expect("valid bounds");
    let flat_opts = FlattenOptions::default();
    let scale_opts = ScaleOptions::default();
    let params = [5.0, 2.0];

    let runs: Vec<(Catalog, Catalog)> = (0..2)
        .map(|_| {
            let flat = flatten(&cat, "x", bounds, &flat_opts, &mut StdRng::seed_from_u64(7))
                .expect("flatten should succeed");
            let matched = match_pdf(
                &cat,
                "x",
                &normal_pdf,
                &params,
                bounds,
                &scale_opts,
                &mut StdRng::seed_from_u64(7),
            )
            .expect("match_pdf should succeed");
            (flat, matched)
        })
        .collect();

    assert_eq!(runs[0].0.index(), runs[1].0.index());
    assert_eq!(runs[0].1.index(), runs[1].1.index());
    let original = cat.column("x").unwrap();
    for out in [&runs[0].0, &runs[0].1] {
        let unique: HashSet<usize> = out.index().iter().copied().collect();
        assert_eq!(unique.len(), out.nrows());
        let kept = out.column("x").unwrap();
        for (pos, &idx) in out.index().iter().enumerate() {
            assert_eq!(kept[pos], original[idx]);
        }
    }
}

#[test]
// Purpose
// -------
// The rescale factor turns the KDE into expected counts: integrating the
// rescaled density over a window returns the number of rows inside it.
//
// Given
// -----
// - 5 000 draws from `N(0, 1)` (inverse CDF from `statrs`), plain KDE
//   with `σ / 3`.
// - Windows [-1, 1] and [0.5, 2.5].
//
// Expect
// ------
// - `factor · ∫_window KDE ≈ count_within(window)` to 1e-3 relative.
fn rescaled_density_integrates_to_the_window_count() {
    let normal = Normal::new(0.0, 1.0).unwrap();
    let cat = make_catalog(5_000, 15, |u| normal.inverse_cdf(u.max(1e-12)));
    let values = cat.column("x").unwrap().to_vec();
    let density =
        build_density(&values, Bandwidth::StdFraction(3.0), DensityMode::Plain, DEFAULT_GRID_POINTS)
            .expect("density should build");
    let quad = QuadratureOptions::default();

    for (lo, hi) in [(-1.0, 1.0), (0.5, 2.5)] {
        let window = Bounds::new(lo, hi).unwrap();
        let factor = density.rescale_factor(&window, &quad).expect("positive mass");
        let mass = density.mass_over(&window, &quad).expect("quadrature converges").value;
        let count = density.count_within(&window) as f64;

        assert!(((factor * mass) - count).abs() <= 1e-3 * count, "window {window}");
    }
}

#[test]
// Purpose
// -------
// When the target is an exact multiple of the parent's lookup density, the
// fitted scale is the count factor divided by that multiple.
//
// Given
// -----
// - 4 000 rows uniform on [0, 4], plain KDE.
// - Target `t(x) = 2 · KDE(x)` (raw estimate), window [1, 3].
//
// Expect
// ------
// - Convergence, with `scale ≈ factor / 2` to 1e-5 relative.
// - The returned count density integrates to the window count.
fn fit_scale_recovers_a_proportional_target() {
    let cat = make_catalog(4_000, 16, |u| 4.0 * u);
    let values = cat.column("x").unwrap().to_vec();
    let density =
        build_density(&values, Bandwidth::StdFraction(3.0), DensityMode::Plain, DEFAULT_GRID_POINTS)
            .expect("density should build");
    let window = Bounds::new(1.0, 3.0).unwrap();
    let target = |x: f64, _: &[f64]| 2.0 * density.evaluate_exact(x);

    let (outcome, counts) = fit_scale(&density, &target, &[], window, &ScaleOptions::default())
        .expect("fit should converge");

    let breakpoints = counts.lookup().interior_nodes(&window);
    let mass = integrate(|x| counts.evaluate(x), &window, &breakpoints, &QuadratureOptions::default())
        .expect("quadrature converges")
        .value;
    let expected = counts.factor() / 2.0;
    assert_eq!(counts.window(), window);
    assert!((mass - counts.count() as f64).abs() <= 1e-6 * counts.count() as f64);
    assert!(outcome.converged);
    assert!((outcome.scale - expected).abs() <= 1e-5 * expected, "{} vs {expected}", outcome.scale);
}
