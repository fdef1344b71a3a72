//! Adaptive Gauss–Kronrod quadrature over a finite interval.
//!
//! Purpose
//! -------
//! Integrate a density over a window accurately enough to turn it into an
//! expected-count function (`count / ∫ density`). Densities here are either
//! a smooth Gaussian KDE or a piecewise-linear lookup, so the integrator
//! accepts breakpoints: known kinks split the window up front and each piece
//! is refined independently.
//!
//! Key behaviors
//! -------------
//! - Each subinterval is evaluated with the 7-point Gauss / 15-point Kronrod
//!   pair; the error estimate follows the classic QUADPACK `qk15` recipe.
//! - Global adaptive strategy: repeatedly bisect the subinterval with the
//!   largest error estimate until the summed error is below
//!   `max(epsabs, epsrel · |result|)` or the subinterval cap is reached.
//! - Hitting the cap without meeting the tolerance is an error, not a
//!   warning.
//!
//! Invariants & assumptions
//! ------------------------
//! - Breakpoints outside the open window are ignored; duplicates collapse.
//! - The number of initial segments (breakpoints + 1) must not exceed
//!   `limit`.
//!
//! Testing notes
//! -------------
//! - Polynomials up to degree 22 are integrated exactly by one Kronrod
//!   panel; tests use them plus a Gaussian bump and a kinked function to
//!   exercise breakpoints and bisection.
use crate::{
    catalog::Bounds,
    density::errors::{DensityError, DensityResult},
};

const XGK: [f64; 8] = [
    0.991_455_371_120_812_6,
    0.949_107_912_342_758_5,
    0.864_864_423_359_769_1,
    0.741_531_185_599_394_4,
    0.586_087_235_467_691_1,
    0.405_845_151_377_397_2,
    0.207_784_955_007_898_5,
    0.0,
];

const WGK: [f64; 8] = [
    0.022_935_322_010_529_22,
    0.063_092_092_629_978_55,
    0.104_790_010_322_250_18,
    0.140_653_259_715_525_92,
    0.169_004_726_639_267_9,
    0.190_350_578_064_785_4,
    0.204_432_940_075_298_9,
    0.209_482_141_084_727_83,
];

const WG: [f64; 4] = [
    0.129_484_966_168_869_7,
    0.279_705_391_489_276_7,
    0.381_830_050_505_118_9,
    0.417_959_183_673_469_4,
];

/// Tolerances and subinterval cap for [`integrate`].
///
/// Defaults: `epsabs = epsrel = 1.49e-8`, `limit = 200`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureOptions {
    pub epsabs: f64,
    pub epsrel: f64,
    pub limit: usize,
}

impl QuadratureOptions {
    /// Build validated options.
    ///
    /// # Errors
    /// [`DensityError::InvalidQuadratureOption`] if a tolerance is negative or
    /// non-finite, both tolerances are zero, or `limit == 0`.
    pub fn new(epsabs: f64, epsrel: f64, limit: usize) -> DensityResult<Self> {
        let opts = Self { epsabs, epsrel, limit };
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> DensityResult<()> {
        for (name, value) in [("epsabs", self.epsabs), ("epsrel", self.epsrel)] {
            if !value.is_finite() || value < 0.0 {
                return Err(DensityError::InvalidQuadratureOption {
                    name,
                    value,
                    reason: "Tolerance must be finite and >= 0.",
                });
            }
        }
        if self.epsabs == 0.0 && self.epsrel == 0.0 {
            return Err(DensityError::InvalidQuadratureOption {
                name: "epsabs",
                value: 0.0,
                reason: "At least one of epsabs and epsrel must be > 0.",
            });
        }
        if self.limit == 0 {
            return Err(DensityError::InvalidQuadratureOption {
                name: "limit",
                value: 0.0,
                reason: "Subinterval limit must be >= 1.",
            });
        }
        Ok(())
    }
}

impl Default for QuadratureOptions {
    fn default() -> Self {
        Self { epsabs: 1.49e-8, epsrel: 1.49e-8, limit: 200 }
    }
}

/// Result of [`integrate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Integral {
    pub value: f64,
    pub abserr: f64,
    pub subintervals: usize,
}

#[derive(Debug, Clone, Copy)]
struct Panel {
    a: f64,
    b: f64,
    value: f64,
    error: f64,
}

/// Integrate `f` over `window`, splitting first at `breakpoints`.
///
/// # Errors
/// - Any error from [`QuadratureOptions::validate`].
/// - [`DensityError::TooManyBreakpoints`] if the initial segments exceed
///   `opts.limit`.
/// - [`DensityError::NonFiniteDensity`] if a panel evaluates to NaN or ±∞.
/// - [`DensityError::QuadratureDidNotConverge`] if the tolerance is not met
///   within `opts.limit` subintervals.
pub fn integrate<F>(
    f: F, window: &Bounds, breakpoints: &[f64], opts: &QuadratureOptions,
) -> DensityResult<Integral>
where
    F: Fn(f64) -> f64,
{
    opts.validate()?;

    let mut edges: Vec<f64> = Vec::with_capacity(breakpoints.len() + 2);
    edges.push(window.lo());
    let mut inner = window.interior(breakpoints);
    inner.sort_by(f64::total_cmp);
    inner.dedup();
    edges.extend(inner);
    edges.push(window.hi());

    let segments = edges.len() - 1;
    if segments > opts.limit {
        return Err(DensityError::TooManyBreakpoints { segments, limit: opts.limit });
    }

    let mut panels = Vec::with_capacity(opts.limit);
    for pair in edges.windows(2) {
        panels.push(kronrod_panel(&f, pair[0], pair[1])?);
    }

    loop {
        let value: f64 = panels.iter().map(|p| p.value).sum();
        let abserr: f64 = panels.iter().map(|p| p.error).sum();
        let tolerance = opts.epsabs.max(opts.epsrel * value.abs());
        if abserr <= tolerance {
            return Ok(Integral { value, abserr, subintervals: panels.len() });
        }
        if panels.len() >= opts.limit {
            return Err(DensityError::QuadratureDidNotConverge {
                abserr,
                tolerance,
                limit: opts.limit,
            });
        }

        let worst = panels
            .iter()
            .enumerate()
            .max_by(|(_, l), (_, r)| l.error.total_cmp(&r.error))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let Panel { a, b, .. } = panels.swap_remove(worst);
        let mid = 0.5 * (a + b);
        panels.push(kronrod_panel(&f, a, mid)?);
        panels.push(kronrod_panel(&f, mid, b)?);
    }
}

fn kronrod_panel<F>(f: &F, a: f64, b: f64) -> DensityResult<Panel>
where
    F: Fn(f64) -> f64,
{
    let center = 0.5 * (a + b);
    let half = 0.5 * (b - a);
    let abs_half = half.abs();

    let fc = f(center);
    let mut res_gauss = fc * WG[3];
    let mut res_kronrod = fc * WGK[7];
    let mut res_abs = res_kronrod.abs();
    let mut fv1 = [0.0; 7];
    let mut fv2 = [0.0; 7];

    for j in 0..7 {
        let absc = half * XGK[j];
        let f1 = f(center - absc);
        let f2 = f(center + absc);
        fv1[j] = f1;
        fv2[j] = f2;
        let sum = f1 + f2;
        res_kronrod += WGK[j] * sum;
        res_abs += WGK[j] * (f1.abs() + f2.abs());
        // Odd Kronrod nodes are the Gauss nodes.
        if j % 2 == 1 {
            res_gauss += WG[j / 2] * sum;
        }
    }

    let mean = 0.5 * res_kronrod;
    let mut res_asc = WGK[7] * (fc - mean).abs();
    for j in 0..7 {
        res_asc += WGK[j] * ((fv1[j] - mean).abs() + (fv2[j] - mean).abs());
    }

    let value = res_kronrod * half;
    res_abs *= abs_half;
    res_asc *= abs_half;
    let mut error = ((res_kronrod - res_gauss) * half).abs();
    if res_asc != 0.0 && error != 0.0 {
        error = res_asc * (200.0 * error / res_asc).powf(1.5).min(1.0);
    }
    if res_abs > f64::MIN_POSITIVE / (50.0 * f64::EPSILON) {
        error = error.max(50.0 * f64::EPSILON * res_abs);
    }

    if !value.is_finite() || !error.is_finite() {
        return Err(DensityError::NonFiniteDensity { x: center, value });
    }
    Ok(Panel { a, b, value, error })
}
