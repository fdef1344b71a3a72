//! catalog_resample — density-based resampling of tabular catalogs.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the samplers to Python via the `_catalog_resample` extension
//! module. The crate thins a catalog so that one column either becomes
//! approximately uniform inside a window ([`sampling::flatten`]) or follows
//! a caller-supplied PDF inside a window ([`sampling::match_pdf`]).
//!
//! Key behaviors
//! -------------
//! - Re-export the core modules: [`catalog`] (table, bounds), [`density`]
//!   (KDE, lookup tables, quadrature), [`optimization`] (target scale fit),
//!   [`sampling`] (the two accept-reject samplers) and [`errors`].
//! - When `python-bindings` is enabled, define `uniform_kde_sample`,
//!   `determine_scale` and `sample_pdf` on 1-D float arrays and register
//!   them in the `_catalog_resample` module.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; the bindings only
//!   convert inputs, pick defaults and map errors.
//! - Randomness always comes from a caller-owned generator; the bindings
//!   seed a `StdRng` from `seed` or from the OS.
//!
//! Conventions
//! -----------
//! - Python functions return row positions into the input array, not
//!   values; callers index their own DataFrame with them.
//! - Errors from core Rust code are converted to `ValueError` at the PyO3
//!   boundary; an exception raised by a Python target PDF is re-raised
//!   unchanged.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by
//!   `tests/integration_resample_pipeline.rs`.

pub mod catalog;
pub mod density;
pub mod errors;
pub mod optimization;
pub mod sampling;
pub mod utils;

pub use crate::{
    catalog::{Bounds, Catalog},
    density::{build_density, Bandwidth, DensityEstimate, DensityMode},
    errors::ErrorKind,
    optimization::scale_fit::{fit_scale, ScaleOptions, ScaleOutcome, TargetPdf},
    sampling::{flatten, match_pdf, BandwidthPolicy, FlattenOptions, ResampleError},
};

#[cfg(feature = "python-bindings")]
use std::cell::RefCell;

#[cfg(feature = "python-bindings")]
use pyo3::{
    prelude::*,
    types::{PyAny, PyTuple},
};

#[cfg(feature = "python-bindings")]
use crate::{
    density::DEFAULT_GRID_POINTS,
    sampling::{errors::ResampleResult, match_pdf::PARENT_STD_DIVISOR},
    utils::{extract_column, rng_from_seed},
};

/// Column name used when the caller does not name the variable.
#[cfg(feature = "python-bindings")]
const DEFAULT_VARIABLE: &str = "values";

/// Python callable adapted to [`TargetPdf`].
///
/// The callable is invoked as `pdf_fun(x, *params)`. A raised exception or a
/// return value that is not a float yields `NaN` (reported as a domain
/// violation by the samplers); the first exception is kept so the bindings
/// can re-raise it.
#[cfg(feature = "python-bindings")]
struct PyTarget<'py> {
    fun: Bound<'py, PyAny>,
    error: RefCell<Option<PyErr>>,
}

#[cfg(feature = "python-bindings")]
impl<'py> PyTarget<'py> {
    fn new(fun: &Bound<'py, PyAny>) -> Self {
        Self { fun: fun.clone(), error: RefCell::new(None) }
    }

    fn call(&self, x: f64, params: &[f64]) -> PyResult<f64> {
        let mut args = Vec::with_capacity(params.len() + 1);
        args.push(x);
        args.extend_from_slice(params);
        let tuple = PyTuple::new(self.fun.py(), args)?;
        self.fun.call1(tuple)?.extract::<f64>()
    }

    /// Prefer the Python exception raised by the target over the crate error
    /// it caused.
    fn resolve<T>(&self, result: ResampleResult<T>) -> PyResult<T> {
        match (result, self.error.borrow_mut().take()) {
            (Ok(value), _) => Ok(value),
            (Err(_), Some(py_err)) => Err(py_err),
            (Err(err), None) => Err(err.into()),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl TargetPdf for PyTarget<'_> {
    fn density(&self, x: f64, params: &[f64]) -> f64 {
        match self.call(x, params) {
            Ok(value) => value,
            Err(err) => {
                let mut slot = self.error.borrow_mut();
                if slot.is_none() {
                    *slot = Some(err);
                }
                f64::NAN
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
fn single_column(raw_data: &Bound<'_, PyAny>, variable: &str) -> PyResult<Catalog> {
    let data = extract_column(raw_data)?;
    Ok(Catalog::from_columns(vec![(variable, data)]).map_err(ResampleError::from)?)
}

#[cfg(feature = "python-bindings")]
fn to_bounds(bounds: (f64, f64)) -> PyResult<Bounds> {
    Ok(Bounds::try_from(bounds).map_err(ResampleError::from)?)
}

/// uniform_kde_sample — flatten a column towards a uniform distribution.
///
/// Parameters
/// ----------
/// - `data`: 1-D array-like of finite floats.
/// - `bounds`: `(lo, hi)` window over which the ceiling is computed.
/// - `variable`: column name; `"TEFF"` selects the wide default bandwidth.
/// - `p_scale`: acceptance percentile as a fraction, default `0.7`.
/// - `bandwidth`: fixed kernel width overriding the per-column default.
/// - `seed`: optional seed for reproducible draws.
///
/// Returns
/// -------
/// `list[int]`
///   Positions of the retained rows, already shuffled.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (data, bounds, variable = None, p_scale = 0.7, bandwidth = None, seed = None))]
pub fn uniform_kde_sample<'py>(
    data: &Bound<'py, PyAny>, bounds: (f64, f64), variable: Option<&str>,
    p_scale: f64, bandwidth: Option<f64>, seed: Option<u64>,
) -> PyResult<Vec<usize>> {
    let variable = variable.unwrap_or(DEFAULT_VARIABLE);
    let catalog = single_column(data, variable)?;
    let bounds = to_bounds(bounds)?;
    let policy = match bandwidth {
        Some(h) => BandwidthPolicy::uniform(h)?,
        None => BandwidthPolicy::default(),
    };
    let opts = FlattenOptions { percentile: p_scale, bandwidth: policy, ..FlattenOptions::default() };
    let mut rng = rng_from_seed(seed);

    let sample = flatten(&catalog, variable, bounds, &opts, &mut rng)?;
    Ok(sample.index().to_vec())
}

/// determine_scale — fit the scale of `pdf_fun` against the sample.
///
/// Parameters
/// ----------
/// - `data`: 1-D array-like of finite floats (the parent sample).
/// - `pdf_fun`: callable `pdf_fun(x, *params) -> float`.
/// - `params`: extra positional arguments for `pdf_fun`.
/// - `bounds`: `(lo, hi)` search window.
///
/// Returns
/// -------
/// `(scale, x0, status)`
///   Fitted scale, the starting point and the solver's termination status.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (data, pdf_fun, params, bounds))]
pub fn determine_scale<'py>(
    data: &Bound<'py, PyAny>, pdf_fun: &Bound<'py, PyAny>, params: Vec<f64>,
    bounds: (f64, f64),
) -> PyResult<(f64, f64, String)> {
    let catalog = single_column(data, DEFAULT_VARIABLE)?;
    let bounds = to_bounds(bounds)?;
    let target = PyTarget::new(pdf_fun);

    let result = (|| -> ResampleResult<ScaleOutcome> {
        let values = catalog.finite_column(DEFAULT_VARIABLE)?.to_vec();
        let density = build_density(
            &values,
            Bandwidth::StdFraction(PARENT_STD_DIVISOR),
            DensityMode::Plain,
            DEFAULT_GRID_POINTS,
        )
        .map_err(ResampleError::density(DEFAULT_VARIABLE, bounds))?;
        let (outcome, _) =
            fit_scale(&density, &target, &params, bounds, &ScaleOptions::default())
                .map_err(ResampleError::optimization(DEFAULT_VARIABLE, bounds))?;
        Ok(outcome)
    })();

    let outcome = target.resolve(result)?;
    Ok((outcome.scale, outcome.x0, outcome.status))
}

/// sample_pdf — resample the data so it follows `pdf_fun` inside `bounds`.
///
/// Parameters
/// ----------
/// - `data`: 1-D array-like of finite floats.
/// - `pdf_fun`: callable `pdf_fun(x, *params) -> float`.
/// - `params`: extra positional arguments for `pdf_fun`.
/// - `bounds`: `(lo, hi)` window; rows outside it are never kept.
/// - `seed`: optional seed for reproducible draws.
///
/// Returns
/// -------
/// `list[int]`
///   Positions of the retained rows, in input order.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (data, pdf_fun, params, bounds, seed = None))]
pub fn sample_pdf<'py>(
    data: &Bound<'py, PyAny>, pdf_fun: &Bound<'py, PyAny>, params: Vec<f64>,
    bounds: (f64, f64), seed: Option<u64>,
) -> PyResult<Vec<usize>> {
    let catalog = single_column(data, DEFAULT_VARIABLE)?;
    let bounds = to_bounds(bounds)?;
    let target = PyTarget::new(pdf_fun);
    let mut rng = rng_from_seed(seed);

    let result = match_pdf(
        &catalog,
        DEFAULT_VARIABLE,
        &target,
        &params,
        bounds,
        &ScaleOptions::default(),
        &mut rng,
    );
    let sample = target.resolve(result)?;
    Ok(sample.index().to_vec())
}

/// _catalog_resample — PyO3 module initializer for the Python extension.
///
/// Registers `uniform_kde_sample`, `determine_scale` and `sample_pdf`.
///
/// Errors
/// ------
/// - `PyErr`
///   If registering a function fails.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _catalog_resample<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(uniform_kde_sample, m)?)?;
    m.add_function(wrap_pyfunction!(determine_scale, m)?)?;
    m.add_function(wrap_pyfunction!(sample_pdf, m)?)?;
    Ok(())
}
