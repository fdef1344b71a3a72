//! Error surface of the sampling entry points.
//!
//! `ResampleError` wraps failures from the lower layers together with the
//! column name and bounds being processed, so a message like
//! "TEFF on [4000, 7000]: quadrature did not converge" can be reported
//! without extra bookkeeping by the caller.
#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, PyErr};

use crate::{
    catalog::{Bounds, CatalogError},
    density::errors::DensityError,
    errors::ErrorKind,
    optimization::errors::OptError,
};

pub type ResampleResult<T> = Result<T, ResampleError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ResampleError {
    /// Bad table, column or bounds.
    Catalog(CatalogError),
    /// Sampler option out of range.
    InvalidOption {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// Density construction or rescaling failed.
    Density {
        variable: String,
        bounds: Bounds,
        source: DensityError,
    },
    /// Scale fit failed.
    Optimization {
        variable: String,
        bounds: Bounds,
        source: OptError,
    },
}

impl ResampleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResampleError::Catalog(err) => err.kind(),
            ResampleError::InvalidOption { .. } => ErrorKind::InvalidInput,
            ResampleError::Density { source, .. } => source.kind(),
            ResampleError::Optimization { source, .. } => source.kind(),
        }
    }

    pub(crate) fn density(variable: &str, bounds: Bounds) -> impl FnOnce(DensityError) -> Self + '_ {
        move |source| ResampleError::Density { variable: variable.to_string(), bounds, source }
    }

    pub(crate) fn optimization(variable: &str, bounds: Bounds) -> impl FnOnce(OptError) -> Self + '_ {
        move |source| ResampleError::Optimization { variable: variable.to_string(), bounds, source }
    }
}

impl std::error::Error for ResampleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResampleError::Catalog(err) => Some(err),
            ResampleError::InvalidOption { .. } => None,
            ResampleError::Density { source, .. } => Some(source),
            ResampleError::Optimization { source, .. } => Some(source),
        }
    }
}

impl std::fmt::Display for ResampleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResampleError::Catalog(err) => write!(f, "{err}"),
            ResampleError::InvalidOption { name, value, reason } => {
                write!(f, "Resample Error: invalid option {name} = {value}: {reason}")
            }
            ResampleError::Density { variable, bounds, source } => {
                write!(f, "Resample Error: {variable} on {bounds} ({}): {source}", source.kind())
            }
            ResampleError::Optimization { variable, bounds, source } => {
                write!(f, "Resample Error: {variable} on {bounds} ({}): {source}", source.kind())
            }
        }
    }
}

impl From<CatalogError> for ResampleError {
    fn from(err: CatalogError) -> Self {
        ResampleError::Catalog(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<ResampleError> for PyErr {
    fn from(err: ResampleError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
