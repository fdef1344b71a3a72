//! Unified error handling for density estimation.
//!
//! `DensityError` covers the kernel fit (sample and bandwidth validation),
//! grid tabulation, and the adaptive quadrature used to normalize a density
//! into counts. Input problems and numerical failures are kept in separate
//! variants so [`DensityError::kind`] can classify them.

use crate::errors::ErrorKind;

pub type DensityResult<T> = Result<T, DensityError>;

#[derive(Debug, Clone, PartialEq)]
pub enum DensityError {
    // ---- Sample ----
    EmptySample,
    NonFiniteSample {
        index: usize,
        value: f64,
    },
    /// All observations are equal (or have zero standard deviation), so no
    /// support interval or data-driven bandwidth exists.
    ZeroSpread {
        value: f64,
    },

    // ---- Bandwidth ----
    InvalidBandwidth {
        value: f64,
        reason: &'static str,
    },

    // ---- Grid ----
    InvalidGridPoints {
        points: usize,
    },

    // ---- Quadrature configuration ----
    InvalidQuadratureOption {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// More initial segments (from breakpoints) than the subinterval cap.
    TooManyBreakpoints {
        segments: usize,
        limit: usize,
    },

    // ---- Numerical ----
    NonFiniteDensity {
        x: f64,
        value: f64,
    },
    QuadratureDidNotConverge {
        abserr: f64,
        tolerance: f64,
        limit: usize,
    },
    /// The density integrates to zero (or a non-finite value) over the
    /// requested window, so it cannot be rescaled to counts.
    DegenerateMass {
        lo: f64,
        hi: f64,
        mass: f64,
    },
}

impl DensityError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DensityError::NonFiniteDensity { .. }
            | DensityError::QuadratureDidNotConverge { .. }
            | DensityError::DegenerateMass { .. } => ErrorKind::NumericalFailure,
            _ => ErrorKind::InvalidInput,
        }
    }
}

impl std::error::Error for DensityError {}

impl std::fmt::Display for DensityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Sample ----
            DensityError::EmptySample => write!(f, "Density Error: sample is empty"),
            DensityError::NonFiniteSample { index, value } => {
                write!(f, "Density Error: non-finite sample value {value} at index {index}")
            }
            DensityError::ZeroSpread { value } => {
                write!(f, "Density Error: every observation equals {value}; zero spread")
            }

            // ---- Bandwidth ----
            DensityError::InvalidBandwidth { value, reason } => {
                write!(f, "Density Error: invalid bandwidth {value}: {reason}")
            }

            // ---- Grid ----
            DensityError::InvalidGridPoints { points } => {
                write!(f, "Density Error: grid needs at least 2 points, got {points}")
            }

            // ---- Quadrature configuration ----
            DensityError::InvalidQuadratureOption { name, value, reason } => {
                write!(f, "Density Error: invalid quadrature option {name} = {value}: {reason}")
            }
            DensityError::TooManyBreakpoints { segments, limit } => write!(
                f,
                "Density Error: {segments} initial segments exceed the subinterval limit {limit}"
            ),

            // ---- Numerical ----
            DensityError::NonFiniteDensity { x, value } => {
                write!(f, "Density Error: density evaluated to {value} at x = {x}")
            }
            DensityError::QuadratureDidNotConverge { abserr, tolerance, limit } => write!(
                f,
                "Density Error: quadrature error estimate {abserr:e} above tolerance \
                 {tolerance:e} after {limit} subintervals"
            ),
            DensityError::DegenerateMass { lo, hi, mass } => {
                write!(f, "Density Error: density mass over [{lo}, {hi}] is {mass}")
            }
        }
    }
}
