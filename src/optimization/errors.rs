//! Error surface of the scale fit: option checks, target-domain checks,
//! solver outcome and the Argmin bridge.
use argmin::core::{ArgminError, Error};

use crate::{density::errors::DensityError, errors::ErrorKind};

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- ScaleOptions ----
    /// Relative tolerance needs to be positive and finite.
    InvalidTolerance {
        tol: f64,
        reason: &'static str,
    },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },
    /// Grid needs at least two points.
    InvalidGridPoints {
        points: usize,
    },
    /// Over-prediction penalty weight needs to be finite and non-negative.
    InvalidPenaltyWeight {
        value: f64,
        reason: &'static str,
    },

    // ---- Problem setup ----
    /// No parent observation falls inside the search window.
    EmptySearchWindow {
        lo: f64,
        hi: f64,
    },
    /// Target PDF returned a negative or non-finite value on the grid.
    InvalidTargetValue {
        x: f64,
        value: f64,
    },
    /// Target PDF is zero on every grid point.
    VanishingTarget {
        lo: f64,
        hi: f64,
    },
    /// The search bracket `[0, upper]` is empty or non-finite.
    DegenerateBracket {
        upper: f64,
    },
    /// Parent and target grids differ in length.
    GridMismatch {
        parent: usize,
        target: usize,
    },

    // ---- Cost function ----
    /// Cost function returned a non-finite value.
    NonFiniteCost {
        value: f64,
    },

    // ---- Optimizer outcome ----
    /// Solver stopped without meeting its tolerance.
    NotConverged {
        status: String,
        iterations: usize,
    },
    /// Best scale is missing or invalid.
    InvalidScale {
        value: f64,
        reason: &'static str,
    },
    MissingScale,

    // ---- Density ----
    Density(DensityError),

    // ---- Argmin ----
    /// Argmin rejected the solver setup (bracket, tolerance, start point).
    SolverSetup {
        text: String,
    },
    /// Any other failure surfaced by the Argmin executor.
    Solver {
        text: String,
    },
}

impl OptError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OptError::InvalidTolerance { .. }
            | OptError::InvalidMaxIter { .. }
            | OptError::InvalidGridPoints { .. }
            | OptError::InvalidPenaltyWeight { .. }
            | OptError::EmptySearchWindow { .. }
            | OptError::GridMismatch { .. }
            | OptError::SolverSetup { .. } => ErrorKind::InvalidInput,
            OptError::InvalidTargetValue { .. } | OptError::VanishingTarget { .. } => {
                ErrorKind::DomainViolation
            }
            OptError::Density(err) => err.kind(),
            _ => ErrorKind::NumericalFailure,
        }
    }
}

impl std::error::Error for OptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OptError::Density(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- ScaleOptions ----
            OptError::InvalidTolerance { tol, reason } => {
                write!(f, "Invalid tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::InvalidGridPoints { points } => {
                write!(f, "Invalid grid size {points}: at least 2 points are required")
            }
            OptError::InvalidPenaltyWeight { value, reason } => {
                write!(f, "Invalid penalty weight {value}: {reason}")
            }

            // ---- Problem setup ----
            OptError::EmptySearchWindow { lo, hi } => {
                write!(f, "No parent observations inside the search window [{lo}, {hi}]")
            }
            OptError::InvalidTargetValue { x, value } => {
                write!(f, "Target PDF returned {value} at x = {x}; values must be finite and >= 0")
            }
            OptError::VanishingTarget { lo, hi } => {
                write!(f, "Target PDF is zero on every grid point of [{lo}, {hi}]")
            }
            OptError::DegenerateBracket { upper } => {
                write!(f, "Degenerate search bracket [0, {upper}]")
            }
            OptError::GridMismatch { parent, target } => {
                write!(f, "Parent grid has {parent} points but target grid has {target}")
            }

            // ---- Cost function ----
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite cost value: {value}")
            }

            // ---- Optimizer outcome ----
            OptError::NotConverged { status, iterations } => {
                write!(f, "Scale fit did not converge after {iterations} iterations: {status}")
            }
            OptError::InvalidScale { value, reason } => {
                write!(f, "Invalid fitted scale {value}: {reason}")
            }
            OptError::MissingScale => {
                write!(f, "Missing fitted scale")
            }

            // ---- Density ----
            OptError::Density(err) => write!(f, "{err}"),

            // ---- Argmin ----
            OptError::SolverSetup { text } => write!(f, "Solver rejected its setup: {text}"),
            OptError::Solver { text } => write!(f, "Solver failed: {text}"),
        }
    }
}

impl From<Error> for OptError {
    fn from(err: Error) -> Self {
        // Errors raised by our own cost function travel through argmin boxed.
        let err = match err.downcast::<OptError>() {
            Ok(own) => return own,
            Err(err) => err,
        };
        match err.downcast::<ArgminError>() {
            Ok(ArgminError::InvalidParameter { text }) => OptError::SolverSetup { text },
            Ok(other) => OptError::Solver { text: other.to_string() },
            Err(err) => OptError::Solver { text: err.to_string() },
        }
    }
}

impl From<DensityError> for OptError {
    fn from(err: DensityError) -> Self {
        OptError::Density(err)
    }
}
