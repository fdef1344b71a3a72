//! errors — crate-wide classification of failures.
//!
//! Each subtree (`catalog`, `density`, `optimization`, `sampling`) owns its
//! own error enum with payload-rich variants. All of them can be collapsed
//! into one of three [`ErrorKind`]s so callers can decide how to react
//! (fix inputs, adjust numerical settings, or fix the target PDF) without
//! matching on every variant.

/// Broad failure class shared by every error enum in the crate.
///
/// - `InvalidInput`: empty catalog, missing or constant column, malformed
///   bounds, non-positive bandwidth, out-of-range option values.
/// - `NumericalFailure`: non-finite densities, quadrature that does not reach
///   tolerance within its subinterval cap, a minimizer that does not converge.
/// - `DomainViolation`: a target PDF returning negative or non-finite values,
///   or vanishing on the whole evaluation grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    NumericalFailure,
    DomainViolation,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::InvalidInput => write!(f, "invalid input"),
            ErrorKind::NumericalFailure => write!(f, "numerical failure"),
            ErrorKind::DomainViolation => write!(f, "domain violation"),
        }
    }
}
