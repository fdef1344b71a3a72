//! Validation helpers for the scale fit.
//!
//! - **Option checks**: [`verify_tol`], [`verify_max_iter`],
//!   [`verify_grid_points`], [`verify_penalty_weight`].
//! - **Target checks**: [`validate_target_value`] enforces finite,
//!   non-negative target densities on the grid.
//! - **Outcome checks**: [`validate_scale`] ensures the minimizer produced a
//!   finite, non-negative scale.
use crate::optimization::errors::{OptError, OptResult};

/// Validate the relative bracket tolerance.
///
/// # Errors
/// Returns [`OptError::InvalidTolerance`] if `tol` is non-finite, ≤ 0 or ≥ 1.
pub fn verify_tol(tol: f64) -> OptResult<()> {
    if !tol.is_finite() {
        return Err(OptError::InvalidTolerance { tol, reason: "Tolerance must be finite." });
    }
    if tol <= 0.0 || tol >= 1.0 {
        return Err(OptError::InvalidTolerance { tol, reason: "Tolerance must lie in (0, 1)." });
    }
    Ok(())
}

pub fn verify_max_iter(max_iter: usize) -> OptResult<()> {
    if max_iter == 0 {
        return Err(OptError::InvalidMaxIter {
            max_iter,
            reason: "Maximum iterations must be greater than zero.",
        });
    }
    Ok(())
}

pub fn verify_grid_points(points: usize) -> OptResult<()> {
    if points < 2 {
        return Err(OptError::InvalidGridPoints { points });
    }
    Ok(())
}

pub fn verify_penalty_weight(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::InvalidPenaltyWeight { value, reason: "Weight must be finite." });
    }
    if value < 0.0 {
        return Err(OptError::InvalidPenaltyWeight { value, reason: "Weight must be >= 0." });
    }
    Ok(())
}

/// Validate one target density value at grid point `x`.
///
/// # Errors
/// Returns [`OptError::InvalidTargetValue`] for NaN, ±∞ or negative values.
pub fn validate_target_value(x: f64, value: f64) -> OptResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(OptError::InvalidTargetValue { x, value });
    }
    Ok(())
}

/// Validate the minimizer's best parameter.
///
/// # Errors
/// - [`OptError::MissingScale`] if `scale` is `None`.
/// - [`OptError::InvalidScale`] if it is non-finite or negative.
pub fn validate_scale(scale: Option<f64>) -> OptResult<f64> {
    let scale = scale.ok_or(OptError::MissingScale)?;
    if !scale.is_finite() {
        return Err(OptError::InvalidScale { value: scale, reason: "Scale must be finite." });
    }
    if scale < 0.0 {
        return Err(OptError::InvalidScale { value: scale, reason: "Scale must be >= 0." });
    }
    Ok(scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_values_must_be_finite_and_non_negative() {
        assert!(validate_target_value(0.0, 0.0).is_ok());
        assert!(validate_target_value(0.0, 3.5).is_ok());
        assert_eq!(
            validate_target_value(1.5, -1e-12),
            Err(OptError::InvalidTargetValue { x: 1.5, value: -1e-12 })
        );
        assert!(validate_target_value(1.5, f64::NAN).is_err());
        assert!(validate_target_value(1.5, f64::INFINITY).is_err());
    }

    #[test]
    fn tolerance_must_be_a_proper_fraction() {
        assert!(verify_tol(1e-8).is_ok());
        assert!(verify_tol(1.0).is_err());
        assert!(verify_tol(-1e-8).is_err());
    }
}
