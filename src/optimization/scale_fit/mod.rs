//! scale_fit — argmin-powered fit of a target PDF's scale to a parent density.
//!
//! Purpose
//! -------
//! Find the non-negative scale `s` that makes `s · target(x)` track the
//! parent sample's expected-count density over a search window, so that a
//! rejection sampler can use `s · target` as the acceptance envelope.
//! Callers pass any [`TargetPdf`] (closures included) and invoke
//! [`fit_scale`].
//!
//! Key behaviors
//! -------------
//! - Rescale the parent KDE into expected counts over the window
//!   ([`count_density::CountDensity`]).
//! - Evaluate a penalized L1 objective ([`objective::ScaleObjective`]) that
//!   weights overshooting grid points by `1 + w`.
//! - Minimize with golden-section search ([`run::run_golden_section`]) seeded
//!   at the median count/target ratio, and normalize the final state into a
//!   [`ScaleOutcome`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Target values on the grid are finite and non-negative, and not all
//!   zero; violations are reported as domain errors, never clamped.
//! - The returned scale is finite and `>= 0`.
//! - An outcome is only returned when the solver met its tolerance; hitting
//!   the iteration cap is an error.
//!
//! Conventions
//! -----------
//! - Grids are evenly spaced and include both window endpoints.
//! - Configuration ([`ScaleOptions`], [`Tolerances`]) is validated on
//!   construction and again on entry to [`fit_scale`].
//!
//! Testing notes
//! -------------
//! - Unit tests cover the objective's penalty, option validation, solver
//!   termination mapping, exact recovery on proportional targets and
//!   domain errors for negative, NaN and vanishing targets.

pub mod api;
pub mod count_density;
pub mod objective;
pub mod run;
pub mod traits;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::fit_scale;
pub use self::count_density::CountDensity;
pub use self::traits::{ScaleOptions, ScaleOutcome, TargetPdf, Tolerances};
