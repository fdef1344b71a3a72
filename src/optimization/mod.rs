//! optimization — scale fitting and its error surface.
//!
//! Purpose
//! -------
//! Provide the optimization layer used by PDF matching: an Argmin-backed
//! one-dimensional fit of a target PDF's scale against a parent density,
//! plus a single error/result surface for configuration, domain and solver
//! failures.
//!
//! Key behaviors
//! -------------
//! - Expose [`scale_fit::fit_scale`] with its options and outcome types.
//! - Normalize configuration issues, target-domain violations, numerical
//!   failures and backend solver errors into [`errors::OptError`] with the
//!   alias [`errors::OptResult`].
//!
//! Conventions
//! -----------
//! - Public entrypoints that can fail return `OptResult<T>`; callers never
//!   see raw Argmin errors.
//! - Progress is reported through `tracing` events; the optional `obs_slog`
//!   feature adds Argmin's terminal observer.

pub mod errors;
pub mod scale_fit;

pub use self::errors::{OptError, OptResult};
