//! sampling — accept-reject resampling of catalog columns.
//!
//! - [`flatten::flatten`]: thin a column towards a uniform distribution
//!   inside a window, using a reflected KDE and a percentile ceiling.
//! - [`match_pdf::match_pdf`]: thin a column so it follows a target PDF
//!   inside a window, using a plain KDE and a fitted target scale.
//! - [`options`]: [`FlattenOptions`] and the per-column [`BandwidthPolicy`].
//! - [`errors`]: [`ResampleError`], which tags lower-level failures with the
//!   column and bounds being processed.
//!
//! Both samplers take the random generator by `&mut`, draw exactly one
//! uniform number per input row in row order, and return a new catalog
//! holding a subset of the input rows.

pub mod ceiling;
pub mod errors;
pub mod flatten;
pub mod match_pdf;
pub mod options;

pub use self::errors::{ResampleError, ResampleResult};
pub use self::flatten::flatten;
pub use self::match_pdf::match_pdf;
pub use self::options::{BandwidthPolicy, FlattenOptions};
