//! density — kernel density estimation, tabulation and quadrature.
//!
//! - [`kernel`]: Gaussian KDE and bandwidth rules.
//! - [`lookup`]: piecewise-linear tables over an evenly spaced grid.
//! - [`quadrature`]: adaptive Gauss–Kronrod integration with breakpoints.
//! - [`estimator`]: reflected / plain density over one column, rescaled to
//!   expected counts.
//! - [`errors`]: [`DensityError`] and [`DensityResult`].

pub mod errors;
pub mod estimator;
pub mod kernel;
pub mod lookup;
pub mod quadrature;

pub use self::errors::{DensityError, DensityResult};
pub use self::estimator::{build_density, DensityEstimate, DensityMode, DEFAULT_GRID_POINTS};
pub use self::kernel::{Bandwidth, GaussianKde};
pub use self::lookup::LookupTable;
pub use self::quadrature::{integrate, Integral, QuadratureOptions};
