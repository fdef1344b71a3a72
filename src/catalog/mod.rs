//! catalog — tabular input/output and evaluation windows.
//!
//! - [`data::Catalog`]: named numeric columns plus a stable row index.
//! - [`bounds::Bounds`]: validated closed interval `[lo, hi]`.
//! - [`errors::CatalogError`]: shape, lookup and bounds failures.

pub mod bounds;
pub mod data;
pub mod errors;

pub use self::bounds::Bounds;
pub use self::data::Catalog;
pub use self::errors::{CatalogError, CatalogResult};
