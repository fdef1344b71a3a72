//! catalog::errors — validation failures for tables and bounds.
//!
//! Every variant here is an input problem: the caller handed over a table
//! or an interval that the resampling pipeline cannot work with. All map to
//! [`ErrorKind::InvalidInput`].

use crate::errors::ErrorKind;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    // ---- Table shape ----
    /// Number of column names does not match the number of value columns.
    ShapeMismatch { names: usize, columns: usize },
    /// A column passed to `from_columns` has a different length than the first.
    ColumnLengthMismatch { name: String, expected: usize, found: usize },
    /// Row index length does not match the number of rows.
    IndexLengthMismatch { expected: usize, found: usize },
    /// Two columns share the same name.
    DuplicateColumn { name: String },

    // ---- Column access ----
    MissingColumn { name: String },
    /// The table has no rows, so the column has no minimum or maximum.
    EmptyCatalog { column: String },
    /// A value in the analysed column is NaN or ±∞.
    NonFiniteValue { column: String, row: usize, value: f64 },
    /// A row position passed to `take` is past the end of the table.
    RowOutOfRange { row: usize, nrows: usize },

    // ---- Bounds ----
    InvalidBounds { lo: f64, hi: f64, reason: &'static str },
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidInput
    }
}

impl std::error::Error for CatalogError {}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::ShapeMismatch { names, columns } => {
                write!(f, "Catalog shape mismatch: {names} column names for {columns} columns")
            }
            CatalogError::ColumnLengthMismatch { name, expected, found } => {
                write!(f, "Column '{name}' has {found} rows, expected {expected}")
            }
            CatalogError::IndexLengthMismatch { expected, found } => {
                write!(f, "Row index length mismatch: expected {expected}, found {found}")
            }
            CatalogError::DuplicateColumn { name } => {
                write!(f, "Duplicate column name '{name}'")
            }
            CatalogError::MissingColumn { name } => {
                write!(f, "Column '{name}' not found in catalog")
            }
            CatalogError::EmptyCatalog { column } => {
                write!(f, "Catalog is empty; column '{column}' has no minimum or maximum")
            }
            CatalogError::NonFiniteValue { column, row, value } => {
                write!(f, "Column '{column}' holds a non-finite value {value} at row {row}")
            }
            CatalogError::RowOutOfRange { row, nrows } => {
                write!(f, "Row position {row} out of range for a catalog of {nrows} rows")
            }
            CatalogError::InvalidBounds { lo, hi, reason } => {
                write!(f, "Invalid bounds [{lo}, {hi}]: {reason}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Bounds errors must carry both endpoints so callers can see what they
    // passed in.
    fn invalid_bounds_display_includes_endpoints() {
        let err = CatalogError::InvalidBounds { lo: 3.5, hi: -1.25, reason: "lo must be < hi" };

        let msg = err.to_string();

        assert!(msg.contains("3.5") && msg.contains("-1.25"), "Got: {msg}");
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn non_finite_value_display_names_column_and_row() {
        let err = CatalogError::NonFiniteValue { column: "FEH".into(), row: 17, value: f64::NAN };

        let msg = err.to_string();

        assert!(msg.contains("FEH") && msg.contains("17"), "Got: {msg}");
    }
}
