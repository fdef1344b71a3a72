//! Tabular catalog container.
//!
//! Purpose
//! -------
//! Hold an in-memory table of records with named `f64` columns and a stable
//! row index, so the samplers can read one column, decide which rows to keep,
//! and hand back an owned copy of the surviving rows.
//!
//! Key behaviors
//! -------------
//! - [`Catalog`] validates its shape at construction (one name per column,
//!   unique names, one index entry per row).
//! - [`Catalog::finite_column`] is the single entry point used by the
//!   samplers: it rejects empty tables and non-finite values so density
//!   construction can assume a clean sample.
//! - [`Catalog::take`] copies the selected rows (in the given order) together
//!   with their original index values.
//!
//! Invariants & assumptions
//! ------------------------
//! - `names.len() == values.ncols()` and `index.len() == values.nrows()`.
//! - Column names are unique.
//! - A `Catalog` is never mutated by this crate; every operation that selects
//!   rows returns a new value.
//!
//! Conventions
//! -----------
//! - Values are stored row-major in an `ndarray::Array2<f64>` of shape
//!   `nrows × ncols`.
//! - Row positions (`0..nrows`) are distinct from row index values; `take`
//!   works on positions and preserves index values.
//!
//! Testing notes
//! -------------
//! - Unit tests cover construction errors, column lookup, and that `take`
//!   returns an independent copy carrying the original index values.
use std::collections::HashSet;

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};

use crate::catalog::errors::{CatalogError, CatalogResult};

/// `Catalog` — validated table of named numeric columns with a row index.
///
/// Fields
/// ------
/// - `index`: `Vec<usize>`
///   Stable identity of each row. Defaults to `0..nrows`.
/// - `names`: `Vec<String>`
///   Column names, unique, one per column of `values`.
/// - `values`: `Array2<f64>`
///   Row-major data, `nrows × ncols`.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    index: Vec<usize>,
    names: Vec<String>,
    values: Array2<f64>,
}

impl Catalog {
    /// Build a catalog with the default index `0..nrows`.
    ///
    /// # Errors
    /// - [`CatalogError::ShapeMismatch`] if `names.len() != values.ncols()`.
    /// - [`CatalogError::DuplicateColumn`] if a name repeats.
    pub fn new(names: Vec<String>, values: Array2<f64>) -> CatalogResult<Self> {
        let index = (0..values.nrows()).collect();
        Self::with_index(index, names, values)
    }

    /// Build a catalog with an explicit row index.
    ///
    /// # Errors
    /// Same as [`Catalog::new`], plus [`CatalogError::IndexLengthMismatch`]
    /// when `index.len() != values.nrows()`.
    pub fn with_index(
        index: Vec<usize>, names: Vec<String>, values: Array2<f64>,
    ) -> CatalogResult<Self> {
        if names.len() != values.ncols() {
            return Err(CatalogError::ShapeMismatch { names: names.len(), columns: values.ncols() });
        }
        if index.len() != values.nrows() {
            return Err(CatalogError::IndexLengthMismatch {
                expected: values.nrows(),
                found: index.len(),
            });
        }
        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(CatalogError::DuplicateColumn { name: name.clone() });
            }
        }
        Ok(Self { index, names, values })
    }

    /// Build a catalog from `(name, values)` pairs of equal length.
    ///
    /// # Errors
    /// - [`CatalogError::ColumnLengthMismatch`] if any column length differs
    ///   from the first column's.
    /// - Any error from [`Catalog::new`].
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<f64>)>) -> CatalogResult<Self> {
        let nrows = columns.first().map_or(0, |(_, col)| col.len());
        let mut names = Vec::with_capacity(columns.len());
        let mut values = Array2::<f64>::zeros((nrows, columns.len()));
        for (j, (name, col)) in columns.into_iter().enumerate() {
            let name = name.into();
            if col.len() != nrows {
                return Err(CatalogError::ColumnLengthMismatch {
                    name,
                    expected: nrows,
                    found: col.len(),
                });
            }
            values.column_mut(j).assign(&ArrayView1::from(&col));
            names.push(name);
        }
        Self::new(names, values)
    }

    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.values.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.values.nrows() == 0
    }

    pub fn index(&self) -> &[usize] {
        &self.index
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// View of a column by name.
    ///
    /// # Errors
    /// [`CatalogError::MissingColumn`] if no column has that name.
    pub fn column(&self, name: &str) -> CatalogResult<ArrayView1<'_, f64>> {
        let j = self
            .names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| CatalogError::MissingColumn { name: name.to_string() })?;
        Ok(self.values.column(j))
    }

    /// View of a column that is guaranteed non-empty and finite.
    ///
    /// # Errors
    /// - [`CatalogError::MissingColumn`] if no column has that name.
    /// - [`CatalogError::EmptyCatalog`] if the table has no rows.
    /// - [`CatalogError::NonFiniteValue`] for the first NaN or ±∞ entry.
    pub fn finite_column(&self, name: &str) -> CatalogResult<ArrayView1<'_, f64>> {
        let col = self.column(name)?;
        if col.is_empty() {
            return Err(CatalogError::EmptyCatalog { column: name.to_string() });
        }
        if let Some((row, &value)) = col.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(CatalogError::NonFiniteValue { column: name.to_string(), row, value });
        }
        Ok(col)
    }

    /// Copy the rows at the given positions, in the given order.
    ///
    /// The result owns its data; the original index values travel with
    /// their rows.
    ///
    /// # Errors
    /// [`CatalogError::RowOutOfRange`] if any position is `>= nrows`.
    pub fn take(&self, rows: &[usize]) -> CatalogResult<Catalog> {
        let nrows = self.nrows();
        if let Some(&row) = rows.iter().find(|&&r| r >= nrows) {
            return Err(CatalogError::RowOutOfRange { row, nrows });
        }
        let index = rows.iter().map(|&r| self.index[r]).collect();
        let values = self.values.select(Axis(0), rows);
        Ok(Catalog { index, names: self.names.clone(), values })
    }
}
