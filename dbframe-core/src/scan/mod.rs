//! Interface to the row-scanning layer.
//!
//! The scanning layer owns the connection and the wire protocol. It reports
//! each column's name and raw type string, and for every row produces one
//! [`Cell`] per column in the [`ScanType`] the column's rule asked for.

mod cell;

pub use cell::{Cell, NativeKind, Scalar, ScanShape, ScanType};

use crate::error::Result;

/// A result-set column as reported by the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Column name
    pub name: String,
    /// Wire type string (e.g. "Nullable(Decimal(15,3))")
    pub type_name: String,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Source of scanned rows.
pub trait RowScanner {
    /// Columns of the result set, in order.
    fn columns(&self) -> &[ColumnInfo];

    /// Scan the next row.
    ///
    /// `scan_types[i]` is the shape requested for column `i`, or `None` when
    /// the column's type is unrecognized and any shape is accepted.
    /// Returns `Ok(None)` once the result set is exhausted.
    fn next_row(&mut self, scan_types: &[Option<ScanType>]) -> Result<Option<Vec<Cell>>>;
}
