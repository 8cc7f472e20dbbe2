//! Error types for dbframe-core.
//!
//! This module provides structured error types for all dbframe-core operations:
//!
//! - [`enum@Error`] - Main error enum that wraps all error types
//! - [`ConversionError`] - A scanned cell does not have the shape its rule expects
//! - [`MarshalError`] - A semi-structured value cannot be normalized to JSON
//! - [`FlattenError`] - A JSON column cannot be expanded into sub-fields
//! - [`FrameError`] - A value does not fit the field or frame it is written to
//! - [`ConfigError`] - Decode configuration could not be loaded
//!
//! All errors implement `std::error::Error` and can be converted to `anyhow::Error`.

use thiserror::Error;

use crate::schema::FieldType;

/// Main error type for dbframe-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// No type rule matches the column's wire type string
    #[error("Unsupported column type: {type_name}")]
    UnresolvedType { type_name: String },

    /// Cell conversion failed
    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// JSON normalization failed
    #[error("Marshal error: {0}")]
    Marshal(#[from] MarshalError),

    /// Conversion failed for a specific cell of a result set
    #[error("Column '{column}' row {row}: {source}")]
    Cell {
        column: String,
        row: usize,
        #[source]
        source: Box<Error>,
    },

    /// Field flattening failed
    #[error("Flatten error: {0}")]
    Flatten(#[from] FlattenError),

    /// Frame assembly failed
    #[error("Frame error: {0}")]
    Frame(#[from] FrameError),

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The row scanner failed to produce a row
    #[error("Scan error: {0}")]
    Scan(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised when a scanned cell does not match its rule.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// The cell arrived in a different scan shape than the rule requested
    #[error("{rule}: expected {expected} cell, got {actual}")]
    ShapeMismatch {
        rule: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// The decimal converter was handed something that is not a decimal
    #[error("{rule}: invalid decimal - {found}")]
    InvalidDecimal { rule: String, found: String },

    /// The native value does not belong to the rule's kind
    #[error("{rule}: expected {expected} value, got {actual}")]
    KindMismatch {
        rule: String,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Errors raised while normalizing semi-structured values to JSON text.
#[derive(Error, Debug)]
pub enum MarshalError {
    /// The value cannot be represented in JSON
    #[error("cannot represent {value} as JSON")]
    Unrepresentable { value: String },

    /// Serialization or the validating re-parse failed
    #[error("JSON round-trip failed: {0}")]
    RoundTrip(#[from] serde_json::Error),
}

/// Errors raised while flattening a JSON column.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlattenError {
    /// A row could not be parsed into a flat key/value mapping
    #[error("{field}: row {row} is not a JSON object: {reason}")]
    Parse {
        field: String,
        row: usize,
        reason: String,
    },

    /// Row 0 holds a value that has no flat sub-field kind
    #[error("{field}: key '{key}' holds unsupported {found} value")]
    UnsupportedValue {
        field: String,
        key: String,
        found: &'static str,
    },

    /// A sub-field rejected a backfilled value
    #[error("{0}")]
    Frame(#[from] FrameError),
}

/// Errors raised when writing into fields and frames.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    /// Value kind does not match the field type
    #[error("field '{field}' of type {expected} cannot hold a {actual} value")]
    KindMismatch {
        field: String,
        expected: FieldType,
        actual: &'static str,
    },

    /// NULL appended to a non-nullable field
    #[error("field '{field}' of type {expected} is not nullable")]
    NullInNonNullable { field: String, expected: FieldType },

    /// Scanned row has the wrong number of cells
    #[error("row {row} has {actual} cells, expected {expected}")]
    RowArity {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Fields of one frame disagree on row count
    #[error("field '{field}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },
}

/// Errors related to decode configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`crate::config::DecodeConfig`]
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Error {
    /// Attach the column name and row index a cell error belongs to.
    pub fn at_cell(self, column: impl Into<String>, row: usize) -> Self {
        Error::Cell {
            column: column.into(),
            row,
            source: Box::new(self),
        }
    }

    /// Wrap an error raised by a [`crate::scan::RowScanner`] implementation.
    pub fn scan(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::Scan(Box::new(err))
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DataKind;

    #[test]
    fn test_cell_context_display() {
        let err = Error::from(ConversionError::InvalidDecimal {
            rule: "Decimal".to_string(),
            found: "string".to_string(),
        })
        .at_cell("price", 3);

        assert_eq!(
            err.to_string(),
            "Column 'price' row 3: Conversion error: Decimal: invalid decimal - string"
        );
    }

    #[test]
    fn test_frame_error_display() {
        let err = FrameError::NullInNonNullable {
            field: "id".to_string(),
            expected: FieldType::new(DataKind::UInt64),
        };
        assert_eq!(err.to_string(), "field 'id' of type u64 is not nullable");
    }
}
