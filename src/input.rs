//! JSON result documents.
//!
//! A result document carries one result set as the source reported it:
//!
//! ```json
//! {
//!   "name": "logs",
//!   "visualization": "logs",
//!   "columns": [
//!     {"name": "ts", "type": "DateTime"},
//!     {"name": "attrs", "type": "Map(String, String)"}
//!   ],
//!   "rows": [["2024-05-01T12:00:00Z", {"level": "info"}]]
//! }
//! ```
//!
//! [`JsonRowScanner`] scans its rows into cells of the shape each column's
//! rule asks for.

use std::io::Read;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use dbframe_core::scan::{Cell, ColumnInfo, NativeKind, RowScanner, Scalar, ScanShape, ScanType};
use dbframe_core::{FrameMeta, Visualization};

const DEFAULT_FRAME_NAME: &str = "result";

/// Errors raised while reading a result document.
#[derive(Error, Debug)]
pub enum InputError {
    /// The document is not valid JSON of the expected layout
    #[error("invalid result document: {0}")]
    Document(#[from] serde_json::Error),

    /// A row has the wrong number of cells
    #[error("row {row} has {actual} cells, expected {expected}")]
    RowArity {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A cell cannot be read as the native kind its column asks for
    #[error("column '{column}' row {row}: expected {expected}, found {found}")]
    InvalidCell {
        column: String,
        row: usize,
        expected: NativeKind,
        found: String,
    },
}

/// Column as declared in a result document.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// One result set in JSON form.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultDocument {
    #[serde(default = "default_frame_name")]
    pub name: String,
    #[serde(default)]
    pub visualization: Option<Visualization>,
    /// Query text that produced the result
    #[serde(default)]
    pub query: Option<String>,
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub rows: Vec<Vec<JsonValue>>,
}

fn default_frame_name() -> String {
    DEFAULT_FRAME_NAME.to_string()
}

impl ResultDocument {
    /// Parse a document from text.
    pub fn from_json_str(text: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a document from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, InputError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Frame metadata declared by the document.
    pub fn meta(&self) -> FrameMeta {
        FrameMeta {
            preferred_visualization: self.visualization,
            executed_query: self.query.clone(),
        }
    }
}

/// Scans the rows of a [`ResultDocument`].
pub struct JsonRowScanner {
    columns: Vec<ColumnInfo>,
    rows: std::vec::IntoIter<Vec<JsonValue>>,
    row: usize,
}

impl JsonRowScanner {
    pub fn new(document: ResultDocument) -> Self {
        let columns = document
            .columns
            .into_iter()
            .map(|c| ColumnInfo::new(c.name, c.type_name))
            .collect();
        Self {
            columns,
            rows: document.rows.into_iter(),
            row: 0,
        }
    }

    fn scan_row(
        &self,
        row: usize,
        values: Vec<JsonValue>,
        scan_types: &[Option<ScanType>],
    ) -> Result<Vec<Cell>, InputError> {
        if values.len() != self.columns.len() {
            return Err(InputError::RowArity {
                row,
                expected: self.columns.len(),
                actual: values.len(),
            });
        }

        values
            .into_iter()
            .zip(&self.columns)
            .zip(scan_types.iter().copied().chain(std::iter::repeat(None)))
            .map(|((value, column), scan)| {
                scan_cell(value, scan).map_err(|(expected, found)| InputError::InvalidCell {
                    column: column.name.clone(),
                    row,
                    expected,
                    found,
                })
            })
            .collect()
    }
}

impl RowScanner for JsonRowScanner {
    fn columns(&self) -> &[ColumnInfo] {
        &self.columns
    }

    fn next_row(
        &mut self,
        scan_types: &[Option<ScanType>],
    ) -> dbframe_core::Result<Option<Vec<Cell>>> {
        let Some(values) = self.rows.next() else {
            return Ok(None);
        };
        let row = self.row;
        self.row += 1;
        self.scan_row(row, values, scan_types)
            .map(Some)
            .map_err(dbframe_core::Error::scan)
    }
}

/// Build the cell for one JSON value. Unrecognized columns take any value.
fn scan_cell(value: JsonValue, scan: Option<ScanType>) -> Result<Cell, (NativeKind, String)> {
    let Some(scan) = scan else {
        return Ok(Cell::Composite(value));
    };

    match (scan.shape, value) {
        (ScanShape::Composite, value) => Ok(Cell::Composite(value)),
        (ScanShape::Scalar, JsonValue::Null) => Ok(Cell::Absent),
        (ScanShape::NullableScalar, JsonValue::Null) => Ok(Cell::Nullable(None)),
        (ScanShape::Scalar, value) => scan_scalar(scan.native, &value).map(Cell::Scalar),
        (ScanShape::NullableScalar, value) => {
            scan_scalar(scan.native, &value).map(|s| Cell::Nullable(Some(s)))
        }
    }
}

fn scan_scalar(native: NativeKind, value: &JsonValue) -> Result<Scalar, (NativeKind, String)> {
    let invalid = || (native, describe(value));

    let scalar = match native {
        NativeKind::Bool => value.as_bool().map(Scalar::Bool),
        NativeKind::Int8 => int(value).map(Scalar::Int8),
        NativeKind::Int16 => int(value).map(Scalar::Int16),
        NativeKind::Int32 => int(value).map(Scalar::Int32),
        NativeKind::Int64 => value.as_i64().map(Scalar::Int64),
        NativeKind::UInt8 => uint(value).map(Scalar::UInt8),
        NativeKind::UInt16 => uint(value).map(Scalar::UInt16),
        NativeKind::UInt32 => uint(value).map(Scalar::UInt32),
        NativeKind::UInt64 => value.as_u64().map(Scalar::UInt64),
        NativeKind::Float32 => value.as_f64().map(|v| Scalar::Float32(v as f32)),
        NativeKind::Float64 => value.as_f64().map(Scalar::Float64),
        NativeKind::String => value.as_str().map(Scalar::from),
        NativeKind::Timestamp => timestamp(value).map(Scalar::Timestamp),
        NativeKind::Decimal => decimal(value).map(Scalar::Decimal),
        NativeKind::Any => return Err(invalid()),
    };
    scalar.ok_or_else(invalid)
}

fn int<T: TryFrom<i64>>(value: &JsonValue) -> Option<T> {
    value.as_i64().and_then(|v| T::try_from(v).ok())
}

fn uint<T: TryFrom<u64>>(value: &JsonValue) -> Option<T> {
    value.as_u64().and_then(|v| T::try_from(v).ok())
}

/// RFC 3339, `YYYY-MM-DD HH:MM:SS[.f]` (UTC), `YYYY-MM-DD`, or epoch millis.
fn timestamp(value: &JsonValue) -> Option<DateTime<Utc>> {
    match value {
        JsonValue::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        JsonValue::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|ts| ts.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
                    .ok()
                    .map(|ts| ts.and_utc())
            })
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|ts| ts.and_utc())
            }),
        _ => None,
    }
}

/// Decimals arrive as strings (exact) or numbers.
fn decimal(value: &JsonValue) -> Option<Decimal> {
    let text = match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn describe(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => "null".to_string(),
        JsonValue::Bool(b) => format!("bool {b}"),
        JsonValue::Number(n) => format!("number {n}"),
        JsonValue::String(s) => format!("string {s:?}"),
        JsonValue::Array(_) => "array".to_string(),
        JsonValue::Object(_) => "object".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(columns: &[(&str, &str)], rows: JsonValue) -> ResultDocument {
        let columns: Vec<_> = columns
            .iter()
            .map(|(name, type_name)| json!({"name": name, "type": type_name}))
            .collect();
        serde_json::from_value(json!({"columns": columns, "rows": rows})).unwrap()
    }

    #[test]
    fn test_document_defaults() {
        let doc = ResultDocument::from_json_str(r#"{"columns": []}"#).unwrap();
        assert_eq!(doc.name, "result");
        assert!(doc.rows.is_empty());
        assert_eq!(doc.meta(), FrameMeta::default());
    }

    #[test]
    fn test_document_visualization() {
        let doc = ResultDocument::from_json_str(
            r#"{"name": "q", "visualization": "logs", "query": "SELECT 1", "columns": []}"#,
        )
        .unwrap();
        let meta = doc.meta();
        assert_eq!(meta.preferred_visualization, Some(Visualization::Logs));
        assert_eq!(meta.executed_query.as_deref(), Some("SELECT 1"));
    }

    #[test]
    fn test_null_cells_follow_shape() {
        assert_eq!(
            scan_cell(JsonValue::Null, Some(ScanType::scalar(NativeKind::Int8))),
            Ok(Cell::Absent)
        );
        assert_eq!(
            scan_cell(JsonValue::Null, Some(ScanType::nullable(NativeKind::Int8))),
            Ok(Cell::Nullable(None))
        );
        assert_eq!(
            scan_cell(JsonValue::Null, Some(ScanType::composite())),
            Ok(Cell::Composite(JsonValue::Null))
        );
    }

    #[test]
    fn test_integer_range_checked() {
        let scan = Some(ScanType::scalar(NativeKind::UInt8));
        assert_eq!(
            scan_cell(json!(255), scan),
            Ok(Cell::Scalar(Scalar::UInt8(255)))
        );
        let err = scan_cell(json!(256), scan).unwrap_err();
        assert_eq!(err, (NativeKind::UInt8, "number 256".to_string()));
    }

    #[test]
    fn test_decimal_from_string_and_number() {
        let scan = Some(ScanType::nullable(NativeKind::Decimal));
        assert_eq!(
            scan_cell(json!("12.340"), scan),
            Ok(Cell::Nullable(Some(Scalar::Decimal(
                Decimal::from_str("12.340").unwrap()
            ))))
        );
        assert!(matches!(
            scan_cell(json!(1.5), scan),
            Ok(Cell::Nullable(Some(Scalar::Decimal(_))))
        ));
    }

    #[test]
    fn test_timestamp_formats() {
        let expected = DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        for value in [
            json!("2024-05-01T12:00:00Z"),
            json!("2024-05-01 12:00:00"),
            json!(1_714_564_800_000i64),
        ] {
            assert_eq!(timestamp(&value), Some(expected), "{value}");
        }
        assert!(timestamp(&json!("2024-05-01")).is_some());
        assert!(timestamp(&json!(true)).is_none());
    }

    #[test]
    fn test_scanner_reports_arity_and_cells() {
        let mut scanner = JsonRowScanner::new(document(
            &[("n", "Int32")],
            json!([[1], ["x"], [1, 2]]),
        ));
        let scan_types = [Some(ScanType::scalar(NativeKind::Int32))];

        assert_eq!(
            scanner.next_row(&scan_types).unwrap(),
            Some(vec![Cell::Scalar(Scalar::Int32(1))])
        );

        let err = scanner.next_row(&scan_types).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Scan error: column 'n' row 1: expected i32, found string \"x\""
        );

        let err = scanner.next_row(&scan_types).unwrap_err();
        assert!(err.to_string().contains("row 2 has 2 cells, expected 1"));

        assert!(scanner.next_row(&scan_types).unwrap().is_none());
    }

    #[test]
    fn test_unresolved_columns_accept_anything() {
        let mut scanner = JsonRowScanner::new(document(&[("b", "Bitmap")], json!([[[1, 2]]])));
        assert_eq!(
            scanner.next_row(&[None]).unwrap(),
            Some(vec![Cell::Composite(json!([1, 2]))])
        );
    }
}
