//! Scanned cell values.
//!
//! A [`Cell`] is what the row-scanning layer hands over for one column of one
//! row. Its variant mirrors the [`ScanShape`] the column's rule asked for, and
//! scalar payloads carry their native representation as a [`Scalar`].

use chrono::{DateTime, SecondsFormat, Utc};
use compact_str::CompactString;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::MarshalError;
use crate::schema::DataKind;

/// Indirection structure a cell arrives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanShape {
    /// Plain value; the source always reports one
    Scalar,
    /// Value that may itself be absent (double indirection)
    NullableScalar,
    /// Opaque decoded value (maps, sequences, tuples)
    Composite,
}

impl ScanShape {
    /// Name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ScanShape::Scalar => "scalar",
            ScanShape::NullableScalar => "nullable",
            ScanShape::Composite => "composite",
        }
    }
}

/// Native representation a scalar cell is scanned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeKind {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    String,
    Timestamp,
    /// Arbitrary-precision decimal
    Decimal,
    /// Any decoded value (composite cells)
    Any,
}

impl NativeKind {
    /// Native representation that decodes 1:1 into `kind`.
    pub fn for_data_kind(kind: DataKind) -> Self {
        match kind {
            DataKind::Bool => NativeKind::Bool,
            DataKind::Int8 => NativeKind::Int8,
            DataKind::Int16 => NativeKind::Int16,
            DataKind::Int32 => NativeKind::Int32,
            DataKind::Int64 => NativeKind::Int64,
            DataKind::UInt8 => NativeKind::UInt8,
            DataKind::UInt16 => NativeKind::UInt16,
            DataKind::UInt32 => NativeKind::UInt32,
            DataKind::UInt64 => NativeKind::UInt64,
            DataKind::Float32 => NativeKind::Float32,
            DataKind::Float64 => NativeKind::Float64,
            DataKind::String => NativeKind::String,
            DataKind::Timestamp => NativeKind::Timestamp,
            DataKind::Json => NativeKind::Any,
        }
    }

    /// Human-readable name.
    pub fn type_name(&self) -> &'static str {
        match self {
            NativeKind::Bool => "bool",
            NativeKind::Int8 => "i8",
            NativeKind::Int16 => "i16",
            NativeKind::Int32 => "i32",
            NativeKind::Int64 => "i64",
            NativeKind::UInt8 => "u8",
            NativeKind::UInt16 => "u16",
            NativeKind::UInt32 => "u32",
            NativeKind::UInt64 => "u64",
            NativeKind::Float32 => "f32",
            NativeKind::Float64 => "f64",
            NativeKind::String => "string",
            NativeKind::Timestamp => "timestamp",
            NativeKind::Decimal => "decimal",
            NativeKind::Any => "any",
        }
    }
}

impl std::fmt::Display for NativeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// What a rule asks the scanning layer to produce for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScanType {
    pub shape: ScanShape,
    pub native: NativeKind,
}

impl ScanType {
    pub const fn scalar(native: NativeKind) -> Self {
        Self {
            shape: ScanShape::Scalar,
            native,
        }
    }

    pub const fn nullable(native: NativeKind) -> Self {
        Self {
            shape: ScanShape::NullableScalar,
            native,
        }
    }

    pub const fn composite() -> Self {
        Self {
            shape: ScanShape::Composite,
            native: NativeKind::Any,
        }
    }
}

/// A natively typed scalar value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    /// Text; inline up to 24 bytes
    String(CompactString),
    Timestamp(DateTime<Utc>),
    Decimal(Decimal),
}

impl Scalar {
    /// Native representation of this value.
    pub fn native_kind(&self) -> NativeKind {
        match self {
            Scalar::Bool(_) => NativeKind::Bool,
            Scalar::Int8(_) => NativeKind::Int8,
            Scalar::Int16(_) => NativeKind::Int16,
            Scalar::Int32(_) => NativeKind::Int32,
            Scalar::Int64(_) => NativeKind::Int64,
            Scalar::UInt8(_) => NativeKind::UInt8,
            Scalar::UInt16(_) => NativeKind::UInt16,
            Scalar::UInt32(_) => NativeKind::UInt32,
            Scalar::UInt64(_) => NativeKind::UInt64,
            Scalar::Float32(_) => NativeKind::Float32,
            Scalar::Float64(_) => NativeKind::Float64,
            Scalar::String(_) => NativeKind::String,
            Scalar::Timestamp(_) => NativeKind::Timestamp,
            Scalar::Decimal(_) => NativeKind::Decimal,
        }
    }

    /// Build a JSON value. Fails for floats JSON cannot carry (NaN, infinity).
    pub fn to_json(&self) -> Result<serde_json::Value, MarshalError> {
        use serde_json::Value;

        let float = |v: f64| {
            serde_json::Number::from_f64(v)
                .map(Value::Number)
                .ok_or_else(|| MarshalError::Unrepresentable {
                    value: v.to_string(),
                })
        };

        match self {
            Scalar::Bool(v) => Ok(Value::Bool(*v)),
            Scalar::Int8(v) => Ok(Value::from(*v)),
            Scalar::Int16(v) => Ok(Value::from(*v)),
            Scalar::Int32(v) => Ok(Value::from(*v)),
            Scalar::Int64(v) => Ok(Value::from(*v)),
            Scalar::UInt8(v) => Ok(Value::from(*v)),
            Scalar::UInt16(v) => Ok(Value::from(*v)),
            Scalar::UInt32(v) => Ok(Value::from(*v)),
            Scalar::UInt64(v) => Ok(Value::from(*v)),
            Scalar::Float32(v) => float(f64::from(*v)),
            Scalar::Float64(v) => float(*v),
            Scalar::String(s) => Ok(Value::String(s.to_string())),
            Scalar::Timestamp(ts) => Ok(Value::String(
                ts.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            )),
            Scalar::Decimal(d) => match d.to_f64() {
                Some(v) => float(v),
                None => Err(MarshalError::Unrepresentable {
                    value: d.to_string(),
                }),
            },
        }
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Bool(v) => write!(f, "{v}"),
            Scalar::Int8(v) => write!(f, "{v}"),
            Scalar::Int16(v) => write!(f, "{v}"),
            Scalar::Int32(v) => write!(f, "{v}"),
            Scalar::Int64(v) => write!(f, "{v}"),
            Scalar::UInt8(v) => write!(f, "{v}"),
            Scalar::UInt16(v) => write!(f, "{v}"),
            Scalar::UInt32(v) => write!(f, "{v}"),
            Scalar::UInt64(v) => write!(f, "{v}"),
            Scalar::Float32(v) => write!(f, "{v}"),
            Scalar::Float64(v) => write!(f, "{v}"),
            Scalar::String(s) => write!(f, "{s}"),
            Scalar::Timestamp(ts) => {
                write!(f, "{}", ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Scalar::Decimal(d) => write!(f, "{d}"),
        }
    }
}

macro_rules! impl_scalar_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(v: $ty) -> Self {
                    Scalar::$variant(v)
                }
            }
        )*
    };
}

impl_scalar_from!(
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
    DateTime<Utc> => Timestamp,
    Decimal => Decimal,
);

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::String(CompactString::new(v))
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::String(CompactString::from(v))
    }
}

/// One scanned cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// The source reported no value at all
    Absent,
    /// Single-indirection scalar
    Scalar(Scalar),
    /// Double-indirection scalar; `None` when the inner reference is null
    Nullable(Option<Scalar>),
    /// Opaque decoded value for composite types
    Composite(serde_json::Value),
}

impl Cell {
    /// Name of the cell's shape, for error messages.
    pub fn shape_name(&self) -> &'static str {
        match self {
            Cell::Absent => "absent",
            Cell::Scalar(_) => ScanShape::Scalar.name(),
            Cell::Nullable(_) => ScanShape::NullableScalar.name(),
            Cell::Composite(_) => ScanShape::Composite.name(),
        }
    }

    /// Whether the cell carries no value at any level of indirection.
    pub fn is_null(&self) -> bool {
        matches!(
            self,
            Cell::Absent | Cell::Nullable(None) | Cell::Composite(serde_json::Value::Null)
        )
    }

    /// Textual form used when a column's type is unrecognized.
    pub fn to_raw_string(&self) -> Option<String> {
        match self {
            Cell::Absent | Cell::Nullable(None) => None,
            Cell::Scalar(s) | Cell::Nullable(Some(s)) => Some(s.to_string()),
            Cell::Composite(serde_json::Value::Null) => None,
            Cell::Composite(serde_json::Value::String(s)) => Some(s.clone()),
            Cell::Composite(v) => Some(v.to_string()),
        }
    }
}

impl From<Scalar> for Cell {
    fn from(s: Scalar) -> Self {
        Cell::Scalar(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_native_kind_round_trip() {
        assert_eq!(Scalar::from(5i16).native_kind(), NativeKind::Int16);
        assert_eq!(Scalar::from("x").native_kind(), NativeKind::String);
        assert_eq!(
            NativeKind::for_data_kind(DataKind::UInt32),
            NativeKind::UInt32
        );
        assert_eq!(NativeKind::for_data_kind(DataKind::Json), NativeKind::Any);
    }

    #[test]
    fn test_scalar_to_json() {
        assert_eq!(Scalar::from(7u8).to_json().unwrap(), json!(7));
        assert_eq!(Scalar::from("hi").to_json().unwrap(), json!("hi"));
        assert_eq!(
            Scalar::Decimal(Decimal::from_str("1.5").unwrap())
                .to_json()
                .unwrap(),
            json!(1.5)
        );
    }

    #[test]
    fn test_non_finite_float_is_unrepresentable() {
        let err = Scalar::Float64(f64::NAN).to_json().unwrap_err();
        assert!(matches!(err, MarshalError::Unrepresentable { .. }));
    }

    #[test]
    fn test_cell_nullness() {
        assert!(Cell::Absent.is_null());
        assert!(Cell::Nullable(None).is_null());
        assert!(Cell::Composite(serde_json::Value::Null).is_null());
        assert!(!Cell::Nullable(Some(Scalar::from(0i32))).is_null());
        assert!(!Cell::Composite(json!([])).is_null());
    }

    #[test]
    fn test_raw_string() {
        assert_eq!(
            Cell::Composite(json!({"a": [1, 2]})).to_raw_string(),
            Some(r#"{"a":[1,2]}"#.to_string())
        );
        assert_eq!(
            Cell::Composite(json!("plain")).to_raw_string(),
            Some("plain".to_string())
        );
        assert_eq!(
            Cell::Scalar(Scalar::from(42u64)).to_raw_string(),
            Some("42".to_string())
        );
        assert_eq!(Cell::Absent.to_raw_string(), None);
    }
}
