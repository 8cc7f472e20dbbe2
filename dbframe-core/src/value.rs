//! Decoded field values.
//!
//! A [`Value`] is what a converter produces and what a [`crate::frame::Field`]
//! stores. Every non-null variant corresponds to exactly one [`DataKind`].

use chrono::{DateTime, SecondsFormat, Utc};
use compact_str::CompactString;

use crate::scan::Scalar;
use crate::schema::DataKind;

/// A decoded value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null/missing value
    Null,
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
    String(CompactString),
    Timestamp(DateTime<Utc>),
    /// Minified JSON text
    Json(String),
}

impl Value {
    /// Kind of the value, `None` for [`Value::Null`].
    pub fn kind(&self) -> Option<DataKind> {
        Some(match self {
            Value::Null => return None,
            Value::Bool(_) => DataKind::Bool,
            Value::Int8(_) => DataKind::Int8,
            Value::Int16(_) => DataKind::Int16,
            Value::Int32(_) => DataKind::Int32,
            Value::Int64(_) => DataKind::Int64,
            Value::UInt8(_) => DataKind::UInt8,
            Value::UInt16(_) => DataKind::UInt16,
            Value::UInt32(_) => DataKind::UInt32,
            Value::UInt64(_) => DataKind::UInt64,
            Value::Float32(_) => DataKind::Float32,
            Value::Float64(_) => DataKind::Float64,
            Value::String(_) => DataKind::String,
            Value::Timestamp(_) => DataKind::Timestamp,
            Value::Json(_) => DataKind::Json,
        })
    }

    /// Name of the value's kind, "null" for [`Value::Null`].
    pub fn type_name(&self) -> &'static str {
        self.kind().map_or("null", |k| k.type_name())
    }

    /// Check if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Zero value of a kind, stored when a non-nullable column has no value.
    pub fn zero(kind: DataKind) -> Self {
        match kind {
            DataKind::Bool => Value::Bool(false),
            DataKind::Int8 => Value::Int8(0),
            DataKind::Int16 => Value::Int16(0),
            DataKind::Int32 => Value::Int32(0),
            DataKind::Int64 => Value::Int64(0),
            DataKind::UInt8 => Value::UInt8(0),
            DataKind::UInt16 => Value::UInt16(0),
            DataKind::UInt32 => Value::UInt32(0),
            DataKind::UInt64 => Value::UInt64(0),
            DataKind::Float32 => Value::Float32(0.0),
            DataKind::Float64 => Value::Float64(0.0),
            DataKind::String => Value::String(CompactString::default()),
            DataKind::Timestamp => Value::Timestamp(DateTime::<Utc>::UNIX_EPOCH),
            DataKind::Json => Value::Json("null".to_string()),
        }
    }

    /// Take a scalar over unchanged. Decimals have no direct counterpart.
    pub fn from_scalar(scalar: &Scalar) -> Option<Self> {
        Some(match scalar {
            Scalar::Bool(v) => Value::Bool(*v),
            Scalar::Int8(v) => Value::Int8(*v),
            Scalar::Int16(v) => Value::Int16(*v),
            Scalar::Int32(v) => Value::Int32(*v),
            Scalar::Int64(v) => Value::Int64(*v),
            Scalar::UInt8(v) => Value::UInt8(*v),
            Scalar::UInt16(v) => Value::UInt16(*v),
            Scalar::UInt32(v) => Value::UInt32(*v),
            Scalar::UInt64(v) => Value::UInt64(*v),
            Scalar::Float32(v) => Value::Float32(*v),
            Scalar::Float64(v) => Value::Float64(*v),
            Scalar::String(s) => Value::String(s.clone()),
            Scalar::Timestamp(ts) => Value::Timestamp(*ts),
            Scalar::Decimal(_) => return None,
        })
    }

    /// Try to get as f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float64(v) => Some(*v),
            Value::Float32(v) => Some(f64::from(*v)),
            _ => None,
        }
    }

    /// Try to get as i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int8(v) => Some(i64::from(*v)),
            Value::Int16(v) => Some(i64::from(*v)),
            Value::Int32(v) => Some(i64::from(*v)),
            Value::Int64(v) => Some(*v),
            Value::UInt8(v) => Some(i64::from(*v)),
            Value::UInt16(v) => Some(i64::from(*v)),
            Value::UInt32(v) => Some(i64::from(*v)),
            _ => None,
        }
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as str reference (strings and JSON text).
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            Value::Json(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int8(v) => write!(f, "{v}"),
            Value::Int16(v) => write!(f, "{v}"),
            Value::Int32(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::UInt8(v) => write!(f, "{v}"),
            Value::UInt16(v) => write!(f, "{v}"),
            Value::UInt32(v) => write!(f, "{v}"),
            Value::UInt64(v) => write!(f, "{v}"),
            Value::Float32(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Timestamp(ts) => {
                write!(f, "{}", ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Value::Json(s) => write!(f, "{s}"),
        }
    }
}
