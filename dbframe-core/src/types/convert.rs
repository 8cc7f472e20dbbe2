//! Per-rule cell converters.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::TypeRule;
use crate::error::{ConversionError, MarshalError, Result};
use crate::scan::{Cell, Scalar, ScanShape};
use crate::value::Value;

/// Dereference one level of indirection and take the native value as is.
pub(crate) fn default_convert(rule: &TypeRule, cell: &Cell) -> Result<Value> {
    let field_type = rule.field_type();
    let scan = rule.scan_type();

    let scalar = match (scan.shape, cell) {
        (_, Cell::Absent) if field_type.nullable => return Ok(Value::Null),
        (_, Cell::Absent) => return Ok(Value::zero(field_type.kind)),
        (ScanShape::Scalar, Cell::Scalar(s)) => s,
        (ScanShape::NullableScalar, Cell::Nullable(Some(s))) => s,
        (ScanShape::NullableScalar, Cell::Nullable(None)) => return Ok(Value::Null),
        _ => {
            return Err(ConversionError::ShapeMismatch {
                rule: rule.name().to_string(),
                expected: scan.shape.name(),
                actual: cell.shape_name(),
            }
            .into())
        }
    };

    let kind_mismatch = || ConversionError::KindMismatch {
        rule: rule.name().to_string(),
        expected: scan.native.type_name(),
        actual: scalar.native_kind().type_name(),
    };

    if scalar.native_kind() != scan.native {
        return Err(kind_mismatch().into());
    }
    Ok(Value::from_scalar(scalar).ok_or_else(kind_mismatch)?)
}

/// Lower a decimal to f64. An absent cell yields 0.0.
pub(crate) fn decimal_convert(rule: &TypeRule, cell: &Cell) -> Result<Value> {
    match cell {
        Cell::Absent => Ok(Value::Float64(0.0)),
        Cell::Scalar(Scalar::Decimal(d)) => Ok(Value::Float64(lower(d))),
        other => Err(invalid_decimal(rule, other)),
    }
}

/// Lower a nullable decimal to f64. Absent and null cells yield NULL.
pub(crate) fn decimal_null_convert(rule: &TypeRule, cell: &Cell) -> Result<Value> {
    match cell {
        Cell::Absent | Cell::Nullable(None) => Ok(Value::Null),
        Cell::Nullable(Some(Scalar::Decimal(d))) => Ok(Value::Float64(lower(d))),
        other => Err(invalid_decimal(rule, other)),
    }
}

/// Normalize any decoded value to minified JSON text. Null short-circuits.
pub(crate) fn json_convert(cell: &Cell) -> Result<Value> {
    let value = match cell {
        Cell::Absent | Cell::Nullable(None) | Cell::Composite(serde_json::Value::Null) => {
            return Ok(Value::Null)
        }
        Cell::Composite(v) => v.clone(),
        Cell::Scalar(s) | Cell::Nullable(Some(s)) => s.to_json()?,
    };
    Ok(Value::Json(normalize_json(&value)?))
}

/// Serialize to minified JSON, then re-parse the text to validate it.
///
/// Object keys keep their source order.
pub fn normalize_json(value: &serde_json::Value) -> std::result::Result<String, MarshalError> {
    let text = serde_json::to_string(value)?;
    serde_json::from_str::<serde::de::IgnoredAny>(&text)?;
    Ok(text)
}

fn lower(d: &Decimal) -> f64 {
    // Lossy by contract; rust_decimal always yields a value here.
    d.to_f64().unwrap_or_default()
}

fn invalid_decimal(rule: &TypeRule, cell: &Cell) -> crate::error::Error {
    let found = match cell {
        Cell::Scalar(s) | Cell::Nullable(Some(s)) => {
            format!("{} {}", cell.shape_name(), s.native_kind())
        }
        other => other.shape_name().to_string(),
    };
    ConversionError::InvalidDecimal {
        rule: rule.name().to_string(),
        found,
    }
    .into()
}
