//! Flattening of JSON columns into flat typed sub-fields.
//!
//! For frames displayed as logs, every JSON column is expanded into one
//! nullable sub-field per key of its first row:
//!
//! 1. Row 0 is sampled. An empty field or a null row 0 produces nothing.
//! 2. Each key of row 0 fixes a sub-field `parent['key']` whose kind follows
//!    the value (number, string or bool). The schema never grows afterwards.
//! 3. Every later row is backfilled. Missing keys and values of a different
//!    kind become NULL and are counted in [`FlattenStats`]; unknown keys are
//!    ignored.
//! 4. [`flatten_frame`] inserts the sub-fields right after their parent, in
//!    row-0 key order. The parent column stays in place.
//!
//! ```rust
//! use dbframe_core::flatten::flatten_field;
//! use dbframe_core::frame::Field;
//! use dbframe_core::schema::{DataKind, FieldType};
//! use dbframe_core::value::Value;
//!
//! let field = Field::from_values(
//!     "attrs",
//!     FieldType::nullable(DataKind::Json),
//!     [Value::Json(r#"{"a":1}"#.into()), Value::Json(r#"{"a":2,"b":3}"#.into())],
//! )
//! .unwrap();
//!
//! let flattened = flatten_field(&field).unwrap();
//! assert_eq!(flattened.fields.len(), 1);
//! assert_eq!(flattened.fields[0].name(), "attrs['a']");
//! assert_eq!(flattened.stats.ignored_keys, 1);
//! ```

mod sub_field;

pub use sub_field::{sub_field_name, SubKind};

use serde_json::{Map, Value as JsonValue};
use tracing::{debug, warn};

use crate::config::{FlattenConfig, FlattenErrorPolicy};
use crate::error::{FlattenError, Result};
use crate::frame::{Field, Frame};
use crate::value::Value;
use sub_field::{Fill, SubField};

/// Tolerated irregularities seen while backfilling one column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlattenStats {
    /// Known keys absent from a row
    pub missing_keys: usize,
    /// Known keys holding a value of another kind than row 0
    pub kind_mismatches: usize,
    /// Keys not present in row 0
    pub ignored_keys: usize,
}

impl FlattenStats {
    /// Whether every row matched the row-0 schema.
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

/// Output of flattening one field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flattened {
    /// Generated sub-fields, in row-0 key order
    pub fields: Vec<Field>,
    pub stats: FlattenStats,
}

/// Outcome of [`flatten_frame`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlattenSummary {
    /// Number of columns that were expanded
    pub flattened_columns: usize,
    /// Number of sub-fields inserted into the frame
    pub added_fields: usize,
    /// Columns left as they were, with the reason
    pub skipped: Vec<FlattenError>,
}

/// Flatten one JSON field into sub-fields.
///
/// The field is not modified. Rows must hold JSON text (or NULL); a row
/// that is not a JSON object fails the whole field.
pub fn flatten_field(field: &Field) -> std::result::Result<Flattened, FlattenError> {
    let Some(first) = field.at(0) else {
        return Ok(Flattened::default());
    };
    let Some(first) = parse_row(field, 0, first)? else {
        return Ok(Flattened::default());
    };

    let mut subs = first
        .iter()
        .map(|(key, sample)| SubField::sample(field, key, sample, field.len()))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut stats = FlattenStats::default();
    for (row, value) in field.values().iter().enumerate().skip(1) {
        let Some(object) = parse_row(field, row, value)? else {
            for sub in &mut subs {
                sub.fill_null()?;
            }
            continue;
        };

        for sub in &mut subs {
            match sub.fill(object.get(sub.key()))? {
                Fill::Missing => stats.missing_keys += 1,
                Fill::Mismatch => {
                    debug!(
                        field = %field.name(),
                        row,
                        key = %sub.key(),
                        expected = ?sub.kind(),
                        "Value kind differs from row 0"
                    );
                    stats.kind_mismatches += 1;
                }
                Fill::Value | Fill::Null => {}
            }
        }
        stats.ignored_keys += object.keys().filter(|k| !first.contains_key(*k)).count();
    }

    Ok(Flattened {
        fields: subs.into_iter().map(SubField::into_field).collect(),
        stats,
    })
}

/// Parse one row into a JSON object; `None` for a null row.
fn parse_row(
    field: &Field,
    row: usize,
    value: &Value,
) -> std::result::Result<Option<Map<String, JsonValue>>, FlattenError> {
    let parse_error = |reason: String| FlattenError::Parse {
        field: field.name().to_string(),
        row,
        reason,
    };

    let text = match value {
        Value::Null => return Ok(None),
        Value::Json(text) => text.as_str(),
        Value::String(text) => text.as_str(),
        other => {
            return Err(parse_error(format!(
                "expected JSON text, got {}",
                other.type_name()
            )))
        }
    };

    match serde_json::from_str::<JsonValue>(text) {
        Ok(JsonValue::Null) => Ok(None),
        Ok(JsonValue::Object(object)) => Ok(Some(object)),
        Ok(other) => Err(parse_error(format!(
            "expected an object, got {}",
            json_type_name(&other)
        ))),
        Err(e) => Err(parse_error(e.to_string())),
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Expand the JSON columns of a log frame in place.
///
/// Frames not displayed as logs, and all frames when flattening is disabled,
/// are left untouched. With [`FlattenErrorPolicy::Fail`] the first error is
/// returned and the frame is not modified.
pub fn flatten_frame(frame: &mut Frame, config: &FlattenConfig) -> Result<FlattenSummary> {
    let mut summary = FlattenSummary::default();
    if !config.enabled || !frame.is_logs() {
        return Ok(summary);
    }

    // Compute everything first so a failure leaves the frame unchanged.
    let mut expansions: Vec<(usize, Vec<Field>)> = Vec::new();
    for (idx, field) in frame.fields().iter().enumerate() {
        if !field.field_type().is_json() || field.is_empty() {
            continue;
        }
        match flatten_field(field) {
            Ok(flattened) => {
                if !flattened.stats.is_clean() {
                    warn!(
                        field = %field.name(),
                        missing_keys = flattened.stats.missing_keys,
                        kind_mismatches = flattened.stats.kind_mismatches,
                        ignored_keys = flattened.stats.ignored_keys,
                        "Rows deviate from the row-0 schema"
                    );
                }
                debug!(
                    field = %field.name(),
                    sub_fields = flattened.fields.len(),
                    "Flattened column"
                );
                if !flattened.fields.is_empty() {
                    summary.flattened_columns += 1;
                    summary.added_fields += flattened.fields.len();
                    expansions.push((idx, flattened.fields));
                }
            }
            Err(e) if config.on_error == FlattenErrorPolicy::Fail => return Err(e.into()),
            Err(e) => {
                warn!(field = %field.name(), error = %e, "Skipping flattening of column");
                summary.skipped.push(e);
            }
        }
    }

    if expansions.is_empty() {
        return Ok(summary);
    }

    let original = std::mem::take(&mut frame.fields);
    let mut fields = Vec::with_capacity(original.len() + summary.added_fields);
    let mut expansions = expansions.into_iter().peekable();
    for (idx, field) in original.into_iter().enumerate() {
        fields.push(field);
        if let Some((_, subs)) = expansions.next_if(|(at, _)| *at == idx) {
            fields.extend(subs);
        }
    }
    frame.fields = fields;

    Ok(summary)
}
