//! One generated sub-field of a flattened JSON column.

use compact_str::CompactString;
use serde_json::Value as JsonValue;

use crate::error::FlattenError;
use crate::frame::Field;
use crate::schema::{DataKind, FieldType};
use crate::value::Value;

/// Kind fixed for a key when row 0 is sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubKind {
    Number,
    String,
    Bool,
}

impl SubKind {
    /// Infer the kind of a row-0 value.
    ///
    /// A null sample fixes the key as text. Nested objects and arrays have
    /// no flat kind; the name of their JSON type is returned as the error.
    pub fn infer(sample: &JsonValue) -> Result<Self, &'static str> {
        match sample {
            JsonValue::Number(_) => Ok(SubKind::Number),
            JsonValue::String(_) | JsonValue::Null => Ok(SubKind::String),
            JsonValue::Bool(_) => Ok(SubKind::Bool),
            JsonValue::Array(_) => Err("array"),
            JsonValue::Object(_) => Err("object"),
        }
    }

    pub fn field_type(&self) -> FieldType {
        FieldType::nullable(match self {
            SubKind::Number => DataKind::Float64,
            SubKind::String => DataKind::String,
            SubKind::Bool => DataKind::Bool,
        })
    }

    /// Convert a JSON value of this kind; `None` when the kinds differ.
    pub fn accept(&self, value: &JsonValue) -> Option<Value> {
        match (self, value) {
            (SubKind::Number, JsonValue::Number(n)) => n.as_f64().map(Value::Float64),
            (SubKind::String, JsonValue::String(s)) => {
                Some(Value::String(CompactString::new(s)))
            }
            (SubKind::Bool, JsonValue::Bool(b)) => Some(Value::Bool(*b)),
            _ => None,
        }
    }
}

/// How a backfilled value landed in its sub-field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Value,
    /// Key present with a JSON null
    Null,
    /// Key absent from the row
    Missing,
    /// Key present with a value of another kind
    Mismatch,
}

/// A sub-field under construction, keyed by its JSON key.
#[derive(Debug)]
pub struct SubField {
    key: String,
    kind: SubKind,
    field: Field,
}

impl SubField {
    /// Fix the schema entry for `key` from its row-0 value and seed the field.
    pub fn sample(
        parent: &Field,
        key: &str,
        sample: &JsonValue,
        capacity: usize,
    ) -> Result<Self, FlattenError> {
        let kind = SubKind::infer(sample).map_err(|found| FlattenError::UnsupportedValue {
            field: parent.name().to_string(),
            key: key.to_string(),
            found,
        })?;

        let name = sub_field_name(parent.name(), key);
        let field = Field::with_capacity(name, kind.field_type(), capacity)
            .with_labels(parent.labels().clone());

        let mut sub = Self {
            key: key.to_string(),
            kind,
            field,
        };
        sub.fill(Some(sample))?;
        Ok(sub)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> SubKind {
        self.kind
    }

    /// Append the value found for this key in one row.
    pub fn fill(&mut self, value: Option<&JsonValue>) -> Result<Fill, FlattenError> {
        let (value, fill) = match value {
            None => (Value::Null, Fill::Missing),
            Some(JsonValue::Null) => (Value::Null, Fill::Null),
            Some(v) => match self.kind.accept(v) {
                Some(value) => (value, Fill::Value),
                None => (Value::Null, Fill::Mismatch),
            },
        };
        self.field.append(value)?;
        Ok(fill)
    }

    /// Append NULL for a row whose JSON value is null.
    pub fn fill_null(&mut self) -> Result<(), FlattenError> {
        Ok(self.field.append_null()?)
    }

    pub fn into_field(self) -> Field {
        self.field
    }
}

/// Name of the sub-field generated for `key` of `parent`.
pub fn sub_field_name(parent: &str, key: &str) -> String {
    format!("{parent}['{key}']")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FrameError;
    use crate::frame::Labels;
    use serde_json::json;

    #[test]
    fn test_infer() {
        assert_eq!(SubKind::infer(&json!(1.5)), Ok(SubKind::Number));
        assert_eq!(SubKind::infer(&json!("x")), Ok(SubKind::String));
        assert_eq!(SubKind::infer(&json!(true)), Ok(SubKind::Bool));
        assert_eq!(SubKind::infer(&json!(null)), Ok(SubKind::String));
        assert_eq!(SubKind::infer(&json!([1])), Err("array"));
        assert_eq!(SubKind::infer(&json!({"a": 1})), Err("object"));
    }

    #[test]
    fn test_sample_names_and_labels() {
        let mut labels = Labels::new();
        labels.insert("source".to_string(), "app".to_string());
        let parent =
            Field::new("attrs", FieldType::nullable(DataKind::Json)).with_labels(labels.clone());

        let sub = SubField::sample(&parent, "level", &json!("info"), 2).unwrap();
        let field = sub.into_field();
        assert_eq!(field.name(), "attrs['level']");
        assert_eq!(field.labels(), &labels);
        assert_eq!(field.values(), &[Value::String("info".into())]);
    }

    #[test]
    fn test_fill_outcomes() {
        let parent = Field::new("p", FieldType::nullable(DataKind::Json));
        let mut sub = SubField::sample(&parent, "n", &json!(1), 4).unwrap();

        assert_eq!(sub.fill(Some(&json!(2))), Ok(Fill::Value));
        assert_eq!(sub.fill(Some(&json!("two"))), Ok(Fill::Mismatch));
        assert_eq!(sub.fill(None), Ok(Fill::Missing));
        assert_eq!(sub.fill(Some(&json!(null))), Ok(Fill::Null));

        assert_eq!(
            sub.into_field().values(),
            &[
                Value::Float64(1.0),
                Value::Float64(2.0),
                Value::Null,
                Value::Null,
                Value::Null
            ]
        );
    }

    #[test]
    fn test_null_sample_seeds_null_string() {
        let parent = Field::new("p", FieldType::nullable(DataKind::Json));
        let sub = SubField::sample(&parent, "k", &json!(null), 1).unwrap();
        assert_eq!(sub.kind(), SubKind::String);
        assert_eq!(sub.into_field().values(), &[Value::Null]);
    }

    #[test]
    fn test_rejected_value_is_reported() {
        let mut sub = SubField {
            key: "n".to_string(),
            kind: SubKind::Number,
            field: Field::new("p['n']", FieldType::new(DataKind::Float64)),
        };

        assert_eq!(sub.fill(Some(&json!(1))), Ok(Fill::Value));
        let err = sub.fill(None).unwrap_err();
        assert!(matches!(
            err,
            FlattenError::Frame(FrameError::NullInNonNullable { .. })
        ));
        assert!(sub.fill_null().is_err());
        assert_eq!(sub.into_field().len(), 1);
    }
}
