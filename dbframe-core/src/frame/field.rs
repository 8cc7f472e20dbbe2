//! Typed, growable columns.

use std::collections::BTreeMap;

use crate::error::FrameError;
use crate::schema::FieldType;
use crate::value::Value;

/// Key/value labels attached to a field.
pub type Labels = BTreeMap<String, String>;

/// An ordered sequence of values of one [`FieldType`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    field_type: FieldType,
    labels: Labels,
    values: Vec<Value>,
}

impl Field {
    /// Create an empty field.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            labels: Labels::new(),
            values: Vec::new(),
        }
    }

    /// Create an empty field with room for `capacity` values.
    pub fn with_capacity(name: impl Into<String>, field_type: FieldType, capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            ..Self::new(name, field_type)
        }
    }

    /// Create a field from initial values, checking each against the type.
    pub fn from_values(
        name: impl Into<String>,
        field_type: FieldType,
        values: impl IntoIterator<Item = Value>,
    ) -> Result<Self, FrameError> {
        let mut field = Self::new(name, field_type);
        for value in values {
            field.append(value)?;
        }
        Ok(field)
    }

    /// Builder: attach labels.
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// Check that `value` fits this field without appending it.
    pub fn check(&self, value: &Value) -> Result<(), FrameError> {
        match value.kind() {
            None if !self.field_type.nullable => Err(FrameError::NullInNonNullable {
                field: self.name.clone(),
                expected: self.field_type,
            }),
            Some(kind) if kind != self.field_type.kind => Err(FrameError::KindMismatch {
                field: self.name.clone(),
                expected: self.field_type,
                actual: value.type_name(),
            }),
            _ => Ok(()),
        }
    }

    /// Append a value. NULL is only accepted by nullable fields.
    pub fn append(&mut self, value: Value) -> Result<(), FrameError> {
        self.check(&value)?;
        self.values.push(value);
        Ok(())
    }

    /// Append an explicit NULL.
    pub fn append_null(&mut self) -> Result<(), FrameError> {
        self.append(Value::Null)
    }

    /// Value at `idx`.
    pub fn at(&self, idx: usize) -> Option<&Value> {
        self.values.get(idx)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
