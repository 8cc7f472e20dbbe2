//! Frames: named, ordered collections of equally long fields.
//!
//! This is the in-memory result the decoder produces and the flattener
//! rewrites. Engine adapters (see `dbframe-arrow`) turn it into their own
//! columnar representation.

mod builder;
mod field;

pub use builder::{decode_frame, Column, FrameBuilder, RAW_FIELD_TYPE};
pub use field::{Field, Labels};

use serde::{Deserialize, Serialize};

use crate::error::FrameError;

/// How the consumer prefers to display a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visualization {
    Graph,
    Table,
    /// Log-style display; JSON columns are flattened
    Logs,
    Trace,
}

/// Frame-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameMeta {
    pub preferred_visualization: Option<Visualization>,
    pub executed_query: Option<String>,
}

/// A named set of fields sharing one row count.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    name: String,
    pub(crate) fields: Vec<Field>,
    meta: FrameMeta,
}

impl Frame {
    /// Create an empty frame.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            meta: FrameMeta::default(),
        }
    }

    /// Create a frame from fields, checking that all have the same length.
    pub fn with_fields(name: impl Into<String>, fields: Vec<Field>) -> Result<Self, FrameError> {
        let mut frame = Self::new(name);
        for field in fields {
            frame.push_field(field)?;
        }
        Ok(frame)
    }

    /// Builder: set metadata.
    pub fn with_meta(mut self, meta: FrameMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Append a field; its length must match the existing fields.
    pub fn push_field(&mut self, field: Field) -> Result<(), FrameError> {
        if let Some(first) = self.fields.first() {
            if first.len() != field.len() {
                return Err(FrameError::LengthMismatch {
                    field: field.name().to_string(),
                    expected: first.len(),
                    actual: field.len(),
                });
            }
        }
        self.fields.push(field);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn meta(&self) -> &FrameMeta {
        &self.meta
    }

    pub fn set_meta(&mut self, meta: FrameMeta) {
        self.meta = meta;
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Get a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Number of rows (0 for a frame without fields).
    pub fn num_rows(&self) -> usize {
        self.fields.first().map_or(0, Field::len)
    }

    /// Whether the frame is marked for log-style display.
    pub fn is_logs(&self) -> bool {
        self.meta.preferred_visualization == Some(Visualization::Logs)
    }
}
