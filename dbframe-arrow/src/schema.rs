//! Convert dbframe-core schema types to Arrow types.

use std::collections::HashMap;

use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use dbframe_core::frame::{Field as FrameField, Frame};
use dbframe_core::schema::DataKind;

/// Timezone of exported timestamp columns.
pub const TIMESTAMP_TZ: &str = "UTC";

/// Convert a DataKind to an Arrow DataType.
///
/// JSON columns are exported as their text.
pub fn to_arrow_type(kind: DataKind) -> DataType {
    match kind {
        DataKind::Bool => DataType::Boolean,
        DataKind::Int8 => DataType::Int8,
        DataKind::Int16 => DataType::Int16,
        DataKind::Int32 => DataType::Int32,
        DataKind::Int64 => DataType::Int64,
        DataKind::UInt8 => DataType::UInt8,
        DataKind::UInt16 => DataType::UInt16,
        DataKind::UInt32 => DataType::UInt32,
        DataKind::UInt64 => DataType::UInt64,
        DataKind::Float32 => DataType::Float32,
        DataKind::Float64 => DataType::Float64,
        DataKind::String | DataKind::Json => DataType::Utf8,
        DataKind::Timestamp => {
            DataType::Timestamp(TimeUnit::Microsecond, Some(TIMESTAMP_TZ.into()))
        }
    }
}

/// Convert a frame field to an Arrow Field.
///
/// Labels become field metadata.
pub fn to_arrow_field(field: &FrameField) -> Field {
    let field_type = field.field_type();
    let arrow_field = Field::new(
        field.name(),
        to_arrow_type(field_type.kind),
        field_type.nullable,
    );
    if field.labels().is_empty() {
        return arrow_field;
    }
    let metadata: HashMap<String, String> = field
        .labels()
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    arrow_field.with_metadata(metadata)
}

/// Convert a frame's fields to an Arrow Schema.
pub fn frame_to_arrow_schema(frame: &Frame) -> Schema {
    let fields: Vec<Field> = frame.fields().iter().map(to_arrow_field).collect();
    Schema::new(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbframe_core::frame::Labels;
    use dbframe_core::schema::FieldType;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(to_arrow_type(DataKind::Int8), DataType::Int8);
        assert_eq!(to_arrow_type(DataKind::UInt64), DataType::UInt64);
        assert_eq!(to_arrow_type(DataKind::Json), DataType::Utf8);
        assert_eq!(
            to_arrow_type(DataKind::Timestamp),
            DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into()))
        );
    }

    #[test]
    fn test_field_nullability_and_labels() {
        let mut labels = Labels::new();
        labels.insert("service".to_string(), "api".to_string());
        let field = FrameField::new("attrs['code']", FieldType::nullable(DataKind::Float64))
            .with_labels(labels);

        let arrow_field = to_arrow_field(&field);
        assert_eq!(arrow_field.name(), "attrs['code']");
        assert_eq!(arrow_field.data_type(), &DataType::Float64);
        assert!(arrow_field.is_nullable());
        assert_eq!(
            arrow_field.metadata().get("service").map(String::as_str),
            Some("api")
        );

        let plain = to_arrow_field(&FrameField::new("id", FieldType::new(DataKind::UInt32)));
        assert!(!plain.is_nullable());
        assert!(plain.metadata().is_empty());
    }
}
