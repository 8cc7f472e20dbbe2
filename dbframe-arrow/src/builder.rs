//! Frame to RecordBatch conversion.

use std::sync::Arc;

use arrow::array::*;
use arrow::datatypes::Schema;
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use dbframe_core::frame::Field;
use dbframe_core::schema::DataKind;
use dbframe_core::value::Value;
use dbframe_core::{Frame, FrameError};
use tracing::debug;

use crate::error::Result;
use crate::schema::{to_arrow_field, TIMESTAMP_TZ};

/// Dynamic array builder that can hold different builder types.
enum DynamicBuilder {
    Boolean(BooleanBuilder),
    Int8(Int8Builder),
    Int16(Int16Builder),
    Int32(Int32Builder),
    Int64(Int64Builder),
    UInt8(UInt8Builder),
    UInt16(UInt16Builder),
    UInt32(UInt32Builder),
    UInt64(UInt64Builder),
    Float32(Float32Builder),
    Float64(Float64Builder),
    Utf8(StringBuilder),
    TimestampMicrosecond(TimestampMicrosecondBuilder),
}

impl DynamicBuilder {
    /// Create a new builder for the given kind.
    fn new(kind: DataKind, capacity: usize) -> Self {
        match kind {
            DataKind::Bool => DynamicBuilder::Boolean(BooleanBuilder::with_capacity(capacity)),
            DataKind::Int8 => DynamicBuilder::Int8(Int8Builder::with_capacity(capacity)),
            DataKind::Int16 => DynamicBuilder::Int16(Int16Builder::with_capacity(capacity)),
            DataKind::Int32 => DynamicBuilder::Int32(Int32Builder::with_capacity(capacity)),
            DataKind::Int64 => DynamicBuilder::Int64(Int64Builder::with_capacity(capacity)),
            DataKind::UInt8 => DynamicBuilder::UInt8(UInt8Builder::with_capacity(capacity)),
            DataKind::UInt16 => DynamicBuilder::UInt16(UInt16Builder::with_capacity(capacity)),
            DataKind::UInt32 => DynamicBuilder::UInt32(UInt32Builder::with_capacity(capacity)),
            DataKind::UInt64 => DynamicBuilder::UInt64(UInt64Builder::with_capacity(capacity)),
            DataKind::Float32 => DynamicBuilder::Float32(Float32Builder::with_capacity(capacity)),
            DataKind::Float64 => DynamicBuilder::Float64(Float64Builder::with_capacity(capacity)),
            DataKind::String | DataKind::Json => {
                DynamicBuilder::Utf8(StringBuilder::with_capacity(capacity, capacity * 32))
            }
            DataKind::Timestamp => DynamicBuilder::TimestampMicrosecond(
                TimestampMicrosecondBuilder::with_capacity(capacity).with_timezone(TIMESTAMP_TZ),
            ),
        }
    }

    /// Append a value of `field`. A value of another kind is an error.
    fn append(&mut self, field: &Field, value: &Value) -> std::result::Result<(), FrameError> {
        match (self, value) {
            (DynamicBuilder::Boolean(b), Value::Bool(v)) => b.append_value(*v),
            (DynamicBuilder::Int8(b), Value::Int8(v)) => b.append_value(*v),
            (DynamicBuilder::Int16(b), Value::Int16(v)) => b.append_value(*v),
            (DynamicBuilder::Int32(b), Value::Int32(v)) => b.append_value(*v),
            (DynamicBuilder::Int64(b), Value::Int64(v)) => b.append_value(*v),
            (DynamicBuilder::UInt8(b), Value::UInt8(v)) => b.append_value(*v),
            (DynamicBuilder::UInt16(b), Value::UInt16(v)) => b.append_value(*v),
            (DynamicBuilder::UInt32(b), Value::UInt32(v)) => b.append_value(*v),
            (DynamicBuilder::UInt64(b), Value::UInt64(v)) => b.append_value(*v),
            (DynamicBuilder::Float32(b), Value::Float32(v)) => b.append_value(*v),
            (DynamicBuilder::Float64(b), Value::Float64(v)) => b.append_value(*v),
            (DynamicBuilder::Utf8(b), Value::String(v)) => b.append_value(v.as_str()),
            (DynamicBuilder::Utf8(b), Value::Json(v)) => b.append_value(v),
            (DynamicBuilder::TimestampMicrosecond(b), Value::Timestamp(ts)) => {
                b.append_value(ts.timestamp_micros())
            }
            (builder, Value::Null) => builder.append_null(),
            (_, value) => {
                return Err(FrameError::KindMismatch {
                    field: field.name().to_string(),
                    expected: field.field_type(),
                    actual: value.type_name(),
                })
            }
        }
        Ok(())
    }

    /// Append a null value.
    fn append_null(&mut self) {
        match self {
            DynamicBuilder::Boolean(b) => b.append_null(),
            DynamicBuilder::Int8(b) => b.append_null(),
            DynamicBuilder::Int16(b) => b.append_null(),
            DynamicBuilder::Int32(b) => b.append_null(),
            DynamicBuilder::Int64(b) => b.append_null(),
            DynamicBuilder::UInt8(b) => b.append_null(),
            DynamicBuilder::UInt16(b) => b.append_null(),
            DynamicBuilder::UInt32(b) => b.append_null(),
            DynamicBuilder::UInt64(b) => b.append_null(),
            DynamicBuilder::Float32(b) => b.append_null(),
            DynamicBuilder::Float64(b) => b.append_null(),
            DynamicBuilder::Utf8(b) => b.append_null(),
            DynamicBuilder::TimestampMicrosecond(b) => b.append_null(),
        }
    }

    /// Finish building and return the array.
    fn finish(&mut self) -> ArrayRef {
        match self {
            DynamicBuilder::Boolean(b) => Arc::new(b.finish()),
            DynamicBuilder::Int8(b) => Arc::new(b.finish()),
            DynamicBuilder::Int16(b) => Arc::new(b.finish()),
            DynamicBuilder::Int32(b) => Arc::new(b.finish()),
            DynamicBuilder::Int64(b) => Arc::new(b.finish()),
            DynamicBuilder::UInt8(b) => Arc::new(b.finish()),
            DynamicBuilder::UInt16(b) => Arc::new(b.finish()),
            DynamicBuilder::UInt32(b) => Arc::new(b.finish()),
            DynamicBuilder::UInt64(b) => Arc::new(b.finish()),
            DynamicBuilder::Float32(b) => Arc::new(b.finish()),
            DynamicBuilder::Float64(b) => Arc::new(b.finish()),
            DynamicBuilder::Utf8(b) => Arc::new(b.finish()),
            DynamicBuilder::TimestampMicrosecond(b) => Arc::new(b.finish()),
        }
    }
}

/// Convert a frame into a single Arrow RecordBatch.
///
/// Field order, nullability and labels are carried into the schema.
pub fn frame_to_record_batch(frame: &Frame) -> Result<RecordBatch> {
    let rows = frame.num_rows();
    let mut arrow_fields = Vec::with_capacity(frame.fields().len());
    let mut columns = Vec::with_capacity(frame.fields().len());

    for field in frame.fields() {
        let mut builder = DynamicBuilder::new(field.field_type().kind, rows);
        for value in field.values() {
            builder
                .append(field, value)
                .map_err(dbframe_core::Error::from)?;
        }
        columns.push(builder.finish());
        arrow_fields.push(to_arrow_field(field));
    }

    let schema = Arc::new(Schema::new(arrow_fields));
    let options = RecordBatchOptions::new().with_row_count(Some(rows));
    let batch = RecordBatch::try_new_with_options(schema, columns, &options)?;

    debug!(frame = %frame.name(), rows, columns = batch.num_columns(), "Built record batch");
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::DataType;
    use dbframe_core::schema::FieldType;

    #[test]
    fn test_json_and_strings_become_utf8() {
        let field = Field::from_values(
            "tags",
            FieldType::nullable(DataKind::Json),
            [Value::Json(r#"["a"]"#.to_string()), Value::Null],
        )
        .unwrap();
        let frame = Frame::with_fields("f", vec![field]).unwrap();

        let batch = frame_to_record_batch(&frame).unwrap();
        let tags = batch
            .column(0)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(tags.value(0), r#"["a"]"#);
        assert!(tags.is_null(1));
        assert_eq!(batch.schema().field(0).data_type(), &DataType::Utf8);
    }

    #[test]
    fn test_empty_frame() {
        let batch = frame_to_record_batch(&Frame::new("empty")).unwrap();
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.num_columns(), 0);
    }

    #[test]
    fn test_kind_mismatch_is_an_error() {
        let field = Field::new("n", FieldType::nullable(DataKind::Int32));
        let mut builder = DynamicBuilder::new(DataKind::Int32, 2);

        builder.append(&field, &Value::Int32(7)).unwrap();
        builder.append(&field, &Value::Null).unwrap();
        let err = builder
            .append(&field, &Value::String("7".into()))
            .unwrap_err();
        assert!(matches!(
            err,
            FrameError::KindMismatch { ref field, .. } if field == "n"
        ));

        let array = builder.finish();
        assert_eq!(array.len(), 2);
        assert!(array.is_null(1));
    }
}
