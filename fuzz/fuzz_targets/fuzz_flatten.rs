//! Fuzz target for JSON column flattening.
//!
//! Input is split on newlines; each line is one row of JSON text, an empty
//! line is a NULL row. Flattening may fail but must never panic, and the
//! sub-fields must always have as many rows as the parent.

#![no_main]

use libfuzzer_sys::fuzz_target;
use dbframe_core::flatten::flatten_field;
use dbframe_core::frame::Field;
use dbframe_core::schema::{DataKind, FieldType};
use dbframe_core::value::Value;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let rows = text.split('\n').map(|line| {
        if line.is_empty() {
            Value::Null
        } else {
            Value::Json(line.to_string())
        }
    });
    let Ok(field) = Field::from_values("p", FieldType::nullable(DataKind::Json), rows) else {
        return;
    };

    if let Ok(flattened) = flatten_field(&field) {
        for sub in &flattened.fields {
            assert_eq!(sub.len(), field.len());
        }
    }
});
