//! Output formatting for decoded frames.
//!
//! Frames are exported to an Arrow RecordBatch and written as a table, CSV,
//! or JSON lines. JSON output keeps numbers and booleans typed; text and JSON
//! columns are written as strings.

use std::io::Write;

use arrow::array::{Array, ArrayRef, BooleanArray, RecordBatch};
use arrow::datatypes::DataType;
use arrow::util::display::array_value_to_string;
use clap::ValueEnum;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed table (default)
    Table,
    /// Comma-separated values
    Csv,
    /// JSON Lines (one JSON object per row)
    Json,
}

/// Formats record batches for output.
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    /// Create a new formatter with the specified format.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Format a RecordBatch and write to the given writer.
    pub fn write<W: Write>(&self, batch: &RecordBatch, writer: &mut W) -> std::io::Result<()> {
        match self.format {
            OutputFormat::Table => self.write_table(batch, writer),
            OutputFormat::Csv => self.write_csv(batch, writer),
            OutputFormat::Json => self.write_json(batch, writer),
        }
    }

    /// Format a single cell value; NULL is the empty string.
    fn format_value(col: &ArrayRef, row_idx: usize) -> String {
        if col.is_null(row_idx) {
            return String::new();
        }
        array_value_to_string(col, row_idx).unwrap_or_else(|_| "?".to_string())
    }

    fn write_table<W: Write>(&self, batch: &RecordBatch, writer: &mut W) -> std::io::Result<()> {
        use comfy_table::{Cell, Table};

        let mut table = Table::new();

        let headers: Vec<Cell> = batch
            .schema()
            .fields()
            .iter()
            .map(|f| Cell::new(f.name()))
            .collect();
        table.set_header(headers);

        for row_idx in 0..batch.num_rows() {
            let row: Vec<Cell> = batch
                .columns()
                .iter()
                .map(|col| Cell::new(Self::format_value(col, row_idx)))
                .collect();
            table.add_row(row);
        }

        writeln!(writer, "{table}")
    }

    fn write_csv<W: Write>(&self, batch: &RecordBatch, writer: &mut W) -> std::io::Result<()> {
        let schema = batch.schema();
        let headers: Vec<String> = schema
            .fields()
            .iter()
            .map(|f| escape_csv(f.name()))
            .collect();
        writeln!(writer, "{}", headers.join(","))?;

        for row_idx in 0..batch.num_rows() {
            let values: Vec<String> = batch
                .columns()
                .iter()
                .map(|col| escape_csv(&Self::format_value(col, row_idx)))
                .collect();
            writeln!(writer, "{}", values.join(","))?;
        }

        Ok(())
    }

    fn write_json<W: Write>(&self, batch: &RecordBatch, writer: &mut W) -> std::io::Result<()> {
        let schema = batch.schema();

        for row_idx in 0..batch.num_rows() {
            let mut obj = serde_json::Map::new();
            for (col_idx, field) in schema.fields().iter().enumerate() {
                let value = json_value(batch.column(col_idx), row_idx);
                obj.insert(field.name().clone(), value);
            }
            writeln!(writer, "{}", serde_json::Value::Object(obj))?;
        }

        Ok(())
    }
}

/// Quote a CSV value when it contains separators, quotes, or newlines.
fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn json_value(col: &ArrayRef, row_idx: usize) -> serde_json::Value {
    use serde_json::Value;

    if col.is_null(row_idx) {
        return Value::Null;
    }

    match col.data_type() {
        DataType::Boolean => col
            .as_any()
            .downcast_ref::<BooleanArray>()
            .map_or(Value::Null, |arr| Value::Bool(arr.value(row_idx))),
        dt if dt.is_integer() || dt.is_floating() => {
            let text = array_value_to_string(col, row_idx).unwrap_or_default();
            serde_json::from_str::<serde_json::Number>(&text)
                .map(Value::Number)
                .unwrap_or(Value::String(text))
        }
        _ => Value::String(
            array_value_to_string(col, row_idx).unwrap_or_default(),
        ),
    }
}
