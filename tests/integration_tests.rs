//! End-to-end tests: result document in, formatted output out.

use std::io::Write;
use std::process::{Command, Stdio};

use arrow::array::{Array, Float64Array, StringArray};
use arrow::datatypes::DataType;
use tempfile::NamedTempFile;

use dbframe::cli::{OutputFormat, OutputFormatter};
use dbframe::input::{JsonRowScanner, ResultDocument};
use dbframe::{decode_document, load_config};
use dbframe_core::default_registry;

const LOG_DOCUMENT: &str = r#"{
    "name": "logs",
    "visualization": "logs",
    "columns": [
        {"name": "ts", "type": "DateTime64(3)"},
        {"name": "amount", "type": "Nullable(Decimal(15,3))"},
        {"name": "attrs", "type": "Map(String, String)"}
    ],
    "rows": [
        ["2024-05-01 12:00:00.000", "12.340", {"level": "info", "code": 200}],
        ["2024-05-01 12:00:01.000", null, {"level": "warn", "code": "n/a", "extra": 1}],
        ["2024-05-01 12:00:02.000", "1.5", null]
    ]
}"#;

fn decode(text: &str, no_flatten: bool) -> arrow::record_batch::RecordBatch {
    let config = load_config(None, no_flatten).unwrap();
    let document = ResultDocument::from_json_str(text).unwrap();
    let meta = document.meta();
    let name = document.name.clone();
    let mut scanner = JsonRowScanner::new(document);
    decode_document(&default_registry(), &config, &name, meta, &mut scanner).unwrap()
}

fn column_names(batch: &arrow::record_batch::RecordBatch) -> Vec<String> {
    batch
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect()
}

// =============================================================================
// Library pipeline
// =============================================================================

#[test]
fn test_nullable_decimal_becomes_nullable_float() {
    let batch = decode(LOG_DOCUMENT, false);

    let schema = batch.schema();
    let amount_field = schema.field_with_name("amount").unwrap();
    assert_eq!(amount_field.data_type(), &DataType::Float64);
    assert!(amount_field.is_nullable());

    let idx = schema.index_of("amount").unwrap();
    let amount = batch
        .column(idx)
        .as_any()
        .downcast_ref::<Float64Array>()
        .unwrap();
    assert!((amount.value(0) - 12.34).abs() < 1e-9);
    assert!(amount.is_null(1));
    assert!((amount.value(2) - 1.5).abs() < 1e-9);
}

#[test]
fn test_log_document_is_flattened() {
    let batch = decode(LOG_DOCUMENT, false);
    assert_eq!(
        column_names(&batch),
        vec!["ts", "amount", "attrs", "attrs['level']", "attrs['code']"]
    );

    let idx = batch.schema().index_of("attrs['code']").unwrap();
    let code = batch
        .column(idx)
        .as_any()
        .downcast_ref::<Float64Array>()
        .unwrap();
    assert_eq!(code.value(0), 200.0);
    assert!(code.is_null(1));
    assert!(code.is_null(2));

    let idx = batch.schema().index_of("attrs").unwrap();
    let attrs = batch
        .column(idx)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(attrs.value(0), r#"{"level":"info","code":200}"#);
}

#[test]
fn test_no_flatten_keeps_columns() {
    let batch = decode(LOG_DOCUMENT, true);
    assert_eq!(column_names(&batch), vec!["ts", "amount", "attrs"]);
}

#[test]
fn test_config_file_disables_flattening() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[flatten]\nenabled = false").unwrap();

    let config = load_config(Some(file.path()), false).unwrap();
    assert!(!config.flatten.enabled);
}

#[test]
fn test_csv_output() {
    let batch = decode(
        r#"{"columns": [{"name": "id", "type": "UInt64"},
                        {"name": "tags", "type": "Array(String)"}],
            "rows": [[1, ["a", "b"]], [2, null]]}"#,
        false,
    );

    let mut output = Vec::new();
    OutputFormatter::new(OutputFormat::Csv)
        .write(&batch, &mut output)
        .unwrap();
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "id,tags\n1,\"[\"\"a\"\",\"\"b\"\"]\"\n2,\n"
    );
}

// =============================================================================
// Binary
// =============================================================================

fn run_cli(args: &[&str], stdin: &str) -> std::process::Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_dbframe"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_cli_json_output_from_stdin() {
    let output = run_cli(
        &["--format", "json", "--logs"],
        r#"{"columns": [{"name": "attrs", "type": "Map(String, String)"}],
            "rows": [[{"a": 1}], [{"a": 2, "b": 3}]]}"#,
    );
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines, vec![
        r#"{"attrs":"{\"a\":1}","attrs['a']":1.0}"#,
        r#"{"attrs":"{\"a\":2,\"b\":3}","attrs['a']":2.0}"#,
    ]);
}

#[test]
fn test_cli_resolve() {
    let output = run_cli(&["--resolve", "LowCardinality(Nullable(String))"], "");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("-> Nullable(String) (pattern, nullable string)"));

    let output = run_cli(&["--resolve", "Bitmap"], "");
    assert!(!output.status.success());
}

#[test]
fn test_cli_reports_bad_cell() {
    let output = run_cli(
        &[],
        r#"{"columns": [{"name": "n", "type": "Int8"}], "rows": [[1000]]}"#,
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("column 'n' row 0"), "{stderr}");
}
