//! Frame assembly from scanned rows.

use compact_str::CompactString;
use tracing::debug;

use super::{Field, Frame, FrameMeta};
use crate::config::{DecodeConfig, UnresolvedPolicy};
use crate::error::{Error, FrameError, Result};
use crate::scan::{Cell, ColumnInfo, RowScanner, ScanType};
use crate::schema::{DataKind, FieldType};
use crate::types::{TypeRegistry, TypeRule};
use crate::value::Value;

/// Field type of columns whose wire type is unrecognized.
pub const RAW_FIELD_TYPE: FieldType = FieldType::nullable(DataKind::String);

/// A result-set column bound to its decode rule.
///
/// `rule` is `None` for unrecognized types; such columns carry their cells'
/// textual form.
#[derive(Debug, Clone)]
pub struct Column<'r> {
    name: String,
    type_name: String,
    rule: Option<&'r TypeRule>,
    field_type: FieldType,
}

impl<'r> Column<'r> {
    /// Resolve a reported column against the registry.
    pub fn resolve(registry: &'r TypeRegistry, info: &ColumnInfo) -> Self {
        let rule = registry.resolve(&info.type_name);
        Self {
            name: info.name.clone(),
            type_name: info.type_name.clone(),
            rule,
            field_type: rule.map_or(RAW_FIELD_TYPE, TypeRule::field_type),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wire type string as reported by the source.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn rule(&self) -> Option<&'r TypeRule> {
        self.rule
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Whether the column falls back to raw text.
    pub fn is_raw(&self) -> bool {
        self.rule.is_none()
    }

    /// Scan type to request, `None` for raw columns.
    pub fn scan_type(&self) -> Option<ScanType> {
        self.rule.map(TypeRule::scan_type)
    }

    /// Decode one cell of this column.
    pub fn convert(&self, cell: &Cell) -> Result<Value> {
        match self.rule {
            Some(rule) => rule.convert(cell),
            None => Ok(cell
                .to_raw_string()
                .map_or(Value::Null, |s| Value::String(CompactString::from(s)))),
        }
    }
}

/// Accumulates converted rows into the fields of one frame.
#[derive(Debug)]
pub struct FrameBuilder<'r> {
    name: String,
    columns: Vec<Column<'r>>,
    fields: Vec<Field>,
    meta: FrameMeta,
    rows: usize,
}

impl<'r> FrameBuilder<'r> {
    /// Resolve every column once and prepare empty fields.
    pub fn new(
        registry: &'r TypeRegistry,
        name: impl Into<String>,
        columns: &[ColumnInfo],
        config: &DecodeConfig,
    ) -> Result<Self> {
        let mut resolved = Vec::with_capacity(columns.len());
        for info in columns {
            let column = Column::resolve(registry, info);
            match column.rule() {
                Some(rule) => {
                    debug!(
                        column = %info.name,
                        type_name = %info.type_name,
                        rule = %rule,
                        "Resolved column"
                    )
                }
                None if config.unresolved == UnresolvedPolicy::Fail => {
                    return Err(Error::UnresolvedType {
                        type_name: info.type_name.clone(),
                    })
                }
                None => {
                    debug!(
                        column = %info.name,
                        type_name = %info.type_name,
                        "Unresolved column type, decoding as raw text"
                    )
                }
            }
            resolved.push(column);
        }

        let fields = resolved
            .iter()
            .map(|c| Field::new(c.name(), c.field_type()))
            .collect();

        Ok(Self {
            name: name.into(),
            columns: resolved,
            fields,
            meta: FrameMeta::default(),
            rows: 0,
        })
    }

    /// Builder: set frame metadata.
    pub fn with_meta(mut self, meta: FrameMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn columns(&self) -> &[Column<'r>] {
        &self.columns
    }

    /// Scan type requested per column, in column order.
    pub fn scan_types(&self) -> Vec<Option<ScanType>> {
        self.columns.iter().map(Column::scan_type).collect()
    }

    /// Number of rows appended so far.
    pub fn num_rows(&self) -> usize {
        self.rows
    }

    /// Convert and append one scanned row.
    ///
    /// On error no field is modified.
    pub fn append_row(&mut self, cells: &[Cell]) -> Result<()> {
        if cells.len() != self.columns.len() {
            return Err(FrameError::RowArity {
                row: self.rows,
                expected: self.columns.len(),
                actual: cells.len(),
            }
            .into());
        }

        let row = self.rows;
        let values = self
            .columns
            .iter()
            .zip(cells)
            .map(|(column, cell)| {
                column
                    .convert(cell)
                    .map_err(|e| e.at_cell(column.name(), row))
            })
            .collect::<Result<Vec<_>>>()?;

        // Validate every value before touching any field.
        for (field, value) in self.fields.iter().zip(&values) {
            field
                .check(value)
                .map_err(|e| Error::from(e).at_cell(field.name(), row))?;
        }
        for (field, value) in self.fields.iter_mut().zip(values) {
            field.append(value)?;
        }

        self.rows += 1;
        Ok(())
    }

    /// Produce the frame.
    pub fn finish(self) -> Result<Frame> {
        let frame = Frame::with_fields(self.name, self.fields)?;
        Ok(frame.with_meta(self.meta))
    }
}

/// Drive a scanner to completion and assemble its rows into a frame.
pub fn decode_frame<S: RowScanner + ?Sized>(
    registry: &TypeRegistry,
    config: &DecodeConfig,
    name: impl Into<String>,
    scanner: &mut S,
) -> Result<Frame> {
    let mut builder = FrameBuilder::new(registry, name, scanner.columns(), config)?;
    let scan_types = builder.scan_types();

    while let Some(cells) = scanner.next_row(&scan_types)? {
        builder.append_row(&cells)?;
    }

    debug!(
        frame = %builder.name,
        rows = builder.num_rows(),
        columns = builder.columns.len(),
        "Decoded frame"
    );
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConversionError;
    use crate::scan::Scalar;
    use crate::types::default_registry;
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::str::FromStr;

    struct VecScanner {
        columns: Vec<ColumnInfo>,
        rows: std::vec::IntoIter<Vec<Cell>>,
    }

    impl VecScanner {
        fn new(columns: Vec<ColumnInfo>, rows: Vec<Vec<Cell>>) -> Self {
            Self {
                columns,
                rows: rows.into_iter(),
            }
        }
    }

    impl RowScanner for VecScanner {
        fn columns(&self) -> &[ColumnInfo] {
            &self.columns
        }

        fn next_row(&mut self, _scan_types: &[Option<ScanType>]) -> Result<Option<Vec<Cell>>> {
            Ok(self.rows.next())
        }
    }

    #[test]
    fn test_decode_mixed_columns() {
        let registry = default_registry();
        let mut scanner = VecScanner::new(
            vec![
                ColumnInfo::new("id", "UInt32"),
                ColumnInfo::new("price", "Nullable(Decimal(15,3))"),
                ColumnInfo::new("tags", "Array(String)"),
            ],
            vec![
                vec![
                    Cell::Scalar(Scalar::from(1u32)),
                    Cell::Nullable(Some(Scalar::Decimal(Decimal::from_str("1.5").unwrap()))),
                    Cell::Composite(json!(["a", "b"])),
                ],
                vec![
                    Cell::Scalar(Scalar::from(2u32)),
                    Cell::Nullable(None),
                    Cell::Composite(serde_json::Value::Null),
                ],
            ],
        );

        let frame =
            decode_frame(&registry, &DecodeConfig::default(), "q", &mut scanner).unwrap();
        assert_eq!(frame.num_rows(), 2);

        let price = frame.field("price").unwrap();
        assert_eq!(price.field_type(), FieldType::nullable(DataKind::Float64));
        assert_eq!(price.values(), &[Value::Float64(1.5), Value::Null]);

        let tags = frame.field("tags").unwrap();
        assert_eq!(tags.at(0), Some(&Value::Json(r#"["a","b"]"#.to_string())));
        assert_eq!(tags.at(1), Some(&Value::Null));
    }

    #[test]
    fn test_scan_types_follow_rules() {
        let registry = default_registry();
        let columns = [
            ColumnInfo::new("a", "Nullable(Int64)"),
            ColumnInfo::new("b", "Bitmap"),
        ];
        let builder =
            FrameBuilder::new(&registry, "q", &columns, &DecodeConfig::default()).unwrap();

        assert_eq!(
            builder.scan_types(),
            vec![Some(ScanType::nullable(crate::scan::NativeKind::Int64)), None]
        );
        assert!(builder.columns()[1].is_raw());
    }

    #[test]
    fn test_unresolved_column_decodes_as_raw_text() {
        let registry = default_registry();
        let columns = [ColumnInfo::new("bits", "Bitmap")];
        let mut builder =
            FrameBuilder::new(&registry, "q", &columns, &DecodeConfig::default()).unwrap();

        builder.append_row(&[Cell::Composite(json!([1, 2]))]).unwrap();
        builder.append_row(&[Cell::Absent]).unwrap();
        let frame = builder.finish().unwrap();

        let field = frame.field("bits").unwrap();
        assert_eq!(field.field_type(), RAW_FIELD_TYPE);
        assert_eq!(field.values(), &[Value::String("[1,2]".into()), Value::Null]);
    }

    #[test]
    fn test_unresolved_column_fails_when_configured() {
        let registry = default_registry();
        let config = DecodeConfig {
            unresolved: UnresolvedPolicy::Fail,
            ..Default::default()
        };
        let err = FrameBuilder::new(&registry, "q", &[ColumnInfo::new("v", "Variant")], &config)
            .unwrap_err();
        assert!(matches!(err, Error::UnresolvedType { type_name } if type_name == "Variant"));
    }

    #[test]
    fn test_conversion_error_names_column_and_row() {
        let registry = default_registry();
        let columns = [ColumnInfo::new("amount", "Decimal(10,2)")];
        let mut builder =
            FrameBuilder::new(&registry, "q", &columns, &DecodeConfig::default()).unwrap();

        builder
            .append_row(&[Cell::Scalar(Scalar::Decimal(Decimal::ONE))])
            .unwrap();
        let err = builder
            .append_row(&[Cell::Scalar(Scalar::from("oops"))])
            .unwrap_err();

        match err {
            Error::Cell { column, row, source } => {
                assert_eq!(column, "amount");
                assert_eq!(row, 1);
                assert!(matches!(
                    *source,
                    Error::Conversion(ConversionError::InvalidDecimal { .. })
                ));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(builder.num_rows(), 1);
    }

    #[test]
    fn test_row_arity_checked() {
        let registry = default_registry();
        let columns = [ColumnInfo::new("a", "Int8"), ColumnInfo::new("b", "Int8")];
        let mut builder =
            FrameBuilder::new(&registry, "q", &columns, &DecodeConfig::default()).unwrap();

        let err = builder
            .append_row(&[Cell::Scalar(Scalar::from(1i8))])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Frame(FrameError::RowArity {
                row: 0,
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_meta_carried_to_frame() {
        let registry = default_registry();
        let builder = FrameBuilder::new(&registry, "logs", &[], &DecodeConfig::default())
            .unwrap()
            .with_meta(FrameMeta {
                preferred_visualization: Some(crate::frame::Visualization::Logs),
                executed_query: None,
            });
        let frame = builder.finish().unwrap();
        assert!(frame.is_logs());
        assert_eq!(frame.name(), "logs");
    }
}
