//! Type rules: how one family of wire types is scanned and decoded.

use regex::Regex;

use super::convert;
use crate::error::Result;
use crate::scan::{Cell, NativeKind, ScanType};
use crate::schema::{DataKind, FieldType};
use crate::value::Value;

/// Conversion strategy of a rule.
///
/// A closed set dispatched by `match`; the scan shape a rule requests
/// decides which cells each strategy will accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Converter {
    /// Take the scanned scalar over unchanged
    Default,
    /// Lower a decimal to f64; an absent cell becomes 0.0
    Decimal,
    /// Lower a nullable decimal to f64; an absent cell becomes NULL
    NullableDecimal,
    /// Normalize any decoded value to minified JSON text
    Json,
}

/// Decode descriptor for one wire type (or one family of wire types).
#[derive(Debug, Clone)]
pub struct TypeRule {
    name: &'static str,
    pattern: Option<Regex>,
    scan: ScanType,
    field_type: FieldType,
    converter: Converter,
}

impl TypeRule {
    /// Plain scalar type decoding 1:1 into a non-nullable field.
    pub fn scalar(name: &'static str, kind: DataKind) -> Self {
        Self {
            name,
            pattern: None,
            scan: ScanType::scalar(NativeKind::for_data_kind(kind)),
            field_type: FieldType::new(kind),
            converter: Converter::Default,
        }
    }

    /// `Nullable(...)` wrapped scalar type decoding into a nullable field.
    pub fn nullable(name: &'static str, kind: DataKind) -> Self {
        Self {
            name,
            pattern: None,
            scan: ScanType::nullable(NativeKind::for_data_kind(kind)),
            field_type: FieldType::nullable(kind),
            converter: Converter::Default,
        }
    }

    /// Decimal family, lowered to a non-nullable f64 field.
    pub fn decimal(name: &'static str) -> Self {
        Self {
            name,
            pattern: None,
            scan: ScanType::scalar(NativeKind::Decimal),
            field_type: FieldType::new(DataKind::Float64),
            converter: Converter::Decimal,
        }
    }

    /// Nullable decimal family, lowered to a nullable f64 field.
    pub fn nullable_decimal(name: &'static str) -> Self {
        Self {
            name,
            pattern: None,
            scan: ScanType::nullable(NativeKind::Decimal),
            field_type: FieldType::nullable(DataKind::Float64),
            converter: Converter::NullableDecimal,
        }
    }

    /// Composite family (arrays, maps, tuples, ...) normalized to JSON text.
    pub fn json(name: &'static str) -> Self {
        Self {
            name,
            pattern: None,
            scan: ScanType::composite(),
            field_type: FieldType::nullable(DataKind::Json),
            converter: Converter::Json,
        }
    }

    /// Also match wire type strings accepted by `pattern`.
    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Canonical type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Match pattern, if this rule covers a parametrized family.
    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    /// What the scanning layer must produce for this rule.
    pub fn scan_type(&self) -> ScanType {
        self.scan
    }

    /// Type of the decoded field.
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn converter(&self) -> Converter {
        self.converter
    }

    /// Whether the pattern accepts `type_name`. Exact names are not checked.
    pub fn matches(&self, type_name: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|p| p.is_match(type_name))
    }

    /// Convert one scanned cell into a value of [`Self::field_type`].
    pub fn convert(&self, cell: &Cell) -> Result<Value> {
        match self.converter {
            Converter::Default => convert::default_convert(self, cell),
            Converter::Decimal => convert::decimal_convert(self, cell),
            Converter::NullableDecimal => convert::decimal_null_convert(self, cell),
            Converter::Json => convert::json_convert(cell),
        }
    }
}

impl PartialEq for TypeRule {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.scan == other.scan
            && self.field_type == other.field_type
            && self.converter == other.converter
            && self.pattern.as_ref().map(Regex::as_str) == other.pattern.as_ref().map(Regex::as_str)
    }
}

impl std::fmt::Display for TypeRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
