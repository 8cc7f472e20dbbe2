//! Engine-agnostic data type definitions.

/// Value kinds a decoded column can hold.
///
/// These map to:
/// - Arrow: `DataType::*` (see `dbframe-arrow`)
/// - The frame model in [`crate::frame`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    /// Boolean (true/false)
    Bool,

    /// Signed 8-bit integer
    Int8,

    /// Signed 16-bit integer
    Int16,

    /// Signed 32-bit integer
    Int32,

    /// Signed 64-bit integer
    Int64,

    /// Unsigned 8-bit integer
    UInt8,

    /// Unsigned 16-bit integer
    UInt16,

    /// Unsigned 32-bit integer
    UInt32,

    /// Unsigned 64-bit integer
    UInt64,

    /// 32-bit floating point
    Float32,

    /// 64-bit floating point (also the target of lowered decimals)
    Float64,

    /// UTF-8 string
    String,

    /// Timestamp with microsecond precision (UTC)
    Timestamp,

    /// Minified JSON text
    Json,
}

impl DataKind {
    /// Human-readable type name for display.
    pub fn type_name(&self) -> &'static str {
        match self {
            DataKind::Bool => "bool",
            DataKind::Int8 => "i8",
            DataKind::Int16 => "i16",
            DataKind::Int32 => "i32",
            DataKind::Int64 => "i64",
            DataKind::UInt8 => "u8",
            DataKind::UInt16 => "u16",
            DataKind::UInt32 => "u32",
            DataKind::UInt64 => "u64",
            DataKind::Float32 => "f32",
            DataKind::Float64 => "f64",
            DataKind::String => "string",
            DataKind::Timestamp => "timestamp",
            DataKind::Json => "json",
        }
    }
}

impl std::fmt::Display for DataKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// A [`DataKind`] together with its nullability.
///
/// Nullable and non-nullable variants of the same kind are distinct
/// field types: `Int32` and `Nullable(Int32)` resolve to different rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldType {
    /// Value kind
    pub kind: DataKind,

    /// Whether the field can hold NULL
    pub nullable: bool,
}

impl FieldType {
    /// Non-nullable field type.
    pub const fn new(kind: DataKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    /// Nullable field type.
    pub const fn nullable(kind: DataKind) -> Self {
        Self {
            kind,
            nullable: true,
        }
    }

    /// Whether this is the JSON kind (nullable or not).
    pub fn is_json(&self) -> bool {
        self.kind == DataKind::Json
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.nullable {
            write!(f, "nullable {}", self.kind)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(DataKind::Bool.type_name(), "bool");
        assert_eq!(DataKind::UInt32.type_name(), "u32");
        assert_eq!(DataKind::String.type_name(), "string");
        assert_eq!(DataKind::Json.type_name(), "json");
    }

    #[test]
    fn test_nullable_variants_are_distinct() {
        let plain = FieldType::new(DataKind::Int32);
        let nullable = FieldType::nullable(DataKind::Int32);

        assert_ne!(plain, nullable);
        assert_eq!(plain.kind, nullable.kind);
        assert_eq!(plain.to_string(), "i32");
        assert_eq!(nullable.to_string(), "nullable i32");
    }
}
