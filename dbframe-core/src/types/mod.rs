//! Wire type rules.
//!
//! This module provides:
//! - [`TypeRule`] describing how one wire type is scanned and decoded
//! - [`TypeRegistry`] resolving raw type strings to rules
//! - [`default_registry`] with the built-in rule table
//!
//! ## Resolution order
//!
//! 1. Exact type name (`"UInt8"`, `"Nullable(Int64)"`, ...)
//! 2. Pattern families, first match wins:
//!
//! | Priority | Rule | Pattern |
//! |----------|------|---------|
//! | 1 | `Array()` | `^Array\(.*\)` |
//! | 2 | `Map()` | `^Map\(.*\)` |
//! | 3 | `Tuple()` | `^Tuple\(.*\)` |
//! | 4 | `SimpleAggregateFunction()` | `^SimpleAggregateFunction\(.*\)` |
//! | 5 | `Date` | `^Date\(?` |
//! | 6 | `Nullable(Decimal)` | `^Nullable\(Decimal` |
//! | 7 | `Nullable(Date)` | `^Nullable\(Date\(?` |
//! | 8 | `Nullable(String)` | `Nullable\(String` |
//! | 9 | `Decimal` | `^Decimal` |
//!
//! Composite families decode to JSON text regardless of their parameters.
//!
//! ## Example
//!
//! ```rust
//! use dbframe_core::types::default_registry;
//! use dbframe_core::schema::{DataKind, FieldType};
//!
//! let registry = default_registry();
//! let rule = registry.resolve("Nullable(Decimal(15,3))").unwrap();
//! assert_eq!(rule.name(), "Nullable(Decimal)");
//! assert_eq!(rule.field_type(), FieldType::nullable(DataKind::Float64));
//! ```

mod convert;
mod registry;
mod rule;

pub use convert::normalize_json;
pub use registry::TypeRegistry;
pub use rule::{Converter, TypeRule};

use regex::Regex;

use crate::schema::DataKind;

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("built-in type pattern is valid")
}

/// Create a registry with all built-in type rules.
pub fn default_registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();

    registry.register(TypeRule::scalar("Boolean", DataKind::Bool));
    registry.register(TypeRule::nullable("Nullable(Boolean)", DataKind::Bool));

    // Integers
    let integers = [
        ("Int8", "Nullable(Int8)", DataKind::Int8),
        ("Int16", "Nullable(Int16)", DataKind::Int16),
        ("Int32", "Nullable(Int32)", DataKind::Int32),
        ("Int64", "Nullable(Int64)", DataKind::Int64),
        ("UInt8", "Nullable(UInt8)", DataKind::UInt8),
        ("UInt16", "Nullable(UInt16)", DataKind::UInt16),
        ("UInt32", "Nullable(UInt32)", DataKind::UInt32),
        ("UInt64", "Nullable(UInt64)", DataKind::UInt64),
    ];
    for (name, nullable_name, kind) in integers {
        registry.register(TypeRule::scalar(name, kind));
        registry.register(TypeRule::nullable(nullable_name, kind));
    }

    // Floats
    registry.register(TypeRule::scalar("Float32", DataKind::Float32));
    registry.register(TypeRule::nullable("Nullable(Float32)", DataKind::Float32));
    registry.register(TypeRule::scalar("Float64", DataKind::Float64));
    registry.register(TypeRule::nullable("Nullable(Float64)", DataKind::Float64));

    registry.register(TypeRule::scalar("String", DataKind::String));

    // Time; "Date" below also covers Date32, DateTime('tz') and DateTime64(n)
    registry.register(TypeRule::scalar("DateTime", DataKind::Timestamp));
    registry.register(TypeRule::scalar("DateTime64", DataKind::Timestamp));
    registry.register(TypeRule::scalar("Timestamp", DataKind::Timestamp));

    // Pattern families, in match priority order
    registry.register(TypeRule::json("Array()").with_pattern(pattern(r"^Array\(.*\)")));
    registry.register(TypeRule::json("Map()").with_pattern(pattern(r"^Map\(.*\)")));
    registry.register(TypeRule::json("Tuple()").with_pattern(pattern(r"^Tuple\(.*\)")));
    registry.register(
        TypeRule::json("SimpleAggregateFunction()")
            .with_pattern(pattern(r"^SimpleAggregateFunction\(.*\)")),
    );
    registry.register(
        TypeRule::scalar("Date", DataKind::Timestamp).with_pattern(pattern(r"^Date\(?")),
    );
    registry.register(
        TypeRule::nullable_decimal("Nullable(Decimal)")
            .with_pattern(pattern(r"^Nullable\(Decimal")),
    );
    registry.register(
        TypeRule::nullable("Nullable(Date)", DataKind::Timestamp)
            .with_pattern(pattern(r"^Nullable\(Date\(?")),
    );
    // Unanchored: also catches wrappers such as LowCardinality(Nullable(String))
    registry.register(
        TypeRule::nullable("Nullable(String)", DataKind::String)
            .with_pattern(pattern(r"Nullable\(String")),
    );
    registry.register(TypeRule::decimal("Decimal").with_pattern(pattern(r"^Decimal")));

    registry
}
