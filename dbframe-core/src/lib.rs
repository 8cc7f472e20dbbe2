//! # dbframe-core
//!
//! Engine-agnostic decoding of database result sets into typed frames.
//!
//! This crate maps the wire type strings a database reports for its result
//! columns onto decode rules, converts scanned cells into typed values, and
//! expands semi-structured (JSON) columns of log frames into flat sub-fields.
//! It owns no connection; rows come from a [`scan::RowScanner`].
//!
//! ## Features
//!
//! - **Type Resolution**: exact type names first, then an ordered list of
//!   pattern families (`Array(...)`, `Map(...)`, `Decimal(p,s)`, ...)
//! - **Conversion**: scalars taken over as-is, decimals lowered to `f64`,
//!   composite values normalized to minified JSON text
//! - **Frame Assembly**: one typed field per column, unrecognized types kept
//!   as raw text
//! - **Flattening**: JSON columns of log frames expanded into one sub-field
//!   per key of their first row
//!
//! ## Quick Start
//!
//! ```rust
//! use dbframe_core::prelude::*;
//!
//! let registry = default_registry();
//! let columns = [
//!     ColumnInfo::new("id", "UInt64"),
//!     ColumnInfo::new("price", "Nullable(Decimal(15,3))"),
//! ];
//!
//! let mut builder =
//!     FrameBuilder::new(&registry, "orders", &columns, &DecodeConfig::default()).unwrap();
//! builder
//!     .append_row(&[Cell::Scalar(Scalar::from(7u64)), Cell::Nullable(None)])
//!     .unwrap();
//!
//! let frame = builder.finish().unwrap();
//! assert_eq!(frame.num_rows(), 1);
//! assert_eq!(frame.field("price").unwrap().at(0), Some(&Value::Null));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |                        dbframe-core                                 |
//! +---------------------------------------------------------------------+
//! |  schema/     - DataKind, FieldType                                  |
//! |  scan/       - RowScanner, Cell, ScanType                           |
//! |  types/      - TypeRule, TypeRegistry, converters                   |
//! |  value       - Value                                                |
//! |  frame/      - Field, Frame, FrameBuilder                           |
//! |  flatten/    - JSON column flattening                               |
//! |  config      - DecodeConfig                                         |
//! |  error       - Error types                                          |
//! +---------------------------------------------------------------------+
//! ```

pub mod config;
pub mod error;
pub mod flatten;
pub mod frame;
pub mod prelude;
pub mod scan;
pub mod schema;
pub mod types;
pub mod value;

// Re-export commonly used types at crate root for convenience
pub use config::{DecodeConfig, FlattenConfig, FlattenErrorPolicy, UnresolvedPolicy};
pub use error::{
    ConfigError, ConversionError, Error, FlattenError, FrameError, MarshalError, Result,
};
pub use flatten::{flatten_field, flatten_frame, FlattenStats, FlattenSummary, Flattened};
pub use frame::{
    decode_frame, Column, Field, Frame, FrameBuilder, FrameMeta, Labels, Visualization,
    RAW_FIELD_TYPE,
};
pub use scan::{Cell, ColumnInfo, NativeKind, RowScanner, Scalar, ScanShape, ScanType};
pub use schema::{DataKind, FieldType};
pub use types::{default_registry, normalize_json, Converter, TypeRegistry, TypeRule};
pub use value::Value;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
