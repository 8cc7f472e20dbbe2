//! Convenient re-exports for common usage.
//!
//! # Example
//!
//! ```rust
//! use dbframe_core::prelude::*;
//!
//! let registry = default_registry();
//! assert!(registry.resolve("Map(String, UInt8)").is_some());
//! ```

// Schema types
pub use crate::schema::{DataKind, FieldType};

// Scanning
pub use crate::scan::{Cell, ColumnInfo, RowScanner, Scalar, ScanType};

// Type rules
pub use crate::types::{default_registry, TypeRegistry, TypeRule};

// Frames
pub use crate::frame::{decode_frame, Field, Frame, FrameBuilder, FrameMeta, Visualization};
pub use crate::flatten::{flatten_field, flatten_frame};
pub use crate::value::Value;

pub use crate::config::DecodeConfig;

// Error types
pub use crate::error::{Error, Result};
