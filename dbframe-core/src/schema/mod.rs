//! Engine-agnostic schema types.
//!
//! This module provides the kinds a decoded column can take without
//! depending on any specific columnar format (Arrow, etc.).
//!
//! # Example
//!
//! ```rust
//! use dbframe_core::schema::{DataKind, FieldType};
//!
//! let amount = FieldType::nullable(DataKind::Float64);
//! assert!(amount.nullable);
//! assert_eq!(amount.kind, DataKind::Float64);
//! ```

mod kind;

pub use kind::{DataKind, FieldType};
