//! # dbframe-arrow
//!
//! Arrow export for frames decoded by dbframe-core.
//!
//! ```rust
//! use dbframe_arrow::frame_to_record_batch;
//! use dbframe_core::prelude::*;
//!
//! let field = Field::from_values(
//!     "n",
//!     FieldType::nullable(DataKind::Int64),
//!     [Value::Int64(1), Value::Null],
//! )
//! .unwrap();
//! let frame = Frame::with_fields("q", vec![field]).unwrap();
//!
//! let batch = frame_to_record_batch(&frame).unwrap();
//! assert_eq!(batch.num_rows(), 2);
//! ```

pub mod builder;
pub mod error;
pub mod schema;

pub use builder::frame_to_record_batch;
pub use error::{Error, Result};
pub use schema::{frame_to_arrow_schema, to_arrow_field, to_arrow_type};
