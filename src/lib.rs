//! dbframe - Decode database result sets into typed frames.
//!
//! This library ties the engine-agnostic decoder in `dbframe-core` to the
//! Arrow export in `dbframe-arrow`, and reads result sets from JSON
//! documents.
//!
//! # Example
//!
//! ```
//! use dbframe::input::{JsonRowScanner, ResultDocument};
//! use dbframe_core::{default_registry, DecodeConfig};
//!
//! let document = ResultDocument::from_json_str(
//!     r#"{"columns": [{"name": "n", "type": "Nullable(Int64)"}], "rows": [[1], [null]]}"#,
//! )
//! .unwrap();
//! let meta = document.meta();
//! let mut scanner = JsonRowScanner::new(document);
//!
//! let batch = dbframe::decode_document(
//!     &default_registry(),
//!     &DecodeConfig::default(),
//!     "q",
//!     meta,
//!     &mut scanner,
//! )
//! .unwrap();
//! assert_eq!(batch.num_rows(), 2);
//! ```

pub mod cli;
pub mod error;
pub mod input;

use std::path::Path;

use arrow::record_batch::RecordBatch;
use dbframe_core::scan::RowScanner;
use dbframe_core::{decode_frame, flatten_frame, DecodeConfig, FrameMeta, TypeRegistry};
use tracing::debug;

pub use error::{Error, Result};

/// Load the decode configuration, applying command-line overrides.
pub fn load_config(path: Option<&Path>, no_flatten: bool) -> Result<DecodeConfig> {
    let mut config = match path {
        Some(path) => DecodeConfig::from_file(path).map_err(dbframe_core::Error::from)?,
        None => DecodeConfig::default(),
    };
    if no_flatten {
        config.flatten.enabled = false;
    }
    debug!(?config, "Decode configuration");
    Ok(config)
}

/// Decode, flatten, and export one result set.
pub fn decode_document<S: RowScanner + ?Sized>(
    registry: &TypeRegistry,
    config: &DecodeConfig,
    name: &str,
    meta: FrameMeta,
    scanner: &mut S,
) -> Result<RecordBatch> {
    let mut frame = decode_frame(registry, config, name, scanner)?.with_meta(meta);
    let summary = flatten_frame(&mut frame, &config.flatten)?;
    if summary.added_fields > 0 {
        debug!(
            columns = summary.flattened_columns,
            fields = summary.added_fields,
            "Flattened JSON columns"
        );
    }
    Ok(dbframe_arrow::frame_to_record_batch(&frame)?)
}
