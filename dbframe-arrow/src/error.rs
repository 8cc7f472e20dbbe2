//! Error types for dbframe-arrow.
//!
//! This module provides the Arrow export error type, while re-exporting the
//! core error type from dbframe-core.

use thiserror::Error;

pub use dbframe_core::Error as CoreError;

/// Main error type for dbframe-arrow operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from dbframe-core (decoding, flattening)
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Arrow rejected the assembled columns
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
