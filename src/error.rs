//! Error types for dbframe.

use thiserror::Error;

pub use crate::input::InputError;

/// Main error type for dbframe operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from dbframe-core (type resolution, conversion, flattening)
    #[error(transparent)]
    Core(#[from] dbframe_core::Error),

    /// Error during Arrow export
    #[error(transparent)]
    Arrow(#[from] dbframe_arrow::Error),

    /// Error reading the result document
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
