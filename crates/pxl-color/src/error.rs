//! Error types for color operations.
//!
//! Conversions between native channels and device RGB are total and never
//! fail; errors only come from buffer length checks and from reading or
//! writing serialized colors.

use thiserror::Error;

/// Color operation error.
#[derive(Debug, Error)]
pub enum ColorError {
    /// Serialized color could not be parsed.
    #[error("parse error: {0}")]
    ParseError(String),

    /// Serialized color could not be written.
    #[error("write error: {0}")]
    WriteError(String),

    /// Serialized color uses a model the target format does not encode.
    #[error("unsupported color model '{found}', expected '{expected}'")]
    UnsupportedModel {
        /// Model element found in the input.
        found: String,
        /// Model of the target pixel format.
        expected: String,
    },

    /// A required channel attribute is missing.
    #[error("missing attribute '{0}'")]
    MissingAttribute(String),

    /// Source and destination buffers disagree with the pixel count.
    #[error("buffer size mismatch: expected {expected} bytes, got {got}")]
    SizeMismatch {
        /// Expected byte length.
        expected: usize,
        /// Actual byte length.
        got: usize,
    },

    /// Error from pxl-core.
    #[error(transparent)]
    Core(#[from] pxl_core::Error),
}

/// Result type for color operations.
pub type ColorResult<T> = Result<T, ColorError>;
