//! Error types for compositing operations.

use thiserror::Error;

/// Error type for compositing operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Buffers use different pixel formats.
    #[error("format mismatch: {0}")]
    FormatMismatch(String),

    /// Error from pxl-core: a rejected buffer view or views of different sizes.
    #[error(transparent)]
    Core(#[from] pxl_core::Error),
}

/// Result type for compositing operations.
pub type OpsResult<T> = Result<T, OpsError>;
