//! Error types for pxl-core operations.
//!
//! # Overview
//!
//! The [`Error`] enum covers the recoverable failures of the core types:
//! - Buffer view construction (stride, buffer length)
//! - Views of different sizes passed to one operation
//! - Pixel format registry (duplicate or unknown ids)
//!
//! Malformed pixel format layouts are not reported here: they come from
//! hard-coded tables and panic in [`ColorSpace::new`](crate::ColorSpace::new).
//!
//! # Usage
//!
//! ```rust
//! use pxl_core::{Error, Result};
//!
//! fn check_stride(stride: usize, width: u32, pixel_size: usize) -> Result<()> {
//!     let min_stride = width as usize * pixel_size;
//!     if stride < min_stride {
//!         return Err(Error::InvalidStride { stride, min_stride, width });
//!     }
//!     Ok(())
//! }
//! assert!(check_stride(8, 4, 4).is_err());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in pxl-core.
#[derive(Debug, Error)]
pub enum Error {
    /// Stride is too small for the given width and pixel size.
    #[error("stride {stride} is less than minimum {min_stride} for width {width}")]
    InvalidStride {
        /// Provided stride
        stride: usize,
        /// Minimum required stride
        min_stride: usize,
        /// View width
        width: u32,
    },

    /// Buffer is too short for the requested geometry.
    #[error("buffer of {len} bytes is too short, {required} bytes required")]
    BufferTooShort {
        /// Provided length
        len: usize,
        /// Required length
        required: usize,
    },

    /// Dimensions of two views don't match.
    #[error("dimension mismatch: {a_width}x{a_height} vs {b_width}x{b_height}")]
    DimensionMismatch {
        /// First view width
        a_width: u32,
        /// First view height
        a_height: u32,
        /// Second view width
        b_width: u32,
        /// Second view height
        b_height: u32,
    },

    /// A pixel format with this id is already registered.
    #[error("pixel format '{0}' is already registered")]
    DuplicateFormat(String),

    /// No pixel format with this id is registered.
    #[error("unknown pixel format '{0}'")]
    UnknownFormat(String),
}

impl Error {
    /// Creates an [`Error::DimensionMismatch`] error.
    #[inline]
    pub fn dimension_mismatch(a: (u32, u32), b: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            a_width: a.0,
            a_height: a.1,
            b_width: b.0,
            b_height: b.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch() {
        let err = Error::dimension_mismatch((100, 100), (200, 200));
        let msg = err.to_string();
        assert!(msg.contains("100x100"));
        assert!(msg.contains("200x200"));
        assert!(matches!(err, Error::DimensionMismatch { b_width: 200, .. }));
    }

    #[test]
    fn test_registry_errors() {
        let err = Error::DuplicateFormat("YCbCrAU8".into());
        assert!(err.to_string().contains("YCbCrAU8"));
    }
}
