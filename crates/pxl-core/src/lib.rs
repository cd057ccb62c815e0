//! # pxl-core
//!
//! Core types for the pxl colorspace and compositing engine.
//!
//! This crate provides the foundational types used throughout pxl:
//!
//! - [`ChannelDescriptor`] - Role, numeric kind and byte position of one channel
//! - [`ColorSpace`] - Immutable pixel format descriptor (YCbCr, Gray)
//! - [`ChannelValue`] - Native-domain channel arithmetic for u8, u16, f16, f32
//! - [`ChannelFlags`] - Which channels compositing may modify
//! - [`PixelView`], [`PixelViewMut`], [`MaskView`] - Borrowed stride-aware buffers
//! - [`PixelFormatRegistry`] - Explicit id -> format catalog
//!
//! ## Crate Structure
//!
//! ```text
//! pxl-core (this crate)
//!    ^
//!    |
//!    +-- pxl-color (native <-> device RGB conversions, color XML)
//!    +-- pxl-ops (compositing operators and dispatcher)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod channel;
pub mod colorspace;
pub mod error;
pub mod flags;
pub mod format;
pub mod pixel;
pub mod registry;

// Re-exports for convenience
pub use buffer::{MaskView, PixelView, PixelViewMut};
pub use channel::{ChannelDescriptor, ChannelRole};
pub use colorspace::*;
pub use error::{Error, Result};
pub use flags::{ChannelFlags, MAX_CHANNELS};
pub use format::{ChannelType, ColorModel};
pub use pixel::ChannelValue;
pub use registry::PixelFormatRegistry;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use pxl_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffer::{MaskView, PixelView, PixelViewMut};
    pub use crate::channel::{ChannelDescriptor, ChannelRole};
    pub use crate::colorspace::ColorSpace;
    pub use crate::error::{Error, Result};
    pub use crate::flags::ChannelFlags;
    pub use crate::format::{ChannelType, ColorModel};
    pub use crate::pixel::ChannelValue;
    pub use crate::registry::PixelFormatRegistry;
}
