//! Channel numeric kinds and color models.
//!
//! This module provides the canonical definitions for the numeric domain
//! of pixel channels used across all pxl crates.
//!
//! # Types
//!
//! - [`ChannelType`] - Storage type of one channel (U8, U16, F16, F32)
//! - [`ColorModel`] - The color model a pixel format encodes (YCbCr, Gray)
//!
//! # Usage
//!
//! ```rust
//! use pxl_core::format::ChannelType;
//!
//! let depth = ChannelType::U16;
//! assert_eq!(depth.bytes(), 2);
//! assert_eq!(depth.max_value(), 65535.0);
//! assert!(!depth.is_float());
//! ```

/// Storage type of a single channel.
///
/// Integer kinds cover `[0, 2^bits - 1]`; float kinds are nominally
/// `[0.0, 1.0]` but are not clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChannelType {
    /// 8-bit unsigned integer.
    #[default]
    U8,
    /// 16-bit unsigned integer.
    U16,
    /// 16-bit half-precision float.
    F16,
    /// 32-bit single-precision float.
    F32,
}

impl ChannelType {
    /// Number of bytes per channel.
    #[inline]
    pub const fn bytes(&self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 | Self::F16 => 2,
            Self::F32 => 4,
        }
    }

    /// Number of bits per channel.
    #[inline]
    pub const fn bits(&self) -> u32 {
        self.bytes() as u32 * 8
    }

    /// Whether this is a floating-point kind.
    #[inline]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::F16 | Self::F32)
    }

    /// Whether this is an integer kind.
    #[inline]
    pub const fn is_integer(&self) -> bool {
        !self.is_float()
    }

    /// Value that represents "fully opaque" / unit intensity.
    ///
    /// 255 and 65535 for the integer kinds, 1.0 for floats.
    #[inline]
    pub fn max_value(&self) -> f64 {
        match self {
            Self::U8 => 255.0,
            Self::U16 => 65535.0,
            Self::F16 | Self::F32 => 1.0,
        }
    }

    /// Short name for display.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::F16 => "f16",
            Self::F32 => "f32",
        }
    }
}

impl std::fmt::Display for ChannelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Color model encoded by a pixel format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorModel {
    /// Luma plus blue/red difference channels.
    YCbCr,
    /// Single luminance channel.
    Gray,
}

impl ColorModel {
    /// Number of color (non-alpha) channels in this model.
    #[inline]
    pub const fn color_channels(&self) -> usize {
        match self {
            Self::YCbCr => 3,
            Self::Gray => 1,
        }
    }

    /// Element name used for serialized colors.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::YCbCr => "YCbCr",
            Self::Gray => "Gray",
        }
    }
}

impl std::fmt::Display for ColorModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
