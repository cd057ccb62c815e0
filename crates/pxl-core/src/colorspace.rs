//! Pixel format (color space) descriptors.
//!
//! A [`ColorSpace`] is an immutable description of how one pixel is laid
//! out in memory: its ordered channels, their numeric kind, the total
//! pixel size and where the alpha channel sits. Instances are built once
//! from hard-coded tables and shared behind an [`Arc`](std::sync::Arc).
//!
//! # Built-in Formats
//!
//! | id | layout | channel type |
//! |---|---|---|
//! | `YCbCrAU8` | Y, Cb, Cr, Alpha | u8 |
//! | `YCbCrAU16` | Y, Cb, Cr, Alpha | u16 |
//! | `GRAYA` | Gray, Alpha | u8 |
//! | `GRAYAU16` | Gray, Alpha | u16 |
//! | `GRAYAF16` | Gray, Alpha | f16 |
//! | `GRAYAF32` | Gray, Alpha | f32 |
//!
//! # Usage
//!
//! ```
//! use pxl_core::ColorSpace;
//!
//! let cs = ColorSpace::ycbcr_u16();
//! assert_eq!(cs.pixel_size(), 8);
//! assert_eq!(cs.channel_count(), 4);
//! assert_eq!(cs.color_channel_count(), 3);
//! assert_eq!(cs.alpha_offset(), Some(6));
//! ```
//!
//! # Invariants
//!
//! Checked once in [`ColorSpace::new`]; a violation is a programmer error
//! and panics:
//! - at most one alpha channel
//! - every channel shares one numeric kind
//! - channel byte ranges do not overlap and exactly tile the pixel

use crate::channel::{ChannelDescriptor, ChannelRole};
use crate::flags::MAX_CHANNELS;
use crate::format::{ChannelType, ColorModel};
use crate::pixel::{self, ChannelValue};
use std::fmt;

/// Id of the 8-bit YCbCr format with alpha.
pub const YCBCR_U8_ID: &str = "YCbCrAU8";
/// Id of the 16-bit YCbCr format with alpha.
pub const YCBCR_U16_ID: &str = "YCbCrAU16";
/// Id of the 8-bit gray format with alpha.
pub const GRAY_U8_ID: &str = "GRAYA";
/// Id of the 16-bit gray format with alpha.
pub const GRAY_U16_ID: &str = "GRAYAU16";
/// Id of the half-float gray format with alpha.
pub const GRAY_F16_ID: &str = "GRAYAF16";
/// Id of the float gray format with alpha.
pub const GRAY_F32_ID: &str = "GRAYAF32";

/// Immutable pixel format descriptor.
#[derive(Clone, PartialEq, Eq)]
pub struct ColorSpace {
    id: String,
    name: String,
    model: ColorModel,
    ty: ChannelType,
    channels: Vec<ChannelDescriptor>,
    pixel_size: usize,
    alpha_index: Option<usize>,
}

impl ColorSpace {
    /// Creates a pixel format from an ordered channel list.
    ///
    /// # Panics
    ///
    /// Panics on a malformed layout: no channels, more than
    /// [`MAX_CHANNELS`] channels, mixed channel types, more than one alpha
    /// channel, overlapping byte ranges, or gaps between channels.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        model: ColorModel,
        channels: Vec<ChannelDescriptor>,
    ) -> Self {
        let id = id.into();
        assert!(!channels.is_empty(), "{id}: pixel format without channels");
        assert!(
            channels.len() <= MAX_CHANNELS,
            "{id}: {} channels exceed the supported maximum of {MAX_CHANNELS}",
            channels.len()
        );

        let ty = channels[0].channel_type();
        assert!(
            channels.iter().all(|c| c.channel_type() == ty),
            "{id}: channels must share one numeric type"
        );

        let alphas: Vec<usize> = channels
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alpha())
            .map(|(i, _)| i)
            .collect();
        assert!(alphas.len() <= 1, "{id}: more than one alpha channel");

        let pixel_size: usize = channels.iter().map(|c| c.size()).sum();
        let mut covered = vec![false; pixel_size];
        for c in &channels {
            assert!(
                c.byte_range().end <= pixel_size,
                "{id}: channel {} exceeds pixel size {pixel_size}",
                c.name()
            );
            for b in c.byte_range() {
                assert!(!covered[b], "{id}: channel {} overlaps another channel", c.name());
                covered[b] = true;
            }
        }

        let color = channels.iter().filter(|c| !c.is_alpha()).count();
        assert_eq!(
            color,
            model.color_channels(),
            "{id}: {model} needs {} color channels",
            model.color_channels()
        );

        Self {
            id,
            name: name.into(),
            model,
            ty,
            channels,
            pixel_size,
            alpha_index: alphas.first().copied(),
        }
    }

    /// Builds the standard layout for a model: color channels in model
    /// order followed by one alpha channel.
    pub fn standard(id: impl Into<String>, name: impl Into<String>, model: ColorModel, ty: ChannelType) -> Self {
        let names: &[&str] = match model {
            ColorModel::YCbCr => &["Y", "Cb", "Cr"],
            ColorModel::Gray => &["Gray"],
        };
        let size = ty.bytes();
        let mut channels: Vec<ChannelDescriptor> = names
            .iter()
            .enumerate()
            .map(|(i, n)| ChannelDescriptor::new(*n, ChannelRole::Color, ty, i * size))
            .collect();
        channels.push(ChannelDescriptor::new("Alpha", ChannelRole::Alpha, ty, names.len() * size));
        Self::new(id, name, model, channels)
    }

    /// `YCbCrAU8`.
    pub fn ycbcr_u8() -> Self {
        Self::standard(YCBCR_U8_ID, "YCbCr (8-bit integer/channel)", ColorModel::YCbCr, ChannelType::U8)
    }

    /// `YCbCrAU16`.
    pub fn ycbcr_u16() -> Self {
        Self::standard(YCBCR_U16_ID, "YCbCr (16-bit integer/channel)", ColorModel::YCbCr, ChannelType::U16)
    }

    /// `GRAYA`.
    pub fn gray_u8() -> Self {
        Self::standard(GRAY_U8_ID, "Grayscale (8-bit integer/channel)", ColorModel::Gray, ChannelType::U8)
    }

    /// `GRAYAU16`.
    pub fn gray_u16() -> Self {
        Self::standard(GRAY_U16_ID, "Grayscale (16-bit integer/channel)", ColorModel::Gray, ChannelType::U16)
    }

    /// `GRAYAF16`.
    pub fn gray_f16() -> Self {
        Self::standard(GRAY_F16_ID, "Grayscale (16-bit float/channel)", ColorModel::Gray, ChannelType::F16)
    }

    /// `GRAYAF32`.
    pub fn gray_f32() -> Self {
        Self::standard(GRAY_F32_ID, "Grayscale (32-bit float/channel)", ColorModel::Gray, ChannelType::F32)
    }

    /// All built-in formats.
    pub fn builtin() -> Vec<Self> {
        vec![
            Self::ycbcr_u8(),
            Self::ycbcr_u16(),
            Self::gray_u8(),
            Self::gray_u16(),
            Self::gray_f16(),
            Self::gray_f32(),
        ]
    }

    /// Stable identifier.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-readable name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Color model.
    #[inline]
    pub fn color_model(&self) -> ColorModel {
        self.model
    }

    /// Numeric kind shared by all channels.
    #[inline]
    pub fn channel_type(&self) -> ChannelType {
        self.ty
    }

    /// Total bytes per pixel.
    #[inline]
    pub fn pixel_size(&self) -> usize {
        self.pixel_size
    }

    /// Total channel count, alpha included.
    #[inline]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Number of color channels.
    #[inline]
    pub fn color_channel_count(&self) -> usize {
        self.channels.len() - usize::from(self.alpha_index.is_some())
    }

    /// Channels in memory order.
    #[inline]
    pub fn channels(&self) -> &[ChannelDescriptor] {
        &self.channels
    }

    /// Index of the alpha channel in [`channels`](Self::channels).
    #[inline]
    pub fn alpha_channel_index(&self) -> Option<usize> {
        self.alpha_index
    }

    /// Byte offset of the alpha channel within a pixel.
    #[inline]
    pub fn alpha_offset(&self) -> Option<usize> {
        self.alpha_index.map(|i| self.channels[i].offset())
    }

    /// Whether the format carries an alpha channel.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.alpha_index.is_some()
    }

    /// Iterator over the color (non-alpha) channels.
    pub fn color_channels(&self) -> impl Iterator<Item = &ChannelDescriptor> {
        self.channels.iter().filter(|c| !c.is_alpha())
    }

    /// Reads channel `index` of `pixel` as a normalized f32.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range or `pixel` is too short.
    pub fn channel_value_as_f32(&self, pixel: &[u8], index: usize) -> f32 {
        let c = &self.channels[index];
        pixel::read_normalized(self.ty, &pixel[c.byte_range()])
    }

    /// All channels of `pixel` normalized to `[0, 1]` (floats pass
    /// through), in memory order.
    pub fn normalised_channel_values(&self, pixel: &[u8]) -> Vec<f32> {
        (0..self.channels.len())
            .map(|i| self.channel_value_as_f32(pixel, i))
            .collect()
    }

    /// Native value of channel `index` formatted for display.
    pub fn channel_value_text(&self, pixel: &[u8], index: usize) -> String {
        let c = &self.channels[index];
        pixel::native_text(self.ty, &pixel[c.byte_range()])
    }

    /// Opacity of `pixel` scaled to 8 bits; 255 when there is no alpha.
    pub fn opacity_u8(&self, pixel: &[u8]) -> u8 {
        match self.alpha_offset() {
            Some(off) => match self.ty {
                ChannelType::U8 => u8::read(&pixel[off..]).to_u8(),
                ChannelType::U16 => u16::read(&pixel[off..]).to_u8(),
                ChannelType::F16 => half::f16::read(&pixel[off..]).to_u8(),
                ChannelType::F32 => f32::read(&pixel[off..]).to_u8(),
            },
            None => u8::MAX,
        }
    }

    /// Sets the alpha of the first `n` pixels of `pixels` to `alpha`.
    pub fn set_opacity_u8(&self, pixels: &mut [u8], alpha: u8, n: usize) {
        let Some(off) = self.alpha_offset() else {
            return;
        };
        for px in pixels.chunks_exact_mut(self.pixel_size).take(n) {
            let a = &mut px[off..];
            match self.ty {
                ChannelType::U8 => u8::from_u8(alpha).write(a),
                ChannelType::U16 => u16::from_u8(alpha).write(a),
                ChannelType::F16 => half::f16::from_u8(alpha).write(a),
                ChannelType::F32 => f32::from_u8(alpha).write(a),
            }
        }
    }

    /// Multiplies the alpha of the first `n` pixels by `alpha / 255`.
    pub fn multiply_alpha(&self, pixels: &mut [u8], alpha: u8, n: usize) {
        let Some(off) = self.alpha_offset() else {
            return;
        };
        fn apply<T: ChannelValue>(px: &mut [u8], alpha: u8) {
            let a = T::read(px).mul(T::from_u8(alpha));
            a.write(px);
        }
        for px in pixels.chunks_exact_mut(self.pixel_size).take(n) {
            let a = &mut px[off..];
            match self.ty {
                ChannelType::U8 => apply::<u8>(a, alpha),
                ChannelType::U16 => apply::<u16>(a, alpha),
                ChannelType::F16 => apply::<half::f16>(a, alpha),
                ChannelType::F32 => apply::<f32>(a, alpha),
            }
        }
    }
}

impl fmt::Debug for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorSpace")
            .field("id", &self.id)
            .field("model", &self.model)
            .field("type", &self.ty)
            .field("pixel_size", &self.pixel_size)
            .field("channels", &self.channels.iter().map(|c| c.name()).collect::<Vec<_>>())
            .finish()
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
