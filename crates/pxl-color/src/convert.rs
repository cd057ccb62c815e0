//! Pixel-level color conversion through device RGB.
//!
//! The functions here bridge raw pixel bytes of any [`ColorSpace`] and
//! device RGB, which is how a host exchanges colors with a UI color picker
//! or moves pixels between formats:
//!
//! - [`to_rgb8`] / [`from_rgb8`] - 8-bit device RGB
//! - [`to_rgb_f32`] / [`from_rgb_f32`] - normalized device RGB
//! - [`convert_pixel`] / [`convert_pixels`] - format to format, alpha included
//!
//! The [`RgbConvert`] trait exposes the per-model math on native triples.
//!
//! # Example
//!
//! ```rust
//! use pxl_color::convert;
//! use pxl_core::ColorSpace;
//!
//! let cs = ColorSpace::ycbcr_u8();
//! let mut px = [0u8; 4];
//! convert::from_rgb8(&cs, [90, 90, 90], 255, &mut px);
//! assert_eq!(px, [90, 128, 128, 255]);
//! assert_eq!(convert::to_rgb8(&cs, &px), [90, 90, 90]);
//! ```

use crate::error::{ColorError, ColorResult};
use crate::{gray, ycbcr};
use half::f16;
use pxl_core::{ChannelType, ChannelValue, ColorModel, ColorSpace};

/// Per-model conversions on native device RGB triples.
///
/// # Example
///
/// ```rust
/// use pxl_color::RgbConvert;
///
/// let ycc = [255u8, 0, 0].to_ycbcr();
/// assert_eq!(ycc[0], 76);
/// assert_eq!([40u8, 40, 40].to_gray(), 40);
/// ```
pub trait RgbConvert: Sized {
    /// Channel type of the triple.
    type Channel: ChannelValue;

    /// Device RGB to Y/Cb/Cr.
    fn to_ycbcr(self) -> Self;

    /// Y/Cb/Cr to device RGB.
    fn from_ycbcr(self) -> Self;

    /// Device RGB to gray.
    fn to_gray(self) -> Self::Channel;

    /// Converts device RGB into the color channels of `model`.
    fn to_model(self, model: ColorModel) -> Self;

    /// Converts color channels of `model` back to device RGB.
    fn from_model(self, model: ColorModel) -> Self;
}

impl<T: ChannelValue> RgbConvert for [T; 3] {
    type Channel = T;

    #[inline]
    fn to_ycbcr(self) -> Self {
        ycbcr::rgb_to_ycbcr(self)
    }

    #[inline]
    fn from_ycbcr(self) -> Self {
        ycbcr::ycbcr_to_rgb(self)
    }

    #[inline]
    fn to_gray(self) -> T {
        gray::rgb_to_gray(self)
    }

    /// Gray occupies the first slot; the other two are left as zero.
    #[inline]
    fn to_model(self, model: ColorModel) -> Self {
        match model {
            ColorModel::YCbCr => self.to_ycbcr(),
            ColorModel::Gray => [self.to_gray(), T::TRANSPARENT, T::TRANSPARENT],
        }
    }

    #[inline]
    fn from_model(self, model: ColorModel) -> Self {
        match model {
            ColorModel::YCbCr => self.from_ycbcr(),
            ColorModel::Gray => gray::gray_to_rgb(self[0]),
        }
    }
}

/// Reads the color channels of `pixel` (model order) as native values.
fn read_color<T: ChannelValue>(cs: &ColorSpace, pixel: &[u8]) -> [T; 3] {
    let mut out = [T::TRANSPARENT; 3];
    for (slot, c) in out.iter_mut().zip(cs.color_channels()) {
        *slot = T::read(&pixel[c.offset()..]);
    }
    out
}

fn write_color<T: ChannelValue>(cs: &ColorSpace, values: [T; 3], pixel: &mut [u8]) {
    for (v, c) in values.into_iter().zip(cs.color_channels()) {
        v.write(&mut pixel[c.offset()..]);
    }
}

fn to_rgb_f32_typed<T: ChannelValue>(cs: &ColorSpace, pixel: &[u8]) -> [f32; 3] {
    read_color::<T>(cs, pixel)
        .from_model(cs.color_model())
        .map(ChannelValue::to_f32)
}

fn from_rgb_f32_typed<T: ChannelValue>(cs: &ColorSpace, rgb: [f32; 3], pixel: &mut [u8]) {
    let native = rgb.map(T::from_f32).to_model(cs.color_model());
    write_color(cs, native, pixel);
}

/// Normalized device RGB of `pixel`.
///
/// Integer formats map to `[0, 1]`; float formats pass through unclamped.
///
/// # Panics
///
/// Panics if `pixel` is shorter than `cs.pixel_size()`.
pub fn to_rgb_f32(cs: &ColorSpace, pixel: &[u8]) -> [f32; 3] {
    match cs.channel_type() {
        ChannelType::U8 => to_rgb_f32_typed::<u8>(cs, pixel),
        ChannelType::U16 => to_rgb_f32_typed::<u16>(cs, pixel),
        ChannelType::F16 => to_rgb_f32_typed::<f16>(cs, pixel),
        ChannelType::F32 => to_rgb_f32_typed::<f32>(cs, pixel),
    }
}

/// Writes normalized device RGB and opacity into `pixel`.
///
/// The RGB triple is quantized to the channel type before the model
/// conversion, so integer formats convert in their own native domain.
pub fn from_rgb_f32(cs: &ColorSpace, rgb: [f32; 3], opacity: u8, pixel: &mut [u8]) {
    match cs.channel_type() {
        ChannelType::U8 => from_rgb_f32_typed::<u8>(cs, rgb, pixel),
        ChannelType::U16 => from_rgb_f32_typed::<u16>(cs, rgb, pixel),
        ChannelType::F16 => from_rgb_f32_typed::<f16>(cs, rgb, pixel),
        ChannelType::F32 => from_rgb_f32_typed::<f32>(cs, rgb, pixel),
    }
    cs.set_opacity_u8(pixel, opacity, 1);
}

/// 8-bit device RGB of `pixel`. Opacity is available via
/// [`ColorSpace::opacity_u8`].
pub fn to_rgb8(cs: &ColorSpace, pixel: &[u8]) -> [u8; 3] {
    match cs.channel_type() {
        ChannelType::U8 => read_color::<u8>(cs, pixel).from_model(cs.color_model()),
        _ => to_rgb_f32(cs, pixel).map(|v| v.to_u8()),
    }
}

/// Writes 8-bit device RGB and opacity into `pixel`.
pub fn from_rgb8(cs: &ColorSpace, rgb: [u8; 3], opacity: u8, pixel: &mut [u8]) {
    match cs.channel_type() {
        ChannelType::U8 => {
            write_color(cs, rgb.to_model(cs.color_model()), pixel);
            cs.set_opacity_u8(pixel, opacity, 1);
        }
        ChannelType::U16 => {
            write_color(cs, rgb.map(u16::from_u8).to_model(cs.color_model()), pixel);
            cs.set_opacity_u8(pixel, opacity, 1);
        }
        _ => from_rgb_f32(cs, rgb.map(f32::from_u8), opacity, pixel),
    }
}

/// Converts one pixel between formats through normalized device RGB.
///
/// Alpha is carried at 8-bit precision; a destination without alpha
/// drops it.
pub fn convert_pixel(src_cs: &ColorSpace, src: &[u8], dst_cs: &ColorSpace, dst: &mut [u8]) {
    let rgb = to_rgb_f32(src_cs, src);
    let opacity = src_cs.opacity_u8(src);
    from_rgb_f32(dst_cs, rgb, opacity, dst);
}

/// Converts `n` packed pixels between formats.
///
/// Fails with [`ColorError::SizeMismatch`] if either buffer is too short.
pub fn convert_pixels(
    src_cs: &ColorSpace,
    src: &[u8],
    dst_cs: &ColorSpace,
    dst: &mut [u8],
    n: usize,
) -> ColorResult<()> {
    let src_len = n * src_cs.pixel_size();
    if src.len() < src_len {
        return Err(ColorError::SizeMismatch {
            expected: src_len,
            got: src.len(),
        });
    }
    let dst_len = n * dst_cs.pixel_size();
    if dst.len() < dst_len {
        return Err(ColorError::SizeMismatch {
            expected: dst_len,
            got: dst.len(),
        });
    }

    if src_cs.id() == dst_cs.id() {
        dst[..dst_len].copy_from_slice(&src[..src_len]);
        return Ok(());
    }

    for (s, d) in src
        .chunks_exact(src_cs.pixel_size())
        .zip(dst.chunks_exact_mut(dst_cs.pixel_size()))
        .take(n)
    {
        convert_pixel(src_cs, s, dst_cs, d);
    }
    Ok(())
}
