//! YCbCr <-> device RGB conversions.
//!
//! Both directions work in the native domain of the channel type: device
//! RGB is expressed in the same integer range as the Y/Cb/Cr channels
//! (`[0, 255]` for u8, `[0, 65535]` for u16) and in `[0, 1]` for floats.
//!
//! # Formulas
//!
//! ```text
//! Y  = 0.2989 R + 0.587 G + 0.114 B
//! Cb = (B - Y) / (2 (1 - 0.114))   + mid
//! Cr = (R - Y) / (2 (1 - 0.2989))  + mid
//!
//! R = Y + (Cr - mid) (2 - 2 * 0.2989)
//! B = Y + (Cb - mid) (2 - 2 * 0.114)
//! G = (Y - 0.114 B - 0.2989 R) / 0.587
//! ```
//!
//! `mid` is 128 for u8, 32768 for u16 and 0.5 for floats. Integer results
//! are rounded and clamped to the channel range; float results are left
//! unclamped so they round-trip up to float rounding.
//!
//! The luma coefficients are fixed. Saved documents store colors as native
//! samples, so changing them would shift every stored YCbCr color.
//!
//! # Example
//!
//! ```rust
//! use pxl_color::ycbcr;
//!
//! let ycc = ycbcr::rgb_to_ycbcr([255u8, 255, 255]);
//! assert_eq!(ycc, [255, 128, 128]);
//!
//! let rgb = ycbcr::ycbcr_to_rgb([100u8, 128, 128]);
//! assert_eq!(rgb, [100, 100, 100]);
//! ```

use pxl_core::ChannelValue;

/// Luma weight of red.
pub const LUMA_R: f64 = 0.2989;
/// Luma weight of green.
pub const LUMA_G: f64 = 0.587;
/// Luma weight of blue.
pub const LUMA_B: f64 = 0.114;

/// `2 (1 - LUMA_B)`, the Cb scale.
pub const CB_SCALE: f64 = 2.0 * (1.0 - LUMA_B);
/// `2 (1 - LUMA_R)`, the Cr scale.
pub const CR_SCALE: f64 = 2.0 * (1.0 - LUMA_R);

/// Clamps a native-domain value for integer types only.
#[inline]
fn clamp_native<T: ChannelValue>(v: f64) -> f64 {
    if T::TYPE.is_integer() {
        v.clamp(0.0, T::MAX_RAW)
    } else {
        v
    }
}

/// Luma of a native-domain RGB triple.
#[inline]
pub(crate) fn luma(r: f64, g: f64, b: f64) -> f64 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

/// Converts device RGB to native Y/Cb/Cr.
#[inline]
pub fn rgb_to_ycbcr<T: ChannelValue>(rgb: [T; 3]) -> [T; 3] {
    let [r, g, b] = rgb.map(ChannelValue::to_raw);
    let mid = T::HALF.to_raw();
    let y = luma(r, g, b);
    let cb = (b - y) / CB_SCALE + mid;
    let cr = (r - y) / CR_SCALE + mid;
    [T::from_raw(y), T::from_raw(cb), T::from_raw(cr)]
}

/// Converts native Y/Cb/Cr to device RGB.
///
/// Green is derived from the clamped but unrounded red and blue, so the
/// only error an integer round trip accumulates is the final rounding.
#[inline]
pub fn ycbcr_to_rgb<T: ChannelValue>(ycc: [T; 3]) -> [T; 3] {
    let [y, cb, cr] = ycc.map(ChannelValue::to_raw);
    let mid = T::HALF.to_raw();
    let r = clamp_native::<T>(y + (cr - mid) * CR_SCALE);
    let b = clamp_native::<T>(y + (cb - mid) * CB_SCALE);
    let g = clamp_native::<T>((y - LUMA_B * b - LUMA_R * r) / LUMA_G);
    [T::from_raw(r), T::from_raw(g), T::from_raw(b)]
}

/// [`rgb_to_ycbcr`] for 8-bit channels.
#[inline]
pub fn rgb_to_ycbcr_u8(rgb: [u8; 3]) -> [u8; 3] {
    rgb_to_ycbcr(rgb)
}

/// [`ycbcr_to_rgb`] for 8-bit channels.
#[inline]
pub fn ycbcr_to_rgb_u8(ycc: [u8; 3]) -> [u8; 3] {
    ycbcr_to_rgb(ycc)
}

/// [`rgb_to_ycbcr`] for 16-bit channels.
#[inline]
pub fn rgb_to_ycbcr_u16(rgb: [u16; 3]) -> [u16; 3] {
    rgb_to_ycbcr(rgb)
}

/// [`ycbcr_to_rgb`] for 16-bit channels.
#[inline]
pub fn ycbcr_to_rgb_u16(ycc: [u16; 3]) -> [u16; 3] {
    ycbcr_to_rgb(ycc)
}

/// [`rgb_to_ycbcr`] for normalized f32 channels (no clamping).
#[inline]
pub fn rgb_to_ycbcr_f32(rgb: [f32; 3]) -> [f32; 3] {
    rgb_to_ycbcr(rgb)
}

/// [`ycbcr_to_rgb`] for normalized f32 channels (no clamping).
#[inline]
pub fn ycbcr_to_rgb_f32(ycc: [f32; 3]) -> [f32; 3] {
    ycbcr_to_rgb(ycc)
}
