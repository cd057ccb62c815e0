//! Channel value types and their native-domain arithmetic.
//!
//! Compositing works directly on the native channel values of a pixel
//! format, so every channel storage type implements [`ChannelValue`]:
//!
//! - `u8` - 8-bit unsigned (0-255)
//! - `u16` - 16-bit unsigned (0-65535)
//! - `f16` - 16-bit float (half precision)
//! - `f32` - 32-bit float (single precision)
//!
//! # Blend Convention
//!
//! There is exactly one interpolation primitive,
//! [`lerp_toward_source`](ChannelValue::lerp_toward_source):
//!
//! ```text
//! lerp_toward_source(dst, src, f) = dst + f * (src - dst) / OPAQUE
//! ```
//!
//! It returns `dst` for `f == TRANSPARENT` and `src` for `f == OPAQUE`.
//! Every operator is expressed in terms of it.
//!
//! # Memory Layout
//!
//! Channels are stored in native byte order, unaligned, inside the raw
//! byte rows handed out by the paint device. [`read`](ChannelValue::read)
//! and [`write`](ChannelValue::write) do the byte-level access.
//!
//! ```
//! use pxl_core::ChannelValue;
//!
//! let d: u8 = 100;
//! assert_eq!(d.lerp_toward_source(200, 128), 150);
//! assert_eq!(d.lerp_toward_source(200, u8::OPAQUE), 200);
//! assert_eq!(d.lerp_toward_source(200, u8::TRANSPARENT), 100);
//! ```

use crate::format::ChannelType;
use half::f16;

/// Storage type of one channel, with the arithmetic compositing needs.
///
/// Integer implementations round to nearest; float implementations are
/// plain IEEE arithmetic without clamping.
pub trait ChannelValue: Copy + PartialEq + PartialOrd + Default + Send + Sync + 'static {
    /// Runtime tag of this type.
    const TYPE: ChannelType;

    /// Size in bytes.
    const SIZE: usize;

    /// Fully transparent / zero intensity.
    const TRANSPARENT: Self;

    /// Fully opaque / unit intensity.
    const OPAQUE: Self;

    /// Midpoint of the native range (128, 32768, 0.5).
    const HALF: Self;

    /// `OPAQUE` as an f64 in the native domain.
    const MAX_RAW: f64;

    /// Denominator bias used by color dodge (1 for integers).
    const DODGE_BIAS: f64;

    /// Reads a value from the first [`SIZE`](Self::SIZE) bytes of `bytes`.
    fn read(bytes: &[u8]) -> Self;

    /// Writes the value into the first [`SIZE`](Self::SIZE) bytes of `bytes`.
    fn write(self, bytes: &mut [u8]);

    /// Native value as f64 (no normalization).
    fn to_raw(self) -> f64;

    /// Converts an f64 in the native domain back, rounding and clamping
    /// integers to their representable range.
    fn from_raw(v: f64) -> Self;

    /// Scales an 8-bit mask/opacity value into this type's range.
    fn from_u8(v: u8) -> Self;

    /// Scales this value down to 8 bits.
    fn to_u8(self) -> u8;

    /// Product of two values in the unit domain: `a * b / OPAQUE`.
    fn mul(self, other: Self) -> Self;

    /// Quotient in the unit domain: `a * OPAQUE / b`, clamped to `OPAQUE`
    /// for integers. `b` must not be transparent.
    fn div(self, other: Self) -> Self;

    /// `dst + f * (src - dst) / OPAQUE`, with `self` as `dst`.
    fn lerp_toward_source(self, src: Self, f: Self) -> Self;

    /// `OPAQUE - self`.
    fn inv(self) -> Self;

    /// Saturating sum.
    fn add(self, other: Self) -> Self;

    /// Normalized value, `[0, 1]` for integers.
    #[inline]
    fn to_f32(self) -> f32 {
        (self.to_raw() / Self::MAX_RAW) as f32
    }

    /// From a normalized value; integers clamp to their range.
    #[inline]
    fn from_f32(v: f32) -> Self {
        Self::from_raw(v as f64 * Self::MAX_RAW)
    }

    /// Smaller of two values.
    #[inline]
    fn min_value(self, other: Self) -> Self {
        if other < self { other } else { self }
    }
}

/// Signed integer division rounding half away from zero.
#[inline]
fn div_round(n: i64, d: i64) -> i64 {
    if n >= 0 { (n + d / 2) / d } else { (n - d / 2) / d }
}

impl ChannelValue for u8 {
    const TYPE: ChannelType = ChannelType::U8;
    const SIZE: usize = 1;
    const TRANSPARENT: Self = 0;
    const OPAQUE: Self = u8::MAX;
    const HALF: Self = 128;
    const MAX_RAW: f64 = 255.0;
    const DODGE_BIAS: f64 = 1.0;

    #[inline]
    fn read(bytes: &[u8]) -> Self {
        bytes[0]
    }

    #[inline]
    fn write(self, bytes: &mut [u8]) {
        bytes[0] = self;
    }

    #[inline]
    fn to_raw(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_raw(v: f64) -> Self {
        v.round().clamp(0.0, 255.0) as u8
    }

    #[inline]
    fn from_u8(v: u8) -> Self {
        v
    }

    #[inline]
    fn to_u8(self) -> u8 {
        self
    }

    #[inline]
    fn mul(self, other: Self) -> Self {
        // (a*b + 128 + ((a*b + 128) >> 8)) >> 8 == round(a*b/255)
        let t = self as u32 * other as u32 + 0x80;
        ((t + (t >> 8)) >> 8) as u8
    }

    #[inline]
    fn div(self, other: Self) -> Self {
        debug_assert!(other != 0);
        let q = (self as u32 * 255 + other as u32 / 2) / other as u32;
        q.min(255) as u8
    }

    #[inline]
    fn lerp_toward_source(self, src: Self, f: Self) -> Self {
        let diff = (src as i64 - self as i64) * f as i64;
        (self as i64 + div_round(diff, 255)) as u8
    }

    #[inline]
    fn inv(self) -> Self {
        255 - self
    }

    #[inline]
    fn add(self, other: Self) -> Self {
        self.saturating_add(other)
    }
}

impl ChannelValue for u16 {
    const TYPE: ChannelType = ChannelType::U16;
    const SIZE: usize = 2;
    const TRANSPARENT: Self = 0;
    const OPAQUE: Self = u16::MAX;
    const HALF: Self = 32768;
    const MAX_RAW: f64 = 65535.0;
    const DODGE_BIAS: f64 = 1.0;

    #[inline]
    fn read(bytes: &[u8]) -> Self {
        u16::from_ne_bytes([bytes[0], bytes[1]])
    }

    #[inline]
    fn write(self, bytes: &mut [u8]) {
        bytes[..2].copy_from_slice(&self.to_ne_bytes());
    }

    #[inline]
    fn to_raw(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_raw(v: f64) -> Self {
        v.round().clamp(0.0, 65535.0) as u16
    }

    #[inline]
    fn from_u8(v: u8) -> Self {
        // 0xFF * 257 == 0xFFFF
        v as u16 * 257
    }

    #[inline]
    fn to_u8(self) -> u8 {
        ((self as u32 * 255 + 32767) / 65535) as u8
    }

    #[inline]
    fn mul(self, other: Self) -> Self {
        ((self as u64 * other as u64 + 32767) / 65535) as u16
    }

    #[inline]
    fn div(self, other: Self) -> Self {
        debug_assert!(other != 0);
        let q = (self as u64 * 65535 + other as u64 / 2) / other as u64;
        q.min(65535) as u16
    }

    #[inline]
    fn lerp_toward_source(self, src: Self, f: Self) -> Self {
        let diff = (src as i64 - self as i64) * f as i64;
        (self as i64 + div_round(diff, 65535)) as u16
    }

    #[inline]
    fn inv(self) -> Self {
        65535 - self
    }

    #[inline]
    fn add(self, other: Self) -> Self {
        self.saturating_add(other)
    }
}

impl ChannelValue for f16 {
    const TYPE: ChannelType = ChannelType::F16;
    const SIZE: usize = 2;
    const TRANSPARENT: Self = f16::ZERO;
    const OPAQUE: Self = f16::ONE;
    const HALF: Self = f16::from_f32_const(0.5);
    const MAX_RAW: f64 = 1.0;
    const DODGE_BIAS: f64 = 1e-3;

    #[inline]
    fn read(bytes: &[u8]) -> Self {
        f16::from_ne_bytes([bytes[0], bytes[1]])
    }

    #[inline]
    fn write(self, bytes: &mut [u8]) {
        bytes[..2].copy_from_slice(&self.to_ne_bytes());
    }

    #[inline]
    fn to_raw(self) -> f64 {
        self.to_f64()
    }

    #[inline]
    fn from_raw(v: f64) -> Self {
        f16::from_f64(v)
    }

    #[inline]
    fn from_u8(v: u8) -> Self {
        f16::from_f32(v as f32 / 255.0)
    }

    #[inline]
    fn to_u8(self) -> u8 {
        (self.to_f32().clamp(0.0, 1.0) * 255.0).round() as u8
    }

    #[inline]
    fn mul(self, other: Self) -> Self {
        f16::from_f32(self.to_f32() * other.to_f32())
    }

    #[inline]
    fn div(self, other: Self) -> Self {
        f16::from_f32(self.to_f32() / other.to_f32())
    }

    #[inline]
    fn lerp_toward_source(self, src: Self, f: Self) -> Self {
        let f = f.to_f32();
        f16::from_f32(self.to_f32() * (1.0 - f) + src.to_f32() * f)
    }

    #[inline]
    fn inv(self) -> Self {
        f16::from_f32(1.0 - self.to_f32())
    }

    #[inline]
    fn add(self, other: Self) -> Self {
        f16::from_f32(self.to_f32() + other.to_f32())
    }
}

impl ChannelValue for f32 {
    const TYPE: ChannelType = ChannelType::F32;
    const SIZE: usize = 4;
    const TRANSPARENT: Self = 0.0;
    const OPAQUE: Self = 1.0;
    const HALF: Self = 0.5;
    const MAX_RAW: f64 = 1.0;
    const DODGE_BIAS: f64 = 1e-6;

    #[inline]
    fn read(bytes: &[u8]) -> Self {
        f32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    #[inline]
    fn write(self, bytes: &mut [u8]) {
        bytes[..4].copy_from_slice(&self.to_ne_bytes());
    }

    #[inline]
    fn to_raw(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_raw(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn from_u8(v: u8) -> Self {
        v as f32 / 255.0
    }

    #[inline]
    fn to_u8(self) -> u8 {
        (self.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    #[inline]
    fn mul(self, other: Self) -> Self {
        self * other
    }

    #[inline]
    fn div(self, other: Self) -> Self {
        self / other
    }

    #[inline]
    fn lerp_toward_source(self, src: Self, f: Self) -> Self {
        self * (1.0 - f) + src * f
    }

    #[inline]
    fn inv(self) -> Self {
        1.0 - self
    }

    #[inline]
    fn add(self, other: Self) -> Self {
        self + other
    }
}

/// Reads channel bytes of the given type as a normalized f32.
///
/// Integer channels map to `[0, 1]`; float channels pass through.
#[inline]
pub fn read_normalized(ty: ChannelType, bytes: &[u8]) -> f32 {
    match ty {
        ChannelType::U8 => u8::read(bytes).to_f32(),
        ChannelType::U16 => u16::read(bytes).to_f32(),
        ChannelType::F16 => f16::read(bytes).to_f32(),
        ChannelType::F32 => f32::read(bytes),
    }
}

/// Writes a normalized f32 into channel bytes of the given type.
#[inline]
pub fn write_normalized(ty: ChannelType, v: f32, bytes: &mut [u8]) {
    match ty {
        ChannelType::U8 => u8::from_f32(v).write(bytes),
        ChannelType::U16 => u16::from_f32(v).write(bytes),
        ChannelType::F16 => f16::from_f32(v).write(bytes),
        ChannelType::F32 => v.write(bytes),
    }
}

/// Formats the native value of channel bytes for display.
pub fn native_text(ty: ChannelType, bytes: &[u8]) -> String {
    match ty {
        ChannelType::U8 => u8::read(bytes).to_string(),
        ChannelType::U16 => u16::read(bytes).to_string(),
        ChannelType::F16 => f16::read(bytes).to_string(),
        ChannelType::F32 => f32::read(bytes).to_string(),
    }
}
