//! Per-channel blend functions of the light family.
//!
//! Every function takes the source and destination channel values in the
//! native domain (`0..=max`, with `max` the opaque value of the channel
//! type) and returns the blended value in the same domain. Results are
//! rounded and clamped by the caller when converting back to the channel
//! type.

use pxl_core::ChannelValue;

/// Blend function of a light-family operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightBlend {
    /// Multiplicative complement.
    Screen,
    /// Dst-weighted contrast.
    Overlay,
    /// Mix of multiply and screen, weighted by the source.
    HardLight,
    /// Soft contrast in normalized space.
    SoftLight,
    /// Color dodge.
    Dodge,
}

impl LightBlend {
    /// Blends one channel in the native domain of `T`.
    #[inline]
    pub fn apply<T: ChannelValue>(self, src: f64, dst: f64) -> f64 {
        let max = T::MAX_RAW;
        match self {
            Self::Screen => screen(src, dst, max),
            Self::Overlay => overlay(src, dst, max),
            Self::HardLight => hard_light(src, dst, max),
            Self::SoftLight => soft_light(src, dst, max),
            Self::Dodge => dodge(src, dst, max, T::DODGE_BIAS),
        }
    }
}

/// `s * d / max`.
#[inline]
pub fn multiply(src: f64, dst: f64, max: f64) -> f64 {
    src * dst / max
}

/// `max - (max - d)(max - s) / max`.
#[inline]
pub fn screen(src: f64, dst: f64, max: f64) -> f64 {
    max - (max - dst) * (max - src) / max
}

/// `d (d + 2 s (max - d) / max) / max`.
#[inline]
pub fn overlay(src: f64, dst: f64, max: f64) -> f64 {
    dst * (dst + 2.0 * src * (max - dst) / max) / max
}

/// `(max - s)/max * multiply + s/max * screen`.
#[inline]
pub fn hard_light(src: f64, dst: f64, max: f64) -> f64 {
    (max - src) / max * multiply(src, dst, max) + src / max * screen(src, dst, max)
}

/// Soft light on normalized values, scaled back to `max`.
#[inline]
pub fn soft_light(src: f64, dst: f64, max: f64) -> f64 {
    let s = src / max;
    let d = (dst / max).max(0.0);
    let r = if s <= 0.5 {
        (2.0 * s - 1.0) * (d - d * d) + d
    } else {
        (2.0 * s - 1.0) * (d.sqrt() - d) + d
    };
    r * max
}

/// `min(d (max + bias) / (max + bias - s), max)`.
///
/// `bias` is 1 for integer channels. A source at or above `max + bias`
/// saturates to `max`.
#[inline]
pub fn dodge(src: f64, dst: f64, max: f64, bias: f64) -> f64 {
    let denom = max + bias - src;
    if denom <= 0.0 {
        return max;
    }
    (dst * (max + bias) / denom).min(max)
}
