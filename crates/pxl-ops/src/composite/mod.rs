//! Compositing of native pixel rows.
//!
//! A compositing call blends a rectangular region of source pixels into
//! destination pixels of the same [`ColorSpace`], in place, weighted by the
//! source alpha, an optional 8-bit coverage mask and a call-wide opacity.
//!
//! # Operators
//!
//! - [`CompositeOp::Over`] - standard "source over destination"
//! - [`CompositeOp::Erase`] - reduces destination alpha by source coverage
//! - [`CompositeOp::Copy`] - raw byte copy, ignores mask, opacity and flags
//! - [`CompositeOp::Screen`], [`CompositeOp::Overlay`],
//!   [`CompositeOp::SoftLight`], [`CompositeOp::HardLight`],
//!   [`CompositeOp::Dodge`] - the light family, blending within the
//!   intersection of source and destination coverage
//! - [`CompositeOp::Undefined`] - no-op, the target of unknown names
//!
//! # Entry Points
//!
//! - [`composite`] - checked, on [`PixelViewMut`] / [`PixelView`]
//! - [`composite_region`] - raw rows and strides; trusts its caller
//!
//! # Example
//!
//! ```rust
//! use pxl_core::{ChannelFlags, ColorSpace, PixelView, PixelViewMut};
//! use pxl_ops::composite::{composite, CompositeOp};
//!
//! let cs = ColorSpace::ycbcr_u8();
//! let mut dst = vec![100u8, 128, 128, 255];
//! let src = vec![200u8, 128, 128, 128];
//!
//! let mut dst_view = PixelViewMut::packed(&mut dst, 1, 1, &cs).unwrap();
//! let src_view = PixelView::packed(&src, 1, 1, &cs).unwrap();
//! composite(CompositeOp::Over, &mut dst_view, &src_view, None, 255, ChannelFlags::ALL).unwrap();
//!
//! assert_eq!(dst, vec![150, 128, 128, 255]);
//! ```

mod alpha;
mod light;
pub mod math;

use crate::{OpsError, OpsResult};
use half::f16;
use math::LightBlend;
use pxl_core::{
    ChannelFlags, ChannelType, ChannelValue, ColorSpace, Error, MAX_CHANNELS, MaskView, PixelView,
    PixelViewMut,
};
use std::fmt;
use tracing::{debug, trace};

/// Compositing operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompositeOp {
    /// Source over destination.
    #[default]
    Over,
    /// Byte copy of the whole pixel.
    Copy,
    /// Erase destination alpha.
    Erase,
    /// Screen (lighten).
    Screen,
    /// Overlay (contrast).
    Overlay,
    /// Soft light. Never changes destination alpha.
    SoftLight,
    /// Hard light. Never changes destination alpha.
    HardLight,
    /// Color dodge.
    Dodge,
    /// No-op.
    Undefined,
}

impl CompositeOp {
    /// Every operator, in declaration order.
    pub const ALL: [CompositeOp; 9] = [
        Self::Over,
        Self::Copy,
        Self::Erase,
        Self::Screen,
        Self::Overlay,
        Self::SoftLight,
        Self::HardLight,
        Self::Dodge,
        Self::Undefined,
    ];

    /// Stable identifier, as stored in documents.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Over => "normal",
            Self::Copy => "copy",
            Self::Erase => "erase",
            Self::Screen => "screen",
            Self::Overlay => "overlay",
            Self::SoftLight => "soft_light",
            Self::HardLight => "hard_light",
            Self::Dodge => "dodge",
            Self::Undefined => "undefined",
        }
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Over => "Normal",
            Self::Copy => "Copy",
            Self::Erase => "Erase",
            Self::Screen => "Screen",
            Self::Overlay => "Overlay",
            Self::SoftLight => "Soft Light",
            Self::HardLight => "Hard Light",
            Self::Dodge => "Color Dodge",
            Self::Undefined => "Undefined",
        }
    }

    /// Resolves an operator by id or name.
    ///
    /// Matching ignores case, `_`, `-` and spaces, so `"soft_light"`,
    /// `"SoftLight"` and `"Soft Light"` are the same operator. `"over"` is
    /// accepted for [`Over`](Self::Over). Unknown names resolve to
    /// [`Undefined`](Self::Undefined).
    pub fn from_name(name: &str) -> Self {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "normal" | "over" => Self::Over,
            "copy" => Self::Copy,
            "erase" => Self::Erase,
            "screen" => Self::Screen,
            "overlay" => Self::Overlay,
            "softlight" => Self::SoftLight,
            "hardlight" => Self::HardLight,
            "dodge" | "colordodge" => Self::Dodge,
            "undefined" => Self::Undefined,
            _ => {
                debug!(name, "unknown composite op, using undefined");
                Self::Undefined
            }
        }
    }

    /// Whether the operator never writes destination alpha.
    pub const fn is_alpha_locked(self) -> bool {
        matches!(self, Self::SoftLight | Self::HardLight)
    }

    /// Behavior on pixel formats without an alpha channel.
    pub const fn missing_alpha(self) -> MissingAlpha {
        match self {
            Self::Erase | Self::Undefined => MissingAlpha::Skip,
            _ => MissingAlpha::Opaque,
        }
    }

    /// Row kernel for the pixel-wise operators.
    fn kernel(self) -> Option<Kernel> {
        match self {
            Self::Over => Some(Kernel::Over),
            Self::Erase => Some(Kernel::Erase),
            Self::Screen => Some(Kernel::Light(LightBlend::Screen)),
            Self::Overlay => Some(Kernel::Light(LightBlend::Overlay)),
            Self::SoftLight => Some(Kernel::Light(LightBlend::SoftLight)),
            Self::HardLight => Some(Kernel::Light(LightBlend::HardLight)),
            Self::Dodge => Some(Kernel::Light(LightBlend::Dodge)),
            Self::Copy | Self::Undefined => None,
        }
    }
}

impl fmt::Display for CompositeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How an operator treats a pixel format that has no alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingAlpha {
    /// Source and destination count as fully opaque.
    Opaque,
    /// The operator has nothing to do and leaves the destination alone.
    Skip,
}

#[derive(Debug, Clone, Copy)]
enum Kernel {
    Over,
    Erase,
    Light(LightBlend),
}

/// Byte layout of one pixel, resolved against the channel flags.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PixelPlan {
    pub pixel_size: usize,
    /// Byte offset of alpha.
    pub alpha: Option<usize>,
    /// Destination alpha must not be written.
    pub alpha_locked: bool,
    color: [usize; MAX_CHANNELS],
    color_len: usize,
}

impl PixelPlan {
    pub fn new(cs: &ColorSpace, flags: ChannelFlags, op_locked: bool) -> Self {
        let mut color = [0usize; MAX_CHANNELS];
        let mut color_len = 0;
        for (i, c) in cs.channels().iter().enumerate() {
            if !c.is_alpha() && flags.contains(i) {
                color[color_len] = c.offset();
                color_len += 1;
            }
        }
        Self {
            pixel_size: cs.pixel_size(),
            alpha: cs.alpha_offset(),
            alpha_locked: op_locked || flags.locks_alpha(cs.alpha_channel_index()),
            color,
            color_len,
        }
    }

    /// Byte offsets of the color channels the operator may modify.
    #[inline]
    pub fn color_offsets(&self) -> &[usize] {
        &self.color[..self.color_len]
    }

    /// Source coverage: pixel alpha attenuated by mask and opacity.
    #[inline]
    pub fn source_alpha<T: ChannelValue>(&self, src: &[u8], mask: Option<u8>, opacity: Option<T>) -> T {
        let mut a = match self.alpha {
            Some(off) => T::read(&src[off..]),
            None => T::OPAQUE,
        };
        if let Some(m) = mask {
            a = a.mul(T::from_u8(m));
        }
        if let Some(o) = opacity {
            a = a.mul(o);
        }
        a
    }

    /// Blend factor for the color channels after accumulating `src_alpha`
    /// into the destination alpha.
    ///
    /// Writes the new alpha unless it is locked; locked or missing alpha
    /// yields `src_alpha` itself.
    #[inline]
    pub fn accumulate_alpha<T: ChannelValue>(&self, dst: &mut [u8], src_alpha: T) -> T {
        let Some(off) = self.alpha else {
            return src_alpha;
        };
        if self.alpha_locked {
            return src_alpha;
        }
        let dst_alpha = T::read(&dst[off..]);
        if dst_alpha == T::OPAQUE {
            return src_alpha;
        }
        let new_alpha = dst_alpha.add(dst_alpha.inv().mul(src_alpha));
        new_alpha.write(&mut dst[off..]);
        if new_alpha == T::TRANSPARENT {
            src_alpha
        } else {
            src_alpha.div(new_alpha)
        }
    }

    /// Writes `lerp_toward_source(dst, src, blend)` to every enabled color
    /// channel, copying verbatim when `blend` is opaque.
    #[inline]
    pub fn blend_colors<T: ChannelValue>(&self, dst: &mut [u8], src: &[u8], blend: T) {
        if blend == T::OPAQUE {
            for &off in self.color_offsets() {
                dst[off..off + T::SIZE].copy_from_slice(&src[off..off + T::SIZE]);
            }
            return;
        }
        for &off in self.color_offsets() {
            let d = T::read(&dst[off..]);
            let s = T::read(&src[off..]);
            d.lerp_toward_source(s, blend).write(&mut dst[off..]);
        }
    }
}

/// Composites `rows x cols` pixels of `src` into `dst`.
///
/// Both buffers hold pixels of `cs`; `mask` is `(bytes, stride)` with one
/// coverage byte per pixel. Every pixel whose coverage ends up fully
/// transparent is left untouched. Only `dst` is written.
///
/// Geometry is trusted: rows must satisfy `stride >= cols * pixel_size`
/// and the buffers must hold `rows` rows. Violations are checked in debug
/// builds and panic on slice bounds otherwise.
#[allow(clippy::too_many_arguments)]
pub fn composite_region(
    cs: &ColorSpace,
    op: CompositeOp,
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_stride: usize,
    mask: Option<(&[u8], usize)>,
    opacity: u8,
    rows: usize,
    cols: usize,
    flags: ChannelFlags,
) {
    trace!(rows, cols, op = op.id(), format = cs.id(), "composite::region");
    if rows == 0 || cols == 0 {
        return;
    }

    let row_bytes = cols * cs.pixel_size();
    debug_assert!(dst_stride >= row_bytes, "dst stride {dst_stride} < {row_bytes}");
    debug_assert!(src_stride >= row_bytes, "src stride {src_stride} < {row_bytes}");
    debug_assert!(dst.len() >= (rows - 1) * dst_stride + row_bytes);
    debug_assert!(src.len() >= (rows - 1) * src_stride + row_bytes);
    debug_assert!(mask.is_none_or(|(m, ms)| ms >= cols && m.len() >= (rows - 1) * ms + cols));

    if op == CompositeOp::Copy {
        for r in 0..rows {
            let d = r * dst_stride;
            let s = r * src_stride;
            dst[d..d + row_bytes].copy_from_slice(&src[s..s + row_bytes]);
        }
        return;
    }

    let Some(kernel) = op.kernel() else {
        trace!(op = op.id(), "composite: no-op");
        return;
    };
    if !cs.has_alpha() && op.missing_alpha() == MissingAlpha::Skip {
        return;
    }
    if opacity == 0 {
        return;
    }

    let region = Region {
        dst,
        dst_stride,
        src,
        src_stride,
        mask,
        opacity,
        rows,
        cols,
    };
    let plan = PixelPlan::new(cs, flags, op.is_alpha_locked());
    match cs.channel_type() {
        ChannelType::U8 => run::<u8>(kernel, &plan, region),
        ChannelType::U16 => run::<u16>(kernel, &plan, region),
        ChannelType::F16 => run::<f16>(kernel, &plan, region),
        ChannelType::F32 => run::<f32>(kernel, &plan, region),
    }
}

struct Region<'a> {
    dst: &'a mut [u8],
    dst_stride: usize,
    src: &'a [u8],
    src_stride: usize,
    mask: Option<(&'a [u8], usize)>,
    opacity: u8,
    rows: usize,
    cols: usize,
}

fn run<T: ChannelValue>(kernel: Kernel, plan: &PixelPlan, mut region: Region<'_>) {
    let row_bytes = region.cols * plan.pixel_size;
    let opacity = (region.opacity != u8::MAX).then(|| T::from_u8(region.opacity));

    for r in 0..region.rows {
        let d = r * region.dst_stride;
        let s = r * region.src_stride;
        let dst = &mut region.dst[d..d + row_bytes];
        let src = &region.src[s..s + row_bytes];
        let mask = region
            .mask
            .map(|(m, ms)| &m[r * ms..r * ms + region.cols]);

        match kernel {
            Kernel::Over => alpha::over_row::<T>(plan, dst, src, mask, opacity),
            Kernel::Erase => alpha::erase_row::<T>(plan, dst, src, mask, opacity),
            Kernel::Light(blend) => light::light_row::<T>(blend, plan, dst, src, mask, opacity),
        }
    }
}

/// Checks that two views can be composited together.
pub(crate) fn check_views(dst: &PixelViewMut<'_>, src: &PixelView<'_>, mask: Option<&MaskView<'_>>) -> OpsResult<()> {
    let (dcs, scs) = (dst.color_space(), src.color_space());
    if dcs.id() != scs.id() {
        return Err(OpsError::FormatMismatch(format!(
            "destination is {}, source is {}",
            dcs.id(),
            scs.id()
        )));
    }
    let size = (dst.width(), dst.height());
    if (src.width(), src.height()) != size {
        return Err(Error::dimension_mismatch(size, (src.width(), src.height())).into());
    }
    if let Some(m) = mask {
        if (m.width(), m.height()) != size {
            return Err(Error::dimension_mismatch(size, (m.width(), m.height())).into());
        }
    }
    Ok(())
}

/// Composites `src` into `dst` after checking that both share one pixel
/// format and size (and the mask, if any, the same size).
///
/// # Example
///
/// ```rust
/// use pxl_core::{ChannelFlags, ColorSpace, PixelView, PixelViewMut};
/// use pxl_ops::composite::{composite, CompositeOp};
///
/// let cs = ColorSpace::gray_u8();
/// let mut dst = vec![10u8, 255, 20, 255];
/// let src = vec![0u8, 0, 0, 0];
/// let mut d = PixelViewMut::packed(&mut dst, 2, 1, &cs).unwrap();
/// let s = PixelView::packed(&src, 2, 1, &cs).unwrap();
///
/// // Fully transparent source: nothing changes.
/// composite(CompositeOp::Over, &mut d, &s, None, 255, ChannelFlags::ALL).unwrap();
/// assert_eq!(dst, vec![10, 255, 20, 255]);
/// ```
pub fn composite(
    op: CompositeOp,
    dst: &mut PixelViewMut<'_>,
    src: &PixelView<'_>,
    mask: Option<&MaskView<'_>>,
    opacity: u8,
    flags: ChannelFlags,
) -> OpsResult<()> {
    check_views(dst, src, mask)?;
    let (width, height) = (dst.width(), dst.height());
    trace!(width, height, op = op.id(), "composite");

    let cs = dst.color_space();
    let dst_stride = dst.stride();
    composite_region(
        cs,
        op,
        dst.data_mut(),
        dst_stride,
        src.data(),
        src.stride(),
        mask.map(|m| (m.data(), m.stride())),
        opacity,
        height as usize,
        width as usize,
        flags,
    );
    Ok(())
}

/// [`composite`] on tightly packed `width x height` buffers.
///
/// Fails with [`OpsError::Core`] if a buffer is too short.
#[allow(clippy::too_many_arguments)]
pub fn composite_packed(
    cs: &ColorSpace,
    op: CompositeOp,
    dst: &mut [u8],
    src: &[u8],
    width: u32,
    height: u32,
    opacity: u8,
    flags: ChannelFlags,
) -> OpsResult<()> {
    let src = PixelView::packed(src, width, height, cs)?;
    let mut dst = PixelViewMut::packed(dst, width, height, cs)?;
    composite(op, &mut dst, &src, None, opacity, flags)
}
