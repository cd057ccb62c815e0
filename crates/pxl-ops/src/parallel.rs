//! Parallel compositing using Rayon.
//!
//! The region is split into disjoint bands of destination rows and every
//! band runs the scalar [`composite_region`] on its own thread. Pixels are
//! independent of each other, so the result is byte-identical to the
//! sequential call.
//!
//! # Example
//!
//! ```rust
//! use pxl_core::{ChannelFlags, ColorSpace, PixelView, PixelViewMut};
//! use pxl_ops::{parallel, CompositeOp};
//!
//! let cs = ColorSpace::gray_u8();
//! let mut dst = vec![0u8; 256 * 256 * 2];
//! let src = vec![255u8; 256 * 256 * 2];
//! let mut d = PixelViewMut::packed(&mut dst, 256, 256, &cs).unwrap();
//! let s = PixelView::packed(&src, 256, 256, &cs).unwrap();
//!
//! parallel::composite_par(CompositeOp::Over, &mut d, &s, None, 255, ChannelFlags::ALL).unwrap();
//! assert!(dst.iter().all(|&b| b == 255));
//! ```

use crate::OpsResult;
use crate::composite::{CompositeOp, check_views, composite_region};
use pxl_core::{ChannelFlags, ColorSpace, MaskView, PixelView, PixelViewMut};
use rayon::prelude::*;
use tracing::trace;

/// Rows per band below which splitting is not worth it.
const MIN_BAND_ROWS: usize = 8;

/// Parallel [`composite_region`] with the same arguments and contract.
#[allow(clippy::too_many_arguments)]
pub fn composite_region_par(
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
    if rows == 0 || cols == 0 {
        return;
    }
    let band_rows = rows
        .div_ceil(rayon::current_num_threads())
        .max(MIN_BAND_ROWS);
    if band_rows >= rows {
        composite_region(cs, op, dst, dst_stride, src, src_stride, mask, opacity, rows, cols, flags);
        return;
    }
    trace!(rows, cols, band_rows, op = op.id(), "composite::par");

    let row_bytes = cols * cs.pixel_size();
    let dst_len = (rows - 1) * dst_stride + row_bytes;
    dst[..dst_len]
        .par_chunks_mut(band_rows * dst_stride)
        .enumerate()
        .for_each(|(band, dst_band)| {
            let first = band * band_rows;
            let band_len = band_rows.min(rows - first);
            composite_region(
                cs,
                op,
                dst_band,
                dst_stride,
                &src[first * src_stride..],
                src_stride,
                mask.map(|(m, ms)| (&m[first * ms..], ms)),
                opacity,
                band_len,
                cols,
                flags,
            );
        });
}

/// Parallel [`composite`](crate::composite::composite) on checked views.
pub fn composite_par(
    op: CompositeOp,
    dst: &mut PixelViewMut<'_>,
    src: &PixelView<'_>,
    mask: Option<&MaskView<'_>>,
    opacity: u8,
    flags: ChannelFlags,
) -> OpsResult<()> {
    check_views(dst, src, mask)?;
    let (width, height) = (dst.width(), dst.height());
    let cs = dst.color_space();
    let dst_stride = dst.stride();
    composite_region_par(
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
