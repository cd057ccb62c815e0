//! Row kernel shared by the light family (screen, overlay, soft light,
//! hard light, dodge).
//!
//! Coverage is the intersection of source and destination:
//! `src_alpha = min(src_alpha, dst_alpha)`. The blended value of each
//! enabled color channel is then mixed into the destination by the same
//! factor Over uses.

use super::PixelPlan;
use super::math::LightBlend;
use pxl_core::ChannelValue;

pub(super) fn light_row<T: ChannelValue>(
    blend: LightBlend,
    plan: &PixelPlan,
    dst: &mut [u8],
    src: &[u8],
    mask: Option<&[u8]>,
    opacity: Option<T>,
) {
    let ps = plan.pixel_size;
    for (i, (d, s)) in dst.chunks_exact_mut(ps).zip(src.chunks_exact(ps)).enumerate() {
        let mut src_alpha = plan.source_alpha::<T>(s, mask.map(|m| m[i]), opacity);
        if let Some(off) = plan.alpha {
            src_alpha = src_alpha.min_value(T::read(&d[off..]));
        }
        if src_alpha == T::TRANSPARENT {
            continue;
        }

        let src_blend = plan.accumulate_alpha(d, src_alpha);
        for &off in plan.color_offsets() {
            let dv = T::read(&d[off..]);
            let sv = T::read(&s[off..]);
            let result = T::from_raw(blend.apply::<T>(sv.to_raw(), dv.to_raw()));
            dv.lerp_toward_source(result, src_blend).write(&mut d[off..]);
        }
    }
}
