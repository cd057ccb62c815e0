//! Over and Erase row kernels.

use super::PixelPlan;
use pxl_core::ChannelValue;

/// Source over destination for one row.
///
/// A transparent destination takes the source coverage as its alpha and
/// the source colors verbatim. Otherwise alpha accumulates as
/// `dst + (1 - dst) * src` and colors move toward the source by
/// `src_alpha / new_alpha`.
pub(super) fn over_row<T: ChannelValue>(
    plan: &PixelPlan,
    dst: &mut [u8],
    src: &[u8],
    mask: Option<&[u8]>,
    opacity: Option<T>,
) {
    let ps = plan.pixel_size;
    for (i, (d, s)) in dst.chunks_exact_mut(ps).zip(src.chunks_exact(ps)).enumerate() {
        let src_alpha = plan.source_alpha::<T>(s, mask.map(|m| m[i]), opacity);
        if src_alpha == T::TRANSPARENT {
            continue;
        }

        let src_blend = match plan.alpha {
            Some(off) if !plan.alpha_locked && T::read(&d[off..]) == T::TRANSPARENT => {
                src_alpha.write(&mut d[off..]);
                T::OPAQUE
            }
            _ => plan.accumulate_alpha(d, src_alpha),
        };
        plan.blend_colors(d, s, src_blend);
    }
}

/// Erase for one row: `dst_alpha *= 1 - coverage`.
///
/// Colors are untouched. Nothing happens when alpha is locked or the
/// format has no alpha.
pub(super) fn erase_row<T: ChannelValue>(
    plan: &PixelPlan,
    dst: &mut [u8],
    src: &[u8],
    mask: Option<&[u8]>,
    opacity: Option<T>,
) {
    let Some(off) = plan.alpha else {
        return;
    };
    if plan.alpha_locked {
        return;
    }
    let ps = plan.pixel_size;
    for (i, (d, s)) in dst.chunks_exact_mut(ps).zip(src.chunks_exact(ps)).enumerate() {
        let coverage = plan.source_alpha::<T>(s, mask.map(|m| m[i]), opacity);
        if coverage == T::TRANSPARENT {
            continue;
        }
        let a = T::read(&d[off..]);
        a.mul(coverage.inv()).write(&mut d[off..]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pxl_core::{ChannelFlags, ColorSpace};

    fn plan(cs: &ColorSpace, flags: ChannelFlags) -> PixelPlan {
        PixelPlan::new(cs, flags, false)
    }

    #[test]
    fn test_over_opaque_source_copies() {
        let cs = ColorSpace::ycbcr_u8();
        let mut dst = [10u8, 20, 30, 255];
        over_row::<u8>(&plan(&cs, ChannelFlags::ALL), &mut dst, &[200, 100, 50, 255], None, None);
        assert_eq!(dst, [200, 100, 50, 255]);
    }

    #[test]
    fn test_over_onto_transparent() {
        let cs = ColorSpace::ycbcr_u8();
        let mut dst = [10u8, 20, 30, 0];
        over_row::<u8>(&plan(&cs, ChannelFlags::ALL), &mut dst, &[200, 100, 50, 64], None, None);
        assert_eq!(dst, [200, 100, 50, 64]);
    }

    #[test]
    fn test_over_accumulates_alpha() {
        let cs = ColorSpace::gray_u8();
        let mut dst = [0u8, 128];
        over_row::<u8>(&plan(&cs, ChannelFlags::ALL), &mut dst, &[255, 128], None, None);
        // 128 + (127 * 128 / 255) = 192
        assert_eq!(dst[1], 192);
        // blend = 128 / 192 of the way to white
        assert_eq!(dst[0], 170);
    }

    #[test]
    fn test_over_alpha_locked_keeps_alpha() {
        let cs = ColorSpace::gray_u8();
        let flags = ChannelFlags::from_indices(&[0]);
        let mut dst = [0u8, 0];
        over_row::<u8>(&plan(&cs, flags), &mut dst, &[255, 255], None, None);
        assert_eq!(dst, [255, 0]);
    }

    #[test]
    fn test_over_mask_skips_pixels() {
        let cs = ColorSpace::gray_u8();
        let mut dst = [1u8, 255, 2, 255];
        over_row::<u8>(&plan(&cs, ChannelFlags::ALL), &mut dst, &[9, 255, 9, 255], Some(&[0, 255]), None);
        assert_eq!(dst, [1, 255, 9, 255]);
    }

    #[test]
    fn test_erase() {
        let cs = ColorSpace::gray_u16();
        let mut dst = [0u8; 4];
        1234u16.write(&mut dst[0..]);
        u16::OPAQUE.write(&mut dst[2..]);
        let mut src = [0u8; 4];
        u16::OPAQUE.write(&mut src[2..]);

        erase_row::<u16>(&plan(&cs, ChannelFlags::ALL), &mut dst, &src, Some(&[128]), None);
        assert_eq!(u16::read(&dst[0..]), 1234);
        // 65535 * (1 - 32896/65535)
        assert_eq!(u16::read(&dst[2..]), 32639);
    }

    #[test]
    fn test_erase_locked_is_noop() {
        let cs = ColorSpace::gray_u8();
        let mut dst = [7u8, 200];
        erase_row::<u8>(&plan(&cs, ChannelFlags::from_indices(&[0])), &mut dst, &[0, 255], None, None);
        assert_eq!(dst, [7, 200]);
    }
}
