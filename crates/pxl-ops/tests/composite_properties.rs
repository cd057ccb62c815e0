//! Behavioral properties of the compositing operators across every
//! built-in pixel format.

use approx::assert_abs_diff_eq;
use pxl_color::convert;
use pxl_core::{
    ChannelDescriptor, ChannelFlags, ChannelRole, ChannelType, ChannelValue, ColorModel,
    ColorSpace, PixelFormatRegistry,
};
use pxl_ops::{CompositeOp, composite_region};

// ---------------------------------------------------------------------------
// Input generators
// ---------------------------------------------------------------------------

/// Deterministic byte noise.
fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.wrapping_mul(747_796_405).wrapping_add(2_891_336_453);
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 24) as u8
        })
        .collect()
}

/// `n` pixels of `cs` with colors and alpha spread over the native range.
fn pixels(cs: &ColorSpace, n: usize, seed: u32) -> Vec<u8> {
    let mut out = vec![0u8; n * cs.pixel_size()];
    let bytes = noise(n * 4, seed);
    for (i, px) in out.chunks_exact_mut(cs.pixel_size()).enumerate() {
        let b = &bytes[i * 4..i * 4 + 4];
        convert::from_rgb8(cs, [b[0], b[1], b[2]], b[3], px);
    }
    out
}

/// Alpha of every pixel, scaled to 8 bits.
fn alphas(cs: &ColorSpace, data: &[u8]) -> Vec<u8> {
    data.chunks_exact(cs.pixel_size())
        .map(|px| cs.opacity_u8(px))
        .collect()
}

fn builtin() -> Vec<ColorSpace> {
    ColorSpace::builtin()
}

fn run(cs: &ColorSpace, op: CompositeOp, dst: &mut [u8], src: &[u8], mask: Option<&[u8]>, opacity: u8, n: usize) {
    let ps = cs.pixel_size();
    composite_region(
        cs,
        op,
        dst,
        n * ps,
        src,
        n * ps,
        mask.map(|m| (m, n)),
        opacity,
        1,
        n,
        ChannelFlags::ALL,
    );
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn over_half_opaque_gray_on_opaque_gray() {
    let registry = PixelFormatRegistry::with_builtin();
    let cs = registry.get("YCbCrAU8").unwrap();
    let mut dst = [100u8, 128, 128, 255];
    let src = [200u8, 128, 128, 128];

    composite_region(&cs, CompositeOp::Over, &mut dst, 4, &src, 4, None, 255, 1, 1, ChannelFlags::ALL);

    assert_eq!(dst, [150, 128, 128, 255]);
}

#[test]
fn copy_is_byte_identical() {
    for cs in builtin() {
        let ps = cs.pixel_size();
        let src = noise(4 * ps, 3);
        let mut dst = noise(4 * ps, 4);
        let mask = [0u8; 4];
        composite_region(
            &cs,
            CompositeOp::Copy,
            &mut dst,
            2 * ps,
            &src,
            2 * ps,
            Some((&mask[..], 2)),
            0,
            2,
            2,
            ChannelFlags::from_indices(&[0]),
        );
        assert_eq!(dst, src, "{}", cs.id());
    }
}

#[test]
fn undefined_and_unknown_names_are_noops() {
    for cs in builtin() {
        let src = pixels(&cs, 16, 5);
        let original = pixels(&cs, 16, 6);
        for op in [CompositeOp::Undefined, CompositeOp::from_name("Multiply"), CompositeOp::from_name("???")] {
            let mut dst = original.clone();
            run(&cs, op, &mut dst, &src, None, 255, 16);
            assert_eq!(dst, original, "{} {op}", cs.id());
        }
    }
}

#[test]
fn transparent_source_is_noop_for_every_operator() {
    for cs in builtin() {
        let n = 32;
        let original = pixels(&cs, n, 7);
        let mut src = pixels(&cs, n, 8);
        cs.set_opacity_u8(&mut src, 0, n);

        for op in CompositeOp::ALL.into_iter().filter(|op| *op != CompositeOp::Copy) {
            let mut dst = original.clone();
            run(&cs, op, &mut dst, &src, None, 255, n);
            assert_eq!(dst, original, "{} {op}", cs.id());
        }

        // Zero mask and zero opacity make any source transparent.
        let src = pixels(&cs, n, 9);
        let zero_mask = vec![0u8; n];
        for op in CompositeOp::ALL.into_iter().filter(|op| *op != CompositeOp::Copy) {
            let mut dst = original.clone();
            run(&cs, op, &mut dst, &src, Some(&zero_mask[..]), 255, n);
            assert_eq!(dst, original, "{} {op} mask", cs.id());
            run(&cs, op, &mut dst, &src, None, 0, n);
            assert_eq!(dst, original, "{} {op} opacity", cs.id());
        }
    }
}

#[test]
fn over_with_opaque_source_replaces_destination() {
    for cs in builtin() {
        let n = 32;
        let mut dst = pixels(&cs, n, 10);
        cs.set_opacity_u8(&mut dst, 255, n);
        let mut src = pixels(&cs, n, 11);
        cs.set_opacity_u8(&mut src, 255, n);

        run(&cs, CompositeOp::Over, &mut dst, &src, None, 255, n);
        assert_eq!(dst, src, "{}", cs.id());
    }
}

#[test]
fn over_never_decreases_alpha() {
    for cs in builtin() {
        let n = 256;
        let original = pixels(&cs, n, 12);
        let src = pixels(&cs, n, 13);
        let mask = noise(n, 14);

        let mut dst = original.clone();
        run(&cs, CompositeOp::Over, &mut dst, &src, Some(&mask[..]), 180, n);

        for (i, (before, after)) in alphas(&cs, &original).into_iter().zip(alphas(&cs, &dst)).enumerate() {
            assert!(after >= before, "{} pixel {i}: {before} -> {after}", cs.id());
        }
    }
}

#[test]
fn erase_never_increases_alpha_or_touches_color() {
    for cs in builtin() {
        let n = 256;
        let original = pixels(&cs, n, 15);
        let src = pixels(&cs, n, 16);
        let mask = noise(n, 17);

        let mut dst = original.clone();
        run(&cs, CompositeOp::Erase, &mut dst, &src, Some(&mask[..]), 255, n);

        let ps = cs.pixel_size();
        for i in 0..n {
            let (before, after) = (&original[i * ps..(i + 1) * ps], &dst[i * ps..(i + 1) * ps]);
            assert!(cs.opacity_u8(after) <= cs.opacity_u8(before), "{} pixel {i}", cs.id());
            for c in cs.color_channels() {
                assert_eq!(&after[c.byte_range()], &before[c.byte_range()]);
            }
        }
    }
}

#[test]
fn erase_with_full_coverage_clears_alpha() {
    let cs = ColorSpace::ycbcr_u8();
    let mut dst = [10u8, 20, 30, 200];
    run(&cs, CompositeOp::Erase, &mut dst, &[0, 0, 0, 255], None, 255, 1);
    assert_eq!(dst, [10, 20, 30, 0]);
}

#[test]
fn dodge_with_black_source_keeps_color() {
    for cs in builtin() {
        let n = 64;
        let mut dst = pixels(&cs, n, 18);
        cs.set_opacity_u8(&mut dst, 255, n);
        let original = dst.clone();

        // Zero in every color channel, opaque.
        let mut src = vec![0u8; n * cs.pixel_size()];
        cs.set_opacity_u8(&mut src, 255, n);

        run(&cs, CompositeOp::Dodge, &mut dst, &src, None, 255, n);
        assert_eq!(dst, original, "{}", cs.id());
    }
}

#[test]
fn alpha_locked_operators_keep_destination_alpha() {
    for cs in builtin() {
        let n = 64;
        let original = pixels(&cs, n, 19);
        let src = pixels(&cs, n, 20);
        for op in [CompositeOp::SoftLight, CompositeOp::HardLight] {
            let mut dst = original.clone();
            run(&cs, op, &mut dst, &src, None, 255, n);
            assert_eq!(alphas(&cs, &dst), alphas(&cs, &original), "{} {op}", cs.id());
        }
    }
}

/// One gray pixel of `T`, `[gray, alpha]`.
fn gray_pixel<T: ChannelValue>(gray: T, alpha: T) -> Vec<u8> {
    let mut px = vec![0u8; 2 * T::SIZE];
    gray.write(&mut px[..]);
    alpha.write(&mut px[T::SIZE..]);
    px
}

fn composite_gray<T: ChannelValue>(cs: &ColorSpace, op: CompositeOp, dst: T, dst_alpha: T, src: T) -> (T, T) {
    let mut d = gray_pixel(dst, dst_alpha);
    let s = gray_pixel(src, T::OPAQUE);
    run(cs, op, &mut d, &s, None, 255, 1);
    (T::read(&d[..]), T::read(&d[T::SIZE..]))
}

#[test]
fn overlay_on_half_covered_destination() {
    // Coverage is min(1, 0.5); alpha accumulates to 0.75 and colors move
    // 2/3 of the way toward the overlay result.
    assert_eq!(composite_gray(&ColorSpace::gray_u8(), CompositeOp::Overlay, 100u8, 128, 200), (123, 192));
    assert_eq!(
        composite_gray(&ColorSpace::gray_u16(), CompositeOp::Overlay, 25700u16, 32768, 51400),
        (31622, 49152)
    );

    let (gray, alpha) = composite_gray(&ColorSpace::gray_f32(), CompositeOp::Overlay, 0.4f32, 0.5, 0.8);
    assert_abs_diff_eq!(gray, 0.496, epsilon = 1e-5);
    assert_abs_diff_eq!(alpha, 0.75, epsilon = 1e-6);
}

#[test]
fn soft_light_on_half_covered_destination() {
    // Alpha is locked; colors move halfway toward the soft light result.
    assert_eq!(composite_gray(&ColorSpace::gray_u8(), CompositeOp::SoftLight, 100u8, 128, 200), (117, 128));
    assert_eq!(
        composite_gray(&ColorSpace::gray_u16(), CompositeOp::SoftLight, 25700u16, 32768, 51400),
        (30062, 32768)
    );

    // Dark source takes the other branch of the curve.
    let (gray, alpha) = composite_gray(&ColorSpace::gray_f32(), CompositeOp::SoftLight, 0.4f32, 0.5, 0.3);
    assert_abs_diff_eq!(gray, 0.352, epsilon = 1e-5);
    assert_eq!(alpha, 0.5);
}

#[test]
fn disabled_channels_are_untouched() {
    let cs = ColorSpace::ycbcr_u16();
    let n = 32;
    let original = pixels(&cs, n, 21);
    let src = pixels(&cs, n, 22);
    let ps = cs.pixel_size();

    for op in [CompositeOp::Over, CompositeOp::Screen, CompositeOp::Overlay, CompositeOp::Dodge] {
        let mut dst = original.clone();
        // Only Cb may change; alpha is locked.
        let flags = ChannelFlags::from_indices(&[1]);
        composite_region(&cs, op, &mut dst, n * ps, &src, n * ps, None, 255, 1, n, flags);
        for i in 0..n {
            let (before, after) = (&original[i * ps..(i + 1) * ps], &dst[i * ps..(i + 1) * ps]);
            for idx in [0usize, 2, 3] {
                let range = cs.channels()[idx].byte_range();
                assert_eq!(&after[range.clone()], &before[range], "{op} pixel {i} channel {idx}");
            }
        }
    }
}

#[test]
fn strided_rows_leave_padding_alone() {
    let cs = ColorSpace::gray_f32();
    let (rows, cols) = (3usize, 2usize);
    let stride = cols * cs.pixel_size() + 5;
    let mut dst = vec![0xAAu8; rows * stride];
    let src = {
        let mut s = vec![0u8; rows * stride];
        for r in 0..rows {
            let row = &mut s[r * stride..r * stride + cols * cs.pixel_size()];
            convert::from_rgb8(&cs, [40, 40, 40], 255, &mut row[..8]);
            convert::from_rgb8(&cs, [80, 80, 80], 255, &mut row[8..]);
        }
        s
    };
    composite_region(&cs, CompositeOp::Copy, &mut dst, stride, &src, stride, None, 255, rows, cols, ChannelFlags::ALL);
    for r in 0..rows {
        assert!(dst[r * stride + 16..(r + 1) * stride].iter().all(|&b| b == 0xAA));
        assert_eq!(f32::read(&dst[r * stride + 12..]), 1.0);
    }
}

#[test]
fn formats_without_alpha() {
    let cs = ColorSpace::new(
        "YCbCrU8",
        "YCbCr without alpha",
        ColorModel::YCbCr,
        vec![
            ChannelDescriptor::new("Y", ChannelRole::Color, ChannelType::U8, 0),
            ChannelDescriptor::new("Cb", ChannelRole::Color, ChannelType::U8, 1),
            ChannelDescriptor::new("Cr", ChannelRole::Color, ChannelType::U8, 2),
        ],
    );
    assert!(!cs.has_alpha());

    // Missing alpha counts as opaque: Over with full opacity replaces.
    let mut dst = [10u8, 20, 30];
    run(&cs, CompositeOp::Over, &mut dst, &[200, 100, 50], None, 255, 1);
    assert_eq!(dst, [200, 100, 50]);

    // Half opacity blends halfway.
    let mut dst = [100u8, 128, 128];
    run(&cs, CompositeOp::Over, &mut dst, &[200, 128, 128], None, 128, 1);
    assert_eq!(dst, [150, 128, 128]);

    // Erase has no alpha to work on.
    let mut dst = [10u8, 20, 30];
    run(&cs, CompositeOp::Erase, &mut dst, &[200, 100, 50], None, 255, 1);
    assert_eq!(dst, [10, 20, 30]);
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_matches_sequential() {
    use pxl_ops::parallel::composite_region_par;

    let (rows, cols) = (67usize, 13usize);
    for cs in builtin() {
        let stride = cols * cs.pixel_size() + 3;
        let src = pixels(&cs, (rows * stride).div_ceil(cs.pixel_size()), 23);
        let original = pixels(&cs, (rows * stride).div_ceil(cs.pixel_size()), 24);
        let mask = noise(rows * cols, 25);

        for op in CompositeOp::ALL {
            let mut seq = original.clone();
            let mut par = original.clone();
            let m = Some((&mask[..], cols));
            composite_region(&cs, op, &mut seq, stride, &src, stride, m, 230, rows, cols, ChannelFlags::ALL);
            composite_region_par(&cs, op, &mut par, stride, &src, stride, m, 230, rows, cols, ChannelFlags::ALL);
            assert_eq!(seq, par, "{} {op}", cs.id());
        }
    }
}
