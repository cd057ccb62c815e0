//! Benchmarks for pxl compositing and conversions.
//!
//! Run with: `cargo bench`

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use pxl_color::{convert, ycbcr};
use pxl_core::{ChannelFlags, ColorSpace};
use pxl_ops::{CompositeOp, composite_region, parallel};

const SIDE: usize = 256;

/// A packed `SIDE x SIDE` image with a diagonal gradient and mixed alpha.
fn image(cs: &ColorSpace, seed: u8) -> Vec<u8> {
    let ps = cs.pixel_size();
    let mut out = vec![0u8; SIDE * SIDE * ps];
    for (i, px) in out.chunks_exact_mut(ps).enumerate() {
        let (x, y) = ((i % SIDE) as u8, (i / SIDE) as u8);
        let rgb = [x, y, x.wrapping_add(y).wrapping_add(seed)];
        convert::from_rgb8(cs, rgb, x ^ y ^ seed, px);
    }
    out
}

/// Every operator on every built-in format, one full frame per iteration.
fn bench_composite(c: &mut Criterion) {
    let mut group = c.benchmark_group("composite");
    group.throughput(Throughput::Elements((SIDE * SIDE) as u64));

    for cs in ColorSpace::builtin() {
        let stride = SIDE * cs.pixel_size();
        let src = image(&cs, 17);
        let base = image(&cs, 91);

        for op in CompositeOp::ALL {
            let id = BenchmarkId::new(op.name(), cs.id());
            group.bench_with_input(id, &src, |b, src| {
                let mut dst = base.clone();
                b.iter(|| {
                    composite_region(
                        &cs,
                        op,
                        black_box(&mut dst),
                        stride,
                        src,
                        stride,
                        None,
                        200,
                        SIDE,
                        SIDE,
                        ChannelFlags::ALL,
                    )
                })
            });
        }
    }

    group.finish();
}

/// Masked Over, sequential against banded.
fn bench_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel");
    group.throughput(Throughput::Elements((SIDE * SIDE) as u64));

    let mask: Vec<u8> = (0..SIDE * SIDE).map(|i| (i % 251) as u8).collect();
    for cs in [ColorSpace::ycbcr_u8(), ColorSpace::gray_f32()] {
        let stride = SIDE * cs.pixel_size();
        let src = image(&cs, 3);
        let base = image(&cs, 5);

        group.bench_function(BenchmarkId::new("sequential", cs.id()), |b| {
            let mut dst = base.clone();
            b.iter(|| {
                composite_region(
                    &cs,
                    CompositeOp::Over,
                    black_box(&mut dst),
                    stride,
                    &src,
                    stride,
                    Some((&mask[..], SIDE)),
                    255,
                    SIDE,
                    SIDE,
                    ChannelFlags::ALL,
                )
            })
        });

        group.bench_function(BenchmarkId::new("rayon", cs.id()), |b| {
            let mut dst = base.clone();
            b.iter(|| {
                parallel::composite_region_par(
                    &cs,
                    CompositeOp::Over,
                    black_box(&mut dst),
                    stride,
                    &src,
                    stride,
                    Some((&mask[..], SIDE)),
                    255,
                    SIDE,
                    SIDE,
                    ChannelFlags::ALL,
                )
            })
        });
    }

    group.finish();
}

/// RGB to YCbCr and back for each channel type, plus format conversion.
fn bench_ycbcr(c: &mut Criterion) {
    let mut group = c.benchmark_group("ycbcr");
    let count = SIDE * SIDE;
    group.throughput(Throughput::Elements(count as u64));

    let rgb8: Vec<[u8; 3]> = (0..count).map(|i| [i as u8, (i >> 8) as u8, (i * 7) as u8]).collect();
    let rgb16: Vec<[u16; 3]> = rgb8.iter().map(|p| p.map(|v| v as u16 * 257)).collect();
    let rgbf: Vec<[f32; 3]> = rgb8.iter().map(|p| p.map(|v| v as f32 / 255.0)).collect();

    group.bench_function("u8_round_trip", |b| {
        b.iter(|| {
            rgb8.iter()
                .map(|&p| ycbcr::ycbcr_to_rgb_u8(ycbcr::rgb_to_ycbcr_u8(black_box(p))))
                .collect::<Vec<_>>()
        })
    });
    group.bench_function("u16_round_trip", |b| {
        b.iter(|| {
            rgb16.iter()
                .map(|&p| ycbcr::ycbcr_to_rgb_u16(ycbcr::rgb_to_ycbcr_u16(black_box(p))))
                .collect::<Vec<_>>()
        })
    });
    group.bench_function("f32_round_trip", |b| {
        b.iter(|| {
            rgbf.iter()
                .map(|&p| ycbcr::ycbcr_to_rgb_f32(ycbcr::rgb_to_ycbcr_f32(black_box(p))))
                .collect::<Vec<_>>()
        })
    });

    let (from, to) = (ColorSpace::ycbcr_u8(), ColorSpace::gray_f16());
    let src = image(&from, 0);
    let mut dst = vec![0u8; count * to.pixel_size()];
    group.bench_function("convert_pixels_ycbcr8_to_grayf16", |b| {
        b.iter(|| convert::convert_pixels(&from, black_box(&src), &to, &mut dst, count))
    });

    group.finish();
}

criterion_group!(benches, bench_composite, bench_parallel, bench_ycbcr);

criterion_main!(benches);
