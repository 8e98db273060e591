//! Benchmarks for circular suffix sorting and the Burrows-Wheeler Transform
//!
//! This benchmark suite evaluates:
//! - Suffix sorting throughput across input sizes
//! - Forward and inverse BWT on text-like data
//! - Sensitivity of the sort to the input pattern

use burrows_codec::bwt::{inverse_transform, transform};
use burrows_codec::csa::CircularSuffixArray;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

/// Type alias for pattern generator functions
type PatternGenerator = fn(usize) -> Vec<u8>;

mod test_data {
    /// Words drawn by a fixed-seed LCG
    pub fn text_like(size: usize) -> Vec<u8> {
        let words: &[&[u8]] = &[
            b"the", b"quick", b"brown", b"fox", b"jumps", b"over", b"lazy", b"dog", b"and",
            b"runs", b"through", b"forest", b"near", b"river", b"under", b"blue", b"sky",
        ];

        let mut data = Vec::with_capacity(size);
        let mut seed = 42u32;
        while data.len() < size {
            seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
            data.extend_from_slice(words[(seed >> 16) as usize % words.len()]);
            data.push(b' ');
        }
        data.truncate(size);
        data
    }

    pub fn random(size: usize) -> Vec<u8> {
        let mut seed: u64 = 0x123456789ABCDEF0;
        (0..size)
            .map(|_| {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
                (seed >> 32) as u8
            })
            .collect()
    }

    /// Short period; every partition stays wide for many characters
    pub fn periodic(size: usize) -> Vec<u8> {
        b"abcabd".iter().copied().cycle().take(size).collect()
    }

    pub fn sequential(size: usize) -> Vec<u8> {
        (0..size).map(|i| i as u8).collect()
    }
}

mod data_sizes {
    pub const SMALL: usize = 1024; // 1 KB
    pub const MEDIUM: usize = 16 * 1024; // 16 KB
    pub const LARGE: usize = 128 * 1024; // 128 KB
}

fn bench_suffix_sort_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("suffix_sort_sizes");

    let sizes = [
        ("1KB", data_sizes::SMALL),
        ("16KB", data_sizes::MEDIUM),
        ("128KB", data_sizes::LARGE),
    ];

    for (size_name, size) in sizes {
        let data = test_data::text_like(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size_name), &data, |b, data| {
            b.iter(|| {
                let csa = CircularSuffixArray::new(black_box(data));
                black_box(csa.len());
            });
        });
    }

    group.finish();
}

fn bench_suffix_sort_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("suffix_sort_patterns");

    let patterns: [(&str, PatternGenerator); 4] = [
        ("text", test_data::text_like as PatternGenerator),
        ("random", test_data::random as PatternGenerator),
        ("periodic", test_data::periodic as PatternGenerator),
        ("sequential", test_data::sequential as PatternGenerator),
    ];

    // Periodic input costs O(n^2) character comparisons.
    let size = data_sizes::SMALL * 4;

    for (pattern_name, generator) in patterns {
        let data = generator(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(pattern_name),
            &data,
            |b, data| {
                b.iter(|| {
                    let csa = CircularSuffixArray::new(black_box(data));
                    black_box(csa.len());
                });
            },
        );
    }

    group.finish();
}

fn bench_bwt_forward(c: &mut Criterion) {
    let mut group = c.benchmark_group("bwt_forward");

    for (size_name, size) in [("1KB", data_sizes::SMALL), ("16KB", data_sizes::MEDIUM)] {
        let data = test_data::text_like(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size_name), &data, |b, data| {
            b.iter(|| black_box(transform(black_box(data))));
        });
    }

    group.finish();
}

fn bench_bwt_inverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("bwt_inverse");

    for (size_name, size) in [
        ("1KB", data_sizes::SMALL),
        ("16KB", data_sizes::MEDIUM),
        ("128KB", data_sizes::LARGE),
    ] {
        let Ok(transformed) = transform(&test_data::text_like(size)) else {
            continue;
        };

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size_name),
            &transformed,
            |b, transformed| {
                b.iter(|| black_box(inverse_transform(black_box(transformed))));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_suffix_sort_sizes,
    bench_suffix_sort_patterns,
    bench_bwt_forward,
    bench_bwt_inverse,
);
criterion_main!(benches);
