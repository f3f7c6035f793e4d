//! Throughput benchmarks for adahuff-adaptive.
//!
//! Generated inputs never contain 0x00, which the wire format cannot carry
//! as a first occurrence after the first byte.

use adahuff_adaptive::{AdaptiveModel, compress, decompress};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

/// Type alias for pattern generator functions
type PatternGenerator = fn(usize) -> Vec<u8>;

mod test_data {
    /// Uniform data - a single symbol (one bit per byte)
    pub fn uniform(size: usize) -> Vec<u8> {
        vec![0xAA; size]
    }

    /// Text-like data - small skewed alphabet
    pub fn text_like(size: usize) -> Vec<u8> {
        let text = b"The quick brown fox jumps over the lazy dog. \
                     Pack my box with five dozen liquor jugs. \
                     How vexingly quick daft zebras jump! ";
        text.iter().copied().cycle().take(size).collect()
    }

    /// Random data - full alphabet, deepest trees
    pub fn random(size: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0x123456789ABCDEF0;
        for _ in 0..size {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data.push(((seed >> 32) as u8).max(1));
        }
        data
    }
}

const PATTERNS: [(&str, PatternGenerator); 3] = [
    ("uniform", test_data::uniform),
    ("text", test_data::text_like),
    ("random", test_data::random),
];

const SIZES: [(&str, usize); 3] = [("1KB", 1024), ("64KB", 64 * 1024), ("1MB", 1024 * 1024)];

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");

    for (pattern_name, generate) in PATTERNS {
        for (size_name, size) in SIZES {
            let data = generate(size);
            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(
                BenchmarkId::new(pattern_name, size_name),
                &data,
                |b, data| b.iter(|| compress(black_box(data)).unwrap()),
            );
        }
    }

    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress");

    for (pattern_name, generate) in PATTERNS {
        for (size_name, size) in SIZES {
            let compressed = compress(&generate(size)).unwrap();
            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(
                BenchmarkId::new(pattern_name, size_name),
                &compressed,
                |b, compressed| b.iter(|| decompress(black_box(compressed)).unwrap()),
            );
        }
    }

    group.finish();
}

fn bench_model_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("model_observe");
    let data = test_data::random(64 * 1024);
    group.throughput(Throughput::Elements(data.len() as u64));

    group.bench_function("random_64K", |b| {
        b.iter(|| {
            let mut model = AdaptiveModel::new();
            for &byte in black_box(&data) {
                model.observe(byte);
            }
            black_box(model.total_weight())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress, bench_model_update);
criterion_main!(benches);
