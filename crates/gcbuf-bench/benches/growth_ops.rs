//! Criterion micro-benchmarks for the capacity growth schedule.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use gcbuf_vector::growth::{next_size, TIER_LIMIT};

/// Benchmark: every tiered lookup below the tier limit.
fn bench_next_size_tiered(c: &mut Criterion) {
    c.bench_function("next_size_tiered", |b| {
        b.iter(|| {
            let mut acc = 0usize;
            for n in 0..TIER_LIMIT {
                acc = acc.wrapping_add(next_size(black_box(n)));
            }
            black_box(acc)
        });
    });
}

/// Benchmark: power-of-two rounding above the tier limit.
fn bench_next_size_large(c: &mut Criterion) {
    c.bench_function("next_size_large", |b| {
        b.iter(|| {
            let mut acc = 0usize;
            for n in (TIER_LIMIT..TIER_LIMIT * 64).step_by(61) {
                acc = acc.wrapping_add(next_size(black_box(n)));
            }
            black_box(acc)
        });
    });
}

criterion_group!(benches, bench_next_size_tiered, bench_next_size_large);
criterion_main!(benches);
