//! Criterion benchmarks for lanewise
//!
//! Measures wall-clock time for vector operations and slice kernels against
//! plain scalar loops. The backend is whatever the enabled feature selects.
//! Run with: cargo bench --bench criterion_benches

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lanewise::{ops, DynMemory, SimdFloat, SimdVector, Vector, VectorMemory};
use std::hint::black_box;

type V = Vector<f32>;

const SIZES: [usize; 3] = [64, 1024, 16384];

fn input(len: usize) -> Vec<f32> {
    (0..len).map(|i| (i as f32 * 0.37).sin()).collect()
}

/// Benchmark basic arithmetic on single vectors
fn bench_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("arithmetic");

    let a = V::splat(2.0);
    let b = V::splat(3.0);
    let d = V::splat(1.0);

    group.bench_function("add", |bencher| bencher.iter(|| black_box(a) + black_box(b)));
    group.bench_function("mul", |bencher| bencher.iter(|| black_box(a) * black_box(b)));
    group.bench_function("div", |bencher| bencher.iter(|| black_box(a) / black_box(b)));
    group.bench_function("mul_add", |bencher| {
        bencher.iter(|| black_box(a).mul_add(black_box(b), black_box(d)))
    });
    group.bench_function("min", |bencher| {
        bencher.iter(|| black_box(a).min(black_box(b)))
    });
    group.bench_function("select", |bencher| {
        bencher.iter(|| {
            let (a, b) = (black_box(a), black_box(b));
            V::select(a.cmp_lt(b), a, b)
        })
    });

    group.finish();
}

/// Benchmark horizontal reductions
fn bench_reductions(c: &mut Criterion) {
    let mut group = c.benchmark_group("reductions");

    let v = V::indexes_from_zero();

    group.bench_function("horizontal_sum", |bencher| {
        bencher.iter(|| black_box(v).horizontal_sum())
    });
    group.bench_function("horizontal_min", |bencher| {
        bencher.iter(|| black_box(v).horizontal_min())
    });
    group.bench_function("horizontal_max", |bencher| {
        bencher.iter(|| black_box(v).horizontal_max())
    });

    group.finish();
}

/// Dot product: slice kernel vs scalar loop
fn bench_dot(c: &mut Criterion) {
    let mut group = c.benchmark_group("dot");

    for &len in &SIZES {
        let a = input(len);
        let b: Vec<f32> = a.iter().rev().copied().collect();
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("vector", len), &len, |bencher, _| {
            bencher.iter(|| ops::dot::<V>(black_box(&a), black_box(&b)))
        });
        group.bench_with_input(BenchmarkId::new("scalar", len), &len, |bencher, _| {
            bencher.iter(|| {
                black_box(&a)
                    .iter()
                    .zip(black_box(&b))
                    .map(|(x, y)| x * y)
                    .sum::<f32>()
            })
        });
    }

    group.finish();
}

/// Fourth-order central difference through shifted windows vs scalar loop
fn bench_stencil(c: &mut Criterion) {
    let mut group = c.benchmark_group("stencil");
    let h = 0.01f32;

    for &len in &SIZES {
        let y = DynMemory::<V>::from_slice(&input(len));
        let mut dy = DynMemory::<V>::new(len);
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("vector", len), &len, |bencher, _| {
            let eight = V::splat(8.0);
            let denom = V::splat(12.0 * h);
            let first = 2usize.div_ceil(V::LANES);
            bencher.iter(|| {
                for i in first..y.vectors_count() {
                    if (i + 1) * V::LANES + 2 > y.padded_len() {
                        break;
                    }
                    let d = (y.vector_at(i, -2) - y.vector_at(i, 2)
                        + eight * (y.vector_at(i, 1) - y.vector_at(i, -1)))
                        / denom;
                    dy.set_vector(i, d);
                }
                black_box(dy.as_slice());
            })
        });

        group.bench_with_input(BenchmarkId::new("scalar", len), &len, |bencher, _| {
            let ys = y.as_slice();
            let mut out = vec![0.0f32; len];
            bencher.iter(|| {
                for k in 2..len.saturating_sub(2) {
                    out[k] = (ys[k - 2] - ys[k + 2] + 8.0 * (ys[k + 1] - ys[k - 1])) / (12.0 * h);
                }
                black_box(&out);
            })
        });
    }

    group.finish();
}

/// Element-wise map over a slice: kernel vs scalar loop
fn bench_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_unary");

    for &len in &SIZES {
        let xs = input(len);
        let mut out = vec![0.0f32; len];
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("vector", len), &len, |bencher, _| {
            bencher.iter(|| {
                ops::map_unary::<V>(black_box(&xs), &mut out, |v| v.mul_add(v, V::splat(1.0)).sqrt());
                black_box(&out);
            })
        });
        group.bench_with_input(BenchmarkId::new("scalar", len), &len, |bencher, _| {
            bencher.iter(|| {
                for (o, &x) in out.iter_mut().zip(black_box(&xs)) {
                    *o = x.mul_add(x, 1.0).sqrt();
                }
                black_box(&out);
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_arithmetic,
    bench_reductions,
    bench_dot,
    bench_stencil,
    bench_map
);
criterion_main!(benches);
