use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use num_complex::Complex64;
use rand::Rng;

use rfft::{Plan1D, Plan2D};

// ======================================================================
// UTIL

fn random_complex(n: usize) -> Vec<Complex64> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| Complex64::new(rng.gen::<f64>(), rng.gen::<f64>())).collect()
}

fn random_real(n: usize) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| rng.gen::<f64>()).collect()
}

// ======================================================================
// BENCHMARKS - 1-D

fn benchmarks_1d(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan1d");

    for &n in &[1024usize, 4096, 65536, 1000, 999] {
        let plan = Plan1D::new(n as i64).unwrap();
        group.throughput(Throughput::Elements(n as u64));

        let input = random_complex(n);
        group.bench_with_input(BenchmarkId::new("complex_forward", n), &input, |b, input| {
            b.iter(|| {
                let mut buf = input.clone();
                plan.complex_forward(black_box(&mut buf)).unwrap();
            });
        });

        let input = random_real(n);
        group.bench_with_input(BenchmarkId::new("real_forward", n), &input, |b, input| {
            b.iter(|| {
                let mut buf = input.clone();
                plan.real_forward(black_box(&mut buf)).unwrap();
            });
        });
    }

    group.finish();
}

// ======================================================================
// BENCHMARKS - 2-D

fn benchmarks_2d(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan2d");

    for &(rows, cols) in &[(64usize, 64usize), (256, 256), (100, 100)] {
        let plan = Plan2D::new(rows as i64, cols as i64).unwrap();
        group.throughput(Throughput::Elements((rows * cols) as u64));

        let input = random_complex(rows * cols);
        let id = format!("{rows}x{cols}");
        group.bench_with_input(BenchmarkId::new("complex_forward", &id), &input, |b, input| {
            b.iter(|| {
                let mut buf = input.clone();
                plan.complex_forward(black_box(&mut buf)).unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmarks_1d, benchmarks_2d);
criterion_main!(benches);
