//! Benchmarks for the characterization fold and the Monte-Carlo sweep.
//!
//! Widths are kept small; the full 16-bit domain is a multi-second run and
//! belongs in release-mode profiling, not a micro-benchmark.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use gammabench::adder::LowerOrAdder;
use gammabench::characterize::{characterize, characterize_parallel, ErrorSummary};
use gammabench::config::AnalysisConfig;
use gammabench::simulate::simulate;

fn bench_characterize(c: &mut Criterion) {
    let mut group = c.benchmark_group("characterize");
    for width in [8u32, 10, 12] {
        group.bench_with_input(BenchmarkId::new("sequential", width), &width, |b, &w| {
            let adder = LowerOrAdder::new(4);
            b.iter(|| characterize(black_box(&adder), black_box(w)));
        });
    }
    group.bench_with_input(BenchmarkId::new("parallel_4", 12u32), &12u32, |b, &w| {
        let adder = LowerOrAdder::new(4);
        b.iter(|| characterize_parallel(black_box(&adder), black_box(w), 4));
    });
    group.finish();
}

fn bench_simulate(c: &mut Criterion) {
    let summary = ErrorSummary::from_mean_std(-0.8, 2.4);
    let config = AnalysisConfig {
        width_bits: 4,
        k_min: 4,
        k_max: 16,
        trials: 10_000,
        seed: 123_456,
        threads: 1,
    };
    c.bench_function("simulate_k4_to_k16_10k_trials", |b| {
        b.iter(|| simulate(black_box(&summary), black_box(&config)).unwrap());
    });
}

criterion_group!(benches, bench_characterize, bench_simulate);
criterion_main!(benches);
