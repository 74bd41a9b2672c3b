//! Criterion benchmarks for step-stream generation.
//!
//! Measures how long each algorithm takes to produce its full record stream,
//! snapshots included.  At the fastest playback speed the server pulls one
//! record every 10 ms, so stream generation must stay far below that per
//! record.
//!
//! Run with:
//! ```bash
//! cargo bench --package sortstream-core --bench step_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sortstream_core::algorithms::DEFAULT_MAX_COUNTING_RANGE;
use sortstream_core::{AlgorithmId, AlgorithmRegistry};

fn make_input(len: usize) -> Vec<f64> {
    let mut state: u32 = 42;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            f64::from((state >> 16) % 1000)
        })
        .collect()
}

fn bench_full_streams(c: &mut Criterion) {
    let registry = AlgorithmRegistry::standard(DEFAULT_MAX_COUNTING_RANGE);
    let mut group = c.benchmark_group("full_stream");

    for len in [20usize, 100] {
        let input = make_input(len);
        for id in AlgorithmId::ALL {
            let algorithm = registry.get(id.as_str()).expect("registered");
            group.bench_with_input(BenchmarkId::new(id.as_str(), len), &input, |b, input| {
                b.iter(|| {
                    let records = algorithm.steps(black_box(input)).expect("accepted").count();
                    black_box(records)
                })
            });
        }
    }

    group.finish();
}

fn bench_first_record(c: &mut Criterion) {
    let registry = AlgorithmRegistry::standard(DEFAULT_MAX_COUNTING_RANGE);
    let input = make_input(1000);

    c.bench_function("first_record_1000", |b| {
        let algorithm = registry.get("mergeSort").expect("registered");
        b.iter(|| {
            let first = algorithm.steps(black_box(&input)).expect("accepted").next();
            black_box(first)
        })
    });
}

criterion_group!(benches, bench_full_streams, bench_first_record);
criterion_main!(benches);
