//! Criterion benchmarks for the per-sample hot path.
//!
//! At 60 Hz per client the normalize + encode step runs once every ~16 ms per
//! session; these benchmarks keep an eye on how much of that it consumes.
//!
//! Run with:
//! ```bash
//! cargo bench --package pointer-stream --bench sample_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pointer_stream::application::PositionSource;
use pointer_stream::domain::{DisplayBounds, RawPosition};
use pointer_stream::infrastructure::position_source::MockPositionSource;

fn bench_normalize(c: &mut Criterion) {
    let bounds = DisplayBounds::new(1920, 1080).expect("bounds");
    c.bench_function("normalize", |b| {
        b.iter(|| bounds.normalize(black_box(RawPosition::new(1234, 567))))
    });
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_and_encode");
    for (w, h) in [(1920u32, 1080u32), (2560, 1440), (3840, 2160)] {
        let bounds = DisplayBounds::new(w, h).expect("bounds");
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{w}x{h}")),
            &bounds,
            |b, bounds| {
                b.iter(|| {
                    bounds
                        .normalize(black_box(RawPosition::new(777, 333)))
                        .to_json()
                        .expect("encode")
                })
            },
        );
    }
    group.finish();
}

fn bench_mock_sample(c: &mut Criterion) {
    let source = MockPositionSource::single_1080p();
    source.set_position(960, 540);
    let bounds = source.display_size().expect("bounds");
    c.bench_function("mock_source_sample", |b| {
        b.iter(|| {
            let position = source.current_position().expect("position");
            bounds.normalize(position).to_json().expect("encode")
        })
    });
}

criterion_group!(benches, bench_normalize, bench_encode, bench_mock_sample);
criterion_main!(benches);
