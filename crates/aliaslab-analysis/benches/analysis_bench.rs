//! Criterion benchmarks for aliaslab-analysis components
//!
//! Run with: cargo bench -p aliaslab-analysis

use aliaslab_analysis::{
    ResampleRequest, SeverityTier, XorAccumulator, XorConfig, analyze, compute_adaptive_threshold,
    compute_recurrence, resample,
};
use aliaslab_core::SignalBuffer;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::f32::consts::PI;

const SAMPLE_RATE: f32 = 44100.0;

/// Generate a speech-like test signal with a few harmonics
fn generate_voice(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            let f1 = (2.0 * PI * 220.0 * t).sin();
            let f2 = 0.5 * (2.0 * PI * 1760.0 * t).sin();
            let f3 = 0.25 * (2.0 * PI * 5300.0 * t).sin();
            (f1 + f2 + f3) * 0.5
        })
        .collect()
}

// ============================================================================
// Aliasing engine benchmarks
// ============================================================================

fn bench_resample_tiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("Resample");

    // One second of audio
    let input = SignalBuffer::mono(SAMPLE_RATE, generate_voice(44100)).unwrap();

    for tier in SeverityTier::ALL {
        let request = ResampleRequest::with_tier(8000.0, tier);
        group.bench_with_input(BenchmarkId::from_parameter(tier), &request, |b, request| {
            b.iter(|| black_box(resample(black_box(&input), request)))
        });
    }

    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let input = SignalBuffer::mono(SAMPLE_RATE, generate_voice(441_000)).unwrap();
    c.bench_function("Analyze_10s", |b| b.iter(|| black_box(analyze(black_box(&input)))));
}

// ============================================================================
// Comparison benchmarks
// ============================================================================

fn bench_recurrence(c: &mut Criterion) {
    let mut group = c.benchmark_group("Recurrence");

    for &size in &[64, 128, 300] {
        let a = generate_voice(size);
        let b: Vec<f32> = a.iter().map(|x| x * 0.8 + 0.01).collect();
        let threshold = compute_adaptive_threshold(&a, &b);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bench, _| {
            bench.iter(|| black_box(compute_recurrence(black_box(&a), black_box(&b), threshold)))
        });
    }

    group.finish();
}

fn bench_xor_run(c: &mut Criterion) {
    let source = SignalBuffer::mono(SAMPLE_RATE, generate_voice(44100)).unwrap();
    let config = XorConfig::for_chunk_size(512, 32, 32);

    c.bench_function("Xor_1s_scroll32", |b| {
        b.iter(|| {
            let mut acc = XorAccumulator::with_source(config, &source).unwrap();
            black_box(acc.run_to_completion())
        })
    });
}

criterion_group!(
    benches,
    bench_resample_tiers,
    bench_analyze,
    bench_recurrence,
    bench_xor_run,
);

criterion_main!(benches);
