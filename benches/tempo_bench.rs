//! Performance benchmarks for tempo analysis

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cadence_dsp::{estimate_tempo, AnalysisConfig, AudioBuffer};

/// 30 seconds of synthetic clicks at 120 BPM
fn click_track() -> AudioBuffer {
    let sample_rate = 44100usize;
    let n = sample_rate * 30;
    let mut samples = vec![0.0f32; n];
    let period = sample_rate / 2;
    let click_len = sample_rate / 100;

    let mut pos = 0;
    while pos < n {
        for i in pos..(pos + click_len).min(n) {
            samples[i] = 0.9;
        }
        pos += period;
    }

    AudioBuffer::new(samples, sample_rate as u32).unwrap()
}

fn bench_estimate_tempo(c: &mut Criterion) {
    let buffer = click_track();
    let config = AnalysisConfig::default();

    c.bench_function("estimate_tempo_30s", |b| {
        b.iter(|| {
            let _ = estimate_tempo(black_box(&buffer), black_box(&config));
        });
    });
}

criterion_group!(benches, bench_estimate_tempo);
criterion_main!(benches);
