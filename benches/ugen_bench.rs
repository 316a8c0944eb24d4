use criterion::{black_box, criterion_group, criterion_main, Criterion};

use strobe::signal::{Rate, Signal};
use strobe::ugen::{ProcessContext, Ugen};
use strobe::ugens::amplitude::Amplitude;
use strobe::ugens::impulse::Impulse;
use strobe::ugens::impulse_scatter::ImpulseScatter;
use strobe::ugens::phasor::Phasor;

const BLOCK: usize = 512;
const SR: f32 = 44100.0;

fn bench_impulse(c: &mut Criterion) {
    let ctx = ProcessContext::new(BLOCK, SR);
    let mut out = [0.0f32; BLOCK];

    let mut group = c.benchmark_group("impulse");

    let mut scalar = Impulse::new(1000.0, 0.0, Rate::Scalar, Rate::Scalar, &ctx);
    group.bench_function("scalar_freq", |b| {
        b.iter(|| {
            scalar.process_block(
                &[Signal::Scalar(1000.0), Signal::Scalar(0.0)],
                black_box(&mut out),
                &ctx,
            );
        })
    });

    let freq_buf: Vec<f32> = (0..BLOCK).map(|i| 800.0 + i as f32).collect();
    let mut audio = Impulse::new(800.0, 0.0, Rate::Audio, Rate::Scalar, &ctx);
    group.bench_function("audio_freq", |b| {
        b.iter(|| {
            audio.process_block(
                &[Signal::Audio(&freq_buf), Signal::Scalar(0.0)],
                black_box(&mut out),
                &ctx,
            );
        })
    });

    group.finish();
}

fn bench_impulse_scatter(c: &mut Criterion) {
    let ctx = ProcessContext::new(BLOCK, SR);
    let mut out = [0.0f32; BLOCK];
    let mut scatter = ImpulseScatter::new(2000.0, 0.0, 4, Rate::Scalar, Rate::Scalar, &ctx);

    c.bench_function("impulse_scatter", |b| {
        b.iter(|| {
            scatter.process_block(
                &[
                    Signal::Scalar(2000.0),
                    Signal::Scalar(0.0),
                    Signal::Scalar(0.8),
                ],
                black_box(&mut out),
                &ctx,
            );
        })
    });
}

fn bench_phasor(c: &mut Criterion) {
    let ctx = ProcessContext::new(BLOCK, SR);
    let mut out = [0.0f32; BLOCK];
    let trig = [0.0f32; BLOCK];
    let mut phasor = Phasor::new(0.0, 0.0, Rate::Audio, Rate::Scalar);

    c.bench_function("phasor_audio_trig", |b| {
        b.iter(|| {
            phasor.process_block(
                &[
                    Signal::Audio(&trig),
                    Signal::Scalar(1.0),
                    Signal::Scalar(0.0),
                    Signal::Scalar(44100.0),
                    Signal::Scalar(0.0),
                ],
                black_box(&mut out),
                &ctx,
            );
        })
    });
}

fn bench_amplitude(c: &mut Criterion) {
    let ctx = ProcessContext::new(BLOCK, SR);
    let input: Vec<f32> = (0..BLOCK).map(|i| (i as f32 * 0.1).sin()).collect();
    let mut out = [0.0f32; BLOCK];
    let mut amp = Amplitude::new(0.01, 0.1, &ctx);

    c.bench_function("amplitude_follower", |b| {
        b.iter(|| {
            amp.process_block(
                &[
                    Signal::Audio(&input),
                    Signal::Scalar(0.01),
                    Signal::Scalar(0.1),
                ],
                black_box(&mut out),
                &ctx,
            );
        })
    });
}

criterion_group!(
    benches,
    bench_impulse,
    bench_impulse_scatter,
    bench_phasor,
    bench_amplitude
);
criterion_main!(benches);
