//! Benchmark for value noise and the sequential stream.
//!
//! TARGET: 1,000,000 three-octave samples in under 100ms
//!
//! Run with: cargo bench --package tessera_world --bench noise_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use tessera_world::noise::{NoiseGenerator, WorldSeed};

fn benchmark_noise1d(c: &mut Criterion) {
    let noise = NoiseGenerator::new(WorldSeed::new(42));

    c.bench_function("noise1d_3_octaves", |b| {
        let mut x = 0.0f64;
        b.iter(|| {
            x += 1.0;
            black_box(noise.noise1d(black_box(x * 0.008), 1.0, 3, 0.4))
        });
    });
}

fn benchmark_million_samples(c: &mut Criterion) {
    let noise = NoiseGenerator::new(WorldSeed::new(42));

    let mut group = c.benchmark_group("million_samples");
    group.throughput(Throughput::Elements(1_000_000));
    group.sample_size(10);

    group.bench_function("1M_noise2d_samples", |b| {
        b.iter(|| {
            for i in 0..1_000_000 {
                let x = f64::from(i % 1000) * 0.015;
                let y = f64::from(i / 1000) * 0.015;
                black_box(noise.noise2d(x, y, 1.0, 3, 0.5));
            }
        });
    });

    group.finish();
}

fn benchmark_stream(c: &mut Criterion) {
    let mut noise = NoiseGenerator::new(WorldSeed::new(42));

    c.bench_function("next_int_range", |b| {
        b.iter(|| black_box(noise.next_int(black_box(3), black_box(8))));
    });
}

criterion_group!(benches, benchmark_noise1d, benchmark_million_samples, benchmark_stream);
criterion_main!(benches);
