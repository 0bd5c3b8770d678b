//! Benchmark for frame computation and world generation.
//!
//! TARGET: Full-grid frame sweep of a small world in under 50ms
//!
//! Run with: cargo bench --package tessera_world --bench frame_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tessera_world::{
    compute_frame, recompute_all, TileType, WorldGenerator, WorldSeed, WorldSettings,
};

fn benchmark_compute_frame(c: &mut Criterion) {
    let grid = WorldGenerator::new()
        .generate(WorldSeed::new(42), WorldSettings::from_tiers(0, 1, 1))
        .expect("world generation");

    c.bench_function("compute_frame_stone", |b| {
        let mut x = 0;
        b.iter(|| {
            x = (x + 1) % 800;
            black_box(compute_frame(&grid, black_box(x), 300, TileType::Stone))
        });
    });
}

fn benchmark_full_sweep(c: &mut Criterion) {
    let grid = WorldGenerator::new()
        .generate(WorldSeed::new(42), WorldSettings::from_tiers(0, 1, 1))
        .expect("world generation");

    let mut group = c.benchmark_group("frame_sweep");
    group.sample_size(10);

    group.bench_function("recompute_all_800x400", |b| {
        b.iter_batched(
            || grid.clone(),
            |mut grid| black_box(recompute_all(&mut grid)),
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

fn benchmark_generation(c: &mut Criterion) {
    let generator = WorldGenerator::new();

    let mut group = c.benchmark_group("generation");
    group.sample_size(10);

    group.bench_function("generate_small_world", |b| {
        let mut seed = 0;
        b.iter(|| {
            seed += 1;
            black_box(
                generator
                    .generate(WorldSeed::new(seed), WorldSettings::from_tiers(0, 1, 1))
                    .expect("world generation"),
            )
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_compute_frame, benchmark_full_sweep, benchmark_generation);
criterion_main!(benches);
