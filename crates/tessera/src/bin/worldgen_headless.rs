//! # TESSERA Headless World Generator
//!
//! Generates a world on the background worker, prints pass progress, then
//! builds the chunk cache and reports what a view of the spawn area costs.
//!
//! ```bash
//! worldgen_headless [seed] [size tier 0-2] [generator.toml]
//! ```

use std::process::ExitCode;
use std::time::Instant;

use tessera::render::{CountingSink, FullBright, Rect, Transform2D, CHUNK_PIXELS, TILE_SIZE};
use tessera::world::{
    GenerationWorker, GeneratorConfig, PortalKind, TileType, WorldGenerator, WorldSeed,
    WorldSettings,
};
use tessera::WorldSession;

/// Default seed when none is given.
const DEFAULT_SEED: u64 = 12345;

/// Parsed command line.
struct Args {
    seed: u64,
    size_tier: u8,
    config: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(raw) => raw.parse().map_err(|e| format!("invalid seed {raw:?}: {e}"))?,
        None => DEFAULT_SEED,
    };
    let size_tier = match args.next() {
        Some(raw) => raw.parse().map_err(|e| format!("invalid size tier {raw:?}: {e}"))?,
        None => 0,
    };
    Ok(Args { seed, size_tier, config: args.next() })
}

fn main() -> ExitCode {
    println!("═══════════════════════════════════════════════════════════════════");
    println!("                 TESSERA WORLD GENERATOR v0.1.0");
    println!("                         HEADLESS MODE");
    println!("═══════════════════════════════════════════════════════════════════");

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("❌ {e}");
            eprintln!("usage: worldgen_headless [seed] [size tier 0-2] [generator.toml]");
            return ExitCode::FAILURE;
        }
    };

    let config = match &args.config {
        Some(path) => match GeneratorConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ {e}");
                return ExitCode::FAILURE;
            }
        },
        None => GeneratorConfig::default(),
    };
    let generator = match WorldGenerator::with_config(config) {
        Ok(generator) => generator,
        Err(e) => {
            eprintln!("❌ {e}");
            return ExitCode::FAILURE;
        }
    };

    let settings = WorldSettings::from_tiers(args.size_tier, 1, 1);
    let (width, height) = settings.world_size();
    println!();
    println!("  Seed:     {}", args.seed);
    println!("  Size:     {width} x {height}");
    println!();

    let started = Instant::now();
    let mut worker = match GenerationWorker::spawn(generator, WorldSeed::new(args.seed), settings) {
        Ok(worker) => worker,
        Err(e) => {
            eprintln!("❌ {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = loop {
        for event in worker.poll_progress() {
            println!("  [{:>5.1}%] {}", event.fraction * 100.0, event.pass);
        }
        if let Some(result) = worker.try_finish() {
            break result;
        }
        std::thread::sleep(std::time::Duration::from_millis(5));
    };
    for event in worker.poll_progress() {
        println!("  [{:>5.1}%] {}", event.fraction * 100.0, event.pass);
    }

    let grid = match result {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("❌ Generation failed: {e}");
            return ExitCode::FAILURE;
        }
    };
    println!();
    println!("✓ Generated in {:?}", started.elapsed());

    for kind in [TileType::Dirt, TileType::Stone, TileType::Sand, TileType::Water, TileType::Lava] {
        println!("  {:<8} {:>9}", format!("{kind:?}"), grid.count(kind));
    }
    for kind in [PortalKind::Cave, PortalKind::Desert, PortalKind::Island] {
        match grid.portals().find(kind) {
            Some(portal) => println!("  {kind:?} portal at ({}, {})", portal.x, portal.y),
            None => println!("  {kind:?} portal missing"),
        }
    }

    let session = WorldSession::new(grid);
    let rebuild_started = Instant::now();
    let rebuilt = session.rebuild_all(&FullBright);
    println!();
    println!("✓ Built {rebuilt} chunks in {:?}", rebuild_started.elapsed());

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let view = {
        let spawn_x = (width / 2) as i32;
        let tile = TILE_SIZE as i32;
        let spawn_y = session.grid().surface_height(spawn_x);
        Rect::new(spawn_x * tile - 960, spawn_y * tile - 540, 1920, 1080)
    };
    let mut sink = CountingSink::default();
    let stats = session.render(&view, &Transform2D::IDENTITY, &FullBright, &mut sink);
    let culling = session.render_stats(&view);

    println!(
        "  View:     {} of {} chunks ({:.1}% culled, {}px each)",
        culling.visible,
        culling.total,
        culling.culled_fraction() * 100.0,
        CHUNK_PIXELS
    );
    println!("  Draws:    {}", stats.draw_calls);
    println!("  Quads:    {}", stats.quads);

    ExitCode::SUCCESS
}
