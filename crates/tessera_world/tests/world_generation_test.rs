//! # World Generation Tests
//!
//! Whole-pipeline checks on real-sized worlds: determinism, bounds,
//! portals, liquids and frame sanity.

use tessera_world::frame::{is_overlay_frame, uses_dirt_overrides, MAX_BLOB_FRAME};
use tessera_world::generator::{MIN_HEIGHT, MIN_WIDTH};
use tessera_world::{
    GenerationObserver, GeneratorConfig, PortalKind, TileGrid, TileType, WorldGenerator, WorldSeed,
    WorldSettings,
};

fn small_world(seed: u64) -> TileGrid {
    WorldGenerator::new()
        .generate(WorldSeed::new(seed), WorldSettings::from_tiers(0, 1, 1))
        .expect("world generation")
}

/// Test: Same seed and settings produce identical worlds.
#[test]
fn test_generation_is_deterministic() {
    let a = small_world(42);
    let b = small_world(42);

    assert_eq!(a.surface_heights(), b.surface_heights());
    assert_eq!(a.as_bytes(), b.as_bytes(), "tile bytes differ for the same seed");

    let c = small_world(43);
    assert_ne!(a.as_bytes(), c.as_bytes(), "different seeds must differ");
}

/// Asserts every column's surface lies in `[min_surface, height - bottom_margin]`.
fn assert_surface_in_band(grid: &TileGrid, config: &GeneratorConfig) {
    let rows = i32::try_from(grid.height()).expect("height fits in i32");
    let (top, floor) = (config.terrain.min_surface, rows - config.terrain.bottom_margin);

    for (x, &surface) in grid.surface_heights().iter().enumerate() {
        assert!(
            (top..=floor).contains(&surface),
            "column {x} surface {surface} outside {top}..={floor} (seed {})",
            grid.seed().value()
        );
    }
}

/// Test: Tier 0 is 800x400 with every surface inside the terrain band.
#[test]
fn test_small_world_bounds() {
    let config = GeneratorConfig::default();
    for seed in [7, 8, 9] {
        let grid = small_world(seed);
        assert_eq!((grid.width(), grid.height()), (800, 400));

        let highest = grid.surface_heights().iter().min().copied().unwrap_or(0);
        let lowest = grid.surface_heights().iter().max().copied().unwrap_or(0);
        println!("Seed {seed} surface rows: {highest}..={lowest}");
        assert_surface_in_band(&grid, &config);
    }
}

/// Test: The surface band holds on the smallest accepted grid.
#[test]
fn test_minimum_grid_surface_bounds() {
    let generator = WorldGenerator::new();
    for seed in 1..=4 {
        let blank = TileGrid::new(MIN_WIDTH, MIN_HEIGHT, WorldSeed::new(seed), WorldSettings::default());
        let grid = generator.generate_grid(blank, &mut ()).expect("minimum grid generates");
        assert_surface_in_band(&grid, generator.config());
    }
}

/// Test: Margins that leave a one-row surface band still generate.
#[test]
fn test_tight_margins_surface_bounds() {
    let mut config = GeneratorConfig::default();
    config.terrain.min_surface = 30;
    config.terrain.bottom_margin = 40;
    let generator = WorldGenerator::with_config(config).expect("valid margins");

    for seed in [5, 6] {
        let blank = TileGrid::new(MIN_WIDTH, 70, WorldSeed::new(seed), WorldSettings::default());
        let err = generator.generate_grid(blank, &mut ()).expect_err("below the minimum height");
        println!("Seed {seed}: {err}");

        let blank = TileGrid::new(MIN_WIDTH, MIN_HEIGHT, WorldSeed::new(seed), WorldSettings::default());
        let grid = generator.generate_grid(blank, &mut ()).expect("tight margins generate");
        assert_surface_in_band(&grid, generator.config());
    }
}

/// Test: All three portals exist exactly once and sit on their markers.
#[test]
fn test_all_portals_placed() {
    let grid = small_world(11);

    assert_eq!(grid.portals().len(), PortalKind::ALL.len());
    assert_eq!(grid.count(TileType::PortalCore), PortalKind::ALL.len());
    for kind in PortalKind::ALL {
        let portal = grid.portals().find(kind).expect("portal registered");
        println!("{}: ({}, {})", kind.name(), portal.x, portal.y);
        assert_eq!(grid.kind(portal.x, portal.y), TileType::PortalCore);
    }

    let desert = grid.portals().find(PortalKind::Desert).expect("desert portal");
    assert_eq!(desert.x, 400, "desert portal crowns the middle column");
}

/// Test: The bottom layer holds lava and nothing above it does.
#[test]
fn test_lava_only_at_the_bottom() {
    let grid = small_world(19);

    for y in 0..400 - 50 {
        for x in 0..800 {
            assert_ne!(grid.kind(x, y), TileType::Lava, "lava at ({x}, {y})");
        }
    }
    for x in 0..800 {
        for y in 350..400 {
            assert!(!grid.get(x, y).is_air(), "air left in the lava layer at ({x}, {y})");
        }
    }
}

/// Test: Frames stay inside their ranges.
#[test]
fn test_frames_are_sane() {
    let grid = small_world(23);
    let mut overlays = 0;

    for y in 0..400 {
        for x in 0..800 {
            let tile = grid.get(x, y);
            if tile.is_air() {
                assert_eq!(tile.frame(), 0, "air must keep frame 0");
            } else if is_overlay_frame(tile.frame()) && tile.kind() == TileType::Grass {
                overlays += 1;
            } else if !uses_dirt_overrides(tile.kind()) {
                assert!(tile.frame() <= MAX_BLOB_FRAME, "{:?} frame {} is not a blob frame", tile.kind(), tile.frame());
            } else {
                assert!(tile.frame() < 16 * 15, "frame {} outside the atlas", tile.frame());
            }
        }
    }

    println!("Overlay grass tiles: {overlays}");
    assert!(overlays > 0, "finalize must grow overlay grass");
}

/// Test: Progress is reported in order and completion fires once.
#[test]
fn test_observer_sees_every_pass() {
    #[derive(Default)]
    struct Log {
        passes: Vec<String>,
        completed: Option<(usize, usize)>,
    }

    impl GenerationObserver for Log {
        fn on_progress(&mut self, pass: &str, _fraction: f32) {
            self.passes.push(pass.to_string());
        }

        fn on_complete(&mut self, grid: &TileGrid) {
            self.completed = Some((grid.width(), grid.height()));
        }
    }

    let mut log = Log::default();
    WorldGenerator::new()
        .generate_with(WorldSeed::new(3), WorldSettings::from_tiers(0, 1, 1), &mut log)
        .expect("world generation");

    assert_eq!(
        log.passes,
        [
            "Reset",
            "Terrain",
            "Walls",
            "Surface Decor",
            "Caves",
            "Desert Mountain",
            "Floating Island",
            "Biomes",
            "Deposits",
            "Portals",
            "Liquids",
            "Finalize",
            "Complete",
        ]
    );
    assert_eq!(log.completed, Some((800, 400)));
}
