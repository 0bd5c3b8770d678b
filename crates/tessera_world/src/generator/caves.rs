//! Cave carving: surface entrances, a cellular carve and large worm caves.

use std::f64::consts::TAU;

use super::carve::{self, clear, stamp_portal};
use super::{stream, PassContext, WorldGenResult};
use crate::portal::PortalKind;

/// Columns between an entrance and the cave portal beside it.
const PORTAL_OFFSET: i32 = 6;
/// Entrances and worm caves keep this far from the sides.
const SIDE_MARGIN: i32 = 50;

/// Carves all caves.
///
/// Entrances draw from their own forked stream; the cellular carve uses
/// only noise; worm caves draw from the run's main stream.
pub(crate) fn run(ctx: &mut PassContext<'_>) -> WorldGenResult<()> {
    entrances(ctx);
    cellular(ctx);
    worm_caves(ctx);
    Ok(())
}

/// Vertical shafts from the surface with worm branches.
fn entrances(ctx: &mut PassContext<'_>) {
    let c = &ctx.config.caves;
    let width = ctx.width();
    let count = ctx.grid.width() / c.tiles_per_entrance;
    let mut rng = ctx.noise.fork(stream::CAVE_ENTRANCES);

    for index in 0..count {
        let x = rng.next_int(SIDE_MARGIN, width - SIDE_MARGIN);
        let top = ctx.grid.surface_height(x);

        for y in top..top + c.shaft_depth {
            for dx in -1..=1 {
                clear(ctx.grid, x + dx, y);
            }
        }

        if index == 0 {
            let px = x + PORTAL_OFFSET;
            let base = ctx.grid.surface_height(px) - 1;
            stamp_portal(ctx.grid, PortalKind::Cave, px, base);
        }

        let branches = rng.next_int(c.branches[0], c.branches[1]);
        for _ in 0..branches {
            let start_y = top + rng.next_int(10, 30);
            let length = rng.next_int(20, 60);
            let heading = rng.next_float() * TAU;
            carve::worm(ctx.grid, &mut rng, c, (x, start_y), length, heading);
        }

        tracing::debug!(x, branches, "cave entrance carved");
    }
}

/// Threshold carve below the surface, denser with depth.
fn cellular(ctx: &mut PassContext<'_>) {
    let c = &ctx.config.caves;
    let (width, height) = (ctx.width(), ctx.height());

    for x in 0..width {
        let surface = ctx.grid.surface_height(x);
        let span = f64::from(height - surface);

        for y in surface + 5..height - 5 {
            let value = ctx.noise.noise2d(f64::from(x) * 0.015, f64::from(y) * 0.015, 1.0, 3, 0.5);
            let depth = f64::from(y - surface) / span;
            if value > c.carve_threshold + depth * c.carve_depth_bonus {
                clear(ctx.grid, x, y);
            }
        }
    }
}

/// Long worm caves deep underground.
fn worm_caves(ctx: &mut PassContext<'_>) {
    let c = &ctx.config.caves;
    let (width, height) = (ctx.width(), ctx.height());
    let count = ctx.grid.width() / c.tiles_per_worm_cave;

    for _ in 0..count {
        let x = ctx.noise.next_int(SIDE_MARGIN, width - SIDE_MARGIN);
        let y = ctx.noise.next_int(ctx.grid.surface_height(x) + 20, height - 50);
        let length = ctx.noise.next_int(100, 300);
        let heading = ctx.noise.next_float_range(0.0, TAU);
        carve::worm(ctx.grid, ctx.noise, c, (x, y), length, heading);
    }

    tracing::debug!(count, "worm caves carved");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::grid::TileGrid;
    use crate::noise::{NoiseGenerator, WorldSeed};
    use crate::settings::WorldSettings;
    use crate::tile::{Tile, TileType};

    fn carved(seed: u64) -> TileGrid {
        let config = GeneratorConfig::default();
        let mut grid = TileGrid::new(400, 200, WorldSeed::new(seed), WorldSettings::default());
        for x in 0..400 {
            grid.set_surface_height(x, 60);
            for y in 60..200 {
                grid.set(x, y, Tile::new(TileType::Stone));
            }
        }
        let mut noise = NoiseGenerator::new(grid.seed());
        let mut ctx = PassContext { grid: &mut grid, noise: &mut noise, config: &config };
        run(&mut ctx).expect("caves");
        grid
    }

    #[test]
    fn test_caves_open_air_underground() {
        let grid = carved(21);
        let underground_air = (0..400)
            .flat_map(|x| (65..195).map(move |y| (x, y)))
            .filter(|&(x, y)| grid.get(x, y).is_air())
            .count();
        assert!(underground_air > 0);
        assert!(grid.count(TileType::Stone) > 0, "caves must not hollow the whole world");
    }

    #[test]
    fn test_first_entrance_gets_cave_portal() {
        let grid = carved(22);
        let portal = grid.portals().find(PortalKind::Cave).expect("cave portal");

        assert_eq!(grid.kind(portal.x, portal.y), TileType::PortalCore);
        assert_eq!(grid.portals().len(), 1);
    }

    #[test]
    fn test_caves_are_deterministic() {
        assert_eq!(carved(5).as_bytes(), carved(5).as_bytes());
    }
}
