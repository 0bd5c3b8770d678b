//! Surface biome relabelling.

use super::{PassContext, WorldGenResult};
use crate::config::BiomeConfig;
use crate::noise::NoiseGenerator;
use crate::tile::TileType;

/// Biome material for a surface grass tile in column `x`.
///
/// The lateral value is `x / width` plus a small noise drift, so the
/// boundaries wander instead of sitting at fixed columns.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn biome_at(noise: &NoiseGenerator, config: &BiomeConfig, x: i32, width: i32) -> TileType {
    let drift = noise.noise1d(f64::from(x) * config.boundary_frequency, 1.0, 2, 0.5);
    let value = f64::from(x) / f64::from(width) + drift * config.boundary_noise;

    if value < config.snow_edge {
        TileType::Snow
    } else if value > config.jungle_edge {
        TileType::JungleGrass
    } else {
        TileType::Grass
    }
}

/// Relabels surface tiles that are already grass; nothing else is touched.
pub(crate) fn run(ctx: &mut PassContext<'_>) -> WorldGenResult<()> {
    let width = ctx.width();
    let mut relabelled = 0usize;

    for x in 0..width {
        let y = ctx.grid.surface_height(x);
        if ctx.grid.kind(x, y) != TileType::Grass {
            continue;
        }
        let biome = biome_at(ctx.noise, &ctx.config.biomes, x, width);
        if biome != TileType::Grass {
            ctx.grid.set_kind(x, y, biome);
            relabelled += 1;
        }
    }

    tracing::debug!(relabelled, "surface biomes assigned");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::grid::TileGrid;
    use crate::noise::WorldSeed;
    use crate::settings::WorldSettings;
    use crate::tile::Tile;

    #[test]
    fn test_biome_order_left_to_right() {
        let noise = NoiseGenerator::new(WorldSeed::new(8));
        let config = BiomeConfig::default();

        assert_eq!(biome_at(&noise, &config, 0, 1000), TileType::Snow);
        assert_eq!(biome_at(&noise, &config, 165, 1000), TileType::Grass);
        assert_eq!(biome_at(&noise, &config, 320, 1000), TileType::JungleGrass);
    }

    #[test]
    fn test_only_surface_grass_is_relabelled() {
        let config = GeneratorConfig::default();
        let mut grid = TileGrid::new(300, 100, WorldSeed::new(8), WorldSettings::default());
        for x in 0..300 {
            grid.set_surface_height(x, 40);
            grid.set(x, 40, Tile::new(TileType::Grass));
            grid.set(x, 41, Tile::new(TileType::Grass));
        }
        grid.set(0, 40, Tile::new(TileType::Sand));

        let mut noise = NoiseGenerator::new(grid.seed());
        let mut ctx = PassContext { grid: &mut grid, noise: &mut noise, config: &config };
        run(&mut ctx).expect("biomes");

        assert_eq!(grid.kind(0, 40), TileType::Sand, "non-grass surface untouched");
        assert_eq!(grid.kind(1, 40), TileType::Snow);
        assert_eq!(grid.kind(299, 40), TileType::JungleGrass);
        assert!((0..300).all(|x| grid.kind(x, 41) == TileType::Grass), "below the surface untouched");
    }
}
