//! Water pools in surface depressions and a lava layer at the bottom.

use super::{PassContext, WorldGenResult};
use crate::tile::{Liquid, LiquidKind, Tile, TileType};

/// Fills depressions with water and the deep caves with lava.
///
/// A column pools water when its surface row lies deeper than both
/// neighbours' by more than the margin. Only air is ever filled.
pub(crate) fn run(ctx: &mut PassContext<'_>) -> WorldGenResult<()> {
    let config = ctx.config;
    let l = &config.liquids;
    let (width, height) = (ctx.width(), ctx.height());
    let mut pools = 0usize;

    for x in 1..width - 1 {
        let surface = ctx.grid.surface_height(x);
        let deeper_than = |side: i32| surface > side + l.depression_margin;
        if !(deeper_than(ctx.grid.surface_height(x - 1)) && deeper_than(ctx.grid.surface_height(x + 1))) {
            continue;
        }

        for y in surface..(surface + l.pool_depth).min(height) {
            fill(ctx, x, y, TileType::Water, LiquidKind::Water);
        }
        pools += 1;
    }

    let mut lava = 0usize;
    for y in (height - l.lava_rows).max(0)..height {
        for x in 0..width {
            if fill(ctx, x, y, TileType::Lava, LiquidKind::Lava) {
                lava += 1;
            }
        }
    }

    tracing::debug!(pools, lava, "liquids placed");
    Ok(())
}

/// Turns an air tile into a full liquid tile. Returns true if it did.
fn fill(ctx: &mut PassContext<'_>, x: i32, y: i32, kind: TileType, liquid: LiquidKind) -> bool {
    let tile = ctx.grid.get(x, y);
    if !tile.is_air() {
        return false;
    }
    ctx.grid.set(x, y, Tile::new(kind).with_wall(tile.wall()).with_liquid(Liquid::full(liquid)));
    true
}
