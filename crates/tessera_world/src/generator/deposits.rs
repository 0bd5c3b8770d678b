//! Marble, stone and dirt deposits.
//!
//! Each family draws its centres from its own forked stream and runs in a
//! fixed order, so later families overwrite earlier ones.

use super::{stream, PassContext, WorldGenResult};
use crate::config::DepositSpec;
use crate::grid::TileGrid;
use crate::noise::NoiseGenerator;
use crate::tile::TileType;

/// Blob shape of a deposit family.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Shape {
    /// Half as tall as wide. Inside `core` the blob is always solid.
    Ellipse { core: f64 },
    Disc,
}

/// Places all three deposit families.
pub(crate) fn run(ctx: &mut PassContext<'_>) -> WorldGenResult<()> {
    let d = &ctx.config.deposits;

    let marble = place(
        ctx.grid,
        ctx.noise,
        stream::MARBLE,
        &d.marble,
        Shape::Ellipse { core: d.marble_core },
        TileType::Marble,
        &[TileType::Stone],
    );
    let stone = place(
        ctx.grid,
        ctx.noise,
        stream::STONE,
        &d.stone,
        Shape::Disc,
        TileType::Stone,
        &[TileType::Dirt, TileType::Sand, TileType::Snow],
    );
    let dirt = place(
        ctx.grid,
        ctx.noise,
        stream::DIRT,
        &d.dirt,
        Shape::Disc,
        TileType::Dirt,
        &[TileType::Stone, TileType::Sand, TileType::Snow],
    );

    tracing::debug!(marble, stone, dirt, "deposits placed");
    Ok(())
}

/// Places one family. Returns the number of tiles written.
#[allow(clippy::too_many_arguments, clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn place(
    grid: &mut TileGrid,
    noise: &NoiseGenerator,
    purpose: u64,
    spec: &DepositSpec,
    shape: Shape,
    kind: TileType,
    replaces: &[TileType],
) -> usize {
    let width = grid.width() as i32;
    let height = grid.height() as i32;
    let mut rng = noise.fork(purpose);
    let mut written = 0;

    for _ in 0..grid.width() / spec.tiles_per_deposit {
        let cx = rng.next_int(spec.side_margin, width - spec.side_margin);
        let cy = rng.next_int(grid.surface_height(cx) + spec.min_depth, height - spec.bottom_margin);
        let radius = rng.next_int(spec.radius[0], spec.radius[1]);
        let ry = match shape {
            Shape::Ellipse { .. } => (radius / 2).max(1),
            Shape::Disc => radius,
        };

        for y in cy - ry..=cy + ry {
            for x in cx - radius..=cx + radius {
                if !replaces.contains(&grid.kind(x, y)) {
                    continue;
                }

                let dx = f64::from(x - cx) / f64::from(radius);
                let dy = f64::from(y - cy) / f64::from(ry);
                let distance = (dx * dx + dy * dy).sqrt();
                if distance > 1.0 {
                    continue;
                }

                let edge = noise.noise2d(
                    f64::from(x) * spec.noise_frequency,
                    f64::from(y) * spec.noise_frequency,
                    1.0,
                    spec.noise_octaves,
                    spec.noise_persistence,
                );
                let solid = match shape {
                    Shape::Ellipse { core } => distance <= core || edge > spec.threshold,
                    Shape::Disc => edge > spec.threshold,
                };
                if solid {
                    grid.set_kind(x, y, kind);
                    written += 1;
                }
            }
        }
    }

    written
}
