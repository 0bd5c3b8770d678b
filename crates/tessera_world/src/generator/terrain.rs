//! Height field, layering, background walls and surface materials.
//!
//! The world is split laterally into three bands whose edges wander with
//! noise: dirt on the left, sand in the middle, snow on the right. Band
//! materials reach down to a noise-perturbed depth ratio, stone fills the
//! rest.

use super::{pass_failed, GenerationPass, PassContext, WorldGenResult};
use crate::noise::NoiseGenerator;
use crate::settings::surface_level_for;
use crate::tile::{TileType, WallType};

/// One of the three lateral bands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Band {
    Dirt,
    Sand,
    Snow,
}

impl Band {
    /// Band for a lateral value.
    pub fn classify(value: f64, edges: [f64; 2]) -> Self {
        if value < edges[0] {
            Self::Dirt
        } else if value < edges[1] {
            Self::Sand
        } else {
            Self::Snow
        }
    }

    pub const fn material(self) -> TileType {
        match self {
            Self::Dirt => TileType::Dirt,
            Self::Sand => TileType::Sand,
            Self::Snow => TileType::Snow,
        }
    }

    pub const fn wall(self) -> WallType {
        match self {
            Self::Dirt => WallType::Dirt,
            Self::Sand => WallType::Sand,
            Self::Snow => WallType::Snow,
        }
    }
}

/// Lateral band value of a tile, `x / width` nudged by noise.
#[allow(clippy::cast_precision_loss)]
fn band_value(noise: &NoiseGenerator, x: i32, y: i32, width: i32) -> f64 {
    let drift = noise.noise2d(f64::from(x) * 0.01, f64::from(y) * 0.005, 1.0, 3, 0.5);
    f64::from(x) / f64::from(width) + drift * 0.3
}

/// Raw height field followed by a few rounds of 3-tap smoothing.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn height_field(ctx: &PassContext<'_>) -> WorldGenResult<Vec<i32>> {
    let t = &ctx.config.terrain;
    let width = ctx.width();
    let baseline = surface_level_for(ctx.grid.height()) as f64;

    let mut heights: Vec<f64> = (0..width)
        .map(|x| {
            let n = ctx.noise.noise1d(f64::from(x) * t.height_frequency, 1.0, 3, 0.4);
            baseline + n * t.height_variation
        })
        .collect();

    let last = heights.len().saturating_sub(1);
    for _ in 0..t.smooth_rounds {
        heights = (0..heights.len())
            .map(|i| {
                let left = heights[i.saturating_sub(1)];
                let right = heights[(i + 1).min(last)];
                (left + heights[i] + right) / 3.0
            })
            .collect();
    }

    let (low, high) = (t.min_surface, ctx.height() - t.bottom_margin);
    if low > high {
        return Err(pass_failed(
            GenerationPass::Terrain,
            format!("surface band {low}..={high} is empty"),
        ));
    }
    Ok(heights.into_iter().map(|h| (h as i32).clamp(low, high)).collect())
}

/// Fills every column below its surface with band material or stone.
pub(crate) fn run(ctx: &mut PassContext<'_>) -> WorldGenResult<()> {
    let heights = height_field(ctx)?;
    let t = &ctx.config.terrain;
    let (width, height) = (ctx.width(), ctx.height());

    for (x, &surface) in (0..width).zip(&heights) {
        ctx.grid.set_surface_height(x, surface);
        let span = f64::from(height - surface);

        for y in surface..height {
            let ratio = f64::from(y - surface) / span;
            let wobble = ctx.noise.noise2d(f64::from(x) * 0.005, f64::from(y) * 0.003, 1.0, 2, 0.3);

            let kind = if ratio + wobble * 0.2 < t.band_depth {
                Band::classify(band_value(ctx.noise, x, y, width), t.band_edges).material()
            } else {
                TileType::Stone
            };
            ctx.grid.set_kind(x, y, kind);
        }
    }

    Ok(())
}

/// Background walls from column depth and lateral band only.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn walls(ctx: &mut PassContext<'_>) -> WorldGenResult<()> {
    let t = &ctx.config.terrain;
    let (width, height) = (ctx.width(), ctx.height());

    for x in 0..width {
        let surface = ctx.grid.surface_height(x);
        let drift = ctx.noise.noise1d(f64::from(x) * 0.01, 1.0, 2, 0.5);
        let band = Band::classify(f64::from(x) / f64::from(width) + drift * 0.3, t.band_edges);
        let span = f64::from(height - surface);

        for y in surface + 1..height {
            let wall = if f64::from(y - surface) / span < t.band_depth {
                band.wall()
            } else {
                WallType::Stone
            };
            let tile = ctx.grid.get(x, y);
            ctx.grid.set(x, y, tile.with_wall(wall));
        }
    }

    Ok(())
}

/// Re-asserts each band's surface material over per-row noise drift.
///
/// Dirt surfaces become grass. In the sand band the surface and three rows
/// below are forced back to sand, in the snow band the surface and two rows
/// below to snow. Only band materials are overwritten; stone stays.
pub(crate) fn surface_decor(ctx: &mut PassContext<'_>) -> WorldGenResult<()> {
    let edges = ctx.config.terrain.band_edges;
    let width = ctx.width();

    for x in 0..width {
        let y = ctx.grid.surface_height(x);
        let band = Band::classify(band_value(ctx.noise, x, y, width), edges);

        let depth = match band {
            Band::Dirt => {
                if ctx.grid.kind(x, y) == TileType::Dirt {
                    ctx.grid.set_kind(x, y, TileType::Grass);
                }
                continue;
            }
            Band::Sand => 3,
            Band::Snow => 2,
        };
        for row in y..=y + depth {
            let kind = ctx.grid.kind(x, row);
            if kind != band.material() && is_band_material(kind) {
                ctx.grid.set_kind(x, row, band.material());
            }
        }
    }

    Ok(())
}

const fn is_band_material(kind: TileType) -> bool {
    matches!(kind, TileType::Dirt | TileType::Sand | TileType::Snow)
}
