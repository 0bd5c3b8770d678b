//! Cliff etching, grass overlay and the final frame sweep.

use std::f64::consts::FRAC_PI_4;

use super::carve::carve_disc;
use super::{PassContext, WorldGenResult};
use crate::frame::{self, overlay};
use crate::tile::TileType;

pub(crate) fn run(ctx: &mut PassContext<'_>) -> WorldGenResult<()> {
    let etched = etch_cliffs(ctx);
    let grass = overlay_grass(ctx);
    let pockets = scatter_pockets(ctx);
    let changed = frame::recompute_all(ctx.grid);

    tracing::debug!(etched, grass, pockets, changed, "world finalized");
    Ok(())
}

/// Breaks up vertical cliffs.
///
/// Wherever neighbouring columns differ by more than the threshold, a short
/// walk descends diagonally from the higher column toward the lower one.
/// Heights are read from a snapshot so one etch cannot trigger another.
///
/// # Returns
///
/// Number of cliffs etched.
#[allow(clippy::cast_possible_truncation)]
fn etch_cliffs(ctx: &mut PassContext<'_>) -> usize {
    let f = &ctx.config.finalize;
    let heights = ctx.grid.surface_heights().to_vec();
    let mut etched = 0;

    for (x, pair) in (0_i32..).zip(heights.windows(2)) {
        let (left, right) = (pair[0], pair[1]);
        if (left - right).abs() <= f.cliff_threshold {
            continue;
        }

        // Rows grow downward: the higher column has the smaller surface row.
        let (start_x, start_y, heading) = if left < right {
            (x, left, FRAC_PI_4)
        } else {
            (x + 1, right, 3.0 * FRAC_PI_4)
        };

        let (mut px, mut py) = (f64::from(start_x), f64::from(start_y));
        for _ in 0..f.etch_length {
            let radius = ctx.noise.next_int(f.etch_radius[0], f.etch_radius[1]);
            carve_disc(ctx.grid, px as i32, py as i32, radius);
            px += heading.cos();
            py += heading.sin();
        }
        etched += 1;
    }

    if etched > 0 {
        let reach = f.etch_length + f.etch_radius[1];
        resettle_surface(ctx, &heights, reach);
    }
    etched
}

/// Lowers each column's surface onto the first solid tile, searching at
/// most `reach` rows below its previous surface and never past the
/// terrain's bottom margin.
fn resettle_surface(ctx: &mut PassContext<'_>, heights: &[i32], reach: i32) {
    let bottom = ctx.height() - ctx.config.terrain.bottom_margin;
    for (x, &old) in (0_i32..).zip(heights) {
        let limit = (old + reach).min(bottom);
        let mut y = old;
        while y < limit && ctx.grid.get(x, y).is_air() {
            y += 1;
        }
        if ctx.grid.get(x, y).is_air() {
            continue;
        }
        ctx.grid.set_surface_height(x, y);
    }
}

/// Turns every exposed dirt tile into grass carrying an overlay frame.
///
/// Grass connects to dirt, so converting one tile never exposes another and
/// the scan order does not matter.
///
/// # Returns
///
/// Number of tiles converted.
fn overlay_grass(ctx: &mut PassContext<'_>) -> usize {
    let (width, height) = (ctx.width(), ctx.height());
    let mut converted = 0;

    for y in 0..height {
        for x in 0..width {
            let tile = ctx.grid.get(x, y);
            if tile.kind() != TileType::Dirt {
                continue;
            }
            if let Some(frame) = overlay::grass_overlay_frame(ctx.grid, x, y) {
                ctx.grid.set(x, y, tile.with_kind(TileType::Grass).with_frame(frame));
                converted += 1;
            }
        }
    }
    converted
}

/// Scatters grass pockets through deep dirt, gated by noise density.
fn scatter_pockets(ctx: &mut PassContext<'_>) -> usize {
    let f = &ctx.config.finalize;
    let (width, height) = (ctx.width(), ctx.height());
    let mut pockets = 0;

    for x in 0..width {
        let start = ctx.grid.surface_height(x) + f.pocket_min_depth + 1;
        for y in start.max(0)..height {
            if ctx.grid.kind(x, y) != TileType::Dirt {
                continue;
            }
            let density = ctx.noise.noise2d(
                f64::from(x) * f.pocket_frequency,
                f64::from(y) * f.pocket_frequency,
                1.0,
                2,
                0.5,
            );
            if density > f.pocket_threshold {
                ctx.grid.set_kind(x, y, TileType::Grass);
                pockets += 1;
            }
        }
    }
    pockets
}
