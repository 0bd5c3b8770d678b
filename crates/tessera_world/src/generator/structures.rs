//! Stamped surface structures: the desert mountain and the floating island.

use super::carve::{stamp_portal, PORTAL_HEIGHT};
use super::{pass_failed, GenerationPass, PassContext, WorldGenResult};
use crate::portal::PortalKind;
use crate::tile::TileType;

/// A strict triangle of sand on the middle column.
///
/// Layer `i` (counted up from the base) is `base_width - 2i` wide; layers
/// stop once the width reaches the floor. Each column is filled from its
/// layer top down to its old surface, then the surface is raised.
/// Layer tops never rise above the terrain's minimum surface row or the
/// portal height, so a short world gets a flat-topped mountain.
///
/// # Errors
///
/// Fails if the peak leaves no room for its portal.
pub(crate) fn desert_mountain(ctx: &mut PassContext<'_>) -> WorldGenResult<()> {
    let s = &ctx.config.structures;
    let ceiling = ctx.config.terrain.min_surface.max(PORTAL_HEIGHT);
    let cx = ctx.width() / 2;
    let base = ctx.grid.surface_height(cx);

    let layers = (s.mountain_base_width - s.mountain_min_width + 1) / 2;
    let half = s.mountain_base_width / 2;
    for x in cx - half..=cx + half {
        // Layer i spans `half - i` columns either side of the centre.
        let layer = (half - (x - cx).abs()).min(layers - 1);
        let top = (base - layer).max(ceiling);
        let ground = ctx.grid.surface_height(x);
        if top >= ground {
            continue;
        }

        for y in top..ground {
            if ctx.grid.kind(x, y).is_air() {
                ctx.grid.set_kind(x, y, TileType::Sand);
            }
        }
        ctx.grid.set_surface_height(x, top);
    }

    let peak = ctx.grid.surface_height(cx);
    if peak < PORTAL_HEIGHT {
        return Err(pass_failed(
            GenerationPass::DesertMountain,
            format!("peak row {peak} leaves no room for the portal"),
        ));
    }
    stamp_portal(ctx.grid, PortalKind::Desert, cx, peak - 1);
    tracing::debug!(x = cx, apex = peak, layers, "desert mountain raised");
    Ok(())
}

/// One floating island, slab on top and tapering underneath.
///
/// # Errors
///
/// Fails if the island does not fit inside the grid.
pub(crate) fn floating_island(ctx: &mut PassContext<'_>) -> WorldGenResult<()> {
    let s = &ctx.config.structures;
    let cx = ctx.width() * 2 / 3;
    let top = ctx.height() / 8;
    let half = s.island_width / 2;

    if top - PORTAL_HEIGHT < 0 || cx + half >= ctx.width() {
        return Err(pass_failed(GenerationPass::FloatingIsland, "island does not fit"));
    }

    let mut layer = 0;
    loop {
        let taper = (layer - s.island_slab_layers + 1).max(0) * 2;
        let reach = half - taper;
        if reach < 1 {
            break;
        }

        let y = top + layer;
        let kind = match layer {
            0 => TileType::Grass,
            1 | 2 => TileType::Dirt,
            _ => TileType::Stone,
        };

        for x in cx - reach..=cx + reach {
            let edge = x == cx - reach || x == cx + reach;
            if layer > 0 && edge && ctx.noise.next_float() < s.island_erosion {
                continue;
            }
            ctx.grid.set_kind(x, y, kind);
        }
        layer += 1;
    }

    stamp_portal(ctx.grid, PortalKind::Island, cx, top - 1);
    tracing::debug!(x = cx, y = top, layers = layer, "floating island placed");
    Ok(())
}

/// Logs the portal registry; placement happened in earlier passes.
pub(crate) fn audit_portals(ctx: &mut PassContext<'_>) -> WorldGenResult<()> {
    let portals = ctx.grid.portals();
    for kind in PortalKind::ALL {
        match portals.find(kind) {
            Some(portal) => {
                tracing::info!(portal = kind.name(), x = portal.x, y = portal.y, "portal registered");
            }
            None => tracing::warn!(portal = kind.name(), "portal missing from world"),
        }
    }
    Ok(())
}
