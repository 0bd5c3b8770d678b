//! Shared carving and stamping helpers.

use crate::config::CaveConfig;
use crate::grid::TileGrid;
use crate::noise::NoiseGenerator;
use crate::portal::{PortalHandle, PortalKind};
use crate::tile::{Tile, TileType};

/// Half width of a portal structure's base slab.
pub const PORTAL_HALF_WIDTH: i32 = 3;
/// Rows from the base slab to the capstone, inclusive.
pub const PORTAL_HEIGHT: i32 = 7;

/// Returns true for portal structure materials, which carving never removes.
#[inline]
#[must_use]
pub const fn is_portal_material(kind: TileType) -> bool {
    matches!(kind, TileType::Obsidian | TileType::PortalVeil | TileType::PortalCore)
}

/// Clears a single tile unless it belongs to a portal structure.
#[inline]
pub(crate) fn clear(grid: &mut TileGrid, x: i32, y: i32) {
    if !is_portal_material(grid.kind(x, y)) {
        grid.set_kind(x, y, TileType::Air);
    }
}

/// Clears every tile within `radius` of `(cx, cy)`.
pub(crate) fn carve_disc(grid: &mut TileGrid, cx: i32, cy: i32, radius: i32) {
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 {
                clear(grid, cx + dx, cy + dy);
            }
        }
    }
}

/// Random-walk tunnel.
///
/// Every step clears a disc of random radius, turns by a random amount and
/// advances. The walk stops once it comes within the border margin.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub(crate) fn worm(
    grid: &mut TileGrid,
    rng: &mut NoiseGenerator,
    config: &CaveConfig,
    start: (i32, i32),
    length: i32,
    heading: f64,
) {
    let (width, height) = (grid.width() as f64, grid.height() as f64);
    let margin = f64::from(config.border_margin);
    let (mut x, mut y) = (f64::from(start.0), f64::from(start.1));
    let mut direction = heading;

    for _ in 0..length {
        let radius = rng.next_int(config.worm_radius[0], config.worm_radius[1]);
        carve_disc(grid, x as i32, y as i32, radius);

        direction += rng.next_float_range(-config.worm_turn, config.worm_turn);
        x += direction.cos() * config.worm_step;
        y += direction.sin() * config.worm_step;

        if x < margin || x >= width - margin || y < margin || y >= height - margin {
            break;
        }
    }
}

/// Stamps a portal structure whose base slab sits on row `base_y`.
///
/// Layout, bottom to top: a 7-wide obsidian base slab, a 5-wide inset slab,
/// two 4-tall pillars with veil between them, a 7-wide capstone. The core
/// marker replaces the veil at the structure's vertical middle and the
/// portal is registered at the core.
///
/// # Returns
///
/// The handle of the registered portal.
pub fn stamp_portal(grid: &mut TileGrid, kind: PortalKind, cx: i32, base_y: i32) -> PortalHandle {
    let h = PORTAL_HALF_WIDTH;
    let put = |grid: &mut TileGrid, x: i32, y: i32, kind: TileType| {
        grid.set(x, y, Tile::new(kind).with_wall(grid.get(x, y).wall()));
    };

    for x in cx - h..=cx + h {
        put(grid, x, base_y, TileType::Obsidian);
        put(grid, x, base_y - PORTAL_HEIGHT + 1, TileType::Obsidian);
    }
    for x in cx - (h - 1)..=cx + (h - 1) {
        put(grid, x, base_y - 1, TileType::Obsidian);
    }
    for y in base_y - 5..=base_y - 2 {
        put(grid, cx - (h - 1), y, TileType::Obsidian);
        put(grid, cx + (h - 1), y, TileType::Obsidian);
        for x in cx - (h - 2)..=cx + (h - 2) {
            put(grid, x, y, TileType::PortalVeil);
        }
    }

    let core_y = base_y - PORTAL_HEIGHT / 2;
    put(grid, cx, core_y, TileType::PortalCore);

    tracing::debug!(portal = kind.name(), x = cx, y = core_y, "portal stamped");
    grid.portals_mut().place(kind, cx, core_y)
}
