//! # Tile Frame Processor
//!
//! Maps every tile's 8-neighbour adjacency to a visual frame index.
//!
//! ## Algorithm
//!
//! 1. Stone-like materials (stone, marble, snow, sand) first try the ordered
//!    dirt-seam override table in [`rules`].
//! 2. Everything else, and any override miss, builds an 8-bit neighbour
//!    mask and looks it up in the blob-47 table in [`blob`].
//!
//! Grass reclassified by the finalize pass carries frames from the
//! [`overlay`] buckets instead. Those frames live past the blob range, and
//! recomputation leaves such tiles alone.
//!
//! Frames index `row * 16 + col` into a 16-column atlas.

pub mod blob;
pub mod overlay;
pub mod rules;

use crate::grid::TileGrid;
use crate::tile::TileType;

pub use blob::{blob_frame, neighbor_mask, BLOB_TABLE, MAX_BLOB_FRAME};
pub use overlay::{grass_overlay_frame, is_overlay_frame};
pub use rules::{find_override, OverrideRule, OVERRIDE_RULES};

/// Neighbour direction bits.
///
/// Bit layout (bit 7 to bit 0): TL, T, TR, R, BR, B, BL, L.
pub mod dir {
    /// Left.
    pub const L: u8 = 1 << 0;
    /// Bottom-left.
    pub const BL: u8 = 1 << 1;
    /// Bottom.
    pub const B: u8 = 1 << 2;
    /// Bottom-right.
    pub const BR: u8 = 1 << 3;
    /// Right.
    pub const R: u8 = 1 << 4;
    /// Top-right.
    pub const TR: u8 = 1 << 5;
    /// Top.
    pub const T: u8 = 1 << 6;
    /// Top-left.
    pub const TL: u8 = 1 << 7;

    /// The four cardinal directions.
    pub const CARDINALS: u8 = L | B | R | T;
    /// The four diagonal directions.
    pub const DIAGONALS: u8 = BL | BR | TR | TL;
    /// Every direction.
    pub const ALL: u8 = 0xFF;

    /// `(bit, dx, dy)` for every direction. `y` grows downwards.
    pub const OFFSETS: [(u8, i32, i32); 8] = [
        (L, -1, 0),
        (BL, -1, 1),
        (B, 0, 1),
        (BR, 1, 1),
        (R, 1, 0),
        (TR, 1, -1),
        (T, 0, -1),
        (TL, -1, -1),
    ];
}

/// Returns true if two materials visually merge.
#[inline]
#[must_use]
pub const fn connectable(a: TileType, b: TileType) -> bool {
    if a as u8 == b as u8 {
        return true;
    }
    matches!(
        (a, b),
        (TileType::Grass, TileType::Dirt)
            | (TileType::Dirt, TileType::Grass)
            | (TileType::JungleGrass, TileType::Dirt)
            | (TileType::Dirt, TileType::JungleGrass)
            | (TileType::Grass, TileType::JungleGrass)
            | (TileType::JungleGrass, TileType::Grass)
    )
}

/// Materials that use the dirt-seam override table.
#[inline]
#[must_use]
pub const fn uses_dirt_overrides(kind: TileType) -> bool {
    matches!(
        kind,
        TileType::Stone | TileType::Marble | TileType::Snow | TileType::Sand
    )
}

/// Connectivity snapshot around one tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Neighbourhood {
    /// Directions whose neighbour connects to the centre material.
    pub connect: u8,
    /// Directions whose neighbour is dirt.
    pub dirt: u8,
}

impl Neighbourhood {
    /// Samples the 8 neighbours of `(x, y)` as if the centre were `kind`.
    ///
    /// Out-of-bounds neighbours never connect and are never dirt.
    #[must_use]
    pub fn sample(grid: &TileGrid, x: i32, y: i32, kind: TileType) -> Self {
        let mut n = Self::default();
        for (bit, dx, dy) in dir::OFFSETS {
            let (nx, ny) = (x + dx, y + dy);
            if !grid.in_bounds(nx, ny) {
                continue;
            }
            let other = grid.kind(nx, ny);
            if connectable(kind, other) {
                n.connect |= bit;
            }
            if other == TileType::Dirt {
                n.dirt |= bit;
            }
        }
        n
    }

    /// Cardinal sides that do not connect.
    #[inline]
    #[must_use]
    pub const fn exposed(&self) -> u8 {
        dir::CARDINALS & !self.connect
    }
}

/// Picks one candidate frame for a position.
///
/// The choice depends only on `(x, y)`, so recomputation is stable.
#[inline]
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub fn pick(x: i32, y: i32, frames: &[u8]) -> u8 {
    if frames.is_empty() {
        return 0;
    }
    let mut h = (x as u32).wrapping_mul(0x9E37_79B1) ^ (y as u32).wrapping_mul(0x85EB_CA77);
    h ^= h >> 15;
    h = h.wrapping_mul(0x2C1B_3C6D);
    h ^= h >> 12;
    frames[h as usize % frames.len()]
}

/// Computes the frame of `(x, y)` as if it held `kind`.
///
/// Pure function of the grid contents. Air is always frame 0.
#[must_use]
pub fn compute_frame(grid: &TileGrid, x: i32, y: i32, kind: TileType) -> u8 {
    if kind.is_air() {
        return 0;
    }

    let n = Neighbourhood::sample(grid, x, y, kind);

    if uses_dirt_overrides(kind) {
        if let Some(rule) = find_override(&n) {
            return pick(x, y, rule.frames);
        }
    }

    blob_frame(n.connect)
}

/// Returns true if recomputation should leave this tile alone.
#[inline]
fn is_pinned(kind: TileType, frame: u8) -> bool {
    kind.is_air() || (kind == TileType::Grass && is_overlay_frame(frame))
}

/// Recomputes one tile's frame. Returns true if it changed.
fn refresh(grid: &mut TileGrid, x: i32, y: i32) -> bool {
    let tile = grid.get(x, y);
    if is_pinned(tile.kind(), tile.frame()) {
        return false;
    }
    let frame = compute_frame(grid, x, y, tile.kind());
    if frame == tile.frame() {
        return false;
    }
    grid.set(x, y, tile.with_frame(frame));
    true
}

/// Recomputes the 8 neighbours of `(x, y)` once, without cascading further.
fn touch_neighbours(grid: &mut TileGrid, x: i32, y: i32) -> usize {
    dir::OFFSETS
        .iter()
        .filter(|&&(_, dx, dy)| refresh(grid, x + dx, y + dy))
        .count()
}

/// Recomputes every frame in the grid.
///
/// Row-major single sweep. When a tile's frame changes, its 8 neighbours
/// are recomputed once; changes found there do not cascade further.
///
/// # Returns
///
/// Number of frame writes.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn recompute_all(grid: &mut TileGrid) -> usize {
    let (width, height) = (grid.width() as i32, grid.height() as i32);
    let mut changed = 0;

    for y in 0..height {
        for x in 0..width {
            if refresh(grid, x, y) {
                changed += 1 + touch_neighbours(grid, x, y);
            }
        }
    }

    tracing::debug!(changed, "frame sweep complete");
    changed
}

/// Recomputes frames after a single-tile edit at `(x, y)`.
///
/// Covers the 3x3 window around the edit, then touches the neighbours of
/// any tile whose frame changed.
///
/// # Returns
///
/// Number of frame writes.
pub fn recompute_around(grid: &mut TileGrid, x: i32, y: i32) -> usize {
    let mut changed = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            if refresh(grid, x + dx, y + dy) {
                changed += 1 + touch_neighbours(grid, x + dx, y + dy);
            }
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::WorldSeed;
    use crate::settings::WorldSettings;
    use crate::tile::Tile;

    fn grid(width: usize, height: usize) -> TileGrid {
        TileGrid::new(width, height, WorldSeed::new(1), WorldSettings::default())
    }

    fn fill(grid: &mut TileGrid, kind: TileType) {
        for y in 0..grid.height() as i32 {
            for x in 0..grid.width() as i32 {
                grid.set(x, y, Tile::new(kind));
            }
        }
    }

    #[test]
    fn test_connectable_pairs() {
        assert!(connectable(TileType::Stone, TileType::Stone));
        assert!(connectable(TileType::Grass, TileType::Dirt));
        assert!(connectable(TileType::Dirt, TileType::JungleGrass));
        assert!(connectable(TileType::JungleGrass, TileType::Grass));
        assert!(!connectable(TileType::Stone, TileType::Dirt));
        assert!(!connectable(TileType::Snow, TileType::Grass));
    }

    #[test]
    fn test_air_is_frame_zero() {
        let grid = grid(4, 4);
        assert_eq!(compute_frame(&grid, 1, 1, TileType::Air), 0);
    }

    #[test]
    fn test_isolated_and_enclosed() {
        let mut g = grid(5, 5);
        g.set(2, 2, Tile::new(TileType::Dirt));
        assert_eq!(compute_frame(&g, 2, 2, TileType::Dirt), BLOB_TABLE[0]);

        fill(&mut g, TileType::Dirt);
        assert_eq!(compute_frame(&g, 2, 2, TileType::Dirt), BLOB_TABLE[255]);
    }

    #[test]
    fn test_out_of_bounds_never_connects() {
        let mut g = grid(3, 3);
        fill(&mut g, TileType::Dirt);

        let corner = Neighbourhood::sample(&g, 0, 0, TileType::Dirt);
        assert_eq!(corner.connect, dir::R | dir::B | dir::BR);
        assert_eq!(corner.dirt, dir::R | dir::B | dir::BR);
    }

    #[test]
    fn test_compute_frame_is_pure() {
        let mut g = grid(6, 6);
        g.set(2, 2, Tile::new(TileType::Stone));
        g.set(3, 2, Tile::new(TileType::Stone));
        g.set(2, 3, Tile::new(TileType::Dirt));
        let before = g.as_bytes().to_vec();

        let first = compute_frame(&g, 2, 2, TileType::Stone);
        let second = compute_frame(&g, 2, 2, TileType::Stone);

        assert_eq!(first, second);
        assert_eq!(g.as_bytes(), before.as_slice(), "compute_frame must not mutate");
    }

    #[test]
    fn test_stone_corner_dirt_override() {
        // Stone block with a single dirt tile at the bottom-right diagonal.
        let mut g = grid(5, 5);
        fill(&mut g, TileType::Stone);
        g.set(3, 3, Tile::new(TileType::Dirt));

        let frame = compute_frame(&g, 2, 2, TileType::Stone);
        assert!(
            [5u8 * 16, 7 * 16, 9 * 16].contains(&frame),
            "expected a bottom-right seam frame, got {frame}"
        );
    }

    #[test]
    fn test_dirt_ignores_overrides() {
        let mut g = grid(5, 5);
        fill(&mut g, TileType::Dirt);
        g.set(3, 3, Tile::new(TileType::Stone));

        let frame = compute_frame(&g, 2, 2, TileType::Dirt);
        assert!(frame <= MAX_BLOB_FRAME);
    }

    #[test]
    fn test_recompute_all_assigns_frames() {
        let mut g = grid(8, 8);
        for x in 0..8 {
            for y in 4..8 {
                g.set(x, y, Tile::new(TileType::Dirt));
            }
        }
        let changed = recompute_all(&mut g);
        assert!(changed > 0);

        for x in 0..8 {
            for y in 0..8 {
                let tile = g.get(x, y);
                assert_eq!(
                    tile.frame(),
                    compute_frame(&g, x, y, tile.kind()),
                    "stale frame at ({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn test_overlay_grass_is_pinned() {
        let mut g = grid(4, 4);
        g.set(1, 1, Tile::new(TileType::Grass).with_frame(overlay::TOP[0]));
        recompute_all(&mut g);
        assert_eq!(g.get(1, 1).frame(), overlay::TOP[0]);
    }

    #[test]
    fn test_recompute_around_edit() {
        let mut g = grid(6, 6);
        fill(&mut g, TileType::Dirt);
        recompute_all(&mut g);

        g.set_kind(2, 2, TileType::Air);
        let changed = recompute_around(&mut g, 2, 2);
        assert!(changed >= 4, "cardinal neighbours of the hole must change");
        assert_eq!(g.get(2, 1).frame(), compute_frame(&g, 2, 1, TileType::Dirt));
    }

    #[test]
    fn test_pick_is_stable_and_in_set() {
        let frames = [5u8, 6, 7];
        for x in -20..20 {
            for y in -20..20 {
                let a = pick(x, y, &frames);
                assert_eq!(a, pick(x, y, &frames));
                assert!(frames.contains(&a));
            }
        }
    }
}
