//! # Tile Grid
//!
//! Dense row-major storage for one world.
//!
//! Coordinates are signed so callers can probe neighbours past the edge
//! without casting. Out-of-range reads yield air and out-of-range writes are
//! ignored; nothing is raised on mutation, so keeping frames and chunk
//! caches in sync is the caller's job.

use crate::noise::WorldSeed;
use crate::portal::PortalRegistry;
use crate::settings::WorldSettings;
use crate::tile::{Tile, TileType};

/// A generated (or generating) tile world.
#[derive(Clone, Debug)]
pub struct TileGrid {
    width: usize,
    height: usize,
    /// Layout: `tiles[y * width + x]`.
    tiles: Vec<Tile>,
    /// Surface row per column.
    surface: Vec<i32>,
    seed: WorldSeed,
    settings: WorldSettings,
    portals: PortalRegistry,
}

impl TileGrid {
    /// Creates an all-air grid.
    ///
    /// Note: This allocates `width * height` tiles. Call once per world.
    #[must_use]
    pub fn new(width: usize, height: usize, seed: WorldSeed, settings: WorldSettings) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::AIR; width * height],
            surface: vec![0; width],
            seed,
            settings,
            portals: PortalRegistry::new(),
        }
    }

    /// Creates an all-air grid sized by `settings`.
    #[must_use]
    pub fn from_settings(seed: WorldSeed, settings: WorldSettings) -> Self {
        let (width, height) = settings.world_size();
        Self::new(width, height, seed, settings)
    }

    /// Width in tiles.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in tiles.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Seed the world was generated from.
    #[inline]
    #[must_use]
    pub const fn seed(&self) -> WorldSeed {
        self.seed
    }

    /// Settings the world was generated with.
    #[inline]
    #[must_use]
    pub const fn settings(&self) -> &WorldSettings {
        &self.settings
    }

    /// Returns true if `(x, y)` lies inside the grid.
    #[inline]
    #[must_use]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Reads a tile. Out of bounds reads yield air.
    #[inline]
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Tile {
        self.index(x, y).map_or(Tile::AIR, |i| self.tiles[i])
    }

    /// Reads only the material at `(x, y)`.
    #[inline]
    #[must_use]
    pub fn kind(&self, x: i32, y: i32) -> TileType {
        self.get(x, y).kind()
    }

    /// Writes a tile. Out of bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, tile: Tile) {
        if let Some(i) = self.index(x, y) {
            self.tiles[i] = tile;
        }
    }

    /// Replaces the material at `(x, y)`, keeping wall and liquid.
    ///
    /// The frame is reset since it no longer describes the new material.
    #[inline]
    pub fn set_kind(&mut self, x: i32, y: i32, kind: TileType) {
        if let Some(i) = self.index(x, y) {
            self.tiles[i] = self.tiles[i].with_kind(kind).with_frame(0);
        }
    }

    /// Surface row of column `x`, or 0 outside the grid.
    #[inline]
    #[must_use]
    pub fn surface_height(&self, x: i32) -> i32 {
        usize::try_from(x)
            .ok()
            .and_then(|x| self.surface.get(x))
            .copied()
            .unwrap_or(0)
    }

    /// Sets the surface row of column `x`. Ignored outside the grid.
    #[inline]
    pub fn set_surface_height(&mut self, x: i32, height: i32) {
        if let Some(slot) = usize::try_from(x).ok().and_then(|x| self.surface.get_mut(x)) {
            *slot = height;
        }
    }

    /// All surface rows, indexed by column.
    #[inline]
    #[must_use]
    pub fn surface_heights(&self) -> &[i32] {
        &self.surface
    }

    /// All tiles in row-major order.
    #[inline]
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Raw tile bytes, four per tile.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.tiles)
    }

    /// Counts tiles of one material.
    #[must_use]
    pub fn count(&self, kind: TileType) -> usize {
        self.tiles.iter().filter(|t| t.kind() == kind).count()
    }

    /// Portals placed in this world.
    #[inline]
    #[must_use]
    pub const fn portals(&self) -> &PortalRegistry {
        &self.portals
    }

    /// Mutable access to this world's portals.
    #[inline]
    pub fn portals_mut(&mut self) -> &mut PortalRegistry {
        &mut self.portals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> TileGrid {
        TileGrid::new(32, 16, WorldSeed::new(1), WorldSettings::default())
    }

    #[test]
    fn test_set_then_get() {
        let mut grid = grid();
        let tile = Tile::new(TileType::Marble).with_frame(12);

        for (x, y) in [(0, 0), (31, 15), (7, 9)] {
            grid.set(x, y, tile);
            assert_eq!(grid.get(x, y), tile, "Round trip failed at ({x}, {y})");
        }
    }

    #[test]
    fn test_out_of_bounds_reads_air() {
        let grid = grid();
        for (x, y) in [(-1, 0), (0, -1), (32, 0), (0, 16), (i32::MIN, i32::MAX)] {
            assert!(!grid.in_bounds(x, y));
            assert_eq!(grid.get(x, y), Tile::AIR);
        }
    }

    #[test]
    fn test_out_of_bounds_write_is_noop() {
        let mut grid = grid();
        let before = grid.as_bytes().to_vec();

        grid.set(-1, 3, Tile::new(TileType::Stone));
        grid.set(32, 3, Tile::new(TileType::Stone));
        grid.set(3, 16, Tile::new(TileType::Stone));
        grid.set_kind(-5, -5, TileType::Dirt);

        assert_eq!(grid.as_bytes(), before.as_slice());
    }

    #[test]
    fn test_set_kind_keeps_wall_resets_frame() {
        use crate::tile::WallType;

        let mut grid = grid();
        grid.set(4, 4, Tile::new(TileType::Stone).with_wall(WallType::Stone).with_frame(9));
        grid.set_kind(4, 4, TileType::Air);

        let tile = grid.get(4, 4);
        assert_eq!(tile.kind(), TileType::Air);
        assert_eq!(tile.wall(), WallType::Stone);
        assert_eq!(tile.frame(), 0);
    }

    #[test]
    fn test_surface_height_bounds() {
        let mut grid = grid();
        grid.set_surface_height(3, 7);
        grid.set_surface_height(99, 7);

        assert_eq!(grid.surface_height(3), 7);
        assert_eq!(grid.surface_height(-1), 0);
        assert_eq!(grid.surface_height(99), 0);
        assert_eq!(grid.surface_heights().len(), 32);
    }

    #[test]
    fn test_from_settings_size() {
        let grid = TileGrid::from_settings(WorldSeed::new(1), WorldSettings::from_tiers(0, 1, 1));
        assert_eq!((grid.width(), grid.height()), (800, 400));
        assert_eq!(grid.count(TileType::Air), 800 * 400);
    }
}
