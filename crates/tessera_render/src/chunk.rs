//! # Chunks
//!
//! A chunk is a fixed 16x16-tile window of the grid that caches one quad
//! batch per tile type. Its geometry is trusted only while it is clean.

use std::collections::BTreeMap;

use tessera_world::{TileGrid, TileType};

use crate::atlas::TileAtlas;
use crate::lighting::LightSampler;
use crate::mesh::MeshBatch;
use crate::rect::Rect;

/// Chunk edge length in tiles.
pub const CHUNK_SIZE: usize = 16;

/// Tile edge length in world pixels.
pub const TILE_SIZE: usize = 16;

/// Chunk edge length in world pixels.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const CHUNK_PIXELS: i32 = (CHUNK_SIZE * TILE_SIZE) as i32;

/// Chunk coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    /// Column of the chunk.
    pub x: i32,
    /// Row of the chunk.
    pub y: i32,
}

impl ChunkCoord {
    /// Creates a chunk coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chunk holding tile `(x, y)`.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn of_tile(x: i32, y: i32) -> Self {
        Self { x: x.div_euclid(CHUNK_SIZE as i32), y: y.div_euclid(CHUNK_SIZE as i32) }
    }

    /// World-pixel bounds of this chunk.
    #[inline]
    #[must_use]
    pub const fn bounds(self) -> Rect {
        Rect::new(self.x * CHUNK_PIXELS, self.y * CHUNK_PIXELS, CHUNK_PIXELS, CHUNK_PIXELS)
    }
}

/// Cached geometry for one 16x16 window.
#[derive(Debug)]
pub struct Chunk {
    coord: ChunkCoord,
    bounds: Rect,
    dirty: bool,
    batches: BTreeMap<TileType, MeshBatch>,
}

impl Chunk {
    /// Creates a dirty, empty chunk.
    #[must_use]
    pub const fn new(coord: ChunkCoord) -> Self {
        Self { coord, bounds: coord.bounds(), dirty: true, batches: BTreeMap::new() }
    }

    /// Chunk coordinates.
    #[inline]
    #[must_use]
    pub const fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// World-pixel bounds.
    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Returns true if the cached geometry is stale.
    #[inline]
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Marks the cached geometry stale.
    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns true if the chunk overlaps `view`. Touching edges do not count.
    #[inline]
    #[must_use]
    pub const fn is_in_view(&self, view: &Rect) -> bool {
        self.bounds.intersects(view)
    }

    /// Batches keyed by tile type, in tile type order.
    pub fn batches(&self) -> impl Iterator<Item = &MeshBatch> {
        self.batches.values()
    }

    /// Batch for one tile type, if the chunk contains any.
    #[must_use]
    pub fn batch(&self, kind: TileType) -> Option<&MeshBatch> {
        self.batches.get(&kind)
    }

    /// Total quads across all batches.
    #[must_use]
    pub fn quad_count(&self) -> usize {
        self.batches.values().map(MeshBatch::quad_count).sum()
    }

    /// Rebuilds every batch from the grid and clears the dirty flag.
    ///
    /// Each non-air tile inside the window becomes one quad whose UVs come
    /// from its stored frame. Tiles outside the grid are skipped.
    ///
    /// # Returns
    ///
    /// Number of quads emitted.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_precision_loss)]
    pub fn rebuild(&mut self, grid: &TileGrid, atlas: &TileAtlas, light: &dyn LightSampler) -> usize {
        for batch in self.batches.values_mut() {
            batch.clear();
        }

        let size = CHUNK_SIZE as i32;
        let (x0, y0) = (self.coord.x * size, self.coord.y * size);
        let x1 = (x0 + size).min(grid.width() as i32);
        let y1 = (y0 + size).min(grid.height() as i32);
        let tile_px = TILE_SIZE as f32;
        let mut quads = 0;

        for y in y0..y1 {
            for x in x0..x1 {
                let tile = grid.get(x, y);
                if tile.is_air() {
                    continue;
                }
                let kind = tile.kind();
                let batch = self.batches.entry(kind).or_insert_with(|| MeshBatch::new(kind));
                batch.push_quad(
                    x as f32 * tile_px,
                    y as f32 * tile_px,
                    tile_px,
                    atlas.uv(tile.frame()),
                    light.sample(grid, x, y),
                );
                quads += 1;
            }
        }

        self.batches.retain(|_, batch| !batch.is_empty());
        self.dirty = false;
        quads
    }
}
