//! # Quad Batches
//!
//! CPU-side geometry for one material within one chunk. Vertices are
//! `#[repr(C)]` and `Pod`, so a batch can be handed to any upload path as a
//! byte slice without conversion.

use bytemuck::{Pod, Zeroable};
use tessera_world::TileType;

use crate::atlas::UvRect;

/// One corner of a tile quad.
///
/// Layout (20 bytes):
/// - `position`: world pixels, y down
/// - `uv`: atlas coordinates
/// - `color`: RGBA from the light sampler
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable, PartialEq)]
pub struct TileVertex {
    /// World position in pixels.
    pub position: [f32; 2],
    /// Texture coordinates.
    pub uv: [f32; 2],
    /// Vertex colour.
    pub color: [u8; 4],
}

/// Index pattern of one quad: top-left, top-right, bottom-left, bottom-right.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 1, 3, 2];

/// Quads of a single tile type.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBatch {
    kind: TileType,
    vertices: Vec<TileVertex>,
    indices: Vec<u32>,
}

impl MeshBatch {
    /// Creates an empty batch.
    #[must_use]
    pub const fn new(kind: TileType) -> Self {
        Self { kind, vertices: Vec::new(), indices: Vec::new() }
    }

    /// Tile type every quad in this batch draws.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> TileType {
        self.kind
    }

    /// Vertex data.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[TileVertex] {
        &self.vertices
    }

    /// Index data.
    #[inline]
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Vertex data as raw bytes.
    #[inline]
    #[must_use]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Number of quads.
    #[inline]
    #[must_use]
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Returns true if the batch holds no quads.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Drops all quads, keeping the allocations.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Appends an axis-aligned quad.
    ///
    /// # Arguments
    ///
    /// * `x`, `y` - Top-left corner in world pixels
    /// * `size` - Edge length in pixels
    /// * `uv` - Atlas rectangle
    /// * `color` - Colour applied to all four corners
    #[allow(clippy::cast_possible_truncation)]
    pub fn push_quad(&mut self, x: f32, y: f32, size: f32, uv: UvRect, color: [u8; 4]) {
        let base = self.vertices.len() as u32;
        let (x1, y1) = (x + size, y + size);

        self.vertices.extend_from_slice(&[
            TileVertex { position: [x, y], uv: [uv.u0, uv.v0], color },
            TileVertex { position: [x1, y], uv: [uv.u1, uv.v0], color },
            TileVertex { position: [x, y1], uv: [uv.u0, uv.v1], color },
            TileVertex { position: [x1, y1], uv: [uv.u1, uv.v1], color },
        ]);
        self.indices.extend(QUAD_INDICES.iter().map(|i| base + i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UV: UvRect = UvRect { u0: 0.0, v0: 0.0, u1: 0.5, v1: 0.25 };

    #[test]
    fn test_vertex_layout() {
        assert_eq!(std::mem::size_of::<TileVertex>(), 20);
    }

    #[test]
    fn test_push_quad() {
        let mut batch = MeshBatch::new(TileType::Stone);
        batch.push_quad(16.0, 32.0, 16.0, UV, [255; 4]);
        batch.push_quad(32.0, 32.0, 16.0, UV, [255; 4]);

        assert_eq!(batch.quad_count(), 2);
        assert_eq!(batch.indices(), &[0, 1, 2, 1, 3, 2, 4, 5, 6, 5, 7, 6]);
        assert_eq!(batch.vertices()[3].position, [32.0, 48.0]);
        assert_eq!(batch.vertices()[3].uv, [0.5, 0.25]);
        assert_eq!(batch.vertex_bytes().len(), 8 * 20);
    }

    #[test]
    fn test_clear() {
        let mut batch = MeshBatch::new(TileType::Dirt);
        batch.push_quad(0.0, 0.0, 16.0, UV, [255; 4]);
        batch.clear();

        assert!(batch.is_empty());
        assert!(batch.indices().is_empty());
        assert_eq!(batch.kind(), TileType::Dirt);
    }
}
