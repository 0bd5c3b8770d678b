//! Rendering statistics.

/// Counters from one [`crate::ChunkStore::render`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Batches submitted to the sink.
    pub draw_calls: u32,
    /// Quads submitted.
    pub quads: u32,
    /// Chunks intersecting the view.
    pub chunks_visible: u32,
    /// Visible chunks rebuilt this call.
    pub chunks_rebuilt: u32,
    /// Visible chunks left dirty because the rebuild budget ran out.
    pub chunks_deferred: u32,
}

impl RenderStats {
    /// Returns true if every visible chunk was drawn from fresh geometry.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.chunks_deferred == 0
    }
}

/// Chunk counts for a view, without rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkRenderStats {
    /// Chunks intersecting the view.
    pub visible: usize,
    /// Chunks in the store.
    pub total: usize,
    /// Chunk edge length in tiles.
    pub chunk_size: usize,
}

impl ChunkRenderStats {
    /// Share of chunks culled, in `[0, 1]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn culled_fraction(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            1.0 - self.visible as f32 / self.total as f32
        }
    }
}
