//! # Chunk Store
//!
//! Partitions a grid into chunks and keeps their geometry in step with
//! edits.
//!
//! ```text
//! edit (x, y) ──> on_tile_changed ──> owning chunk + radius marked dirty
//!                                               │
//! render(view) ──> cull by bounds ──> rebuild dirty (budgeted) ──> DrawSink
//! ```
//!
//! Each chunk sits behind its own lock, so the store can be shared by
//! reference between the edit path and the render path.

use std::ops::Range;
use std::path::Path;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tessera_world::TileGrid;

use crate::atlas::TileAtlas;
use crate::chunk::{Chunk, ChunkCoord, CHUNK_PIXELS, CHUNK_SIZE};
use crate::error::{RenderConfigError, RenderResult};
use crate::lighting::LightSampler;
use crate::rect::Rect;
use crate::sink::{DrawSink, Transform2D};
use crate::stats::{ChunkRenderStats, RenderStats};

/// Largest accepted `dirty_radius`.
pub const MAX_DIRTY_RADIUS: u32 = 8;

/// Store tuning, loadable from TOML.
///
/// ```toml
/// dirty_radius = 1
/// rebuilds_per_frame = 4
///
/// [atlas]
/// inset_px = 1.0
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkStoreConfig {
    /// Chunks around an edited chunk that are also invalidated.
    pub dirty_radius: u32,
    /// Visible dirty chunks rebuilt per render call. `None` rebuilds all.
    pub rebuilds_per_frame: Option<u32>,
    /// Frame sheet layout.
    pub atlas: TileAtlas,
}

impl Default for ChunkStoreConfig {
    fn default() -> Self {
        Self { dirty_radius: 1, rebuilds_per_frame: Some(1), atlas: TileAtlas::default() }
    }
}

impl ChunkStoreConfig {
    /// Parses a TOML document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `Load` if the document does not parse, or the validation
    /// error if a value is out of range.
    pub fn from_toml_str(source: &str) -> RenderResult<Self> {
        let config: Self = toml::from_str(source)
            .map_err(|e| RenderConfigError::Load(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `Load` if the file cannot be read, or any parse or
    /// validation error.
    pub fn load(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| RenderConfigError::Load(format!("Failed to read {}: {e}", path.display())))?;
        Self::from_toml_str(&source)
    }

    /// Checks the settings.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStore` for a zero rebuild budget or a dirty radius
    /// above [`MAX_DIRTY_RADIUS`], or the atlas error.
    pub fn validate(&self) -> RenderResult<()> {
        if self.rebuilds_per_frame == Some(0) {
            return Err(RenderConfigError::InvalidStore(
                "rebuilds_per_frame must be at least 1".into(),
            ));
        }
        if self.dirty_radius > MAX_DIRTY_RADIUS {
            return Err(RenderConfigError::InvalidStore(format!(
                "dirty_radius {} exceeds {MAX_DIRTY_RADIUS}",
                self.dirty_radius
            )));
        }
        self.atlas.validate()
    }
}

/// All chunks of one grid.
#[derive(Debug)]
pub struct ChunkStore {
    chunks: Vec<Mutex<Chunk>>,
    columns: usize,
    rows: usize,
    grid_width: usize,
    grid_height: usize,
    config: ChunkStoreConfig,
}

impl ChunkStore {
    /// Creates dirty chunks covering `grid` with the default config.
    #[must_use]
    pub fn new(grid: &TileGrid) -> Self {
        Self::build(grid, ChunkStoreConfig::default())
    }

    /// Creates a store with custom tuning.
    ///
    /// # Errors
    ///
    /// Returns the config's validation error.
    pub fn with_config(grid: &TileGrid, config: ChunkStoreConfig) -> RenderResult<Self> {
        config.validate()?;
        Ok(Self::build(grid, config))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn build(grid: &TileGrid, config: ChunkStoreConfig) -> Self {
        let columns = grid.width().div_ceil(CHUNK_SIZE);
        let rows = grid.height().div_ceil(CHUNK_SIZE);

        let chunks = (0..rows)
            .flat_map(|cy| (0..columns).map(move |cx| (cx, cy)))
            .map(|(cx, cy)| Mutex::new(Chunk::new(ChunkCoord::new(cx as i32, cy as i32))))
            .collect();

        tracing::debug!(columns, rows, "chunk store created");
        Self {
            chunks,
            columns,
            rows,
            grid_width: grid.width(),
            grid_height: grid.height(),
            config,
        }
    }

    /// Active tuning.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &ChunkStoreConfig {
        &self.config
    }

    /// Chunk columns and rows.
    #[inline]
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    /// Number of chunks.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Returns true if the grid was empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    #[allow(clippy::cast_sign_loss)]
    fn slot(&self, coord: ChunkCoord) -> Option<&Mutex<Chunk>> {
        if coord.x < 0 || coord.y < 0 {
            return None;
        }
        let (cx, cy) = (coord.x as usize, coord.y as usize);
        if cx >= self.columns || cy >= self.rows {
            return None;
        }
        self.chunks.get(cy * self.columns + cx)
    }

    /// Returns whether the chunk at `coord` is dirty, or `None` outside the
    /// store.
    #[must_use]
    pub fn is_dirty(&self, coord: ChunkCoord) -> Option<bool> {
        self.slot(coord).map(|chunk| chunk.lock().is_dirty())
    }

    /// Runs `f` against the chunk at `coord`.
    pub fn with_chunk<R>(&self, coord: ChunkCoord, f: impl FnOnce(&Chunk) -> R) -> Option<R> {
        self.slot(coord).map(|chunk| f(&chunk.lock()))
    }

    /// Number of dirty chunks.
    #[must_use]
    pub fn dirty_count(&self) -> usize {
        self.chunks.iter().filter(|chunk| chunk.lock().is_dirty()).count()
    }

    /// Invalidates the chunk owning tile `(x, y)` and its neighbours within
    /// the configured radius. Coordinates outside the grid are ignored.
    ///
    /// # Returns
    ///
    /// Number of chunks marked.
    #[allow(clippy::cast_possible_wrap)]
    pub fn on_tile_changed(&self, x: i32, y: i32) -> usize {
        if x < 0 || y < 0 || x >= self.grid_width as i32 || y >= self.grid_height as i32 {
            tracing::trace!(x, y, "ignoring change outside the grid");
            return 0;
        }
        self.mark_dirty(ChunkCoord::of_tile(x, y), self.config.dirty_radius)
    }

    /// Invalidates every chunk within `radius` of `center`, clipped to the
    /// store. The scan never leaves the store, whatever the radius.
    pub fn mark_dirty(&self, center: ChunkCoord, radius: u32) -> usize {
        let columns = clip_span(center.x, radius, self.columns);
        let rows = clip_span(center.y, radius, self.rows);

        let mut marked = 0;
        for cy in rows {
            for cx in columns.clone() {
                if let Some(chunk) = self.chunks.get(cy * self.columns + cx) {
                    chunk.lock().mark_dirty();
                    marked += 1;
                }
            }
        }
        marked
    }

    /// Invalidates every chunk.
    pub fn mark_all_dirty(&self) {
        for chunk in &self.chunks {
            chunk.lock().mark_dirty();
        }
    }

    /// Rebuilds every dirty chunk regardless of visibility.
    ///
    /// # Returns
    ///
    /// Number of chunks rebuilt.
    pub fn rebuild_all(&self, grid: &TileGrid, light: &dyn LightSampler) -> usize {
        let mut rebuilt = 0;
        for chunk in &self.chunks {
            let mut chunk = chunk.lock();
            if chunk.is_dirty() {
                chunk.rebuild(grid, &self.config.atlas, light);
                rebuilt += 1;
            }
        }
        tracing::debug!(rebuilt, "rebuilt all dirty chunks");
        rebuilt
    }

    /// Chunk index ranges that can intersect `view`.
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn visible_range(&self, view: &Rect) -> Option<(Range<usize>, Range<usize>)> {
        if view.width <= 0 || view.height <= 0 {
            return None;
        }
        let clamp = |v: i32, max: usize| v.clamp(0, max as i32) as usize;

        let x0 = clamp(view.x.div_euclid(CHUNK_PIXELS), self.columns);
        let x1 = clamp((view.right() - 1).div_euclid(CHUNK_PIXELS) + 1, self.columns);
        let y0 = clamp(view.y.div_euclid(CHUNK_PIXELS), self.rows);
        let y1 = clamp((view.bottom() - 1).div_euclid(CHUNK_PIXELS) + 1, self.rows);

        (x0 < x1 && y0 < y1).then_some((x0..x1, y0..y1))
    }

    /// Visits every chunk whose bounds intersect `view`.
    fn for_each_visible(&self, view: &Rect, mut f: impl FnMut(&mut Chunk)) {
        let Some((xs, ys)) = self.visible_range(view) else {
            return;
        };
        for cy in ys {
            for cx in xs.clone() {
                let mut chunk = self.chunks[cy * self.columns + cx].lock();
                if chunk.is_in_view(view) {
                    f(&mut chunk);
                }
            }
        }
    }

    /// Draws every visible chunk.
    ///
    /// Dirty visible chunks are rebuilt first, up to the per-frame budget.
    /// A dirty chunk past the budget is skipped this call, never drawn
    /// stale. Clean chunks submit one draw per tile-type batch.
    ///
    /// # Arguments
    ///
    /// * `grid` - Current world state
    /// * `view` - Visible region in world pixels
    /// * `transform` - Passed through to the sink
    /// * `light` - Vertex colour source for rebuilds
    /// * `sink` - Receives the batches
    #[allow(clippy::cast_possible_truncation)]
    pub fn render(
        &self,
        grid: &TileGrid,
        view: &Rect,
        transform: &Transform2D,
        light: &dyn LightSampler,
        sink: &mut dyn DrawSink,
    ) -> RenderStats {
        let mut stats = RenderStats::default();
        let mut budget = self.config.rebuilds_per_frame;
        let atlas = &self.config.atlas;

        self.for_each_visible(view, |chunk| {
            stats.chunks_visible += 1;

            if chunk.is_dirty() {
                if budget == Some(0) {
                    stats.chunks_deferred += 1;
                    return;
                }
                chunk.rebuild(grid, atlas, light);
                stats.chunks_rebuilt += 1;
                budget = budget.map(|b| b - 1);
            }

            for batch in chunk.batches() {
                sink.draw_batch(batch, transform);
                stats.draw_calls += 1;
                stats.quads += batch.quad_count() as u32;
            }
        });

        if stats.chunks_deferred > 0 {
            tracing::trace!(deferred = stats.chunks_deferred, "rebuild budget exhausted");
        }
        stats
    }

    /// Counts visible chunks without rendering.
    #[must_use]
    pub fn get_render_stats(&self, view: &Rect) -> ChunkRenderStats {
        let mut visible = 0;
        self.for_each_visible(view, |_| visible += 1);
        ChunkRenderStats { visible, total: self.chunks.len(), chunk_size: CHUNK_SIZE }
    }
}

/// Indices within `radius` of `center`, clipped to `0..len`.
fn clip_span(center: i32, radius: u32, len: usize) -> Range<usize> {
    let (center, radius) = (i64::from(center), i64::from(radius));
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    let start = (center - radius).clamp(0, len);
    let end = (center + radius + 1).clamp(start, len);
    // Both ends lie in `0..=len`, which came from a `usize`.
    usize::try_from(start).unwrap_or(0)..usize::try_from(end).unwrap_or(0)
}
