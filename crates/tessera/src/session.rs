//! # World Session
//!
//! Owns a published world together with its chunk cache and keeps the two
//! consistent across edits.
//!
//! Every edit follows the same path:
//!
//! 1. Write the tile
//! 2. Recompute frames around it
//! 3. Invalidate the owning chunk and its neighbours
//! 4. Notify subscribers
//!
//! Edits run on the owning thread. Rendering may borrow the session at the
//! same time through `&self`.

use tessera_render::{
    ChunkRenderStats, ChunkStore, ChunkStoreConfig, DrawSink, LightSampler, Rect, RenderResult,
    RenderStats, Transform2D,
};
use tessera_world::{is_portal_material, recompute_around, Tile, TileGrid, TileType};

use crate::error::{EditError, EditResult};
use crate::events::{EventBus, EventReceiver, EventSender, TileEvent};

/// A live world.
pub struct WorldSession {
    grid: TileGrid,
    chunks: ChunkStore,
    subscribers: Vec<EventSender>,
}

impl WorldSession {
    /// Takes ownership of a finished grid.
    #[must_use]
    pub fn new(grid: TileGrid) -> Self {
        let chunks = ChunkStore::new(&grid);
        Self { grid, chunks, subscribers: Vec::new() }
    }

    /// Takes ownership of a finished grid with custom cache tuning.
    ///
    /// # Errors
    ///
    /// Returns the config's validation error.
    pub fn with_store_config(grid: TileGrid, config: ChunkStoreConfig) -> RenderResult<Self> {
        let chunks = ChunkStore::with_config(&grid, config)?;
        Ok(Self { grid, chunks, subscribers: Vec::new() })
    }

    /// The world.
    #[inline]
    #[must_use]
    pub const fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// The chunk cache.
    #[inline]
    #[must_use]
    pub const fn chunks(&self) -> &ChunkStore {
        &self.chunks
    }

    /// Gives the grid back, dropping the cache.
    #[must_use]
    pub fn into_grid(self) -> TileGrid {
        self.grid
    }

    /// Opens a new event stream.
    #[must_use]
    pub fn subscribe(&mut self, capacity: usize) -> EventReceiver {
        let bus = EventBus::new(capacity);
        self.subscribers.push(bus.sender());
        bus.receiver()
    }

    /// Number of live event streams.
    #[inline]
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Sends `event` to every subscriber, forgetting those whose receiver
    /// is gone.
    fn publish(&mut self, event: TileEvent) {
        let before = self.subscribers.len();
        self.subscribers.retain(|subscriber| !subscriber.send(event).is_disconnected());
        let pruned = before - self.subscribers.len();
        if pruned > 0 {
            tracing::debug!(pruned, "dropped disconnected subscribers");
        }
    }

    fn check_bounds(&self, x: i32, y: i32) -> EditResult<()> {
        if self.grid.in_bounds(x, y) {
            Ok(())
        } else {
            Err(EditError::OutOfBounds { x, y })
        }
    }

    /// Writes `tile` and propagates the change.
    fn apply(&mut self, x: i32, y: i32, tile: Tile) -> usize {
        self.grid.set(x, y, tile);
        let reframed = recompute_around(&mut self.grid, x, y);
        let count = self.chunks.on_tile_changed(x, y);

        tracing::trace!(x, y, reframed, count, "tile edited");
        self.publish(TileEvent::ChunksInvalidated { x, y, count });
        count
    }

    /// Overwrites a tile unconditionally, keeping its wall.
    ///
    /// # Returns
    ///
    /// The previous tile.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` outside the world.
    pub fn set_tile(&mut self, x: i32, y: i32, kind: TileType) -> EditResult<Tile> {
        self.check_bounds(x, y)?;
        let previous = self.grid.get(x, y);
        if previous.kind() == kind {
            return Ok(previous);
        }

        self.apply(x, y, Tile::new(kind).with_wall(previous.wall()));
        self.publish(TileEvent::TileSet { x, y, from: previous.kind(), to: kind });
        Ok(previous)
    }

    /// Mines out a tile, leaving air behind its wall.
    ///
    /// # Returns
    ///
    /// The material removed.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds`, `NothingToMine` for air, or `Unbreakable` for
    /// portal material.
    pub fn mine(&mut self, x: i32, y: i32) -> EditResult<TileType> {
        self.check_bounds(x, y)?;
        let tile = self.grid.get(x, y);
        let kind = tile.kind();

        if tile.is_air() {
            return Err(EditError::NothingToMine { x, y });
        }
        if is_portal_material(kind) {
            return Err(EditError::Unbreakable { x, y, kind });
        }

        self.apply(x, y, Tile::AIR.with_wall(tile.wall()));
        self.publish(TileEvent::TileMined { x, y, kind });
        Ok(kind)
    }

    /// Places a material into an empty or liquid tile.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds`, `NotPlaceable` for air or portal material, or
    /// `Occupied` if a solid tile is already there.
    pub fn place(&mut self, x: i32, y: i32, kind: TileType) -> EditResult<()> {
        self.check_bounds(x, y)?;
        if kind.is_air() || is_portal_material(kind) {
            return Err(EditError::NotPlaceable(kind));
        }

        let tile = self.grid.get(x, y);
        if !(tile.is_air() || tile.kind().is_liquid()) {
            return Err(EditError::Occupied { x, y, occupant: tile.kind() });
        }

        self.apply(x, y, Tile::new(kind).with_wall(tile.wall()));
        self.publish(TileEvent::TilePlaced { x, y, kind });
        Ok(())
    }

    /// Rebuilds every dirty chunk.
    pub fn rebuild_all(&self, light: &dyn LightSampler) -> usize {
        self.chunks.rebuild_all(&self.grid, light)
    }

    /// Draws the chunks intersecting `view`.
    pub fn render(
        &self,
        view: &Rect,
        transform: &Transform2D,
        light: &dyn LightSampler,
        sink: &mut dyn DrawSink,
    ) -> RenderStats {
        self.chunks.render(&self.grid, view, transform, light, sink)
    }

    /// Chunk counts for `view`.
    #[must_use]
    pub fn render_stats(&self, view: &Rect) -> ChunkRenderStats {
        self.chunks.get_render_stats(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_render::{ChunkCoord, FullBright};
    use tessera_world::{WorldSeed, WorldSettings};

    fn flat_session() -> WorldSession {
        let mut grid = TileGrid::new(64, 64, WorldSeed::new(1), WorldSettings::default());
        for x in 0..64 {
            grid.set_surface_height(x, 32);
            for y in 32..64 {
                grid.set(x, y, Tile::new(TileType::Dirt));
            }
        }
        tessera_world::recompute_all(&mut grid);
        let session = WorldSession::new(grid);
        session.rebuild_all(&FullBright);
        session
    }

    #[test]
    fn test_mine_clears_and_invalidates() {
        let mut session = flat_session();
        let events = session.subscribe(16);

        assert_eq!(session.mine(20, 40), Ok(TileType::Dirt));
        assert!(session.grid().get(20, 40).is_air());
        assert_eq!(session.chunks().is_dirty(ChunkCoord::new(1, 2)), Some(true));
        assert_eq!(session.chunks().dirty_count(), 9);

        let drained = events.drain();
        assert_eq!(
            drained,
            vec![
                TileEvent::ChunksInvalidated { x: 20, y: 40, count: 9 },
                TileEvent::TileMined { x: 20, y: 40, kind: TileType::Dirt },
            ]
        );
    }

    #[test]
    fn test_mine_refusals() {
        let mut session = flat_session();

        assert_eq!(session.mine(5, 5), Err(EditError::NothingToMine { x: 5, y: 5 }));
        assert_eq!(session.mine(-1, 40), Err(EditError::OutOfBounds { x: -1, y: 40 }));

        session.set_tile(10, 40, TileType::Obsidian).expect("set");
        assert!(matches!(session.mine(10, 40), Err(EditError::Unbreakable { .. })));
    }

    #[test]
    fn test_place_rules() {
        let mut session = flat_session();

        assert_eq!(session.place(5, 10, TileType::Stone), Ok(()));
        assert_eq!(session.grid().kind(5, 10), TileType::Stone);
        assert_eq!(
            session.place(5, 40, TileType::Stone),
            Err(EditError::Occupied { x: 5, y: 40, occupant: TileType::Dirt })
        );
        assert_eq!(session.place(6, 10, TileType::Air), Err(EditError::NotPlaceable(TileType::Air)));
        assert_eq!(
            session.place(6, 10, TileType::PortalCore),
            Err(EditError::NotPlaceable(TileType::PortalCore))
        );
    }

    #[test]
    fn test_mining_reframes_neighbours() {
        let mut session = flat_session();
        let before = session.grid().get(20, 41).frame();
        session.mine(20, 40).expect("mine");

        assert_ne!(session.grid().get(20, 41).frame(), before, "tile below is now exposed");
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let mut session = flat_session();
        let kept = session.subscribe(16);
        drop(session.subscribe(16));
        drop(session.subscribe(1));
        assert_eq!(session.subscriber_count(), 3);

        session.mine(20, 40).expect("mine");
        assert_eq!(session.subscriber_count(), 1);
        assert_eq!(kept.drain().len(), 2);

        drop(kept);
        session.place(20, 40, TileType::Stone).expect("place");
        assert_eq!(session.subscriber_count(), 0);
    }

    #[test]
    fn test_full_subscriber_is_kept() {
        let mut session = flat_session();
        let slow = session.subscribe(1);

        session.mine(20, 40).expect("mine");
        session.mine(21, 40).expect("mine");
        assert_eq!(session.subscriber_count(), 1, "a full channel is not a disconnect");
        assert_eq!(slow.drain().len(), 1);
    }

    #[test]
    fn test_same_kind_set_is_noop() {
        let mut session = flat_session();
        session.set_tile(20, 40, TileType::Dirt).expect("set");
        assert_eq!(session.chunks().dirty_count(), 0);
    }
}
