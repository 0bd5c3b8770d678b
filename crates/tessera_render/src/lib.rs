//! # TESSERA Render Cache
//!
//! Chunked tile geometry for TESSERA worlds:
//! - 16x16-tile chunks caching one quad batch per tile type
//! - Dirty tracking driven by tile edits
//! - View culling and budgeted lazy rebuilds
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     CHUNK STORE                          │
//! ├──────────────────────────────────────────────────────────┤
//! │  TileGrid + frames → Chunk::rebuild → MeshBatch per type │
//! │        ↑                                   ↓             │
//! │  on_tile_changed (dirty)         render(view) → DrawSink │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! GPU upload and lighting live outside this crate. Batches leave through
//! [`DrawSink`]; vertex colours come in through [`LightSampler`].

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod atlas;
pub mod chunk;
pub mod error;
pub mod lighting;
pub mod mesh;
pub mod rect;
pub mod sink;
pub mod stats;
pub mod store;

pub use atlas::{TileAtlas, UvRect};
pub use chunk::{Chunk, ChunkCoord, CHUNK_PIXELS, CHUNK_SIZE, TILE_SIZE};
pub use error::{RenderConfigError, RenderResult};
pub use lighting::{DepthFade, FullBright, LightSampler};
pub use mesh::{MeshBatch, TileVertex};
pub use rect::Rect;
pub use sink::{CountingSink, DrawSink, Transform2D};
pub use stats::{ChunkRenderStats, RenderStats};
pub use store::{ChunkStore, ChunkStoreConfig, MAX_DIRTY_RADIUS};
