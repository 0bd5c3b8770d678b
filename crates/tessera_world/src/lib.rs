//! # TESSERA World Generation
//!
//! Deterministic 2D tile worlds with blob-47 autotiling.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed and settings always produce the same world
//! 2. **Single owner**: A grid belongs to one thread until it is published
//! 3. **Total**: Frame computation never fails; out-of-range access clamps
//!
//! ## Core Components
//!
//! - `NoiseGenerator`: Seeded fractal value noise plus a sequential stream
//! - `TileGrid`: Dense tile storage with per-column surface heights
//! - `frame`: Neighbour masks, override rules and grass overlay frames
//! - `WorldGenerator`: The ordered generation pipeline
//! - `GenerationWorker`: Background generation with progress reporting
//!
//! ## Example
//!
//! ```rust,no_run
//! use tessera_world::{WorldGenerator, WorldSeed, WorldSettings};
//!
//! let settings = WorldSettings::from_tiers(0, 1, 1);
//! let grid = WorldGenerator::new()
//!     .generate(WorldSeed::new(12345), settings)
//!     .expect("world generation");
//!
//! assert_eq!(grid.width(), 800);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod frame;
pub mod generator;
pub mod grid;
pub mod noise;
pub mod portal;
pub mod settings;
pub mod tile;
pub mod worker;

pub use config::GeneratorConfig;
pub use error::{WorldGenError, WorldGenResult};
pub use frame::{compute_frame, recompute_all, recompute_around};
pub use generator::{is_portal_material, GenerationObserver, GenerationPass, WorldGenerator};
pub use grid::TileGrid;
pub use noise::{NoiseGenerator, WorldSeed};
pub use portal::{Portal, PortalHandle, PortalKind, PortalRegistry};
pub use settings::{surface_level_for, MapSize, MonsterCount, MonsterDifficulty, WorldSettings};
pub use tile::{Liquid, LiquidKind, Tile, TileType, WallType};
pub use worker::{GenerationProgress, GenerationWorker};
