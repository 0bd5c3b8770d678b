//! # World Generator
//!
//! Runs a fixed, ordered list of passes over a fresh [`TileGrid`].
//!
//! ## Pipeline
//!
//! ```text
//! Reset → Terrain → Walls → SurfaceDecor → Caves → DesertMountain
//!       → FloatingIsland → Biomes → Deposits → Portals → Liquids → Finalize
//! ```
//!
//! Every pass after `Reset` is followed by a full frame sweep; `Finalize`
//! performs its own. The first error aborts the run and the partial grid is
//! dropped.
//!
//! ## Randomness
//!
//! The run owns one [`NoiseGenerator`]. Passes that need a private stream
//! (cave entrances, each deposit family) fork it with a fixed purpose, so
//! adding draws to one pass never shifts another pass's output.

mod biomes;
mod carve;
mod caves;
mod deposits;
mod finalize;
mod liquids;
mod structures;
mod terrain;

use crate::config::GeneratorConfig;
use crate::error::{WorldGenError, WorldGenResult};
use crate::frame;
use crate::grid::TileGrid;
use crate::noise::{NoiseGenerator, WorldSeed};
use crate::settings::{surface_level_for, WorldSettings};

pub use carve::{is_portal_material, stamp_portal};

/// Smallest world the fixed pass margins fit into.
pub const MIN_WIDTH: usize = 200;
/// Smallest world the fixed pass margins fit into.
pub const MIN_HEIGHT: usize = 100;

/// Progress name reported after the last pass.
pub const COMPLETE: &str = "Complete";

/// Fork purposes for side streams.
pub(crate) mod stream {
    /// Cave entrance placement and branching.
    pub const CAVE_ENTRANCES: u64 = 1;
    /// Marble deposits.
    pub const MARBLE: u64 = 2;
    /// Stone deposits.
    pub const STONE: u64 = 3;
    /// Dirt deposits.
    pub const DIRT: u64 = 4;
}

/// One named generation pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GenerationPass {
    /// Surface rows to the settings baseline.
    Reset,
    /// Height field and band layering.
    Terrain,
    /// Background walls.
    Walls,
    /// Band surface materials.
    SurfaceDecor,
    /// Entrances, cellular carve and worm caves.
    Caves,
    /// Stepped sand mountain with the desert portal.
    DesertMountain,
    /// Floating island with the island portal.
    FloatingIsland,
    /// Surface grass relabelling.
    Biomes,
    /// Marble, stone and dirt deposits.
    Deposits,
    /// Portal bookkeeping.
    Portals,
    /// Water pools and lava.
    Liquids,
    /// Cliff etching, grass overlay and the final frame sweep.
    Finalize,
}

impl GenerationPass {
    /// All passes, in execution order.
    pub const ALL: [Self; 12] = [
        Self::Reset,
        Self::Terrain,
        Self::Walls,
        Self::SurfaceDecor,
        Self::Caves,
        Self::DesertMountain,
        Self::FloatingIsland,
        Self::Biomes,
        Self::Deposits,
        Self::Portals,
        Self::Liquids,
        Self::Finalize,
    ];

    /// Name reported to progress observers.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Reset => "Reset",
            Self::Terrain => "Terrain",
            Self::Walls => "Walls",
            Self::SurfaceDecor => "Surface Decor",
            Self::Caves => "Caves",
            Self::DesertMountain => "Desert Mountain",
            Self::FloatingIsland => "Floating Island",
            Self::Biomes => "Biomes",
            Self::Deposits => "Deposits",
            Self::Portals => "Portals",
            Self::Liquids => "Liquids",
            Self::Finalize => "Finalize",
        }
    }

    /// Whether the generator sweeps frames after this pass.
    #[must_use]
    pub const fn sweeps_frames(self) -> bool {
        !matches!(self, Self::Reset | Self::Finalize)
    }

    fn run(self, ctx: &mut PassContext<'_>) -> WorldGenResult<()> {
        match self {
            Self::Reset => {
                reset(ctx);
                Ok(())
            }
            Self::Terrain => terrain::run(ctx),
            Self::Walls => terrain::walls(ctx),
            Self::SurfaceDecor => terrain::surface_decor(ctx),
            Self::Caves => caves::run(ctx),
            Self::DesertMountain => structures::desert_mountain(ctx),
            Self::FloatingIsland => structures::floating_island(ctx),
            Self::Biomes => biomes::run(ctx),
            Self::Deposits => deposits::run(ctx),
            Self::Portals => structures::audit_portals(ctx),
            Self::Liquids => liquids::run(ctx),
            Self::Finalize => finalize::run(ctx),
        }
    }
}

/// Receives generation progress.
///
/// Both methods default to doing nothing.
pub trait GenerationObserver {
    /// Called before each pass with `index / pass_count`, then once with
    /// [`COMPLETE`] and `1.0`.
    fn on_progress(&mut self, _pass: &str, _fraction: f32) {}

    /// Called once with the finished grid.
    fn on_complete(&mut self, _grid: &TileGrid) {}
}

impl GenerationObserver for () {}

/// State shared by every pass of one run.
pub(crate) struct PassContext<'a> {
    pub grid: &'a mut TileGrid,
    pub noise: &'a mut NoiseGenerator,
    pub config: &'a GeneratorConfig,
}

impl PassContext<'_> {
    /// Grid width as a signed coordinate.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn width(&self) -> i32 {
        self.grid.width() as i32
    }

    /// Grid height as a signed coordinate.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn height(&self) -> i32 {
        self.grid.height() as i32
    }
}

/// Builds worlds from a seed.
#[derive(Clone, Debug, Default)]
pub struct WorldGenerator {
    config: GeneratorConfig,
}

impl WorldGenerator {
    /// Creates a generator with the stock configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration does not validate.
    pub fn with_config(config: GeneratorConfig) -> WorldGenResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates a world sized by `settings`.
    ///
    /// Blocking. Intended to run on a background worker.
    ///
    /// # Errors
    ///
    /// Returns the first pass failure; no partial world is returned.
    pub fn generate(&self, seed: WorldSeed, settings: WorldSettings) -> WorldGenResult<TileGrid> {
        self.generate_with(seed, settings, &mut ())
    }

    /// Generates a world sized by `settings`, reporting progress.
    ///
    /// # Errors
    ///
    /// Returns the first pass failure; no partial world is returned.
    pub fn generate_with(
        &self,
        seed: WorldSeed,
        settings: WorldSettings,
        observer: &mut dyn GenerationObserver,
    ) -> WorldGenResult<TileGrid> {
        self.generate_grid(TileGrid::from_settings(seed, settings), observer)
    }

    /// Runs the pipeline over a caller-sized blank grid.
    ///
    /// The grid's own seed drives the run.
    ///
    /// # Errors
    ///
    /// Returns `GridTooSmall` below [`MIN_WIDTH`] x [`MIN_HEIGHT`] or when the
    /// configured surface margins leave no valid surface row, otherwise the
    /// first pass failure.
    #[allow(clippy::cast_precision_loss)]
    pub fn generate_grid(
        &self,
        mut grid: TileGrid,
        observer: &mut dyn GenerationObserver,
    ) -> WorldGenResult<TileGrid> {
        let terrain = &self.config.terrain;
        let rows = i32::try_from(grid.height()).unwrap_or(i32::MAX);
        if grid.width() < MIN_WIDTH
            || grid.height() < MIN_HEIGHT
            || terrain.min_surface > rows - terrain.bottom_margin
        {
            return Err(WorldGenError::GridTooSmall {
                width: grid.width(),
                height: grid.height(),
            });
        }

        let mut noise = NoiseGenerator::new(grid.seed());
        tracing::info!(
            seed = grid.seed().value(),
            width = grid.width(),
            height = grid.height(),
            "generating world"
        );

        let total = GenerationPass::ALL.len();
        for (index, pass) in GenerationPass::ALL.into_iter().enumerate() {
            observer.on_progress(pass.name(), index as f32 / total as f32);
            tracing::info!(pass = pass.name(), "running generation pass");

            let mut ctx = PassContext { grid: &mut grid, noise: &mut noise, config: &self.config };
            pass.run(&mut ctx).map_err(|e| {
                tracing::warn!(pass = pass.name(), error = %e, "generation aborted");
                e
            })?;

            if pass.sweeps_frames() {
                let changed = frame::recompute_all(&mut grid);
                tracing::debug!(pass = pass.name(), changed, "frames recomputed");
            }
        }

        observer.on_progress(COMPLETE, 1.0);
        observer.on_complete(&grid);
        tracing::info!(portals = grid.portals().len(), "world generation complete");
        Ok(grid)
    }
}

/// Every column starts at the settings baseline.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn reset(ctx: &mut PassContext<'_>) {
    let baseline = surface_level_for(ctx.grid.height()) as i32;
    for x in 0..ctx.width() {
        ctx.grid.set_surface_height(x, baseline);
    }
}

/// Builds a `PassFailed` error.
pub(crate) fn pass_failed(pass: GenerationPass, reason: impl Into<String>) -> WorldGenError {
    WorldGenError::PassFailed { pass: pass.name(), reason: reason.into() }
}
