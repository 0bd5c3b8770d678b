//! # Generator Configuration
//!
//! Every tunable of the generation pipeline, loadable from TOML.
//!
//! Defaults reproduce the stock world. A config file only needs the keys it
//! overrides:
//!
//! ```toml
//! [terrain]
//! height_variation = 40.0
//!
//! [caves]
//! tiles_per_entrance = 80
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{WorldGenError, WorldGenResult};

/// Height field and layering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Amplitude of the surface noise, in tiles.
    pub height_variation: f64,
    /// Frequency of the surface noise.
    pub height_frequency: f64,
    /// Rounds of 3-tap smoothing.
    pub smooth_rounds: u32,
    /// Highest allowed surface row.
    pub min_surface: i32,
    /// Lowest allowed surface row, measured from the bottom.
    pub bottom_margin: i32,
    /// Depth ratio where band materials give way to stone.
    pub band_depth: f64,
    /// Lateral band edges: dirt below the first, sand below the second.
    pub band_edges: [f64; 2],
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            height_variation: 30.0,
            height_frequency: 0.008,
            smooth_rounds: 3,
            min_surface: 5,
            bottom_margin: 20,
            band_depth: 0.75,
            band_edges: [0.33, 0.67],
        }
    }
}

/// Cave carving.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaveConfig {
    /// One entrance system per this many columns.
    pub tiles_per_entrance: usize,
    /// Depth of an entrance shaft.
    pub shaft_depth: i32,
    /// Branches per entrance, half-open range.
    pub branches: [i32; 2],
    /// Base threshold of the cellular carve.
    pub carve_threshold: f64,
    /// Extra threshold at full depth.
    pub carve_depth_bonus: f64,
    /// One large worm cave per this many columns.
    pub tiles_per_worm_cave: usize,
    /// Worm step length.
    pub worm_step: f64,
    /// Maximum heading change per step, in radians.
    pub worm_turn: f64,
    /// Worm disc radius, half-open range.
    pub worm_radius: [i32; 2],
    /// Worms stop this close to the border.
    pub border_margin: i32,
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self {
            tiles_per_entrance: 100,
            shaft_depth: 10,
            branches: [2, 5],
            carve_threshold: 0.4,
            carve_depth_bonus: 0.1,
            tiles_per_worm_cave: 200,
            worm_step: 2.0,
            worm_turn: 0.3,
            worm_radius: [3, 8],
            border_margin: 10,
        }
    }
}

/// Desert mountain and floating island.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureConfig {
    /// Width of the mountain's bottom layer.
    pub mountain_base_width: i32,
    /// The mountain stops once a layer would be this narrow.
    pub mountain_min_width: i32,
    /// Width of the island's top layer.
    pub island_width: i32,
    /// Layers kept at full width before tapering.
    pub island_slab_layers: i32,
    /// Chance of dropping a non-top edge tile.
    pub island_erosion: f64,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            mountain_base_width: 81,
            mountain_min_width: 5,
            island_width: 41,
            island_slab_layers: 3,
            island_erosion: 0.3,
        }
    }
}

/// Surface biome relabelling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomeConfig {
    /// Lateral edge between the snow and grass biomes.
    pub snow_edge: f64,
    /// Lateral edge between the grass and jungle biomes.
    pub jungle_edge: f64,
    /// Amplitude of the boundary noise.
    pub boundary_noise: f64,
    /// Frequency of the boundary noise.
    pub boundary_frequency: f64,
}

impl Default for BiomeConfig {
    fn default() -> Self {
        Self {
            snow_edge: 0.11,
            jungle_edge: 0.22,
            boundary_noise: 0.04,
            boundary_frequency: 0.004,
        }
    }
}

/// One deposit family.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DepositSpec {
    /// One deposit per this many columns.
    pub tiles_per_deposit: usize,
    /// Radius, half-open range.
    pub radius: [i32; 2],
    /// Minimum depth of a centre below the surface.
    pub min_depth: i32,
    /// Centres stay this far above the bottom.
    pub bottom_margin: i32,
    /// Centres stay this far from the sides.
    pub side_margin: i32,
    /// Edge noise frequency.
    pub noise_frequency: f64,
    /// Edge noise octaves.
    pub noise_octaves: u32,
    /// Edge noise persistence.
    pub noise_persistence: f64,
    /// Edge noise threshold.
    pub threshold: f64,
}

/// Deposit families, in placement order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepositConfig {
    /// Marble ellipses inside stone.
    pub marble: DepositSpec,
    /// Inside this normalised distance marble is always placed.
    pub marble_core: f64,
    /// Stone blobs inside band materials.
    pub stone: DepositSpec,
    /// Dirt blobs inside stone and band materials.
    pub dirt: DepositSpec,
}

impl Default for DepositConfig {
    fn default() -> Self {
        Self {
            marble: DepositSpec {
                tiles_per_deposit: 150,
                radius: [15, 35],
                min_depth: 20,
                bottom_margin: 30,
                side_margin: 50,
                noise_frequency: 0.1,
                noise_octaves: 1,
                noise_persistence: 1.0,
                threshold: 0.3,
            },
            marble_core: 0.8,
            stone: DepositSpec {
                tiles_per_deposit: 8,
                radius: [4, 16],
                min_depth: 10,
                bottom_margin: 20,
                side_margin: 20,
                noise_frequency: 0.1,
                noise_octaves: 2,
                noise_persistence: 0.5,
                threshold: 0.08,
            },
            dirt: DepositSpec {
                tiles_per_deposit: 8,
                radius: [4, 16],
                min_depth: 5,
                bottom_margin: 20,
                side_margin: 20,
                noise_frequency: 0.08,
                noise_octaves: 2,
                noise_persistence: 0.5,
                threshold: 0.15,
            },
        }
    }
}

/// Water pools and the lava layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiquidConfig {
    /// A column must sit this much lower than both neighbours to pool water.
    pub depression_margin: i32,
    /// Rows of water in a pool.
    pub pool_depth: i32,
    /// Rows at the bottom where air becomes lava.
    pub lava_rows: i32,
}

impl Default for LiquidConfig {
    fn default() -> Self {
        Self { depression_margin: 3, pool_depth: 5, lava_rows: 50 }
    }
}

/// Cliff etching and grass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinalizeConfig {
    /// Height step between neighbouring columns that counts as a cliff.
    pub cliff_threshold: i32,
    /// Steps of an etching worm.
    pub etch_length: i32,
    /// Etching disc radius, half-open range.
    pub etch_radius: [i32; 2],
    /// Underground grass pockets start this far below the surface.
    pub pocket_min_depth: i32,
    /// Frequency of the pocket noise.
    pub pocket_frequency: f64,
    /// Pocket noise threshold.
    pub pocket_threshold: f64,
}

impl Default for FinalizeConfig {
    fn default() -> Self {
        Self {
            cliff_threshold: 4,
            etch_length: 6,
            etch_radius: [1, 3],
            pocket_min_depth: 15,
            pocket_frequency: 0.05,
            pocket_threshold: 0.55,
        }
    }
}

/// Complete generator configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Height field and layering.
    pub terrain: TerrainConfig,
    /// Cave carving.
    pub caves: CaveConfig,
    /// Desert mountain and floating island.
    pub structures: StructureConfig,
    /// Surface biome relabelling.
    pub biomes: BiomeConfig,
    /// Deposit families.
    pub deposits: DepositConfig,
    /// Water pools and the lava layer.
    pub liquids: LiquidConfig,
    /// Cliff etching and grass.
    pub finalize: FinalizeConfig,
}

impl GeneratorConfig {
    /// Parses a TOML document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the document does not parse or a value is
    /// out of range.
    pub fn from_toml_str(source: &str) -> WorldGenResult<Self> {
        let config: Self = toml::from_str(source)
            .map_err(|e| WorldGenError::InvalidConfig(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the file cannot be read or is invalid.
    pub fn load(path: impl AsRef<Path>) -> WorldGenResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            WorldGenError::InvalidConfig(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&source)
    }

    /// Checks every value for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first offending key.
    pub fn validate(&self) -> WorldGenResult<()> {
        let fail = |key: &str, why: &str| Err(WorldGenError::InvalidConfig(format!("{key}: {why}")));

        let t = &self.terrain;
        if t.min_surface < 1 || t.bottom_margin < 1 {
            return fail("terrain", "surface margins must be positive");
        }
        if t.band_edges[0] >= t.band_edges[1] {
            return fail("terrain.band_edges", "edges must be increasing");
        }

        let c = &self.caves;
        if c.tiles_per_entrance == 0 || c.tiles_per_worm_cave == 0 {
            return fail("caves", "spacing must be non-zero");
        }
        if c.branches[0] > c.branches[1] || c.worm_radius[0] > c.worm_radius[1] {
            return fail("caves", "ranges must be ordered");
        }
        if c.worm_step <= 0.0 {
            return fail("caves.worm_step", "must be positive");
        }

        let s = &self.structures;
        if s.mountain_min_width < 1 || s.mountain_base_width <= s.mountain_min_width {
            return fail("structures.mountain", "base must be wider than the minimum width");
        }
        if s.island_width < 8 || !(0.0..1.0).contains(&s.island_erosion) {
            return fail("structures.island", "width must be at least 8 and erosion in [0, 1)");
        }

        if self.biomes.snow_edge > self.biomes.jungle_edge {
            return fail("biomes", "snow edge must precede jungle edge");
        }

        let d = &self.deposits;
        for (key, spec) in [("marble", &d.marble), ("stone", &d.stone), ("dirt", &d.dirt)] {
            if spec.tiles_per_deposit == 0 || spec.radius[0] < 1 || spec.radius[0] > spec.radius[1] {
                return fail(key, "deposit spacing and radius must be positive and ordered");
            }
        }

        let l = &self.liquids;
        if l.pool_depth < 0 || l.lava_rows < 0 {
            return fail("liquids", "depths must not be negative");
        }

        let f = &self.finalize;
        if f.etch_radius[0] < 0 || f.etch_radius[0] > f.etch_radius[1] {
            return fail("finalize.etch_radius", "range must be ordered");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GeneratorConfig::from_toml_str(
            "[terrain]\nheight_variation = 12.5\n\n[liquids]\nlava_rows = 10\n",
        )
        .expect("valid config");

        assert_eq!(config.terrain.height_variation, 12.5);
        assert_eq!(config.terrain.smooth_rounds, 3);
        assert_eq!(config.liquids.lava_rows, 10);
        assert_eq!(config.caves, CaveConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = GeneratorConfig::from_toml_str("[caves]\nworm_radius = [9, 2]\n")
            .expect_err("unordered range");
        assert!(matches!(err, WorldGenError::InvalidConfig(_)));
    }

    #[test]
    fn test_garbage_rejected() {
        let err = GeneratorConfig::from_toml_str("this is = = not toml").expect_err("parse error");
        assert!(matches!(err, WorldGenError::InvalidConfig(msg) if msg.contains("parse")));
    }

    #[test]
    fn test_missing_file() {
        let err = GeneratorConfig::load("/definitely/not/here.toml").expect_err("missing file");
        assert!(matches!(err, WorldGenError::InvalidConfig(_)));
    }
}
