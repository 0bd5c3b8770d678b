//! World settings chosen by the player before generation.

use serde::{Deserialize, Serialize};

/// World size tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapSize {
    /// 800 x 400 tiles.
    Small,
    /// 1200 x 600 tiles.
    #[default]
    Medium,
    /// 1600 x 800 tiles.
    Large,
}

impl MapSize {
    /// Converts from a tier number. Unknown tiers map to `Medium`.
    #[must_use]
    pub const fn from_tier(tier: u8) -> Self {
        match tier {
            0 => Self::Small,
            2 => Self::Large,
            _ => Self::Medium,
        }
    }

    /// Returns `(width, height)` in tiles.
    #[must_use]
    pub const fn dimensions(self) -> (usize, usize) {
        match self {
            Self::Small => (800, 400),
            Self::Medium => (1200, 600),
            Self::Large => (1600, 800),
        }
    }
}

/// Monster difficulty tier. Carried for gameplay collaborators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonsterDifficulty {
    /// Easy.
    Easy,
    /// Normal.
    #[default]
    Normal,
    /// Hard.
    Hard,
}

impl MonsterDifficulty {
    /// Converts from a tier number. Unknown tiers map to `Normal`.
    #[must_use]
    pub const fn from_tier(tier: u8) -> Self {
        match tier {
            0 => Self::Easy,
            2 => Self::Hard,
            _ => Self::Normal,
        }
    }
}

/// Monster population tier. Carried for gameplay collaborators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonsterCount {
    /// Sparse.
    Few,
    /// Moderate.
    #[default]
    Medium,
    /// Dense.
    Many,
}

impl MonsterCount {
    /// Converts from a tier number. Unknown tiers map to `Medium`.
    #[must_use]
    pub const fn from_tier(tier: u8) -> Self {
        match tier {
            0 => Self::Few,
            2 => Self::Many,
            _ => Self::Medium,
        }
    }
}

/// Settings for one world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// World size tier.
    pub map_size: MapSize,
    /// Monster difficulty tier.
    pub monster_difficulty: MonsterDifficulty,
    /// Monster population tier.
    pub monster_count: MonsterCount,
}

impl WorldSettings {
    /// Builds settings from raw tier numbers.
    #[must_use]
    pub const fn from_tiers(map_size: u8, monster_difficulty: u8, monster_count: u8) -> Self {
        Self {
            map_size: MapSize::from_tier(map_size),
            monster_difficulty: MonsterDifficulty::from_tier(monster_difficulty),
            monster_count: MonsterCount::from_tier(monster_count),
        }
    }

    /// Returns `(width, height)` in tiles.
    #[inline]
    #[must_use]
    pub const fn world_size(&self) -> (usize, usize) {
        self.map_size.dimensions()
    }

    /// Baseline surface row: one third of the way down.
    #[inline]
    #[must_use]
    pub const fn surface_level(&self) -> usize {
        surface_level_for(self.world_size().1)
    }
}

/// Baseline surface row for a world `height` tiles tall.
///
/// Grids sized independently of their settings use this directly.
#[inline]
#[must_use]
pub const fn surface_level_for(height: usize) -> usize {
    height / 3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_dimensions() {
        assert_eq!(WorldSettings::from_tiers(0, 1, 1).world_size(), (800, 400));
        assert_eq!(WorldSettings::from_tiers(1, 1, 1).world_size(), (1200, 600));
        assert_eq!(WorldSettings::from_tiers(2, 1, 1).world_size(), (1600, 800));
    }

    #[test]
    fn test_unknown_tier_falls_back_to_medium() {
        assert_eq!(WorldSettings::from_tiers(9, 9, 9), WorldSettings::default());
    }

    #[test]
    fn test_surface_level() {
        assert_eq!(WorldSettings::from_tiers(0, 0, 0).surface_level(), 133);
        assert_eq!(WorldSettings::default().surface_level(), 200);
    }

    #[test]
    fn test_surface_level_matches_any_height() {
        for settings in [0, 1, 2].map(|tier| WorldSettings::from_tiers(tier, 1, 1)) {
            assert_eq!(settings.surface_level(), surface_level_for(settings.world_size().1));
        }
        assert_eq!(surface_level_for(100), 33);
        assert_eq!(surface_level_for(120), 40);
    }

    #[test]
    fn test_deserialize_from_toml() {
        let settings: WorldSettings =
            toml::from_str("map_size = \"large\"\nmonster_count = \"many\"").expect("valid settings");
        assert_eq!(settings.map_size, MapSize::Large);
        assert_eq!(settings.monster_count, MonsterCount::Many);
        assert_eq!(settings.monster_difficulty, MonsterDifficulty::Normal);
    }
}
