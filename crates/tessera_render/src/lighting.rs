//! # Light Sampling
//!
//! Vertex colours come from a read-only light source. The cache never
//! computes lighting itself; it asks a [`LightSampler`] once per tile while
//! rebuilding a chunk.

use tessera_world::TileGrid;

/// Opaque white.
pub const WHITE: [u8; 4] = [255, 255, 255, 255];

/// Supplies the vertex colour of a tile.
pub trait LightSampler {
    /// Returns the RGBA colour for the tile at `(x, y)`.
    fn sample(&self, grid: &TileGrid, x: i32, y: i32) -> [u8; 4];
}

/// Every tile fully lit.
#[derive(Clone, Copy, Debug, Default)]
pub struct FullBright;

impl LightSampler for FullBright {
    #[inline]
    fn sample(&self, _grid: &TileGrid, _x: i32, _y: i32) -> [u8; 4] {
        WHITE
    }
}

/// Darkens tiles with depth below their column's surface.
///
/// Tiles shallower than `start` (as a fraction of world height) are fully
/// lit. Brightness falls linearly to `ambient` at `end` and stays there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthFade {
    /// Depth where darkening begins, as a fraction of world height.
    pub start: f32,
    /// Depth where darkening bottoms out, as a fraction of world height.
    pub end: f32,
    /// Brightness floor in `[0, 1]`.
    pub ambient: f32,
}

impl Default for DepthFade {
    fn default() -> Self {
        Self { start: 1.0 / 32.0, end: 1.0 / 6.0, ambient: 0.01 }
    }
}

impl DepthFade {
    /// Brightness in `[ambient, 1]` for a tile `depth` rows below the surface
    /// of a world `height` rows tall.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn brightness(&self, depth: i32, height: usize) -> f32 {
        let height = height as f32;
        let (start, end) = (self.start * height, self.end * height);
        let depth = depth as f32;

        if depth <= start {
            1.0
        } else if depth >= end || end <= start {
            self.ambient
        } else {
            let t = (depth - start) / (end - start);
            1.0 + (self.ambient - 1.0) * t
        }
    }
}

impl LightSampler for DepthFade {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn sample(&self, grid: &TileGrid, x: i32, y: i32) -> [u8; 4] {
        let depth = y - grid.surface_height(x);
        let level = (self.brightness(depth, grid.height()).clamp(0.0, 1.0) * 255.0).round() as u8;
        [level, level, level, 255]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_world::{WorldSeed, WorldSettings};

    #[test]
    fn test_full_bright_is_white() {
        let grid = TileGrid::new(8, 8, WorldSeed::new(1), WorldSettings::default());
        assert_eq!(FullBright.sample(&grid, 3, 3), WHITE);
    }

    #[test]
    fn test_depth_fade_curve() {
        let fade = DepthFade::default();

        assert!((fade.brightness(-10, 320) - 1.0).abs() < f32::EPSILON);
        assert!((fade.brightness(10, 320) - 1.0).abs() < f32::EPSILON);
        assert!((fade.brightness(200, 320) - 0.01).abs() < f32::EPSILON);

        let mid = fade.brightness(32, 320);
        assert!(mid < 1.0 && mid > 0.01, "linear ramp between 10 and ~53 rows");
    }

    #[test]
    fn test_depth_fade_samples_surface() {
        let mut grid = TileGrid::new(4, 320, WorldSeed::new(1), WorldSettings::default());
        grid.set_surface_height(1, 100);

        assert_eq!(DepthFade::default().sample(&grid, 1, 90), WHITE);
        assert_eq!(DepthFade::default().sample(&grid, 1, 300), [3, 3, 3, 255]);
    }
}
