//! # Tile Atlas
//!
//! Maps a frame index to its cell in a frame sheet.
//!
//! ## Layout
//!
//! ```text
//! ┌──────┬──────┬─────┬──────┐   16 columns x 15 rows of 18px cells,
//! │  0   │  1   │ ... │  15  │   each holding a 16px tile centred with
//! ├──────┼──────┼─────┼──────┤   a 1px gutter. Frame f sits at
//! │  16  │  17  │ ... │  31  │   column f % 16, row f / 16.
//! └──────┴──────┴─────┴──────┘
//! ```
//!
//! UVs are pulled inward by a fixed texel inset so neighbouring cells never
//! bleed into each other under filtering.

use serde::{Deserialize, Serialize};

use crate::error::{RenderConfigError, RenderResult};
use crate::rect::Rect;

/// Texture coordinates of one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UvRect {
    /// Left.
    pub u0: f32,
    /// Top.
    pub v0: f32,
    /// Right.
    pub u1: f32,
    /// Bottom.
    pub v1: f32,
}

/// Frame sheet geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileAtlas {
    /// Cell pitch in pixels, gutter included.
    pub cell_px: u32,
    /// Tile size inside a cell.
    pub tile_px: u32,
    /// Cells per row.
    pub columns: u32,
    /// Rows of cells.
    pub rows: u32,
    /// UV inset in texels.
    pub inset_px: f32,
}

impl Default for TileAtlas {
    fn default() -> Self {
        Self { cell_px: 18, tile_px: 16, columns: 16, rows: 15, inset_px: 1.5 }
    }
}

impl TileAtlas {
    /// Checks the layout.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAtlas` if tiles do not fit their cells, the grid is
    /// empty, or the inset swallows the tile.
    pub fn validate(&self) -> RenderResult<()> {
        if self.columns == 0 || self.rows == 0 {
            return Err(RenderConfigError::InvalidAtlas("atlas has no cells".into()));
        }
        if self.tile_px == 0 || self.tile_px > self.cell_px {
            return Err(RenderConfigError::InvalidAtlas(format!(
                "tile {}px does not fit a {}px cell",
                self.tile_px, self.cell_px
            )));
        }
        #[allow(clippy::cast_precision_loss)]
        let half_tile = self.tile_px as f32 / 2.0;
        if !(0.0..half_tile).contains(&self.inset_px) {
            return Err(RenderConfigError::InvalidAtlas(format!(
                "inset {} must lie in [0, {half_tile})",
                self.inset_px
            )));
        }
        Ok(())
    }

    /// Number of addressable cells.
    #[inline]
    #[must_use]
    pub const fn cell_count(&self) -> u32 {
        self.columns * self.rows
    }

    /// Sheet size in pixels.
    #[inline]
    #[must_use]
    pub const fn texture_size(&self) -> (u32, u32) {
        (self.columns * self.cell_px, self.rows * self.cell_px)
    }

    /// Cell used for `frame`. Frames past the last cell clamp to it.
    #[inline]
    #[must_use]
    pub fn cell_of(&self, frame: u8) -> u32 {
        u32::from(frame).min(self.cell_count().saturating_sub(1))
    }

    /// Pixel rectangle of the tile inside the frame's cell.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn source_rect(&self, frame: u8) -> Rect {
        let cell = self.cell_of(frame);
        let (col, row) = (cell % self.columns, cell / self.columns);
        let gutter = (self.cell_px - self.tile_px) / 2;

        Rect::new(
            (col * self.cell_px + gutter) as i32,
            (row * self.cell_px + gutter) as i32,
            self.tile_px as i32,
            self.tile_px as i32,
        )
    }

    /// Inset texture coordinates for `frame`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn uv(&self, frame: u8) -> UvRect {
        let src = self.source_rect(frame);
        let (tw, th) = self.texture_size();
        let (tw, th) = (tw as f32, th as f32);
        let inset = self.inset_px;

        UvRect {
            u0: (src.x as f32 + inset) / tw,
            v0: (src.y as f32 + inset) / th,
            u1: (src.right() as f32 - inset) / tw,
            v1: (src.bottom() as f32 - inset) / th,
        }
    }
}
