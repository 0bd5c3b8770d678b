//! Grass overlay frames.
//!
//! Exposed dirt is turned into grass whose frame comes from one of 13
//! disjoint exposure buckets. All overlay frames sit in atlas rows 3 and 4
//! (frames 48-79), past the blob range, so a grass tile's frame alone tells
//! whether it is an overlay.

use super::{connectable, dir, pick};
use crate::grid::TileGrid;
use crate::tile::TileType;

/// Only the top side is exposed.
pub const TOP: [u8; 3] = [48, 49, 50];
/// Only the bottom side is exposed.
pub const BOTTOM: [u8; 3] = [51, 52, 53];
/// Only the left side is exposed.
pub const LEFT: [u8; 3] = [54, 55, 56];
/// Only the right side is exposed.
pub const RIGHT: [u8; 3] = [57, 58, 59];
/// Top and left exposed.
pub const TOP_LEFT: [u8; 2] = [60, 61];
/// Top and right exposed.
pub const TOP_RIGHT: [u8; 2] = [62, 63];
/// Bottom and left exposed.
pub const BOTTOM_LEFT: [u8; 2] = [64, 65];
/// Bottom and right exposed.
pub const BOTTOM_RIGHT: [u8; 2] = [66, 67];
/// Top and bottom exposed.
pub const VERTICAL: [u8; 2] = [68, 69];
/// Left and right exposed.
pub const HORIZONTAL: [u8; 2] = [70, 71];
/// Any three sides exposed.
pub const THREE_SIDES: [u8; 3] = [72, 73, 74];
/// All four sides exposed.
pub const ISLAND: [u8; 2] = [75, 76];
/// Cardinals covered, at least one diagonal exposed.
pub const INNER_CORNER: [u8; 3] = [77, 78, 79];

/// First overlay frame.
pub const FIRST_OVERLAY_FRAME: u8 = 48;
/// Last overlay frame.
pub const LAST_OVERLAY_FRAME: u8 = 79;

/// Returns true if `frame` belongs to a grass overlay bucket.
#[inline]
#[must_use]
pub const fn is_overlay_frame(frame: u8) -> bool {
    frame >= FIRST_OVERLAY_FRAME && frame <= LAST_OVERLAY_FRAME
}

/// Selects the bucket for an exposure pattern.
///
/// Returns `None` when nothing is exposed.
#[must_use]
pub fn bucket(exposed: u8) -> Option<&'static [u8]> {
    use dir::{B, L, R, T};

    let cardinal = exposed & dir::CARDINALS;
    let frames: &'static [u8] = match cardinal {
        0 if exposed & dir::DIAGONALS != 0 => &INNER_CORNER,
        0 => return None,
        T => &TOP,
        B => &BOTTOM,
        L => &LEFT,
        R => &RIGHT,
        x if x == T | L => &TOP_LEFT,
        x if x == T | R => &TOP_RIGHT,
        x if x == B | L => &BOTTOM_LEFT,
        x if x == B | R => &BOTTOM_RIGHT,
        x if x == T | B => &VERTICAL,
        x if x == L | R => &HORIZONTAL,
        dir::CARDINALS => &ISLAND,
        _ => &THREE_SIDES,
    };
    Some(frames)
}

/// Directions around `(x, y)` whose neighbour does not connect to dirt.
///
/// The world edge counts as covered, so border columns do not sprout grass.
#[must_use]
pub fn dirt_exposure(grid: &TileGrid, x: i32, y: i32) -> u8 {
    let mut exposed = 0;
    for (bit, dx, dy) in dir::OFFSETS {
        let (nx, ny) = (x + dx, y + dy);
        if grid.in_bounds(nx, ny) && !connectable(TileType::Dirt, grid.kind(nx, ny)) {
            exposed |= bit;
        }
    }
    exposed
}

/// Overlay frame for a dirt tile at `(x, y)`, or `None` if it is fully covered.
#[must_use]
pub fn grass_overlay_frame(grid: &TileGrid, x: i32, y: i32) -> Option<u8> {
    bucket(dirt_exposure(grid, x, y)).map(|frames| pick(x, y, frames))
}
