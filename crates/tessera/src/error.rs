//! # Edit Errors

use thiserror::Error;
use tessera_world::TileType;

/// Reasons a tile edit was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditError {
    /// The coordinates lie outside the world.
    #[error("tile ({x}, {y}) is outside the world")]
    OutOfBounds {
        /// Column.
        x: i32,
        /// Row.
        y: i32,
    },

    /// Mining an empty tile.
    #[error("nothing to mine at ({x}, {y})")]
    NothingToMine {
        /// Column.
        x: i32,
        /// Row.
        y: i32,
    },

    /// Placing onto a tile that is already solid.
    #[error("({x}, {y}) is occupied by {occupant:?}")]
    Occupied {
        /// Column.
        x: i32,
        /// Row.
        y: i32,
        /// What is already there.
        occupant: TileType,
    },

    /// Portal frames cannot be broken or overwritten.
    #[error("{kind:?} at ({x}, {y}) is unbreakable")]
    Unbreakable {
        /// Column.
        x: i32,
        /// Row.
        y: i32,
        /// Portal material.
        kind: TileType,
    },

    /// Air is not a placeable material.
    #[error("cannot place {0:?}")]
    NotPlaceable(TileType),
}

/// Result type for tile edits.
pub type EditResult<T> = Result<T, EditError>;
