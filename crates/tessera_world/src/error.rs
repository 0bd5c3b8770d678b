//! # World Generation Error Types
//!
//! All errors that can occur while configuring or running world generation.

use thiserror::Error;

/// Errors that can occur in the world generation system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldGenError {
    /// A generation pass failed. The whole world is discarded.
    #[error("generation pass '{pass}' failed: {reason}")]
    PassFailed {
        /// Name of the failing pass.
        pass: &'static str,
        /// Why it failed.
        reason: String,
    },

    /// The requested grid is too small to hold the generator's fixed margins.
    #[error("grid {width}x{height} is too small for world generation")]
    GridTooSmall {
        /// Requested width in tiles.
        width: usize,
        /// Requested height in tiles.
        height: usize,
    },

    /// Invalid configuration file or value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The background generation thread could not be started.
    #[error("failed to spawn generation worker: {0}")]
    WorkerSpawn(String),

    /// The background generation thread panicked.
    #[error("generation worker panicked")]
    WorkerPanicked,

    /// The background generation thread went away without publishing a world.
    #[error("generation worker disconnected before completion")]
    WorkerDisconnected,
}

/// Result type for world generation operations.
pub type WorldGenResult<T> = Result<T, WorldGenError>;
