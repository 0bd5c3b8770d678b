//! # Render Error Types

use thiserror::Error;

/// Errors raised while configuring the chunk cache.
///
/// Rendering itself never fails; only configuration is validated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderConfigError {
    /// The atlas layout is inconsistent.
    #[error("invalid atlas layout: {0}")]
    InvalidAtlas(String),

    /// The chunk store settings are out of range.
    #[error("invalid chunk store config: {0}")]
    InvalidStore(String),

    /// The config document could not be read or parsed.
    #[error("failed to load render config: {0}")]
    Load(String),
}

/// Result type for render configuration.
pub type RenderResult<T> = Result<T, RenderConfigError>;
