//! Error types for quadtree construction and quadkey decoding.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuadTreeError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuadTreeError {
    /// A quadkey string contained a character outside `'0'..='3'`.
    #[error("invalid quadkey {code:?}: unexpected {found:?} at position {position}")]
    InvalidEncoding {
        code: String,
        position: usize,
        found: char,
    },

    /// Grid coordinates that do not fit the key's level of detail.
    #[error("invalid quadkey: x={x}, y={y} do not fit in {lod} bits")]
    InvalidKey { lod: u32, x: u64, y: u64 },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Operation not allowed in the tree's current lifecycle stage.
    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("point ({x}, {y}) lies outside the region [0, {size}] x [0, {size}]")]
    OutOfBounds { x: f64, y: f64, size: f64 },

    #[error("configuration parse error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for QuadTreeError {
    fn from(err: serde_json::Error) -> Self {
        QuadTreeError::Config(err.to_string())
    }
}

#[cfg(feature = "toml")]
impl From<toml::de::Error> for QuadTreeError {
    fn from(err: toml::de::Error) -> Self {
        QuadTreeError::Config(err.to_string())
    }
}
