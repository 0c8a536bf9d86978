//! Tree configuration.
//!
//! A [`TreeConfig`] fixes the split threshold, the side of the square region
//! and the depth limit used when a [`crate::QuadTree`] is subdivided. It can be
//! built in code or loaded from JSON (and TOML with the `toml` feature).

use crate::error::{QuadTreeError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreeConfig {
    /// A node holding more points than this is split further.
    #[serde(default = "TreeConfig::default_split_threshold")]
    pub split_threshold: usize,

    /// Side length of the square region `[0, rect_size] x [0, rect_size]`.
    #[serde(default = "TreeConfig::default_rect_size")]
    pub rect_size: f64,

    /// Nodes deeper than this are never split.
    #[serde(default = "TreeConfig::default_lod_threshold")]
    pub lod_threshold: u32,
}

impl TreeConfig {
    pub const DEFAULT_LOD_THRESHOLD: u32 = 10;

    /// Largest accepted depth limit. Children of the deepest split node sit
    /// at lod 53, the last level at which halving a unit region still yields
    /// distinct `f64` quadrant edges.
    pub const MAX_LOD_THRESHOLD: u32 = 52;

    const fn default_split_threshold() -> usize {
        1
    }

    const fn default_rect_size() -> f64 {
        1.0
    }

    const fn default_lod_threshold() -> u32 {
        Self::DEFAULT_LOD_THRESHOLD
    }

    pub fn new(split_threshold: usize, rect_size: f64) -> Self {
        Self {
            split_threshold,
            rect_size,
            ..Self::default()
        }
    }

    pub fn with_split_threshold(mut self, split_threshold: usize) -> Self {
        self.split_threshold = split_threshold;
        self
    }

    pub fn with_rect_size(mut self, rect_size: f64) -> Self {
        self.rect_size = rect_size;
        self
    }

    pub fn with_lod_threshold(mut self, lod_threshold: u32) -> Self {
        self.lod_threshold = lod_threshold;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.rect_size.is_finite() || self.rect_size <= 0.0 {
            return Err(QuadTreeError::InvalidConfiguration(format!(
                "rect_size must be a positive finite number, got {}",
                self.rect_size
            )));
        }

        if self.lod_threshold > Self::MAX_LOD_THRESHOLD {
            return Err(QuadTreeError::InvalidConfiguration(format!(
                "lod_threshold must be at most {}, got {}",
                Self::MAX_LOD_THRESHOLD,
                self.lod_threshold
            )));
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: TreeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: TreeConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            split_threshold: Self::default_split_threshold(),
            rect_size: Self::default_rect_size(),
            lod_threshold: Self::default_lod_threshold(),
        }
    }
}
