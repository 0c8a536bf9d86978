//! Tree builder for flexible configuration
//!
//! This module provides a builder pattern for creating quadtrees, optionally
//! seeded with points and subdivided in one go.

use crate::config::TreeConfig;
use crate::error::Result;
use crate::tree::QuadTree;
use quadtok_types::point::Point;

/// Builder for [`QuadTree`] with fluent configuration.
#[derive(Debug)]
pub struct QuadTreeBuilder<T> {
    config: TreeConfig,
    points: Vec<Point<T>>,
}

impl<T> QuadTreeBuilder<T> {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: TreeConfig::default(),
            points: Vec::new(),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: TreeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn split_threshold(mut self, split_threshold: usize) -> Self {
        self.config = self.config.with_split_threshold(split_threshold);
        self
    }

    pub fn rect_size(mut self, rect_size: f64) -> Self {
        self.config = self.config.with_rect_size(rect_size);
        self
    }

    pub fn lod_threshold(mut self, lod_threshold: u32) -> Self {
        self.config = self.config.with_lod_threshold(lod_threshold);
        self
    }

    /// Queue a point to be added when the tree is built.
    pub fn point(mut self, point: Point<T>) -> Self {
        self.points.push(point);
        self
    }

    pub fn points<I>(mut self, points: I) -> Self
    where
        I: IntoIterator<Item = Point<T>>,
    {
        self.points.extend(points);
        self
    }

    /// Build the tree with the queued points added but not yet subdivided.
    pub fn build(self) -> Result<QuadTree<T>> {
        let mut tree = QuadTree::new(self.config)?;
        tree.extend(self.points)?;
        Ok(tree)
    }

    /// Build the tree and subdivide it.
    pub fn build_subdivided(self) -> Result<QuadTree<T>> {
        let mut tree = self.build()?;
        tree.subdivide()?;
        Ok(tree)
    }
}

impl<T> Default for QuadTreeBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
