use super::{CharShift, Encoding, encode_tree};
use crate::config::TreeConfig;
use crate::error::{QuadTreeError, Result};
use crate::tree::QuadTree;
use geo::{BoundingRect, Centroid, MultiPoint, Rotate};
use quadtok_types::point::Point;
use rustc_hash::FxHashMap;

/// How a rotated cloud is fitted into the tree's square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    /// Min-max each axis over its own range, filling the whole square.
    #[default]
    PerAxis,
    /// Scale both axes by the larger extent, keeping the aspect ratio.
    Uniform,
}

/// Encodes 2-D locations through one quadtree per rotated view.
///
/// Each view rotates the input about its centroid, min-max normalizes the
/// rotated cloud into the configured square, and assigns every location the
/// code of its leaf. Several views give each location several tokens that
/// partition space differently.
#[derive(Debug, Clone)]
pub struct SpatialEncoder {
    config: TreeConfig,
    angles: Vec<f64>,
    normalization: Normalization,
    shift: CharShift,
}

impl SpatialEncoder {
    /// `angles` are rotation angles in degrees, one view per angle.
    pub fn new(config: TreeConfig, angles: Vec<f64>) -> Result<Self> {
        config.validate()?;
        if angles.is_empty() {
            return Err(QuadTreeError::InvalidConfiguration(
                "spatial encoder needs at least one view angle".to_string(),
            ));
        }
        if let Some(angle) = angles.iter().find(|a| !a.is_finite()) {
            return Err(QuadTreeError::InvalidConfiguration(format!(
                "view angle must be finite, got {}",
                angle
            )));
        }
        Ok(Self {
            config,
            angles,
            normalization: Normalization::PerAxis,
            shift: CharShift::Identity,
        })
    }

    /// `views` evenly spaced angles over a half turn: 0, 180/views, ...
    pub fn evenly_spaced(config: TreeConfig, views: usize) -> Result<Self> {
        let angles = (0..views)
            .map(|i| 180.0 * i as f64 / views as f64)
            .collect();
        Self::new(config, angles)
    }

    pub fn with_shift(mut self, shift: CharShift) -> Self {
        self.shift = shift;
        self
    }

    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Encode locations; entity `i` is `coords[i]`.
    pub fn encode<P>(&self, coords: &[P]) -> Result<Encoding>
    where
        P: Into<geo::Point<f64>> + Copy,
    {
        let cloud: MultiPoint<f64> = coords.iter().map(|&p| p.into()).collect();
        if let Some(bad) = cloud.iter().find(|p| !p.x().is_finite() || !p.y().is_finite()) {
            return Err(QuadTreeError::OutOfBounds {
                x: bad.x(),
                y: bad.y(),
                size: self.config.rect_size,
            });
        }

        let Some(center) = cloud.centroid() else {
            return Ok(Encoding::new(vec![FxHashMap::default(); self.angles.len()]));
        };

        let mut views = Vec::with_capacity(self.angles.len());
        for &angle in &self.angles {
            let rotated = cloud.rotate_around_point(angle, center);
            let mut tree = QuadTree::new(self.config.clone())?;
            for (entity, (x, y)) in self.normalize(&rotated).into_iter().enumerate() {
                tree.add_point(Point::new(x, y, entity))?;
            }
            tree.subdivide()?;
            views.push(encode_tree(&tree, self.config.rect_size, &self.shift)?);
        }

        log::debug!(
            "encoded {} locations over {} views",
            coords.len(),
            views.len()
        );
        Ok(Encoding::new(views))
    }

    /// Fit a cloud into `[0, rect_size]^2`.
    fn normalize(&self, cloud: &MultiPoint<f64>) -> Vec<(f64, f64)> {
        let size = self.config.rect_size;
        let Some(bounds) = cloud.bounding_rect() else {
            return Vec::new();
        };

        let (width, height) = match self.normalization {
            Normalization::PerAxis => (bounds.width(), bounds.height()),
            Normalization::Uniform => {
                let extent = bounds.width().max(bounds.height());
                (extent, extent)
            }
        };
        if width <= 0.0 && height <= 0.0 {
            log::warn!(
                "all {} locations coincide; every entity gets the same code",
                cloud.0.len()
            );
        }

        // a flat axis collapses onto the region's lower edge
        let scale_x = if width > 0.0 { size / width } else { 0.0 };
        let scale_y = if height > 0.0 { size / height } else { 0.0 };
        let min = bounds.min();
        cloud
            .iter()
            .map(|p| {
                (
                    ((p.x() - min.x) * scale_x).clamp(0.0, size),
                    ((p.y() - min.y) * scale_y).clamp(0.0, size),
                )
            })
            .collect()
    }
}
