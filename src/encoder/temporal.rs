use super::{CharShift, Encoding, encode_tree};
use crate::config::TreeConfig;
use crate::error::{QuadTreeError, Result};
use crate::tree::QuadTree;
use quadtok_types::point::Point;

/// How window bounds are mapped onto the tree's square.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TimeScale {
    /// Min-max over every bound of the encoded windows.
    #[default]
    Observed,
    /// Fixed range `[0, horizon]`; windows reaching outside it are rejected.
    Horizon(f64),
}

/// Encodes time windows as points `(start, end)` in one quadtree.
///
/// By default window bounds are rescaled from the earliest to the latest
/// time seen in the input, so windows with similar opening and closing times
/// share a code wherever in the day they sit.
#[derive(Debug, Clone)]
pub struct TemporalEncoder {
    config: TreeConfig,
    scale: TimeScale,
    shift: CharShift,
}

impl TemporalEncoder {
    pub fn new(config: TreeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            scale: TimeScale::Observed,
            shift: CharShift::Identity,
        })
    }

    /// Measure windows against a fixed `[0, horizon]` instead of the input's
    /// own range.
    pub fn with_horizon(mut self, horizon: f64) -> Result<Self> {
        if !horizon.is_finite() || horizon <= 0.0 {
            return Err(QuadTreeError::InvalidConfiguration(format!(
                "time horizon must be a positive finite number, got {}",
                horizon
            )));
        }
        self.scale = TimeScale::Horizon(horizon);
        Ok(self)
    }

    pub fn with_shift(mut self, shift: CharShift) -> Self {
        self.shift = shift;
        self
    }

    pub fn scale(&self) -> TimeScale {
        self.scale
    }

    /// Encode windows; entity `i` is `windows[i]`. The result has one view.
    ///
    /// With [`TimeScale::Horizon`] a window reaching outside `[0, horizon]`
    /// fails with [`QuadTreeError::OutOfBounds`] (in scaled units).
    pub fn encode(&self, windows: &[(f64, f64)]) -> Result<Encoding> {
        let size = self.config.rect_size;
        if let Some(&(start, end)) = windows
            .iter()
            .find(|(start, end)| !start.is_finite() || !end.is_finite())
        {
            return Err(QuadTreeError::OutOfBounds {
                x: start,
                y: end,
                size,
            });
        }

        let (origin, scale) = match self.scale {
            TimeScale::Horizon(horizon) => (0.0, size / horizon),
            TimeScale::Observed => observed_range(windows, size),
        };
        let clamp = matches!(self.scale, TimeScale::Observed);

        let mut tree = QuadTree::new(self.config.clone())?;
        for (entity, &(start, end)) in windows.iter().enumerate() {
            let mut x = (start - origin) * scale;
            let mut y = (end - origin) * scale;
            if clamp {
                x = x.clamp(0.0, size);
                y = y.clamp(0.0, size);
            }
            tree.add_point(Point::new(x, y, entity))?;
        }
        tree.subdivide()?;

        log::debug!(
            "encoded {} time windows ({:?} scale)",
            windows.len(),
            self.scale
        );
        Ok(Encoding::new(vec![encode_tree(&tree, size, &self.shift)?]))
    }
}

/// Origin and factor mapping the earliest..latest bound onto `[0, size]`.
fn observed_range(windows: &[(f64, f64)], size: f64) -> (f64, f64) {
    let (min, max) = windows
        .iter()
        .flat_map(|&(start, end)| [start, end])
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| {
            (lo.min(t), hi.max(t))
        });

    if windows.is_empty() {
        return (0.0, 1.0);
    }
    if max <= min {
        log::warn!(
            "all {} time windows collapse to the instant {}; every entity gets the same code",
            windows.len(),
            min
        );
        return (min, 0.0);
    }
    (min, size / (max - min))
}
