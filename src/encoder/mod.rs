//! Turning entities into quadkey tokens.
//!
//! Encoders build one [`QuadTree`] per projection of the input (a rotated
//! spatial view, or the start/end plane of time windows), tag each point
//! with its entity index, subdivide, and report which leaf code every
//! entity landed in.
//!
//! ```rust
//! use quadtok::encoder::SpatialEncoder;
//! use quadtok::TreeConfig;
//!
//! let encoder = SpatialEncoder::new(TreeConfig::new(1, 1.0), vec![0.0])?;
//! let encoding = encoder.encode(&[(0.0, 0.0), (10.0, 10.0)])?;
//! assert_eq!(encoding.code(0, 0), Some("0"));
//! assert_eq!(encoding.code(0, 1), Some("3"));
//! # Ok::<(), quadtok::QuadTreeError>(())
//! ```

mod shift;
mod spatial;
mod temporal;

pub use shift::CharShift;
pub use spatial::{Normalization, SpatialEncoder};
pub use temporal::{TemporalEncoder, TimeScale};

use crate::error::{QuadTreeError, Result};
use crate::tree::QuadTree;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Entity index -> code, one map per view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Encoding {
    pub views: Vec<FxHashMap<usize, String>>,
}

impl Encoding {
    pub fn new(views: Vec<FxHashMap<usize, String>>) -> Self {
        Self { views }
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    pub fn view(&self, view: usize) -> Option<&FxHashMap<usize, String>> {
        self.views.get(view)
    }

    /// Code assigned to `entity` in `view`.
    pub fn code(&self, view: usize, entity: usize) -> Option<&str> {
        self.views.get(view)?.get(&entity).map(String::as_str)
    }

    /// Codes of `entity` across all views, in view order.
    pub fn tokens(&self, entity: usize) -> Vec<&str> {
        self.views
            .iter()
            .filter_map(|view| view.get(&entity).map(String::as_str))
            .collect()
    }

    /// Distinct codes used by any view.
    pub fn vocabulary(&self) -> BTreeSet<&str> {
        self.views
            .iter()
            .flat_map(|view| view.values().map(String::as_str))
            .collect()
    }
}

/// Map every entity of a subdivided tree to the (shifted) code of its leaf.
///
/// `rect_size` must match the region the tree was built over. A point on a
/// shared quadrant edge sits in several leaves; the leaf visited last in
/// depth-first order wins.
pub fn encode_tree(
    tree: &QuadTree<usize>,
    rect_size: f64,
    shift: &CharShift,
) -> Result<FxHashMap<usize, String>> {
    if tree.config().rect_size != rect_size {
        return Err(QuadTreeError::InvalidConfiguration(format!(
            "tree covers a region of size {}, expected {}",
            tree.config().rect_size,
            rect_size
        )));
    }
    if !tree.is_subdivided() {
        return Err(QuadTreeError::InvalidState(
            "tree must be subdivided before encoding".to_string(),
        ));
    }

    let mut codes = FxHashMap::default();
    for leaf in tree.leaves().into_iter().filter(|leaf| !leaf.is_empty()) {
        let code = shift.apply(&leaf.code());
        for point in tree.node_points(leaf) {
            codes.insert(*point.data(), code.clone());
        }
    }
    Ok(codes)
}
