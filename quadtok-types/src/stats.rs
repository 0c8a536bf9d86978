use serde::{Deserialize, Serialize};

/// Shape of a quadtree after subdivision
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Points added to the tree
    pub points: usize,
    /// Total nodes, root included
    pub nodes: usize,
    /// Nodes without children
    pub leaves: usize,
    /// Leaves holding at least one point
    pub non_empty_leaves: usize,
    /// Deepest level of detail reached
    pub max_lod: u32,
    /// Point references across all leaves, counting boundary duplicates
    pub leaf_point_refs: usize,
}

impl TreeStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point references beyond one per point, caused by points lying on
    /// shared quadrant edges.
    pub fn boundary_duplicates(&self) -> usize {
        self.leaf_point_refs.saturating_sub(self.points)
    }
}
