//! The quadtree itself.
//!
//! A [`QuadTree`] collects points over a square region, is subdivided once,
//! and is read-only afterwards. Points live in the tree's own list; nodes
//! refer to them by index, so a point on a shared quadrant edge can appear
//! in several leaves without being copied.
//!
//! ```rust
//! use quadtok::{Point, QuadTree, TreeConfig};
//!
//! let mut tree = QuadTree::new(TreeConfig::new(1, 1.0))?;
//! tree.add_point(Point::new(0.1, 0.1, "a"))?;
//! tree.add_point(Point::new(0.9, 0.9, "b"))?;
//! tree.subdivide()?;
//!
//! let a: Vec<_> = tree.leaf_points("0").map(|p| *p.data()).collect();
//! assert_eq!(a, vec!["a"]);
//! # Ok::<(), quadtok::QuadTreeError>(())
//! ```

mod node;
mod subdivide;

pub use node::{Node, NodeId, PointRefs};

use crate::config::TreeConfig;
use crate::error::{QuadTreeError, Result};
use crate::quadkey::QuadKey;
use quadtok_types::point::Point;
use quadtok_types::rect::Rect;
use quadtok_types::stats::TreeStats;
use rustc_hash::FxHashMap;

pub struct QuadTree<T> {
    config: TreeConfig,
    points: Vec<Point<T>>,
    nodes: Vec<Node>,
    /// Leaf code -> point indices, only for leaves holding points.
    index: FxHashMap<String, Vec<usize>>,
    subdivided: bool,
}

impl<T> QuadTree<T> {
    /// Create an empty tree over `[0, rect_size] x [0, rect_size]`.
    pub fn new(config: TreeConfig) -> Result<Self> {
        config.validate()?;
        if config.lod_threshold > 20 {
            log::debug!(
                "lod threshold {} allows very deep trees; dense clusters may create many nodes",
                config.lod_threshold
            );
        }
        let root = Node::new(
            Rect::square(config.rect_size),
            QuadKey::root(),
            PointRefs::new(),
        );
        Ok(Self {
            config,
            points: Vec::new(),
            nodes: vec![root],
            index: FxHashMap::default(),
            subdivided: false,
        })
    }

    /// Shorthand for [`QuadTree::new`] with explicit parameters.
    pub fn with_params(split_threshold: usize, rect_size: f64, lod_threshold: u32) -> Result<Self> {
        Self::new(TreeConfig::new(split_threshold, rect_size).with_lod_threshold(lod_threshold))
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Append a point. Only allowed before [`QuadTree::subdivide`].
    ///
    /// Returns the index of the point in [`QuadTree::points`].
    pub fn add_point(&mut self, point: Point<T>) -> Result<usize> {
        if self.subdivided {
            return Err(QuadTreeError::InvalidState(
                "cannot add points after the tree has been subdivided".to_string(),
            ));
        }

        let size = self.config.rect_size;
        if !point.is_finite() || !self.nodes[NodeId::ROOT.0].rect.contains(&point) {
            return Err(QuadTreeError::OutOfBounds {
                x: point.x(),
                y: point.y(),
                size,
            });
        }

        let idx = self.points.len();
        self.points.push(point);
        self.nodes[NodeId::ROOT.0].points.push(idx);
        Ok(idx)
    }

    /// Add several points, stopping at the first rejected one.
    pub fn extend<I>(&mut self, points: I) -> Result<()>
    where
        I: IntoIterator<Item = Point<T>>,
    {
        for point in points {
            self.add_point(point)?;
        }
        Ok(())
    }

    /// Partition the region and build the leaf index. Must be called exactly once.
    pub fn subdivide(&mut self) -> Result<()> {
        if self.subdivided {
            return Err(QuadTreeError::InvalidState(
                "tree has already been subdivided".to_string(),
            ));
        }

        let report = subdivide::subdivide(
            &mut self.nodes,
            &self.points,
            NodeId::ROOT,
            self.config.split_threshold,
            self.config.lod_threshold,
        )?;

        for leaf in subdivide::find_children(&self.nodes, NodeId::ROOT) {
            let node = &self.nodes[leaf.0];
            if !node.is_empty() {
                self.index.insert(node.code(), node.points.to_vec());
            }
        }
        self.subdivided = true;

        if report.depth_capped > 0 {
            log::warn!(
                "{} leaves reached lod threshold {} with more than {} points",
                report.depth_capped,
                self.config.lod_threshold,
                self.config.split_threshold
            );
        }
        log::debug!(
            "subdivided {} points into {} nodes ({} splits, {} indexed leaves)",
            self.points.len(),
            self.nodes.len(),
            report.splits,
            self.index.len()
        );

        Ok(())
    }

    pub fn is_subdivided(&self) -> bool {
        self.subdivided
    }

    /// All points in insertion order.
    pub fn points(&self) -> &[Point<T>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn root(&self) -> &Node {
        &self.nodes[NodeId::ROOT.0]
    }

    /// Every node in creation order; the root comes first.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Resolve the points a node references.
    pub fn node_points<'a>(&'a self, node: &'a Node) -> impl Iterator<Item = &'a Point<T>> + 'a {
        node.points.iter().map(move |&i| &self.points[i])
    }

    /// Leaves reachable from `start`, depth first, children in stored order.
    ///
    /// Before subdivision the root is the only leaf.
    pub fn find_children(&self, start: NodeId) -> Vec<&Node> {
        if start.0 >= self.nodes.len() {
            return Vec::new();
        }
        subdivide::find_children(&self.nodes, start)
            .into_iter()
            .map(|id| &self.nodes[id.0])
            .collect()
    }

    /// Every leaf of the tree, depth first.
    pub fn leaves(&self) -> Vec<&Node> {
        self.find_children(NodeId::ROOT)
    }

    /// Leaf code -> point indices, for leaves holding at least one point.
    ///
    /// Empty until [`QuadTree::subdivide`] has run.
    pub fn index(&self) -> &FxHashMap<String, Vec<usize>> {
        &self.index
    }

    /// Points of the indexed leaf with the given code.
    pub fn leaf_points<'a>(&'a self, code: &str) -> impl Iterator<Item = &'a Point<T>> + use<'a, T> {
        self.index
            .get(code)
            .into_iter()
            .flatten()
            .map(move |&i| &self.points[i])
    }

    pub fn stats(&self) -> TreeStats {
        let leaves = self.leaves();
        TreeStats {
            points: self.points.len(),
            nodes: self.nodes.len(),
            leaves: leaves.len(),
            non_empty_leaves: leaves.iter().filter(|n| !n.is_empty()).count(),
            max_lod: self.nodes.iter().map(Node::lod).max().unwrap_or(0),
            leaf_point_refs: leaves.iter().map(|n| n.len()).sum(),
        }
    }
}

impl<T> std::fmt::Debug for QuadTree<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuadTree")
            .field("config", &self.config)
            .field("points", &self.points.len())
            .field("nodes", &self.nodes.len())
            .field("subdivided", &self.subdivided)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(split_threshold: usize) -> QuadTree<&'static str> {
        QuadTree::new(TreeConfig::new(split_threshold, 1.0)).unwrap()
    }

    #[test]
    fn test_two_points_split_into_opposite_corners() {
        let mut tree = tree(1);
        tree.add_point(Point::new(0.1, 0.1, "a")).unwrap();
        tree.add_point(Point::new(0.9, 0.9, "b")).unwrap();
        tree.subdivide().unwrap();

        assert_eq!(tree.index().len(), 2);
        assert_eq!(tree.index()["0"], vec![0]);
        assert_eq!(tree.index()["3"], vec![1]);
        assert_eq!(tree.leaves().len(), 4);
        assert_eq!(tree.root().children().map(|c| c.len()), Some(4));
    }

    #[test]
    fn test_under_threshold_never_splits() {
        let mut tree = tree(5);
        for i in 0..3 {
            tree.add_point(Point::new(0.1 * i as f64, 0.2, "p")).unwrap();
        }
        tree.subdivide().unwrap();

        assert!(tree.root().is_leaf());
        assert_eq!(tree.stats().nodes, 1);
        assert_eq!(tree.index().len(), 1);
        assert_eq!(tree.index()[""], vec![0, 1, 2]);
    }

    #[test]
    fn test_lifecycle_errors() {
        let mut tree = tree(1);
        tree.add_point(Point::new(0.5, 0.5, "a")).unwrap();
        tree.subdivide().unwrap();

        assert!(matches!(
            tree.add_point(Point::new(0.2, 0.2, "b")),
            Err(QuadTreeError::InvalidState(_))
        ));
        assert!(matches!(tree.subdivide(), Err(QuadTreeError::InvalidState(_))));
    }

    #[test]
    fn test_rejects_points_outside_region() {
        let mut tree = tree(1);
        assert!(matches!(
            tree.add_point(Point::new(1.5, 0.5, "far")),
            Err(QuadTreeError::OutOfBounds { .. })
        ));
        assert!(tree.add_point(Point::new(f64::NAN, 0.5, "nan")).is_err());
        assert!(tree.add_point(Point::new(1.0, 0.0, "edge")).is_ok());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_invalid_configuration() {
        assert!(matches!(
            QuadTree::<()>::with_params(1, 0.0, 4),
            Err(QuadTreeError::InvalidConfiguration(_))
        ));
        assert!(QuadTree::<()>::with_params(1, 10.0, 4).is_ok());
    }

    #[test]
    fn test_center_point_is_shared_by_all_quadrants() {
        let mut tree = tree(1);
        tree.add_point(Point::new(0.5, 0.5, "center")).unwrap();
        tree.add_point(Point::new(0.1, 0.9, "tl")).unwrap();
        tree.subdivide().unwrap();

        let stats = tree.stats();
        assert_eq!(stats.leaf_point_refs, 5);
        assert_eq!(stats.boundary_duplicates(), 3);
        // top-left quadrant holds both points and is split again
        assert_eq!(tree.index().len(), 5);
        assert!(tree.index().contains_key("22"));
        assert!(tree.index().contains_key("21"));
        for code in ["1", "3"] {
            let names: Vec<_> = tree.leaf_points(code).map(|p| *p.data()).collect();
            assert_eq!(names, vec!["center"]);
        }
    }

    #[test]
    fn test_far_edge_point_reaches_leaf_on_non_dyadic_region() {
        let mut tree = QuadTree::with_params(0, 0.3, 9).unwrap();
        tree.add_point(Point::new(0.3, 0.0, "edge")).unwrap();
        tree.add_point(Point::new(0.3, 0.3, "corner")).unwrap();
        tree.subdivide().unwrap();

        assert_eq!(tree.index().len(), 2);
        for leaf in tree.leaves().into_iter().filter(|l| !l.is_empty()) {
            assert_eq!(leaf.lod(), 10);
            assert_eq!(leaf.rect().max_x(), 0.3);
        }
        let stats = tree.stats();
        assert_eq!(stats.leaf_point_refs, 2);
    }

    #[test]
    fn test_leaf_points_unknown_code_is_empty() {
        let mut tree = tree(1);
        tree.add_point(Point::new(0.1, 0.1, "a")).unwrap();
        tree.subdivide().unwrap();
        assert_eq!(tree.leaf_points("0123").count(), 0);
    }
}
