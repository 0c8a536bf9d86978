use crate::quadkey::QuadKey;
use quadtok_types::rect::Rect;
use smallvec::SmallVec;

/// Point indices held by a node, into the owning tree's point list.
pub type PointRefs = SmallVec<[usize; 4]>;

/// Handle of a node inside a [`crate::QuadTree`]'s arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// A node of the quadtree.
///
/// A node keeps every point that falls in its rectangle, also after it has
/// been split; its children reference the same points. Children are either
/// absent (leaf) or exactly four, ordered bottom-left, top-left,
/// bottom-right, top-right.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) rect: Rect,
    pub(crate) key: QuadKey,
    pub(crate) points: PointRefs,
    pub(crate) children: Option<[NodeId; 4]>,
}

impl Node {
    pub(crate) fn new(rect: Rect, key: QuadKey, points: PointRefs) -> Self {
        Self {
            rect,
            key,
            points,
            children: None,
        }
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn key(&self) -> QuadKey {
        self.key
    }

    /// Encoded quadkey of this node.
    pub fn code(&self) -> String {
        self.key.encode()
    }

    pub fn lod(&self) -> u32 {
        self.key.lod()
    }

    /// Indices of the points inside this node's rectangle.
    pub fn point_indices(&self) -> &[usize] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn children(&self) -> Option<&[NodeId; 4]> {
        self.children.as_ref()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}
