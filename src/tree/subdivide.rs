//! Recursive quadrant splitting, expressed over a node arena with an
//! explicit work stack.

use super::node::{Node, NodeId, PointRefs};
use crate::error::Result;
use crate::quadkey::Quadrant;
use quadtok_types::point::Point;

/// Counters gathered while splitting.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct SplitReport {
    pub splits: usize,
    /// Leaves that stopped on the depth limit while still over the split threshold.
    pub depth_capped: usize,
}

/// Partition `root` until every node either holds at most `split_threshold`
/// points or sits deeper than `lod_threshold`.
///
/// Children are processed bottom-left first, depth first, which is the same
/// visiting order as the plain recursive formulation.
pub(crate) fn subdivide<T>(
    nodes: &mut Vec<Node>,
    points: &[Point<T>],
    root: NodeId,
    split_threshold: usize,
    lod_threshold: u32,
) -> Result<SplitReport> {
    let mut report = SplitReport::default();
    let mut stack = vec![root];

    while let Some(id) = stack.pop() {
        let node = &nodes[id.0];

        if node.points.len() <= split_threshold {
            continue;
        }
        if node.key.lod() > lod_threshold {
            report.depth_capped += 1;
            continue;
        }

        let key = node.key;
        let rects = node.rect.quadrants();
        let subsets: [PointRefs; 4] = rects.map(|rect| {
            node.points
                .iter()
                .copied()
                .filter(|&i| rect.contains(&points[i]))
                .collect()
        });

        log::trace!(
            "splitting node {:?} at lod {} holding {} points",
            key.encode(),
            key.lod(),
            node.points.len()
        );

        let mut children = [NodeId(0); 4];
        for (slot, (rect, subset)) in rects.into_iter().zip(subsets).enumerate() {
            let child_key = key.child(Quadrant::ALL[slot])?;
            children[slot] = NodeId(nodes.len());
            nodes.push(Node::new(rect, child_key, subset));
        }
        nodes[id.0].children = Some(children);
        report.splits += 1;

        stack.extend(children.iter().rev());
    }

    Ok(report)
}

/// All leaves reachable from `start`, depth first, children in stored order.
pub(crate) fn find_children(nodes: &[Node], start: NodeId) -> Vec<NodeId> {
    let mut leaves = Vec::new();
    let mut stack = vec![start];

    while let Some(id) = stack.pop() {
        match &nodes[id.0].children {
            Some(children) => stack.extend(children.iter().rev()),
            None => leaves.push(id),
        }
    }

    leaves
}
