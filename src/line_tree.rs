//! `LineTree`: the connected, rooted view of one wire's segments used by
//! simulation front ends (spec.md §6.1 `line_tree_of`). Grounded directly on
//! [`circuit_layout::SegmentTree::calculate_connected_segments_mask`], which
//! already performs the DFS reachability walk and loop detection this needs
//! — this module just filters a tree's segments down to the ones reachable
//! from its input.

use circuit_layout::{SegmentInfo, SegmentTree, SegmentTreeError};
use circuit_types::OrderedLine;

/// The lines of a wire reachable from its input connector, in segment-index
/// order. Empty if the wire has no input (spec.md §6.1: "empty if no
/// input").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineTree {
    lines: Vec<OrderedLine>,
}

impl LineTree {
    pub fn lines(&self) -> &[OrderedLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Walk `tree` from its input and collect every segment reachable from it.
/// A tree with no input yields an empty [`LineTree`] without touching the
/// DFS at all.
pub fn derive_line_tree(tree: &SegmentTree) -> Result<LineTree, SegmentTreeError> {
    let Some(start) = tree.input_position() else {
        return Ok(LineTree::default());
    };
    let mask = tree.calculate_connected_segments_mask(start)?;
    let lines = tree
        .indices()
        .zip(mask)
        .filter(|(_, reachable)| *reachable)
        .map(|(idx, _)| tree.line(idx))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(LineTree { lines })
}

#[cfg(test)]
mod tests {
    use super::*;
    use circuit_types::{Grid, OrderedLine, Point, SegmentPointType};

    fn pt(x: i32, y: i32) -> Point {
        Point::new(Grid::new(x).unwrap(), Grid::new(y).unwrap())
    }

    fn line(x0: i32, y0: i32, x1: i32, y1: i32) -> OrderedLine {
        OrderedLine::new(pt(x0, y0), pt(x1, y1)).unwrap()
    }

    #[test]
    fn empty_tree_without_input_yields_empty_line_tree() {
        let tree = SegmentTree::new();
        let result = derive_line_tree(&tree).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn reachable_segments_collected_from_input() {
        let mut tree = SegmentTree::new();
        tree.add_segment(SegmentInfo::new(
            line(0, 0, 5, 0),
            SegmentPointType::Input,
            SegmentPointType::CornerPoint,
        ))
        .unwrap();
        tree.add_segment(SegmentInfo::new(
            line(5, 0, 5, 5),
            SegmentPointType::CornerPoint,
            SegmentPointType::Output,
        ))
        .unwrap();
        let result = derive_line_tree(&tree).unwrap();
        assert_eq!(result.lines().len(), 2);
    }
}
