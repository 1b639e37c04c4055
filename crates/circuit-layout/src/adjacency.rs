//! A small reusable adjacency-graph + DFS helper, built on demand from a
//! point -> segment-endpoint map and discarded after use (spec.md §9
//! REDESIGN FLAGS: "the adjacency graph ... is built on demand and
//! discarded"). Grounded on the source's generic
//! `container/graph/depth_first_search.h` visitor-based traversal, collapsed
//! here into a single-purpose mask/cycle computation since this crate only
//! ever needs one traversal shape.

use circuit_types::{Point, SegmentIndex};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("segment tree contains a loop reachable from the starting point")]
    LoopDetected,
}

/// Adjacency built from `(point, segment_index)` endpoint pairs: looking up
/// a point yields every segment touching it.
pub struct AdjacencyGraph {
    by_point: HashMap<Point, Vec<SegmentIndex>>,
}

impl AdjacencyGraph {
    pub fn build<'a>(endpoints: impl Iterator<Item = (Point, SegmentIndex)>) -> Self {
        let mut by_point: HashMap<Point, Vec<SegmentIndex>> = HashMap::new();
        for (point, idx) in endpoints {
            by_point.entry(point).or_default().push(idx);
        }
        Self { by_point }
    }

    /// DFS starting at `start`, visiting every segment touching `start` and
    /// transitively everything connected to it. `segment_points` maps a
    /// segment index to its two endpoints. Returns a boolean mask (indexed
    /// like the tree's segment vector) of which segments were reached, or
    /// `LoopDetected` if the traversal would revisit a segment through a
    /// path other than the one it was first reached by (i.e. the component
    /// is not a tree).
    pub fn dfs_mask(
        &self,
        start: Point,
        segment_count: usize,
        segment_points: impl Fn(SegmentIndex) -> (Point, Point),
    ) -> Result<Vec<bool>, GraphError> {
        let mut visited = vec![false; segment_count];
        let mut stack = vec![start];
        let mut seen_points = std::collections::HashSet::new();
        seen_points.insert(start);

        while let Some(point) = stack.pop() {
            let Some(segments) = self.by_point.get(&point) else {
                continue;
            };
            for &seg in segments {
                let i = seg.value() as usize;
                let (p0, p1) = segment_points(seg);
                let other = if p0 == point { p1 } else { p0 };
                if visited[i] {
                    // Revisiting a segment is fine only if we are arriving
                    // from the same far endpoint every time a tree allows
                    // (shared point, multiple segments) — what is never
                    // allowed is reaching `other` through a second distinct
                    // path once it has already been expanded.
                    if seen_points.contains(&other) {
                        continue;
                    }
                    return Err(GraphError::LoopDetected);
                }
                visited[i] = true;
                if !seen_points.contains(&other) {
                    seen_points.insert(other);
                    stack.push(other);
                }
            }
        }
        Ok(visited)
    }
}
