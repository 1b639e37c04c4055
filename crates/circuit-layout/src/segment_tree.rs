//! `SegmentTree`: the ordered collection of segments belonging to one wire,
//! plus the parallel `valid`-parts bookkeeping and cached input/output
//! totals described in spec.md §4.2.

use crate::adjacency::AdjacencyGraph;
use circuit_geometry::{to_line, to_part, PartSelection};
use circuit_types::{
    ConnectionCount, OrderedLine, Part, PartCopyDefinition, Point, SegmentIndex, SegmentPointType,
};
use std::fmt;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentInfo {
    pub line: OrderedLine,
    pub p0_type: SegmentPointType,
    pub p1_type: SegmentPointType,
}

impl SegmentInfo {
    pub fn new(line: OrderedLine, p0_type: SegmentPointType, p1_type: SegmentPointType) -> Self {
        Self {
            line,
            p0_type,
            p1_type,
        }
    }

    fn full_part(&self) -> Part {
        to_part(self.line)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SegmentTreeError {
    #[error("segment tree already has an input, cannot add a second one")]
    SecondInput,
    #[error("segment index {0} out of range")]
    IndexOutOfRange(u32),
    #[error("update_segment must preserve line length (was {old}, got {new})")]
    LengthChanged { old: i32, new: i32 },
    #[error("shrink_segment's new part must lie inside the current part")]
    ShrinkNotInside,
    #[error("segments to merge must be collinear and share an endpoint")]
    NotMergeable,
    #[error(transparent)]
    PartSelection(#[from] circuit_geometry::PartSelectionError),
    #[error(transparent)]
    Graph(#[from] crate::adjacency::GraphError),
}

#[derive(Debug, Clone, Default)]
pub struct SegmentTree {
    segments: Vec<SegmentInfo>,
    valid: Vec<PartSelection>,
    input_position: Option<Point>,
    output_count: ConnectionCount,
}

impl fmt::Display for SegmentTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SegmentTree({} segments)", self.segments.len())
    }
}

impl SegmentTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indices(&self) -> impl Iterator<Item = SegmentIndex> + '_ {
        (0..self.segments.len()).map(|i| SegmentIndex::new(i as u32))
    }

    fn idx(&self, i: SegmentIndex) -> Result<usize, SegmentTreeError> {
        let u = i.value() as usize;
        if u >= self.segments.len() {
            return Err(SegmentTreeError::IndexOutOfRange(i.value()));
        }
        Ok(u)
    }

    pub fn line(&self, i: SegmentIndex) -> Result<OrderedLine, SegmentTreeError> {
        Ok(self.segments[self.idx(i)?].line)
    }

    pub fn part(&self, i: SegmentIndex) -> Result<Part, SegmentTreeError> {
        Ok(self.segments[self.idx(i)?].full_part())
    }

    pub fn info(&self, i: SegmentIndex) -> Result<SegmentInfo, SegmentTreeError> {
        Ok(self.segments[self.idx(i)?])
    }

    pub fn valid_parts(&self, i: SegmentIndex) -> Result<&PartSelection, SegmentTreeError> {
        Ok(&self.valid[self.idx(i)?])
    }

    pub fn has_input(&self) -> bool {
        self.input_position.is_some()
    }

    pub fn input_position(&self) -> Option<Point> {
        self.input_position
    }

    pub fn output_count(&self) -> ConnectionCount {
        self.output_count
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    fn register_endpoints(&mut self, info: &SegmentInfo) -> Result<(), SegmentTreeError> {
        if info.p0_type.is_input() || info.p1_type.is_input() {
            if self.input_position.is_some() {
                return Err(SegmentTreeError::SecondInput);
            }
            self.input_position = Some(if info.p0_type.is_input() {
                info.line.p0()
            } else {
                info.line.p1()
            });
        }
        if info.p0_type.is_output() {
            self.output_count = self.output_count.increment();
        }
        if info.p1_type.is_output() {
            self.output_count = self.output_count.increment();
        }
        Ok(())
    }

    fn unregister_endpoints(&mut self, info: &SegmentInfo) {
        if info.p0_type.is_input() || info.p1_type.is_input() {
            self.input_position = None;
        }
        if info.p0_type.is_output() {
            self.output_count = self.output_count.decrement();
        }
        if info.p1_type.is_output() {
            self.output_count = self.output_count.decrement();
        }
    }

    /// Append a new segment, registering its endpoints.
    pub fn add_segment(&mut self, info: SegmentInfo) -> Result<SegmentIndex, SegmentTreeError> {
        self.register_endpoints(&info)?;
        self.segments.push(info);
        self.valid.push(PartSelection::new());
        let idx = SegmentIndex::new((self.segments.len() - 1) as u32);
        trace!(target: "layout.segment_tree", segment = ?idx, "add_segment");
        Ok(idx)
    }

    /// Replace the info at `idx`; the line's length must be unchanged
    /// (only endpoint types or position may differ).
    pub fn update_segment(
        &mut self,
        idx: SegmentIndex,
        info: SegmentInfo,
    ) -> Result<(), SegmentTreeError> {
        let i = self.idx(idx)?;
        let old_len = self.segments[i].line.length();
        let new_len = info.line.length();
        if old_len != new_len {
            return Err(SegmentTreeError::LengthChanged {
                old: old_len,
                new: new_len,
            });
        }
        let old_info = self.segments[i];
        self.unregister_endpoints(&old_info);
        self.register_endpoints(&info)?;
        self.segments[i] = info;
        Ok(())
    }

    /// Shrink the segment to `new_part` (expressed in the segment's current
    /// local offset frame); remaps the valid selection into the shrunk
    /// frame and rewrites the segment's line.
    pub fn shrink_segment(
        &mut self,
        idx: SegmentIndex,
        new_part: Part,
    ) -> Result<(), SegmentTreeError> {
        let i = self.idx(idx)?;
        let current_part = self.segments[i].full_part();
        if !circuit_geometry::a_inside_b(new_part, current_part) {
            return Err(SegmentTreeError::ShrinkNotInside);
        }
        let new_line = to_line(self.segments[i].line, new_part);
        let new_len = Part::new(
            circuit_types::Offset::new(0),
            circuit_types::Offset::new(new_part.distance()),
        )
        .expect("new_part has positive distance");

        let mut remapped = PartSelection::new();
        remapped.copy_parts(
            &self.valid[i],
            PartCopyDefinition {
                destination: new_len,
                source: new_part,
            },
        )?;
        self.valid[i] = remapped;

        let old_info = self.segments[i];
        self.unregister_endpoints(&old_info);
        let new_info = SegmentInfo {
            line: new_line,
            p0_type: old_info.p0_type,
            p1_type: old_info.p1_type,
        };
        self.register_endpoints(&new_info)?;
        self.segments[i] = new_info;
        Ok(())
    }

    /// Append a copy of `src_tree`'s segment `idx`, optionally restricted to
    /// `part` of it (in `src_tree`'s local frame).
    pub fn copy_segment(
        &mut self,
        src_tree: &SegmentTree,
        idx: SegmentIndex,
        part: Option<Part>,
    ) -> Result<SegmentIndex, SegmentTreeError> {
        let src_i = src_tree.idx(idx)?;
        let src_info = src_tree.segments[src_i];
        let full = src_info.full_part();
        let copy_part = part.unwrap_or(full);

        let new_line = to_line(src_info.line, copy_part);
        let new_local = Part::new(
            circuit_types::Offset::new(0),
            circuit_types::Offset::new(copy_part.distance()),
        )
        .expect("copy_part has positive distance");

        // Preserve endpoint types only when the copy spans the full original part.
        let (p0_type, p1_type) = if copy_part == full {
            (src_info.p0_type, src_info.p1_type)
        } else {
            (SegmentPointType::ShadowPoint, SegmentPointType::ShadowPoint)
        };
        let new_info = SegmentInfo::new(new_line, p0_type, p1_type);

        let dst_idx = self.add_segment(new_info)?;
        let dst_i = self.idx(dst_idx)?;
        let mut remapped = PartSelection::new();
        remapped.copy_parts(
            &src_tree.valid[src_i],
            PartCopyDefinition {
                destination: new_local,
                source: copy_part,
            },
        )?;
        self.valid[dst_i] = remapped;
        Ok(dst_idx)
    }

    /// Merge two collinear, touching segments in this tree into one, written
    /// into `merge_to`'s slot and then dropping `deleted` via
    /// [`Self::swap_and_delete_segment`]. Note that like any swap-and-delete,
    /// if `merge_to` happens to be the last segment it is the one relocated
    /// into `deleted`'s slot — callers that track indices must read the
    /// relocation result `swap_and_delete_segment` would have returned
    /// rather than assume `merge_to` is stable.
    pub fn swap_and_merge_segment(
        &mut self,
        merge_to: SegmentIndex,
        deleted: SegmentIndex,
    ) -> Result<(), SegmentTreeError> {
        let a_i = self.idx(merge_to)?;
        let b_i = self.idx(deleted)?;
        if a_i == b_i {
            return Err(SegmentTreeError::NotMergeable);
        }
        let a_info = self.segments[a_i];
        let b_info = self.segments[b_i];

        let merged_line = merge_collinear_touching(a_info.line, b_info.line)
            .ok_or(SegmentTreeError::NotMergeable)?;

        let a_full = a_info.full_part();
        let b_full = b_info.full_part();
        // Determine where a's and b's local frames land inside the merged line.
        let a_shift = circuit_geometry::to_part_from_line(merged_line, a_info.line);
        let b_shift = circuit_geometry::to_part_from_line(merged_line, b_info.line);

        let mut merged_valid = PartSelection::new();
        merged_valid.copy_parts(
            &self.valid[a_i],
            PartCopyDefinition {
                destination: a_shift,
                source: a_full,
            },
        )?;
        merged_valid.copy_parts(
            &self.valid[b_i],
            PartCopyDefinition {
                destination: b_shift,
                source: b_full,
            },
        )?;

        // New endpoint types: the far ends are kept, the shared (now
        // interior) ends become shadow points since they are no longer
        // segment boundaries.
        let (new_p0_type, new_p1_type) = merged_endpoint_types(a_info, b_info, merged_line);

        // Only unregister `a`'s old counts here: `b`'s are unregistered once,
        // correctly, by `swap_and_delete_segment` below.
        self.unregister_endpoints(&a_info);

        let new_info = SegmentInfo::new(merged_line, new_p0_type, new_p1_type);
        self.register_endpoints(&new_info)?;
        self.segments[a_i] = new_info;
        self.valid[a_i] = merged_valid;

        self.swap_and_delete_segment(deleted)?;
        Ok(())
    }

    /// Remove segment `idx`, moving the last slot into its place. Returns
    /// the index of the segment that was relocated, if any (callers must
    /// rebind references to it).
    pub fn swap_and_delete_segment(
        &mut self,
        idx: SegmentIndex,
    ) -> Result<Option<SegmentIndex>, SegmentTreeError> {
        let i = self.idx(idx)?;
        let info = self.segments[i];
        self.unregister_endpoints(&info);

        let last = self.segments.len() - 1;
        let relocated = if i != last {
            self.segments.swap_remove(i);
            self.valid.swap_remove(i);
            Some(SegmentIndex::new(last as u32))
        } else {
            self.segments.pop();
            self.valid.pop();
            None
        };
        Ok(relocated)
    }

    pub fn mark_valid(&mut self, idx: SegmentIndex, part: Part) -> Result<(), SegmentTreeError> {
        let i = self.idx(idx)?;
        self.valid[i].add_part(part);
        Ok(())
    }

    pub fn unmark_valid(&mut self, idx: SegmentIndex, part: Part) -> Result<(), SegmentTreeError> {
        let i = self.idx(idx)?;
        self.valid[i].remove_part(part);
        Ok(())
    }

    /// Sort segments lexicographically by line so visually-equal trees
    /// compare equal. Since every segment's line is distinct within one
    /// tree (two coincident lines would be the same wire segment), a plain
    /// stable sort by line already canonicalises the representation — no
    /// separate endpoint-type co-sort is needed (see DESIGN.md).
    pub fn normalize(&mut self) {
        let mut paired: Vec<(SegmentInfo, PartSelection)> = self
            .segments
            .drain(..)
            .zip(self.valid.drain(..))
            .collect();
        paired.sort_by_key(|(info, _)| info.line);
        for (info, valid) in paired {
            self.segments.push(info);
            self.valid.push(valid);
        }
    }

    /// The complement of the valid parts on each segment, as grid lines.
    pub fn calculate_normal_lines(&self) -> Vec<OrderedLine> {
        let mut result = Vec::new();
        for (i, info) in self.segments.iter().enumerate() {
            let full = info.full_part();
            let normal = self.valid[i].inverted_selection(full);
            for &part in normal.parts() {
                result.push(to_line(info.line, part));
            }
        }
        result
    }

    /// Reachability mask (and implicit cycle check) over this tree's
    /// segments, starting a DFS from `start`.
    pub fn calculate_connected_segments_mask(
        &self,
        start: Point,
    ) -> Result<Vec<bool>, SegmentTreeError> {
        let endpoints = self
            .segments
            .iter()
            .enumerate()
            .flat_map(|(i, info)| {
                let idx = SegmentIndex::new(i as u32);
                [(info.line.p0(), idx), (info.line.p1(), idx)]
            });
        let graph = AdjacencyGraph::build(endpoints);
        let segments = self.segments.clone();
        let mask = graph.dfs_mask(start, self.segments.len(), move |seg| {
            let info = segments[seg.value() as usize];
            (info.line.p0(), info.line.p1())
        })?;
        Ok(mask)
    }

    /// Whether this tree's segments form a single connected, cycle-free
    /// component (spec.md §8's contiguous-tree property). An empty tree is
    /// trivially contiguous.
    pub fn is_contiguous_tree(&self) -> bool {
        let Some(first) = self.segments.first() else {
            return true;
        };
        let start = first.line.p0();
        match self.calculate_connected_segments_mask(start) {
            Ok(mask) => mask.iter().all(|&reached| reached),
            Err(_) => false,
        }
    }

    pub fn calculate_bounding_rect(&self) -> Option<circuit_geometry::Rect> {
        self.segments
            .iter()
            .map(|info| circuit_geometry::Rect::new(info.line.p0(), info.line.p1()))
            .reduce(|a, b| a.union(&b))
    }
}

fn merge_collinear_touching(a: OrderedLine, b: OrderedLine) -> Option<OrderedLine> {
    if a.orientation() != b.orientation() {
        return None;
    }
    // collinear: the infinite lines coincide.
    let collinear = match a.orientation() {
        circuit_types::Orientation::Horizontal => a.p0().y == b.p0().y,
        circuit_types::Orientation::Vertical => a.p0().x == b.p0().x,
    };
    if !collinear {
        return None;
    }
    // touching: an endpoint of a equals an endpoint of b.
    let shares_endpoint =
        a.p0() == b.p0() || a.p0() == b.p1() || a.p1() == b.p0() || a.p1() == b.p1();
    if !shares_endpoint {
        return None;
    }
    let mut points = [a.p0(), a.p1(), b.p0(), b.p1()];
    points.sort();
    let (lo, hi) = (points[0], points[3]);
    OrderedLine::new(lo, hi).ok()
}

fn merged_endpoint_types(
    a: SegmentInfo,
    b: SegmentInfo,
    merged: OrderedLine,
) -> (SegmentPointType, SegmentPointType) {
    let far_type_at = |point: Point| -> SegmentPointType {
        if point == a.line.p0() {
            a.p0_type
        } else if point == a.line.p1() {
            a.p1_type
        } else if point == b.line.p0() {
            b.p0_type
        } else if point == b.line.p1() {
            b.p1_type
        } else {
            SegmentPointType::ShadowPoint
        }
    };
    (far_type_at(merged.p0()), far_type_at(merged.p1()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use circuit_types::{Grid, Offset};

    fn pt(x: i32, y: i32) -> Point {
        Point::new(Grid::new(x).unwrap(), Grid::new(y).unwrap())
    }

    fn line(x0: i32, y0: i32, x1: i32, y1: i32) -> OrderedLine {
        OrderedLine::new(pt(x0, y0), pt(x1, y1)).unwrap()
    }

    #[test]
    fn add_segment_tracks_input_and_output_count() {
        let mut tree = SegmentTree::new();
        tree.add_segment(SegmentInfo::new(
            line(0, 0, 10, 0),
            SegmentPointType::Input,
            SegmentPointType::Output,
        ))
        .unwrap();
        assert!(tree.has_input());
        assert_eq!(tree.input_position(), Some(pt(0, 0)));
        assert_eq!(tree.output_count().value(), 1);
    }

    #[test]
    fn add_segment_rejects_second_input() {
        let mut tree = SegmentTree::new();
        tree.add_segment(SegmentInfo::new(
            line(0, 0, 10, 0),
            SegmentPointType::Input,
            SegmentPointType::ShadowPoint,
        ))
        .unwrap();
        let err = tree
            .add_segment(SegmentInfo::new(
                line(0, 0, 0, 10),
                SegmentPointType::Input,
                SegmentPointType::ShadowPoint,
            ))
            .unwrap_err();
        assert_eq!(err, SegmentTreeError::SecondInput);
    }

    #[test]
    fn update_segment_rejects_length_change() {
        let mut tree = SegmentTree::new();
        let idx = tree
            .add_segment(SegmentInfo::new(
                line(0, 0, 10, 0),
                SegmentPointType::ShadowPoint,
                SegmentPointType::ShadowPoint,
            ))
            .unwrap();
        let err = tree
            .update_segment(
                idx,
                SegmentInfo::new(
                    line(0, 0, 5, 0),
                    SegmentPointType::ShadowPoint,
                    SegmentPointType::ShadowPoint,
                ),
            )
            .unwrap_err();
        assert!(matches!(err, SegmentTreeError::LengthChanged { .. }));
    }

    #[test]
    fn shrink_segment_remaps_valid_parts() {
        let mut tree = SegmentTree::new();
        let idx = tree
            .add_segment(SegmentInfo::new(
                line(0, 0, 10, 0),
                SegmentPointType::ShadowPoint,
                SegmentPointType::ShadowPoint,
            ))
            .unwrap();
        tree.mark_valid(idx, Part::new(Offset::new(2), Offset::new(8)).unwrap())
            .unwrap();
        tree.shrink_segment(idx, Part::new(Offset::new(3), Offset::new(7)).unwrap())
            .unwrap();
        assert_eq!(tree.line(idx).unwrap(), line(3, 0, 7, 0));
        assert_eq!(
            tree.valid_parts(idx).unwrap().parts(),
            &[Part::new(Offset::new(0), Offset::new(4)).unwrap()]
        );
    }

    #[test]
    fn swap_and_delete_reports_relocated_index() {
        let mut tree = SegmentTree::new();
        let a = tree
            .add_segment(SegmentInfo::new(
                line(0, 0, 1, 0),
                SegmentPointType::ShadowPoint,
                SegmentPointType::ShadowPoint,
            ))
            .unwrap();
        tree.add_segment(SegmentInfo::new(
            line(0, 1, 1, 1),
            SegmentPointType::ShadowPoint,
            SegmentPointType::ShadowPoint,
        ))
        .unwrap();
        let relocated = tree.swap_and_delete_segment(a).unwrap();
        assert_eq!(relocated, Some(SegmentIndex::new(1)));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.line(a).unwrap(), line(0, 1, 1, 1));
    }

    #[test]
    fn merge_collinear_touching_segments() {
        let mut tree = SegmentTree::new();
        let a = tree
            .add_segment(SegmentInfo::new(
                line(0, 0, 5, 0),
                SegmentPointType::ShadowPoint,
                SegmentPointType::ShadowPoint,
            ))
            .unwrap();
        let b = tree
            .add_segment(SegmentInfo::new(
                line(5, 0, 10, 0),
                SegmentPointType::ShadowPoint,
                SegmentPointType::Output,
            ))
            .unwrap();
        tree.mark_valid(a, Part::new(Offset::new(0), Offset::new(5)).unwrap())
            .unwrap();
        tree.swap_and_merge_segment(a, b).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.line(a).unwrap(), line(0, 0, 10, 0));
        assert_eq!(tree.output_count().value(), 1);
        assert_eq!(
            tree.valid_parts(a).unwrap().parts(),
            &[Part::new(Offset::new(0), Offset::new(5)).unwrap()]
        );
    }

    #[test]
    fn connected_segments_mask_excludes_other_components() {
        let mut tree = SegmentTree::new();
        tree.add_segment(SegmentInfo::new(
            line(0, 0, 5, 0),
            SegmentPointType::ShadowPoint,
            SegmentPointType::ShadowPoint,
        ))
        .unwrap();
        tree.add_segment(SegmentInfo::new(
            line(20, 20, 25, 20),
            SegmentPointType::ShadowPoint,
            SegmentPointType::ShadowPoint,
        ))
        .unwrap();
        let mask = tree.calculate_connected_segments_mask(pt(0, 0)).unwrap();
        assert_eq!(mask, vec![true, false]);
    }

    #[test]
    fn normal_lines_and_valid_parts_partition_segment() {
        let mut tree = SegmentTree::new();
        let idx = tree
            .add_segment(SegmentInfo::new(
                line(0, 0, 10, 0),
                SegmentPointType::ShadowPoint,
                SegmentPointType::ShadowPoint,
            ))
            .unwrap();
        tree.mark_valid(idx, Part::new(Offset::new(3), Offset::new(7)).unwrap())
            .unwrap();
        let normals = tree.calculate_normal_lines();
        assert_eq!(normals, vec![line(0, 0, 3, 0), line(7, 0, 10, 0)]);
    }

    #[test]
    fn is_contiguous_tree_true_for_connected_acyclic_segments() {
        let mut tree = SegmentTree::new();
        tree.add_segment(SegmentInfo::new(
            line(0, 0, 5, 0),
            SegmentPointType::ShadowPoint,
            SegmentPointType::ShadowPoint,
        ))
        .unwrap();
        tree.add_segment(SegmentInfo::new(
            line(5, 0, 5, 5),
            SegmentPointType::ShadowPoint,
            SegmentPointType::ShadowPoint,
        ))
        .unwrap();
        assert!(tree.is_contiguous_tree());
    }

    #[test]
    fn is_contiguous_tree_false_for_disconnected_components() {
        let mut tree = SegmentTree::new();
        tree.add_segment(SegmentInfo::new(
            line(0, 0, 5, 0),
            SegmentPointType::ShadowPoint,
            SegmentPointType::ShadowPoint,
        ))
        .unwrap();
        tree.add_segment(SegmentInfo::new(
            line(20, 20, 25, 20),
            SegmentPointType::ShadowPoint,
            SegmentPointType::ShadowPoint,
        ))
        .unwrap();
        assert!(!tree.is_contiguous_tree());
    }

    #[test]
    fn is_contiguous_tree_false_for_a_loop() {
        let mut tree = SegmentTree::new();
        tree.add_segment(SegmentInfo::new(
            line(0, 0, 5, 0),
            SegmentPointType::ShadowPoint,
            SegmentPointType::ShadowPoint,
        ))
        .unwrap();
        tree.add_segment(SegmentInfo::new(
            line(5, 0, 5, 5),
            SegmentPointType::ShadowPoint,
            SegmentPointType::ShadowPoint,
        ))
        .unwrap();
        tree.add_segment(SegmentInfo::new(
            line(0, 5, 5, 5),
            SegmentPointType::ShadowPoint,
            SegmentPointType::ShadowPoint,
        ))
        .unwrap();
        tree.add_segment(SegmentInfo::new(
            line(0, 0, 0, 5),
            SegmentPointType::ShadowPoint,
            SegmentPointType::ShadowPoint,
        ))
        .unwrap();
        assert!(!tree.is_contiguous_tree());
    }

    #[test]
    fn is_contiguous_tree_true_for_empty_tree() {
        let tree = SegmentTree::new();
        assert!(tree.is_contiguous_tree());
    }

    #[test]
    fn normalize_is_idempotent_and_sorts_by_line() {
        let mut tree = SegmentTree::new();
        tree.add_segment(SegmentInfo::new(
            line(5, 0, 10, 0),
            SegmentPointType::ShadowPoint,
            SegmentPointType::ShadowPoint,
        ))
        .unwrap();
        tree.add_segment(SegmentInfo::new(
            line(0, 0, 5, 0),
            SegmentPointType::ShadowPoint,
            SegmentPointType::ShadowPoint,
        ))
        .unwrap();
        tree.normalize();
        let first_pass: Vec<_> = tree.indices().map(|i| tree.line(i).unwrap()).collect();
        assert_eq!(first_pass, vec![line(0, 0, 5, 0), line(5, 0, 10, 0)]);
        tree.normalize();
        let second_pass: Vec<_> = tree.indices().map(|i| tree.line(i).unwrap()).collect();
        assert_eq!(first_pass, second_pass);
    }
}
