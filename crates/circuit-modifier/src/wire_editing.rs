//! Segment-level helpers shared by the wire insertion-mode primitives
//! (spec.md §4.7.2). Grounded on `edit_wire_detail.h`'s function
//! decomposition (`split_line_segment`, `merge_line_segments`,
//! `update_segment_point_types`) and on `circuit-layout`'s own
//! `SegmentTree` (whose `merge_collinear_touching` and
//! `merged_endpoint_types` are private to that crate, so the same checks
//! are reimplemented here against the public `OrderedLine` API).

use circuit_geometry::{
    a_inside_b_not_touching, a_inside_b_touching_begin, a_inside_b_touching_end,
    difference_not_touching, difference_touching_one_side, to_line,
};
use circuit_index::{LogicItemInputIndex, LogicItemOutputIndex};
use circuit_layout::{SegmentInfo, SegmentTree};
use circuit_types::{Orientation, OrderedLine, Part, Point, SegmentIndex, SegmentPointType};

use crate::error::ModifierError;

/// Every grid point the line passes through, `p0` through `p1` inclusive.
pub fn collect_line_points(line: OrderedLine) -> Vec<Point> {
    let p0 = line.p0();
    let p1 = line.p1();
    let mut points = Vec::new();
    match line.orientation() {
        Orientation::Horizontal => {
            let mut x = p0.x.value();
            while x <= p1.x.value() {
                points.push(Point::new(circuit_types::Grid::new(x).expect("within line bounds"), p0.y));
                x += 1;
            }
        }
        Orientation::Vertical => {
            let mut y = p0.y.value();
            while y <= p1.y.value() {
                points.push(Point::new(p0.x, circuit_types::Grid::new(y).expect("within line bounds")));
                y += 1;
            }
        }
    }
    points
}

/// Same-orientation, collinear, and sharing exactly one endpoint — the
/// condition under which two segments can be merged into one
/// (`SegmentTree::swap_and_merge_segment`'s own precondition, reimplemented
/// here since the original check is private to `circuit-layout`).
pub fn are_collinear_touching(a: OrderedLine, b: OrderedLine) -> bool {
    if a.orientation() != b.orientation() {
        return false;
    }
    let collinear = match a.orientation() {
        Orientation::Horizontal => a.p0().y == b.p0().y,
        Orientation::Vertical => a.p0().x == b.p0().x,
    };
    collinear
        && (a.p0() == b.p0() || a.p0() == b.p1() || a.p1() == b.p0() || a.p1() == b.p1())
}

/// Carve `target_part` (in `idx`'s current local offset frame) out of
/// `idx`, leaving it occupying exactly `target_part` and appending new
/// segments for whatever leading and/or trailing residual remains.
/// Returns the index of the segment now covering `target_part` (`idx`
/// itself is reused for the kept part; only the residuals are new).
///
/// `SegmentTree::copy_segment` cannot be used for the residuals since it
/// takes the source tree by a second, immutable borrow — unusable when
/// source and destination are the same tree. The residuals are therefore
/// built by hand and appended directly.
pub fn isolate_segment_part(
    tree: &mut SegmentTree,
    idx: SegmentIndex,
    target_part: Part,
) -> Result<SegmentIndex, ModifierError> {
    let full_part = tree.part(idx)?;
    if full_part == target_part {
        return Ok(idx);
    }
    if !circuit_geometry::a_inside_b(target_part, full_part) {
        return Err(ModifierError::PartOutOfBounds);
    }

    let info = tree.info(idx)?;
    let valid = tree.valid_parts(idx)?.clone();

    let (before, after) = if a_inside_b_touching_begin(target_part, full_part) {
        (None, Some(difference_touching_one_side(full_part, target_part)))
    } else if a_inside_b_touching_end(target_part, full_part) {
        (Some(difference_touching_one_side(full_part, target_part)), None)
    } else if a_inside_b_not_touching(target_part, full_part) {
        let (b, a) = difference_not_touching(full_part, target_part);
        (Some(b), Some(a))
    } else {
        return Err(ModifierError::PartOutOfBounds);
    };

    for residual in [before, after].into_iter().flatten() {
        append_residual(tree, &info, &valid, residual)?;
    }

    tree.shrink_segment(idx, target_part)?;
    let new_line = tree.line(idx)?;
    let p0_type = if before.is_some() {
        SegmentPointType::ShadowPoint
    } else {
        info.p0_type
    };
    let p1_type = if after.is_some() {
        SegmentPointType::ShadowPoint
    } else {
        info.p1_type
    };
    tree.update_segment(idx, SegmentInfo::new(new_line, p0_type, p1_type))?;
    Ok(idx)
}

fn append_residual(
    tree: &mut SegmentTree,
    original: &SegmentInfo,
    original_valid: &circuit_geometry::PartSelection,
    residual: Part,
) -> Result<SegmentIndex, ModifierError> {
    let residual_line = to_line(original.line, residual);
    let is_leading = residual.begin().value() == 0;
    let (p0_type, p1_type) = if is_leading {
        (original.p0_type, SegmentPointType::ShadowPoint)
    } else {
        (SegmentPointType::ShadowPoint, original.p1_type)
    };
    let new_idx = tree.add_segment(SegmentInfo::new(residual_line, p0_type, p1_type))?;

    for part in original_valid.parts() {
        if let Some(clipped) = circuit_geometry::intersect(*part, residual) {
            let shifted_begin = clipped.begin().value() - residual.begin().value();
            let shifted_end = clipped.end().value() - residual.begin().value();
            let shifted = Part::new(
                circuit_types::Offset::new(shifted_begin),
                circuit_types::Offset::new(shifted_end),
            )
            .expect("clipped lies within residual");
            tree.mark_valid(new_idx, shifted)?;
        }
    }
    Ok(new_idx)
}

/// The endpoint-type fixup rule table (spec.md §4.7.2): at `point`, the
/// segments of `tree` touching that point are reclassified as exactly one
/// `Input`/`Output` (if `point` is a connector of some logic item), or
/// otherwise by how many segments meet there and whether they are
/// collinear:
///
/// - one segment: `ShadowPoint`.
/// - two segments, collinear: `ShadowPoint` on both (the caller is expected
///   to merge them; this function only classifies, since merging would
///   invalidate segment indices mid-computation — see `regularize_point`).
/// - two segments, not collinear: `CornerPoint` on both.
/// - three segments: the two that are collinear with each other (the
///   "through line") get `CrossPoint`; the remaining one (the "stub") gets
///   `ShadowPoint`.
/// - four segments: `CrossPoint` on all four.
///
/// Returns the indices whose endpoint type changed. Never merges segments.
pub fn fix_endpoints_at(
    tree: &mut SegmentTree,
    point: Point,
    logic_item_outputs: &LogicItemOutputIndex,
    logic_item_inputs: &LogicItemInputIndex,
) -> Result<Vec<SegmentIndex>, ModifierError> {
    let touching: Vec<(SegmentIndex, bool)> = tree
        .indices()
        .filter_map(|i| {
            let line = tree.line(i).ok()?;
            if line.p0() == point {
                Some((i, true))
            } else if line.p1() == point {
                Some((i, false))
            } else {
                None
            }
        })
        .collect();

    if touching.is_empty() {
        return Ok(Vec::new());
    }

    let new_types: Vec<SegmentPointType> = if logic_item_outputs.get(point).is_some() {
        vec![SegmentPointType::Output; touching.len()]
    } else if logic_item_inputs.get(point).is_some() {
        vec![SegmentPointType::Input; touching.len()]
    } else {
        match touching.len() {
            1 => vec![SegmentPointType::ShadowPoint],
            2 => {
                let a = tree.line(touching[0].0)?;
                let b = tree.line(touching[1].0)?;
                if are_collinear_touching(a, b) {
                    vec![SegmentPointType::ShadowPoint; 2]
                } else {
                    vec![SegmentPointType::CornerPoint; 2]
                }
            }
            3 => {
                let lines: Vec<OrderedLine> = touching
                    .iter()
                    .map(|&(i, _)| tree.line(i))
                    .collect::<Result<_, _>>()?;
                let mut types = vec![SegmentPointType::ShadowPoint; 3];
                'through_line: for i in 0..3 {
                    for j in (i + 1)..3 {
                        if are_collinear_touching(lines[i], lines[j]) {
                            types[i] = SegmentPointType::CrossPoint;
                            types[j] = SegmentPointType::CrossPoint;
                            break 'through_line;
                        }
                    }
                }
                types
            }
            _ => vec![SegmentPointType::CrossPoint; touching.len()],
        }
    };

    let mut changed = Vec::new();
    for ((idx, is_p0), new_type) in touching.iter().zip(new_types) {
        let info = tree.info(*idx)?;
        let (p0_type, p1_type) = if *is_p0 {
            (new_type, info.p1_type)
        } else {
            (info.p0_type, new_type)
        };
        if p0_type != info.p0_type || p1_type != info.p1_type {
            tree.update_segment(*idx, SegmentInfo::new(info.line, p0_type, p1_type))?;
            changed.push(*idx);
        }
    }
    Ok(changed)
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
    fn collect_line_points_spans_horizontal_line() {
        let points = collect_line_points(line(0, 0, 3, 0));
        assert_eq!(points, vec![pt(0, 0), pt(1, 0), pt(2, 0), pt(3, 0)]);
    }

    #[test]
    fn collinear_touching_detects_shared_endpoint() {
        assert!(are_collinear_touching(line(0, 0, 5, 0), line(5, 0, 10, 0)));
        assert!(!are_collinear_touching(line(0, 0, 5, 0), line(6, 0, 10, 0)));
        assert!(!are_collinear_touching(line(0, 0, 5, 0), line(0, 0, 0, 5)));
    }

    fn empty_indices() -> (LogicItemOutputIndex, LogicItemInputIndex) {
        (LogicItemOutputIndex::new(), LogicItemInputIndex::new())
    }

    #[test]
    fn fix_endpoints_corner_point_for_two_orthogonal_segments() {
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
        let (outputs, inputs) = empty_indices();
        fix_endpoints_at(&mut tree, pt(5, 0), &outputs, &inputs).unwrap();
        assert_eq!(tree.info(SegmentIndex::new(0)).unwrap().p1_type, SegmentPointType::CornerPoint);
        assert_eq!(tree.info(SegmentIndex::new(1)).unwrap().p0_type, SegmentPointType::CornerPoint);
    }

    #[test]
    fn fix_endpoints_shadow_point_for_two_collinear_segments() {
        let mut tree = SegmentTree::new();
        tree.add_segment(SegmentInfo::new(
            line(0, 0, 5, 0),
            SegmentPointType::ShadowPoint,
            SegmentPointType::ShadowPoint,
        ))
        .unwrap();
        tree.add_segment(SegmentInfo::new(
            line(5, 0, 10, 0),
            SegmentPointType::ShadowPoint,
            SegmentPointType::ShadowPoint,
        ))
        .unwrap();
        let (outputs, inputs) = empty_indices();
        fix_endpoints_at(&mut tree, pt(5, 0), &outputs, &inputs).unwrap();
        assert_eq!(tree.info(SegmentIndex::new(0)).unwrap().p1_type, SegmentPointType::ShadowPoint);
        assert_eq!(tree.info(SegmentIndex::new(1)).unwrap().p0_type, SegmentPointType::ShadowPoint);
    }

    #[test]
    fn fix_endpoints_cross_point_on_through_line_shadow_on_stub() {
        let mut tree = SegmentTree::new();
        tree.add_segment(SegmentInfo::new(
            line(0, 0, 5, 0),
            SegmentPointType::ShadowPoint,
            SegmentPointType::ShadowPoint,
        ))
        .unwrap();
        tree.add_segment(SegmentInfo::new(
            line(5, 0, 10, 0),
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
        let (outputs, inputs) = empty_indices();
        fix_endpoints_at(&mut tree, pt(5, 0), &outputs, &inputs).unwrap();
        assert_eq!(tree.info(SegmentIndex::new(0)).unwrap().p1_type, SegmentPointType::CrossPoint);
        assert_eq!(tree.info(SegmentIndex::new(1)).unwrap().p0_type, SegmentPointType::CrossPoint);
        assert_eq!(tree.info(SegmentIndex::new(2)).unwrap().p0_type, SegmentPointType::ShadowPoint);
    }

    #[test]
    fn isolate_segment_part_splits_middle_out() {
        let mut tree = SegmentTree::new();
        let idx = tree
            .add_segment(SegmentInfo::new(
                line(0, 0, 10, 0),
                SegmentPointType::ShadowPoint,
                SegmentPointType::ShadowPoint,
            ))
            .unwrap();
        let middle = Part::new(Offset::new(3), Offset::new(7)).unwrap();
        let kept = isolate_segment_part(&mut tree, idx, middle).unwrap();
        assert_eq!(tree.line(kept).unwrap(), line(3, 0, 7, 0));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn isolate_segment_part_touching_begin_leaves_one_residual() {
        let mut tree = SegmentTree::new();
        let idx = tree
            .add_segment(SegmentInfo::new(
                line(0, 0, 10, 0),
                SegmentPointType::ShadowPoint,
                SegmentPointType::ShadowPoint,
            ))
            .unwrap();
        let leading = Part::new(Offset::new(0), Offset::new(4)).unwrap();
        let kept = isolate_segment_part(&mut tree, idx, leading).unwrap();
        assert_eq!(tree.line(kept).unwrap(), line(0, 0, 4, 0));
        assert_eq!(tree.len(), 2);
    }
}
