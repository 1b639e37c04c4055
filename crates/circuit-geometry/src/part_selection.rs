//! `PartSelection`: a sorted, non-overlapping, non-touching list of `Part`
//! intervals. Used by `SegmentTree` to track which sub-ranges of a segment
//! are in the `valid` display state, and by `Selection` to track which
//! sub-ranges of a segment are selected.

use crate::predicates::{
    a_disjoint_b, a_inside_b, a_inside_b_not_touching, a_overlapps_b_begin, a_overlapps_b_end,
};
use circuit_types::{Part, PartCopyDefinition};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PartSelectionError {
    #[error("copy definition source/destination length mismatch: source {source}, destination {destination}")]
    LengthMismatch { source: Part, destination: Part },
}

/// Invariant: `parts` is sorted by `begin`, no two parts overlap, and no two
/// parts touch (`parts[i].end != parts[i + 1].begin` — touching neighbours
/// are always coalesced by [`PartSelection::add_part`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartSelection {
    parts: Vec<Part>,
}

impl fmt::Display for PartSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<part_selection {:?}>", self.parts)
    }
}

impl PartSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_part(part: Part) -> Self {
        Self { parts: vec![part] }
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Total offset coverage across all parts.
    pub fn total_length(&self) -> u32 {
        self.parts.iter().map(|p| p.distance() as u32).sum()
    }

    fn check_invariants(&self) {
        debug_assert!(self.parts.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(self
            .parts
            .windows(2)
            .all(|w| w[0].end() < w[1].begin()));
    }

    /// Add `part`, merging with any touching or overlapping neighbours so
    /// the canonical form is restored.
    pub fn add_part(&mut self, part: Part) {
        self.parts.push(part);
        sort_and_merge(&mut self.parts);
        self.check_invariants();
    }

    /// Remove `removing` from the selection, splitting, shrinking, or
    /// dropping existing parts as needed.
    pub fn remove_part(&mut self, removing: Part) {
        let mut require_sort = false;
        let mut i = self.parts.len();
        while i > 0 {
            i -= 1;
            let part = self.parts[i];

            if a_disjoint_b(removing, part) {
                // no overlap -> keep as is
            } else if a_inside_b_not_touching(removing, part) {
                // removing splits part into two
                self.parts[i] =
                    Part::new(part.begin(), removing.begin()).expect("begin < removing.begin by precondition");
                self.parts.push(
                    Part::new(removing.end(), part.end())
                        .expect("removing.end < part.end by precondition"),
                );
                require_sort = true;
            } else if a_inside_b(part, removing) {
                // removing completely covers part -> drop via swap-remove
                self.parts.swap_remove(i);
                require_sort = true;
            } else if a_overlapps_b_begin(removing, part) {
                self.parts[i] = Part::new(removing.end(), part.end())
                    .expect("removing overlaps only the beginning of part");
            } else if a_overlapps_b_end(removing, part) {
                self.parts[i] = Part::new(part.begin(), removing.begin())
                    .expect("removing overlaps only the end of part");
            } else {
                unreachable!("part predicate set is exhaustive for two half-open intervals");
            }
        }

        if require_sort {
            self.parts.sort();
        }
        self.check_invariants();
    }

    /// Copy parts found in `src` (a foreign selection) that fall inside
    /// `copy_def.source`, shifted into `copy_def.destination`, into `self`.
    /// `copy_def.source` and `copy_def.destination` must have equal length.
    pub fn copy_parts(
        &mut self,
        src: &PartSelection,
        copy_def: PartCopyDefinition,
    ) -> Result<(), PartSelectionError> {
        if copy_def.source.distance() != copy_def.destination.distance() {
            return Err(PartSelectionError::LengthMismatch {
                source: copy_def.source,
                destination: copy_def.destination,
            });
        }
        let shift = copy_def.destination.begin().value() as i32 - copy_def.source.begin().value() as i32;

        for &p in &src.parts {
            if let Some(clipped) = crate::predicates::intersect(p, copy_def.source) {
                let new_begin = (clipped.begin().value() as i32 + shift) as u16;
                let new_end = (clipped.end().value() as i32 + shift) as u16;
                let shifted = Part::new(new_begin.into(), new_end.into())
                    .expect("shifting preserves begin < end");
                self.add_part(shifted);
            }
        }
        Ok(())
    }

    /// Move parts found in `src` within `copy_def.source` into `self` at
    /// `copy_def.destination`, removing them from `src`.
    pub fn move_parts(
        &mut self,
        src: &mut PartSelection,
        copy_def: PartCopyDefinition,
    ) -> Result<(), PartSelectionError> {
        self.copy_parts(src, copy_def)?;
        src.remove_part(copy_def.source);
        Ok(())
    }

    /// The complement of this selection within `full_part`, as a canonical
    /// `PartSelection` (used by `SegmentTree::calculate_normal_lines`).
    pub fn inverted_selection(&self, full_part: Part) -> PartSelection {
        let mut result = PartSelection::new();
        let mut cursor = full_part.begin();
        for &p in &self.parts {
            if let Some(clipped) = crate::predicates::intersect(p, full_part) {
                if cursor < clipped.begin() {
                    result.add_part(Part::new(cursor, clipped.begin()).expect("cursor < clipped.begin"));
                }
                cursor = clipped.end().max(cursor);
            }
        }
        if cursor < full_part.end() {
            result.add_part(Part::new(cursor, full_part.end()).expect("cursor < full_part.end"));
        }
        result
    }
}

fn sort_and_merge(parts: &mut Vec<Part>) {
    if parts.is_empty() {
        return;
    }
    parts.sort();
    let mut write = 0;
    for read in 1..parts.len() {
        let candidate = parts[read];
        let current = parts[write];
        if current.end() >= candidate.begin() {
            let merged_end = current.end().max(candidate.end());
            parts[write] = Part::new(current.begin(), merged_end).expect("merge keeps begin < end");
        } else {
            write += 1;
            parts[write] = candidate;
        }
    }
    parts.truncate(write + 1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use circuit_types::Offset;

    fn p(a: u16, b: u16) -> Part {
        Part::new(Offset::new(a), Offset::new(b)).unwrap()
    }

    #[test]
    fn add_part_merges_touching() {
        let mut sel = PartSelection::new();
        sel.add_part(p(0, 5));
        sel.add_part(p(5, 10));
        assert_eq!(sel.parts(), &[p(0, 10)]);
    }

    #[test]
    fn add_part_merges_overlapping() {
        let mut sel = PartSelection::new();
        sel.add_part(p(0, 6));
        sel.add_part(p(4, 10));
        assert_eq!(sel.parts(), &[p(0, 10)]);
    }

    #[test]
    fn add_part_keeps_disjoint_parts_separate() {
        let mut sel = PartSelection::new();
        sel.add_part(p(0, 3));
        sel.add_part(p(8, 10));
        assert_eq!(sel.parts(), &[p(0, 3), p(8, 10)]);
    }

    #[test]
    fn remove_part_splits_strictly_inside() {
        let mut sel = PartSelection::new();
        sel.add_part(p(0, 10));
        sel.remove_part(p(3, 7));
        assert_eq!(sel.parts(), &[p(0, 3), p(7, 10)]);
    }

    #[test]
    fn remove_part_shrinks_begin_and_end() {
        let mut sel = PartSelection::new();
        sel.add_part(p(0, 10));
        sel.remove_part(p(0, 3));
        assert_eq!(sel.parts(), &[p(3, 10)]);

        let mut sel = PartSelection::new();
        sel.add_part(p(0, 10));
        sel.remove_part(p(7, 10));
        assert_eq!(sel.parts(), &[p(0, 7)]);
    }

    #[test]
    fn remove_part_drops_fully_covered() {
        let mut sel = PartSelection::new();
        sel.add_part(p(3, 7));
        sel.remove_part(p(0, 10));
        assert!(sel.is_empty());
    }

    #[test]
    fn remove_part_no_op_when_disjoint() {
        let mut sel = PartSelection::new();
        sel.add_part(p(0, 3));
        sel.remove_part(p(5, 8));
        assert_eq!(sel.parts(), &[p(0, 3)]);
    }

    #[test]
    fn add_then_remove_disjoint_is_identity() {
        let mut sel = PartSelection::new();
        sel.add_part(p(0, 3));
        let before = sel.clone();
        sel.add_part(p(10, 15));
        sel.remove_part(p(10, 15));
        assert_eq!(sel, before);
    }

    #[test]
    fn copy_parts_shifts_into_destination() {
        let mut src = PartSelection::new();
        src.add_part(p(3, 5)); // right half of a 0..5 segment

        let mut dst = PartSelection::new();
        dst.add_part(p(0, 2)); // left half of a 5..10 segment, pre-existing

        let copy_def = PartCopyDefinition {
            destination: p(5, 10),
            source: p(0, 5),
        };
        dst.copy_parts(&src, copy_def).unwrap();
        // source [3,5) shifted by +5 -> [8,10); merges with nothing (disjoint from [5,7))
        assert_eq!(dst.parts(), &[p(5, 7), p(8, 10)]);
    }

    #[test]
    fn merge_scenario_from_spec_selection_tracking() {
        // Selection on the right half of A (0,0)->(5,0), part [3,5)
        let mut a = PartSelection::new();
        a.add_part(p(3, 5));
        // Selection on the left half of B (5,0)->(10,0), part [0,2)
        let mut b = PartSelection::new();
        b.add_part(p(0, 2));

        // Merging A and B into one 10-unit line: A keeps offsets [0,5), B's
        // [0,5) range maps to the merged [5,10) range.
        let mut merged = PartSelection::new();
        merged.copy_parts(&a, PartCopyDefinition { destination: p(0, 5), source: p(0, 5) }).unwrap();
        merged.copy_parts(&b, PartCopyDefinition { destination: p(5, 10), source: p(0, 5) }).unwrap();

        assert_eq!(merged.parts(), &[p(3, 7)]);
        let _ = a.remove_part(p(3, 5));
        let _ = b.remove_part(p(0, 2));
    }

    #[test]
    fn inverted_selection_is_complement() {
        let mut sel = PartSelection::new();
        sel.add_part(p(2, 4));
        sel.add_part(p(6, 8));
        let inv = sel.inverted_selection(p(0, 10));
        assert_eq!(inv.parts(), &[p(0, 2), p(4, 6), p(8, 10)]);
    }

    proptest::proptest! {
        #[test]
        fn total_length_plus_complement_equals_full(a in 0u16..20, b in 0u16..20) {
            let (lo, hi) = if a < b { (a, b) } else if a > b { (b, a) } else { return Ok(()); };
            let full = p(0, 30);
            let mut sel = PartSelection::new();
            sel.add_part(p(lo, hi));
            let inv = sel.inverted_selection(full);
            prop_assert_eq!(sel.total_length() + inv.total_length(), full.distance() as u32);
        }
    }
}
