//! Part-interval predicates and algebra. `Part` is a half-open offset
//! interval `[begin, end)`; every predicate here treats two intervals that
//! merely touch (`a.end == b.begin`) as disjoint, matching the source's
//! `part_selection::parts_not_touching` convention (touching parts are
//! coalesced by `PartSelection`, never left adjacent).

use circuit_types::Part;

/// `a` and `b` share no offsets, including the boundary case where one ends
/// exactly where the other begins.
pub fn a_disjoint_b(a: Part, b: Part) -> bool {
    a.end() <= b.begin() || b.end() <= a.begin()
}

pub fn a_equal_b(a: Part, b: Part) -> bool {
    a.begin() == b.begin() && a.end() == b.end()
}

/// `a` lies within `b`, endpoints may coincide.
pub fn a_inside_b(a: Part, b: Part) -> bool {
    b.begin() <= a.begin() && a.end() <= b.end()
}

/// `a` lies strictly within `b`, touching neither edge.
pub fn a_inside_b_not_touching(a: Part, b: Part) -> bool {
    b.begin() < a.begin() && a.end() < b.end()
}

pub fn a_inside_b_touching_begin(a: Part, b: Part) -> bool {
    a.begin() == b.begin() && a.end() < b.end()
}

pub fn a_inside_b_touching_end(a: Part, b: Part) -> bool {
    a.begin() > b.begin() && a.end() == b.end()
}

pub fn a_inside_b_touching_one_side(a: Part, b: Part) -> bool {
    a_inside_b_touching_begin(a, b) || a_inside_b_touching_end(a, b)
}

/// `a` overlaps the beginning of `b`: `a` starts at or before `b.begin` and
/// ends strictly inside `b` (not reaching `b.end`).
pub fn a_overlapps_b_begin(a: Part, b: Part) -> bool {
    a.begin() <= b.begin() && a.end() > b.begin() && a.end() < b.end()
}

/// `a` overlaps the end of `b`: `a` starts strictly inside `b` and reaches
/// or passes `b.end`.
pub fn a_overlapps_b_end(a: Part, b: Part) -> bool {
    a.begin() > b.begin() && a.begin() < b.end() && a.end() >= b.end()
}

pub fn a_overlapps_any_of_b(a: Part, b: Part) -> bool {
    !a_disjoint_b(a, b)
}

/// Intersection of two parts, `None` if disjoint (touching counts as empty).
pub fn intersect(a: Part, b: Part) -> Option<Part> {
    let begin = a.begin().max(b.begin());
    let end = a.end().min(b.end());
    if begin < end {
        Part::new(begin, end).ok()
    } else {
        None
    }
}

/// Remove `b` from `full_part`, assuming `b` touches exactly one side of
/// `full_part` (either `a_inside_b_touching_begin` or `_end` holds for `b`
/// inside `full_part`). Returns the single remaining part.
pub fn difference_touching_one_side(full_part: Part, b: Part) -> Part {
    if b.begin() == full_part.begin() {
        Part::new(b.end(), full_part.end()).expect("b strictly shorter than full_part")
    } else {
        Part::new(full_part.begin(), b.begin()).expect("b strictly shorter than full_part")
    }
}

/// Remove `b` from `full_part`, assuming `b` lies strictly inside
/// `full_part` touching neither edge. Returns the (before, after) parts.
pub fn difference_not_touching(full_part: Part, b: Part) -> (Part, Part) {
    let before = Part::new(full_part.begin(), b.begin()).expect("b starts after full_part begin");
    let after = Part::new(b.end(), full_part.end()).expect("b ends before full_part end");
    (before, after)
}

#[cfg(test)]
mod tests {
    use super::*;
    use circuit_types::Offset;

    fn p(a: u16, b: u16) -> Part {
        Part::new(Offset::new(a), Offset::new(b)).unwrap()
    }

    #[test]
    fn disjoint_includes_touching() {
        assert!(a_disjoint_b(p(0, 5), p(5, 10)));
        assert!(a_disjoint_b(p(5, 10), p(0, 5)));
        assert!(a_disjoint_b(p(0, 2), p(8, 10)));
        assert!(!a_disjoint_b(p(0, 6), p(5, 10)));
    }

    #[test]
    fn inside_variants() {
        assert!(a_inside_b(p(2, 5), p(0, 10)));
        assert!(a_inside_b_not_touching(p(2, 5), p(0, 10)));
        assert!(!a_inside_b_not_touching(p(0, 5), p(0, 10)));
        assert!(a_inside_b_touching_begin(p(0, 5), p(0, 10)));
        assert!(a_inside_b_touching_end(p(5, 10), p(0, 10)));
    }

    #[test]
    fn overlap_variants() {
        assert!(a_overlapps_b_begin(p(0, 5), p(3, 10)));
        assert!(a_overlapps_b_end(p(5, 12), p(0, 10)));
        assert!(!a_overlapps_b_begin(p(0, 3), p(3, 10)));
    }

    #[test]
    fn intersect_and_difference() {
        assert_eq!(intersect(p(0, 5), p(3, 10)), Some(p(3, 5)));
        assert_eq!(intersect(p(0, 5), p(5, 10)), None);

        assert_eq!(difference_touching_one_side(p(0, 10), p(0, 3)), p(3, 10));
        assert_eq!(difference_touching_one_side(p(0, 10), p(7, 10)), p(0, 7));

        assert_eq!(difference_not_touching(p(0, 10), p(3, 7)), (p(0, 3), p(7, 10)));
    }
}
