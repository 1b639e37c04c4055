//! Conversions between `OrderedLine` positions and `Part` offsets.

use circuit_types::{Offset, OrderedLine, Part, Point};

/// The full part spanning an entire line, `[0, length)`.
pub fn to_part(full_line: OrderedLine) -> Part {
    Part::new(Offset::new(0), Offset::new(full_line.length() as u16))
        .expect("a non-degenerate OrderedLine always has positive length")
}

/// Express `line` (a sub-segment of `full_line`, same orientation, same
/// containing infinite line) as a `Part` of `full_line`.
pub fn to_part_from_line(full_line: OrderedLine, line: OrderedLine) -> Part {
    let origin = full_line.p0();
    let (b0, b1) = match full_line.orientation() {
        circuit_types::Orientation::Horizontal => (
            (line.p0().x.value() - origin.x.value()) as u16,
            (line.p1().x.value() - origin.x.value()) as u16,
        ),
        circuit_types::Orientation::Vertical => (
            (line.p0().y.value() - origin.y.value()) as u16,
            (line.p1().y.value() - origin.y.value()) as u16,
        ),
    };
    Part::new(Offset::new(b0), Offset::new(b1)).expect("sub-line lies within full_line")
}

/// The inverse of [`to_part_from_line`]: recover the grid line covered by
/// `part` of `full_line`.
pub fn to_line(full_line: OrderedLine, part: Part) -> OrderedLine {
    let origin = full_line.p0();
    let (p0, p1) = match full_line.orientation() {
        circuit_types::Orientation::Horizontal => (
            Point::new(
                origin.x.checked_add(part.begin().value() as i32).unwrap(),
                origin.y,
            ),
            Point::new(
                origin.x.checked_add(part.end().value() as i32).unwrap(),
                origin.y,
            ),
        ),
        circuit_types::Orientation::Vertical => (
            Point::new(
                origin.x,
                origin.y.checked_add(part.begin().value() as i32).unwrap(),
            ),
            Point::new(
                origin.x,
                origin.y.checked_add(part.end().value() as i32).unwrap(),
            ),
        ),
    };
    OrderedLine::new(p0, p1).expect("part lies within full_line, preserving orientation")
}

/// `true` if `point` lies on `full_line` at all (used to locate an
/// endpoint's offset before building a `Part`).
pub fn offset_of_point(full_line: OrderedLine, point: Point) -> Option<Offset> {
    let origin = full_line.p0();
    match full_line.orientation() {
        circuit_types::Orientation::Horizontal => {
            if point.y != origin.y {
                return None;
            }
            let offset = point.x.value() - origin.x.value();
            (0..=full_line.length()).contains(&offset).then(|| Offset::new(offset as u16))
        }
        circuit_types::Orientation::Vertical => {
            if point.x != origin.x {
                return None;
            }
            let offset = point.y.value() - origin.y.value();
            (0..=full_line.length()).contains(&offset).then(|| Offset::new(offset as u16))
        }
    }
}
