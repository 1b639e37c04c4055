//! Axis-aligned bounding rectangles, integer and fine-grid variants. Fine
//! rectangles are what the `SpatialIndex` (in `circuit-index`) actually
//! stores; the integer variant is what `Layout` caches per item.

use circuit_types::{Grid, GridFine, Point, PointFine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub p0: Point,
    pub p1: Point,
}

impl Rect {
    pub fn new(p0: Point, p1: Point) -> Self {
        let (x0, x1) = if p0.x <= p1.x { (p0.x, p1.x) } else { (p1.x, p0.x) };
        let (y0, y1) = if p0.y <= p1.y { (p0.y, p1.y) } else { (p1.y, p0.y) };
        Rect {
            p0: Point::new(x0, y0),
            p1: Point::new(x1, y1),
        }
    }

    pub fn single_point(p: Point) -> Self {
        Rect { p0: p, p1: p }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.p0.x <= other.p1.x
            && other.p0.x <= self.p1.x
            && self.p0.y <= other.p1.y
            && other.p0.y <= self.p1.y
    }

    pub fn contains_point(&self, p: Point) -> bool {
        self.p0.x <= p.x && p.x <= self.p1.x && self.p0.y <= p.y && p.y <= self.p1.y
    }

    pub fn union(&self, other: &Rect) -> Rect {
        let min = |a: Grid, b: Grid| if a <= b { a } else { b };
        let max = |a: Grid, b: Grid| if a >= b { a } else { b };
        Rect {
            p0: Point::new(min(self.p0.x, other.p0.x), min(self.p0.y, other.p0.y)),
            p1: Point::new(max(self.p1.x, other.p1.x), max(self.p1.y, other.p1.y)),
        }
    }

    /// Expand by half a grid unit on every side, producing the fine
    /// rectangle used as an R-tree payload bounding box (spec.md §4.4).
    pub fn to_fine_padded(&self) -> RectFine {
        RectFine {
            p0: PointFine {
                x: GridFine(self.p0.x.value() as f64 - 0.5),
                y: GridFine(self.p0.y.value() as f64 - 0.5),
            },
            p1: PointFine {
                x: GridFine(self.p1.x.value() as f64 + 0.5),
                y: GridFine(self.p1.y.value() as f64 + 0.5),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectFine {
    pub p0: PointFine,
    pub p1: PointFine,
}

#[cfg(test)]
mod tests {
    use super::*;
    use circuit_types::Grid;

    fn pt(x: i32, y: i32) -> Point {
        Point::new(Grid::new(x).unwrap(), Grid::new(y).unwrap())
    }

    #[test]
    fn intersects_detects_touching_and_separated() {
        let a = Rect::new(pt(0, 0), pt(5, 5));
        let b = Rect::new(pt(5, 0), pt(10, 5));
        let c = Rect::new(pt(6, 0), pt(10, 5));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn fine_padding_expands_half_unit() {
        let r = Rect::single_point(pt(2, 3));
        let fine = r.to_fine_padded();
        assert_eq!(fine.p0.x.0, 1.5);
        assert_eq!(fine.p1.x.0, 2.5);
    }
}
