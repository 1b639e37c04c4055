//! `Point -> CacheState` lookup consulted before every candidate insertion
//! (spec.md §4.4, §4.7.2 collision rule table).

use crate::allocated_size::AllocatedSize;
use ahash::AHashMap;
use circuit_types::{CacheState, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CollisionError {
    #[error("point already holds {existing:?}, cannot combine with {incoming:?}")]
    Collision {
        existing: CacheState,
        incoming: CacheState,
    },
}

#[derive(Debug, Clone, Default)]
pub struct CollisionIndex {
    by_point: AHashMap<Point, CacheState>,
}

impl CollisionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state_at(&self, point: Point) -> Option<CacheState> {
        self.by_point.get(&point).copied()
    }

    pub fn is_empty_at(&self, point: Point) -> bool {
        self.state_at(point).is_none()
    }

    pub fn set(&mut self, point: Point, state: CacheState) {
        self.by_point.insert(point, state);
    }

    pub fn clear(&mut self, point: Point) {
        self.by_point.remove(&point);
    }

    /// Consult the collision rule table (spec.md §4.7.2) for whether
    /// `incoming` may legally share `point` with whatever is already cached
    /// there, returning the combined state on success.
    pub fn check_and_combine(
        &self,
        point: Point,
        incoming: CacheState,
    ) -> Result<CacheState, CollisionError> {
        let Some(existing) = self.state_at(point) else {
            return Ok(incoming);
        };
        combine_states(existing, incoming).ok_or(CollisionError::Collision { existing, incoming })
    }

    pub fn len(&self) -> usize {
        self.by_point.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_point.is_empty()
    }
}

impl AllocatedSize for CollisionIndex {
    fn allocated_size(&self) -> usize {
        self.by_point.capacity() * (std::mem::size_of::<Point>() + std::mem::size_of::<CacheState>())
    }
}

fn combine_states(existing: CacheState, incoming: CacheState) -> Option<CacheState> {
    use CacheState::*;
    match (existing, incoming) {
        (a, b) if a == b => Some(a),
        (WireHorizontal, WireVertical) | (WireVertical, WireHorizontal) => Some(WireCrossing),
        (WireHorizontal, WireCornerPoint)
        | (WireVertical, WireCornerPoint)
        | (WireCornerPoint, WireHorizontal)
        | (WireCornerPoint, WireVertical) => Some(WireCornerPoint),
        (WireHorizontal, WireCrossPoint)
        | (WireVertical, WireCrossPoint)
        | (WireCrossPoint, WireHorizontal)
        | (WireCrossPoint, WireVertical) => Some(WireCrossPoint),
        (ElementConnection(a), WireConnection(b)) | (WireConnection(b), ElementConnection(a))
            if a == b =>
        {
            Some(ElementWireConnection)
        }
        (ElementBody, _) | (_, ElementBody) => None,
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use circuit_types::Grid;

    fn pt(x: i32, y: i32) -> Point {
        Point::new(Grid::new(x).unwrap(), Grid::new(y).unwrap())
    }

    #[test]
    fn empty_point_accepts_anything() {
        let index = CollisionIndex::new();
        assert_eq!(
            index.check_and_combine(pt(0, 0), CacheState::WireHorizontal),
            Ok(CacheState::WireHorizontal)
        );
    }

    #[test]
    fn crossing_wires_promote_to_wire_crossing() {
        let mut index = CollisionIndex::new();
        index.set(pt(0, 0), CacheState::WireHorizontal);
        assert_eq!(
            index.check_and_combine(pt(0, 0), CacheState::WireVertical),
            Ok(CacheState::WireCrossing)
        );
    }

    #[test]
    fn element_body_blocks_everything() {
        let mut index = CollisionIndex::new();
        index.set(pt(0, 0), CacheState::ElementBody);
        assert!(index
            .check_and_combine(pt(0, 0), CacheState::WireHorizontal)
            .is_err());
    }

    #[test]
    fn element_connection_with_wire_connection_becomes_element_wire_connection() {
        let mut index = CollisionIndex::new();
        index.set(pt(0, 0), CacheState::ElementConnection(circuit_types::Orientation::Horizontal));
        assert_eq!(
            index.check_and_combine(
                pt(0, 0),
                CacheState::WireConnection(circuit_types::Orientation::Horizontal)
            ),
            Ok(CacheState::ElementWireConnection)
        );
    }

    #[test]
    fn element_connection_with_incompatible_orientation_collides() {
        let mut index = CollisionIndex::new();
        index.set(pt(0, 0), CacheState::ElementConnection(circuit_types::Orientation::Horizontal));
        assert!(index
            .check_and_combine(
                pt(0, 0),
                CacheState::WireConnection(circuit_types::Orientation::Vertical)
            )
            .is_err());
    }
}
