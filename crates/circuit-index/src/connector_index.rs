//! Point → connector lookup tables (spec.md §4.4): given a grid point,
//! resolve which logic-item or wire connector, if any, lives there. Four
//! independent maps rather than one tagged union, mirroring the source's
//! separate input/output caches per owner kind.

use ahash::AHashMap;
use circuit_types::{LogicItemId, Orientation, Point, SegmentIndex, WireId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LogicItemConnectorEntry {
    pub logic_item_id: LogicItemId,
    pub connector_id: u8,
    pub orientation: Orientation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WireConnectorEntry {
    pub wire_id: WireId,
    pub segment_index: SegmentIndex,
    pub orientation: Orientation,
}

macro_rules! connector_index {
    ($name:ident, $entry:ty) => {
        #[derive(Debug, Clone, Default)]
        pub struct $name {
            by_point: AHashMap<Point, $entry>,
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            pub fn get(&self, point: Point) -> Option<$entry> {
                self.by_point.get(&point).copied()
            }

            pub fn insert(&mut self, point: Point, entry: $entry) {
                self.by_point.insert(point, entry);
            }

            pub fn remove(&mut self, point: Point) {
                self.by_point.remove(&point);
            }

            pub fn is_empty(&self) -> bool {
                self.by_point.is_empty()
            }

            pub fn len(&self) -> usize {
                self.by_point.len()
            }

            pub fn iter(&self) -> impl Iterator<Item = (Point, $entry)> + '_ {
                self.by_point.iter().map(|(&p, &e)| (p, e))
            }
        }

        impl crate::allocated_size::AllocatedSize for $name {
            fn allocated_size(&self) -> usize {
                self.by_point.capacity()
                    * (std::mem::size_of::<Point>() + std::mem::size_of::<$entry>())
            }
        }
    };
}

connector_index!(LogicItemInputIndex, LogicItemConnectorEntry);
connector_index!(LogicItemOutputIndex, LogicItemConnectorEntry);
connector_index!(WireInputIndex, WireConnectorEntry);
connector_index!(WireOutputIndex, WireConnectorEntry);
