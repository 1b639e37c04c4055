//! Strong id types. Every id is a dense, non-owning handle into the table
//! that created it; none of them carry a generation counter (layout ids are
//! kept dense via swap-and-delete and compared against the owning table by
//! callers, not self-validated).

use crate::part::Part;
use std::fmt;

macro_rules! dense_id {
    ($name:ident, $repr:ty) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name($repr);

        impl $name {
            pub const fn new(value: $repr) -> Self {
                $name(value)
            }

            pub const fn value(self) -> $repr {
                self.0
            }

            /// Increment, failing instead of wrapping once the id space is
            /// exhausted (spec §7: "incrementing an id at MAX").
            pub fn checked_next(self) -> Option<Self> {
                self.0.checked_add(1).map($name)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

dense_id!(LogicItemId, u32);
dense_id!(DecorationId, u32);
dense_id!(WireId, u32);
dense_id!(SegmentIndex, u32);
dense_id!(SelectionId, u64);

/// Wire ids below this value are reserved and never hold an *inserted* wire.
pub const TEMPORARY_WIRE_ID: WireId = WireId::new(0);
pub const COLLIDING_WIRE_ID: WireId = WireId::new(1);
pub const FIRST_INSERTED_WIRE_ID: WireId = WireId::new(2);

impl WireId {
    pub fn is_temporary(self) -> bool {
        self == TEMPORARY_WIRE_ID
    }
    pub fn is_colliding(self) -> bool {
        self == COLLIDING_WIRE_ID
    }
    /// Inserted wires use the remaining id space (`id >= first_inserted_wire_id`).
    pub fn is_inserted_candidate(self) -> bool {
        self.value() >= FIRST_INSERTED_WIRE_ID.value()
    }
}

/// Identifies one segment within a wire's `SegmentTree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Segment {
    pub wire_id: WireId,
    pub segment_index: SegmentIndex,
}

impl Segment {
    pub fn new(wire_id: WireId, segment_index: SegmentIndex) -> Self {
        Self {
            wire_id,
            segment_index,
        }
    }
}

/// A [`Segment`] together with a sub-range `Part` selecting part of its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentPart {
    pub segment: Segment,
    pub part: Part,
}

impl SegmentPart {
    pub fn new(segment: Segment, part: Part) -> Self {
        Self { segment, part }
    }
}

/// A copy/move definition: shift parts found in `source` so they land in
/// `destination`. The two ranges must have equal length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartCopyDefinition {
    pub destination: Part,
    pub source: Part,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_wire_ids_are_not_insertable() {
        assert!(!TEMPORARY_WIRE_ID.is_inserted_candidate());
        assert!(!COLLIDING_WIRE_ID.is_inserted_candidate());
        assert!(FIRST_INSERTED_WIRE_ID.is_inserted_candidate());
    }

    #[test]
    fn checked_next_fails_at_max() {
        let id = LogicItemId::new(u32::MAX);
        assert!(id.checked_next().is_none());
    }
}
