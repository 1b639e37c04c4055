//! `HistoryEntry`: one undoable primitive, tagged with enough data to
//! reconstruct its inverse without consulting the layout (spec.md §4.7.1).
//! `Modifier` pushes one of these per primitive it applies; undoing a group
//! means replaying the entries' inverses in reverse order.

use circuit_geometry::PartSelection;
use circuit_layout::{DecorationData, LogicItemData, SegmentInfo};
use circuit_types::{DecorationId, InsertionMode, LogicItemId, Point, Segment, SegmentIndex, WireId};

#[derive(Debug, Clone, PartialEq)]
pub enum HistoryEntry {
    CreateLogicItem {
        id: LogicItemId,
        data: LogicItemData,
    },
    DeleteLogicItem {
        id: LogicItemId,
        data: LogicItemData,
    },
    MoveLogicItem {
        id: LogicItemId,
        from: Point,
        to: Point,
    },
    ChangeLogicItemInsertionMode {
        id: LogicItemId,
        from: InsertionMode,
        to: InsertionMode,
    },
    CreateDecoration {
        id: DecorationId,
        data: DecorationData,
    },
    DeleteDecoration {
        id: DecorationId,
        data: DecorationData,
    },
    MoveDecoration {
        id: DecorationId,
        from: Point,
        to: Point,
    },
    AddSegment {
        segment: Segment,
        info: SegmentInfo,
    },
    DeleteSegment {
        segment: Segment,
        info: SegmentInfo,
    },
    /// `deleted` was merged into `merge_to`; undoing re-splits it back out.
    MergeSegments {
        wire_id: WireId,
        merge_to: SegmentIndex,
        deleted: SegmentIndex,
        deleted_info: SegmentInfo,
    },
    /// Inverse of `MergeSegments`: `source` was split, producing `new_index`
    /// with `new_info`.
    SplitSegment {
        wire_id: WireId,
        source: SegmentIndex,
        new_index: SegmentIndex,
        new_info: SegmentInfo,
    },
    ChangeWireInsertionMode {
        segment: Segment,
        from: InsertionMode,
        to: InsertionMode,
    },
    SetEndpoints {
        segment: Segment,
        old: SegmentInfo,
        new: SegmentInfo,
    },
    SetValidParts {
        segment: Segment,
        old: PartSelection,
        new: PartSelection,
    },
    SwapSegmentIndices {
        wire_id: WireId,
        a: SegmentIndex,
        b: SegmentIndex,
    },
}

impl HistoryEntry {
    /// The entry that, if applied, undoes the effect of applying `self`.
    ///
    /// `MergeSegments`/`SplitSegment` are each other's approximate inverse:
    /// the exact index the split produces depends on the wire's state at
    /// replay time, so `Modifier` is expected to patch `new_index` in after
    /// performing the real split rather than trust the stored placeholder.
    pub fn inverse(&self) -> HistoryEntry {
        match self {
            HistoryEntry::CreateLogicItem { id, data } => HistoryEntry::DeleteLogicItem {
                id: *id,
                data: data.clone(),
            },
            HistoryEntry::DeleteLogicItem { id, data } => HistoryEntry::CreateLogicItem {
                id: *id,
                data: data.clone(),
            },
            HistoryEntry::MoveLogicItem { id, from, to } => HistoryEntry::MoveLogicItem {
                id: *id,
                from: *to,
                to: *from,
            },
            HistoryEntry::ChangeLogicItemInsertionMode { id, from, to } => {
                HistoryEntry::ChangeLogicItemInsertionMode {
                    id: *id,
                    from: *to,
                    to: *from,
                }
            }
            HistoryEntry::CreateDecoration { id, data } => HistoryEntry::DeleteDecoration {
                id: *id,
                data: data.clone(),
            },
            HistoryEntry::DeleteDecoration { id, data } => HistoryEntry::CreateDecoration {
                id: *id,
                data: data.clone(),
            },
            HistoryEntry::MoveDecoration { id, from, to } => HistoryEntry::MoveDecoration {
                id: *id,
                from: *to,
                to: *from,
            },
            HistoryEntry::AddSegment { segment, info } => HistoryEntry::DeleteSegment {
                segment: *segment,
                info: *info,
            },
            HistoryEntry::DeleteSegment { segment, info } => HistoryEntry::AddSegment {
                segment: *segment,
                info: *info,
            },
            HistoryEntry::MergeSegments {
                wire_id,
                merge_to,
                deleted,
                deleted_info,
            } => HistoryEntry::SplitSegment {
                wire_id: *wire_id,
                source: *merge_to,
                new_index: *deleted,
                new_info: *deleted_info,
            },
            HistoryEntry::SplitSegment {
                wire_id,
                source,
                new_index,
                new_info,
            } => HistoryEntry::MergeSegments {
                wire_id: *wire_id,
                merge_to: *source,
                deleted: *new_index,
                deleted_info: *new_info,
            },
            HistoryEntry::ChangeWireInsertionMode { segment, from, to } => {
                HistoryEntry::ChangeWireInsertionMode {
                    segment: *segment,
                    from: *to,
                    to: *from,
                }
            }
            HistoryEntry::SetEndpoints { segment, old, new } => HistoryEntry::SetEndpoints {
                segment: *segment,
                old: *new,
                new: *old,
            },
            HistoryEntry::SetValidParts { segment, old, new } => HistoryEntry::SetValidParts {
                segment: *segment,
                old: new.clone(),
                new: old.clone(),
            },
            HistoryEntry::SwapSegmentIndices { wire_id, a, b } => HistoryEntry::SwapSegmentIndices {
                wire_id: *wire_id,
                a: *a,
                b: *b,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use circuit_types::{Grid, Offset, Part};

    fn pt(x: i32, y: i32) -> Point {
        Point::new(Grid::new(x).unwrap(), Grid::new(y).unwrap())
    }

    #[test]
    fn move_logic_item_inverse_swaps_endpoints() {
        let entry = HistoryEntry::MoveLogicItem {
            id: LogicItemId::new(0),
            from: pt(0, 0),
            to: pt(3, 0),
        };
        let inv = entry.inverse();
        assert_eq!(
            inv,
            HistoryEntry::MoveLogicItem {
                id: LogicItemId::new(0),
                from: pt(3, 0),
                to: pt(0, 0),
            }
        );
        assert_eq!(inv.inverse(), entry);
    }

    #[test]
    fn swap_segment_indices_is_self_inverse() {
        let entry = HistoryEntry::SwapSegmentIndices {
            wire_id: WireId::new(2),
            a: SegmentIndex::new(0),
            b: SegmentIndex::new(1),
        };
        assert_eq!(entry.inverse(), entry);
    }

    #[test]
    fn set_valid_parts_inverse_swaps_old_and_new() {
        let mut old = PartSelection::new();
        old.add_part(Part::new(Offset::new(0), Offset::new(3)).unwrap());
        let mut new = PartSelection::new();
        new.add_part(Part::new(Offset::new(0), Offset::new(5)).unwrap());
        let entry = HistoryEntry::SetValidParts {
            segment: Segment::new(WireId::new(2), SegmentIndex::new(0)),
            old: old.clone(),
            new: new.clone(),
        };
        let inv = entry.inverse();
        match inv {
            HistoryEntry::SetValidParts { old: o, new: n, .. } => {
                assert_eq!(o.parts(), new.parts());
                assert_eq!(n.parts(), old.parts());
            }
            _ => panic!("expected SetValidParts"),
        }
    }
}
