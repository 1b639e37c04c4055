//! `InfoMessage`: the broadcast channel between `Modifier` and every
//! consumer (indices, selections, validators) described in spec.md §4.6.
//! Kept in its own crate because both `circuit-index`/`circuit-selection`
//! (consumers) and `circuit-modifier` (producer) need the type without
//! creating a dependency cycle between them.

use circuit_layout::{DecorationData, LogicItemData, SegmentInfo};
use circuit_types::{DecorationId, LogicItemId, Segment, SegmentPart};

#[derive(Debug, Clone, PartialEq)]
pub enum InfoMessage {
    // -- logic item --
    LogicItemCreated { id: LogicItemId },
    LogicItemIdUpdated { old: LogicItemId, new: LogicItemId },
    LogicItemDeleted { id: LogicItemId },

    // -- inserted logic item --
    LogicItemInserted { id: LogicItemId, data: LogicItemData },
    InsertedLogicItemIdUpdated {
        old: LogicItemId,
        new: LogicItemId,
        data: LogicItemData,
    },
    LogicItemUninserted { id: LogicItemId, data: LogicItemData },

    // -- decoration (mirrors logic item) --
    DecorationCreated { id: DecorationId },
    DecorationIdUpdated { old: DecorationId, new: DecorationId },
    DecorationDeleted { id: DecorationId },
    DecorationInserted { id: DecorationId, data: DecorationData },
    InsertedDecorationIdUpdated {
        old: DecorationId,
        new: DecorationId,
        data: DecorationData,
    },
    DecorationUninserted { id: DecorationId, data: DecorationData },

    // -- segment --
    SegmentCreated { segment: Segment, size: u16 },
    SegmentIdUpdated { old: Segment, new: Segment },
    SegmentPartMoved { src: SegmentPart, dst: SegmentPart },
    SegmentPartDeleted { segment_part: SegmentPart },

    // -- inserted segment --
    SegmentInserted { segment: Segment, info: SegmentInfo },
    InsertedSegmentIdUpdated {
        old: Segment,
        new: Segment,
        info: SegmentInfo,
    },
    InsertedEndPointsUpdated { segment: Segment, info: SegmentInfo },
    SegmentUninserted { segment: Segment, info: SegmentInfo },
}

pub mod validator;
pub use validator::{MessageValidator, ValidatorError};
