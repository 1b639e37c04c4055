//! `MessageValidator`: a test-only consumer that replays an `InfoMessage`
//! stream and checks the ordering contract from spec.md §4.6 — every
//! `…Inserted`/`…Uninserted` pair is balanced and every `…IdUpdated` only
//! ever renames an id this validator has actually seen created.

use crate::InfoMessage;
use ahash::AHashSet as HashSet;
use circuit_types::{DecorationId, LogicItemId, Segment};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidatorError {
    #[error("logic item {0:?} renamed/deleted but was never created")]
    UnknownLogicItem(LogicItemId),
    #[error("logic item {0:?} created twice without being deleted")]
    DuplicateLogicItemCreate(LogicItemId),
    #[error("logic item {0:?} inserted twice without being uninserted")]
    DoubleInsertLogicItem(LogicItemId),
    #[error("logic item {0:?} uninserted but was not inserted")]
    UninsertWithoutInsertLogicItem(LogicItemId),
    #[error("decoration {0:?} renamed/deleted but was never created")]
    UnknownDecoration(DecorationId),
    #[error("decoration {0:?} created twice without being deleted")]
    DuplicateDecorationCreate(DecorationId),
    #[error("decoration {0:?} inserted twice without being uninserted")]
    DoubleInsertDecoration(DecorationId),
    #[error("decoration {0:?} uninserted but was not inserted")]
    UninsertWithoutInsertDecoration(DecorationId),
    #[error("segment {0:?} referenced but was never created")]
    UnknownSegment(Segment),
    #[error("segment {0:?} inserted twice without being uninserted")]
    DoubleInsertSegment(Segment),
    #[error("segment {0:?} uninserted but was not inserted")]
    UninsertWithoutInsertSegment(Segment),
}

#[derive(Debug, Clone, Default)]
pub struct MessageValidator {
    live_logic_items: HashSet<LogicItemId>,
    inserted_logic_items: HashSet<LogicItemId>,
    live_decorations: HashSet<DecorationId>,
    inserted_decorations: HashSet<DecorationId>,
    live_segments: HashSet<Segment>,
    inserted_segments: HashSet<Segment>,
}

impl MessageValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit(&mut self, msg: &InfoMessage) -> Result<(), ValidatorError> {
        match msg.clone() {
            InfoMessage::LogicItemCreated { id } => {
                if !self.live_logic_items.insert(id) {
                    return Err(ValidatorError::DuplicateLogicItemCreate(id));
                }
            }
            InfoMessage::LogicItemIdUpdated { old, new } => {
                self.require_logic_item(old)?;
                self.live_logic_items.remove(&old);
                self.live_logic_items.insert(new);
                if self.inserted_logic_items.remove(&old) {
                    self.inserted_logic_items.insert(new);
                }
            }
            InfoMessage::LogicItemDeleted { id } => {
                self.require_logic_item(id)?;
                self.live_logic_items.remove(&id);
            }
            InfoMessage::LogicItemInserted { id, .. } => {
                self.require_logic_item(id)?;
                if !self.inserted_logic_items.insert(id) {
                    return Err(ValidatorError::DoubleInsertLogicItem(id));
                }
            }
            InfoMessage::InsertedLogicItemIdUpdated { old, new, .. } => {
                if !self.inserted_logic_items.remove(&old) {
                    return Err(ValidatorError::UninsertWithoutInsertLogicItem(old));
                }
                self.inserted_logic_items.insert(new);
            }
            InfoMessage::LogicItemUninserted { id, .. } => {
                if !self.inserted_logic_items.remove(&id) {
                    return Err(ValidatorError::UninsertWithoutInsertLogicItem(id));
                }
            }

            InfoMessage::DecorationCreated { id } => {
                if !self.live_decorations.insert(id) {
                    return Err(ValidatorError::DuplicateDecorationCreate(id));
                }
            }
            InfoMessage::DecorationIdUpdated { old, new } => {
                self.require_decoration(old)?;
                self.live_decorations.remove(&old);
                self.live_decorations.insert(new);
                if self.inserted_decorations.remove(&old) {
                    self.inserted_decorations.insert(new);
                }
            }
            InfoMessage::DecorationDeleted { id } => {
                self.require_decoration(id)?;
                self.live_decorations.remove(&id);
            }
            InfoMessage::DecorationInserted { id, .. } => {
                self.require_decoration(id)?;
                if !self.inserted_decorations.insert(id) {
                    return Err(ValidatorError::DoubleInsertDecoration(id));
                }
            }
            InfoMessage::InsertedDecorationIdUpdated { old, new, .. } => {
                if !self.inserted_decorations.remove(&old) {
                    return Err(ValidatorError::UninsertWithoutInsertDecoration(old));
                }
                self.inserted_decorations.insert(new);
            }
            InfoMessage::DecorationUninserted { id, .. } => {
                if !self.inserted_decorations.remove(&id) {
                    return Err(ValidatorError::UninsertWithoutInsertDecoration(id));
                }
            }

            InfoMessage::SegmentCreated { segment, .. } => {
                self.live_segments.insert(segment);
            }
            InfoMessage::SegmentIdUpdated { old, new } => {
                self.require_segment(old)?;
                self.live_segments.remove(&old);
                self.live_segments.insert(new);
                if self.inserted_segments.remove(&old) {
                    self.inserted_segments.insert(new);
                }
            }
            InfoMessage::SegmentPartMoved { .. } => {}
            InfoMessage::SegmentPartDeleted { segment_part } => {
                self.require_segment(segment_part.segment)?;
            }

            InfoMessage::SegmentInserted { segment, .. } => {
                self.require_segment(segment)?;
                if !self.inserted_segments.insert(segment) {
                    return Err(ValidatorError::DoubleInsertSegment(segment));
                }
            }
            InfoMessage::InsertedSegmentIdUpdated { old, new, .. } => {
                if !self.inserted_segments.remove(&old) {
                    return Err(ValidatorError::UninsertWithoutInsertSegment(old));
                }
                self.inserted_segments.insert(new);
            }
            InfoMessage::InsertedEndPointsUpdated { segment, .. } => {
                if !self.inserted_segments.contains(&segment) {
                    return Err(ValidatorError::UninsertWithoutInsertSegment(segment));
                }
            }
            InfoMessage::SegmentUninserted { segment, .. } => {
                if !self.inserted_segments.remove(&segment) {
                    return Err(ValidatorError::UninsertWithoutInsertSegment(segment));
                }
            }
        }
        Ok(())
    }

    fn require_logic_item(&self, id: LogicItemId) -> Result<(), ValidatorError> {
        if self.live_logic_items.contains(&id) {
            Ok(())
        } else {
            Err(ValidatorError::UnknownLogicItem(id))
        }
    }

    fn require_decoration(&self, id: DecorationId) -> Result<(), ValidatorError> {
        if self.live_decorations.contains(&id) {
            Ok(())
        } else {
            Err(ValidatorError::UnknownDecoration(id))
        }
    }

    fn require_segment(&self, segment: Segment) -> Result<(), ValidatorError> {
        if self.live_segments.contains(&segment) {
            Ok(())
        } else {
            Err(ValidatorError::UnknownSegment(segment))
        }
    }

    /// `true` once every created entity has been deleted and every inserted
    /// entity has been uninserted — the state a fully-drained history
    /// session should leave this validator in.
    pub fn is_balanced(&self) -> bool {
        self.live_logic_items.is_empty()
            && self.inserted_logic_items.is_empty()
            && self.live_decorations.is_empty()
            && self.inserted_decorations.is_empty()
            && self.live_segments.is_empty()
            && self.inserted_segments.is_empty()
    }
}
