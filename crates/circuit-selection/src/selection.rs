//! A single selection: sets of selected logic items, decorations, and
//! per-segment part ranges, kept stable across edits via `submit` (spec.md
//! §4.5).

use ahash::{AHashMap, AHashSet};
use circuit_geometry::PartSelection;
use circuit_message::InfoMessage;
use circuit_types::{DecorationId, LogicItemId, PartCopyDefinition, Segment, SegmentPart};

#[derive(Debug, Clone, Default)]
pub struct Selection {
    logic_items: AHashSet<LogicItemId>,
    decorations: AHashSet<DecorationId>,
    segment_parts: AHashMap<Segment, PartSelection>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.logic_items.is_empty() && self.decorations.is_empty() && self.segment_parts.is_empty()
    }

    pub fn logic_items(&self) -> impl Iterator<Item = LogicItemId> + '_ {
        self.logic_items.iter().copied()
    }

    pub fn decorations(&self) -> impl Iterator<Item = DecorationId> + '_ {
        self.decorations.iter().copied()
    }

    pub fn segment_parts(&self) -> impl Iterator<Item = (Segment, &PartSelection)> {
        self.segment_parts.iter().map(|(&s, p)| (s, p))
    }

    pub fn segment_part(&self, segment: Segment) -> Option<&PartSelection> {
        self.segment_parts.get(&segment)
    }

    pub fn contains_logic_item(&self, id: LogicItemId) -> bool {
        self.logic_items.contains(&id)
    }

    pub fn contains_decoration(&self, id: DecorationId) -> bool {
        self.decorations.contains(&id)
    }

    pub fn add_logic_item(&mut self, id: LogicItemId) {
        self.logic_items.insert(id);
    }

    pub fn remove_logic_item(&mut self, id: LogicItemId) {
        self.logic_items.remove(&id);
    }

    pub fn add_decoration(&mut self, id: DecorationId) {
        self.decorations.insert(id);
    }

    pub fn remove_decoration(&mut self, id: DecorationId) {
        self.decorations.remove(&id);
    }

    pub fn add_segment_part(&mut self, segment_part: SegmentPart) {
        self.segment_parts
            .entry(segment_part.segment)
            .or_insert_with(PartSelection::new)
            .add_part(segment_part.part);
    }

    pub fn remove_segment_part(&mut self, segment_part: SegmentPart) {
        if let Some(sel) = self.segment_parts.get_mut(&segment_part.segment) {
            sel.remove_part(segment_part.part);
            if sel.is_empty() {
                self.segment_parts.remove(&segment_part.segment);
            }
        }
    }

    /// Transition this selection's state in response to one `InfoMessage`.
    /// Messages this selection has no stake in (insertion-state changes,
    /// anything not named in spec.md §4.5) are silently ignored.
    pub fn submit(&mut self, msg: &InfoMessage) {
        match msg {
            InfoMessage::LogicItemDeleted { id } => {
                self.logic_items.remove(id);
            }
            InfoMessage::LogicItemIdUpdated { old, new } => {
                if self.logic_items.remove(old) {
                    self.logic_items.insert(*new);
                }
            }
            InfoMessage::DecorationDeleted { id } => {
                self.decorations.remove(id);
            }
            InfoMessage::DecorationIdUpdated { old, new } => {
                if self.decorations.remove(old) {
                    self.decorations.insert(*new);
                }
            }
            InfoMessage::SegmentIdUpdated { old, new } => {
                if let Some(sel) = self.segment_parts.remove(old) {
                    self.segment_parts.insert(*new, sel);
                }
            }
            InfoMessage::SegmentPartMoved { src, dst } => {
                self.move_segment_part(*src, *dst);
            }
            InfoMessage::SegmentPartDeleted { segment_part } => {
                self.remove_segment_part(*segment_part);
            }
            _ => {}
        }
    }

    fn move_segment_part(&mut self, src: SegmentPart, dst: SegmentPart) {
        let Some(src_sel) = self.segment_parts.get(&src.segment) else {
            return;
        };
        if src_sel.is_empty() {
            return;
        }
        let mut moved = PartSelection::new();
        let copy_def = PartCopyDefinition {
            destination: dst.part,
            source: src.part,
        };
        if moved.copy_parts(src_sel, copy_def).is_err() || moved.is_empty() {
            return;
        }

        if let Some(src_sel) = self.segment_parts.get_mut(&src.segment) {
            src_sel.remove_part(src.part);
            if src_sel.is_empty() {
                self.segment_parts.remove(&src.segment);
            }
        }
        let entry = self
            .segment_parts
            .entry(dst.segment)
            .or_insert_with(PartSelection::new);
        for &part in moved.parts() {
            entry.add_part(part);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use circuit_types::{Offset, Part, SegmentIndex, WireId};

    fn part(a: u16, b: u16) -> Part {
        Part::new(Offset::new(a), Offset::new(b)).unwrap()
    }

    fn segment(wire: u32, index: u32) -> Segment {
        Segment::new(WireId::new(wire), SegmentIndex::new(index))
    }

    #[test]
    fn logic_item_deleted_drops_from_selection() {
        let mut sel = Selection::new();
        let id = LogicItemId::new(4);
        sel.add_logic_item(id);
        sel.submit(&InfoMessage::LogicItemDeleted { id });
        assert!(!sel.contains_logic_item(id));
    }

    #[test]
    fn logic_item_id_updated_rekeys() {
        let mut sel = Selection::new();
        let old = LogicItemId::new(4);
        let new = LogicItemId::new(0);
        sel.add_logic_item(old);
        sel.submit(&InfoMessage::LogicItemIdUpdated { old, new });
        assert!(!sel.contains_logic_item(old));
        assert!(sel.contains_logic_item(new));
    }

    #[test]
    fn segment_id_updated_rekeys_part_selection() {
        let mut sel = Selection::new();
        let old = segment(0, 0);
        let new = segment(0, 1);
        sel.add_segment_part(SegmentPart::new(old, part(0, 5)));
        sel.submit(&InfoMessage::SegmentIdUpdated { old, new });
        assert!(sel.segment_part(old).is_none());
        assert_eq!(sel.segment_part(new).unwrap().parts(), &[part(0, 5)]);
    }

    #[test]
    fn segment_part_moved_shifts_selected_range() {
        let mut sel = Selection::new();
        let src = segment(0, 0);
        let dst = segment(0, 1);
        // selection covers [3,5) of a 5-unit segment that is being merged
        // into a second segment, landing at [5,10) overall.
        sel.add_segment_part(SegmentPart::new(src, part(3, 5)));
        sel.submit(&InfoMessage::SegmentPartMoved {
            src: SegmentPart::new(src, part(0, 5)),
            dst: SegmentPart::new(dst, part(5, 10)),
        });
        assert!(sel.segment_part(src).is_none());
        assert_eq!(sel.segment_part(dst).unwrap().parts(), &[part(8, 10)]);
    }

    #[test]
    fn segment_part_deleted_removes_range() {
        let mut sel = Selection::new();
        let seg = segment(0, 0);
        sel.add_segment_part(SegmentPart::new(seg, part(0, 10)));
        sel.submit(&InfoMessage::SegmentPartDeleted {
            segment_part: SegmentPart::new(seg, part(3, 7)),
        });
        assert_eq!(sel.segment_part(seg).unwrap().parts(), &[part(0, 3), part(7, 10)]);
    }
}
