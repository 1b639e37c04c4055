//! Two-stack grouped undo/redo (spec.md §4.7.1 "History"). Entries pushed
//! between a `commit_group` call accumulate into one group; undoing a group
//! replays its entries' inverses in reverse order and the inverses-of-those
//! become the matching redo group.

use crate::entry::HistoryEntry;
use tracing::trace;

#[derive(Debug, Clone, Default)]
pub struct History {
    enabled: bool,
    current_group: Vec<HistoryEntry>,
    undo_stack: Vec<Vec<HistoryEntry>>,
    redo_stack: Vec<Vec<HistoryEntry>>,
}

impl History {
    pub fn new() -> Self {
        Self {
            enabled: true,
            current_group: Vec::new(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling history drops the in-progress group; primitives applied
    /// while disabled (e.g. while replaying an undo) are not recorded.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.current_group.clear();
        }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        if !self.enabled {
            return;
        }
        self.current_group.push(entry);
    }

    /// Close the in-progress group onto the undo stack (a no-op if nothing
    /// was pushed since the last commit) and drop the redo stack, since a
    /// fresh edit invalidates any history of undone edits.
    pub fn commit_group(&mut self) {
        if self.current_group.is_empty() {
            return;
        }
        let group = std::mem::take(&mut self.current_group);
        trace!(target: "history", entries = group.len(), "commit_group");
        self.undo_stack.push(group);
        self.redo_stack.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty() || !self.current_group.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Pop the most recent group and return its entries in replay order
    /// (last pushed first). The caller applies each entry to the layout;
    /// the group's inverses are pushed onto the redo stack as a unit.
    pub fn undo_group(&mut self) -> Option<Vec<HistoryEntry>> {
        self.commit_group();
        let group = self.undo_stack.pop()?;
        let redo_group: Vec<HistoryEntry> = group.iter().map(HistoryEntry::inverse).collect();
        self.redo_stack.push(redo_group);
        Some(group.into_iter().rev().collect())
    }

    /// Pop the most recent redo group and return its entries in replay
    /// order, pushing the matching undo group back onto the undo stack.
    pub fn redo_group(&mut self) -> Option<Vec<HistoryEntry>> {
        let group = self.redo_stack.pop()?;
        let undo_group: Vec<HistoryEntry> = group.iter().map(HistoryEntry::inverse).collect();
        self.undo_stack.push(undo_group);
        Some(group.into_iter().rev().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use circuit_layout::LogicItemData;
    use circuit_types::{
        ConnectionCount, DisplayState, ElementType, Grid, LogicItemId, Point, Rotation,
    };
    use circuit_geometry::Rect;

    fn pt(x: i32, y: i32) -> Point {
        Point::new(Grid::new(x).unwrap(), Grid::new(y).unwrap())
    }

    fn sample_item(position: Point) -> LogicItemData {
        LogicItemData {
            element_type: ElementType::And,
            input_count: ConnectionCount::new(2).unwrap(),
            output_count: ConnectionCount::new(1).unwrap(),
            position,
            rotation: Rotation::Right,
            sub_circuit_id: None,
            input_inverters: Default::default(),
            output_inverters: Default::default(),
            output_delays: Default::default(),
            display_state: DisplayState::Temporary,
            bounding_rect: Rect::single_point(position),
        }
    }

    #[test]
    fn undo_then_redo_round_trips_a_single_entry() {
        let mut history = History::new();
        let id = LogicItemId::new(0);
        let data = sample_item(pt(0, 0));
        history.push(HistoryEntry::CreateLogicItem {
            id,
            data: data.clone(),
        });
        history.commit_group();
        assert!(history.can_undo());
        assert!(!history.can_redo());

        let undo = history.undo_group().unwrap();
        assert_eq!(
            undo,
            vec![HistoryEntry::CreateLogicItem {
                id,
                data: data.clone()
            }]
        );
        assert!(history.can_redo());

        let redo = history.redo_group().unwrap();
        assert_eq!(
            redo,
            vec![HistoryEntry::DeleteLogicItem { id, data }.inverse()]
        );
    }

    #[test]
    fn grouped_entries_undo_in_reverse_push_order() {
        let mut history = History::new();
        let a = LogicItemId::new(0);
        let b = LogicItemId::new(1);
        history.push(HistoryEntry::CreateLogicItem {
            id: a,
            data: sample_item(pt(0, 0)),
        });
        history.push(HistoryEntry::CreateLogicItem {
            id: b,
            data: sample_item(pt(1, 0)),
        });
        history.commit_group();

        let undo = history.undo_group().unwrap();
        assert_eq!(undo.len(), 2);
        assert!(matches!(undo[0], HistoryEntry::CreateLogicItem { id, .. } if id == b));
        assert!(matches!(undo[1], HistoryEntry::CreateLogicItem { id, .. } if id == a));
    }

    #[test]
    fn new_edit_after_undo_clears_redo() {
        let mut history = History::new();
        history.push(HistoryEntry::MoveLogicItem {
            id: LogicItemId::new(0),
            from: pt(0, 0),
            to: pt(1, 0),
        });
        history.commit_group();
        history.undo_group();
        assert!(history.can_redo());

        history.push(HistoryEntry::MoveLogicItem {
            id: LogicItemId::new(0),
            from: pt(0, 0),
            to: pt(2, 0),
        });
        history.commit_group();
        assert!(!history.can_redo());
    }

    #[test]
    fn disabling_history_suppresses_pushes() {
        let mut history = History::new();
        history.set_enabled(false);
        history.push(HistoryEntry::MoveLogicItem {
            id: LogicItemId::new(0),
            from: pt(0, 0),
            to: pt(1, 0),
        });
        history.commit_group();
        assert!(!history.can_undo());
    }
}
