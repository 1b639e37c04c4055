//! Logic item and decoration lifecycle primitives (spec.md §4.7.1). Both
//! mirror each other closely — matching `LogicItemStore`/`DecorationStore`
//! already being two parallel, independently-written stores rather than one
//! generic one (see `circuit-layout/src/layout.rs`).

use circuit_layout::{DecorationData, LogicItemData};
use circuit_message::InfoMessage;
use circuit_types::{CacheState, DecorationId, InsertionMode, LogicItemId, Point};
use circuit_history::HistoryEntry;

use crate::error::ModifierError;
use crate::modifier::Modifier;

impl Modifier {
    /// Allocate a new logic item in the `temporary` state, then immediately
    /// transition it to `mode` (a no-op for `InsertionMode::Temporary`).
    pub fn add_logic_item(
        &mut self,
        mut data: LogicItemData,
        mode: InsertionMode,
    ) -> Result<LogicItemId, ModifierError> {
        data.display_state = circuit_types::DisplayState::Temporary;
        let id = self.data.layout.logic_items.add(data.clone());
        self.data.history.push(HistoryEntry::CreateLogicItem {
            id,
            data: data.clone(),
        });
        self.emit(InfoMessage::LogicItemCreated { id });
        self.change_logicitem_insertion_mode(id, mode)?;
        self.data.history.commit_group();
        Ok(id)
    }

    /// Transition `id` between `temporary`, `collisions`, and
    /// `insert_or_discard` display states (spec.md §4.7.2's collision rule
    /// table, applied here to a single reserved point standing in for the
    /// item's full multi-cell footprint).
    pub fn change_logicitem_insertion_mode(
        &mut self,
        id: LogicItemId,
        mode: InsertionMode,
    ) -> Result<(), ModifierError> {
        let old_data = self.data.layout.logic_items.data(id)?.clone();
        if old_data.display_state.is_inserted() {
            self.emit(InfoMessage::LogicItemUninserted {
                id,
                data: old_data.clone(),
            });
        }

        let mut new_data = old_data.clone();
        match mode {
            InsertionMode::Temporary => {
                new_data.display_state = circuit_types::DisplayState::Temporary;
                self.data.layout.logic_items.set_display_state(id, new_data.display_state)?;
            }
            InsertionMode::Collisions => {
                let collides = self
                    .data
                    .indices
                    .collision
                    .check_and_combine(old_data.position, CacheState::ElementBody)
                    .is_err();
                new_data.display_state = if collides {
                    circuit_types::DisplayState::Colliding
                } else {
                    circuit_types::DisplayState::Valid
                };
                self.data.layout.logic_items.set_display_state(id, new_data.display_state)?;
                if !collides {
                    self.emit(InfoMessage::LogicItemInserted {
                        id,
                        data: new_data.clone(),
                    });
                }
            }
            InsertionMode::InsertOrDiscard => {
                let collides = self
                    .data
                    .indices
                    .collision
                    .check_and_combine(old_data.position, CacheState::ElementBody)
                    .is_err();
                if collides {
                    // discarded, not an error (spec.md §7 "Collision").
                    new_data.display_state = circuit_types::DisplayState::Temporary;
                    self.data.layout.logic_items.set_display_state(id, new_data.display_state)?;
                } else {
                    new_data.display_state = circuit_types::DisplayState::Normal;
                    self.data.layout.logic_items.set_display_state(id, new_data.display_state)?;
                    self.emit(InfoMessage::LogicItemInserted {
                        id,
                        data: new_data.clone(),
                    });
                }
            }
        }

        self.data.history.push(HistoryEntry::ChangeLogicItemInsertionMode {
            id,
            from: display_state_to_mode(old_data.display_state),
            to: mode,
        });
        Ok(())
    }

    /// Delete `id`, requiring it to currently be `temporary` (spec.md
    /// §4.7.1). Swap-and-delete relocation is reported as a follow-up
    /// `LogicItemIdUpdated`.
    pub fn delete_temporary_logicitem(&mut self, id: LogicItemId) -> Result<(), ModifierError> {
        let data = self.data.layout.logic_items.data(id)?.clone();
        if data.display_state != circuit_types::DisplayState::Temporary {
            return Err(ModifierError::NotTemporary(id));
        }
        self.data.history.push(HistoryEntry::DeleteLogicItem {
            id,
            data: data.clone(),
        });
        self.emit(InfoMessage::LogicItemDeleted { id });
        if let Some(relocated) = self.data.layout.logic_items.swap_and_delete(id)? {
            self.emit(InfoMessage::LogicItemIdUpdated { old: relocated, new: id });
        }
        self.data.history.commit_group();
        Ok(())
    }

    /// Move a temporary item by `(dx, dy)` if the new position stays
    /// representable; otherwise it is dropped (spec.md §4.7.1).
    pub fn move_or_delete_temporary_logicitem(
        &mut self,
        id: LogicItemId,
        dx: i32,
        dy: i32,
    ) -> Result<(), ModifierError> {
        let data = self.data.layout.logic_items.data(id)?.clone();
        if data.display_state != circuit_types::DisplayState::Temporary {
            return Err(ModifierError::NotTemporary(id));
        }
        let new_position = data
            .position
            .x
            .checked_add(dx)
            .zip(data.position.y.checked_add(dy))
            .map(|(x, y)| Point::new(x, y));

        match new_position {
            Some(position) => {
                self.data.history.push(HistoryEntry::MoveLogicItem {
                    id,
                    from: data.position,
                    to: position,
                });
                self.data.layout.logic_items.set_position(id, position)?;
                self.data.history.commit_group();
                Ok(())
            }
            None => self.delete_temporary_logicitem(id),
        }
    }

    pub fn add_decoration(
        &mut self,
        mut data: DecorationData,
        mode: InsertionMode,
    ) -> Result<DecorationId, ModifierError> {
        data.display_state = circuit_types::DisplayState::Temporary;
        let id = self.data.layout.decorations.add(data.clone());
        self.data.history.push(HistoryEntry::CreateDecoration {
            id,
            data: data.clone(),
        });
        self.emit(InfoMessage::DecorationCreated { id });
        self.change_decoration_insertion_mode(id, mode)?;
        self.data.history.commit_group();
        Ok(id)
    }

    pub fn change_decoration_insertion_mode(
        &mut self,
        id: DecorationId,
        mode: InsertionMode,
    ) -> Result<(), ModifierError> {
        let old_data = self.data.layout.decorations.data(id)?.clone();
        if old_data.display_state.is_inserted() {
            self.emit(InfoMessage::DecorationUninserted {
                id,
                data: old_data.clone(),
            });
        }

        let new_state = match mode {
            InsertionMode::Temporary => circuit_types::DisplayState::Temporary,
            InsertionMode::Collisions | InsertionMode::InsertOrDiscard => {
                circuit_types::DisplayState::Normal
            }
        };
        self.data.layout.decorations.set_display_state(id, new_state)?;
        if new_state.is_inserted() {
            let mut new_data = old_data.clone();
            new_data.display_state = new_state;
            self.emit(InfoMessage::DecorationInserted { id, data: new_data });
        }
        Ok(())
    }

    pub fn delete_temporary_decoration(&mut self, id: DecorationId) -> Result<(), ModifierError> {
        let data = self.data.layout.decorations.data(id)?.clone();
        self.data.history.push(HistoryEntry::DeleteDecoration {
            id,
            data: data.clone(),
        });
        self.emit(InfoMessage::DecorationDeleted { id });
        if let Some(relocated) = self.data.layout.decorations.swap_and_delete(id)? {
            self.emit(InfoMessage::DecorationIdUpdated { old: relocated, new: id });
        }
        self.data.history.commit_group();
        Ok(())
    }

    /// Mirror of [`Modifier::move_or_delete_temporary_logicitem`] for
    /// decorations (spec.md §6.2 "decoration lifecycle: mirror of logic
    /// item").
    pub fn move_or_delete_temporary_decoration(
        &mut self,
        id: DecorationId,
        dx: i32,
        dy: i32,
    ) -> Result<(), ModifierError> {
        let data = self.data.layout.decorations.data(id)?.clone();
        let new_position = data
            .position
            .x
            .checked_add(dx)
            .zip(data.position.y.checked_add(dy))
            .map(|(x, y)| Point::new(x, y));

        match new_position {
            Some(position) => {
                self.data.history.push(HistoryEntry::MoveDecoration {
                    id,
                    from: data.position,
                    to: position,
                });
                self.data.layout.decorations.set_position(id, position)?;
                self.data.history.commit_group();
                Ok(())
            }
            None => self.delete_temporary_decoration(id),
        }
    }
}

fn display_state_to_mode(state: circuit_types::DisplayState) -> InsertionMode {
    use circuit_types::DisplayState::*;
    match state {
        Temporary => InsertionMode::Temporary,
        Colliding => InsertionMode::Collisions,
        Normal | Valid => InsertionMode::InsertOrDiscard,
    }
}
