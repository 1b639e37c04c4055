//! `SelectionStore`: every live `Selection`, addressed by `SelectionId` and
//! kept in lock-step with the layout by broadcasting every `InfoMessage` to
//! all of them (spec.md §4.5). Grounded on the random-seeded id allocation
//! of `component/selection_registry/registry_store.cpp`.

use crate::selection::Selection;
use ahash::AHashMap;
use circuit_message::InfoMessage;
use circuit_types::SelectionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SelectionStoreError {
    #[error("selection id {0:?} is not present in this store")]
    UnknownSelection(SelectionId),
}

#[derive(Debug, Clone)]
pub struct SelectionStore {
    next_id: u64,
    selections: AHashMap<SelectionId, Selection>,
}

impl SelectionStore {
    /// The 31-bit random seed makes ids from independently constructed
    /// stores rarely collide — a defensive measure for external holders
    /// that might compare ids across store instances.
    pub fn new() -> Self {
        let seed = (fastrand::u32(..) & 0x7fff_ffff) as u64;
        Self {
            next_id: seed,
            selections: AHashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn create(&mut self) -> SelectionId {
        let id = SelectionId::new(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .expect("selection id counter exhausted u64 space");
        self.selections.insert(id, Selection::new());
        id
    }

    pub fn destroy(&mut self, id: SelectionId) {
        self.selections.remove(&id);
    }

    pub fn get(&self, id: SelectionId) -> Result<&Selection, SelectionStoreError> {
        self.selections
            .get(&id)
            .ok_or(SelectionStoreError::UnknownSelection(id))
    }

    pub fn get_mut(&mut self, id: SelectionId) -> Result<&mut Selection, SelectionStoreError> {
        self.selections
            .get_mut(&id)
            .ok_or(SelectionStoreError::UnknownSelection(id))
    }

    /// Broadcast `msg` to every contained selection.
    pub fn submit_all(&mut self, msg: &InfoMessage) {
        for selection in self.selections.values_mut() {
            selection.submit(msg);
        }
    }
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use circuit_types::LogicItemId;

    #[test]
    fn create_then_broadcast_reaches_every_selection() {
        let mut store = SelectionStore::new();
        let a = store.create();
        let b = store.create();
        let id = LogicItemId::new(7);
        store.get_mut(a).unwrap().add_logic_item(id);
        store.get_mut(b).unwrap().add_logic_item(id);

        store.submit_all(&InfoMessage::LogicItemDeleted { id });

        assert!(!store.get(a).unwrap().contains_logic_item(id));
        assert!(!store.get(b).unwrap().contains_logic_item(id));
    }

    #[test]
    fn destroy_removes_the_selection() {
        let mut store = SelectionStore::new();
        let id = store.create();
        store.destroy(id);
        assert!(store.get(id).is_err());
    }
}
