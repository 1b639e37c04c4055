//! `SelectionGuard`: an RAII scope that creates a selection on construction
//! and destroys it on drop, guaranteeing cleanup on every exit path
//! including failure (spec.md §4.5, §9 "Memory" invariant).

use crate::selection_store::SelectionStore;
use circuit_types::SelectionId;

pub struct SelectionGuard<'a> {
    store: &'a mut SelectionStore,
    id: SelectionId,
}

impl<'a> SelectionGuard<'a> {
    pub fn new(store: &'a mut SelectionStore) -> Self {
        let id = store.create();
        Self { store, id }
    }

    pub fn id(&self) -> SelectionId {
        self.id
    }

    pub fn store(&self) -> &SelectionStore {
        self.store
    }

    pub fn store_mut(&mut self) -> &mut SelectionStore {
        self.store
    }
}

impl Drop for SelectionGuard<'_> {
    fn drop(&mut self) {
        self.store.destroy(self.id);
    }
}
