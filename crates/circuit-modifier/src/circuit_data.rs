//! `CircuitData`: layout, indices, selections, and history bundled as one
//! unit with a single `submit` broadcast entry point — grounded on
//! `core/component/editable_circuit/circuit_data.h`'s `CircuitData` struct
//! (`layout`, `index`, `selection_store`, `visible_selection`, `history`,
//! plus an optional `message_validator`).

use circuit_history::History;
use circuit_layout::Layout;
use circuit_message::{InfoMessage, MessageValidator};
use circuit_selection::{Selection, SelectionStore};

use crate::indices::Indices;

#[derive(Debug, Clone, Default)]
pub struct CircuitData {
    pub layout: Layout,
    pub indices: Indices,
    pub selection_store: SelectionStore,
    pub visible_selection: Selection,
    pub history: History,
    pub message_validator: Option<MessageValidator>,
}

impl CircuitData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construction used by tests and debug builds: every emitted message is
    /// additionally checked for Inserted/Uninserted balance.
    pub fn with_validator() -> Self {
        Self {
            message_validator: Some(MessageValidator::new()),
            ..Self::default()
        }
    }

    /// Broadcast one message to every consumer, in the fixed order the
    /// indices (derived, read by the selections' own bookkeeping) are
    /// updated before the user-facing selections see it.
    pub fn submit(&mut self, msg: &InfoMessage) {
        self.indices.submit(msg);
        self.selection_store.submit_all(msg);
        self.visible_selection.submit(msg);
        if let Some(validator) = &mut self.message_validator {
            validator
                .submit(msg)
                .expect("modifier emitted a message sequence the validator rejected");
        }
    }
}
