//! Failure kinds surfaced by [`crate::editable_circuit::EditableCircuit`],
//! wrapping whichever lower layer rejected the call.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditableCircuitError {
    #[error(transparent)]
    Modifier(#[from] circuit_modifier::ModifierError),
    #[error(transparent)]
    Layout(#[from] circuit_layout::LayoutError),
    #[error(transparent)]
    SegmentTree(#[from] circuit_layout::SegmentTreeError),
    #[error(transparent)]
    Selection(#[from] circuit_selection::SelectionStoreError),
    #[error("wire {0:?} is inserted and cannot be moved as temporary geometry")]
    NotUninsertedWire(circuit_types::WireId),
    #[error("translating wire {0:?} would move a segment endpoint out of the representable grid range")]
    PositionOutOfRange(circuit_types::WireId),
}
